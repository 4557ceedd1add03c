use std::sync::Arc;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sqlx::{Pool, Sqlite};

use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub db: Pool<Sqlite>,
    pub config: Arc<Config>,
    cookie_key: Key,
}

impl AppState {
    /// `Config::from_env` guarantees the secret is long enough to derive a
    /// signing key from.
    pub fn new(db: Pool<Sqlite>, config: Arc<Config>) -> Self {
        let cookie_key = Key::derive_from(config.session_secret.as_bytes());
        AppState {
            db,
            config,
            cookie_key,
        }
    }
}

// Lets SignedCookieJar pull its signing key out of the shared state.
impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Key {
        state.cookie_key.clone()
    }
}
