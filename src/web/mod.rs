pub mod auth;
pub mod middleware;
pub mod posts;
pub mod state;
pub mod views;

pub use middleware::CurrentUser;
pub use state::AppState;

use std::time::Duration;

use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "session";

pub fn create_router(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config.request_timeout_secs);

    Router::new()
        // Feed
        .route("/", get(posts::home))
        // Accounts
        .route("/signup", get(auth::signup_page).post(auth::signup))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout))
        // Posts
        .route("/compose", get(posts::compose_page).post(posts::compose))
        .route(
            "/posts/{id}",
            get(posts::post_detail).delete(posts::delete_post),
        )
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(timeout))
        .with_state(state)
}

async fn not_found() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, views::not_found_page())
}
