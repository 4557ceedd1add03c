use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::SignedCookieJar;

use crate::db::models::Role;
use crate::db::{SessionRepository, UserRepository};
use crate::error::AppError;
use crate::web::state::AppState;
use crate::web::SESSION_COOKIE;

/// The authenticated caller, resolved fresh on every request.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: String,
    pub username: String,
    pub role: Role,
}

/// Session-cookie authentication gate. Rejection redirects to the login
/// form rather than producing an error page.
///
/// The role always comes from the users table at request time, never from
/// the cookie, so a role change takes effect on the caller's next request.
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let jar: SignedCookieJar = match SignedCookieJar::from_request_parts(parts, state).await {
            Ok(jar) => jar,
            Err(err) => match err {},
        };

        let token = jar
            .get(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .ok_or(AppError::AuthRequired)?;

        let session = SessionRepository::resolve(&state.db, &token)
            .await?
            .ok_or(AppError::AuthRequired)?;

        // A session pointing at a user that no longer exists counts as no
        // session at all.
        let user = UserRepository::get_by_id(&state.db, &session.user_id)
            .await?
            .ok_or(AppError::AuthRequired)?;

        Ok(CurrentUser {
            id: user.id,
            username: user.username,
            role: user.role,
        })
    }
}

/// Role gate for admin-only actions. Distinct from the unauthenticated
/// rejection: the caller is known, just not allowed.
pub fn require_role(user: &CurrentUser, role: Role) -> Result<(), AppError> {
    if user.role == role {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caller(role: Role) -> CurrentUser {
        CurrentUser {
            id: "u-1".to_string(),
            username: "alice".to_string(),
            role,
        }
    }

    #[test]
    fn admin_passes_admin_gate() {
        assert!(require_role(&caller(Role::Admin), Role::Admin).is_ok());
    }

    #[test]
    fn user_is_forbidden_at_admin_gate() {
        let err = require_role(&caller(Role::User), Role::Admin).unwrap_err();
        assert!(matches!(err, AppError::Forbidden));
    }

    #[test]
    fn role_change_applies_on_next_check() {
        // The gate is stateless: each check sees whatever role the caller
        // was resolved with, so a promotion or demotion is picked up as
        // soon as the user record is re-read.
        let mut user = caller(Role::User);
        assert!(require_role(&user, Role::Admin).is_err());
        user.role = Role::Admin;
        assert!(require_role(&user, Role::Admin).is_ok());
    }
}
