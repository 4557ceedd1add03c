use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::SignedCookieJar;
use serde::Deserialize;

use crate::db::{SessionRepository, UserRepository};
use crate::error::AppError;
use crate::web::state::AppState;
use crate::web::{views, SESSION_COOKIE};

#[derive(Debug, Deserialize)]
pub struct CredentialsForm {
    pub username: String,
    pub password: String,
}

fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// GET /signup
pub async fn signup_page() -> Html<String> {
    views::signup_page()
}

/// POST /signup — register, then log the new user straight in.
///
/// Rejections land back on the form with no detail, so the response does
/// not reveal whether a username is taken.
pub async fn signup(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<CredentialsForm>,
) -> Result<Response, AppError> {
    let user = match UserRepository::register(&state.db, &form.username, &form.password).await {
        Ok(user) => user,
        Err(AppError::DuplicateUsername) | Err(AppError::Validation(_)) => {
            tracing::warn!("signup rejected");
            return Ok(Redirect::to("/signup").into_response());
        }
        Err(err) => return Err(err),
    };

    let session =
        SessionRepository::create(&state.db, &user.id, state.config.session_expiry_hours).await?;

    Ok((jar.add(session_cookie(session.token)), Redirect::to("/")).into_response())
}

/// GET /login
pub async fn login_page() -> Html<String> {
    views::login_page()
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<CredentialsForm>,
) -> Result<Response, AppError> {
    let user = match UserRepository::verify(&state.db, &form.username, &form.password).await {
        Ok(user) => user,
        Err(AppError::AuthFailure) => {
            tracing::warn!("failed login attempt");
            return Ok(Redirect::to("/login").into_response());
        }
        Err(err) => return Err(err),
    };

    let session =
        SessionRepository::create(&state.db, &user.id, state.config.session_expiry_hours).await?;

    Ok((jar.add(session_cookie(session.token)), Redirect::to("/")).into_response())
}

/// GET /logout — works for any caller; destroying an absent session is a
/// no-op. The follow-up redirect to / bounces unauthenticated callers on
/// to the login form.
pub async fn logout(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> Result<Response, AppError> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        SessionRepository::destroy(&state.db, cookie.value()).await?;
    }

    let jar = jar.remove(Cookie::build((SESSION_COOKIE, "")).path("/").build());
    Ok((jar, Redirect::to("/")).into_response())
}
