use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;

use crate::db::models::Role;
use crate::db::PostRepository;
use crate::error::AppError;
use crate::web::middleware::{require_role, CurrentUser};
use crate::web::state::AppState;
use crate::web::views;

#[derive(Debug, Deserialize)]
pub struct ComposeForm {
    pub title: String,
    pub content: String,
}

/// GET / — the authenticated feed.
pub async fn home(
    user: CurrentUser,
    State(state): State<AppState>,
) -> Result<Html<String>, AppError> {
    let posts = PostRepository::list(&state.db).await?;
    Ok(views::home_page(&user.username, &posts))
}

/// GET /compose
pub async fn compose_page(_user: CurrentUser) -> Html<String> {
    views::compose_page()
}

/// POST /compose
pub async fn compose(
    _user: CurrentUser,
    State(state): State<AppState>,
    Form(form): Form<ComposeForm>,
) -> Result<Response, AppError> {
    match PostRepository::create(&state.db, &form.title, &form.content).await {
        Ok(_) => Ok(Redirect::to("/").into_response()),
        Err(AppError::Validation(reason)) => {
            tracing::warn!(%reason, "compose rejected");
            Ok(Redirect::to("/compose").into_response())
        }
        Err(err) => Err(err),
    }
}

/// GET /posts/{id} — not gated, matching the site's longstanding behavior
/// of publicly readable post pages.
pub async fn post_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let post = PostRepository::get_by_id(&state.db, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(views::post_page(&post))
}

/// DELETE /posts/{id} — admin only.
pub async fn delete_post(
    user: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    require_role(&user, Role::Admin)?;

    // User-visibly idempotent either way; the distinction lives in logs.
    if !PostRepository::delete_by_id(&state.db, &id).await? {
        tracing::warn!(post_id = %id, "delete requested for a post that does not exist");
    }

    Ok(Redirect::to("/"))
}
