use sqlx::{Pool, Sqlite};
use uuid::Uuid;

use crate::auth::{hash_password, verify_password};
use crate::db::models::{Role, User};
use crate::error::AppError;

pub struct UserRepository;

impl UserRepository {
    /// Signup path: hash the password and persist a new user with the
    /// default `user` role. A taken username fails with `DuplicateUsername`
    /// and leaves the store unchanged.
    pub async fn register(
        pool: &Pool<Sqlite>,
        username: &str,
        password: &str,
    ) -> Result<User, AppError> {
        if username.is_empty() || password.is_empty() {
            return Err(AppError::Validation(
                "username and password are required".to_string(),
            ));
        }

        if Self::get_by_username(pool, username).await?.is_some() {
            return Err(AppError::DuplicateUsername);
        }

        let id = Uuid::new_v4().to_string();
        let created_at = chrono::Utc::now().timestamp();
        let password_hash = hash_password(password)?;

        let user = sqlx::query_as::<_, User>(
            r#"
INSERT INTO users (id, username, password_hash, role, created_at)
VALUES (?, ?, ?, ?, ?)
RETURNING *
            "#,
        )
        .bind(&id)
        .bind(username)
        .bind(&password_hash)
        .bind(Role::User)
        .bind(created_at)
        .fetch_one(pool)
        .await
        // Backstop for the race between the pre-check and the insert; the
        // UNIQUE column settles it.
        .map_err(|err| match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => AppError::DuplicateUsername,
            _ => AppError::Database(err),
        })?;

        Ok(user)
    }

    /// Login path. Unknown username and wrong password collapse into the
    /// same `AuthFailure` so the response leaks nothing about which it was.
    pub async fn verify(
        pool: &Pool<Sqlite>,
        username: &str,
        password: &str,
    ) -> Result<User, AppError> {
        let user = Self::get_by_username(pool, username)
            .await?
            .ok_or(AppError::AuthFailure)?;

        if !verify_password(&user.password_hash, password) {
            return Err(AppError::AuthFailure);
        }

        Ok(user)
    }

    pub async fn get_by_username(
        pool: &Pool<Sqlite>,
        username: &str,
    ) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(pool)
            .await?;

        Ok(user)
    }

    /// Role source of truth: callers re-fetch the user per request instead
    /// of trusting anything cached on the session.
    pub async fn get_by_id(pool: &Pool<Sqlite>, id: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(user)
    }
}
