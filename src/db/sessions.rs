use sqlx::{Pool, Sqlite};
use uuid::Uuid;

use crate::db::models::Session;
use crate::error::AppError;

pub struct SessionRepository;

impl SessionRepository {
    /// Bind a fresh unguessable token to the user and persist it.
    pub async fn create(
        pool: &Pool<Sqlite>,
        user_id: &str,
        ttl_hours: i64,
    ) -> Result<Session, AppError> {
        let token = Uuid::new_v4().to_string();
        let created_at = chrono::Utc::now().timestamp();
        let expires_at = created_at + ttl_hours * 3600;

        let session = sqlx::query_as::<_, Session>(
            r#"
INSERT INTO sessions (token, user_id, expires_at, created_at)
VALUES (?, ?, ?, ?)
RETURNING *
            "#,
        )
        .bind(&token)
        .bind(user_id)
        .bind(expires_at)
        .bind(created_at)
        .fetch_one(pool)
        .await?;

        Ok(session)
    }

    /// Absent and expired sessions both resolve to None; "no session" is a
    /// normal state, not an error.
    pub async fn resolve(pool: &Pool<Sqlite>, token: &str) -> Result<Option<Session>, AppError> {
        let now = chrono::Utc::now().timestamp();

        let session = sqlx::query_as::<_, Session>(
            "SELECT * FROM sessions WHERE token = ? AND expires_at > ?",
        )
        .bind(token)
        .bind(now)
        .fetch_optional(pool)
        .await?;

        Ok(session)
    }

    /// Idempotent: destroying an absent or already-destroyed session is a
    /// no-op, not a failure.
    pub async fn destroy(pool: &Pool<Sqlite>, token: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM sessions WHERE token = ?")
            .bind(token)
            .execute(pool)
            .await?;

        Ok(())
    }

    /// Purge expired rows. `resolve` filters on expiry anyway, so this only
    /// keeps the table from growing.
    pub async fn cleanup_expired(pool: &Pool<Sqlite>) -> Result<u64, AppError> {
        let now = chrono::Utc::now().timestamp();

        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
            .bind(now)
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{test_pool, UserRepository};

    #[tokio::test]
    async fn create_then_resolve() {
        let pool = test_pool().await;
        let user = UserRepository::register(&pool, "alice", "pw1").await.unwrap();

        let session = SessionRepository::create(&pool, &user.id, 24).await.unwrap();
        let resolved = SessionRepository::resolve(&pool, &session.token)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(resolved.user_id, user.id);
    }

    #[tokio::test]
    async fn destroy_is_idempotent() {
        let pool = test_pool().await;
        let user = UserRepository::register(&pool, "alice", "pw1").await.unwrap();
        let session = SessionRepository::create(&pool, &user.id, 24).await.unwrap();

        SessionRepository::destroy(&pool, &session.token).await.unwrap();
        assert!(SessionRepository::resolve(&pool, &session.token)
            .await
            .unwrap()
            .is_none());

        // Second destroy, and destroy of a token that never existed.
        SessionRepository::destroy(&pool, &session.token).await.unwrap();
        SessionRepository::destroy(&pool, "no-such-token").await.unwrap();
    }

    #[tokio::test]
    async fn expired_session_does_not_resolve() {
        let pool = test_pool().await;
        let user = UserRepository::register(&pool, "alice", "pw1").await.unwrap();

        // Zero TTL expires immediately.
        let session = SessionRepository::create(&pool, &user.id, 0).await.unwrap();
        assert!(SessionRepository::resolve(&pool, &session.token)
            .await
            .unwrap()
            .is_none());

        let purged = SessionRepository::cleanup_expired(&pool).await.unwrap();
        assert_eq!(purged, 1);
    }
}
