use sqlx::{Pool, Sqlite};
use uuid::Uuid;

use crate::db::models::Post;
use crate::error::AppError;

pub struct PostRepository;

impl PostRepository {
    /// Both fields are required as given; no trimming or normalization.
    pub async fn create(
        pool: &Pool<Sqlite>,
        title: &str,
        content: &str,
    ) -> Result<Post, AppError> {
        if title.is_empty() {
            return Err(AppError::Validation("title is required".to_string()));
        }
        if content.is_empty() {
            return Err(AppError::Validation("content is required".to_string()));
        }

        let id = Uuid::new_v4().to_string();
        let created_at = chrono::Utc::now().timestamp();

        let post = sqlx::query_as::<_, Post>(
            r#"
INSERT INTO posts (id, title, content, created_at)
VALUES (?, ?, ?, ?)
RETURNING *
            "#,
        )
        .bind(&id)
        .bind(title)
        .bind(content)
        .bind(created_at)
        .fetch_one(pool)
        .await?;

        Ok(post)
    }

    /// Feed order is insertion order.
    pub async fn list(pool: &Pool<Sqlite>) -> Result<Vec<Post>, AppError> {
        let posts = sqlx::query_as::<_, Post>(
            "SELECT id, title, content, created_at FROM posts ORDER BY rowid",
        )
        .fetch_all(pool)
        .await?;

        Ok(posts)
    }

    pub async fn get_by_id(pool: &Pool<Sqlite>, id: &str) -> Result<Option<Post>, AppError> {
        let post = sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(post)
    }

    /// Returns false when no row matched, so callers can tell a missing id
    /// from a successful delete.
    pub async fn delete_by_id(pool: &Pool<Sqlite>, id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    #[tokio::test]
    async fn empty_fields_are_rejected() {
        let pool = test_pool().await;

        let err = PostRepository::create(&pool, "", "x").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        let err = PostRepository::create(&pool, "x", "").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn create_then_get() {
        let pool = test_pool().await;

        let created = PostRepository::create(&pool, "T", "C").await.unwrap();
        let fetched = PostRepository::get_by_id(&pool, &created.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.title, "T");
        assert_eq!(fetched.content, "C");
    }

    #[tokio::test]
    async fn list_preserves_insertion_order() {
        let pool = test_pool().await;

        PostRepository::create(&pool, "first", "a").await.unwrap();
        PostRepository::create(&pool, "second", "b").await.unwrap();
        PostRepository::create(&pool, "third", "c").await.unwrap();

        let titles: Vec<String> = PostRepository::list(&pool)
            .await
            .unwrap()
            .into_iter()
            .map(|post| post.title)
            .collect();
        assert_eq!(titles, ["first", "second", "third"]);
    }

    #[tokio::test]
    async fn delete_reports_missing_ids() {
        let pool = test_pool().await;

        let post = PostRepository::create(&pool, "T", "C").await.unwrap();
        assert!(PostRepository::delete_by_id(&pool, &post.id).await.unwrap());
        assert!(PostRepository::get_by_id(&pool, &post.id)
            .await
            .unwrap()
            .is_none());

        // Same id again: reported distinctly, not an error.
        assert!(!PostRepository::delete_by_id(&pool, &post.id).await.unwrap());
    }
}
