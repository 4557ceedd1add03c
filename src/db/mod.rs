pub mod models;
pub mod posts;
pub mod sessions;
pub mod users;

pub use models::{Post, Role, Session, User};
pub use posts::PostRepository;
pub use sessions::SessionRepository;
pub use users::UserRepository;

/// In-memory database for repository tests. One connection, pinned open:
/// every new `sqlite::memory:` connection is a fresh empty database.
#[cfg(test)]
pub(crate) async fn test_pool() -> sqlx::Pool<sqlx::Sqlite> {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    sqlx::migrate!("./migrations").run(&pool).await.unwrap();
    pool
}
