use std::sync::Arc;
use std::time::Duration;

use sqlx::sqlite::SqlitePoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use inkpost::{
    config::Config,
    db::SessionRepository,
    error::AppError,
    web::{create_router, AppState},
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,inkpost=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("🚀 Starting inkpost v{}...", env!("CARGO_PKG_VERSION"));

    // A missing DATABASE_URL or SESSION_SECRET is fatal here, before we
    // bind anything.
    let config = Arc::new(Config::from_env()?);
    tracing::info!("✅ Configuration loaded");

    let db = SqlitePoolOptions::new()
        .max_connections(config.db_max_connections)
        .min_connections(config.db_min_connections)
        .acquire_timeout(Duration::from_secs(30))
        .connect(&config.database_url)
        .await?;
    tracing::info!("✅ Database connected: {}", config.database_url);

    sqlx::migrate!("./migrations")
        .run(&db)
        .await
        .map_err(|e| AppError::Internal(format!("Migration failed: {}", e)))?;
    tracing::info!("✅ Database migrations completed");

    // Spawn background task for session cleanup
    {
        let db = db.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(3600)); // Every hour
            loop {
                interval.tick().await;
                match SessionRepository::cleanup_expired(&db).await {
                    Ok(purged) => tracing::debug!("🧹 {} expired sessions cleaned up", purged),
                    Err(e) => tracing::error!("❌ Session cleanup failed: {}", e),
                }
            }
        });
        tracing::info!("✅ Session cleanup task started (runs hourly)");
    }

    let state = AppState::new(db, config.clone());
    let app = create_router(state);

    let addr = config.server_address();
    tracing::info!("🌐 Server listening on http://{}", addr);
    tracing::info!("");
    tracing::info!("📚 Routes:");
    tracing::info!("  GET    /            - Feed (requires login)");
    tracing::info!("  GET+POST /signup    - Create an account");
    tracing::info!("  GET+POST /login     - Log in");
    tracing::info!("  GET    /logout      - Log out");
    tracing::info!("  GET+POST /compose   - Write a post (requires login)");
    tracing::info!("  GET    /posts/:id   - Read a post");
    tracing::info!("  DELETE /posts/:id   - Delete a post (admin only)");
    tracing::info!("");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to bind to {}: {}", addr, e)))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Internal(format!("Server error: {}", e)))?;

    Ok(())
}
