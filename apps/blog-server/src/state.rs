//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::PostHandler;
use blog_core::ports::{PostRepository, TokenService, ViewRenderer};
use blog_infra::database::{DatabaseConfig, InMemoryPostRepository};
use blog_infra::{HtmlRenderer, JwtTokenService};

#[cfg(feature = "postgres")]
use blog_infra::database::{DatabaseConnections, PostgresPostRepository};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostHandler,
    pub renderer: Arc<dyn ViewRenderer>,
    pub tokens: Arc<dyn TokenService>,
    /// Which store backs `posts`, reported by the health check.
    pub store: &'static str,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let (store, repo) = post_repository(config.database.as_ref()).await;

        tracing::info!(store, "Application state initialized");

        Self::with_parts(
            repo,
            Arc::new(HtmlRenderer::new(config.site_title.clone())),
            Arc::new(JwtTokenService::new(config.jwt.clone())),
            store,
        )
    }

    pub fn with_parts(
        repo: Arc<dyn PostRepository>,
        renderer: Arc<dyn ViewRenderer>,
        tokens: Arc<dyn TokenService>,
        store: &'static str,
    ) -> Self {
        Self {
            posts: PostHandler::new(repo),
            renderer,
            tokens,
            store,
        }
    }
}

#[cfg(feature = "postgres")]
async fn post_repository(
    db_config: Option<&DatabaseConfig>,
) -> (&'static str, Arc<dyn PostRepository>) {
    let Some(config) = db_config else {
        tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        return ("memory", Arc::new(InMemoryPostRepository::new()));
    };

    match DatabaseConnections::init(config).await {
        Ok(connections) => (
            "postgres",
            Arc::new(PostgresPostRepository::new(connections.main)),
        ),
        Err(e) => {
            tracing::error!(
                "Failed to connect to database: {}. Using in-memory fallback.",
                e
            );
            ("memory", Arc::new(InMemoryPostRepository::new()))
        }
    }
}

#[cfg(not(feature = "postgres"))]
async fn post_repository(
    _db_config: Option<&DatabaseConfig>,
) -> (&'static str, Arc<dyn PostRepository>) {
    tracing::info!("Running without postgres feature - using in-memory repository");
    ("memory", Arc::new(InMemoryPostRepository::new()))
}
