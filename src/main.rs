use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use vidrec_api::api::{create_router, AppState, RecSettings};
use vidrec_api::config::Config;
use vidrec_api::db::{self, Cache, PgRecommendationStore, PgVideoCatalog};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let pool = db::create_pool(&config.database_url).await?;
    sqlx::migrate!().run(&pool).await?;
    tracing::info!("Database pool ready, migrations applied");

    let cache = match &config.redis_url {
        Some(redis_url) => {
            let client = db::create_redis_client(redis_url)?;
            tracing::info!("Recommendation lookup cache enabled");
            Some(Cache::new(client))
        }
        None => {
            tracing::info!("REDIS_URL not set, lookups go straight to the store");
            None
        }
    };

    let state = AppState::new(
        Arc::new(PgVideoCatalog::new(pool.clone())),
        Arc::new(PgRecommendationStore::new(pool)),
        cache,
        RecSettings::from_config(&config),
    );

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    tracing::info!(host = %config.host, port = config.port, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
