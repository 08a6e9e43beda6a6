use std::sync::Arc;

use anyhow::Context;
use common::storage::filesystem::FilesystemFileStore;
use school_server::config::AppConfig;
use school_server::database::init_db;
use school_server::state::AppState;
use tracing::{Level, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let db = init_db(&config.database)
        .await
        .context("Failed to initialize database")?;

    let avatar_store = FilesystemFileStore::new(
        config.storage.avatars_dir.clone(),
        config.storage.max_avatar_size,
    )
    .await
    .with_context(|| {
        format!(
            "Failed to open avatar directory {}",
            config.storage.avatars_dir.display()
        )
    })?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState {
        db,
        config,
        avatar_store: Arc::new(avatar_store),
    };
    let app = school_server::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server running at http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
