mod carousel;
mod config;
mod db;
mod routes;
mod schema;
mod services;
mod state;
mod storage;
mod views;

use std::sync::Arc;

use storage::{MemoryStore, PgStore, StorageClient};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = config::AppConfig::from_env().expect("invalid configuration");
    let port = config.port;

    let storage: Arc<dyn StorageClient> = match config.database_url.as_deref() {
        Some(url) => {
            let pool = db::init_pool(url, config.db_max_connections)
                .await
                .expect("database init failed");
            Arc::new(PgStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory storage");
            Arc::new(MemoryStore::new())
        }
    };

    let state = state::AppState::new(storage.clone(), config);

    // Populate the home carousel before serving; a failed fetch starts empty.
    state.home.preload(storage).await;

    let app = routes::app(state.clone());
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "studyhall listening");
    axum::serve(listener, app).await.expect("server failed");

    state.home.teardown();
}
