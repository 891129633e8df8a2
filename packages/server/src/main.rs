use std::net::SocketAddr;
use std::sync::Arc;

use tracing::Level;

use server::config::AppConfig;
use server::images::CloudinaryHost;
use server::state::AppState;
use server::store::MongoStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load()?;

    let store = MongoStore::connect(&config.database.url, &config.database.name).await?;
    let images = CloudinaryHost::new(config.image_host.clone());

    let state = AppState {
        store: Arc::new(store),
        images: Arc::new(images),
        config: config.clone(),
    };

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, server::build_router(state)).await?;

    Ok(())
}
