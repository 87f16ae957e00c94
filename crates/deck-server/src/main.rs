//! Presentation host binary.

use deck_server::{build_router, AppState, ServerConfig};
use deck_tables::DataSource;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "deck_server=info,deck_core=info,deck_tables=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;
    tracing::info!(addr = %config.addr, data = %config.data_location, "starting presentation host");

    let state = AppState::new(config.deck.clone())?;
    let source = DataSource::from_location(&config.data_location)?;
    let listener = tokio::net::TcpListener::bind(config.addr).await?;

    // Tables stay empty until their own load settles.
    state.spawn_load(source);
    state.spawn_driver();
    tracing::info!("presentation running on http://{}", config.addr);
    axum::serve(listener, build_router(state, &config)).await?;

    Ok(())
}
