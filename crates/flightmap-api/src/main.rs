use anyhow::{Context, Result};
use clap::Parser;
use flightmap_api::{router, AppState, Config};
use flightmap_core::RouteStore;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::parse();
    init_tracing(config.log_json);

    let (store, report) = RouteStore::load(&config.data_files(), &config.pipeline())
        .await
        .context("failed to load route data")?;
    info!(
        carriers = store.carriers().len(),
        stations = store.stations().len(),
        connections = store.connections().len(),
        rejected = report.error_count(),
        "route data loaded"
    );

    let app = router(AppState::new(store), config.request_timeout());

    let listener = TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}
