use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::{info, warn};

use h2h_predictor::catalog::Catalog;
use h2h_predictor::config::{ServerConfig, load_dotenv};
use h2h_predictor::h2h::H2hAnalyzer;
use h2h_predictor::{logging, server};

#[tokio::main]
async fn main() -> Result<()> {
    load_dotenv();
    logging::init();

    let mut config = ServerConfig::from_env();
    let extra = config.apply_args(std::env::args().skip(1));
    for arg in extra {
        warn!("ignoring unknown argument {arg}");
    }

    if !config.data_dir.is_dir() {
        warn!(
            data_dir = %config.data_dir.display(),
            "data directory not found; league listings will be empty"
        );
    }

    let analyzer = H2hAnalyzer::new(Catalog::new(config.data_dir.clone()));
    let listener = TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("failed to bind {}:{}", config.host, config.port))?;
    let addr = listener.local_addr().context("listener has no local address")?;
    info!(%addr, data_dir = %config.data_dir.display(), "h2h predictor listening");

    server::serve(listener, analyzer, shutdown_signal())
        .await
        .context("http server failed")?;
    info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for ctrl-c: {err}");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
