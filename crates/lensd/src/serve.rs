//! Serve mode — loads config and dataset, then runs the HTTP API until ctrl-c.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Args;
use tracing::{error, info};

use lens_core::LensConfig;
use lens_dataset::LoadedDataset;

#[derive(Debug, Default, Args)]
pub struct ServeArgs {
    /// Path to lens.toml. Defaults apply when omitted.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Address to bind (overrides [server].host).
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides [server].port).
    #[arg(long)]
    pub port: Option<u16>,

    /// Telemetry dataset (overrides [dataset].path).
    #[arg(long)]
    pub dataset: Option<PathBuf>,

    /// Refuse to start when the dataset cannot be loaded.
    #[arg(long)]
    pub require_dataset: bool,
}

impl ServeArgs {
    /// Resolve the effective configuration: file (or defaults), then flags.
    pub fn resolve_config(&self) -> anyhow::Result<LensConfig> {
        let mut config = match &self.config {
            Some(path) => LensConfig::from_file(path)?,
            None => LensConfig::default(),
        };
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(dataset) = &self.dataset {
            config.dataset.path = dataset.clone();
        }
        Ok(config)
    }
}

pub async fn run(args: ServeArgs) -> anyhow::Result<()> {
    info!("RegionLens daemon starting");

    let config = args.resolve_config()?;

    // Loaded exactly once; handlers only read it.
    let provider = load_dataset(&config.dataset.path, args.require_dataset)?;

    let state = lens_api::ApiState::new(Arc::new(provider), config.metrics.default_threshold_ms);
    let router = lens_api::build_router(state, &config.cors);

    let listener =
        tokio::net::TcpListener::bind((config.server.host.as_str(), config.server.port)).await?;
    info!(addr = %listener.local_addr()?, "API server starting");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("RegionLens daemon stopped");
    Ok(())
}

/// Load the dataset, failing only when `require` is set.
///
/// Without `require` a failed load still yields a provider, so the API can
/// answer data requests with the load error.
fn load_dataset(path: &Path, require: bool) -> anyhow::Result<LoadedDataset> {
    let provider = LoadedDataset::load(path);
    if let Some(e) = provider.error() {
        if require {
            anyhow::bail!("telemetry dataset required: {e}");
        }
        error!("serving without a dataset; metrics requests will fail until restart");
    }
    Ok(provider)
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(e) => {
            error!(error = %e, "failed to install ctrl-c handler");
            std::future::pending::<()>().await;
        }
    }
}
