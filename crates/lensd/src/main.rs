//! lensd — the RegionLens daemon.
//!
//! Single binary that loads the telemetry dataset once and serves
//! per-region latency/uptime summaries over HTTP.
//!
//! # Usage
//!
//! ```text
//! lensd serve --config lens.toml --port 8000
//! lensd report --dataset q-vercel-latency.json --region apac --region emea --threshold-ms 180
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod report;
mod serve;

#[derive(Parser)]
#[command(name = "lensd", about = "RegionLens telemetry metrics daemon", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the metrics API.
    Serve(serve::ServeArgs),

    /// Summarize regions from a dataset file and print the JSON response.
    Report {
        /// Telemetry dataset (JSON array of records).
        #[arg(long)]
        dataset: PathBuf,

        /// Region to summarize. Repeat for several regions; output keeps this order.
        #[arg(long = "region", required = true)]
        regions: Vec<String>,

        /// Latencies strictly above this count as breaches.
        #[arg(long, default_value = "180")]
        threshold_ms: f64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(
                    "info,lensd=debug,lens_api=debug,lens_dataset=debug,lens_metrics=debug",
                )
            }),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve(args) => serve::run(args).await,
        Command::Report {
            dataset,
            regions,
            threshold_ms,
        } => report::run(&dataset, regions, threshold_ms),
    }
}
