//! Report mode — one-shot aggregation printed to stdout.

use std::path::Path;

use lens_core::{MetricsRequest, MetricsResponse};
use lens_dataset::Dataset;

pub fn run(dataset: &Path, regions: Vec<String>, threshold_ms: f64) -> anyhow::Result<()> {
    let response = build_report(dataset, MetricsRequest { regions, threshold_ms })?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

fn build_report(path: &Path, request: MetricsRequest) -> anyhow::Result<MetricsResponse> {
    request.validate()?;
    let dataset = Dataset::from_json_file(path)?;
    Ok(MetricsResponse {
        metrics: lens_metrics::aggregate(&dataset, &request),
    })
}
