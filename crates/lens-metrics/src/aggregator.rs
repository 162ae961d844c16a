//! Region metrics aggregator.
//!
//! Pure functions over an immutable [`Dataset`]: the same dataset and
//! request always produce the same output.

use tracing::debug;

use lens_core::{MetricsRequest, RegionMetrics};
use lens_dataset::Dataset;

/// Summarize every requested region, one entry per request item, in request order.
pub fn aggregate(dataset: &Dataset, request: &MetricsRequest) -> Vec<RegionMetrics> {
    let metrics: Vec<RegionMetrics> = request
        .regions
        .iter()
        .map(|region| summarize_region(dataset, region, request.threshold_ms))
        .collect();

    debug!(
        regions = metrics.len(),
        threshold_ms = request.threshold_ms,
        "region metrics aggregated"
    );
    metrics
}

/// Summarize one region. `region` is echoed back verbatim; matching ignores case.
///
/// A region without records yields [`RegionMetrics::empty`].
pub fn summarize_region(dataset: &Dataset, region: &str, threshold_ms: f64) -> RegionMetrics {
    let (latencies, uptimes): (Vec<f64>, Vec<f64>) = dataset
        .records_for(region)
        .map(|r| (r.latency_ms, r.uptime_percent))
        .unzip();

    if latencies.is_empty() {
        return RegionMetrics::empty(region);
    }

    let breaches = latencies.iter().filter(|&&l| l > threshold_ms).count() as u64;

    RegionMetrics {
        region: region.to_string(),
        avg_latency: round2(mean(&latencies)),
        p95_latency: round2(percentile(&latencies, 95.0)),
        avg_uptime: round2(mean(&uptimes)),
        breaches,
    }
}

/// Percentile `pct` (0–100) of `values` with linear interpolation between
/// the two nearest ranks. Returns 0.0 for an empty slice.
pub fn percentile(values: &[f64], pct: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(f64::total_cmp);

    let rank = (pct.clamp(0.0, 100.0) / 100.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;

    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Round to two decimal places, halves away from zero.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
