//! Prometheus text exposition format.
//!
//! Renders a summary of every region in the dataset so a Prometheus server
//! can scrape the same figures the query endpoint returns.

use std::fmt::Write;

use lens_core::RegionMetrics;
use lens_dataset::Dataset;

use crate::aggregator::summarize_region;

/// Render per-region gauges for the whole dataset.
///
/// Breaches are counted against `threshold_ms`, which is also exported as
/// its own gauge.
pub fn render_prometheus(dataset: &Dataset, threshold_ms: f64) -> String {
    let regions = dataset.regions();
    let metrics: Vec<RegionMetrics> = regions
        .iter()
        .map(|r| summarize_region(dataset, &r.region, threshold_ms))
        .collect();

    let mut out = String::new();

    out.push_str("# HELP regionlens_records Telemetry records loaded per region.\n");
    out.push_str("# TYPE regionlens_records gauge\n");
    for r in &regions {
        let _ = writeln!(out, "regionlens_records{{region=\"{}\"}} {}", escape(&r.region), r.records);
    }

    gauge(&mut out, "regionlens_latency_avg_ms", "Mean latency in milliseconds.", &metrics, |m| {
        format!("{:.2}", m.avg_latency)
    });
    gauge(&mut out, "regionlens_latency_p95_ms", "P95 latency in milliseconds.", &metrics, |m| {
        format!("{:.2}", m.p95_latency)
    });
    gauge(&mut out, "regionlens_uptime_avg_percent", "Mean uptime percentage.", &metrics, |m| {
        format!("{:.2}", m.avg_uptime)
    });
    gauge(
        &mut out,
        "regionlens_breaches",
        "Records with latency above the breach threshold.",
        &metrics,
        |m| m.breaches.to_string(),
    );

    out.push_str("# HELP regionlens_breach_threshold_ms Breach threshold in milliseconds.\n");
    out.push_str("# TYPE regionlens_breach_threshold_ms gauge\n");
    let _ = writeln!(out, "regionlens_breach_threshold_ms {threshold_ms:.2}");

    out
}

fn gauge(
    out: &mut String,
    name: &str,
    help: &str,
    metrics: &[RegionMetrics],
    value: impl Fn(&RegionMetrics) -> String,
) {
    let _ = writeln!(out, "# HELP {name} {help}");
    let _ = writeln!(out, "# TYPE {name} gauge");
    for m in metrics {
        let _ = writeln!(out, "{name}{{region=\"{}\"}} {}", escape(&m.region), value(m));
    }
}

/// Escape a label value per the exposition format.
fn escape(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}
