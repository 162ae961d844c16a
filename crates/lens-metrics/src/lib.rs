//! lens-metrics — region summaries for RegionLens.
//!
//! Reduces the telemetry records of each requested region to mean latency,
//! interpolated p95 latency, mean uptime and a threshold-breach count, and
//! renders dataset-wide summaries as Prometheus text.
//!
//! # Architecture
//!
//! ```text
//! aggregate(dataset, request)
//!   └── summarize_region() per requested region, in request order
//!         ├── mean() / percentile()
//!         └── round2()
//!
//! Prometheus exposition
//!   └── render_prometheus() → text/plain for GET /metrics
//! ```

pub mod aggregator;
pub mod prometheus;

pub use aggregator::{aggregate, percentile, summarize_region};
pub use prometheus::render_prometheus;
