//! Shared types used across RegionLens crates.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single latency/uptime observation for one region.
///
/// Records are produced by the dataset loader and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryRecord {
    pub region: String,
    pub latency_ms: f64,
    pub uptime_percent: f64,
}

impl TelemetryRecord {
    pub fn new(region: impl Into<String>, latency_ms: f64, uptime_percent: f64) -> Self {
        Self {
            region: region.into(),
            latency_ms,
            uptime_percent,
        }
    }
}

/// Body of a metrics query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsRequest {
    /// Regions to summarize, matched case-insensitively. Output order follows this list.
    pub regions: Vec<String>,
    /// Latencies strictly above this value count as breaches.
    pub threshold_ms: f64,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequestError {
    #[error("regions must not be empty")]
    NoRegions,
    #[error("region at index {0} is blank")]
    BlankRegion(usize),
    #[error("threshold_ms must be a finite number, got {0}")]
    InvalidThreshold(f64),
}

impl MetricsRequest {
    pub fn new<I, S>(regions: I, threshold_ms: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            regions: regions.into_iter().map(Into::into).collect(),
            threshold_ms,
        }
    }

    /// Reject requests the aggregator is not meant to see.
    pub fn validate(&self) -> Result<(), RequestError> {
        if self.regions.is_empty() {
            return Err(RequestError::NoRegions);
        }
        if let Some(idx) = self.regions.iter().position(|r| r.trim().is_empty()) {
            return Err(RequestError::BlankRegion(idx));
        }
        if !self.threshold_ms.is_finite() {
            return Err(RequestError::InvalidThreshold(self.threshold_ms));
        }
        Ok(())
    }
}

/// Summary statistics for one requested region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionMetrics {
    /// The region exactly as it appeared in the request.
    pub region: String,
    pub avg_latency: f64,
    pub p95_latency: f64,
    pub avg_uptime: f64,
    pub breaches: u64,
}

impl RegionMetrics {
    /// Entry for a region with no matching records.
    pub fn empty(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            avg_latency: 0.0,
            p95_latency: 0.0,
            avg_uptime: 0.0,
            breaches: 0,
        }
    }
}

/// Response of the metrics endpoint: one entry per requested region, in request order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsResponse {
    pub metrics: Vec<RegionMetrics>,
}

/// A region present in the loaded dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionSummary {
    pub region: String,
    pub records: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_accepts_well_formed_request() {
        let req = MetricsRequest::new(["emea", "apac"], 180.0);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_regions() {
        let req = MetricsRequest::new(Vec::<String>::new(), 180.0);
        assert_eq!(req.validate(), Err(RequestError::NoRegions));
    }

    #[test]
    fn validate_rejects_blank_region() {
        let req = MetricsRequest::new(["emea", "  "], 180.0);
        assert_eq!(req.validate(), Err(RequestError::BlankRegion(1)));
    }

    #[test]
    fn validate_rejects_non_finite_threshold() {
        let req = MetricsRequest::new(["emea"], f64::INFINITY);
        assert!(matches!(req.validate(), Err(RequestError::InvalidThreshold(_))));
    }

    #[test]
    fn request_deserializes_integer_threshold() {
        let req: MetricsRequest =
            serde_json::from_str(r#"{"regions":["amer"],"threshold_ms":180}"#).unwrap();
        assert_eq!(req.threshold_ms, 180.0);
        assert_eq!(req.regions, vec!["amer".to_string()]);
    }

    #[test]
    fn empty_metrics_are_zero() {
        let m = RegionMetrics::empty("LATAM");
        assert_eq!(m.region, "LATAM");
        assert_eq!(m.avg_latency, 0.0);
        assert_eq!(m.p95_latency, 0.0);
        assert_eq!(m.avg_uptime, 0.0);
        assert_eq!(m.breaches, 0);
    }
}
