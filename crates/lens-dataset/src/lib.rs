//! lens-dataset — the telemetry dataset behind RegionLens.
//!
//! Loads a JSON array of telemetry records once at startup, normalizes
//! field names (`uptime_pct` → `uptime_percent`), drops malformed records,
//! and indexes the rest by case-folded region.
//!
//! # Architecture
//!
//! The loaded [`Dataset`] is immutable. Handlers reach it through the
//! [`TelemetryProvider`] trait, so tests can inject synthetic datasets and
//! a failed load is reported per request instead of being masked.

pub mod dataset;
pub mod error;
pub mod provider;

pub use dataset::Dataset;
pub use error::{DatasetError, DatasetResult};
pub use provider::{LoadedDataset, TelemetryProvider};
