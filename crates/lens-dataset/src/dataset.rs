//! Dataset — immutable, region-indexed telemetry records.
//!
//! Source documents are JSON arrays of objects carrying `region`,
//! `latency_ms` and an uptime figure under either `uptime_percent` or the
//! older `uptime_pct` key. Normalization happens here, once; everything
//! downstream only sees [`TelemetryRecord`].

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use lens_core::{RegionSummary, TelemetryRecord};

use crate::error::{DatasetError, DatasetResult};

/// A record as it appears on disk, before normalization.
#[derive(Debug, Deserialize)]
struct RawRecord {
    region: Option<String>,
    latency_ms: Option<f64>,
    uptime_percent: Option<f64>,
    uptime_pct: Option<f64>,
}

impl RawRecord {
    fn normalize(self) -> Result<TelemetryRecord, &'static str> {
        let region = self.region.ok_or("missing region")?;
        if region.trim().is_empty() {
            return Err("blank region");
        }
        let latency_ms = self.latency_ms.ok_or("missing latency_ms")?;
        if !latency_ms.is_finite() || latency_ms < 0.0 {
            return Err("latency_ms must be a non-negative number");
        }
        let uptime_percent = self
            .uptime_percent
            .or(self.uptime_pct)
            .ok_or("missing uptime_percent")?;
        if !uptime_percent.is_finite() {
            return Err("uptime_percent must be a number");
        }
        Ok(TelemetryRecord {
            region,
            latency_ms,
            uptime_percent,
        })
    }
}

/// Records sharing a case-folded region key.
#[derive(Debug, Clone)]
struct RegionGroup {
    /// Spelling of the first record seen for this region.
    name: String,
    indices: Vec<usize>,
}

/// Read-only telemetry dataset.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<TelemetryRecord>,
    /// Case-folded region → records.
    index: BTreeMap<String, RegionGroup>,
}

impl Dataset {
    /// Build a dataset from already-normalized records.
    pub fn from_records(records: Vec<TelemetryRecord>) -> Self {
        let mut index: BTreeMap<String, RegionGroup> = BTreeMap::new();
        for (i, record) in records.iter().enumerate() {
            index
                .entry(region_key(&record.region))
                .or_insert_with(|| RegionGroup {
                    name: record.region.clone(),
                    indices: Vec::new(),
                })
                .indices
                .push(i);
        }
        Self { records, index }
    }

    /// Load a dataset from a JSON file.
    pub fn from_json_file(path: &Path) -> DatasetResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| DatasetError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let dataset = Self::from_json_slice(&bytes)?;
        debug!(?path, records = dataset.len(), regions = dataset.index.len(), "dataset loaded");
        Ok(dataset)
    }

    /// Parse a JSON document, dropping records that cannot be normalized.
    pub fn from_json_slice(bytes: &[u8]) -> DatasetResult<Self> {
        let doc: serde_json::Value =
            serde_json::from_slice(bytes).map_err(|e| DatasetError::Parse(e.to_string()))?;
        let serde_json::Value::Array(items) = doc else {
            return Err(DatasetError::NotAnArray);
        };

        let mut records = Vec::with_capacity(items.len());
        for (i, item) in items.into_iter().enumerate() {
            let normalized = serde_json::from_value::<RawRecord>(item)
                .map_err(|e| e.to_string())
                .and_then(|raw| raw.normalize().map_err(str::to_string));
            match normalized {
                Ok(record) => records.push(record),
                Err(reason) => warn!(index = i, %reason, "skipping telemetry record"),
            }
        }
        Ok(Self::from_records(records))
    }

    /// All records, in source order.
    pub fn records(&self) -> &[TelemetryRecord] {
        &self.records
    }

    /// Records whose region equals `region`, ignoring case.
    pub fn records_for<'a>(&'a self, region: &str) -> impl Iterator<Item = &'a TelemetryRecord> + 'a {
        self.index
            .get(&region_key(region))
            .map(|g| g.indices.as_slice())
            .unwrap_or_default()
            .iter()
            .map(move |&i| &self.records[i])
    }

    /// Distinct regions (first-seen spelling) with record counts, sorted by case-folded name.
    pub fn regions(&self) -> Vec<RegionSummary> {
        self.index
            .values()
            .map(|g| RegionSummary {
                region: g.name.clone(),
                records: g.indices.len(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn region_key(region: &str) -> String {
    region.to_lowercase()
}
