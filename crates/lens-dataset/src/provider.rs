//! Read-only access to the loaded dataset.

use std::path::Path;
use std::sync::Arc;

use tracing::{error, info};

use crate::dataset::Dataset;
use crate::error::{DatasetError, DatasetResult};

/// Source of the telemetry dataset for request handlers.
///
/// Implementations must be cheap to call per request and must never
/// synthesize data: a dataset that failed to load stays failed.
pub trait TelemetryProvider: Send + Sync {
    fn dataset(&self) -> DatasetResult<Arc<Dataset>>;
}

/// Outcome of a one-time dataset load, shared for the life of the process.
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    outcome: Result<Arc<Dataset>, DatasetError>,
}

impl LoadedDataset {
    /// Load the dataset at `path`, remembering the failure if it cannot be read.
    pub fn load(path: &Path) -> Self {
        match Dataset::from_json_file(path) {
            Ok(dataset) => {
                info!(?path, records = dataset.len(), "telemetry dataset ready");
                Self::ready(dataset)
            }
            Err(e) => {
                error!(?path, error = %e, "telemetry dataset unavailable");
                Self::failed(e)
            }
        }
    }

    pub fn ready(dataset: Dataset) -> Self {
        Self {
            outcome: Ok(Arc::new(dataset)),
        }
    }

    pub fn failed(err: DatasetError) -> Self {
        Self { outcome: Err(err) }
    }

    pub fn is_ready(&self) -> bool {
        self.outcome.is_ok()
    }

    /// The load error, if the dataset is unavailable.
    pub fn error(&self) -> Option<&DatasetError> {
        self.outcome.as_ref().err()
    }
}

impl TelemetryProvider for LoadedDataset {
    fn dataset(&self) -> DatasetResult<Arc<Dataset>> {
        self.outcome.clone()
    }
}
