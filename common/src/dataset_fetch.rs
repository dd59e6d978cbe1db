//! Outcome of a bulk organization fetch.

use serde::{Deserialize, Serialize};

use crate::dataset::DatasetAndUsage;

/// Everything a bulk fetch managed to collect.
///
/// A failed batch does not discard the batches before it: `datasets` holds
/// every record received up to the failure and `batch_failure` describes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DatasetFetchOutcome {
    pub datasets: Vec<DatasetAndUsage>,
    pub requests_sent: u64,
    pub batch_failure: Option<String>,
}

impl DatasetFetchOutcome {
    pub fn failed(message: impl Into<String>) -> Self {
        Self { datasets: vec![], requests_sent: 0, batch_failure: Some(message.into()) }
    }

    pub fn is_complete(&self) -> bool {
        self.batch_failure.is_none()
    }
}
