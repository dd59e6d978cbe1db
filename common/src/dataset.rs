//! Shared dataset models, as returned by the upstream organization endpoints.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetDTO {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub tracking_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub organization_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetUsageCount {
    pub id: String,
    pub dataset_id: String,
    pub chunk_count: i64,
}

/// One row of the organization dataset listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetAndUsage {
    pub dataset: DatasetDTO,
    pub dataset_usage: DatasetUsageCount,
}

impl DatasetAndUsage {
    pub fn id(&self) -> &str {
        &self.dataset.id
    }

    pub fn name(&self) -> &str {
        &self.dataset.name
    }

    pub fn chunk_count(&self) -> i64 {
        self.dataset_usage.chunk_count
    }
}

/// Result of re-reading the usage counters of a single dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetUsageChange {
    pub dataset_id: String,
    pub previous_chunk_count: i64,
    pub current_chunk_count: i64,
}

impl DatasetUsageChange {
    pub fn difference(&self) -> i64 {
        self.current_chunk_count - self.previous_chunk_count
    }

    /// Human readable description, e.g. "3 chunks have been added since last update."
    pub fn summary(&self) -> String {
        let difference = self.difference();
        let noun = if difference.abs() == 1 { "chunk has" } else { "chunks have" };
        let verb = match difference {
            d if d > 0 => "added",
            d if d < 0 => "removed",
            _ => "added or removed",
        };
        format!("{} {noun} been {verb} since last update.", difference.abs())
    }
}
