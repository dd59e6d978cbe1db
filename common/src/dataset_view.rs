//! View model handed to whatever renders the dataset table.

use serde::{Deserialize, Serialize};

use crate::dataset::DatasetAndUsage;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DatasetView {
    /// Rows of the requested page, after filtering.
    pub items: Vec<DatasetAndUsage>,
    pub page: u64,
    /// `floor(total_count / page_size)`, computed on the unfiltered cache.
    pub max_page: u64,
    /// Size of the unfiltered cache.
    pub total_count: u64,
    pub has_loaded: bool,
    pub fetch_error: Option<String>,
}

impl DatasetView {
    pub fn can_go_to_previous_page(&self) -> bool {
        self.page > 0
    }

    pub fn can_go_to_next_page(&self) -> bool {
        self.page < self.max_page
    }
}
