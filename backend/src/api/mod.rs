//! Dataset API calls and module exports.

pub mod list_datasets;
pub mod dataset_actions;
