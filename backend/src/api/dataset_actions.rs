//! Per-dataset admin calls: delete, clear, usage.

use std::future::Future;

use common::dataset::DatasetUsageCount;
use reqwest::Method;

use crate::client_utils::trieve_client::TrieveApiClient;

pub trait DatasetAdmin {
    fn delete_dataset(&self, dataset_id: &str) -> impl Future<Output = anyhow::Result<()>> + Send;

    /// Drops every chunk, group and file of the dataset but keeps the dataset.
    fn clear_dataset(&self, dataset_id: &str) -> impl Future<Output = anyhow::Result<()>> + Send;

    fn get_dataset_usage(&self, dataset_id: &str) -> impl Future<Output = anyhow::Result<DatasetUsageCount>> + Send;
}

impl DatasetAdmin for TrieveApiClient {
    async fn delete_dataset(&self, dataset_id: &str) -> anyhow::Result<()> {
        let request = self.request(Method::DELETE, &["dataset", dataset_id])?.header("TR-Dataset", dataset_id);
        TrieveApiClient::send_empty(request).await
    }

    async fn clear_dataset(&self, dataset_id: &str) -> anyhow::Result<()> {
        let request = self.request(Method::PUT, &["dataset", "clear", dataset_id])?.header("TR-Dataset", dataset_id);
        TrieveApiClient::send_empty(request).await
    }

    async fn get_dataset_usage(&self, dataset_id: &str) -> anyhow::Result<DatasetUsageCount> {
        let request = self.request(Method::GET, &["dataset", "usage", dataset_id])?.header("TR-Dataset", dataset_id);
        TrieveApiClient::send_json(request).await
    }
}
