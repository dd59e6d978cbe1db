//! Bulk listing of every dataset in an organization.

use std::future::Future;

use common::dataset::DatasetAndUsage;
use common::dataset_const::FETCH_CHUNK_SIZE;
use common::dataset_fetch::DatasetFetchOutcome;
use reqwest::Method;
use tracing::{error, info};

use crate::client_utils::trieve_client::TrieveApiClient;

/// Anything that can serve one `limit`/`offset` window of an organization's datasets.
pub trait DatasetSource {
    fn fetch_dataset_batch(
        &self,
        organization_id: &str,
        limit: u64,
        offset: u64,
    ) -> impl Future<Output = anyhow::Result<Vec<DatasetAndUsage>>> + Send;
}

impl DatasetSource for TrieveApiClient {
    async fn fetch_dataset_batch(&self, organization_id: &str, limit: u64, offset: u64) -> anyhow::Result<Vec<DatasetAndUsage>> {
        let request = self
            .request(Method::GET, &["dataset", "organization", organization_id])?
            .query(&[("limit", limit), ("offset", offset)])
            .header("TR-Organization", organization_id);
        TrieveApiClient::send_json(request).await
    }
}

/// Fetches every dataset of `organization_id`, one `FETCH_CHUNK_SIZE` batch at a time.
///
/// Batches are requested sequentially with increasing offsets and kept in
/// server order. The loop ends on the first empty or short batch. A failing
/// batch also ends it: the outcome then holds every record received before
/// the failure, plus the failure message. Nothing is retried.
pub async fn fetch_all_organization_datasets<S: DatasetSource>(source: &S, organization_id: &str) -> DatasetFetchOutcome {
    let mut outcome = DatasetFetchOutcome::default();
    let mut batch_index = 0_u64;
    loop {
        let offset = batch_index * FETCH_CHUNK_SIZE;
        outcome.requests_sent += 1;
        let batch = match source.fetch_dataset_batch(organization_id, FETCH_CHUNK_SIZE, offset).await {
            Ok(batch) => batch,
            Err(e) => {
                error!("fetch_all_organization_datasets: batch at offset {} failed for {}: {:#}", offset, organization_id, e);
                outcome.batch_failure = Some(format!("{:#}", e));
                break;
            }
        };
        let batch_len = batch.len() as u64;
        outcome.datasets.extend(batch);
        if batch_len < FETCH_CHUNK_SIZE {
            break;
        }
        batch_index += 1;
    }
    info!(
        "Fetched {} datasets for organization {} in {} requests",
        outcome.datasets.len(),
        organization_id,
        outcome.requests_sent
    );
    outcome
}
