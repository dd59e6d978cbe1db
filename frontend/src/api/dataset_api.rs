//! Client API calls for the organization dataset endpoints.

use common::{dataset::DatasetUsageCount, dataset_fetch::DatasetFetchOutcome};
use dioxus::prelude::*;

#[server]
pub async fn list_organization_datasets(organization_id: String) -> Result<DatasetFetchOutcome, ServerFnError> {
    let client = backend::client_utils::trieve_client::TrieveApiClient::from_env();
    Ok(backend::api::list_datasets::fetch_all_organization_datasets(&client, &organization_id).await)
}

#[server]
pub async fn delete_dataset(dataset_id: String) -> Result<(), ServerFnError> {
    use backend::api::dataset_actions::DatasetAdmin;
    let client = backend::client_utils::trieve_client::TrieveApiClient::from_env();
    let x = client.delete_dataset(&dataset_id).await;
    x.map_err(|e| ServerFnError::ServerError { message: e.to_string(), code: 500, details: None })
}

#[server]
pub async fn clear_dataset(dataset_id: String) -> Result<(), ServerFnError> {
    use backend::api::dataset_actions::DatasetAdmin;
    let client = backend::client_utils::trieve_client::TrieveApiClient::from_env();
    let x = client.clear_dataset(&dataset_id).await;
    x.map_err(|e| ServerFnError::ServerError { message: e.to_string(), code: 500, details: None })
}

#[server]
pub async fn get_dataset_usage(dataset_id: String) -> Result<DatasetUsageCount, ServerFnError> {
    use backend::api::dataset_actions::DatasetAdmin;
    let client = backend::client_utils::trieve_client::TrieveApiClient::from_env();
    let x = client.get_dataset_usage(&dataset_id).await;
    x.map_err(|e| ServerFnError::ServerError { message: e.to_string(), code: 500, details: None })
}
