//! In-process stand-in for the upstream dataset API.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, put};
use axum::{Json, Router};
use backend::client_utils::trieve_client::{TrieveApiClient, TrieveApiConfig};
use common::dataset::{DatasetAndUsage, DatasetDTO, DatasetUsageCount};
use serde::Deserialize;
use serde_json::json;

pub fn dataset(organization_id: &str, index: usize) -> DatasetAndUsage {
    let id = format!("{organization_id}-{index:05}");
    DatasetAndUsage {
        dataset: DatasetDTO {
            id: id.clone(),
            name: format!("{organization_id} dataset {index}"),
            tracking_id: None,
            created_at: "2024-01-01T00:00:00".to_string(),
            updated_at: "2024-01-01T00:00:00".to_string(),
            organization_id: organization_id.to_string(),
        },
        dataset_usage: DatasetUsageCount { id: format!("usage-{id}"), dataset_id: id, chunk_count: index as i64 },
    }
}

pub fn datasets(organization_id: &str, count: usize) -> Vec<DatasetAndUsage> {
    (0..count).map(|i| dataset(organization_id, i)).collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeenListing {
    pub path_organization: String,
    pub header_organization: Option<String>,
    pub cookie: Option<String>,
    pub authorization: Option<String>,
    pub limit: u64,
    pub offset: u64,
}

#[derive(Default)]
pub struct MockUpstream {
    pub organizations: Mutex<HashMap<String, Vec<DatasetAndUsage>>>,
    /// 1-based number of the listing request that answers 500.
    pub fail_listing_request: Mutex<Option<u64>>,
    pub listing_requests: AtomicU64,
    pub seen_listings: Mutex<Vec<SeenListing>>,
    pub chunk_counts: Mutex<HashMap<String, i64>>,
    pub deleted: Mutex<Vec<String>>,
    pub cleared: Mutex<Vec<String>>,
}

impl MockUpstream {
    pub fn with_organization(organization_id: &str, count: usize) -> Arc<Self> {
        let upstream = Self::default();
        upstream.add_organization(organization_id, count);
        Arc::new(upstream)
    }

    pub fn add_organization(&self, organization_id: &str, count: usize) {
        self.organizations.lock().unwrap().insert(organization_id.to_string(), datasets(organization_id, count));
    }

    pub fn fail_on_listing_request(&self, request_number: u64) {
        *self.fail_listing_request.lock().unwrap() = Some(request_number);
    }

    pub fn listing_requests(&self) -> u64 {
        self.listing_requests.load(Ordering::SeqCst)
    }
}

#[derive(Deserialize)]
struct ListParams {
    limit: u64,
    offset: u64,
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_string)
}

async fn list_organization_datasets(
    State(upstream): State<Arc<MockUpstream>>,
    Path(organization_id): Path<String>,
    Query(params): Query<ListParams>,
    headers: HeaderMap,
) -> Response {
    let request_number = upstream.listing_requests.fetch_add(1, Ordering::SeqCst) + 1;
    upstream.seen_listings.lock().unwrap().push(SeenListing {
        path_organization: organization_id.clone(),
        header_organization: header(&headers, "tr-organization"),
        cookie: header(&headers, "cookie"),
        authorization: header(&headers, "authorization"),
        limit: params.limit,
        offset: params.offset,
    });
    if *upstream.fail_listing_request.lock().unwrap() == Some(request_number) {
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "message": "database unavailable" }))).into_response();
    }
    let organizations = upstream.organizations.lock().unwrap();
    let Some(all) = organizations.get(&organization_id) else {
        return (StatusCode::NOT_FOUND, Json(json!({ "message": "Organization not found" }))).into_response();
    };
    let batch = all
        .iter()
        .skip(params.offset as usize)
        .take(params.limit as usize)
        .cloned()
        .collect::<Vec<_>>();
    Json(batch).into_response()
}

async fn delete_dataset(State(upstream): State<Arc<MockUpstream>>, Path(dataset_id): Path<String>, headers: HeaderMap) -> Response {
    if header(&headers, "tr-dataset").as_deref() != Some(dataset_id.as_str()) {
        return (StatusCode::BAD_REQUEST, Json(json!({ "message": "TR-Dataset header missing" }))).into_response();
    }
    if dataset_id.ends_with("locked") {
        return (StatusCode::FORBIDDEN, Json(json!({ "message": "Dataset is locked" }))).into_response();
    }
    upstream.deleted.lock().unwrap().push(dataset_id);
    StatusCode::NO_CONTENT.into_response()
}

async fn clear_dataset(State(upstream): State<Arc<MockUpstream>>, Path(dataset_id): Path<String>) -> Response {
    upstream.cleared.lock().unwrap().push(dataset_id);
    StatusCode::NO_CONTENT.into_response()
}

async fn dataset_usage(State(upstream): State<Arc<MockUpstream>>, Path(dataset_id): Path<String>) -> Response {
    let chunk_counts = upstream.chunk_counts.lock().unwrap();
    match chunk_counts.get(&dataset_id) {
        Some(chunk_count) => Json(DatasetUsageCount {
            id: format!("usage-{dataset_id}"),
            dataset_id: dataset_id.clone(),
            chunk_count: *chunk_count,
        })
        .into_response(),
        None => (StatusCode::NOT_FOUND, "no usage").into_response(),
    }
}

/// Bind to port 0 and return the api host of the running mock.
pub async fn start_upstream(upstream: Arc<MockUpstream>) -> String {
    let app = Router::new()
        .route("/api/dataset/organization/{organization_id}", get(list_organization_datasets))
        .route("/api/dataset/{dataset_id}", delete(delete_dataset))
        .route("/api/dataset/clear/{dataset_id}", put(clear_dataset))
        .route("/api/dataset/usage/{dataset_id}", get(dataset_usage))
        .with_state(upstream);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/api")
}

pub async fn client_for(upstream: Arc<MockUpstream>) -> TrieveApiClient {
    let api_host = start_upstream(upstream).await;
    TrieveApiClient::new(TrieveApiConfig::new(api_host))
}
