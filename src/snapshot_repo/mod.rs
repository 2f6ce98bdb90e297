// Snapshot service client over reqwest.
// Transport failures stop at this boundary: every collapsing accessor
// degrades to an empty result and reports via tracing; the try_* variants
// keep the failure tag for callers that must tell truncation from
// end-of-data.

mod cached;
mod paging;

pub use cached::CachedClient;
pub use paging::{FetchAllResult, PagingEnd};

use crate::models::CycleSnapshot;
use serde_json::{Map, Value};
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// JSON object payload for the schema-free endpoints (summary, cycle detail).
pub type JsonMap = Map<String, Value>;

#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection failure, timeout, or non-2xx status.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// Body was not valid JSON, or a record did not decode.
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
    /// Body decoded, but not into a shape this endpoint returns.
    #[error("unrecognized response shape")]
    Shape,
}

/// Result of one client call, before the empty-result collapse.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<T> {
    Fetched(T),
    Failed,
}

impl<T> FetchOutcome<T> {
    pub fn is_failed(&self) -> bool {
        matches!(self, FetchOutcome::Failed)
    }
}

impl<T: Default> FetchOutcome<T> {
    /// Collapse to the fetched value, or the empty default on failure.
    pub fn or_empty(self) -> T {
        match self {
            FetchOutcome::Fetched(v) => v,
            FetchOutcome::Failed => T::default(),
        }
    }
}

/// Client for the battery cycle snapshot API. Stateless across calls except
/// for HTTP connection reuse; one network round trip per call, no retry.
pub struct SnapshotRepo {
    base_url: String,
    client: reqwest::Client,
}

impl SnapshotRepo {
    /// Build a client for the given base URL (trailing '/' stripped).
    pub fn new(base_url: &str, request_timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Aggregate view across accessible devices, optionally filtered by IMEI.
    pub async fn get_summary(&self, imei: Option<&str>) -> JsonMap {
        self.try_get_summary(imei).await.or_empty()
    }

    pub async fn try_get_summary(&self, imei: Option<&str>) -> FetchOutcome<JsonMap> {
        let url = format!("{}/api/snapshots/summary", self.base_url);
        let mut query = Vec::new();
        if let Some(imei) = imei {
            query.push(("imei", imei.to_string()));
        }
        match self.get_json(&url, &query).await.and_then(expect_object) {
            Ok(map) => FetchOutcome::Fetched(map),
            Err(e) => {
                warn!(error = %e, operation = "get_summary", "snapshot API request failed");
                FetchOutcome::Failed
            }
        }
    }

    /// One page of cycle snapshots for a device, in service order.
    pub async fn get_snapshots(&self, imei: &str, limit: u32, offset: u64) -> Vec<CycleSnapshot> {
        self.try_get_snapshots(imei, limit, offset).await.or_empty()
    }

    pub async fn try_get_snapshots(
        &self,
        imei: &str,
        limit: u32,
        offset: u64,
    ) -> FetchOutcome<Vec<CycleSnapshot>> {
        let url = format!("{}/api/snapshots", self.base_url);
        let query = [
            ("imei", imei.to_string()),
            ("limit", limit.to_string()),
            ("offset", offset.to_string()),
        ];
        match self.get_json(&url, &query).await.and_then(normalize_page) {
            Ok(snapshots) => FetchOutcome::Fetched(snapshots),
            Err(e) => {
                warn!(error = %e, operation = "get_snapshots", imei, "snapshot API request failed");
                FetchOutcome::Failed
            }
        }
    }

    /// The most recent cycle snapshot for a device.
    pub async fn get_latest_snapshot(&self, imei: &str) -> Option<CycleSnapshot> {
        self.try_get_latest_snapshot(imei).await.or_empty()
    }

    pub async fn try_get_latest_snapshot(&self, imei: &str) -> FetchOutcome<Option<CycleSnapshot>> {
        let url = format!("{}/api/snapshots/{}/latest", self.base_url, imei);
        let result = self.get_json(&url, &[]).await.and_then(|body| match body {
            Value::Null => Ok(None),
            Value::Object(_) => Ok(Some(serde_json::from_value(body)?)),
            _ => Err(FetchError::Shape),
        });
        match result {
            Ok(snapshot) => FetchOutcome::Fetched(snapshot),
            Err(e) => {
                warn!(error = %e, operation = "get_latest_snapshot", imei, "snapshot API request failed");
                FetchOutcome::Failed
            }
        }
    }

    /// Extended analytics for one specific cycle number.
    pub async fn get_cycle_details(&self, imei: &str, cycle_number: u64) -> JsonMap {
        self.try_get_cycle_details(imei, cycle_number).await.or_empty()
    }

    pub async fn try_get_cycle_details(
        &self,
        imei: &str,
        cycle_number: u64,
    ) -> FetchOutcome<JsonMap> {
        let url = format!(
            "{}/api/snapshots/{}/cycles/{}",
            self.base_url, imei, cycle_number
        );
        match self.get_json(&url, &[]).await.and_then(expect_object) {
            Ok(map) => FetchOutcome::Fetched(map),
            Err(e) => {
                warn!(
                    error = %e,
                    operation = "get_cycle_details",
                    imei,
                    cycle_number,
                    "snapshot API request failed"
                );
                FetchOutcome::Failed
            }
        }
    }

    async fn get_json(&self, url: &str, query: &[(&str, String)]) -> Result<Value, FetchError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await?
            .error_for_status()?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

fn expect_object(body: Value) -> Result<JsonMap, FetchError> {
    match body {
        Value::Object(map) => Ok(map),
        _ => Err(FetchError::Shape),
    }
}

/// Accept the page shapes the service emits: a bare array, or an object
/// carrying the array under "snapshots" or (fallback) "data". An object
/// with neither key reads as an empty page.
fn normalize_page(body: Value) -> Result<Vec<CycleSnapshot>, FetchError> {
    let items = match body {
        Value::Array(items) => items,
        Value::Object(mut map) => {
            match map.remove("snapshots").or_else(|| map.remove("data")) {
                Some(Value::Array(items)) => items,
                Some(_) => return Err(FetchError::Shape),
                None => Vec::new(),
            }
        }
        _ => return Err(FetchError::Shape),
    };
    items
        .into_iter()
        .map(|item| serde_json::from_value(item).map_err(FetchError::from))
        .collect()
}
