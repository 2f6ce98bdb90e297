// Shared test helpers: snapshot fixtures and an in-process stand-in for
// the snapshot service.

use axum::Router;
use axum::extract::{Query, State};
use axum::routing::get;
use axum::Json;
use cyclemetrics::models::CycleSnapshot;
use serde::Deserialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

pub fn snapshot(cycle_number: u64) -> CycleSnapshot {
    CycleSnapshot {
        cycle_number: Some(cycle_number),
        ..CycleSnapshot::default()
    }
}

/// Serve a router on an ephemeral localhost port; returns the base URL.
pub async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[derive(Deserialize)]
pub struct PageParams {
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
}

fn default_limit() -> usize {
    100
}

#[derive(Clone)]
struct PagedState {
    snapshots: Arc<Vec<CycleSnapshot>>,
    requests: Arc<AtomicUsize>,
}

async fn paged_handler(
    State(state): State<PagedState>,
    Query(params): Query<PageParams>,
) -> Json<Vec<CycleSnapshot>> {
    state.requests.fetch_add(1, Ordering::SeqCst);
    let start = params.offset.min(state.snapshots.len());
    let end = (start + params.limit).min(state.snapshots.len());
    Json(state.snapshots[start..end].to_vec())
}

/// A paged /api/snapshots endpoint over a fixed collection, plus a counter
/// of requests served.
pub fn paged_router(snapshots: Vec<CycleSnapshot>) -> (Router, Arc<AtomicUsize>) {
    let state = PagedState {
        snapshots: Arc::new(snapshots),
        requests: Arc::new(AtomicUsize::new(0)),
    };
    let requests = state.requests.clone();
    let app = Router::new()
        .route("/api/snapshots", get(paged_handler))
        .with_state(state);
    (app, requests)
}
