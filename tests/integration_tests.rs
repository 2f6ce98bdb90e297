// End-to-end flow against a full in-process service: config -> client ->
// pagination -> aggregation -> export

mod common;

use axum::Json;
use axum::Router;
use axum::extract::{Path, Query, State};
use axum::routing::get;
use cyclemetrics::aggregation;
use cyclemetrics::config::AppConfig;
use cyclemetrics::export::{ExportDocument, write_export};
use cyclemetrics::models::CycleSnapshot;
use cyclemetrics::snapshot_repo::{PagingEnd, SnapshotRepo};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;

const IMEI: &str = "865044073967657";

fn make_history(cycles: u64) -> Vec<CycleSnapshot> {
    (0..cycles)
        .map(|i| CycleSnapshot {
            cycle_number: Some(i),
            cycle_start_time: Some(format!("2024-03-{:02}T08:00:00Z", i % 28 + 1)),
            total_distance: 10.0,
            average_temperature: 25.0,
            min_soc: 40.0,
            max_soc: 90.0,
            voltage_min: 50.0,
            voltage_max: 58.0,
            ..CycleSnapshot::default()
        })
        .collect()
}

#[derive(Clone)]
struct ServiceState {
    history: Arc<Vec<CycleSnapshot>>,
}

async fn summary_handler(State(state): State<ServiceState>) -> Json<Value> {
    Json(json!({"devices": 1, "total_cycles": state.history.len()}))
}

async fn page_handler(
    State(state): State<ServiceState>,
    Query(params): Query<common::PageParams>,
) -> Json<Value> {
    let start = params.offset.min(state.history.len());
    let end = (start + params.limit).min(state.history.len());
    // The deployed service wraps pages in an envelope.
    Json(json!({"snapshots": state.history[start..end].to_vec()}))
}

async fn latest_handler(State(state): State<ServiceState>) -> Json<Value> {
    Json(serde_json::to_value(state.history.last()).unwrap())
}

async fn details_handler(
    Path((imei, cycle_number)): Path<(String, u64)>,
) -> Json<Value> {
    Json(json!({"imei": imei, "cycle_number": cycle_number, "charge_curve_points": 120}))
}

fn service(history: Vec<CycleSnapshot>) -> Router {
    let state = ServiceState {
        history: Arc::new(history),
    };
    Router::new()
        .route("/api/snapshots/summary", get(summary_handler))
        .route("/api/snapshots", get(page_handler))
        .route("/api/snapshots/{imei}/latest", get(latest_handler))
        .route(
            "/api/snapshots/{imei}/cycles/{cycle_number}",
            get(details_handler),
        )
        .with_state(state)
}

#[tokio::test]
async fn full_flow_from_config_to_export() {
    let base = common::serve(service(make_history(25))).await;
    let config = AppConfig::load_from_str(&format!(
        r#"
[api]
base_url = "{base}"
authorized_imeis = ["{IMEI}"]

[fetch]
batch_size = 10
max_pages = 100

[export]
dir = "."
"#
    ))
    .unwrap();

    let repo = SnapshotRepo::new(
        &config.api.base_url,
        Duration::from_secs(config.api.request_timeout_secs),
    )
    .unwrap();

    let summary = repo.get_summary(None).await;
    assert_eq!(summary["total_cycles"], json!(25));

    let latest = repo.get_latest_snapshot(IMEI).await.unwrap();
    assert_eq!(latest.cycle_number, Some(24));

    let recent = repo.get_snapshots(IMEI, 10, 0).await;
    assert_eq!(recent.len(), 10);

    let details = repo
        .get_cycle_details(IMEI, recent[0].cycle_number.unwrap())
        .await;
    assert_eq!(details["charge_curve_points"], json!(120));

    let history = repo
        .fetch_all_snapshots(IMEI, config.fetch.batch_size, config.fetch.max_pages)
        .await;
    assert_eq!(history.end, PagingEnd::Complete);
    assert_eq!(history.snapshots.len(), 25);

    let trend_summary = aggregation::summarize(&history.snapshots);
    assert_eq!(trend_summary.cycles, 25);
    assert_eq!(trend_summary.average_temperature, 25.0);
    assert_eq!(trend_summary.total_distance, 250.0);
    assert_eq!(aggregation::mean_voltage_range(&history.snapshots), 8.0);
    assert_eq!(aggregation::efficiency_series(&history.snapshots)[0], 0.2);

    let dir = tempfile::TempDir::new().unwrap();
    let document = ExportDocument {
        summary,
        latest_snapshot: Some(latest),
        recent_snapshots: recent,
    };
    let path = write_export(dir.path(), IMEI, &document).unwrap();
    let body: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(body["summary"]["total_cycles"], json!(25));
    assert_eq!(body["recent_snapshots"].as_array().unwrap().len(), 10);
}
