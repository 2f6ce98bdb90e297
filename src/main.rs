use anyhow::Result;
use cyclemetrics::*;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .init();

    let app_config = config::AppConfig::load()?;
    let repo = snapshot_repo::SnapshotRepo::new(
        &app_config.api.base_url,
        Duration::from_secs(app_config.api.request_timeout_secs),
    )?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        base_url = %app_config.api.base_url,
        "fetching summary"
    );
    let summary = repo.get_summary(None).await;
    println!("{}", serde_json::to_string_pretty(&summary)?);

    let selected_imei = app_config
        .api
        .authorized_imeis
        .first()
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("no authorized IMEIs configured"))?;
    tracing::info!(imei = %selected_imei, "selected device");

    let latest = repo.get_latest_snapshot(&selected_imei).await;
    if let Some(snapshot) = &latest {
        println!(
            "Latest cycle {}: {} -> {} ({})",
            snapshot
                .cycle_number
                .map_or_else(|| "N/A".to_string(), |n| n.to_string()),
            present::format_datetime(snapshot.cycle_start_time.as_deref()),
            present::format_datetime(snapshot.cycle_end_time.as_deref()),
            aggregation::charging_pattern(snapshot),
        );
        println!("{}", serde_json::to_string_pretty(snapshot)?);
    } else {
        println!("No latest snapshot available");
    }

    let recent = repo.get_snapshots(&selected_imei, 10, 0).await;
    tracing::info!(count = recent.len(), "retrieved recent snapshots");
    if let Some(first) = recent.first() {
        println!("{}", serde_json::to_string_pretty(first)?);
        if let Some(cycle_number) = first.cycle_number {
            let details = repo.get_cycle_details(&selected_imei, cycle_number).await;
            println!("{}", serde_json::to_string_pretty(&details)?);
        }
    }

    let history = repo
        .fetch_all_snapshots(
            &selected_imei,
            app_config.fetch.batch_size,
            app_config.fetch.max_pages,
        )
        .await;
    if history.end == snapshot_repo::PagingEnd::LimitReached {
        tracing::warn!(
            max_pages = app_config.fetch.max_pages,
            "history truncated at the page ceiling"
        );
    }
    tracing::info!(total = history.snapshots.len(), "full history fetched");

    let trend_summary = aggregation::summarize(&history.snapshots);
    println!(
        "Cycles: {}  Avg temp: {:.1} C  Total distance: {:.2} km  Avg voltage range: {:.2} V",
        trend_summary.cycles,
        trend_summary.average_temperature,
        trend_summary.total_distance,
        aggregation::mean_voltage_range(&history.snapshots),
    );

    let document = export::ExportDocument {
        summary,
        latest_snapshot: latest,
        recent_snapshots: recent,
    };
    let path = export::write_export(
        std::path::Path::new(&app_config.export.dir),
        &selected_imei,
        &document,
    )?;
    tracing::info!(path = %path.display(), "export written");

    Ok(())
}
