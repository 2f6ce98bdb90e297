// Memoized wrapper over SnapshotRepo. The dashboard variant refreshes
// widgets far more often than the data changes; identical calls within the
// TTL reuse the last (already collapsed) response.

use super::{JsonMap, SnapshotRepo};
use crate::cache::TtlCache;
use crate::models::CycleSnapshot;
use std::time::Duration;

pub struct CachedClient {
    repo: SnapshotRepo,
    summaries: TtlCache<JsonMap>,
    pages: TtlCache<Vec<CycleSnapshot>>,
}

impl CachedClient {
    pub fn new(repo: SnapshotRepo, ttl: Duration) -> Self {
        Self {
            repo,
            summaries: TtlCache::new(ttl),
            pages: TtlCache::new(ttl),
        }
    }

    pub async fn get_summary(&self, imei: Option<&str>) -> JsonMap {
        let args = imei.unwrap_or_default().to_string();
        if let Some(hit) = self.summaries.get("get_summary", &args) {
            return hit;
        }
        let summary = self.repo.get_summary(imei).await;
        self.summaries.insert("get_summary", args, summary.clone());
        summary
    }

    pub async fn get_snapshots(&self, imei: &str, limit: u32, offset: u64) -> Vec<CycleSnapshot> {
        let args = format!("{imei}:{limit}:{offset}");
        if let Some(hit) = self.pages.get("get_snapshots", &args) {
            return hit;
        }
        let snapshots = self.repo.get_snapshots(imei, limit, offset).await;
        self.pages.insert("get_snapshots", args, snapshots.clone());
        snapshots
    }

    /// The wrapped client, for the operations that bypass the cache.
    pub fn inner(&self) -> &SnapshotRepo {
        &self.repo
    }
}
