// Sequential pagination over the paged snapshot endpoint.
// A short batch is the end-of-data signal; the page ceiling guards against
// a service that never sends one.

use super::SnapshotRepo;
use crate::models::CycleSnapshot;
use tracing::{debug, warn};

/// How a full-history fetch ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagingEnd {
    /// The service returned a short or empty batch.
    Complete,
    /// The page ceiling was hit first; `snapshots` is a prefix of the history.
    LimitReached,
}

/// Accumulated history plus how the pagination ended.
#[derive(Debug, Clone)]
pub struct FetchAllResult {
    pub snapshots: Vec<CycleSnapshot>,
    pub end: PagingEnd,
}

impl SnapshotRepo {
    /// Page through the complete snapshot history of one device. Batches
    /// are concatenated in fetch order. An upstream failure reads as an
    /// empty batch and therefore ends the fetch with what was accumulated.
    pub async fn fetch_all_snapshots(
        &self,
        imei: &str,
        batch_size: u32,
        max_pages: u32,
    ) -> FetchAllResult {
        let mut snapshots: Vec<CycleSnapshot> = Vec::new();
        let mut offset: u64 = 0;

        for _ in 0..max_pages {
            let batch = self.get_snapshots(imei, batch_size, offset).await;
            if batch.is_empty() {
                return FetchAllResult {
                    snapshots,
                    end: PagingEnd::Complete,
                };
            }

            let batch_len = batch.len();
            snapshots.extend(batch);
            debug!(imei, fetched = snapshots.len(), "fetched snapshot batch");

            if (batch_len as u64) < u64::from(batch_size) {
                return FetchAllResult {
                    snapshots,
                    end: PagingEnd::Complete,
                };
            }
            offset += u64::from(batch_size);
        }

        warn!(
            imei,
            max_pages,
            fetched = snapshots.len(),
            "pagination ceiling reached before a short batch"
        );
        FetchAllResult {
            snapshots,
            end: PagingEnd::LimitReached,
        }
    }
}
