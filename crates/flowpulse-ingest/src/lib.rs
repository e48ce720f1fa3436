//! Ingestion reconciler: applies adapter output to the canonical store,
//! one unit at a time, under the pacing discipline the upstream quotas
//! require.
//!
//! Every unit is an independent upsert keyed by (platform, `source_id`,
//! country) and commits on its own, so a run can be aborted between units
//! without corrupting state and re-run at any time — re-applying identical
//! adapter output is a no-op in effect.

use thiserror::Error;

mod pacing;
mod reconcile;
pub mod trends;
pub mod youtube;

pub use pacing::IngestPacing;
pub use reconcile::{apply_item, RatioPolicy, UpsertApplied};

/// Batch-fatal failures. Unit-level problems (throttling, empty payloads,
/// the handled natural-key conflict) never surface here — they are logged
/// and skipped inside the drivers. Trends fetch errors are all unit-level,
/// so no trends variant exists.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error(transparent)]
    Db(#[from] flowpulse_db::DbError),

    #[error(transparent)]
    Youtube(#[from] flowpulse_youtube::YoutubeError),
}

/// Totals for one ingestion batch. `skipped` counts units that yielded no
/// record (no data, hidden statistics, throttled fetch); skips are never
/// failures at the batch level.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IngestSummary {
    pub processed: u32,
    pub inserted: u32,
    pub updated: u32,
    pub skipped: u32,
}

impl IngestSummary {
    fn record(&mut self, applied: UpsertApplied) {
        match applied {
            UpsertApplied::Inserted => self.inserted = self.inserted.saturating_add(1),
            UpsertApplied::Updated => self.updated = self.updated.saturating_add(1),
        }
    }

    fn skip(&mut self) {
        self.skipped = self.skipped.saturating_add(1);
    }
}
