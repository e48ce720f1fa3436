//! Score normalizer: recomputes the cross-platform popularity score.
//!
//! Raw magnitudes differ by orders of magnitude between platforms (absolute
//! view counts vs a bounded 0–100 trend index), so volume is normalized
//! within its (platform, country) bucket before being blended with the
//! already scale-free engagement ratios. The pass is deterministic and safe
//! to re-run at any time; it is the only writer of `popularity_score`.

use thiserror::Error;

mod normalize;
mod recompute;
mod weights;

pub use normalize::{composite_score, normalized_volume, score_bucket, ScoreInput};
pub use recompute::{recompute_scores, ScoreScope};
pub use weights::ScoreWeights;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error(transparent)]
    Db(#[from] flowpulse_db::DbError),
}
