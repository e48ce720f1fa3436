//! Folding an interest series into the adapter metrics contract.

use flowpulse_core::RawMetrics;

/// Number of trailing sample points that define the momentum window.
const MOMENTUM_WINDOW: usize = 7;

/// Folds an interest-over-time series into raw metrics.
///
/// Per-adapter mapping (the counters are repurposed, not literal counts):
///
/// | field      | meaning                                  |
/// |------------|------------------------------------------|
/// | `views`    | mean interest over the whole series      |
/// | `likes`    | peak interest                            |
/// | `comments` | mean of the last 7 points ("momentum")   |
///
/// Means are truncated toward zero. Returns `None` for an empty series —
/// the keyword has no data and must be skipped, not recorded.
#[must_use]
pub fn series_metrics(series: &[i64]) -> Option<RawMetrics> {
    if series.is_empty() {
        return None;
    }

    let momentum_start = series.len().saturating_sub(MOMENTUM_WINDOW);
    Some(RawMetrics {
        views: truncated_mean(series),
        likes: series.iter().copied().max().unwrap_or(0),
        comments: truncated_mean(&series[momentum_start..]),
    })
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn truncated_mean(values: &[i64]) -> i64 {
    let sum: i64 = values.iter().sum();
    (sum as f64 / values.len() as f64) as i64
}
