//! Pure normalization and blending, decoupled from the store so the
//! scoring contract can be tested without a database.

use crate::weights::ScoreWeights;

/// One record's scoring inputs within a comparison bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreInput {
    pub id: i64,
    pub views: i64,
    pub like_ratio: f64,
    pub comment_ratio: f64,
}

/// Volume normalized against the bucket maximum.
///
/// `views / max_views`, or 0 when the bucket max is 0 (a bucket where
/// nothing has any volume carries no volume signal). Scale-invariant:
/// multiplying every volume in a bucket by a constant leaves the result
/// unchanged. Monotone: more views never lowers it.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn normalized_volume(views: i64, max_views: i64) -> f64 {
    if max_views <= 0 {
        return 0.0;
    }
    views as f64 / max_views as f64
}

/// The weighted blend of normalized volume and engagement ratios.
#[must_use]
pub fn composite_score(
    norm_volume: f64,
    like_ratio: f64,
    comment_ratio: f64,
    weights: &ScoreWeights,
) -> f64 {
    weights.volume * norm_volume
        + weights.like_ratio * like_ratio
        + weights.comment_ratio * comment_ratio
}

/// Scores every record of one (platform, country) bucket.
///
/// Returns `(id, score)` pairs in input order.
#[must_use]
pub fn score_bucket(records: &[ScoreInput], weights: &ScoreWeights) -> Vec<(i64, f64)> {
    let max_views = records.iter().map(|r| r.views).max().unwrap_or(0);
    records
        .iter()
        .map(|r| {
            let norm = normalized_volume(r.views, max_views);
            (
                r.id,
                composite_score(norm, r.like_ratio, r.comment_ratio, weights),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(id: i64, views: i64, like_ratio: f64, comment_ratio: f64) -> ScoreInput {
        ScoreInput {
            id,
            views,
            like_ratio,
            comment_ratio,
        }
    }

    fn scores(records: &[ScoreInput]) -> Vec<f64> {
        score_bucket(records, &ScoreWeights::default())
            .into_iter()
            .map(|(_, score)| score)
            .collect()
    }

    #[test]
    fn bucket_max_normalizes_to_one() {
        assert!((normalized_volume(100, 100) - 1.0).abs() < f64::EPSILON);
        assert!((normalized_volume(50, 100) - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_volume_bucket_carries_no_volume_signal() {
        assert_eq!(normalized_volume(0, 0), 0.0);
    }

    #[test]
    fn higher_views_with_equal_ratios_score_at_least_as_high() {
        let scored = scores(&[input(1, 2000, 0.1, 0.01), input(2, 1000, 0.1, 0.01)]);
        assert!(
            scored[0] > scored[1],
            "strictly more volume at equal ratios must rank higher: {scored:?}"
        );
    }

    #[test]
    fn scores_are_scale_invariant_within_a_bucket() {
        let base = scores(&[input(1, 100, 0.1, 0.01), input(2, 40, 0.2, 0.02)]);
        let scaled = scores(&[input(1, 100_000, 0.1, 0.01), input(2, 40_000, 0.2, 0.02)]);
        for (a, b) in base.iter().zip(&scaled) {
            assert!((a - b).abs() < 1e-12, "scaling raw volume changed a score");
        }
    }

    #[test]
    fn single_record_bucket_gets_full_volume_credit() {
        let scored = score_bucket(&[input(7, 42, 0.0, 0.0)], &ScoreWeights::default());
        assert_eq!(scored.len(), 1);
        assert_eq!(scored[0].0, 7);
        assert!((scored[0].1 - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn ratios_separate_equal_volume_records() {
        let scored = scores(&[input(1, 100, 0.2, 0.02), input(2, 100, 0.1, 0.01)]);
        assert!(scored[0] > scored[1]);
    }

    #[test]
    fn recomputation_is_deterministic() {
        let records = [input(1, 300, 0.15, 0.03), input(2, 120, 0.02, 0.0)];
        assert_eq!(scores(&records), scores(&records));
    }

    #[test]
    fn empty_bucket_yields_no_scores() {
        assert!(score_bucket(&[], &ScoreWeights::default()).is_empty());
    }
}
