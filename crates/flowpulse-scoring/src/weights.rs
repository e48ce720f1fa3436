/// Blend weights for the composite popularity score.
///
/// This is the one place the weighting lives; call sites never carry their
/// own constants. The defaults favor reach while still letting engagement
/// separate items of similar volume:
///
/// | term                    | weight |
/// |-------------------------|--------|
/// | normalized volume       | 0.5    |
/// | `like_to_view_ratio`    | 0.3    |
/// | `comment_to_view_ratio` | 0.2    |
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    pub volume: f64,
    pub like_ratio: f64,
    pub comment_ratio: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            volume: 0.5,
            like_ratio: 0.3,
            comment_ratio: 0.2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weights_sum_to_one() {
        let w = ScoreWeights::default();
        assert!((w.volume + w.like_ratio + w.comment_ratio - 1.0).abs() < 1e-9);
    }
}
