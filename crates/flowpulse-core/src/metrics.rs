use serde::{Deserialize, Serialize};

/// Raw popularity counters in a platform-defined unit.
///
/// For count-based adapters these are literal view/like/comment counts.
/// Index-based adapters repurpose them: `views` = mean interest, `likes` =
/// peak interest, `comments` = recent-window mean (momentum). The overload
/// is part of the adapter contract; consumers that need literal counts must
/// check the record's platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMetrics {
    pub views: i64,
    pub likes: i64,
    pub comments: i64,
}

/// One unit of adapter output: a platform-native identifier plus its raw
/// metrics, and optionally a fresher display name for the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterItem {
    pub source_id: String,
    pub name: Option<String>,
    pub metrics: RawMetrics,
}
