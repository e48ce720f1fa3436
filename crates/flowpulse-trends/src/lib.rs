//! Google Trends adapter: fetch the interest-over-time series for a keyword
//! in a region and fold it into the adapter metrics contract.
//!
//! The trend index is bounded 0–100, so the counters are repurposed:
//! `views` = mean interest, `likes` = peak interest, `comments` = mean of the
//! last 7 points (momentum). A keyword with no series data is a skip signal,
//! not an error.

mod client;
mod error;
mod retry;
mod series;
mod types;

pub use client::TrendsClient;
pub use error::TrendsError;
pub use series::series_metrics;
pub use types::{ExploreResponse, MultilineResponse, Timeline, TimelinePoint, Widget};
