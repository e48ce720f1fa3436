//! Request pacing for rate-limited upstreams.

use std::time::Duration;

/// Sleep policy between units of ingestion work.
///
/// The inter-unit delay is sampled uniformly from a bounded range so
/// repeated runs never sync up with the upstream's quota window. The
/// throttle cooldown is a longer fixed pause taken after a detected
/// throttling signal, before moving on to the next unit.
#[derive(Debug, Clone, Copy)]
pub struct IngestPacing {
    unit_delay_ms_min: u64,
    unit_delay_ms_max: u64,
    throttle_cooldown_secs: u64,
}

impl IngestPacing {
    /// `unit_delay_ms_max` below the minimum is lifted to it.
    #[must_use]
    pub fn new(unit_delay_ms_min: u64, unit_delay_ms_max: u64, throttle_cooldown_secs: u64) -> Self {
        Self {
            unit_delay_ms_min,
            unit_delay_ms_max: unit_delay_ms_max.max(unit_delay_ms_min),
            throttle_cooldown_secs,
        }
    }

    #[must_use]
    pub fn from_app_config(config: &flowpulse_core::AppConfig) -> Self {
        Self::new(
            config.unit_delay_ms_min,
            config.unit_delay_ms_max,
            config.throttle_cooldown_secs,
        )
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn sample_unit_delay(&self) -> Duration {
        let span = self.unit_delay_ms_max - self.unit_delay_ms_min;
        let jitter = (span as f64 * rand::random::<f64>()) as u64;
        Duration::from_millis(self.unit_delay_ms_min + jitter)
    }

    /// Mandatory pause between two units of the same batch.
    pub async fn pause_between_units(&self) {
        let delay = self.sample_unit_delay();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    /// Longer fixed pause after an upstream throttling signal.
    pub async fn throttle_cooldown(&self) {
        if self.throttle_cooldown_secs > 0 {
            tracing::info!(
                cooldown_secs = self.throttle_cooldown_secs,
                "cooling down after upstream throttle"
            );
            tokio::time::sleep(Duration::from_secs(self.throttle_cooldown_secs)).await;
        }
    }
}
