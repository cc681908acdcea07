//! Wall-clock time on top of the embassy time base.
//!
//! The clock has no battery-backed RTC and no network time yet, so it counts
//! up from a fixed start epoch taken at boot.

use defmt::info;
use desk_clock_core::{
    TimeSource,
    config,
};
use embassy_time::Instant;

pub struct WallClock {
    /// Epoch seconds at uptime `booted_ms`.
    epoch: u64,
    booted_ms: u64,
}

impl WallClock {
    pub fn starting_at(epoch_seconds: u64) -> Self {
        info!("Wall clock starts at epoch {}", epoch_seconds);
        Self {
            epoch: epoch_seconds,
            booted_ms: Instant::now().as_millis(),
        }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::starting_at(config::FALLBACK_EPOCH)
    }
}

impl TimeSource for WallClock {
    fn epoch_seconds(&self) -> u64 {
        let elapsed_ms = Instant::now().as_millis().saturating_sub(self.booted_ms);
        self.epoch + elapsed_ms / 1000
    }
}
