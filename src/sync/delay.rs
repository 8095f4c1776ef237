use rand::Rng;
use std::time::Duration;

use crate::config::DelayConfig;

/// Cosmetic pause before an opponent reply is shown, uniform in `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayPolicy {
    min_ms: u64,
    max_ms: u64,
}

impl DelayPolicy {
    pub fn new(min_ms: u64, max_ms: u64) -> Self {
        Self {
            min_ms: min_ms.min(max_ms),
            max_ms: min_ms.max(max_ms),
        }
    }

    pub fn fixed(ms: u64) -> Self {
        Self::new(ms, ms)
    }

    pub fn none() -> Self {
        Self::fixed(0)
    }

    pub fn sample(&self) -> Duration {
        if self.min_ms == self.max_ms {
            return Duration::from_millis(self.min_ms);
        }
        Duration::from_millis(rand::thread_rng().gen_range(self.min_ms..=self.max_ms))
    }
}

impl Default for DelayPolicy {
    fn default() -> Self {
        Self::new(400, 800)
    }
}

impl From<DelayConfig> for DelayPolicy {
    fn from(config: DelayConfig) -> Self {
        Self::new(config.min_ms, config.max_ms)
    }
}
