use crate::config::Delay;
use rand::Rng;
use std::time::Duration;
use tracing::debug;

/// Randomized wait between consecutive withdrawals.
#[derive(Debug, Clone, Copy)]
pub struct Pacer {
    min_secs: u64,
    max_secs: u64,
}

impl Pacer {
    pub fn new(delay: Delay) -> Self {
        Self {
            min_secs: delay.min.min(delay.max),
            max_secs: delay.max.max(delay.min),
        }
    }

    /// Whole seconds, uniform over `[min, max]` inclusive.
    pub fn next_delay<R: Rng>(&self, rng: &mut R) -> Duration {
        Duration::from_secs(rng.gen_range(self.min_secs..=self.max_secs))
    }

    pub async fn pause<R: Rng>(&self, rng: &mut R) {
        let delay = self.next_delay(rng);
        debug!("Waiting {}s before the next request", delay.as_secs());
        tokio::time::sleep(delay).await;
    }
}
