use core::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Spaces out request starts by a fixed minimum interval.
///
/// Call [`Throttler::pace`] immediately before each request. The first call returns at
/// once; each later call sleeps until `interval` has passed since the previous one
/// returned. Time already spent elsewhere (decoding, other work) counts toward the wait.
#[derive(Debug)]
pub struct Throttler {
    interval: Duration,
    last_start: Mutex<Option<Instant>>,
}

impl Throttler {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_start: Mutex::new(None),
        }
    }

    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Wait until the next request may start.
    pub async fn pace(&self) {
        let mut last_start = self.last_start.lock().await;

        if let Some(last) = *last_start {
            tokio::time::sleep_until(last + self.interval).await;
        }

        *last_start = Some(Instant::now());
    }
}
