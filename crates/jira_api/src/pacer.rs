//! Async request pacing shared by every clone of a client.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{sleep_until, Instant};

/// Hands out request slots at least `interval` apart.
///
/// Each caller reserves the next free slot under the lock and then sleeps
/// outside of it, so concurrent callers queue up without holding the mutex
/// while they wait.
#[derive(Clone, Debug)]
pub struct RequestPacer {
    interval: Duration,
    next_slot: Arc<Mutex<Option<Instant>>>,
}

impl RequestPacer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_slot: Arc::new(Mutex::new(None)),
        }
    }

    /// A pacer that never waits.
    pub fn unpaced() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Waits for this caller's slot.
    pub async fn wait_turn(&self) {
        if self.interval.is_zero() {
            return;
        }
        let slot = {
            let mut next = self.next_slot.lock().await;
            let now = Instant::now();
            let slot = match *next {
                Some(reserved) if reserved > now => reserved,
                _ => now,
            };
            *next = Some(slot + self.interval);
            slot
        };
        sleep_until(slot).await;
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}
