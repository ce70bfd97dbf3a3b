//! Fixed-period scheduling with at most one run in flight.

use std::future::Future;
use std::time::Duration;

use log::{debug, info};
use tokio::time::{interval, MissedTickBehavior};

/// When the report runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    Once,
    Every(Duration),
}

impl Schedule {
    pub fn from_interval(interval: Option<Duration>) -> Self {
        match interval {
            Some(period) if !period.is_zero() => Schedule::Every(period),
            _ => Schedule::Once,
        }
    }
}

/// Runs `job` immediately, then on every tick of `schedule` until `shutdown` resolves.
///
/// Each run is awaited before the next tick is considered, and ticks missed
/// while a run was in progress are skipped rather than replayed, so runs never
/// overlap. A run that is already in progress when `shutdown` resolves is
/// allowed to finish. Returns the number of completed runs.
pub async fn run_scheduled<F, Fut, S>(schedule: Schedule, shutdown: S, mut job: F) -> u64
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ()>,
    S: Future<Output = ()>,
{
    let period = match schedule {
        Schedule::Once => {
            job().await;
            return 1;
        }
        Schedule::Every(period) => period,
    };

    tokio::pin!(shutdown);
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut runs = 0u64;

    loop {
        tokio::select! {
            biased;
            _ = &mut shutdown => {
                info!("Shutdown requested; stopping after {} run(s)", runs);
                break;
            }
            _ = ticker.tick() => {}
        }
        debug!("starting scheduled run #{}", runs + 1);
        job().await;
        runs += 1;
    }
    runs
}
