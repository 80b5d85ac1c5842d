//! Repeating task scheduling with an explicit stop handle.
//!
//! Refresh work (weather polling) runs on a fixed interval; the caller does
//! any immediate first run itself, the scheduled runs start one period
//! later. An in-flight flag guards against overlapping cycles: a tick that
//! arrives while the previous cycle is still running is skipped and logged.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Handle to a repeating scheduled task.
///
/// Dropping the handle does not stop the task; call `stop()`.
#[derive(Debug)]
pub struct ScheduleHandle {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

impl ScheduleHandle {
    /// Request cancellation. The loop exits before the next tick; a cycle
    /// already in flight runs to completion.
    pub fn stop(&self) {
        self.token.cancel();
    }

    /// Wait for the scheduling loop to exit.
    pub async fn stopped(self) {
        self.stop();
        let _ = self.handle.await;
    }

    /// True once the loop has been asked to stop.
    pub fn is_stopped(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Spawn a repeating task: one run per `period`, starting one period from
/// now. Ticks that would overlap a still-running cycle are skipped.
pub fn spawn_repeating<F, Fut>(period: Duration, task: F) -> ScheduleHandle
where
    F: Fn() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let token = CancellationToken::new();
    let loop_token = token.clone();
    let in_flight = Arc::new(AtomicBool::new(false));

    let handle = tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first tick completes immediately; the caller already ran
        // its initial cycle, so consume it.
        interval.tick().await;

        loop {
            tokio::select! {
                _ = loop_token.cancelled() => {
                    tracing::debug!("Scheduler stopping");
                    break;
                }
                _ = interval.tick() => {
                    if in_flight.swap(true, Ordering::SeqCst) {
                        tracing::warn!("Previous refresh cycle still running, skipping tick");
                        continue;
                    }
                    let flag = in_flight.clone();
                    let cycle = task();
                    tokio::spawn(async move {
                        cycle.await;
                        flag.store(false, Ordering::SeqCst);
                    });
                }
            }
        }
    });

    ScheduleHandle { token, handle }
}
