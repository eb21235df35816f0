//! Non-overlapping periodic job
//!
//! Each job moves `Idle -> Running -> Idle`. A tick that fires while the
//! previous run is still in progress is skipped, never run alongside it.

use crate::metrics::SharedMetrics;
use crate::shutdown::ShutdownController;
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

/// Run state shared between the timer loop and in-flight runs
#[derive(Debug, Default)]
pub struct JobState {
    running: AtomicBool,
    runs: AtomicU64,
    skipped: AtomicU64,
}

impl JobState {
    /// Claim the job. `None` while another run holds it.
    pub fn try_begin(self: &Arc<Self>) -> Option<RunGuard> {
        self.running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| {
                self.runs.fetch_add(1, Ordering::Relaxed);
                RunGuard {
                    state: Arc::clone(self),
                }
            })
    }

    /// Number of runs started
    pub fn runs(&self) -> u64 {
        self.runs.load(Ordering::Relaxed)
    }

    /// Number of ticks skipped because a run was in progress
    pub fn skipped(&self) -> u64 {
        self.skipped.load(Ordering::Relaxed)
    }
}

/// Returns the job to `Idle` when dropped
#[derive(Debug)]
pub struct RunGuard {
    state: Arc<JobState>,
}

impl Drop for RunGuard {
    fn drop(&mut self) {
        self.state.running.store(false, Ordering::Release);
    }
}

/// A named job driven by a fixed-interval timer
pub struct PeriodicJob {
    name: &'static str,
    interval: Duration,
    state: Arc<JobState>,
    metrics: Option<SharedMetrics>,
}

impl PeriodicJob {
    /// Create an idle job
    pub fn new(name: &'static str, interval: Duration) -> Self {
        Self {
            name,
            interval,
            state: Arc::new(JobState::default()),
            metrics: None,
        }
    }

    /// Count skipped ticks in the given metrics registry
    pub fn with_metrics(mut self, metrics: SharedMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Shared run state
    pub fn state(&self) -> Arc<JobState> {
        Arc::clone(&self.state)
    }

    /// Run once in the current task.
    ///
    /// Returns `false` if the job was already running and nothing was done.
    pub async fn run_once<Fut>(&self, run: Fut) -> bool
    where
        Fut: Future<Output = ()>,
    {
        let Some(_guard) = self.state.try_begin() else {
            self.record_skip();
            return false;
        };
        run.await;
        true
    }

    /// Start the timer loop.
    ///
    /// The first tick fires one full interval from now; callers run the
    /// startup pass themselves with [`PeriodicJob::run_once`]. Each run is
    /// spawned so a slow run never delays the timer, and the guard keeps runs
    /// from overlapping.
    pub fn spawn<F, Fut>(self, shutdown: ShutdownController, run: F) -> JoinHandle<()>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        tokio::spawn(async move {
            let mut timer = interval_at(Instant::now() + self.interval, self.interval);
            timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

            info!(
                job = self.name,
                interval_secs = self.interval.as_secs(),
                "Periodic job started"
            );

            loop {
                tokio::select! {
                    _ = timer.tick() => {}
                    _ = shutdown.wait() => {
                        info!(job = self.name, "Periodic job stopped");
                        break;
                    }
                }

                match self.state.try_begin() {
                    Some(guard) => {
                        let fut = run();
                        tokio::spawn(async move {
                            let _guard = guard;
                            fut.await;
                        });
                    }
                    None => self.record_skip(),
                }
            }
        })
    }

    fn record_skip(&self) {
        self.state.skipped.fetch_add(1, Ordering::Relaxed);
        debug!(job = self.name, "Previous run still in progress, skipping tick");
        if let Some(metrics) = &self.metrics {
            metrics.record_skipped_tick(self.name);
        }
    }
}
