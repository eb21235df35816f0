//! Background scheduler
//!
//! Drives two independent jobs off the request path:
//!
//! - credential renewal (login once at startup, then refresh periodically)
//! - health probing (shorter interval, publishes a full snapshot each cycle)
//!
//! The jobs share nothing but the [`CredentialManager`] and the
//! [`StatusStore`], both of which swap whole values.

pub mod job;

pub use job::{JobState, PeriodicJob};

use crate::auth::{AuthOperation, CredentialManager};
use crate::config::ScheduleConfig;
use crate::health::{HealthProber, StatusStore};
use crate::metrics::SharedMetrics;
use crate::registry::EndpointRegistry;
use crate::shutdown::ShutdownController;
use crate::types::snapshot::Snapshot;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// Credential renewal job name
pub const CREDENTIAL_JOB: &str = "credential-renewal";

/// Probe job name
pub const PROBE_JOB: &str = "health-probe";

/// Owns the components the background jobs operate on.
#[derive(Clone)]
pub struct Scheduler {
    credentials: Arc<CredentialManager>,
    prober: HealthProber,
    registry: EndpointRegistry,
    store: StatusStore,
    metrics: SharedMetrics,
    config: ScheduleConfig,
}

impl Scheduler {
    /// Create a scheduler; nothing runs until [`Scheduler::start`]
    pub fn new(
        credentials: Arc<CredentialManager>,
        prober: HealthProber,
        registry: EndpointRegistry,
        store: StatusStore,
        metrics: SharedMetrics,
        config: ScheduleConfig,
    ) -> Self {
        Self {
            credentials,
            prober,
            registry,
            store,
            metrics,
            config,
        }
    }

    /// Start both jobs in the background.
    ///
    /// After the startup delay the credential job logs in once and a first
    /// probe cycle runs, then both jobs continue on their own intervals until
    /// shutdown is requested.
    pub fn start(self, shutdown: ShutdownController) -> JoinHandle<()> {
        let credential_job = PeriodicJob::new(CREDENTIAL_JOB, self.config.refresh_interval)
            .with_metrics(self.metrics.clone());
        let probe_job = PeriodicJob::new(PROBE_JOB, self.config.probe_interval)
            .with_metrics(self.metrics.clone());

        let credential_state = credential_job.state();
        let probe_state = probe_job.state();

        tokio::spawn(async move {
            if !shutdown.sleep(self.config.startup_delay).await {
                return;
            }

            credential_job.run_once(self.renew_credential()).await;
            probe_job
                .run_once(async {
                    self.run_probe_cycle().await;
                })
                .await;

            let renewal = {
                let this = self.clone();
                credential_job.spawn(shutdown.clone(), move || {
                    let this = this.clone();
                    async move { this.renew_credential().await }
                })
            };
            let probing = {
                let this = self.clone();
                probe_job.spawn(shutdown.clone(), move || {
                    let this = this.clone();
                    async move {
                        this.run_probe_cycle().await;
                    }
                })
            };

            let (renewal, probing) = tokio::join!(renewal, probing);
            if let Err(e) = renewal {
                error!(job = CREDENTIAL_JOB, "Job loop terminated: {}", e);
            }
            if let Err(e) = probing {
                error!(job = PROBE_JOB, "Job loop terminated: {}", e);
            }
            info!(
                renewals = credential_state.runs(),
                renewals_skipped = credential_state.skipped(),
                probe_cycles = probe_state.runs(),
                probe_cycles_skipped = probe_state.skipped(),
                "Scheduler stopped"
            );
        })
    }

    /// One credential renewal step. Failures are logged and counted, never
    /// propagated.
    pub async fn renew_credential(&self) {
        let (operation, result) = self.credentials.renew().await;
        self.metrics.record_auth(operation.as_str(), result.is_ok());

        match (operation, result) {
            (_, Ok(_)) => {}
            (AuthOperation::Login, Err(e)) => {
                error!(
                    job = CREDENTIAL_JOB,
                    error = %e,
                    "Authentication failed, health checks will run without a token"
                );
            }
            (AuthOperation::Refresh, Err(e)) => {
                warn!(
                    job = CREDENTIAL_JOB,
                    error = %e,
                    "Token refresh failed, keeping previous token"
                );
            }
        }
    }

    /// One probe cycle: probe every endpoint with the current token and
    /// publish the complete snapshot.
    pub async fn run_probe_cycle(&self) -> Arc<Snapshot> {
        let start = Instant::now();
        let credential = self.credentials.current().await;
        let snapshot = self
            .prober
            .probe_all(credential.as_ref(), &self.registry)
            .await;

        for (name, status) in snapshot.iter() {
            self.metrics.record_probe(name, status);
        }
        self.metrics.observe_cycle(start.elapsed().as_secs_f64());

        let snapshot = Arc::new(snapshot);
        self.store.replace(Arc::clone(&snapshot)).await;
        snapshot
    }

    /// Log in and run a single probe cycle without starting the timers.
    pub async fn run_once(&self) -> Arc<Snapshot> {
        self.renew_credential().await;
        self.run_probe_cycle().await
    }
}
