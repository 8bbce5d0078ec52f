use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info};

use crate::{
    error::{AppError, Result},
    models::{RegistrationToken, Runner},
    services::github::GitHubRunnerService,
};

/// Timings for the registration wait. `Default` carries the production
/// values; tests inject shorter ones.
#[derive(Debug, Clone, Copy)]
pub struct WaitSettings {
    /// Boot window before the first status check; no polling happens here.
    pub quiet_period: Duration,
    pub poll_interval: Duration,
    pub timeout: Duration,
}

impl Default for WaitSettings {
    fn default() -> Self {
        Self {
            quiet_period: Duration::from_secs(30),
            poll_interval: Duration::from_secs(10),
            timeout: Duration::from_secs(5 * 60),
        }
    }
}

impl WaitSettings {
    fn timeout_minutes(&self) -> u64 {
        self.timeout.as_secs() / 60
    }
}

/// The runner-lifecycle operations exposed to callers: token issuance,
/// idempotent removal, and the registration wait.
pub struct RunnerLifecycle {
    service: Arc<dyn GitHubRunnerService>,
    settings: WaitSettings,
}

impl RunnerLifecycle {
    pub fn new(service: Arc<dyn GitHubRunnerService>) -> Self {
        Self::with_settings(service, WaitSettings::default())
    }

    pub fn with_settings(service: Arc<dyn GitHubRunnerService>, settings: WaitSettings) -> Self {
        Self { service, settings }
    }

    /// Issue a fresh registration token. Failure is fatal to the calling
    /// workflow: logged here, then propagated. No retry.
    pub async fn registration_token(&self) -> Result<RegistrationToken> {
        match self.service.create_registration_token().await {
            Ok(token) => {
                info!("✅ GitHub runner registration token is received");
                Ok(token)
            }
            Err(e) => {
                error!("❌ Failed to create a GitHub runner registration token: {}", e);
                Err(e)
            }
        }
    }

    /// Remove the registration of the runner carrying `label`. A runner
    /// that never registered or was already removed is a no-op success;
    /// teardown must be idempotent.
    pub async fn remove_runner(&self, label: &str) -> Result<()> {
        match self.service.get_runner(label).await {
            None => {
                info!("🧹 GitHub runner with label '{}' is not found, nothing to remove", label);
                Ok(())
            }
            Some(runner) => match self.service.delete_runner(runner.id).await {
                Ok(()) => {
                    info!("✅ GitHub runner '{}' (id {}) is removed", runner.name, runner.id);
                    Ok(())
                }
                Err(e) => {
                    error!("❌ Failed to remove GitHub runner '{}' (id {}): {}", runner.name, runner.id, e);
                    Err(e)
                }
            },
        }
    }

    /// Wait until the runner carrying `label` is registered and online, or
    /// the configured timeout elapses.
    ///
    /// Each iteration checks the timeout before the runner status; a runner
    /// that comes online in the same tick it would have timed out still
    /// times out. Awaiting each locate before the next sleep keeps at most
    /// one check in flight.
    pub async fn wait_for_runner_registered(&self, label: &str) -> Result<Runner> {
        let WaitSettings {
            quiet_period,
            poll_interval,
            timeout,
        } = self.settings;

        info!(
            "⏳ Waiting {}s for the instance to boot before the first registration check",
            quiet_period.as_secs()
        );
        tokio::time::sleep(quiet_period).await;

        info!(
            "🔄 Polling for GitHub runner '{}' every {}s (timeout: {} minutes)",
            label,
            poll_interval.as_secs(),
            self.settings.timeout_minutes()
        );

        let mut waited = Duration::ZERO;
        loop {
            if waited > timeout {
                error!(
                    "❌ GitHub runner '{}' did not register within {} minutes",
                    label,
                    self.settings.timeout_minutes()
                );
                return Err(AppError::RegistrationTimeout {
                    timeout_minutes: self.settings.timeout_minutes(),
                });
            }

            debug!("Checking status of GitHub runner '{}'", label);
            if let Some(runner) = self.service.get_runner(label).await {
                if runner.is_online() {
                    info!(
                        "✅ GitHub runner '{}' (id {}) is registered and online",
                        runner.name, runner.id
                    );
                    return Ok(runner);
                }
            }

            waited += poll_interval;
            tokio::time::sleep(poll_interval).await;
        }
    }
}
