#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::RwLock;

use crate::{
    error::{AppError, Result},
    models::{RegistrationToken, Runner, RunnerLabel, RunnerStatus},
    services::github::{find_by_label, GitHubRunnerService},
};

/// Common mock utilities for testing
pub struct MockUtils;

impl MockUtils {
    /// Create a mock runner record for testing
    pub fn create_mock_runner(
        id: i64,
        name: &str,
        labels: &[&str],
        status: RunnerStatus,
    ) -> Runner {
        Runner {
            id,
            name: name.to_string(),
            os: Some("linux".to_string()),
            status,
            busy: false,
            labels: labels
                .iter()
                .enumerate()
                .map(|(i, label)| RunnerLabel {
                    id: Some(i as i64 + 1),
                    name: label.to_string(),
                    label_type: Some("custom".to_string()),
                })
                .collect(),
        }
    }

    /// Create a mock registration token for testing
    pub fn create_mock_token(token: &str) -> RegistrationToken {
        RegistrationToken {
            token: token.to_string(),
            expires_at: Utc::now() + Duration::hours(1),
        }
    }
}

/// Programmable in-memory stand-in for the GitHub runner service, with call
/// counts for the polling and idempotency assertions.
pub struct MockRunnerService {
    runners: RwLock<Vec<Runner>>,
    registration_token: RwLock<RegistrationToken>,
    /// Fatal remote calls (token issuance, deletion) fail when set.
    should_fail: RwLock<bool>,
    /// When set, the located runner reports offline until the nth
    /// `get_runner` call.
    online_after: RwLock<Option<usize>>,
    get_runner_calls: RwLock<usize>,
    deleted_ids: RwLock<Vec<i64>>,
}

impl MockRunnerService {
    pub fn new() -> Self {
        Self {
            runners: RwLock::new(Vec::new()),
            registration_token: RwLock::new(MockUtils::create_mock_token("mock-token")),
            should_fail: RwLock::new(false),
            online_after: RwLock::new(None),
            get_runner_calls: RwLock::new(0),
            deleted_ids: RwLock::new(Vec::new()),
        }
    }

    pub async fn set_runners(&self, runners: Vec<Runner>) {
        *self.runners.write().await = runners;
    }

    pub async fn set_registration_token(&self, token: RegistrationToken) {
        *self.registration_token.write().await = token;
    }

    pub async fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.write().await = should_fail;
    }

    pub async fn set_online_after(&self, calls: usize) {
        *self.online_after.write().await = Some(calls);
    }

    pub async fn get_runner_calls(&self) -> usize {
        *self.get_runner_calls.read().await
    }

    pub async fn deleted_ids(&self) -> Vec<i64> {
        self.deleted_ids.read().await.clone()
    }

    async fn check_should_fail(&self, what: &str) -> Result<()> {
        if *self.should_fail.read().await {
            Err(AppError::GitHubApiError(format!("Mock failure: {}", what)))
        } else {
            Ok(())
        }
    }
}

impl Default for MockRunnerService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GitHubRunnerService for MockRunnerService {
    async fn list_runners(&self) -> Result<Vec<Runner>> {
        Ok(self.runners.read().await.clone())
    }

    async fn get_runner(&self, label: &str) -> Option<Runner> {
        let calls = {
            let mut counter = self.get_runner_calls.write().await;
            *counter += 1;
            *counter
        };

        let runners = self.runners.read().await.clone();
        let mut runner = find_by_label(runners, label)?;
        if let Some(threshold) = *self.online_after.read().await {
            runner.status = if calls >= threshold {
                RunnerStatus::Online
            } else {
                RunnerStatus::Offline
            };
        }
        Some(runner)
    }

    async fn create_registration_token(&self) -> Result<RegistrationToken> {
        self.check_should_fail("create_registration_token").await?;
        Ok(self.registration_token.read().await.clone())
    }

    async fn delete_runner(&self, runner_id: i64) -> Result<()> {
        self.check_should_fail("delete_runner").await?;
        self.deleted_ids.write().await.push(runner_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_utils_create_runner() {
        let runner =
            MockUtils::create_mock_runner(1, "r1", &["self-hosted", "x"], RunnerStatus::Online);
        assert_eq!(runner.id, 1);
        assert_eq!(runner.labels.len(), 2);
        assert!(runner.has_label("x"));
    }

    #[tokio::test]
    async fn test_mock_service_counts_get_runner_calls() {
        let service = MockRunnerService::new();
        service
            .set_runners(vec![MockUtils::create_mock_runner(
                1,
                "r1",
                &["x"],
                RunnerStatus::Online,
            )])
            .await;

        assert!(service.get_runner("x").await.is_some());
        assert!(service.get_runner("missing").await.is_none());
        assert_eq!(service.get_runner_calls().await, 2);
    }

    #[tokio::test]
    async fn test_mock_service_should_fail() {
        let service = MockRunnerService::new();
        service.set_should_fail(true).await;

        assert!(service.create_registration_token().await.is_err());
        assert!(service.delete_runner(1).await.is_err());
    }
}
