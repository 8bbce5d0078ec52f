use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use tracing::warn;

use crate::{
    config::{Config, RepositoryContext},
    error::{AppError, Result},
    models::{RegistrationToken, Runner, RunnerPage},
};

/// Fixed page size for the runner listing endpoint.
const RUNNERS_PAGE_SIZE: usize = 100;

#[async_trait]
pub trait GitHubRunnerService: Send + Sync {
    /// Full runner listing for the repository, transparently paginated.
    async fn list_runners(&self) -> Result<Vec<Runner>>;

    /// First runner carrying `label`, or `None`. Listing failures collapse
    /// to `None`: callers treat "runner not found" and "listing errored"
    /// identically.
    async fn get_runner(&self, label: &str) -> Option<Runner>;

    /// Fresh short-lived registration token for the repository.
    async fn create_registration_token(&self) -> Result<RegistrationToken>;

    /// Delete a runner registration by id.
    async fn delete_runner(&self, runner_id: i64) -> Result<()>;
}

/// First runner whose labels contain an entry named `label`, in listing
/// order. Label uniqueness is an operational convention, not enforced
/// remotely; duplicates resolve to the first match.
pub fn find_by_label(runners: Vec<Runner>, label: &str) -> Option<Runner> {
    runners.into_iter().find(|runner| runner.has_label(label))
}

pub struct GitHubRunnerServiceImpl {
    http_client: Arc<Client>,
    access_token: String,
    repository: RepositoryContext,
    base_url: String,
}

impl GitHubRunnerServiceImpl {
    pub fn new(http_client: Arc<Client>, config: &Config) -> Self {
        Self {
            http_client,
            access_token: config.github_token.clone(),
            repository: config.repository.clone(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        }
    }

    fn create_headers(&self) -> reqwest::header::HeaderMap {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::AUTHORIZATION,
            format!("Bearer {}", self.access_token).parse().unwrap(),
        );
        headers.insert(
            reqwest::header::USER_AGENT,
            "ephemeral-runner/0.1".parse().unwrap(),
        );
        headers.insert(
            reqwest::header::ACCEPT,
            "application/vnd.github.v3+json".parse().unwrap(),
        );
        headers
    }

    async fn handle_github_response<T>(&self, response: reqwest::Response) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::GitHubApiError(format!(
                "GitHub API error ({}): {}",
                status, error_text
            )));
        }

        response.json::<T>().await.map_err(|e| {
            AppError::GitHubApiError(format!("Failed to parse GitHub response: {}", e))
        })
    }

    fn runners_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/actions/runners",
            self.base_url, self.repository.owner, self.repository.repo
        )
    }

    async fn fetch_runner_page(&self, page: usize) -> Result<RunnerPage> {
        let response = self
            .http_client
            .get(self.runners_url())
            .headers(self.create_headers())
            .query(&[
                ("per_page", RUNNERS_PAGE_SIZE.to_string()),
                ("page", page.to_string()),
            ])
            .send()
            .await
            .map_err(|e| AppError::GitHubApiError(format!("Failed to list runners: {}", e)))?;

        self.handle_github_response(response).await
    }
}

#[async_trait]
impl GitHubRunnerService for GitHubRunnerServiceImpl {
    async fn list_runners(&self) -> Result<Vec<Runner>> {
        let mut runners = Vec::new();
        let mut page = 1;

        // A page shorter than the fixed page size is the last one; a listing
        // that is an exact multiple of the page size costs one extra, empty
        // confirming page.
        loop {
            let batch = self.fetch_runner_page(page).await?;
            let fetched = batch.runners.len();
            runners.extend(batch.runners);
            if fetched < RUNNERS_PAGE_SIZE {
                break;
            }
            page += 1;
        }

        Ok(runners)
    }

    async fn get_runner(&self, label: &str) -> Option<Runner> {
        match self.list_runners().await {
            Ok(runners) => find_by_label(runners, label),
            Err(e) => {
                warn!("⚠️ Failed to list runners while looking for '{}': {}", label, e);
                None
            }
        }
    }

    async fn create_registration_token(&self) -> Result<RegistrationToken> {
        let url = format!("{}/registration-token", self.runners_url());

        let response = self
            .http_client
            .post(&url)
            .headers(self.create_headers())
            .send()
            .await
            .map_err(|e| {
                AppError::GitHubApiError(format!("Failed to create registration token: {}", e))
            })?;

        self.handle_github_response(response).await
    }

    async fn delete_runner(&self, runner_id: i64) -> Result<()> {
        let url = format!("{}/{}", self.runners_url(), runner_id);

        let response = self
            .http_client
            .delete(&url)
            .headers(self.create_headers())
            .send()
            .await
            .map_err(|e| AppError::GitHubApiError(format!("Failed to delete runner: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::GitHubApiError(format!(
                "Failed to delete runner ({}): {}",
                status, error_text
            )));
        }

        Ok(())
    }
}
