use std::fmt;

use tracing::warn;

use crate::error::{AppError, Result};

/// Identifies the repository whose runners are managed. Read-only once
/// constructed.
#[derive(Debug, Clone)]
pub struct RepositoryContext {
    pub owner: String,
    pub repo: String,
}

impl RepositoryContext {
    pub fn parse(full_name: &str) -> Result<Self> {
        // Basic repository format validation (owner/repo)
        if !full_name.contains('/') || full_name.split('/').count() != 2 {
            return Err(AppError::ValidationError(
                "GitHub repository must be in format 'owner/repo'".to_string(),
            ));
        }
        let parts: Vec<&str> = full_name.split('/').collect();
        if parts[0].is_empty() || parts[1].is_empty() {
            return Err(AppError::ValidationError(
                "GitHub repository owner and name cannot be empty".to_string(),
            ));
        }
        Ok(Self {
            owner: parts[0].to_string(),
            repo: parts[1].to_string(),
        })
    }
}

impl fmt::Display for RepositoryContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub github_token: String,
    pub repository: RepositoryContext,
    pub api_base_url: String,
}

impl Config {
    pub fn new(github_token: String, repository: &str, api_base_url: String) -> Result<Self> {
        let config = Config {
            github_token,
            repository: RepositoryContext::parse(repository)?,
            api_base_url,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate that all required configuration is present and valid
    pub fn validate(&self) -> Result<()> {
        if self.github_token.is_empty() {
            return Err(AppError::ValidationError(
                "GitHub token cannot be empty".to_string(),
            ));
        }

        if !self.github_token.starts_with("ghp_")
            && !self.github_token.starts_with("github_pat_")
            && !self.github_token.starts_with("ghs_")
        {
            warn!("⚠️ GitHub token does not match expected format (ghp_*, github_pat_* or ghs_*)");
        }

        if !self.api_base_url.starts_with("http") {
            return Err(AppError::ValidationError(
                "GitHub API base URL must be a valid HTTP(S) URL".to_string(),
            ));
        }

        Ok(())
    }
}
