#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("GitHub API error: {0}")]
    GitHubApiError(String),

    #[error("A timeout of {timeout_minutes} minutes was exceeded while waiting for the GitHub runner to register")]
    RegistrationTimeout { timeout_minutes: u64 },
}

// Add From implementations for common error types
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::GitHubApiError(format!("Request error: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_timeout_message_names_the_limit() {
        let err = AppError::RegistrationTimeout { timeout_minutes: 5 };
        assert!(err.to_string().contains("5 minutes"));
    }

    #[test]
    fn test_github_api_error_message() {
        let err = AppError::GitHubApiError("boom".to_string());
        assert_eq!(err.to_string(), "GitHub API error: boom");
    }
}
