pub mod github;
pub mod lifecycle;
pub mod mock_utils;

// Re-export commonly used services
pub use github::{GitHubRunnerService, GitHubRunnerServiceImpl};
pub use lifecycle::{RunnerLifecycle, WaitSettings};
