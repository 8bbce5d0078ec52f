use std::sync::Arc;

use clap::{Parser, Subcommand};
use dotenv::dotenv;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ephemeral_runner::{
    config::Config,
    services::{GitHubRunnerServiceImpl, RunnerLifecycle},
};

#[derive(Parser)]
#[command(
    name = "ephemeral-runner",
    about = "Manage the GitHub-side lifecycle of ephemeral self-hosted Actions runners"
)]
struct Cli {
    /// Access token used against the GitHub API
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    github_token: String,

    /// Target repository in 'owner/repo' format
    #[arg(long, env = "GITHUB_REPOSITORY")]
    repository: String,

    /// GitHub API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = "https://api.github.com")]
    api_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a registration token for a new runner and print it to stdout
    RegistrationToken,
    /// Wait until the runner carrying the label is registered and online
    Wait {
        /// Label uniquely identifying the runner
        #[arg(long, env = "RUNNER_LABEL")]
        label: String,
    },
    /// Remove the runner registration; an unregistered runner is a no-op
    Remove {
        /// Label uniquely identifying the runner
        #[arg(long, env = "RUNNER_LABEL")]
        label: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = Config::new(cli.github_token.clone(), &cli.repository, cli.api_url.clone())?;

    let http_client = Arc::new(reqwest::Client::new());
    let service = Arc::new(GitHubRunnerServiceImpl::new(http_client, &config));
    let lifecycle = RunnerLifecycle::new(service);

    match cli.command {
        Command::RegistrationToken => {
            let token = lifecycle.registration_token().await?;
            // stdout so the provisioning wrapper can capture it
            println!("{}", token.token);
        }
        Command::Wait { label } => {
            lifecycle.wait_for_runner_registered(&label).await?;
        }
        Command::Remove { label } => {
            lifecycle.remove_runner(&label).await?;
        }
    }

    Ok(())
}
