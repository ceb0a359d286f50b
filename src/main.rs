use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use repo_publish::config::{Cli, Config};
use repo_publish::connector::{ConnectorBroker, TokenProvider};
use repo_publish::publish::{self, PublishError};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "repo_publish=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from(Cli::parse());

    if let Err(err) = run(config).await {
        tracing::error!("publish failed: {err}");
        std::process::exit(1);
    }
}

async fn run(config: Config) -> Result<(), PublishError> {
    let broker = ConnectorBroker::from_env(reqwest::Client::new())?;
    let mut provider = TokenProvider::new(broker);

    let report = publish::publish(
        config.strategy,
        &mut provider,
        config.repo,
        &config.branch,
        &config.root,
    )
    .await?;

    tracing::info!(
        "publish succeeded: {}/{} files uploaded",
        report.uploaded,
        report.discovered
    );
    Ok(())
}
