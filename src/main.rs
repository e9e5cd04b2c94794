use anyhow::Result;
use tracing::info;

use football_digest::config::Config;
use football_digest::job::DigestJob;
use football_digest::lexicon::LexiconScorer;
use football_digest::news_fetcher::NewsFetcher;
use football_digest::notifier::{Notifier, SmtpMailer};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load configuration; any missing secret stops us before network I/O
    let config = Config::from_env()?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("football_digest=info")),
        )
        .init();

    info!("Environment variables loaded successfully");

    let job = DigestJob::new(
        NewsFetcher::new(&config)?,
        LexiconScorer::new()?,
        Notifier::new(SmtpMailer::new(&config), &config),
    );

    // Single run; daily scheduling is left to cron or a systemd timer
    job.run().await?;
    Ok(())
}
