use anyhow::{Context, Result};
use chrono::Local;
use tracing::info;

use crate::news_fetcher::HeadlineSource;
use crate::notifier::{Digest, MailTransport, Notifier};
use crate::sentiment::{analyze, SentimentScorer};

/// Placeholder headlines used when the live fetch yields nothing.
pub const FALLBACK_HEADLINES: [&str; 3] = [
    "Liverpool wins Premier League title",
    "Injury concerns for Liverpool star",
    "Spurs wins uel",
];

pub fn fallback_headlines() -> Vec<String> {
    FALLBACK_HEADLINES.iter().map(|h| h.to_string()).collect()
}

/// One fetch -> analyze -> send pass. Holds no state between runs; whatever
/// triggers it (cron, a systemd timer) just calls `run` again.
pub struct DigestJob<S, C, T> {
    source: S,
    scorer: C,
    notifier: Notifier<T>,
}

impl<S, C, T> DigestJob<S, C, T>
where
    S: HeadlineSource,
    C: SentimentScorer,
    T: MailTransport,
{
    pub fn new(source: S, scorer: C, notifier: Notifier<T>) -> Self {
        DigestJob {
            source,
            scorer,
            notifier,
        }
    }

    pub async fn run(&self) -> Result<Digest> {
        info!("Running job at {}", Local::now());

        let mut headlines = self.source.fetch().await.into_headlines();
        if headlines.is_empty() {
            info!("No headlines fetched, using fallback.");
            headlines = fallback_headlines();
        }

        let analysis = analyze(&self.scorer, &headlines);

        let digest = self
            .notifier
            .send_digest(&analysis.lines(), &analysis.summary)
            .await
            .context("Failed to deliver digest")?;

        info!("Job complete: '{}'", digest.subject);
        Ok(digest)
    }
}
