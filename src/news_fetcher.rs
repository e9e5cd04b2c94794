use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::config::Config;

pub const NEWS_API_URL: &str = "https://newsapi.org/v2";
pub const QUERY_TERM: &str = "football";
pub const PAGE_SIZE: usize = 10;

/// Body of GET /everything. Error responses carry `code` and `message`
/// instead of `articles`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewsApiResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub articles: Option<Vec<Article>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Article {
    pub title: String,
}

/// What a single fetch produced. Everything except `Headlines` degrades to
/// an empty list for the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Headlines(Vec<String>),
    NoArticles,
    ProviderError(String),
    TransportError(String),
}

impl FetchOutcome {
    pub fn into_headlines(self) -> Vec<String> {
        match self {
            FetchOutcome::Headlines(h) => h,
            _ => Vec::new(),
        }
    }
}

#[async_trait]
pub trait HeadlineSource: Send + Sync {
    async fn fetch(&self) -> FetchOutcome;
}

pub struct NewsFetcher {
    client: Client,
    base_url: String,
    api_key: String,
}

impl NewsFetcher {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build news HTTP client")?;

        Ok(NewsFetcher {
            client,
            base_url: NEWS_API_URL.to_string(),
            api_key: config.news_api_key.clone(),
        })
    }

    /// For testing: point the fetcher at a mock server
    #[doc(hidden)]
    pub fn with_client(client: Client, base_url: String, api_key: &str) -> Self {
        NewsFetcher {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    async fn request(&self) -> Result<NewsApiResponse> {
        let url = format!("{}/everything", self.base_url);
        let page_size = PAGE_SIZE.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", QUERY_TERM),
                ("language", "en"),
                ("sortBy", "publishedAt"),
                ("pageSize", page_size.as_str()),
                ("apiKey", self.api_key.as_str()),
            ])
            .send()
            .await
            .context("Failed to reach news API")?;

        // The provider reports failures in the JSON body alongside a 4xx,
        // so the status code is only logged.
        debug!("News API responded with HTTP {}", response.status());

        response
            .json::<NewsApiResponse>()
            .await
            .context("Failed to parse news API response")
    }

    pub async fn fetch_headlines(&self) -> FetchOutcome {
        let body = match self.request().await {
            Ok(b) => b,
            Err(e) => {
                warn!("Error fetching football news: {:#}", e);
                return FetchOutcome::TransportError(format!("{:#}", e));
            }
        };

        if body.status != "ok" {
            let message = body
                .message
                .unwrap_or_else(|| "Unknown error".to_string());
            warn!("NewsAPI Error: {}", message);
            return FetchOutcome::ProviderError(message);
        }

        let Some(articles) = body.articles else {
            warn!("Error fetching football news: response has no articles field");
            return FetchOutcome::TransportError("missing articles field".to_string());
        };

        let headlines: Vec<String> = articles
            .into_iter()
            .take(PAGE_SIZE)
            .map(|a| a.title)
            .collect();

        if headlines.is_empty() {
            info!("News API returned no articles");
            return FetchOutcome::NoArticles;
        }

        info!("Fetched {} headlines", headlines.len());
        FetchOutcome::Headlines(headlines)
    }
}

#[async_trait]
impl HeadlineSource for NewsFetcher {
    async fn fetch(&self) -> FetchOutcome {
        self.fetch_headlines().await
    }
}
