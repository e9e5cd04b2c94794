pub mod config;
pub mod job;
pub mod lexicon;
pub mod news_fetcher;
pub mod notifier;
pub mod sentiment;
