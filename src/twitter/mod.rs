use crate::config::Config;
use crate::core::{AggregatedResult, Extractor, Platform};
use crate::error::Result;
use async_trait::async_trait;

pub mod fxtwitter;
pub mod merge;
pub mod scrape;
pub mod syndication;
pub mod types;
pub mod utils;

pub use merge::{Merger, TweetSource, resolve_tweet};
pub use utils::{is_twitter_url, parse_id};

/// Twitter/X extractor implementing the Extractor trait
#[derive(Debug, Clone)]
pub struct TwitterExtractor;

#[async_trait]
impl Extractor for TwitterExtractor {
    fn matches(&self, url: &str) -> bool {
        is_twitter_url(url)
    }

    async fn extract(&self, url: &str, config: &Config) -> Result<AggregatedResult> {
        resolve_tweet(url, &Merger::from_config(config)).await
    }

    fn platform(&self) -> Platform {
        Platform::Twitter
    }
}
