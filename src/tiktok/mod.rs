use crate::config::Config;
use crate::core::{AggregatedResult, Extractor, Platform};
use crate::error::Result;
use async_trait::async_trait;

pub mod api;
pub mod types;

pub use api::{is_tiktok_url, parse_id};

/// TikTok extractor implementing the Extractor trait
#[derive(Debug, Clone)]
pub struct TiktokExtractor;

#[async_trait]
impl Extractor for TiktokExtractor {
    fn matches(&self, url: &str) -> bool {
        is_tiktok_url(url)
    }

    async fn extract(&self, url: &str, config: &Config) -> Result<AggregatedResult> {
        api::extract(url, config).await
    }

    fn platform(&self) -> Platform {
        Platform::Tiktok
    }
}
