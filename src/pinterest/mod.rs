use crate::config::Config;
use crate::core::{AggregatedResult, Extractor, Platform};
use crate::error::Result;
use async_trait::async_trait;

pub mod api;
pub mod types;

pub use api::{is_pinterest_url, parse_id};

/// Pinterest extractor implementing the Extractor trait
#[derive(Debug, Clone)]
pub struct PinterestExtractor;

#[async_trait]
impl Extractor for PinterestExtractor {
    fn matches(&self, url: &str) -> bool {
        is_pinterest_url(url)
    }

    async fn extract(&self, url: &str, config: &Config) -> Result<AggregatedResult> {
        api::extract(url, config).await
    }

    fn platform(&self) -> Platform {
        Platform::Pinterest
    }
}
