pub mod config;
pub mod core;
mod download;
pub mod error;
pub mod proxy;
pub mod quality;
pub mod rank;
pub mod response;
pub mod summary;

#[cfg(feature = "pinterest")]
pub mod pinterest;
#[cfg(feature = "tiktok")]
pub mod tiktok;
#[cfg(feature = "twitter")]
pub mod twitter;

pub use config::Config;
pub use crate::core::{AggregatedResult, Extractor, IntoEnumIterator, MediaItem, Platform, Variant};
use error::MediaError;
pub use error::Result;
pub use proxy::{ProxiedMedia, proxy_media};
pub use quality::QualityTier;
pub use response::{Response, cors_headers};

#[cfg(feature = "pinterest")]
pub use pinterest::PinterestExtractor;
#[cfg(feature = "tiktok")]
pub use tiktok::TiktokExtractor;
#[cfg(feature = "twitter")]
pub use twitter::TwitterExtractor;

/// Find the extractor responsible for `url`
pub fn find_extractor(url: &str) -> Option<&'static dyn Extractor> {
    Platform::iter()
        .map(|p| p.extractor())
        .find(|e| e.matches(url))
}

/// Extract media from URL (auto-detect platform)
pub async fn extract(url: &str, config: &Config) -> Result<AggregatedResult> {
    let url = url.trim();
    match find_extractor(url) {
        Some(extractor) => {
            tracing::debug!(platform = ?extractor.platform(), url, "dispatching");
            extractor.extract(url, config).await
        }
        None => Err(MediaError::UnsupportedSite(url.to_string())),
    }
}

/// Extract and wrap the outcome in the JSON envelope
pub async fn handle(url: &str, config: &Config) -> Response {
    Response::from_result(extract(url, config).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_find_extractor() {
        assert!(find_extractor("https://example.com/video").is_none());
        #[cfg(feature = "twitter")]
        assert_eq!(
            find_extractor("https://x.com/jack/status/1234567890123")
                .map(|e| e.platform()),
            Some(Platform::Twitter)
        );
        #[cfg(feature = "tiktok")]
        assert_eq!(
            find_extractor("https://www.tiktok.com/@user/video/7301234567890123456")
                .map(|e| e.platform()),
            Some(Platform::Tiktok)
        );
        #[cfg(feature = "pinterest")]
        assert_eq!(
            find_extractor("https://www.pinterest.com/pin/987654321012/").map(|e| e.platform()),
            Some(Platform::Pinterest)
        );
    }

    #[tokio::test]
    async fn test_unsupported_site() {
        let response = handle("https://example.com/video", &Config::default()).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.body["success"], false);
    }

    #[cfg(feature = "twitter")]
    #[tokio::test]
    async fn test_tweet_without_id_is_rejected_before_fetching() {
        let response = handle("https://x.com/jack/status/42", &Config::default()).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
    }
}
