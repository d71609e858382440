use crate::config::Config;
use crate::error::Result;
use crate::quality::{QualityTier, Resolution, UNKNOWN_RESOLUTION};
use crate::summary::DownloadSummary;

#[cfg(feature = "pinterest")]
use crate::pinterest::PinterestExtractor;
#[cfg(feature = "tiktok")]
use crate::tiktok::TiktokExtractor;
#[cfg(feature = "twitter")]
use crate::twitter::TwitterExtractor;

use chrono::{DateTime, Utc};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
pub use strum::IntoEnumIterator;
use strum_macros::EnumIter;

/// Supported platforms
#[derive(EnumIter, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Copy)]
pub enum Platform {
    #[cfg(feature = "twitter")]
    Twitter,
    #[cfg(feature = "tiktok")]
    Tiktok,
    #[cfg(feature = "pinterest")]
    Pinterest,
}

impl Platform {
    pub fn extractor(&self) -> &'static dyn Extractor {
        match *self {
            #[cfg(feature = "twitter")]
            Platform::Twitter => &TwitterExtractor,
            #[cfg(feature = "tiktok")]
            Platform::Tiktok => &TiktokExtractor,
            #[cfg(feature = "pinterest")]
            Platform::Pinterest => &PinterestExtractor,
        }
    }
}

/// Which upstream produced the final payload
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SourceMethod {
    /// Structured syndication service
    #[serde(rename = "api_a")]
    Syndication,
    /// Alternate structured service
    #[serde(rename = "api_b")]
    FxTwitter,
    /// Raw page scan
    #[serde(rename = "api_c")]
    PageScan,
    /// Single-source platforms
    #[serde(rename = "standard")]
    Standard,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Photo,
    Video,
    Gif,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Author {
    pub name: String,
    pub username: String,
    pub avatar: String,
}

impl Author {
    pub fn new(name: String, username: String, avatar: String) -> Self {
        Self {
            name,
            username,
            avatar,
        }
    }

    /// Placeholder used when the source cannot recover the author
    pub fn unknown() -> Self {
        Self::new("unknown".to_string(), "unknown".to_string(), String::new())
    }
}

/// One downloadable rendition of a media item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Variant {
    pub url: String,
    pub resolution: String,
    pub quality: QualityTier,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bitrate: Option<u64>,
    pub content_type: String,
}

impl Variant {
    /// Video rendition; tier is derived from the resolution label
    pub fn video(url: String, resolution: String) -> Self {
        let quality = QualityTier::from_label(&resolution);
        Self {
            url,
            resolution,
            quality,
            bitrate: None,
            content_type: "video/mp4".to_string(),
        }
    }

    /// Photo rendition, always `original` tier
    pub fn photo(url: String, resolution: String) -> Self {
        Self {
            url,
            resolution,
            quality: QualityTier::Original,
            bitrate: None,
            content_type: "image/jpeg".to_string(),
        }
    }

    pub fn with_bitrate(mut self, bitrate: u64) -> Self {
        self.bitrate = Some(bitrate);
        self
    }

    pub fn with_content_type(mut self, content_type: String) -> Self {
        self.content_type = content_type;
        self
    }

    pub fn pixel_area(&self) -> u64 {
        Resolution::parse(&self.resolution).area()
    }
}

/// One photo, video or animated image attached to a post
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MediaItem {
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub url: String,
    pub download_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// Size label reported by the source, used when no variant is known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    pub variants: Vec<Variant>,
    pub best_quality: QualityTier,
    pub available_qualities: IndexSet<QualityTier>,
    pub available_resolutions: IndexSet<String>,
}

impl MediaItem {
    pub fn new(kind: MediaKind, url: String) -> Self {
        Self {
            kind,
            download_url: url.clone(),
            url,
            thumbnail: None,
            width: None,
            height: None,
            size: None,
            variants: Vec::new(),
            best_quality: QualityTier::Unknown,
            available_qualities: IndexSet::new(),
            available_resolutions: IndexSet::new(),
        }
    }

    pub fn with_thumbnail(mut self, thumbnail: String) -> Self {
        self.thumbnail = Some(thumbnail);
        self
    }

    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_size(mut self, size: String) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_variants(mut self, variants: Vec<Variant>) -> Self {
        self.variants = variants;
        self
    }

    /// Best-known resolution label from the item's own fields
    pub fn resolution_label(&self) -> String {
        match (self.width, self.height) {
            (Some(w), Some(h)) if w > 0 && h > 0 => format!("{w}x{h}"),
            _ => self
                .size
                .clone()
                .unwrap_or_else(|| UNKNOWN_RESOLUTION.to_string()),
        }
    }
}

/// What a single upstream source produced for a content id
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateResult {
    pub method: SourceMethod,
    pub author: Author,
    pub text: String,
    pub created_at: Option<DateTime<Utc>>,
    pub media: Vec<MediaItem>,
}

impl CandidateResult {
    pub fn has_media(&self) -> bool {
        !self.media.is_empty()
    }
}

/// Final success payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatedResult {
    pub url: String,
    pub id: String,
    pub method: SourceMethod,
    pub user: Author,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub media: Vec<MediaItem>,
    pub media_count: usize,
    pub download_info: DownloadSummary,
}

impl AggregatedResult {
    pub fn new(url: &str, id: &str, candidate: CandidateResult) -> Self {
        let created_at = candidate.created_at.unwrap_or_else(Utc::now);
        let download_info =
            DownloadSummary::build(id, &candidate.author, created_at, &candidate.media);
        Self {
            url: url.to_string(),
            id: id.to_string(),
            method: candidate.method,
            user: candidate.author,
            text: candidate.text,
            created_at,
            media_count: candidate.media.len(),
            media: candidate.media,
            download_info,
        }
    }
}

/// Trait for extracting media links from different platforms
#[async_trait::async_trait]
pub trait Extractor: Send + Sync {
    /// Check if the URL is supported by this extractor
    fn matches(&self, url: &str) -> bool;

    /// Resolve the URL into a normalized media payload
    async fn extract(&self, url: &str, config: &Config) -> Result<AggregatedResult>;

    /// Get platform identifier
    fn platform(&self) -> Platform;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_label_prefers_dimensions() {
        let item = MediaItem::new(MediaKind::Video, "https://a/b.mp4".into())
            .with_dimensions(1280, 720)
            .with_size("640x360".into());
        assert_eq!(item.resolution_label(), "1280x720");

        let item = MediaItem::new(MediaKind::Video, "https://a/b.mp4".into())
            .with_size("640x360".into());
        assert_eq!(item.resolution_label(), "640x360");

        let item = MediaItem::new(MediaKind::Video, "https://a/b.mp4".into());
        assert_eq!(item.resolution_label(), "unknown");
    }

    #[test]
    fn test_variant_constructors() {
        let v = Variant::video("https://a/720.mp4".into(), "1280x720".into()).with_bitrate(2176000);
        assert_eq!(v.quality, QualityTier::P720);
        assert_eq!(v.pixel_area(), 1280 * 720);

        let p = Variant::photo("https://a/p.jpg".into(), "unknown".into());
        assert_eq!(p.quality, QualityTier::Original);
        assert_eq!(p.pixel_area(), 0);
    }

    #[test]
    fn test_method_serialization() {
        assert_eq!(
            serde_json::to_value(SourceMethod::Syndication).unwrap(),
            "api_a"
        );
        assert_eq!(
            serde_json::to_value(SourceMethod::Standard).unwrap(),
            "standard"
        );
    }
}
