use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ORIGIN, REFERER};
use tracing::debug;

use crate::config::Config;
use crate::core::{Author, CandidateResult, MediaItem, MediaKind, SourceMethod, Variant};
use crate::download::download_json_with_headers;
use crate::error::{MediaError, Result};
use crate::quality::resolution_from_url;
use crate::twitter::merge::TweetSource;
use crate::twitter::types::{MediaDetail, SyndicationTweet};
use crate::twitter::utils::{parse_created_at, syndication_token};

const MP4: &str = "video/mp4";

/// Structured tweet metadata from the syndication CDN
#[derive(Debug, Clone)]
pub struct SyndicationSource {
    config: Config,
}

impl SyndicationSource {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    fn endpoints(&self, id: &str) -> Vec<String> {
        let base = self.config.syndication_base.trim_end_matches('/');
        let token = syndication_token(id);
        vec![
            format!("{base}/tweet-result?id={id}&lang=en&token={token}"),
            format!("{base}/tweet-result?id={id}&lang=en"),
            format!("{base}/tweet-result?id={id}&token=a"),
        ]
    }

    async fn try_fetch(&self, id: &str) -> Result<CandidateResult> {
        let mut headers = HeaderMap::new();
        headers.insert(ORIGIN, HeaderValue::from_static("https://platform.twitter.com"));
        headers.insert(REFERER, HeaderValue::from_static("https://platform.twitter.com/"));

        let mut last_error = None;
        for endpoint in self.endpoints(id) {
            match download_json_with_headers::<SyndicationTweet>(
                &endpoint,
                headers.clone(),
                &self.config,
            )
            .await
            {
                Ok(tweet) if has_media_fields(&tweet) => return Ok(to_candidate(tweet)),
                Ok(_) => {
                    debug!(endpoint = %endpoint, "syndication payload has no media fields");
                    last_error = Some(MediaError::ParseError("no media fields".to_string()));
                }
                Err(e) => {
                    debug!(endpoint = %endpoint, error = %e, "syndication endpoint failed");
                    last_error = Some(e);
                }
            }
        }
        Err(last_error.unwrap_or(MediaError::ContentUnavailable { id: id.to_string() }))
    }
}

#[async_trait]
impl TweetSource for SyndicationSource {
    fn method(&self) -> SourceMethod {
        SourceMethod::Syndication
    }

    async fn fetch(&self, id: &str) -> Option<CandidateResult> {
        self.try_fetch(id)
            .await
            .inspect_err(|e| debug!(id, error = %e, "syndication source gave up"))
            .ok()
    }
}

fn is_motion(detail: &MediaDetail) -> bool {
    detail.kind == "video" || detail.kind == "animated_gif"
}

/// Photo set, single video, or animated image
pub fn has_media_fields(tweet: &SyndicationTweet) -> bool {
    !tweet.photos.is_empty() || tweet.video.is_some() || tweet.media_details.iter().any(is_motion)
}

pub fn to_candidate(tweet: SyndicationTweet) -> CandidateResult {
    let author = tweet
        .user
        .as_ref()
        .map(|u| {
            Author::new(
                u.name.clone(),
                u.screen_name.clone(),
                u.profile_image_url_https.clone(),
            )
        })
        .unwrap_or_else(Author::unknown);

    let mut media: Vec<MediaItem> = tweet
        .photos
        .iter()
        .map(|p| {
            let mut item = MediaItem::new(MediaKind::Photo, p.url.clone());
            if let (Some(w), Some(h)) = (p.width, p.height) {
                item = item.with_dimensions(w, h);
            }
            let variant = Variant::photo(p.url.clone(), item.resolution_label());
            item.with_variants(vec![variant])
        })
        .collect();

    if let Some(item) = motion_item(&tweet) {
        media.push(item);
    }

    CandidateResult {
        method: SourceMethod::Syndication,
        author,
        text: tweet.text.unwrap_or_default(),
        created_at: tweet.created_at.as_deref().and_then(parse_created_at),
        media,
    }
}

/// The single video or gif attached to the tweet, with every MP4 rendition
fn motion_item(tweet: &SyndicationTweet) -> Option<MediaItem> {
    let detail = tweet.media_details.iter().find(|d| is_motion(d));
    let kind = match detail {
        Some(d) if d.kind == "animated_gif" => MediaKind::Gif,
        _ => MediaKind::Video,
    };
    let detail_variants = detail
        .and_then(|d| d.video_info.as_ref())
        .map(|info| info.variants.as_slice())
        .unwrap_or_default();

    // (url, bitrate) pairs from whichever field carries them
    let renditions: Vec<(String, Option<u64>)> = match &tweet.video {
        Some(video) => video
            .variants
            .iter()
            .filter(|v| v.content_type == MP4)
            .map(|v| {
                let bitrate = detail_variants
                    .iter()
                    .find(|d| d.url == v.src)
                    .and_then(|d| d.bitrate);
                (v.src.clone(), bitrate)
            })
            .collect(),
        None => detail_variants
            .iter()
            .filter(|v| v.content_type == MP4)
            .map(|v| (v.url.clone(), v.bitrate))
            .collect(),
    };

    let first = renditions.first()?.0.clone();
    let mut item = MediaItem::new(kind, first);
    if let Some(info) = detail.and_then(|d| d.original_info.as_ref()) {
        item = item.with_dimensions(info.width, info.height);
    }
    if let Some(poster) = tweet
        .video
        .as_ref()
        .and_then(|v| v.poster.clone())
        .or_else(|| detail.and_then(|d| d.media_url_https.clone()))
    {
        item = item.with_thumbnail(poster);
    }

    let item_label = item.resolution_label();
    let variants = renditions
        .into_iter()
        .map(|(url, bitrate)| {
            let resolution = match resolution_from_url(&url) {
                Some(res) => res.label(),
                // gif renditions carry no size in the path; they are the original size
                None if kind == MediaKind::Gif => item_label.clone(),
                None => "unknown".to_string(),
            };
            let variant = Variant::video(url, resolution);
            match bitrate {
                Some(b) => variant.with_bitrate(b),
                None => variant,
            }
        })
        .collect();

    Some(item.with_variants(variants))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quality::QualityTier;

    const VIDEO_TWEET: &str = r#"{
        "text": "clip",
        "created_at": "2024-01-02T03:04:05.000Z",
        "user": {"name": "Jack", "screen_name": "jack", "profile_image_url_https": "https://pbs.twimg.com/a.jpg"},
        "video": {
            "poster": "https://pbs.twimg.com/poster.jpg",
            "variants": [
                {"type": "application/x-mpegURL", "src": "https://video.twimg.com/ext_tw_video/1/pu/pl/x.m3u8"},
                {"type": "video/mp4", "src": "https://video.twimg.com/ext_tw_video/1/pu/vid/avc1/640x360/a.mp4"},
                {"type": "video/mp4", "src": "https://video.twimg.com/ext_tw_video/1/pu/vid/avc1/1280x720/b.mp4"}
            ]
        },
        "mediaDetails": [{
            "type": "video",
            "original_info": {"width": 1280, "height": 720},
            "video_info": {"variants": [
                {"bitrate": 2176000, "content_type": "video/mp4", "url": "https://video.twimg.com/ext_tw_video/1/pu/vid/avc1/1280x720/b.mp4"}
            ]}
        }]
    }"#;

    #[test]
    fn test_video_payload() {
        let tweet: SyndicationTweet = serde_json::from_str(VIDEO_TWEET).unwrap();
        assert!(has_media_fields(&tweet));
        let candidate = to_candidate(tweet);
        assert_eq!(candidate.method, SourceMethod::Syndication);
        assert_eq!(candidate.author.username, "jack");
        assert!(candidate.created_at.is_some());
        assert_eq!(candidate.media.len(), 1);

        let item = &candidate.media[0];
        assert_eq!(item.kind, MediaKind::Video);
        assert_eq!(item.thumbnail.as_deref(), Some("https://pbs.twimg.com/poster.jpg"));
        assert_eq!(item.variants.len(), 2);
        assert_eq!(item.variants[0].resolution, "640x360");
        assert_eq!(item.variants[0].bitrate, None);
        assert_eq!(item.variants[1].quality, QualityTier::P720);
        assert_eq!(item.variants[1].bitrate, Some(2176000));
    }

    #[test]
    fn test_photos_and_gif() {
        let json = r#"{
            "text": "pics",
            "photos": [
                {"url": "https://pbs.twimg.com/media/a.jpg", "width": 1200, "height": 800},
                {"url": "https://pbs.twimg.com/media/b.jpg"}
            ],
            "mediaDetails": [{
                "type": "animated_gif",
                "media_url_https": "https://pbs.twimg.com/tweet_video_thumb/g.jpg",
                "original_info": {"width": 480, "height": 270},
                "video_info": {"variants": [
                    {"bitrate": 0, "content_type": "video/mp4", "url": "https://video.twimg.com/tweet_video/g.mp4"}
                ]}
            }]
        }"#;
        let tweet: SyndicationTweet = serde_json::from_str(json).unwrap();
        let candidate = to_candidate(tweet);
        assert_eq!(candidate.author, Author::unknown());
        assert_eq!(candidate.media.len(), 3);

        assert_eq!(candidate.media[0].variants[0].quality, QualityTier::Original);
        assert_eq!(candidate.media[0].variants[0].resolution, "1200x800");
        assert_eq!(candidate.media[1].variants[0].resolution, "unknown");

        let gif = &candidate.media[2];
        assert_eq!(gif.kind, MediaKind::Gif);
        assert_eq!(gif.variants[0].resolution, "480x270");
        assert_eq!(gif.variants[0].quality, QualityTier::P480);
    }

    #[test]
    fn test_payload_without_media_fields() {
        let tweet: SyndicationTweet =
            serde_json::from_str(r#"{"text": "just words", "mediaDetails": [{"type": "photo"}]}"#)
                .unwrap();
        assert!(!has_media_fields(&tweet));
    }

    #[test]
    fn test_endpoints_are_ordered() {
        let source = SyndicationSource::new(Config::default());
        let endpoints = source.endpoints("1234567890123");
        assert_eq!(endpoints.len(), 3);
        assert!(endpoints[0].contains("&token="));
        assert!(endpoints[1].ends_with("lang=en"));
        assert!(endpoints[2].ends_with("token=a"));
    }
}
