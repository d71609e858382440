use chrono::{DateTime, Utc};
use regex::Regex;
use reqwest::header::HeaderMap;
use tracing::debug;
use url::Url;

use crate::config::Config;
use crate::core::{AggregatedResult, Author, CandidateResult, MediaItem, MediaKind, SourceMethod, Variant};
use crate::download::{download_json_with_headers, get_response_with_headers, html_headers};
use crate::error::{MediaError, Result};
use crate::quality::Resolution;
use crate::pinterest::types::{Pin, PinInfoResponse};
use crate::rank::rank_all;

/// Check if URL is a Pinterest link
pub fn is_pinterest_url(url: &str) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    match parsed.domain() {
        Some(domain) => {
            domain == "pin.it" || domain.split('.').any(|label| label == "pinterest")
        }
        None => false,
    }
}

/// Check if URL is a pin.it short link
pub fn is_pinterest_short_url(url: &str) -> bool {
    Url::parse(url)
        .ok()
        .is_some_and(|u| u.domain() == Some("pin.it"))
}

/// Pin id from a full pin URL
pub fn parse_id(url: &str) -> Option<String> {
    let re = Regex::new(r"/pin/(\d+)").ok()?;
    re.captures(url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Resolve short link by following redirects
async fn resolve_short_link(short_url: &str, config: &Config) -> Result<String> {
    let response = get_response_with_headers(short_url, html_headers(), config).await?;
    Ok(response.url().to_string())
}

fn label(width: Option<u32>, height: Option<u32>) -> String {
    Resolution::new(width.unwrap_or(0), height.unwrap_or(0)).label()
}

pub fn to_candidate(pin: Pin) -> CandidateResult {
    let author = pin
        .pinner
        .as_ref()
        .map(|p| Author::new(p.full_name.clone(), p.username.clone(), p.image_small_url.clone()))
        .unwrap_or_else(Author::unknown);

    let poster = pin
        .images
        .get("orig")
        .or_else(|| pin.images.values().last())
        .map(|img| img.url.clone());

    let videos: Vec<Variant> = pin
        .videos
        .as_ref()
        .map(|v| {
            v.video_list
                .values()
                .filter(|video| video.url.ends_with(".mp4"))
                .map(|video| Variant::video(video.url.clone(), label(video.width, video.height)))
                .collect()
        })
        .unwrap_or_default();

    let media = if let Some(first) = videos.first() {
        let mut item = MediaItem::new(MediaKind::Video, first.url.clone());
        if let Some(poster) = &poster {
            item = item.with_thumbnail(poster.clone());
        }
        vec![item.with_variants(videos)]
    } else if let Some(img) = pin.images.get("orig").or_else(|| pin.images.values().last()) {
        let mut item = MediaItem::new(MediaKind::Photo, img.url.clone());
        if let (Some(w), Some(h)) = (img.width, img.height) {
            item = item.with_dimensions(w, h);
        }
        let variant = Variant::photo(img.url.clone(), label(img.width, img.height));
        vec![item.with_variants(vec![variant])]
    } else {
        Vec::new()
    };

    CandidateResult {
        method: SourceMethod::Standard,
        author,
        text: pin.description.unwrap_or_default(),
        created_at: pin
            .created_at
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc2822(s).ok())
            .map(|ts| ts.with_timezone(&Utc)),
        media,
    }
}

/// Resolve a pin through the pin-info widget API
pub async fn extract(url: &str, config: &Config) -> Result<AggregatedResult> {
    if !is_pinterest_url(url) {
        return Err(MediaError::InvalidUrl(url.to_string()));
    }

    let pin_id = if is_pinterest_short_url(url) {
        let resolved = resolve_short_link(url, config).await?;
        debug!(short = url, resolved = %resolved, "resolved pinterest short link");
        parse_id(&resolved)
    } else {
        parse_id(url)
    };
    let id = pin_id.ok_or_else(|| MediaError::InvalidReference(url.to_string()))?;

    let base = config.pinterest_api_base.trim_end_matches('/');
    let api_url = format!("{base}/v3/pidgets/pins/info/?pin_ids={id}");
    let response: PinInfoResponse =
        download_json_with_headers(&api_url, HeaderMap::new(), config).await?;

    let pin = response
        .data
        .into_iter()
        .next()
        .ok_or_else(|| MediaError::ContentUnavailable { id: id.clone() })?;

    let mut candidate = to_candidate(pin);
    if !candidate.has_media() {
        return Err(MediaError::ContentUnavailable { id });
    }
    candidate.media = rank_all(candidate.media);
    Ok(AggregatedResult::new(url, &id, candidate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quality::QualityTier;

    #[test]
    fn test_is_pinterest_url() {
        assert!(is_pinterest_url("https://www.pinterest.com/pin/123456789/"));
        assert!(is_pinterest_url("https://uk.pinterest.co.uk/pin/123456789/"));
        assert!(is_pinterest_url("https://pin.it/abcDEF"));
        assert!(!is_pinterest_url("https://notpinterest.com/pin/1/"));
        assert!(is_pinterest_short_url("https://pin.it/abcDEF"));
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(
            parse_id("https://www.pinterest.com/pin/987654321012/").as_deref(),
            Some("987654321012")
        );
        assert_eq!(parse_id("https://www.pinterest.com/someone/"), None);
    }

    #[test]
    fn test_video_pin() {
        let json = r#"{
            "status": "success",
            "data": [{
                "id": "987654321012",
                "description": "recipe",
                "created_at": "Tue, 12 Mar 2024 10:00:00 +0000",
                "pinner": {"full_name": "Cook", "username": "cook", "image_small_url": "https://i.pinimg.com/a.jpg"},
                "images": {"237x": {"url": "https://i.pinimg.com/237x/p.jpg", "width": 237, "height": 421}, "orig": {"url": "https://i.pinimg.com/originals/p.jpg", "width": 720, "height": 1280}},
                "videos": {"video_list": {
                    "V_HLSV4": {"url": "https://v1.pinimg.com/videos/hls/p.m3u8", "width": 720, "height": 1280},
                    "V_720P": {"url": "https://v1.pinimg.com/videos/720p/p.mp4", "width": 720, "height": 1280}
                }}
            }]
        }"#;
        let response: PinInfoResponse = serde_json::from_str(json).unwrap();
        let pin = response.data.into_iter().next().unwrap();
        let candidate = to_candidate(pin);
        assert_eq!(candidate.author.username, "cook");
        assert!(candidate.created_at.is_some());
        assert_eq!(candidate.media.len(), 1);

        let item = &candidate.media[0];
        assert_eq!(item.kind, MediaKind::Video);
        assert_eq!(item.variants.len(), 1);
        assert_eq!(item.variants[0].quality, QualityTier::P1080);
        assert_eq!(item.thumbnail.as_deref(), Some("https://i.pinimg.com/originals/p.jpg"));
    }

    #[test]
    fn test_image_pin() {
        let json = r#"{"data": [{"id": "1", "images": {"orig": {"url": "https://i.pinimg.com/originals/x.png", "width": 1000, "height": 1500}}}]}"#;
        let response: PinInfoResponse = serde_json::from_str(json).unwrap();
        let candidate = to_candidate(response.data.into_iter().next().unwrap());
        assert_eq!(candidate.media.len(), 1);
        assert_eq!(candidate.media[0].kind, MediaKind::Photo);
        assert_eq!(candidate.media[0].variants[0].resolution, "1000x1500");
        assert_eq!(candidate.media[0].variants[0].quality, QualityTier::Original);
    }
}
