use chrono::DateTime;
use regex::Regex;
use reqwest::header::HeaderMap;
use tracing::debug;
use url::Url;

use crate::config::Config;
use crate::core::{AggregatedResult, Author, CandidateResult, MediaItem, MediaKind, SourceMethod, Variant};
use crate::download::download_json_with_headers;
use crate::error::{MediaError, Result};
use crate::quality::UNKNOWN_RESOLUTION;
use crate::rank::rank_all;
use crate::tiktok::types::{TikwmData, TikwmResponse};

const TIKTOK_DOMAINS: &[&str] = &[
    "tiktok.com",
    "www.tiktok.com",
    "m.tiktok.com",
    "vm.tiktok.com",
    "vt.tiktok.com",
];

/// Check if URL is a TikTok link
pub fn is_tiktok_url(url: &str) -> bool {
    Url::parse(url)
        .ok()
        .and_then(|u| u.domain().map(|d| TIKTOK_DOMAINS.contains(&d)))
        .unwrap_or(false)
}

/// Post id from a full TikTok URL. Short links carry none.
pub fn parse_id(url: &str) -> Option<String> {
    let re = Regex::new(r"/(?:video|photo)/(\d+)").ok()?;
    re.captures(url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// The API hands out some play URLs relative to itself
fn absolutize(base: &str, url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("{}/{}", base.trim_end_matches('/'), url.trim_start_matches('/'))
    }
}

pub fn to_candidate(data: TikwmData, base: &str) -> CandidateResult {
    let author = data
        .author
        .as_ref()
        .map(|a| Author::new(a.nickname.clone(), a.unique_id.clone(), a.avatar.clone()))
        .unwrap_or_else(Author::unknown);

    let media = if !data.images.is_empty() {
        data.images
            .iter()
            .map(|img| {
                let url = absolutize(base, img);
                MediaItem::new(MediaKind::Photo, url.clone())
                    .with_variants(vec![Variant::photo(url, UNKNOWN_RESOLUTION.to_string())])
            })
            .collect()
    } else {
        let variants: Vec<Variant> = [&data.hdplay, &data.play]
            .into_iter()
            .flatten()
            .map(|u| Variant::video(absolutize(base, u), UNKNOWN_RESOLUTION.to_string()))
            .collect();
        match variants.first() {
            Some(first) => {
                let mut item = MediaItem::new(MediaKind::Video, first.url.clone());
                if let Some(cover) = &data.cover {
                    item = item.with_thumbnail(absolutize(base, cover));
                }
                vec![item.with_variants(variants)]
            }
            None => Vec::new(),
        }
    };

    CandidateResult {
        method: SourceMethod::Standard,
        author,
        text: data.title,
        created_at: data.create_time.and_then(|ts| DateTime::from_timestamp(ts, 0)),
        media,
    }
}

/// Resolve a TikTok post through the JSON API
pub async fn extract(url: &str, config: &Config) -> Result<AggregatedResult> {
    if !is_tiktok_url(url) {
        return Err(MediaError::InvalidUrl(url.to_string()));
    }
    let fallback_id = parse_id(url).unwrap_or_default();

    let base = config.tiktok_api_base.trim_end_matches('/');
    let api_url = format!("{base}/api/?url={}&hd=1", urlencoding::encode(url));
    let response: TikwmResponse =
        download_json_with_headers(&api_url, HeaderMap::new(), config).await?;

    let data = match response.data {
        Some(data) if response.code == 0 => data,
        _ => {
            debug!(code = response.code, msg = ?response.msg, "tiktok api returned no data");
            return Err(MediaError::ContentUnavailable { id: fallback_id });
        }
    };

    let id = if data.id.is_empty() { fallback_id } else { data.id.clone() };
    let mut candidate = to_candidate(data, base);
    if !candidate.has_media() {
        return Err(MediaError::ContentUnavailable { id });
    }
    candidate.media = rank_all(candidate.media);
    Ok(AggregatedResult::new(url, &id, candidate))
}
