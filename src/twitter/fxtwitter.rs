use async_trait::async_trait;
use chrono::DateTime;
use reqwest::header::HeaderMap;
use tracing::debug;

use crate::config::Config;
use crate::core::{Author, CandidateResult, MediaItem, MediaKind, SourceMethod, Variant};
use crate::download::download_json_with_headers;
use crate::error::{MediaError, Result};
use crate::twitter::merge::TweetSource;
use crate::twitter::types::{FxResponse, FxTweet};
use crate::twitter::utils::parse_created_at;

/// Alternate structured tweet service
#[derive(Debug, Clone)]
pub struct FxTwitterSource {
    config: Config,
}

impl FxTwitterSource {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    async fn try_fetch(&self, id: &str) -> Result<CandidateResult> {
        let base = self.config.fxtwitter_base.trim_end_matches('/');
        let url = format!("{base}/status/{id}");
        let response: FxResponse =
            download_json_with_headers(&url, HeaderMap::new(), &self.config).await?;

        if let Some(code) = response.code
            && code != 200
        {
            return Err(MediaError::HttpError { status: code, url });
        }
        let tweet = response
            .tweet
            .ok_or_else(|| MediaError::ParseError("missing tweet".to_string()))?;
        Ok(to_candidate(tweet))
    }
}

#[async_trait]
impl TweetSource for FxTwitterSource {
    fn method(&self) -> SourceMethod {
        SourceMethod::FxTwitter
    }

    async fn fetch(&self, id: &str) -> Option<CandidateResult> {
        self.try_fetch(id)
            .await
            .inspect_err(|e| debug!(id, error = %e, "fxtwitter source gave up"))
            .ok()
    }
}

pub fn to_candidate(tweet: FxTweet) -> CandidateResult {
    let author = tweet
        .author
        .as_ref()
        .map(|a| Author::new(a.name.clone(), a.screen_name.clone(), a.avatar_url.clone()))
        .unwrap_or_else(Author::unknown);

    let created_at = tweet
        .created_at
        .as_deref()
        .and_then(parse_created_at)
        .or_else(|| {
            tweet
                .created_timestamp
                .and_then(|ts| DateTime::from_timestamp(ts, 0))
        });

    let mut media = Vec::new();
    if let Some(fx_media) = &tweet.media {
        for photo in &fx_media.photos {
            let mut item = MediaItem::new(MediaKind::Photo, photo.url.clone());
            if let (Some(w), Some(h)) = (photo.width, photo.height) {
                item = item.with_dimensions(w, h);
            }
            let variant = Variant::photo(photo.url.clone(), item.resolution_label());
            media.push(item.with_variants(vec![variant]));
        }

        for video in &fx_media.videos {
            let kind = match video.kind.as_deref() {
                Some("gif") => MediaKind::Gif,
                _ => MediaKind::Video,
            };
            let mut item = MediaItem::new(kind, video.url.clone());
            if let (Some(w), Some(h)) = (video.width, video.height) {
                item = item.with_dimensions(w, h);
            }
            if let Some(thumb) = &video.thumbnail_url {
                item = item.with_thumbnail(thumb.clone());
            }
            let mut variant = Variant::video(video.url.clone(), item.resolution_label());
            if let Some(format) = &video.format {
                variant = variant.with_content_type(format.clone());
            }
            media.push(item.with_variants(vec![variant]));
        }
    }

    CandidateResult {
        method: SourceMethod::FxTwitter,
        author,
        text: tweet.text.unwrap_or_default(),
        created_at,
        media,
    }
}
