use async_trait::async_trait;
use indexmap::{IndexMap, IndexSet};
use regex::Regex;
use tracing::debug;

use crate::config::Config;
use crate::core::{Author, CandidateResult, MediaItem, MediaKind, SourceMethod, Variant};
use crate::download::{download_text_with_headers, html_headers};
use crate::error::{MediaError, Result};
use crate::quality::{UNKNOWN_RESOLUTION, resolution_from_url};
use crate::rank::rank_media;
use crate::twitter::merge::TweetSource;

// Query strings stop at anything that ends a URL inside markup or JSON.
const QUERY: &str = r#"(?:\?[^"'\s\\<>]*)?"#;

/// Last-resort scan of the tweet page for MP4 assets
#[derive(Debug, Clone)]
pub struct PageScanSource {
    config: Config,
}

impl PageScanSource {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    async fn try_fetch(&self, id: &str) -> Result<CandidateResult> {
        let base = self.config.twitter_page_base.trim_end_matches('/');
        let url = format!("{base}/i/status/{id}");
        let html = download_text_with_headers(&url, html_headers(), &self.config).await?;

        let media = scan_media(&html)?;
        if media.is_empty() {
            return Err(MediaError::ContentUnavailable { id: id.to_string() });
        }
        Ok(CandidateResult {
            method: SourceMethod::PageScan,
            author: Author::unknown(),
            text: String::new(),
            created_at: None,
            media,
        })
    }
}

#[async_trait]
impl TweetSource for PageScanSource {
    fn method(&self) -> SourceMethod {
        SourceMethod::PageScan
    }

    async fn fetch(&self, id: &str) -> Option<CandidateResult> {
        self.try_fetch(id)
            .await
            .inspect_err(|e| debug!(id, error = %e, "page scan gave up"))
            .ok()
    }
}

/// Locator shapes on the video CDN. Capture 1 is the grouping token.
fn patterns() -> Result<Vec<(Regex, MediaKind)>> {
    Ok(vec![
        (
            Regex::new(&format!(
                r"https://video\.twimg\.com/ext_tw_video/(\d+)/p[ur]/vid/(?:avc1/)?(?:\d+x\d+/)?[\w-]+\.mp4{QUERY}"
            ))?,
            MediaKind::Video,
        ),
        (
            Regex::new(&format!(
                r"https://video\.twimg\.com/amplify_video/(\d+)/vid/(?:avc1/)?(?:\d+x\d+/)?[\w-]+\.mp4{QUERY}"
            ))?,
            MediaKind::Video,
        ),
        (
            Regex::new(&format!(
                r"https://video\.twimg\.com/tweet_video/([\w-]+)\.mp4{QUERY}"
            ))?,
            MediaKind::Gif,
        ),
    ])
}

/// Find every MP4 locator in the markup, grouped per video, each group ranked
pub fn scan_media(html: &str) -> Result<Vec<MediaItem>> {
    let html = html.replace("\\/", "/").replace("\\u002F", "/");

    let mut seen: IndexSet<String> = IndexSet::new();
    let mut groups: IndexMap<String, (MediaKind, Vec<String>)> = IndexMap::new();

    for (re, kind) in patterns()? {
        for caps in re.captures_iter(&html) {
            let (Some(full), Some(group)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let url = full.as_str().to_string();
            if !seen.insert(url.clone()) {
                continue;
            }
            groups
                .entry(group.as_str().to_string())
                .or_insert_with(|| (kind, Vec::new()))
                .1
                .push(url);
        }
    }

    let media = groups
        .into_values()
        .filter_map(|(kind, urls)| {
            let first = urls.first()?.clone();
            let variants = urls
                .into_iter()
                .map(|url| {
                    let resolution = resolution_from_url(&url)
                        .map(|r| r.label())
                        .unwrap_or_else(|| UNKNOWN_RESOLUTION.to_string());
                    Variant::video(url, resolution)
                })
                .collect();
            let mut item = MediaItem::new(kind, first).with_variants(variants);
            rank_media(&mut item);
            Some(item)
        })
        .collect();

    Ok(media)
}
