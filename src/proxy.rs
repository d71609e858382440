use reqwest::header::{
    ACCEPT, CONTENT_DISPOSITION, CONTENT_LENGTH, CONTENT_TYPE, HeaderMap, HeaderValue,
};
use tracing::debug;
use url::Url;

use crate::config::Config;
use crate::download::get_response_with_headers;
use crate::error::{MediaError, Result};
use crate::response::cors_headers;

/// Media body fetched on behalf of a caller, ready to be re-served
#[derive(Debug, Clone)]
pub struct ProxiedMedia {
    pub content_type: String,
    pub headers: HeaderMap,
    pub bytes: Vec<u8>,
}

/// Content type implied by the URL path's extension
pub fn guess_content_type(url: &str) -> Option<&'static str> {
    let path = Url::parse(url).ok()?.path().to_ascii_lowercase();
    let ext = path.rsplit_once('.')?.1;
    match ext {
        "mp4" => Some("video/mp4"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

/// `attachment; filename="..."` with characters that would break the quoting removed
pub fn content_disposition(filename: &str) -> Result<HeaderValue> {
    let cleaned: String = sanitize_filename::sanitize(filename)
        .chars()
        .filter(|c| *c != '"' && !c.is_control())
        .collect();
    let value = format!("attachment; filename=\"{cleaned}\"");
    Ok(HeaderValue::from_str(&value)?)
}

fn validate(url: &str) -> Result<Url> {
    let parsed = Url::parse(url).map_err(|_| MediaError::InvalidUrl(url.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        _ => Err(MediaError::InvalidUrl(url.to_string())),
    }
}

/// Fetch `url` and wrap its bytes with permissive CORS headers
pub async fn proxy_media(
    url: &str,
    filename: Option<&str>,
    config: &Config,
) -> Result<ProxiedMedia> {
    let parsed = validate(url)?;

    let mut request_headers = HeaderMap::new();
    request_headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
    let response = get_response_with_headers(parsed.as_str(), request_headers, config).await?;

    let upstream_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty() && *v != "application/octet-stream")
        .map(str::to_string);
    let content_type = upstream_type
        .or_else(|| guess_content_type(url).map(str::to_string))
        .unwrap_or_else(|| "application/octet-stream".to_string());

    let bytes = response.bytes().await?.to_vec();
    debug!(url, content_type = %content_type, len = bytes.len(), "proxied media");

    let mut headers = cors_headers();
    headers.insert(CONTENT_TYPE, HeaderValue::from_str(&content_type)?);
    headers.insert(CONTENT_LENGTH, HeaderValue::from(bytes.len()));
    if let Some(name) = filename.filter(|n| !n.is_empty()) {
        headers.insert(CONTENT_DISPOSITION, content_disposition(name)?);
    }

    Ok(ProxiedMedia {
        content_type,
        headers,
        bytes,
    })
}
