use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::error::{MediaError, Result};

/// Initialize HTTP client from the runtime configuration
pub fn http_client(config: &Config) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .timeout(config.timeout)
        .connect_timeout(config.connect_timeout)
        .build()?;
    Ok(client)
}

/// Get default headers for requests
pub fn default_headers(config: &Config) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_str(&config.user_agent)?);
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    Ok(headers)
}

/// Headers for fetching full HTML pages
pub fn html_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert("Upgrade-Insecure-Requests", HeaderValue::from_static("1"));
    headers
}

/// Create custom headers with additional values
fn create_custom_headers(config: &Config, additional_headers: HeaderMap) -> Result<HeaderMap> {
    let mut headers = default_headers(config)?;
    headers.extend(additional_headers);
    Ok(headers)
}

/// Execute HTTP request with error handling
async fn execute_request(
    config: &Config,
    method: reqwest::Method,
    url: &str,
    headers: HeaderMap,
) -> Result<reqwest::Response> {
    let client = http_client(config)?;
    let request_headers = create_custom_headers(config, headers)?;
    let request = client.request(method, url).headers(request_headers);

    let response = request.send().await.map_err(|e| {
        if e.is_timeout() {
            MediaError::RequestTimeout(url.to_string())
        } else {
            MediaError::NetworkError(e)
        }
    })?;

    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(MediaError::HttpError {
            status: status.as_u16(),
            url: url.to_string(),
        })
    }
}

/// Download and parse JSON response with custom headers
pub async fn download_json_with_headers<T: DeserializeOwned>(
    url: &str,
    headers: HeaderMap,
    config: &Config,
) -> Result<T> {
    let response = execute_request(config, reqwest::Method::GET, url, headers).await?;
    response.json::<T>().await.map_err(MediaError::from)
}

/// Download text content from URL with custom headers
pub async fn download_text_with_headers(
    url: &str,
    headers: HeaderMap,
    config: &Config,
) -> Result<String> {
    let response = execute_request(config, reqwest::Method::GET, url, headers).await?;
    response.text().await.map_err(MediaError::from)
}

/// Get HTTP response from URL with custom headers
pub async fn get_response_with_headers(
    url: &str,
    headers: HeaderMap,
    config: &Config,
) -> Result<reqwest::Response> {
    execute_request(config, reqwest::Method::GET, url, headers).await
}
