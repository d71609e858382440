use reqwest::StatusCode;
use reqwest::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    ACCESS_CONTROL_EXPOSE_HEADERS, ACCESS_CONTROL_MAX_AGE, CONTENT_TYPE, HeaderMap, HeaderValue,
};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{error, warn};

use crate::core::AggregatedResult;
use crate::error::{MediaError, Result};

/// Permissive cross-origin headers attached to every response
pub fn cors_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type, Authorization, Range"),
    );
    headers.insert(
        ACCESS_CONTROL_EXPOSE_HEADERS,
        HeaderValue::from_static("Content-Length, Content-Range, Content-Disposition"),
    );
    headers.insert(ACCESS_CONTROL_MAX_AGE, HeaderValue::from_static("86400"));
    headers
}

#[derive(Serialize)]
struct SuccessBody<'a> {
    success: bool,
    #[serde(flatten)]
    result: &'a AggregatedResult,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    success: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
}

/// JSON envelope plus the HTTP status and headers it should travel with
#[derive(Debug, Clone)]
pub struct Response {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl Response {
    fn json(status: StatusCode, body: Value) -> Self {
        let mut headers = cors_headers();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Self {
            status,
            headers,
            body,
        }
    }

    pub fn success(result: &AggregatedResult) -> Self {
        match serde_json::to_value(SuccessBody {
            success: true,
            result,
        }) {
            Ok(body) => Self::json(StatusCode::OK, body),
            Err(e) => Self::failure(&MediaError::from(e)),
        }
    }

    pub fn failure(err: &MediaError) -> Self {
        let status = err.status();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(error = %err, "request failed");
        } else {
            warn!(error = %err, status = status.as_u16(), "request rejected");
        }
        let body = ErrorBody {
            success: false,
            error: err.public_message(),
            id: err.content_id(),
        };
        let body = serde_json::to_value(body).unwrap_or_else(
            |_| json!({ "success": false, "error": "Internal server error" }),
        );
        Self::json(status, body)
    }

    pub fn from_result(result: Result<AggregatedResult>) -> Self {
        match result {
            Ok(result) => Self::success(&result),
            Err(e) => Self::failure(&e),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Author, CandidateResult, MediaItem, MediaKind, SourceMethod, Variant};

    #[test]
    fn test_unavailable_echoes_id() {
        let err = MediaError::ContentUnavailable {
            id: "1234567890123".to_string(),
        };
        let response = Response::failure(&err);
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.body["success"], false);
        assert_eq!(response.body["id"], "1234567890123");
        assert!(
            response.body["error"]
                .as_str()
                .unwrap()
                .contains("unavailable")
        );
    }

    #[test]
    fn test_invalid_reference_is_bad_request() {
        let response = Response::failure(&MediaError::InvalidReference("nope".into()));
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert!(response.body.get("id").is_none());
    }

    #[test]
    fn test_internal_errors_stay_generic() {
        let response = Response::failure(&MediaError::ParseError("secret detail".into()));
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.body["error"], "Internal server error");
    }

    #[test]
    fn test_success_envelope() {
        let url = "https://pbs.twimg.com/media/p.jpg".to_string();
        let item = MediaItem::new(MediaKind::Photo, url.clone())
            .with_variants(vec![Variant::photo(url, "unknown".into())]);
        let candidate = CandidateResult {
            method: SourceMethod::FxTwitter,
            author: Author::new("Jack".into(), "jack".into(), String::new()),
            text: "hi".into(),
            created_at: None,
            media: vec![item],
        };
        let result = AggregatedResult::new("https://x.com/jack/status/1234567890123", "1234567890123", candidate);
        let response = Response::success(&result);

        assert!(response.is_success());
        assert_eq!(response.body["success"], true);
        assert_eq!(response.body["method"], "api_b");
        assert_eq!(response.body["media_count"], 1);
        assert_eq!(response.body["media"][0]["type"], "photo");
        assert!(response.body["created_at"].as_str().is_some());
        assert!(response.body["download_info"]["suggested_filenames"]["simple"].is_string());
        assert_eq!(response.headers.get(ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(), "*");
    }
}
