use chrono::{DateTime, Utc};
use regex::Regex;
use url::Url;

use crate::error::{MediaError, Result};

const TWITTER_DOMAINS: &[&str] = &[
    "twitter.com",
    "www.twitter.com",
    "mobile.twitter.com",
    "x.com",
    "www.x.com",
    "fxtwitter.com",
    "vxtwitter.com",
    "fixupx.com",
];

/// A bare tweet id: nothing but digits, at least ten of them
pub fn is_valid_tweet_id(id: &str) -> bool {
    id.len() >= 10 && id.chars().all(|c| c.is_ascii_digit())
}

/// Parse the tweet id out of a status URL or a bare id
pub fn parse_id(reference: &str) -> Result<String> {
    let reference = reference.trim();
    if is_valid_tweet_id(reference) {
        return Ok(reference.to_string());
    }

    let status_re = Regex::new(r"/status(?:es)?/(\d{10,})")?;
    if let Some(id) = status_re.captures(reference).and_then(|c| c.get(1)) {
        return Ok(id.as_str().to_string());
    }

    let digits_re = Regex::new(r"\d{10,}")?;
    digits_re
        .find(reference)
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| MediaError::InvalidReference(reference.to_string()))
}

/// Check if URL is a Twitter/X link
pub fn is_twitter_url(url: &str) -> bool {
    if is_valid_tweet_id(url.trim()) {
        return true;
    }

    if let Ok(parsed) = Url::parse(url)
        && let Some(domain) = parsed.domain()
    {
        return TWITTER_DOMAINS.contains(&domain);
    }

    false
}

/// Accepts RFC 3339 and the classic `Wed Oct 10 20:19:24 +0000 2018` form
pub fn parse_created_at(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    DateTime::parse_from_str(raw, "%a %b %d %H:%M:%S %z %Y")
        .ok()
        .map(|ts| ts.with_timezone(&Utc))
}

/// Token expected by the syndication endpoint: `(id / 1e15) * PI` in base 36,
/// with zeros and the radix point stripped.
pub fn syndication_token(id: &str) -> String {
    let Ok(n) = id.parse::<f64>() else {
        return "a".to_string();
    };
    let value = (n / 1e15) * std::f64::consts::PI;
    to_base36(value)
        .chars()
        .filter(|c| *c != '0' && *c != '.')
        .collect()
}

fn to_base36(value: f64) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut int_part = value.trunc() as u64;
    let mut frac = value.fract();

    let mut int_digits = Vec::new();
    loop {
        int_digits.push(DIGITS[(int_part % 36) as usize] as char);
        int_part /= 36;
        if int_part == 0 {
            break;
        }
    }
    let mut out: String = int_digits.into_iter().rev().collect();

    if frac > 0.0 {
        out.push('.');
        for _ in 0..11 {
            frac *= 36.0;
            let digit = frac.trunc() as usize;
            out.push(DIGITS[digit.min(35)] as char);
            frac = frac.fract();
            if frac == 0.0 {
                break;
            }
        }
    }
    out
}
