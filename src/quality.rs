use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Sentinel label for renditions whose dimensions could not be determined
pub const UNKNOWN_RESOLUTION: &str = "unknown";

/// Parsed `WxH` label. Zero-area when the label is missing or malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Parse a `WxH` label. Never fails.
    pub fn parse(label: &str) -> Self {
        if label.is_empty() || label == UNKNOWN_RESOLUTION {
            return Self::default();
        }
        let mut parts = label.split('x');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(w), Some(h), None) => match (w.trim().parse(), h.trim().parse()) {
                (Ok(width), Ok(height)) => Self { width, height },
                _ => Self::default(),
            },
            _ => Self::default(),
        }
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub fn is_zero(&self) -> bool {
        self.area() == 0
    }

    /// `WxH`, or `unknown` for zero-area resolutions
    pub fn label(&self) -> String {
        if self.is_zero() {
            UNKNOWN_RESOLUTION.to_string()
        } else {
            format!("{}x{}", self.width, self.height)
        }
    }
}

/// Coarse quality label derived from a resolution
#[derive(
    EnumIter,
    Display,
    EnumString,
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    Hash,
    Default,
)]
pub enum QualityTier {
    #[strum(serialize = "4K")]
    #[serde(rename = "4K")]
    Uhd,
    #[strum(serialize = "1440p")]
    #[serde(rename = "1440p")]
    P1440,
    #[strum(serialize = "1080p")]
    #[serde(rename = "1080p")]
    P1080,
    #[strum(serialize = "720p")]
    #[serde(rename = "720p")]
    P720,
    #[strum(serialize = "480p")]
    #[serde(rename = "480p")]
    P480,
    #[strum(serialize = "360p")]
    #[serde(rename = "360p")]
    P360,
    /// Photos are served as-is
    #[strum(serialize = "original")]
    #[serde(rename = "original")]
    Original,
    #[default]
    #[strum(serialize = "unknown")]
    #[serde(rename = "unknown")]
    Unknown,
}

impl QualityTier {
    /// Position in the fixed tier table, higher is better
    pub fn rank(&self) -> u8 {
        match self {
            QualityTier::Uhd => 6,
            QualityTier::P1440 => 5,
            QualityTier::P1080 => 4,
            QualityTier::P720 => 3,
            QualityTier::P480 => 2,
            QualityTier::P360 => 1,
            QualityTier::Original | QualityTier::Unknown => 0,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, QualityTier::Unknown)
    }

    /// Classify a `WxH` label
    pub fn from_label(label: &str) -> Self {
        match label {
            "480x270" => return QualityTier::P480,
            "640x360" => return QualityTier::P360,
            "854x480" => return QualityTier::P480,
            "1280x720" => return QualityTier::P720,
            "1920x1080" => return QualityTier::P1080,
            "2560x1440" => return QualityTier::P1440,
            "3840x2160" => return QualityTier::Uhd,
            _ => {}
        }
        Self::from_resolution(Resolution::parse(label))
    }

    pub fn from_resolution(res: Resolution) -> Self {
        let Resolution { width, height } = res;
        if width >= 3840 || height >= 2160 {
            QualityTier::Uhd
        } else if width >= 2560 || height >= 1440 {
            QualityTier::P1440
        } else if width >= 1920 || height >= 1080 {
            QualityTier::P1080
        } else if width >= 1280 || height >= 720 {
            QualityTier::P720
        } else if width >= 854 || height >= 480 {
            QualityTier::P480
        } else if width >= 640 || height >= 360 {
            QualityTier::P360
        } else {
            QualityTier::Unknown
        }
    }
}

/// Pull the `WxH` path segment out of a CDN rendition URL
pub fn resolution_from_url(url: &str) -> Option<Resolution> {
    url.split(['/', '?'])
        .map(Resolution::parse)
        .find(|r| !r.is_zero())
}
