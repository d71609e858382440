use serde::{Deserialize, Serialize};

// Syndication `tweet-result` payload. Every field is optional; the service
// drops whole sections depending on the tweet.

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SyndicationTweet {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub user: Option<SyndicationUser>,
    #[serde(default)]
    pub photos: Vec<SyndicationPhoto>,
    #[serde(default)]
    pub video: Option<SyndicationVideo>,
    #[serde(rename = "mediaDetails", default)]
    pub media_details: Vec<MediaDetail>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SyndicationUser {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub screen_name: String,
    #[serde(default)]
    pub profile_image_url_https: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyndicationPhoto {
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SyndicationVideo {
    #[serde(default)]
    pub poster: Option<String>,
    #[serde(default)]
    pub variants: Vec<SyndicationVariant>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyndicationVariant {
    #[serde(rename = "type", default)]
    pub content_type: String,
    pub src: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaDetail {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub media_url_https: Option<String>,
    #[serde(default)]
    pub original_info: Option<OriginalInfo>,
    #[serde(default)]
    pub video_info: Option<VideoInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OriginalInfo {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct VideoInfo {
    #[serde(default)]
    pub variants: Vec<VideoInfoVariant>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoInfoVariant {
    #[serde(default)]
    pub bitrate: Option<u64>,
    #[serde(default)]
    pub content_type: String,
    pub url: String,
}

// fxtwitter-style status payload

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FxResponse {
    #[serde(default)]
    pub code: Option<u16>,
    #[serde(default)]
    pub tweet: Option<FxTweet>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FxTweet {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub created_timestamp: Option<i64>,
    #[serde(default)]
    pub author: Option<FxAuthor>,
    #[serde(default)]
    pub media: Option<FxMedia>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FxAuthor {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub screen_name: String,
    #[serde(default)]
    pub avatar_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FxMedia {
    #[serde(default)]
    pub photos: Vec<FxPhoto>,
    #[serde(default)]
    pub videos: Vec<FxVideo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FxPhoto {
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FxVideo {
    pub url: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub format: Option<String>,
}
