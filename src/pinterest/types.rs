use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PinInfoResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub data: Vec<Pin>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Pin {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub pinner: Option<Pinner>,
    /// Keyed by size name: `237x`, `564x`, `orig`, ...
    #[serde(default)]
    pub images: IndexMap<String, PinImage>,
    #[serde(default)]
    pub videos: Option<PinVideos>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Pinner {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub image_small_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PinImage {
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PinVideos {
    /// Keyed by rendition name: `V_720P`, `V_HLSV4`, ...
    #[serde(default)]
    pub video_list: IndexMap<String, PinVideo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PinVideo {
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub thumbnail: Option<String>,
}
