use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TikwmResponse {
    pub code: i64,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub data: Option<TikwmData>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TikwmData {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub cover: Option<String>,
    #[serde(default)]
    pub play: Option<String>,
    #[serde(default)]
    pub hdplay: Option<String>,
    #[serde(default)]
    pub create_time: Option<i64>,
    #[serde(default)]
    pub author: Option<TikwmAuthor>,
    /// Present on photo slideshows
    #[serde(default)]
    pub images: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TikwmAuthor {
    #[serde(default)]
    pub unique_id: String,
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub avatar: String,
}
