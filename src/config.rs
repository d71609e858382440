use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/143.0.0.0 Safari/537.36";

/// Runtime settings shared by every extractor.
///
/// Built once per process (or per request) and passed down by reference.
#[derive(Debug, Clone)]
pub struct Config {
    pub user_agent: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Structured tweet metadata service (source A)
    pub syndication_base: String,
    /// Alternate structured tweet service (source B)
    pub fxtwitter_base: String,
    /// Canonical tweet page host (source C)
    pub twitter_page_base: String,
    pub tiktok_api_base: String,
    pub pinterest_api_base: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            syndication_base: "https://cdn.syndication.twimg.com".to_string(),
            fxtwitter_base: "https://api.fxtwitter.com".to_string(),
            twitter_page_base: "https://x.com".to_string(),
            tiktok_api_base: "https://www.tikwm.com".to_string(),
            pinterest_api_base: "https://widgets.pinterest.com".to_string(),
        }
    }
}

impl Config {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }
}
