//! Configuration for the backend connection.

/// Where hosted bots live unless configured otherwise.
pub const DEFAULT_BASE_URL: &str = "https://api.poe.com/bot";

/// Connection settings for hosted bot calls.
///
/// The access key is opaque: it is only forwarded as a bearer credential.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BackendConfig {
    /// Base URL; the bot name is appended as a path segment
    pub base_url: String,
    /// Credential sent with every call
    pub api_key: String,
}

impl BackendConfig {
    /// Create a configuration for the public endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
        }
    }

    /// Set the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Full URL for a bot.
    pub fn endpoint(&self, bot: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), bot)
    }
}

impl std::fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}
