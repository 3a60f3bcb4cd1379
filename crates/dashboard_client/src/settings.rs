use std::time::Duration;

/// Local development backend; overridden by `DASHBOARD_API_URL`.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

const ENV_BASE_URL: &str = "DASHBOARD_API_URL";
const ENV_API_TOKEN: &str = "DASHBOARD_API_TOKEN";

/// Immutable process-wide client configuration, constructed once at startup.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    /// Attached as a bearer credential when present. Its absence does not
    /// block requests; the server is responsible for rejecting.
    pub api_token: Option<String>,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_token: None,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ClientSettings {
    /// Reads the environment once; empty variables count as unset.
    pub fn from_env() -> Self {
        let mut settings = Self::default();
        if let Ok(base_url) = std::env::var(ENV_BASE_URL) {
            if !base_url.is_empty() {
                settings.base_url = base_url;
            }
        }
        if let Ok(token) = std::env::var(ENV_API_TOKEN) {
            if !token.is_empty() {
                settings.api_token = Some(token);
            }
        }
        settings
    }
}
