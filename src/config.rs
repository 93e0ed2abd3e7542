use serde::{Deserialize, Serialize};

use crate::module::league::fetcher::DEFAULT_USER_AGENT;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Allow any origin on the API; the mirror is meant to feed club
    /// websites hosted elsewhere.
    #[serde(default = "default_enable_cors")]
    pub enable_cors: bool,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_calendar_url")]
    pub calendar_url: String,

    #[serde(default = "default_ranking_url")]
    pub ranking_url: String,

    /// "static", "rendered" or "auto" (static first, browser fallback)
    #[serde(default = "default_fetch_strategy")]
    pub fetch_strategy: String,

    #[serde(default = "default_update_interval_minutes")]
    pub update_interval_minutes: u64,

    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,

    /// Hard deadline for one headless-browser fetch
    #[serde(default = "default_browser_timeout_secs")]
    pub browser_timeout_secs: u64,

    /// Extra wait after navigation for late XHR content
    #[serde(default = "default_browser_settle_secs")]
    pub browser_settle_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_enable_cors() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_calendar_url() -> String {
    "https://rolskanet.fr/sportif/synthese/rencontres/RH".to_string()
}

fn default_ranking_url() -> String {
    "https://rolskanet.fr/sportif/synthese/classements/RH".to_string()
}

fn default_fetch_strategy() -> String {
    "auto".to_string()
}

fn default_update_interval_minutes() -> u64 {
    30
}

fn default_http_timeout_secs() -> u64 {
    30
}

fn default_browser_timeout_secs() -> u64 {
    60
}

fn default_browser_settle_secs() -> u64 {
    3
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            enable_cors: default_enable_cors(),
            log_level: default_log_level(),
            calendar_url: default_calendar_url(),
            ranking_url: default_ranking_url(),
            fetch_strategy: default_fetch_strategy(),
            update_interval_minutes: default_update_interval_minutes(),
            http_timeout_secs: default_http_timeout_secs(),
            browser_timeout_secs: default_browser_timeout_secs(),
            browser_settle_secs: default_browser_settle_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config file '{}': {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config file: {}", e))?;

        Ok(config)
    }

    /// Load the config file, falling back to defaults when it is absent.
    pub fn load_or_default(path: &str) -> anyhow::Result<Self> {
        if std::path::Path::new(path).exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
