use crate::api::PoemRequest;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    pub base_url: String,
    pub health_timeout_secs: u64,
    pub generate_timeout_secs: u64,
    /// Exit non-zero when any check fails. Off by default.
    pub fail_on_error: bool,
    pub logs: LogsConfig,
    pub fixtures: Vec<PoemRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            health_timeout_secs: default_health_timeout_secs(),
            generate_timeout_secs: default_generate_timeout_secs(),
            fail_on_error: false,
            logs: LogsConfig::default(),
            fixtures: PoemRequest::default_fixtures(),
        }
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8001/api".to_string()
}

fn default_health_timeout_secs() -> u64 {
    5
}

fn default_generate_timeout_secs() -> u64 {
    30
}

fn default_log_level() -> String {
    "warn".to_string()
}
