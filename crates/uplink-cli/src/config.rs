use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};
use uplink_converter::TruncationPolicy;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServiceConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// File to read uplink documents from; stdin when unset
    #[serde(default)]
    pub input_path: Option<String>,

    /// Handling of payloads whose last known record is cut short
    #[serde(default)]
    pub truncation_policy: TruncationPolicy,

    /// Pretty-print envelopes instead of one per line
    #[serde(default)]
    pub pretty: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(Environment::with_prefix("UPLINK"))
            .build()?
            .try_deserialize()
    }
}
