//! Lab tool configuration

use std::path::Path;

use gnmi_client::TargetConfig;
use serde::{Deserialize, Serialize};

/// Top-level configuration for the lab tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabConfig {
    /// The gNMI target to provision
    pub target: TargetConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl LabConfig {
    /// Load configuration from a JSON5 file
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = json5::from_str(&content)?;
        Ok(config)
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable text format (default).
    #[default]
    Text,
    /// Structured JSON format.
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log output format: "text" or "json".
    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_config() {
        let json5_text = r#"{
            target: {
                name: "srl2",
                address: "clab-vxlan-srl2:57400",
                credentials: { username: "admin", password: "admin" },
                tls: { enabled: true, ca_cert: "/ca/srl2/srl2.pem" },
            },
            logging: { level: "debug" },
        }"#;

        let config: LabConfig = json5::from_str(json5_text).unwrap();
        assert_eq!(config.target.name, "srl2");
        assert!(config.target.tls.enabled);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Text);
    }

    #[test]
    fn test_logging_defaults() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert_eq!(config.format, LogFormat::Text);
    }
}
