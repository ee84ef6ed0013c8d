//! gNMI target configuration

use serde::{Deserialize, Serialize};

/// A gNMI target device
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    /// Name used in logs and reported errors
    pub name: String,

    /// gRPC endpoint (e.g., "clab-vxlan-srl1:57400")
    pub address: String,

    /// Authentication credentials
    #[serde(default)]
    pub credentials: Option<Credentials>,

    /// TLS configuration
    #[serde(default)]
    pub tls: TlsConfig,

    /// gNMI encoding for requests
    #[serde(default)]
    pub encoding: GnmiEncoding,
}

/// Authentication credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    /// Username for authentication
    pub username: String,

    /// Password for authentication
    pub password: String,
}

/// TLS configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TlsConfig {
    /// Enable TLS
    #[serde(default)]
    pub enabled: bool,

    /// Path to CA certificate file
    #[serde(default)]
    pub ca_cert: Option<String>,

    /// Path to client certificate file
    #[serde(default)]
    pub client_cert: Option<String>,

    /// Path to client key file
    #[serde(default)]
    pub client_key: Option<String>,
}

/// gNMI encoding format
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GnmiEncoding {
    /// JSON encoding
    Json,

    /// JSON with IETF formatting
    #[default]
    JsonIetf,

    /// Protocol Buffers
    Proto,

    /// ASCII text
    Ascii,
}

impl GnmiEncoding {
    /// Convert to gNMI proto encoding value
    pub fn to_proto(&self) -> i32 {
        match self {
            GnmiEncoding::Json => 0,
            GnmiEncoding::JsonIetf => 4,
            GnmiEncoding::Proto => 2,
            GnmiEncoding::Ascii => 3,
        }
    }
}
