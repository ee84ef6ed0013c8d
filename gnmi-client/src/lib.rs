//! Thin gNMI (gRPC Network Management Interface) client.
//!
//! Wraps the tonic-generated gNMI stubs with just enough convenience for
//! interactive device provisioning: TLS transport, username/password
//! metadata, JSON_IETF `Get`/`Set`, and path string conversion.

pub mod client;
pub mod config;
pub mod error;
pub mod path;

// Include the generated protobuf code
pub mod gnmi_ext {
    tonic::include_proto!("gnmi_ext");
}

pub mod gnmi {
    tonic::include_proto!("gnmi");
}

pub use client::GnmiClient;
pub use config::{Credentials, GnmiEncoding, TargetConfig, TlsConfig};
pub use error::{Error, Result};
