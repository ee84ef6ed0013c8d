//! gNMI session handling
//!
//! One channel is opened per `GnmiClient` and reused for every RPC the
//! process issues. Credentials travel as per-request `username`/`password`
//! metadata, which is what SR Linux and most gNMI targets expect.

use tonic::Request;
use tonic::transport::{Certificate, Channel, ClientTlsConfig, Endpoint, Identity};
use tracing::{debug, info};

use crate::config::{Credentials, GnmiEncoding, TargetConfig};
use crate::error::{Error, Result};
use crate::gnmi::{
    CapabilityRequest, CapabilityResponse, GetRequest, GetResponse, SetRequest, SetResponse,
    TypedValue, Update, g_nmi_client::GNmiClient, typed_value::Value,
};
use crate::path;

/// A connected gNMI client session.
pub struct GnmiClient {
    inner: GNmiClient<Channel>,
    credentials: Option<Credentials>,
    encoding: GnmiEncoding,
    target_name: String,
}

impl GnmiClient {
    /// Connect to the target described by `config`.
    pub async fn connect(config: &TargetConfig) -> Result<Self> {
        let channel = open_channel(config).await?;
        info!("Connected to {} at {}", config.name, config.address);

        Ok(Self {
            inner: GNmiClient::new(channel),
            credentials: config.credentials.clone(),
            encoding: config.encoding,
            target_name: config.name.clone(),
        })
    }

    /// Retrieve the capabilities reported by the target.
    pub async fn capabilities(&mut self) -> Result<CapabilityResponse> {
        let request = self.request(CapabilityRequest::default())?;
        let response = self.inner.capabilities(request).await?;
        Ok(response.into_inner())
    }

    /// Get the value at a single path, decoded as JSON.
    ///
    /// Extracts the first update of the first notification, which is how a
    /// single-path Get comes back from the target.
    pub async fn get_json(&mut self, xpath: &str) -> Result<serde_json::Value> {
        debug!("Get {} from {}", xpath, self.target_name);

        let get = GetRequest {
            path: vec![path::parse(xpath)],
            encoding: self.encoding.to_proto(),
            ..Default::default()
        };
        let request = self.request(get)?;
        let response = self.inner.get(request).await?.into_inner();

        first_update_value(response, xpath)
    }

    /// Apply a list of `(path, JSON payload)` updates in a single Set RPC.
    pub async fn set_updates(
        &mut self,
        updates: &[(String, serde_json::Value)],
    ) -> Result<SetResponse> {
        let update = updates
            .iter()
            .map(|(xpath, payload)| {
                debug!("Set {} on {}", xpath, self.target_name);
                Ok(Update {
                    path: Some(path::parse(xpath)),
                    val: Some(TypedValue {
                        value: Some(encode_json_payload(self.encoding, payload)?),
                    }),
                    ..Default::default()
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let set = SetRequest {
            update,
            ..Default::default()
        };
        let request = self.request(set)?;
        let response = self.inner.set(request).await?;
        Ok(response.into_inner())
    }

    /// Delete a list of paths in a single Set RPC.
    pub async fn set_deletes(&mut self, paths: &[String]) -> Result<SetResponse> {
        let delete = paths
            .iter()
            .map(|xpath| {
                debug!("Delete {} on {}", xpath, self.target_name);
                path::parse(xpath)
            })
            .collect();

        let set = SetRequest {
            delete,
            ..Default::default()
        };
        let request = self.request(set)?;
        let response = self.inner.set(request).await?;
        Ok(response.into_inner())
    }

    fn request<T>(&self, message: T) -> Result<Request<T>> {
        let mut request = Request::new(message);
        if let Some(ref creds) = self.credentials {
            request
                .metadata_mut()
                .insert("username", creds.username.parse()?);
            request
                .metadata_mut()
                .insert("password", creds.password.parse()?);
        }
        Ok(request)
    }
}

async fn open_channel(config: &TargetConfig) -> Result<Channel> {
    let scheme = if config.tls.enabled { "https" } else { "http" };
    let uri = format!("{}://{}", scheme, config.address);

    let mut endpoint = Endpoint::from_shared(uri)?;

    if config.tls.enabled {
        let mut tls_config = ClientTlsConfig::new();

        if let Some(ref ca_cert_path) = config.tls.ca_cert {
            let ca_cert = tokio::fs::read(ca_cert_path).await?;
            tls_config = tls_config.ca_certificate(Certificate::from_pem(ca_cert));
        }

        if let (Some(cert_path), Some(key_path)) = (&config.tls.client_cert, &config.tls.client_key)
        {
            let cert = tokio::fs::read(cert_path).await?;
            let key = tokio::fs::read(key_path).await?;
            tls_config = tls_config.identity(Identity::from_pem(cert, key));
        }

        endpoint = endpoint.tls_config(tls_config)?;
    }

    let channel = endpoint.connect().await?;
    Ok(channel)
}

fn encode_json_payload(encoding: GnmiEncoding, payload: &serde_json::Value) -> Result<Value> {
    let bytes = serde_json::to_vec(payload)?;
    Ok(match encoding {
        GnmiEncoding::Json => Value::JsonVal(bytes),
        // JSON_IETF for everything else; Set payloads here are always JSON.
        _ => Value::JsonIetfVal(bytes),
    })
}

fn first_update_value(response: GetResponse, xpath: &str) -> Result<serde_json::Value> {
    let update = response
        .notification
        .into_iter()
        .next()
        .and_then(|n| n.update.into_iter().next())
        .ok_or_else(|| Error::EmptyResponse {
            path: xpath.to_string(),
        })?;

    let val = update.val.ok_or_else(|| Error::EmptyResponse {
        path: xpath.to_string(),
    })?;

    decode_typed_value(val, xpath)
}

fn decode_typed_value(val: TypedValue, xpath: &str) -> Result<serde_json::Value> {
    match val.value {
        Some(Value::JsonIetfVal(bytes) | Value::JsonVal(bytes)) => {
            Ok(serde_json::from_slice(&bytes)?)
        }
        Some(Value::StringVal(s) | Value::AsciiVal(s)) => Ok(serde_json::Value::String(s)),
        Some(Value::IntVal(i)) => Ok(serde_json::Value::from(i)),
        Some(Value::UintVal(u)) => Ok(serde_json::Value::from(u)),
        Some(Value::BoolVal(b)) => Ok(serde_json::Value::Bool(b)),
        _ => Err(Error::NotJson {
            path: xpath.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gnmi::Notification;
    use serde_json::json;

    fn json_ietf_response(payload: &serde_json::Value) -> GetResponse {
        GetResponse {
            notification: vec![Notification {
                update: vec![Update {
                    path: Some(path::parse("/system/state")),
                    val: Some(TypedValue {
                        value: Some(Value::JsonIetfVal(serde_json::to_vec(payload).unwrap())),
                    }),
                    ..Default::default()
                }],
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_first_update_value_json_ietf() {
        let payload = json!({"oper-state": "running", "pid": 4242});
        let response = json_ietf_response(&payload);

        let value = first_update_value(response, "/system/state").unwrap();
        assert_eq!(value, payload);
    }

    #[test]
    fn test_first_update_value_empty() {
        let response = GetResponse::default();
        let err = first_update_value(response, "/system/state").unwrap_err();
        assert!(matches!(err, Error::EmptyResponse { .. }));
    }

    #[test]
    fn test_decode_scalar_values() {
        let val = TypedValue {
            value: Some(Value::StringVal("established".to_string())),
        };
        assert_eq!(
            decode_typed_value(val, "/x").unwrap(),
            json!("established")
        );

        let val = TypedValue {
            value: Some(Value::UintVal(65000)),
        };
        assert_eq!(decode_typed_value(val, "/x").unwrap(), json!(65000));
    }

    #[test]
    fn test_decode_rejects_binary() {
        let val = TypedValue {
            value: Some(Value::BytesVal(vec![0xde, 0xad])),
        };
        let err = decode_typed_value(val, "/x").unwrap_err();
        assert!(matches!(err, Error::NotJson { .. }));
    }

    #[test]
    fn test_encode_json_payload_encoding() {
        let payload = json!({"admin-state": "enable"});

        match encode_json_payload(GnmiEncoding::JsonIetf, &payload).unwrap() {
            Value::JsonIetfVal(bytes) => {
                assert_eq!(serde_json::from_slice::<serde_json::Value>(&bytes).unwrap(), payload)
            }
            other => panic!("unexpected value: {:?}", other),
        }

        match encode_json_payload(GnmiEncoding::Json, &payload).unwrap() {
            Value::JsonVal(_) => {}
            other => panic!("unexpected value: {:?}", other),
        }
    }
}
