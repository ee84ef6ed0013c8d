//! Operational state reads
//!
//! Each read is a single Get RPC; the JSON subtree under the requested path
//! comes back as the first update of the first notification.

use std::net::Ipv4Addr;

use gnmi_client::{GnmiClient, Result};
use serde_json::Value;

use crate::provision::AGENT_NAME;

/// Path of the IMET routes accepted into the default network-instance's
/// EVPN RIB.
pub const IMET_ROUTES_PATH: &str =
    "/network-instance[name=default]/bgp-rib/evpn/rib-in-out/rib-in-post/imet-routes/valid-route";

/// Read the app-management state of the agent application.
pub async fn agent_status(client: &mut GnmiClient) -> Result<Value> {
    client
        .get_json(&format!(
            "/system/app-management/application[name={AGENT_NAME}]/state"
        ))
        .await
}

/// Read the state of one BGP neighbor in the given network-instance.
pub async fn bgp_neighbor(
    client: &mut GnmiClient,
    network_instance: &str,
    peer_address: Ipv4Addr,
) -> Result<Value> {
    client
        .get_json(&format!(
            "/network-instance[name={network_instance}]/protocols/bgp/neighbor[peer-address={peer_address}]"
        ))
        .await
}

/// List the route-distinguishers of all valid IMET routes in the EVPN RIB.
pub async fn evpn_imet_route_distinguishers(client: &mut GnmiClient) -> Result<Vec<String>> {
    let value = client.get_json(IMET_ROUTES_PATH).await?;
    Ok(route_distinguishers(&value))
}

/// Extract the route-distinguisher of every IMET route in the subtree
/// returned for [`IMET_ROUTES_PATH`].
pub fn route_distinguishers(value: &Value) -> Vec<String> {
    value
        .get("imet-routes")
        .and_then(Value::as_array)
        .map(|routes| {
            routes
                .iter()
                .filter_map(|route| route.get("route-distinguisher").and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_route_distinguishers() {
        let value = json!({
            "imet-routes": [
                {
                    "route-distinguisher": "1.1.1.1:242",
                    "ethernet-tag-id": 0,
                    "neighbor": "1.1.1.1"
                },
                {
                    "route-distinguisher": "1.1.1.4:242",
                    "ethernet-tag-id": 0,
                    "neighbor": "1.1.1.4"
                }
            ]
        });

        assert_eq!(
            route_distinguishers(&value),
            vec!["1.1.1.1:242".to_string(), "1.1.1.4:242".to_string()]
        );
    }

    #[test]
    fn test_route_distinguishers_empty_rib() {
        assert!(route_distinguishers(&json!({})).is_empty());
        assert!(route_distinguishers(&json!({ "imet-routes": [] })).is_empty());
    }

    #[test]
    fn test_route_distinguishers_skips_malformed_entries() {
        let value = json!({
            "imet-routes": [
                { "ethernet-tag-id": 0 },
                { "route-distinguisher": "1.1.1.1:7" }
            ]
        });

        assert_eq!(route_distinguishers(&value), vec!["1.1.1.1:7".to_string()]);
    }
}
