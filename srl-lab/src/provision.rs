//! Configuration payload builders
//!
//! Each builder assembles the `(path, JSON payload)` pairs for one Set RPC
//! against the SR Linux schema. Builders are pure so the exact payloads sent
//! to the device can be asserted on in tests.

use std::net::Ipv4Addr;

use clap::ValueEnum;
use serde_json::{Value, json};

/// Application name of the vendor agent, as registered with app-management.
pub const AGENT_NAME: &str = "static-vxlan-agent";

/// BGP peer-group that carries the EVPN session towards the agent.
pub const BGP_GROUP: &str = "vxlan-agent";

/// One entry of a Set update list.
pub type PathUpdate = (String, Value);

/// SR Linux admin-state leaf values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum AdminState {
    #[default]
    Enable,
    Disable,
}

impl AdminState {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminState::Enable => "enable",
            AdminState::Disable => "disable",
        }
    }
}

/// Settings for the static-vxlan-agent protocol instance in the default
/// network-instance.
#[derive(Debug, Clone)]
pub struct AgentSettings {
    pub admin_state: AdminState,
    pub source_address: Ipv4Addr,
    pub peer_address: Ipv4Addr,
    pub peer_as: u32,
    pub local_as: u32,
}

/// Parameters for the BGP underlay that the agent peers over.
#[derive(Debug, Clone)]
pub struct BgpUnderlay {
    pub peer_address: Ipv4Addr,
    pub loopback_prefix: String,
    pub router_id: Ipv4Addr,
    pub autonomous_system: u32,
}

/// Parameters for a mac-vrf bound to a VXLAN tunnel.
#[derive(Debug, Clone)]
pub struct MacVrf {
    pub vlan: u32,
    pub evi: u32,
    pub vni: u32,
    pub access_interface: String,
}

/// Restart the agent application through the tools tree.
pub fn restart_agent() -> PathUpdate {
    (
        format!("/tools/system/app-management/application[name={AGENT_NAME}]"),
        json!({ "restart": "" }),
    )
}

/// Configure the static-vxlan-agent protocol instance.
pub fn agent_settings(settings: &AgentSettings) -> PathUpdate {
    (
        "/network-instance[name=default]/protocols/static-vxlan-agent".to_string(),
        json!({
            "admin-state": settings.admin_state.as_str(),
            "source-address": settings.source_address.to_string(),
            "peer-address": settings.peer_address.to_string(),
            "peer-as": settings.peer_as,
            "local-as": settings.local_as,
        }),
    )
}

/// Build the BGP underlay: loopback, its attachment to the default
/// network-instance, the EVPN route-reflector group, and the neighbor.
pub fn bgp_underlay(underlay: &BgpUnderlay) -> Vec<PathUpdate> {
    let router_id = underlay.router_id.to_string();
    let asn = underlay.autonomous_system.to_string();

    vec![
        (
            "/interface[name=lo0]".to_string(),
            json!({
                "admin-state": "enable",
                "subinterface": [{
                    "index": 0,
                    "admin-state": "enable",
                    "ipv4": {
                        "address": {
                            "ip-prefix": underlay.loopback_prefix.as_str()
                        }
                    }
                }]
            }),
        ),
        (
            "/network-instance[name=default]".to_string(),
            json!({
                "interface": {
                    "name": "lo0.0"
                }
            }),
        ),
        (
            "/network-instance[name=default]/protocols/bgp".to_string(),
            json!({
                "autonomous-system": asn.as_str(),
                "router-id": router_id.as_str(),
                "group": [{
                    "group-name": BGP_GROUP,
                    "admin-state": "enable",
                    "peer-as": asn.as_str(),
                    "evpn": {
                        "admin-state": "enable"
                    },
                    "route-reflector": {
                        "client": "true",
                        "cluster-id": router_id.as_str()
                    }
                }]
            }),
        ),
        (
            format!(
                "/network-instance[name=default]/protocols/bgp/neighbor[peer-address={}]",
                underlay.peer_address
            ),
            json!({
                "admin-state": "enable",
                "peer-group": BGP_GROUP
            }),
        ),
    ]
}

/// Build a mac-vrf: tagged access subinterface, VXLAN tunnel-interface, and
/// the network-instance wiring both into a bgp-evpn instance handled by the
/// agent.
pub fn mac_vrf(vrf: &MacVrf) -> Vec<PathUpdate> {
    let subinterface = format!("{}.{}", vrf.access_interface, vrf.vlan);
    let vxlan_interface = format!("vxlan{}.{}", vrf.vni, vrf.vni);

    vec![
        (
            format!("/interface[name={}]", vrf.access_interface),
            json!({
                "vlan-tagging": "true",
                "subinterface": [{
                    "index": vrf.vlan,
                    "type": "bridged",
                    "vlan": {
                        "encap": {
                            "single-tagged": {
                                "vlan-id": vrf.vlan
                            }
                        }
                    }
                }]
            }),
        ),
        (
            format!("/tunnel-interface[name=vxlan{}]", vrf.vni),
            json!({
                "vxlan-interface": {
                    "index": vrf.vni,
                    "type": "bridged",
                    "ingress": {
                        "vni": vrf.vni
                    }
                }
            }),
        ),
        (
            format!("/network-instance[name=mac-vrf{}]", vrf.evi),
            json!({
                "type": "mac-vrf",
                "admin-state": "enable",
                "interface": {
                    "name": subinterface.as_str()
                },
                "vxlan-interface": {
                    "name": vxlan_interface.as_str()
                },
                "protocols": {
                    "bgp-evpn": {
                        "bgp-instance": {
                            "id": 1,
                            "admin-state": "enable",
                            "vxlan-interface": vxlan_interface.as_str(),
                            "evi": vrf.evi,
                            "static-vxlan-agent": {
                                "admin-state": "enable",
                                "evi": vrf.evi,
                                "vni": vrf.vni
                            }
                        }
                    }
                }
            }),
        ),
    ]
}

/// Keyed path of a static VTEP under a mac-vrf's bgp-evpn instance.
pub fn vtep_path(evi: u32, vtep_ip: Ipv4Addr) -> String {
    format!(
        "/network-instance[name=mac-vrf{evi}]/protocols/bgp-evpn/bgp-instance[id=1]/static-vxlan-agent/static-vtep[vtep-ip={vtep_ip}]"
    )
}

/// Create a static VTEP. The list entry carries no leaves besides its key.
pub fn add_vtep(evi: u32, vtep_ip: Ipv4Addr) -> PathUpdate {
    (vtep_path(evi, vtep_ip), json!({}))
}
