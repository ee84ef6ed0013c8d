//! Lab provisioning for the SR Linux static VXLAN agent
//!
//! Drives a single SR Linux node over gNMI: VXLAN/EVPN overlay wiring, BGP
//! peering towards the agent, the static-vxlan-agent application itself, and
//! the operational state read back from all of them.

pub mod config;
pub mod logging;
pub mod provision;
pub mod state;

pub use config::LabConfig;
