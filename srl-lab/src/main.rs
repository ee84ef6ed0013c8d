//! srl-lab: provision and inspect the SR Linux static VXLAN agent over gNMI.

use std::net::Ipv4Addr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;

use gnmi_client::GnmiClient;
use srl_lab::config::LabConfig;
use srl_lab::provision::{self, AdminState, AgentSettings, BgpUnderlay, MacVrf};
use srl_lab::{logging, state};

/// Lab driver for the SR Linux static VXLAN agent
#[derive(Parser, Debug)]
#[command(name = "srl-lab")]
#[command(about = "Provision and inspect the SR Linux static VXLAN agent over gNMI")]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "lab.json5")]
    config: PathBuf,

    /// Override log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Manage the static-vxlan-agent application
    Agent {
        #[command(subcommand)]
        command: AgentCommand,
    },
    /// Configure and inspect BGP on the target
    Bgp {
        #[command(subcommand)]
        command: BgpCommand,
    },
    /// Create a mac-vrf bound to a VXLAN tunnel
    MacVrf {
        #[command(subcommand)]
        command: MacVrfCommand,
    },
    /// Manage static VTEPs under a mac-vrf
    Vtep {
        #[command(subcommand)]
        command: VtepCommand,
    },
    /// Inspect the EVPN RIB
    Evpn {
        #[command(subcommand)]
        command: EvpnCommand,
    },
    /// Show the capabilities reported by the target
    Capabilities,
}

#[derive(Subcommand, Debug)]
enum AgentCommand {
    /// Configure the agent protocol instance in the default network-instance
    Setup {
        /// Administrative state of the agent
        #[arg(long, value_enum, default_value_t = AdminState::Enable)]
        admin_state: AdminState,

        /// VTEP source address (the local loopback)
        #[arg(long)]
        source: Ipv4Addr,

        /// BGP peer address the agent talks to
        #[arg(long)]
        peer: Ipv4Addr,

        /// Autonomous system of the peer
        #[arg(long, default_value_t = 65000)]
        peer_as: u32,

        /// Local autonomous system
        #[arg(long, default_value_t = 65000)]
        local_as: u32,
    },
    /// Restart the agent application
    Restart,
    /// Show the agent's app-management state
    Status,
}

#[derive(Subcommand, Debug)]
enum BgpCommand {
    /// Configure the BGP underlay the agent peers over
    Setup {
        /// Neighbor to peer with
        #[arg(long)]
        peer: Ipv4Addr,

        /// Prefix to assign to lo0.0
        #[arg(long, default_value = "1.1.1.4/32")]
        loopback_prefix: String,

        /// BGP router-id (also used as the route-reflector cluster-id)
        #[arg(long, default_value = "192.0.2.2")]
        router_id: Ipv4Addr,

        /// Autonomous system for both endpoints of the session
        #[arg(long, default_value_t = 65000)]
        asn: u32,
    },
    /// Show the state of one BGP neighbor
    Neighbor {
        /// Network-instance holding the session
        #[arg(long, default_value = "default")]
        network_instance: String,

        /// Neighbor address
        #[arg(long)]
        peer: Ipv4Addr,
    },
}

#[derive(Subcommand, Debug)]
enum MacVrfCommand {
    /// Create the subinterface, tunnel-interface and mac-vrf for one overlay
    Setup {
        /// VLAN id on the access interface
        #[arg(long)]
        vlan: u32,

        /// EVPN instance (names the mac-vrf)
        #[arg(long)]
        evi: u32,

        /// VXLAN network identifier
        #[arg(long)]
        vni: u32,

        /// Access interface carrying the tagged subinterface
        #[arg(long, default_value = "ethernet-1/1")]
        interface: String,
    },
}

#[derive(Subcommand, Debug)]
enum VtepCommand {
    /// Add a static VTEP to a mac-vrf's bgp-evpn instance
    Add {
        #[arg(long)]
        evi: u32,

        #[arg(long)]
        vtep_ip: Ipv4Addr,
    },
    /// Remove a static VTEP from a mac-vrf's bgp-evpn instance
    Delete {
        #[arg(long)]
        evi: u32,

        #[arg(long)]
        vtep_ip: Ipv4Addr,
    },
}

#[derive(Subcommand, Debug)]
enum EvpnCommand {
    /// List route-distinguishers of valid IMET routes in the EVPN RIB
    ImetRoutes,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = LabConfig::load_from_file(&args.config)?;
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }
    logging::init_tracing(&config.logging)?;

    let mut client = GnmiClient::connect(&config.target).await?;
    run(&mut client, args.command).await
}

async fn run(client: &mut GnmiClient, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Agent { command } => match command {
            AgentCommand::Setup {
                admin_state,
                source,
                peer,
                peer_as,
                local_as,
            } => {
                let settings = AgentSettings {
                    admin_state,
                    source_address: source,
                    peer_address: peer,
                    peer_as,
                    local_as,
                };
                client
                    .set_updates(&[provision::agent_settings(&settings)])
                    .await?;
                info!("Agent configured: peer {} ({})", peer, admin_state.as_str());
            }
            AgentCommand::Restart => {
                client.set_updates(&[provision::restart_agent()]).await?;
                info!("Agent restart requested");
            }
            AgentCommand::Status => {
                let status = state::agent_status(client).await?;
                print_json(&status)?;
            }
        },
        Command::Bgp { command } => match command {
            BgpCommand::Setup {
                peer,
                loopback_prefix,
                router_id,
                asn,
            } => {
                let underlay = BgpUnderlay {
                    peer_address: peer,
                    loopback_prefix,
                    router_id,
                    autonomous_system: asn,
                };
                client.set_updates(&provision::bgp_underlay(&underlay)).await?;
                info!("BGP underlay configured: AS {} neighbor {}", asn, peer);
            }
            BgpCommand::Neighbor {
                network_instance,
                peer,
            } => {
                let neighbor = state::bgp_neighbor(client, &network_instance, peer).await?;
                print_json(&neighbor)?;
            }
        },
        Command::MacVrf { command } => match command {
            MacVrfCommand::Setup {
                vlan,
                evi,
                vni,
                interface,
            } => {
                let vrf = MacVrf {
                    vlan,
                    evi,
                    vni,
                    access_interface: interface,
                };
                client.set_updates(&provision::mac_vrf(&vrf)).await?;
                info!("mac-vrf{} configured: vlan {} vni {}", evi, vlan, vni);
            }
        },
        Command::Vtep { command } => match command {
            VtepCommand::Add { evi, vtep_ip } => {
                client
                    .set_updates(&[provision::add_vtep(evi, vtep_ip)])
                    .await?;
                info!("Static VTEP {} added to mac-vrf{}", vtep_ip, evi);
            }
            VtepCommand::Delete { evi, vtep_ip } => {
                client
                    .set_deletes(&[provision::vtep_path(evi, vtep_ip)])
                    .await?;
                info!("Static VTEP {} removed from mac-vrf{}", vtep_ip, evi);
            }
        },
        Command::Evpn { command } => match command {
            EvpnCommand::ImetRoutes => {
                let rds = state::evpn_imet_route_distinguishers(client).await?;
                for rd in rds {
                    println!("{}", rd);
                }
            }
        },
        Command::Capabilities => {
            let caps = client.capabilities().await?;
            println!("gNMI version: {}", caps.g_nmi_version);

            let encodings: Vec<&str> = caps
                .supported_encodings
                .iter()
                .filter_map(|e| gnmi_client::gnmi::Encoding::try_from(*e).ok())
                .map(|e| e.as_str_name())
                .collect();
            println!("Encodings: {}", encodings.join(", "));

            for model in caps.supported_models {
                println!("{} {} ({})", model.name, model.version, model.organization);
            }
        }
    }

    Ok(())
}

fn print_json(value: &serde_json::Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
