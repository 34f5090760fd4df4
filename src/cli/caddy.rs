//! Caddy CLI commands
//!
//! Implements CLI commands for Caddy reverse-proxy servers.

use clap::{Args, Subcommand};

use crate::audit::{ActivityEntry, ActivityLog, Operation};
use crate::display::{format_caddy_details, format_caddy_list};
use crate::error::{ProxyctlError, ProxyctlResult};
use crate::models::{CaddyServer, NewCaddyServer};
use crate::services::CaddyService;
use crate::transport::{HttpBackend, Transport};

/// Full definition of a Caddy server
#[derive(Args)]
pub struct CaddyDefinition {
    /// Hostname the server answers for
    hostname: String,
    /// Port to listen on
    port: u16,
    /// Upstream host:port to forward to
    upstream_url: String,
    /// PEM file to trust when dialing the upstream over TLS
    #[arg(long)]
    tls_trust_pool: Option<String>,
    /// Trusted proxy range (repeatable)
    #[arg(long = "trusted-proxy")]
    trusted_proxies: Vec<String>,
}

impl From<CaddyDefinition> for NewCaddyServer {
    fn from(def: CaddyDefinition) -> Self {
        Self {
            hostname: def.hostname,
            port: def.port,
            upstream_url: def.upstream_url,
            tls_trust_pool: def.tls_trust_pool,
            trusted_proxies: (!def.trusted_proxies.is_empty()).then_some(def.trusted_proxies),
        }
    }
}

/// Caddy subcommands
#[derive(Subcommand)]
pub enum CaddyCommands {
    /// Print the live Caddy configuration as JSON
    Config,
    /// List stored Caddy servers
    #[command(alias = "ls")]
    List {
        /// Print raw JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show a single server
    Show {
        /// Server name
        name: String,
    },
    /// Configure a new server
    Create(CaddyDefinition),
    /// Replace the definition of a server
    Update {
        /// Server name
        name: String,
        #[command(flatten)]
        definition: CaddyDefinition,
    },
    /// Load a stored server into Caddy
    Start {
        /// Server name
        name: String,
    },
    /// Unload a server from Caddy
    Stop {
        /// Server name
        name: String,
    },
}

/// Handle a caddy command
pub fn handle_caddy_command<B: HttpBackend>(
    transport: &Transport<B>,
    activity: &ActivityLog,
    cmd: CaddyCommands,
) -> ProxyctlResult<()> {
    let service = CaddyService::new(transport);

    match cmd {
        CaddyCommands::Config => {
            println!("{}", serde_json::to_string_pretty(&service.config()?)?);
        }

        CaddyCommands::List { json } => {
            let servers = service.list()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&servers)?);
            } else {
                println!("{}", format_caddy_list(&servers));
            }
        }

        CaddyCommands::Show { name } => {
            let server = service.get(&name)?.ok_or_else(|| {
                ProxyctlError::Validation(format!("No Caddy server named '{}'", name))
            })?;
            print!("{}", format_caddy_details(&server));
        }

        CaddyCommands::Create(definition) => {
            let definition = NewCaddyServer::from(definition);
            let result = service.create(&definition);
            activity.record(&ActivityEntry::from_result(
                Operation::CreateCaddyServer,
                format!("{}:{} -> {}", definition.hostname, definition.port, definition.upstream_url),
                &result,
                |server| Some(server.name.clone()),
            ));

            let server = result?;
            println!("Created Caddy server {}", server.name);
            print!("{}", format_caddy_details(&server));
        }

        CaddyCommands::Update { name, definition } => {
            let definition = NewCaddyServer::from(definition);
            let result = service.update(&name, &definition);
            activity.record(&ActivityEntry::from_result(
                Operation::UpdateCaddyServer,
                &name,
                &result,
                |ack| ack.message().map(str::to_string),
            ));

            let ack = result?;
            println!("Updated Caddy server {}: {}", name, ack);
        }

        CaddyCommands::Start { name } => {
            let server = record_server(activity, Operation::StartCaddyServer, &name, service.start(&name))?;
            println!("Caddy server {} is {}", server.name, server.status);
        }

        CaddyCommands::Stop { name } => {
            let server = record_server(activity, Operation::StopCaddyServer, &name, service.stop(&name))?;
            println!("Caddy server {} is {}", server.name, server.status);
        }
    }

    Ok(())
}

fn record_server(
    activity: &ActivityLog,
    operation: Operation,
    name: &str,
    result: ProxyctlResult<CaddyServer>,
) -> ProxyctlResult<CaddyServer> {
    activity.record(&ActivityEntry::from_result(
        operation,
        name,
        &result,
        |server| Some(server.status.to_string()),
    ));
    result
}
