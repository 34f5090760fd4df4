//! Proxy CLI commands
//!
//! Implements CLI commands for proxy management.

use clap::Subcommand;

use crate::audit::{ActivityEntry, ActivityLog, Operation};
use crate::display::{format_proxy_details, format_proxy_list};
use crate::error::{ProxyctlError, ProxyctlResult};
use crate::models::{Ack, NewProxy};
use crate::services::ProxyService;
use crate::transport::{HttpBackend, Transport};

/// Proxy subcommands
#[derive(Subcommand)]
pub enum ProxyCommands {
    /// List all proxies
    #[command(alias = "ls")]
    List {
        /// Print raw JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show a single proxy
    Show {
        /// Proxy ID
        id: u64,
    },
    /// Create and start a new proxy
    Create {
        /// Local port to listen on
        listening_port: u16,
        /// Host to forward to
        target_host: String,
        /// Port to forward to
        target_port: u16,
        /// Idle timeout in seconds
        #[arg(short, long)]
        timeout: Option<u32>,
    },
    /// Start a stopped proxy
    Start {
        /// Proxy ID
        id: u64,
    },
    /// Stop a running proxy
    Stop {
        /// Proxy ID
        id: u64,
    },
    /// Delete a proxy
    #[command(alias = "rm")]
    Delete {
        /// Proxy ID
        id: u64,
    },
}

/// Handle a proxy command
pub fn handle_proxy_command<B: HttpBackend>(
    transport: &Transport<B>,
    activity: &ActivityLog,
    cmd: ProxyCommands,
) -> ProxyctlResult<()> {
    let service = ProxyService::new(transport);

    match cmd {
        ProxyCommands::List { json } => {
            let proxies = service.list()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&proxies)?);
            } else {
                println!("{}", format_proxy_list(&proxies));
            }
        }

        ProxyCommands::Show { id } => {
            let proxy = service.get(id)?.ok_or_else(|| {
                ProxyctlError::Validation(format!("No proxy with ID {}", id))
            })?;
            print!("{}", format_proxy_details(&proxy));
        }

        ProxyCommands::Create {
            listening_port,
            target_host,
            target_port,
            timeout,
        } => {
            let mut proxy = NewProxy::new(listening_port, target_host, target_port);
            proxy.timeout = timeout;

            let result = service.create(&proxy);
            activity.record(&ActivityEntry::from_result(
                Operation::CreateProxy,
                format!(":{} -> {}:{}", proxy.listening_port, proxy.target_host, proxy.target_port),
                &result,
                |created| Some(format!("id {}", created.id)),
            ));

            let created = result?;
            println!("Created proxy {}", created.id);
            print!("{}", format_proxy_details(&created));
        }

        ProxyCommands::Start { id } => {
            let ack = record_ack(activity, Operation::StartProxy, id, service.start(id))?;
            println!("Started proxy {}: {}", id, ack);
        }

        ProxyCommands::Stop { id } => {
            let ack = record_ack(activity, Operation::StopProxy, id, service.stop(id))?;
            println!("Stopped proxy {}: {}", id, ack);
        }

        ProxyCommands::Delete { id } => {
            let ack = record_ack(activity, Operation::DeleteProxy, id, service.delete(id))?;
            println!("Deleted proxy {}: {}", id, ack);
        }
    }

    Ok(())
}

fn record_ack(
    activity: &ActivityLog,
    operation: Operation,
    id: u64,
    result: ProxyctlResult<Ack>,
) -> ProxyctlResult<Ack> {
    activity.record(&ActivityEntry::from_result(
        operation,
        format!("proxy {}", id),
        &result,
        |ack| ack.message().map(str::to_string),
    ));
    result
}
