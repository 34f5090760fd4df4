use anyhow::Result;
use clap::{Parser, Subcommand};

use proxyctl::audit::ActivityLog;
use proxyctl::cli::{
    connect, handle_backup_command, handle_caddy_command, handle_config_command,
    handle_history_command, handle_proxy_command,
};
use proxyctl::config::{ProxyctlPaths, Settings};
use proxyctl::logging;

#[derive(Parser)]
#[command(
    name = "proxyctl",
    version,
    about = "Manage TCP proxies on a proxy control service",
    long_about = "proxyctl manages the TCP proxies run by a proxy control service: \
                  create, start, stop and delete them, manage the service's Caddy \
                  reverse-proxy servers, and export or restore the whole \
                  configuration as a JSON backup file."
)]
struct Cli {
    /// Base URL of the control service (overrides the configured one)
    #[arg(long, global = true, env = "PROXYCTL_BASE_URL")]
    base_url: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Proxy management commands
    #[command(subcommand)]
    Proxy(proxyctl::cli::ProxyCommands),

    /// Caddy reverse-proxy server commands
    #[command(subcommand)]
    Caddy(proxyctl::cli::CaddyCommands),

    /// Backup export and restore
    #[command(subcommand)]
    Backup(proxyctl::cli::BackupCommands),

    /// Show recent activity
    History {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show or change configuration
    #[command(subcommand)]
    Config(proxyctl::cli::ConfigCommands),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    // Initialize paths and settings
    let paths = ProxyctlPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;
    let activity = ActivityLog::new(paths.activity_log());

    let Some(command) = cli.command else {
        println!("proxyctl - manage TCP proxies on a proxy control service");
        println!();
        println!("Run 'proxyctl --help' for usage information.");
        return Ok(());
    };

    // Config edits persist the file as-is, so the override only applies elsewhere
    if !matches!(command, Commands::Config(_)) {
        if let Some(url) = cli.base_url {
            settings.base_url = url;
        }
    }

    match command {
        Commands::Proxy(cmd) => {
            let transport = connect(&settings)?;
            handle_proxy_command(&transport, &activity, cmd)?;
        }
        Commands::Caddy(cmd) => {
            let transport = connect(&settings)?;
            handle_caddy_command(&transport, &activity, cmd)?;
        }
        Commands::Backup(cmd) => {
            let transport = connect(&settings)?;
            handle_backup_command(&transport, &settings, &activity, cmd)?;
        }
        Commands::History { limit } => {
            handle_history_command(&activity, limit)?;
        }
        Commands::Config(cmd) => {
            handle_config_command(&paths, &mut settings, cmd)?;
        }
    }

    Ok(())
}
