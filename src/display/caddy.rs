//! Caddy server display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::CaddyServer;

#[derive(Tabled)]
struct CaddyRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Host")]
    hostname: String,
    #[tabled(rename = "Port")]
    port: u16,
    #[tabled(rename = "Upstream")]
    upstream_url: String,
    #[tabled(rename = "TLS")]
    tls: &'static str,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&CaddyServer> for CaddyRow {
    fn from(server: &CaddyServer) -> Self {
        Self {
            name: server.name.clone(),
            hostname: server.hostname.clone(),
            port: server.port,
            upstream_url: server.upstream_url.clone(),
            tls: if server.tls_trust_pool.is_some() { "yes" } else { "no" },
            status: server.status.to_string(),
        }
    }
}

/// Format a list of Caddy servers as a table
pub fn format_caddy_list(servers: &[CaddyServer]) -> String {
    if servers.is_empty() {
        return "No Caddy servers found.".to_string();
    }

    let running = servers.iter().filter(|s| s.is_running()).count();
    let mut table = Table::new(servers.iter().map(CaddyRow::from));
    table.with(Style::psql());

    format!(
        "{}\n\n{} servers ({} running, {} stopped)",
        table,
        servers.len(),
        running,
        servers.len() - running
    )
}

/// Format a single server's details
pub fn format_caddy_details(server: &CaddyServer) -> String {
    let mut output = String::new();

    output.push_str(&format!("Caddy server {}\n", server.name));
    output.push_str(&format!("  Hostname:        {}\n", server.hostname));
    output.push_str(&format!("  Port:            {}\n", server.port));
    output.push_str(&format!("  Upstream:        {}\n", server.upstream_url));
    output.push_str(&format!("  Status:          {}\n", server.status));
    if let Some(pool) = &server.tls_trust_pool {
        output.push_str(&format!("  TLS trust pool:  {}\n", pool));
    }
    if let Some(proxies) = &server.trusted_proxies {
        output.push_str(&format!("  Trusted proxies: {}\n", proxies.join(", ")));
    }
    if !server.create_time.is_empty() {
        output.push_str(&format!("  Created:         {}\n", server.create_time));
    }

    output
}
