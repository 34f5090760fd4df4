//! Proxy display formatting
//!
//! Formats proxies for terminal output in table and detail views.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::ProxyRecord;

#[derive(Tabled)]
struct ProxyRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Listen")]
    listening_port: u16,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "PID")]
    pid: String,
    #[tabled(rename = "Started")]
    start_time: String,
}

impl From<&ProxyRecord> for ProxyRow {
    fn from(record: &ProxyRecord) -> Self {
        Self {
            id: record.id,
            listening_port: record.listening_port,
            target: record.target(),
            status: record.status.to_string(),
            pid: record.pid.map(|p| p.to_string()).unwrap_or_else(|| "-".into()),
            start_time: record.start_time.clone(),
        }
    }
}

/// Format a list of proxies as a table
pub fn format_proxy_list(proxies: &[ProxyRecord]) -> String {
    if proxies.is_empty() {
        return "No proxies found.".to_string();
    }

    let rows: Vec<ProxyRow> = proxies.iter().map(ProxyRow::from).collect();
    let running = proxies.iter().filter(|p| p.is_running()).count();

    let mut table = Table::new(rows);
    table.with(Style::psql());

    format!(
        "{}\n\n{} proxies ({} running, {} stopped)",
        table,
        proxies.len(),
        running,
        proxies.len() - running
    )
}

/// Format a single proxy's details
pub fn format_proxy_details(proxy: &ProxyRecord) -> String {
    let mut output = String::new();

    output.push_str(&format!("Proxy {}\n", proxy.id));
    output.push_str(&format!("  Listening port: {}\n", proxy.listening_port));
    output.push_str(&format!("  Target:         {}\n", proxy.target()));
    output.push_str(&format!("  Status:         {}\n", proxy.status));
    if let Some(pid) = proxy.pid {
        output.push_str(&format!("  PID:            {}\n", pid));
    }
    if !proxy.start_time.is_empty() {
        output.push_str(&format!("  Started:        {}\n", proxy.start_time));
    }
    if let Some(stopped) = &proxy.stop_time {
        output.push_str(&format!("  Stopped:        {}\n", stopped));
    }

    output
}
