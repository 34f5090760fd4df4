//! Activity history command

use crate::audit::ActivityLog;
use crate::error::ProxyctlResult;

/// Print the most recent activity entries, oldest first
pub fn handle_history_command(activity: &ActivityLog, limit: usize) -> ProxyctlResult<()> {
    let entries = activity.read_recent(limit)?;
    if entries.is_empty() {
        println!("No activity recorded yet.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }
    Ok(())
}
