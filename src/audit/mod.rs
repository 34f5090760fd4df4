//! Activity log for proxyctl
//!
//! Records every operation that changes server state (proxy create, start,
//! stop, delete; Caddy server create, update, start, stop; backup export and
//! restore) in an append-only log, whether it succeeded or not.
//!
//! # Example
//!
//! ```rust,ignore
//! use proxyctl::audit::{ActivityEntry, ActivityLog, Operation};
//!
//! let log = ActivityLog::new(paths.activity_log());
//! let result = service.stop(4);
//! log.record(&ActivityEntry::from_result(Operation::StopProxy, "proxy 4", &result, |ack| {
//!     ack.message().map(str::to_string)
//! }));
//! ```

mod entry;
mod logger;

pub use entry::{ActivityEntry, Operation, Outcome};
pub use logger::ActivityLog;
