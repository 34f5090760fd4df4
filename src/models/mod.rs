//! Data models for proxyctl
//!
//! - `proxy`: proxy records and the definition used to create one
//! - `caddy`: Caddy reverse-proxy servers and their definitions
//! - `restore`: restore merge modes and server acknowledgements

pub mod caddy;
pub mod proxy;
pub mod restore;

pub use caddy::{CaddyServer, NewCaddyServer};
pub use proxy::{NewProxy, ProxyRecord, ProxyStatus};
pub use restore::{Ack, RestoreMode, RestoreResult};
