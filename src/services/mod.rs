//! Service layer for proxyctl
//!
//! Wraps the control service's CRUD endpoints. Backup and restore live in
//! `crate::backup`.

pub mod caddy;
pub mod proxy;

pub use caddy::CaddyService;
pub use proxy::ProxyService;
