//! Display formatting for terminal output

pub mod caddy;
pub mod proxy;

pub use caddy::{format_caddy_details, format_caddy_list};
pub use proxy::{format_proxy_details, format_proxy_list};
