//! proxyctl - command-line client for a TCP proxy control service
//!
//! This library talks to a proxy control service over HTTP. It manages the
//! service's proxies and moves their configuration in and out of portable
//! JSON backup files.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Proxy records, Caddy servers, restore modes and server
//!   acknowledgements
//! - `transport`: HTTP request/response plumbing with error classification
//! - `services`: Proxy and Caddy server operations
//! - `backup`: Backup export and restore
//! - `audit`: Activity log of state-changing operations
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use proxyctl::config::{ProxyctlPaths, Settings};
//! use proxyctl::services::ProxyService;
//!
//! let paths = ProxyctlPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let transport = proxyctl::cli::connect(&settings)?;
//! for proxy in ProxyService::new(&transport).list()? {
//!     println!("{} -> {}", proxy.listening_port, proxy.target());
//! }
//! ```

pub mod audit;
pub mod backup;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod transport;

pub use error::{ProxyctlError, ProxyctlResult};
