//! Caddy server service
//!
//! Request wrappers for the `/caddy` endpoints. Servers are addressed by the
//! name the control service assigns on creation.

use serde_json::{json, Value};

use crate::error::ProxyctlResult;
use crate::models::{Ack, CaddyServer, NewCaddyServer};
use crate::transport::{HttpBackend, Request, Transport};

/// Service for Caddy server management
pub struct CaddyService<'a, B> {
    transport: &'a Transport<B>,
}

impl<'a, B: HttpBackend> CaddyService<'a, B> {
    pub fn new(transport: &'a Transport<B>) -> Self {
        Self { transport }
    }

    /// The live Caddy configuration, as reported by the Caddy admin API
    pub fn config(&self) -> ProxyctlResult<Value> {
        Ok(self.transport.request_json(Request::get("/caddy/config"))?)
    }

    /// Get all stored servers
    pub fn list(&self) -> ProxyctlResult<Vec<CaddyServer>> {
        Ok(self.transport.request_json(Request::get("/caddy/servers"))?)
    }

    /// Get one server by name; `None` when the service has no such server
    pub fn get(&self, name: &str) -> ProxyctlResult<Option<CaddyServer>> {
        Ok(self
            .transport
            .request_json(Request::get(format!("/caddy/servers/{}", name)))?)
    }

    /// Configure a new server
    pub fn create(&self, server: &NewCaddyServer) -> ProxyctlResult<CaddyServer> {
        server.validate()?;
        let request = Request::post("/caddy/servers").json(server)?;
        Ok(self.transport.request_json(request)?)
    }

    /// Replace the definition of an existing server
    pub fn update(&self, name: &str, server: &NewCaddyServer) -> ProxyctlResult<Ack> {
        server.validate()?;
        let request = Request::put(format!("/caddy/servers/{}", name)).json(server)?;
        Ok(self.transport.request_json(request)?)
    }

    /// Load a stored server into Caddy
    pub fn start(&self, name: &str) -> ProxyctlResult<CaddyServer> {
        self.action("start", name)
    }

    /// Remove a server from the running Caddy config, keeping it stored
    pub fn stop(&self, name: &str) -> ProxyctlResult<CaddyServer> {
        self.action("stop", name)
    }

    fn action(&self, action: &str, name: &str) -> ProxyctlResult<CaddyServer> {
        let request =
            Request::post(format!("/caddy/actions/{}", action)).json(&json!({ "name": name }))?;
        Ok(self.transport.request_json(request)?)
    }
}
