//! Proxy service
//!
//! Thin request wrappers for the proxy endpoints of the control service.

use crate::error::ProxyctlResult;
use crate::models::{Ack, NewProxy, ProxyRecord};
use crate::transport::{HttpBackend, Request, Transport};

/// Service for proxy management
pub struct ProxyService<'a, B> {
    transport: &'a Transport<B>,
}

impl<'a, B: HttpBackend> ProxyService<'a, B> {
    /// Create a new proxy service
    pub fn new(transport: &'a Transport<B>) -> Self {
        Self { transport }
    }

    /// Get all proxies known to the server
    pub fn list(&self) -> ProxyctlResult<Vec<ProxyRecord>> {
        Ok(self.transport.request_json(Request::get("/proxy"))?)
    }

    /// Get a single proxy by id; `None` when the service has no such proxy
    pub fn get(&self, id: u64) -> ProxyctlResult<Option<ProxyRecord>> {
        Ok(self
            .transport
            .request_json(Request::get(format!("/proxy/{}", id)))?)
    }

    /// Create and start a new proxy
    pub fn create(&self, proxy: &NewProxy) -> ProxyctlResult<ProxyRecord> {
        proxy.validate()?;
        let request = Request::post("/proxy").json(proxy)?;
        Ok(self.transport.request_json(request)?)
    }

    /// Start a stopped proxy
    pub fn start(&self, id: u64) -> ProxyctlResult<Ack> {
        Ok(self
            .transport
            .request_json(Request::post(format!("/proxy/{}/start", id)))?)
    }

    /// Stop a running proxy
    pub fn stop(&self, id: u64) -> ProxyctlResult<Ack> {
        Ok(self
            .transport
            .request_json(Request::put(format!("/proxy/{}", id)))?)
    }

    /// Delete a proxy
    pub fn delete(&self, id: u64) -> ProxyctlResult<Ack> {
        Ok(self
            .transport
            .request_json(Request::delete(format!("/proxy/{}", id)))?)
    }
}
