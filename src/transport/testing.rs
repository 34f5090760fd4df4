//! In-memory backends for tests

use std::collections::VecDeque;
use std::sync::Mutex;

use reqwest::Url;
use serde_json::json;

use super::{HttpBackend, Method, RawResponse, Request};
use crate::error::TransportError;
use crate::models::{CaddyServer, NewCaddyServer, NewProxy, ProxyRecord, ProxyStatus};

/// A request as seen by a test backend
#[derive(Debug, Clone)]
pub(crate) struct SentRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl SentRequest {
    fn record(url: &Url, request: &Request) -> Self {
        Self {
            method: request.method,
            url: url.to_string(),
            headers: request.headers.clone(),
            body: request.body.clone(),
        }
    }
}

/// Replays queued responses in order and records every request
#[derive(Default)]
pub(crate) struct ScriptedBackend {
    replies: Mutex<VecDeque<Result<RawResponse, TransportError>>>,
    sent: Mutex<Vec<SentRequest>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, status: u16, body: impl Into<Vec<u8>>) {
        self.replies
            .lock()
            .unwrap()
            .push_back(Ok(RawResponse::new(status, body)));
    }

    pub fn fail_network(&self, message: &str) {
        self.replies
            .lock()
            .unwrap()
            .push_back(Err(TransportError::Network(message.to_string())));
    }

    pub fn requests(&self) -> Vec<SentRequest> {
        self.sent.lock().unwrap().clone()
    }
}

impl HttpBackend for ScriptedBackend {
    fn execute(&self, url: &Url, request: &Request) -> Result<RawResponse, TransportError> {
        self.sent.lock().unwrap().push(SentRequest::record(url, request));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Network("no scripted response".into())))
    }
}

#[derive(Default)]
struct ServiceState {
    records: Vec<ProxyRecord>,
    next_id: u64,
    servers: Vec<CaddyServer>,
}

/// Minimal stand-in for the control service's HTTP API
#[derive(Default)]
pub(crate) struct FakeControlService {
    state: Mutex<ServiceState>,
    sent: Mutex<Vec<SentRequest>>,
}

impl FakeControlService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<ProxyRecord> {
        self.state.lock().unwrap().records.clone()
    }

    pub fn requests(&self) -> Vec<SentRequest> {
        self.sent.lock().unwrap().clone()
    }

    fn route(&self, url: &Url, request: &Request) -> RawResponse {
        let segments: Vec<&str> = url
            .path_segments()
            .map(|s| s.filter(|p| !p.is_empty()).collect())
            .unwrap_or_default();
        let mut state = self.state.lock().unwrap();

        match (request.method, segments.as_slice()) {
            (Method::Get, ["proxy"]) => ok(json!(state.records)),
            (Method::Post, ["proxy"]) => {
                let definition: NewProxy = match request
                    .body
                    .as_deref()
                    .and_then(|b| serde_json::from_slice(b).ok())
                {
                    Some(definition) => definition,
                    None => return error(400, "invalid proxy definition"),
                };
                if state
                    .records
                    .iter()
                    .any(|r| r.listening_port == definition.listening_port)
                {
                    return error(409, "listening port already in use");
                }
                state.next_id += 1;
                let record = ProxyRecord {
                    id: state.next_id,
                    listening_port: definition.listening_port,
                    target_host: definition.target_host,
                    target_port: definition.target_port,
                    pid: Some(1000 + state.next_id as u32),
                    start_time: "2026-10-19 08:00:00".into(),
                    stop_time: None,
                    status: ProxyStatus::Running,
                };
                state.records.push(record.clone());
                RawResponse::new(201, serde_json::to_vec(&record).unwrap())
            }
            (method, ["proxy", id, rest @ ..]) => {
                let index = id
                    .parse::<u64>()
                    .ok()
                    .and_then(|id| state.records.iter().position(|r| r.id == id));
                if let (Method::Get, []) = (method, rest) {
                    return ok(json!(index.map(|i| &state.records[i])));
                }
                let Some(index) = index else {
                    return error(404, "proxy not found");
                };
                match (method, rest) {
                    (Method::Delete, []) => {
                        state.records.remove(index);
                        ok(json!({"message": "deleted"}))
                    }
                    (Method::Put, []) => {
                        let record = &mut state.records[index];
                        record.status = ProxyStatus::Stopped;
                        record.pid = None;
                        record.stop_time = Some("2026-10-19 09:00:00".into());
                        ok(json!({"message": "stopped"}))
                    }
                    (Method::Post, ["start"]) => {
                        let record = &mut state.records[index];
                        record.status = ProxyStatus::Running;
                        record.pid = Some(2000 + record.id as u32);
                        record.stop_time = None;
                        ok(json!({"message": "started"}))
                    }
                    _ => error(405, "method not allowed"),
                }
            }
            (Method::Post, ["backup"]) => {
                RawResponse::new(200, serde_json::to_vec_pretty(&state.records).unwrap())
            }
            (Method::Post, ["restore"]) => {
                let mode = url
                    .query_pairs()
                    .find(|(k, _)| k == "mode")
                    .map(|(_, v)| v.into_owned());
                let records: Vec<ProxyRecord> = match request
                    .body
                    .as_deref()
                    .and_then(|b| serde_json::from_slice(b).ok())
                {
                    Some(records) => records,
                    None => return error(400, "backup is not a list of proxies"),
                };
                let count = records.len();
                match mode.as_deref() {
                    Some("overwrite") => state.records = records,
                    Some("append") => {
                        for mut record in records {
                            state.next_id += 1;
                            record.id = state.next_id;
                            state.records.push(record);
                        }
                    }
                    _ => return error(400, "mode must be append or overwrite"),
                }
                if let Some(max) = state.records.iter().map(|r| r.id).max() {
                    state.next_id = state.next_id.max(max);
                }
                ok(json!({"message": format!("Restored {} proxies", count), "restored": count}))
            }
            (Method::Get, ["caddy", "config"]) => {
                let servers: serde_json::Map<String, serde_json::Value> = state
                    .servers
                    .iter()
                    .filter(|s| s.is_running())
                    .map(|s| (s.name.clone(), json!({ "listen": [format!(":{}", s.port)] })))
                    .collect();
                ok(json!({ "apps": { "http": { "servers": servers } } }))
            }
            (Method::Get, ["caddy", "servers"]) => ok(json!(state.servers)),
            (Method::Post, ["caddy", "servers"]) => {
                let Some(definition) = parse_body::<NewCaddyServer>(request) else {
                    return error(400, "invalid server definition");
                };
                let id = state.servers.len() as u64 + 1;
                let server = CaddyServer {
                    id,
                    name: format!("srv{}", 48210 + id),
                    hostname: definition.hostname,
                    port: definition.port,
                    upstream_url: definition.upstream_url,
                    tls_trust_pool: definition.tls_trust_pool,
                    trusted_proxies: definition.trusted_proxies,
                    status: ProxyStatus::Stopped,
                    create_time: "2026-10-19 08:00:00".into(),
                };
                state.servers.push(server.clone());
                RawResponse::new(201, serde_json::to_vec(&server).unwrap())
            }
            (method, ["caddy", "servers", name]) => {
                let index = state.servers.iter().position(|s| s.name == *name);
                match (method, index) {
                    (Method::Get, index) => ok(json!(index.map(|i| &state.servers[i]))),
                    (Method::Put, Some(index)) => {
                        let Some(definition) = parse_body::<NewCaddyServer>(request) else {
                            return error(400, "invalid server definition");
                        };
                        let server = &mut state.servers[index];
                        server.hostname = definition.hostname;
                        server.port = definition.port;
                        server.upstream_url = definition.upstream_url;
                        server.tls_trust_pool = definition.tls_trust_pool;
                        server.trusted_proxies = definition.trusted_proxies;
                        ok(json!({ "message": "updated" }))
                    }
                    (Method::Put, None) => error(500, "server not found"),
                    _ => error(405, "method not allowed"),
                }
            }
            (Method::Post, ["caddy", "actions", action @ ("start" | "stop")]) => {
                let name = parse_body::<serde_json::Value>(request)
                    .and_then(|body| body.get("name").and_then(|n| n.as_str()).map(str::to_string))
                    .unwrap_or_default();
                let Some(server) = state.servers.iter_mut().find(|s| s.name == name) else {
                    return error(500, "server not found");
                };
                server.status = if *action == "start" {
                    ProxyStatus::Running
                } else {
                    ProxyStatus::Stopped
                };
                ok(json!(server))
            }
            _ => error(404, "not found"),
        }
    }
}

fn parse_body<T: serde::de::DeserializeOwned>(request: &Request) -> Option<T> {
    request
        .body
        .as_deref()
        .and_then(|b| serde_json::from_slice(b).ok())
}

impl HttpBackend for FakeControlService {
    fn execute(&self, url: &Url, request: &Request) -> Result<RawResponse, TransportError> {
        self.sent.lock().unwrap().push(SentRequest::record(url, request));
        Ok(self.route(url, request))
    }
}

fn ok(body: serde_json::Value) -> RawResponse {
    RawResponse::new(200, serde_json::to_vec(&body).unwrap())
}

fn error(status: u16, message: &str) -> RawResponse {
    RawResponse::new(status, serde_json::to_vec(&json!({ "error": message })).unwrap())
}
