#![allow(dead_code)]

use actix_web::{dev::ServerHandle, web, App, HttpResponse, HttpServer};
use serde_json::{json, Value};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

pub const GETH_VERSION: &str = "Geth/v1.9.0-stable-52f24617/linux-amd64/go1.12.7";
pub const PARITY_VERSION: &str = "Parity-Ethereum//v2.5.5-stable-3ebc769-20190708/x86_64-linux-gnu/rustc1.36.0";

/// In-process JSON-RPC node answering from a fixed table of results
///
/// Methods missing from the table get the "method not found" error Geth
/// returns for disabled namespaces. Every request is recorded.
#[derive(Clone, Default)]
pub struct StubNode {
    responses: Arc<HashMap<String, Value>>,
    calls: Arc<Mutex<Vec<(String, Value)>>>,
}

impl StubNode {
    pub fn new(responses: Vec<(&str, Value)>) -> Self {
        Self {
            responses: Arc::new(
                responses
                    .into_iter()
                    .map(|(method, result)| (method.to_string(), result))
                    .collect(),
            ),
            calls: Arc::default(),
        }
    }

    /// A Geth mainnet full node with the admin API enabled
    pub fn geth() -> Self {
        Self::new(vec![
            ("web3_clientVersion", json!(GETH_VERSION)),
            ("eth_protocolVersion", json!("0x3f")),
            ("net_version", json!("1")),
            (
                "admin_nodeInfo",
                json!({ "id": "aa", "enode": "enode://aa@10.0.0.1:30303", "protocols": {} }),
            ),
            ("admin_addTrustedPeer", json!(true)),
            ("admin_removeTrustedPeer", json!(true)),
            ("admin_addPeer", json!(true)),
            ("admin_removePeer", json!(true)),
            (
                "admin_peers",
                json!([{ "id": "bb", "name": "Geth/v1.8.27-stable/linux-amd64/go1.11", "caps": ["eth/63"] }]),
            ),
            ("eth_blockNumber", json!("0x7a120")),
        ])
    }

    /// A Parity Kovan light client
    pub fn parity() -> Self {
        Self::new(vec![
            ("web3_clientVersion", json!(PARITY_VERSION)),
            ("eth_protocolVersion", json!("1")),
            ("net_version", json!("42")),
            ("parity_enode", json!("enode://cc@10.0.0.3:30303")),
            ("parity_addReservedPeer", json!(true)),
            ("parity_removeReservedPeer", json!(true)),
            (
                "parity_netPeers",
                json!({
                    "active": 1,
                    "connected": 1,
                    "max": 25,
                    "peers": [{ "id": "dd", "name": "Parity-Ethereum/v2.5.5", "caps": [] }]
                }),
            ),
            ("eth_blockNumber", json!("0x10")),
        ])
    }

    /// Methods received so far, in order
    pub fn methods(&self) -> Vec<String> {
        self.calls().into_iter().map(|(method, _)| method).collect()
    }

    /// Params of the last call to `method`
    pub fn last_params(&self, method: &str) -> Option<Value> {
        self.calls()
            .into_iter()
            .rev()
            .find(|(called, _)| called == method)
            .map(|(_, params)| params)
    }

    fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }

    /// Serve the stub on a free local port and return its handle and URL.
    ///
    /// # Panics
    ///
    /// Panics if it fails to bind to a free port.
    pub fn spawn(&self) -> (ServerHandle, String) {
        let stub = web::Data::new(self.clone());
        let server = HttpServer::new(move || {
            App::new()
                .app_data(stub.clone())
                .route("/", web::post().to(handle_rpc))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("Could not bind stub node");

        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_rt::spawn(server);

        (handle, format!("http://{addr}"))
    }
}

async fn handle_rpc(stub: web::Data<StubNode>, body: web::Json<Value>) -> HttpResponse {
    let method = body["method"].as_str().unwrap_or_default().to_string();
    let params = body.get("params").cloned().unwrap_or(Value::Null);
    let id = body["id"].clone();
    stub.calls.lock().unwrap().push((method.clone(), params));

    match stub.responses.get(&method) {
        Some(result) => HttpResponse::Ok().json(json!({
            "jsonrpc": "2.0",
            "id": id,
            "result": result,
        })),
        None => HttpResponse::Ok().json(json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": {
                "code": -32601,
                "message": format!("the method {method} does not exist/is not available"),
            },
        })),
    }
}
