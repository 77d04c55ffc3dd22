//! Data models used by the HTTP API
//!
//! This module contains the JSON-RPC envelopes served by the node service.

// JSON-RPC protocol data structures
pub mod jsonrpc;
