//! Uniform access to Ethereum nodes
//!
//! Detects whether an RPC endpoint is served by Geth or Parity and exposes
//! peer management and chain queries through one [`EthNode`] interface.

pub mod agent;
pub mod api;
pub mod config;
pub mod error;
pub mod geth;
pub mod models;
pub mod node;
pub mod parity;
pub mod peer;
pub mod rpc;
pub mod service;

pub use agent::{NetworkId, NodeKind, ParseError, UserAgent};
pub use error::NodeError;
pub use node::{detect_client, EthNode, RemoteNode};
pub use peer::PeerInfo;
pub use rpc::{ContractBackend, RpcCaller, RpcClient};
