//! Adapter for Parity (OpenEthereum) nodes
//!
//! Parity has no separate notion of trusted peers; reserved peers fill that
//! role and are also how connections are requested.

use alloy::primitives::U64;
use async_trait::async_trait;
use serde::{de::IgnoredAny, Deserialize};
use serde_json::json;
use tracing::instrument;

use crate::{
    agent::{NodeKind, UserAgent},
    error::NodeError,
    node::EthNode,
    peer::{enode_url, PeerInfo},
    rpc::{request, ContractBackend, RpcCaller},
};

/// Response of `parity_netPeers`
#[derive(Debug, Deserialize)]
struct NetPeers {
    #[serde(default)]
    peers: Vec<PeerInfo>,
}

pub struct ParityNode {
    client: Box<dyn RpcCaller>,
    agent: UserAgent,
}

impl ParityNode {
    pub fn new(client: Box<dyn RpcCaller>, agent: UserAgent) -> Self {
        Self { client, agent }
    }

    async fn reserved_peer(&self, method: &'static str, node_uri: String) -> Result<(), NodeError> {
        let _: IgnoredAny = request(self.client.as_ref(), method, json!([node_uri])).await?;
        Ok(())
    }
}

#[async_trait]
impl EthNode for ParityNode {
    fn kind(&self) -> NodeKind {
        NodeKind::Parity
    }

    fn user_agent(&self) -> &UserAgent {
        &self.agent
    }

    fn contract_backend(&self) -> ContractBackend {
        self.client.contract_backend()
    }

    async fn enode(&self) -> Result<String, NodeError> {
        request(self.client.as_ref(), "parity_enode", json!([])).await
    }

    #[instrument(skip(self), err)]
    async fn add_trusted_peer(&self, node_id: &str) -> Result<(), NodeError> {
        self.reserved_peer("parity_addReservedPeer", enode_url(node_id)).await
    }

    #[instrument(skip(self), err)]
    async fn remove_trusted_peer(&self, node_id: &str) -> Result<(), NodeError> {
        self.reserved_peer("parity_removeReservedPeer", enode_url(node_id)).await
    }

    #[instrument(skip(self), err)]
    async fn connect_peer(&self, node_uri: &str) -> Result<(), NodeError> {
        self.reserved_peer("parity_addReservedPeer", node_uri.to_string()).await
    }

    #[instrument(skip(self), err)]
    async fn disconnect_peer(&self, node_id: &str) -> Result<(), NodeError> {
        self.reserved_peer("parity_removeReservedPeer", enode_url(node_id)).await
    }

    async fn peers(&self) -> Result<Vec<PeerInfo>, NodeError> {
        let net: NetPeers = request(self.client.as_ref(), "parity_netPeers", json!([])).await?;
        Ok(net.peers)
    }

    async fn block_number(&self) -> Result<u64, NodeError> {
        let number: U64 = request(self.client.as_ref(), "eth_blockNumber", json!([])).await?;
        Ok(number.to::<u64>())
    }
}
