//! Adapter for Geth and Geth-compatible nodes
//!
//! Peer management goes through the `admin` namespace, which must be enabled
//! on the node (`--rpcapi admin,eth,net,web3`).

use alloy::primitives::U64;
use async_trait::async_trait;
use serde::{de::IgnoredAny, Deserialize};
use serde_json::json;
use tracing::{debug, instrument};

use crate::{
    agent::{NodeKind, UserAgent},
    error::NodeError,
    node::EthNode,
    peer::{enode_url, PeerInfo},
    rpc::{request, ContractBackend, RpcCaller},
};

/// Subset of the `admin_nodeInfo` response we rely on
#[derive(Debug, Deserialize)]
struct NodeInfo {
    #[serde(default)]
    enode: String,
}

pub struct GethNode {
    client: Box<dyn RpcCaller>,
    agent: UserAgent,
}

impl GethNode {
    pub fn new(client: Box<dyn RpcCaller>, agent: UserAgent) -> Self {
        Self { client, agent }
    }

    /// Verify the node exposes the `admin` APIs this adapter needs
    ///
    /// # Returns
    ///
    /// * `Result<(), NodeError>` - The RPC error unchanged if `admin_nodeInfo` fails,
    ///   or [`NodeError::Incompatible`] if it answers without an enode
    #[instrument(skip(self), err)]
    pub async fn check_compatible(&self) -> Result<(), NodeError> {
        let info = self.node_info().await?;
        if info.enode.is_empty() {
            return Err(NodeError::Incompatible(format!(
                "{} returned no enode from admin_nodeInfo",
                self.agent.version()
            )));
        }
        debug!("Geth-compatible node detected: {}", info.enode);
        Ok(())
    }

    async fn node_info(&self) -> Result<NodeInfo, NodeError> {
        request(self.client.as_ref(), "admin_nodeInfo", json!([])).await
    }
}

#[async_trait]
impl EthNode for GethNode {
    fn kind(&self) -> NodeKind {
        NodeKind::Geth
    }

    fn user_agent(&self) -> &UserAgent {
        &self.agent
    }

    fn contract_backend(&self) -> ContractBackend {
        self.client.contract_backend()
    }

    async fn enode(&self) -> Result<String, NodeError> {
        Ok(self.node_info().await?.enode)
    }

    #[instrument(skip(self), err)]
    async fn add_trusted_peer(&self, node_id: &str) -> Result<(), NodeError> {
        let _: IgnoredAny = request(
            self.client.as_ref(),
            "admin_addTrustedPeer",
            json!([enode_url(node_id)]),
        )
        .await?;
        Ok(())
    }

    #[instrument(skip(self), err)]
    async fn remove_trusted_peer(&self, node_id: &str) -> Result<(), NodeError> {
        let _: IgnoredAny = request(
            self.client.as_ref(),
            "admin_removeTrustedPeer",
            json!([enode_url(node_id)]),
        )
        .await?;
        Ok(())
    }

    #[instrument(skip(self), err)]
    async fn connect_peer(&self, node_uri: &str) -> Result<(), NodeError> {
        let _: IgnoredAny =
            request(self.client.as_ref(), "admin_addPeer", json!([node_uri])).await?;
        Ok(())
    }

    #[instrument(skip(self), err)]
    async fn disconnect_peer(&self, node_id: &str) -> Result<(), NodeError> {
        let _: IgnoredAny = request(
            self.client.as_ref(),
            "admin_removePeer",
            json!([enode_url(node_id)]),
        )
        .await?;
        Ok(())
    }

    async fn peers(&self) -> Result<Vec<PeerInfo>, NodeError> {
        request(self.client.as_ref(), "admin_peers", json!([])).await
    }

    async fn block_number(&self) -> Result<u64, NodeError> {
        let number: U64 = request(self.client.as_ref(), "eth_blockNumber", json!([])).await?;
        Ok(number.to::<u64>())
    }
}
