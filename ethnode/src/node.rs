//! Client detection and dispatch
//!
//! [`RemoteNode::detect`] asks the node who it is and picks the adapter that
//! speaks its dialect. The choice is made once; every later call goes
//! straight to the selected adapter.

use async_trait::async_trait;
use serde_json::json;
use tracing::{info, instrument};

use crate::{
    agent::{NodeKind, UserAgent},
    error::NodeError,
    geth::GethNode,
    parity::ParityNode,
    peer::PeerInfo,
    rpc::{request, ContractBackend, RpcCaller, RpcClient},
};

/// The normalized interface over different kinds of nodes
#[async_trait]
pub trait EthNode: Send + Sync {
    /// Kind of adapter serving this node. Unrecognized clients are served as Geth.
    fn kind(&self) -> NodeKind;

    /// User agent reported by the node at detection time
    fn user_agent(&self) -> &UserAgent;

    /// Backend for alloy contract bindings
    fn contract_backend(&self) -> ContractBackend;

    /// This node's `enode://...` URI
    async fn enode(&self) -> Result<String, NodeError>;

    /// Add a node id to the set of peers that may always connect, even when
    /// the maximum number of connections is reached.
    async fn add_trusted_peer(&self, node_id: &str) -> Result<(), NodeError>;

    /// Remove a node id from the trusted set.
    async fn remove_trusted_peer(&self, node_id: &str) -> Result<(), NodeError>;

    /// Prompt a connection to the given enode URI.
    async fn connect_peer(&self, node_uri: &str) -> Result<(), NodeError>;

    /// Disconnect from the given node id, if connected.
    async fn disconnect_peer(&self, node_id: &str) -> Result<(), NodeError>;

    /// Currently connected peers
    async fn peers(&self) -> Result<Vec<PeerInfo>, NodeError>;

    /// Current synced block number
    async fn block_number(&self) -> Result<u64, NodeError>;
}

/// Query the node for `web3_clientVersion`, `eth_protocolVersion` and
/// `net_version`, in that order, and parse the results.
///
/// Stops at the first failing call.
#[instrument(skip(client), err)]
pub async fn detect_client(client: &dyn RpcCaller) -> Result<UserAgent, NodeError> {
    let client_version: String = request(client, "web3_clientVersion", json!([])).await?;
    let protocol_version: String = request(client, "eth_protocolVersion", json!([])).await?;
    let net_version: String = request(client, "net_version", json!([])).await?;

    Ok(UserAgent::parse(&client_version, &protocol_version, &net_version)?)
}

/// A node adapter selected by client detection
pub enum RemoteNode {
    Geth(GethNode),
    Parity(ParityNode),
}

impl RemoteNode {
    /// Connect to `rpc_url` and detect the node behind it.
    ///
    /// No deadline is applied; wrap the call in `tokio::time::timeout` to bound it.
    pub async fn dial(rpc_url: &str) -> Result<Self, NodeError> {
        let client = RpcClient::connect(rpc_url).await?;
        Self::detect(Box::new(client)).await
    }

    /// Detect the kind of node behind `client` and build its adapter.
    ///
    /// Parity nodes get the Parity adapter. Everything else, including
    /// unrecognized clients, is treated as Geth and must pass the Geth
    /// compatibility check first.
    ///
    /// # Returns
    ///
    /// * `Result<Self, NodeError>` - The adapter, or the first detection or compatibility error
    pub async fn detect(client: Box<dyn RpcCaller>) -> Result<Self, NodeError> {
        let agent = detect_client(client.as_ref()).await?;
        info!(
            kind = %agent.kind(),
            network = %agent.network(),
            full_node = agent.is_full_node(),
            "Detected node: {}",
            agent.version()
        );

        match agent.kind() {
            NodeKind::Parity => Ok(RemoteNode::Parity(ParityNode::new(client, agent))),
            NodeKind::Geth | NodeKind::Unknown => {
                let node = GethNode::new(client, agent);
                node.check_compatible().await?;
                Ok(RemoteNode::Geth(node))
            }
        }
    }

    fn adapter(&self) -> &dyn EthNode {
        match self {
            RemoteNode::Geth(node) => node,
            RemoteNode::Parity(node) => node,
        }
    }
}

#[async_trait]
impl EthNode for RemoteNode {
    fn kind(&self) -> NodeKind {
        self.adapter().kind()
    }

    fn user_agent(&self) -> &UserAgent {
        self.adapter().user_agent()
    }

    fn contract_backend(&self) -> ContractBackend {
        self.adapter().contract_backend()
    }

    async fn enode(&self) -> Result<String, NodeError> {
        self.adapter().enode().await
    }

    async fn add_trusted_peer(&self, node_id: &str) -> Result<(), NodeError> {
        self.adapter().add_trusted_peer(node_id).await
    }

    async fn remove_trusted_peer(&self, node_id: &str) -> Result<(), NodeError> {
        self.adapter().remove_trusted_peer(node_id).await
    }

    async fn connect_peer(&self, node_uri: &str) -> Result<(), NodeError> {
        self.adapter().connect_peer(node_uri).await
    }

    async fn disconnect_peer(&self, node_id: &str) -> Result<(), NodeError> {
        self.adapter().disconnect_peer(node_id).await
    }

    async fn peers(&self) -> Result<Vec<PeerInfo>, NodeError> {
        self.adapter().peers().await
    }

    async fn block_number(&self) -> Result<u64, NodeError> {
        self.adapter().block_number().await
    }
}
