use crate::{
    agent::{NetworkId, NodeKind},
    error::{NodeError, ServiceError},
    models::jsonrpc::format_hex_u64,
    node::EthNode,
};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, instrument};

/// Snapshot returned by the health check
#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    /// Adapter serving the node; unknown clients are served by Geth
    pub kind: NodeKind,
    /// Client kind parsed from `web3_clientVersion`
    pub detected_kind: NodeKind,
    pub network: NetworkId,
    pub network_name: &'static str,
    pub full_node: bool,
    pub block_number: u64,
}

/// Service exposing a detected node to HTTP callers
///
/// Holds the adapter chosen at startup and maps the `node_*` JSON-RPC methods
/// onto it.
pub struct NodeService {
    node: Box<dyn EthNode>,
}

impl NodeService {
    pub fn new(node: impl EthNode + 'static) -> Self {
        Self {
            node: Box::new(node),
        }
    }

    /// Check the node still answers by fetching its block number
    #[instrument(skip(self), err)]
    pub async fn health(&self) -> Result<HealthReport, NodeError> {
        let block_number = self.node.block_number().await?;
        let agent = self.node.user_agent();

        Ok(HealthReport {
            status: "ok",
            kind: self.node.kind(),
            detected_kind: agent.kind(),
            network: agent.network(),
            network_name: agent.network().name(),
            full_node: agent.is_full_node(),
            block_number,
        })
    }

    /// Dispatch a `node_*` JSON-RPC method
    ///
    /// # Arguments
    ///
    /// * `method` - Method name, e.g. `node_addTrustedPeer`
    /// * `params` - Positional parameters; peer methods expect one string
    ///
    /// # Returns
    ///
    /// * `Result<Value, ServiceError>` - JSON result; `InvalidRequest` for unknown
    ///   methods or missing parameters, `NodeUnavailable` when the node call fails
    #[instrument(skip(self, params), err)]
    pub async fn call(&self, method: &str, params: &[Value]) -> Result<Value, ServiceError> {
        debug!("Dispatching {} with {} params", method, params.len());

        let result = match method {
            "node_kind" => json!(self.node.kind()),
            "node_userAgent" => json!(self.node.user_agent()),
            "node_enode" => json!(self.node.enode().await?),
            "node_addTrustedPeer" => {
                self.node.add_trusted_peer(first_param(method, params)?).await?;
                Value::Bool(true)
            }
            "node_removeTrustedPeer" => {
                self.node.remove_trusted_peer(first_param(method, params)?).await?;
                Value::Bool(true)
            }
            "node_connectPeer" => {
                self.node.connect_peer(first_param(method, params)?).await?;
                Value::Bool(true)
            }
            "node_disconnectPeer" => {
                self.node.disconnect_peer(first_param(method, params)?).await?;
                Value::Bool(true)
            }
            "node_peers" => json!(self.node.peers().await?),
            "node_blockNumber" => json!(format_hex_u64(self.node.block_number().await?)),
            _ => {
                return Err(ServiceError::InvalidRequest(format!(
                    "Unsupported method: {method}"
                )))
            }
        };
        Ok(result)
    }
}

fn first_param<'a>(method: &str, params: &'a [Value]) -> Result<&'a str, ServiceError> {
    params.first().and_then(Value::as_str).ok_or_else(|| {
        ServiceError::InvalidRequest(format!("{method} expects one string parameter"))
    })
}
