use std::{borrow::Cow, sync::Arc};

use alloy::{
    network::Ethereum,
    providers::{Provider, ProviderBuilder},
};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{value::to_raw_value, Value};
use tracing::{debug, instrument};

use crate::error::NodeError;

/// Backend handed to alloy contract bindings
pub type ContractBackend = Arc<dyn Provider<Ethereum>>;

/// A connection capable of invoking JSON-RPC methods on a node
///
/// This is the only seam between the node adapters and the transport. The
/// production implementation is [`RpcClient`]; tests substitute a mock.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RpcCaller: Send + Sync {
    /// Invoke `method` with positional `params` and return the raw result
    async fn call_raw(&self, method: &'static str, params: Value) -> Result<Value, NodeError>;

    /// Provider used for contract calls against the same node
    fn contract_backend(&self) -> ContractBackend;
}

/// Invoke `method` and decode its result into `R`.
///
/// # Arguments
///
/// * `client` - Connection to call through
/// * `method` - JSON-RPC method name
/// * `params` - Positional parameters, as a JSON array
///
/// # Returns
///
/// * `Result<R, NodeError>` - Decoded result, or the transport/decode error unchanged
pub async fn request<R: DeserializeOwned>(
    client: &dyn RpcCaller,
    method: &'static str,
    params: Value,
) -> Result<R, NodeError> {
    let result = client.call_raw(method, params).await?;
    serde_json::from_value(result).map_err(|source| NodeError::Decode { method, source })
}

/// Ethereum RPC client backed by an alloy provider
///
/// Works over any transport alloy selects from the URL scheme (HTTP,
/// WebSocket, IPC).
#[derive(Clone)]
pub struct RpcClient {
    /// Typed provider for Ethereum network
    pub provider: Arc<dyn Provider<Ethereum>>,
}

impl RpcClient {
    /// Wrap an existing provider
    pub fn new(provider: Arc<dyn Provider<Ethereum>>) -> Self {
        Self { provider }
    }

    /// Connect to the node at `rpc_url`
    ///
    /// No request is sent here; the first failure surfaces on the first call.
    /// WebSocket and IPC endpoints are dialed eagerly and fail immediately.
    ///
    /// # Arguments
    ///
    /// * `rpc_url` - `http(s)://`, `ws(s)://` URL or an IPC socket path
    ///
    /// # Returns
    ///
    /// * `Result<Self, NodeError>` - New client instance or the dial error
    pub async fn connect(rpc_url: &str) -> Result<Self, NodeError> {
        debug!("Connecting to node at {}", rpc_url);
        let provider = ProviderBuilder::new()
            .network::<Ethereum>()
            .on_builtin(rpc_url)
            .await?;

        Ok(Self::new(Arc::new(provider)))
    }
}

#[async_trait]
impl RpcCaller for RpcClient {
    #[instrument(skip(self, params), err)]
    async fn call_raw(&self, method: &'static str, params: Value) -> Result<Value, NodeError> {
        let params = to_raw_value(&params).map_err(|source| NodeError::Encode { method, source })?;
        let raw = self
            .provider
            .raw_request_dyn(Cow::Borrowed(method), &params)
            .await?;
        debug!("{} returned {}", method, raw.get());

        serde_json::from_str(raw.get()).map_err(|source| NodeError::Decode { method, source })
    }

    fn contract_backend(&self) -> ContractBackend {
        self.provider.clone()
    }
}
