use serde::{Deserialize, Deserializer, Serialize};

/// Placeholder address used when a method wants a full enode URI but only the
/// node id is known. Nodes match trusted and connected peers by id alone.
pub const PLACEHOLDER_ENDPOINT: &str = "127.0.0.1:30303";

/// Node id and client metadata about a connected peer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerInfo {
    /// Unique node identifier (also the encryption pubkey)
    #[serde(default, deserialize_with = "null_as_empty")]
    pub id: String,

    /// Name of the node, including client type, version, OS, custom data
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
}

/// Build an `enode://` URI for `node_id`. Values that already are enode URIs
/// are returned unchanged.
pub fn enode_url(node_id: &str) -> String {
    if node_id.starts_with("enode://") {
        node_id.to_string()
    } else {
        format!("enode://{node_id}@{PLACEHOLDER_ENDPOINT}")
    }
}

// Parity reports `null` ids for peers still handshaking.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
