//! Client user-agent parsing
//!
//! Turns the raw strings reported by `web3_clientVersion`, `eth_protocolVersion`
//! and `net_version` into a [`UserAgent`] describing which implementation is
//! running, which network it is on, and whether it is a full node.

use serde::Serialize;
use std::fmt;
use std::num::ParseIntError;
use thiserror::Error;

/// Protocol version reported by Parity light clients.
///
/// Anecdotal; no upstream documentation backs this value.
pub const PARITY_LIGHT_PROTOCOL: i32 = 1;

/// Protocol version reported by Geth light clients (LES).
///
/// Anecdotal; no upstream documentation backs this value.
pub const GETH_LIGHT_PROTOCOL: i32 = 10002;

/// Errors produced while parsing introspection results
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// `net_version` was not a base-10 64-bit signed integer
    #[error("invalid network version {value:?}: {source}")]
    NetworkVersion {
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// `eth_protocolVersion` was not a 32-bit integer literal
    #[error("invalid protocol version {0:?}")]
    ProtocolVersion(String),
}

/// The node implementations we know how to talk to.
///
/// `Unknown` is handled as Geth downstream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    #[default]
    Unknown,
    Geth,
    Parity,
}

impl NodeKind {
    /// Classify a `web3_clientVersion` string by its prefix.
    pub fn from_client_version(version: &str) -> Self {
        if version.starts_with("Geth/") {
            NodeKind::Geth
        } else if version.starts_with("Parity-Ethereum/") || version.starts_with("Parity/") {
            NodeKind::Parity
        } else {
            NodeKind::Unknown
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Unknown => "unknown",
            NodeKind::Geth => "geth",
            NodeKind::Parity => "parity",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ethereum network identifier as reported by `net_version`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct NetworkId(pub i64);

impl NetworkId {
    pub const MAINNET: NetworkId = NetworkId(1);
    pub const MORDEN: NetworkId = NetworkId(2);
    pub const ROPSTEN: NetworkId = NetworkId(3);
    pub const RINKEBY: NetworkId = NetworkId(4);
    pub const KOVAN: NetworkId = NetworkId(42);

    /// Canonical lowercase name, or `"unknown"` for unrecognized ids.
    pub fn name(&self) -> &'static str {
        match *self {
            NetworkId::MAINNET => "mainnet",
            NetworkId::MORDEN => "morden",
            NetworkId::ROPSTEN => "ropsten",
            NetworkId::RINKEBY => "rinkeby",
            NetworkId::KOVAN => "kovan",
            _ => "unknown",
        }
    }

    /// Compare against a network name, ignoring case.
    pub fn is(&self, network: &str) -> bool {
        self.name() == network.to_lowercase()
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Metadata about the client behind an RPC endpoint
///
/// Built once by [`UserAgent::parse`] and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserAgent {
    /// Result of `web3_clientVersion`
    version: String,

    /// Result of `eth_protocolVersion`
    eth_protocol: String,

    kind: NodeKind,
    network: NetworkId,
    full_node: bool,
}

impl UserAgent {
    /// Parse the outputs of `web3_clientVersion`, `eth_protocolVersion` and
    /// `net_version` into a user agent.
    ///
    /// # Arguments
    ///
    /// * `client_version` - Raw client version, e.g. `Geth/v1.9.0-stable/linux-amd64/go1.12`
    /// * `protocol_version` - Raw protocol version; decimal, or prefixed hex/octal/binary
    /// * `net_version` - Raw network id in base 10
    ///
    /// # Returns
    ///
    /// * `Result<Self, ParseError>` - Parsed user agent, or the first field that failed to parse
    pub fn parse(
        client_version: &str,
        protocol_version: &str,
        net_version: &str,
    ) -> Result<Self, ParseError> {
        let network = net_version
            .parse::<i64>()
            .map(NetworkId)
            .map_err(|source| ParseError::NetworkVersion {
                value: net_version.to_string(),
                source,
            })?;

        let kind = NodeKind::from_client_version(client_version);

        let protocol = parse_int_literal(protocol_version)
            .ok_or_else(|| ParseError::ProtocolVersion(protocol_version.to_string()))?;

        let full_node = !matches!(
            (kind, protocol),
            (NodeKind::Parity, PARITY_LIGHT_PROTOCOL) | (NodeKind::Geth, GETH_LIGHT_PROTOCOL)
        );

        Ok(Self {
            version: client_version.to_string(),
            eth_protocol: protocol_version.to_string(),
            kind,
            network,
            full_node,
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn eth_protocol(&self) -> &str {
        &self.eth_protocol
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn network(&self) -> NetworkId {
        self.network
    }

    /// Whether this is a full node rather than a light client
    pub fn is_full_node(&self) -> bool {
        self.full_node
    }
}

/// Parse a signed 32-bit integer literal with an optional `0x`, `0o`, `0b`
/// or leading-zero octal prefix.
///
/// Underscores may separate digits, or follow a base prefix (`0x_27_12`,
/// `1_000`); they may not lead an unprefixed literal, trail it, or repeat.
fn parse_int_literal(literal: &str) -> Option<i32> {
    let (negative, unsigned) = match literal.as_bytes().first() {
        Some(b'-') => (true, &literal[1..]),
        Some(b'+') => (false, &literal[1..]),
        _ => (false, literal),
    };

    let (radix, digits) = split_radix_prefix(unsigned);
    let digits = strip_separators(digits, radix != 10)?;
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }

    let magnitude = i64::from_str_radix(&digits, radix).ok()?;
    let value = if negative { -magnitude } else { magnitude };
    i32::try_from(value).ok()
}

fn split_radix_prefix(literal: &str) -> (u32, &str) {
    match literal.as_bytes() {
        [b'0', b'x' | b'X', ..] => (16, &literal[2..]),
        [b'0', b'o' | b'O', ..] => (8, &literal[2..]),
        [b'0', b'b' | b'B', ..] => (2, &literal[2..]),
        [b'0', _, ..] => (8, &literal[1..]),
        _ => (10, literal),
    }
}

/// Drop `_` digit separators, rejecting misplaced ones.
fn strip_separators(digits: &str, prefixed: bool) -> Option<String> {
    if !digits.contains('_') {
        return Some(digits.to_string());
    }
    if digits.ends_with('_') || digits.contains("__") || (!prefixed && digits.starts_with('_')) {
        return None;
    }
    Some(digits.replace('_', ""))
}
