//! Client detection and adapter selection over HTTP

use crate::helpers::{StubNode, GETH_VERSION};
use crate::init_logger;
use ethnode::{
    agent::ParseError, EthNode, NetworkId, NodeError, NodeKind, RemoteNode, RpcClient,
};
use serde_json::json;

#[actix_web::test]
async fn test_detect_geth() {
    init_logger();
    let stub = StubNode::geth();
    let (server, rpc_url) = stub.spawn();

    let node = RemoteNode::dial(&rpc_url).await.expect("Failed to detect node");

    assert!(matches!(node, RemoteNode::Geth(_)));
    assert_eq!(node.kind(), NodeKind::Geth);
    assert_eq!(node.user_agent().version(), GETH_VERSION);
    assert_eq!(node.user_agent().network(), NetworkId::MAINNET);
    assert!(node.user_agent().is_full_node());

    // Introspection runs in order, then the compatibility check.
    assert_eq!(
        stub.methods(),
        ["web3_clientVersion", "eth_protocolVersion", "net_version", "admin_nodeInfo"]
    );

    server.stop(true).await;
}

#[actix_web::test]
async fn test_detect_parity() {
    init_logger();
    let stub = StubNode::parity();
    let (server, rpc_url) = stub.spawn();

    let node = RemoteNode::dial(&rpc_url).await.expect("Failed to detect node");

    assert!(matches!(node, RemoteNode::Parity(_)));
    assert!(node.user_agent().network().is("Kovan"));
    assert!(!node.user_agent().is_full_node());
    assert_eq!(
        stub.methods(),
        ["web3_clientVersion", "eth_protocolVersion", "net_version"]
    );

    server.stop(true).await;
}

#[actix_web::test]
async fn test_detect_client_only() {
    init_logger();
    let stub = StubNode::geth();
    let (server, rpc_url) = stub.spawn();

    let client = RpcClient::connect(&rpc_url).await.unwrap();
    let agent = ethnode::detect_client(&client).await.unwrap();
    assert_eq!(agent.kind(), NodeKind::Geth);
    assert_eq!(agent.eth_protocol(), "0x3f");
    assert_eq!(stub.methods().len(), 3);

    server.stop(true).await;
}

#[actix_web::test]
async fn test_unknown_client_is_served_as_geth() {
    init_logger();
    let stub = StubNode::new(vec![
        ("web3_clientVersion", json!("Nethermind/v1.8.0/linux-x64/dotnet3.1")),
        ("eth_protocolVersion", json!("0x41")),
        ("net_version", json!("4")),
        ("admin_nodeInfo", json!({ "enode": "enode://ee@10.0.0.5:30303" })),
    ]);
    let (server, rpc_url) = stub.spawn();

    let node = RemoteNode::dial(&rpc_url).await.expect("Failed to detect node");
    assert_eq!(node.kind(), NodeKind::Geth);
    assert_eq!(node.user_agent().kind(), NodeKind::Unknown);
    assert_eq!(node.user_agent().network(), NetworkId::RINKEBY);

    server.stop(true).await;
}

#[actix_web::test]
async fn test_incompatible_node_is_rejected() {
    init_logger();
    // No admin namespace.
    let stub = StubNode::new(vec![
        ("web3_clientVersion", json!("SomeOtherClient/1.0")),
        ("eth_protocolVersion", json!("63")),
        ("net_version", json!("4")),
    ]);
    let (server, rpc_url) = stub.spawn();

    let err = RemoteNode::dial(&rpc_url)
        .await
        .err()
        .expect("Detection should fail");
    assert!(matches!(err, NodeError::Rpc(_)));
    assert!(err.to_string().contains("admin_nodeInfo"));

    server.stop(true).await;
}

#[actix_web::test]
async fn test_detection_stops_at_first_error() {
    init_logger();
    let stub = StubNode::new(vec![
        ("web3_clientVersion", json!("Geth/v1.9.0-stable")),
        ("net_version", json!("1")),
    ]);
    let (server, rpc_url) = stub.spawn();

    let err = RemoteNode::dial(&rpc_url)
        .await
        .err()
        .expect("Detection should fail");
    assert!(matches!(err, NodeError::Rpc(_)));
    assert_eq!(stub.methods(), ["web3_clientVersion", "eth_protocolVersion"]);

    server.stop(true).await;
}

#[actix_web::test]
async fn test_malformed_versions() {
    init_logger();
    let stub = StubNode::new(vec![
        ("web3_clientVersion", json!("Geth/v1.9.0-stable")),
        ("eth_protocolVersion", json!("63")),
        ("net_version", json!("mainnet")),
    ]);
    let (server, rpc_url) = stub.spawn();

    let err = RemoteNode::dial(&rpc_url)
        .await
        .err()
        .expect("Detection should fail");
    assert!(matches!(
        err,
        NodeError::Parse(ParseError::NetworkVersion { .. })
    ));

    server.stop(true).await;
}

#[actix_web::test]
async fn test_unreachable_node() {
    init_logger();
    // Bind and drop a stub so the port is known to be closed.
    let (server, rpc_url) = StubNode::default().spawn();
    server.stop(true).await;

    let err = RemoteNode::dial(&rpc_url)
        .await
        .err()
        .expect("Detection should fail");
    assert!(matches!(err, NodeError::Rpc(_)));
}
