//! Command lines, static peers and the adapter factory across all clients.

mod common;

use common::{dev_network, dev_node, peers, PEERS};
use eth_clients::{
    new_client,
    spec::{Api, ForkName},
    ClientKind, NetworkConfig, NetworkConfigError, NodeSpec, UnsupportedClientError,
};
use rstest::rstest;

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    let position = args.iter().position(|arg| arg == flag)?;
    args.get(position + 1).map(String::as_str)
}

#[rstest]
#[case::besu("besu", "--data-path", "/opt/besu/kotal-data")]
#[case::geth("geth", "--datadir", "/home/ethereum/kotal-data")]
#[case::nethermind("nethermind", "--datadir", "/home/nethermind/kotal-data")]
#[case::parity("parity", "--base-path", "/home/openethereum/kotal-data")]
fn data_dir_comes_first(#[case] kind: &str, #[case] flag: &str, #[case] path: &str) {
    let adapter = new_client(kind).unwrap();
    let node = NodeSpec::new(adapter.kind());
    let args = adapter.args(&node, &NetworkConfig::default());
    assert_eq!(&args[..2], [flag, path]);
}

#[rstest]
#[case::besu(ClientKind::Besu, "--genesis-file", "/opt/besu/kotal-config/genesis.json")]
#[case::geth(ClientKind::Geth, "--networkid", "5555")]
#[case::nethermind(
    ClientKind::Nethermind,
    "--Init.ChainSpecPath",
    "/home/nethermind/kotal-config/genesis.json"
)]
#[case::parity(ClientKind::Parity, "--chain", "/home/openethereum/kotal-config/genesis.json")]
fn private_network_flags(#[case] kind: ClientKind, #[case] flag: &str, #[case] value: &str) {
    let args = kind.adapter().args(&NodeSpec::new(kind), &dev_network());
    assert_eq!(flag_value(&args, flag), Some(value));
}

#[test]
fn dev_node_runs_a_besu_signer() {
    let node = dev_node();
    let args = node.client.adapter().args(&node, &dev_network());

    assert_eq!(flag_value(&args, "--rpc-http-api"), Some("ETH,NET,WEB3,CLIQUE"));
    assert_eq!(flag_value(&args, "--rpc-ws-api"), Some("WEB3,ETH,NET"));
    let coinbase = node.coinbase.unwrap().to_checksum(None);
    assert_eq!(flag_value(&args, "--miner-coinbase"), Some(coinbase.as_str()));
    assert!(args.iter().any(|arg| arg == "--miner-enabled"));
    assert_eq!(
        flag_value(&args, "--static-nodes-file"),
        Some("/opt/besu/kotal-config/static-nodes.json")
    );
    assert_eq!(
        flag_value(&args, "--node-private-key-file"),
        Some("/opt/besu/.kotal-secrets/nodekey")
    );
}

#[rstest]
#[case::besu(ClientKind::Besu)]
#[case::geth(ClientKind::Geth)]
#[case::nethermind(ClientKind::Nethermind)]
#[case::parity(ClientKind::Parity)]
fn args_are_deterministic(#[case] kind: ClientKind) {
    let mut node = dev_node();
    node.client = kind;
    node.bootnodes = peers();
    node.rpc_api.push(Api::Debug);

    let adapter = kind.adapter();
    let network = dev_network();
    assert_eq!(adapter.args(&node, &network), adapter.args(&node, &network));
}

#[rstest]
#[case::besu(ClientKind::Besu, "--bootnodes")]
#[case::geth(ClientKind::Geth, "--bootnodes")]
#[case::nethermind(ClientKind::Nethermind, "--Discovery.Bootnodes")]
#[case::parity(ClientKind::Parity, "--bootnodes")]
fn bootnodes_are_comma_joined(#[case] kind: ClientKind, #[case] flag: &str) {
    let mut node = NodeSpec::new(kind);
    node.bootnodes = peers();
    let args = kind.adapter().args(&node, &NetworkConfig::public("goerli"));
    assert_eq!(flag_value(&args, flag), Some(PEERS.join(",").as_str()));
}

#[test]
fn static_nodes_per_client_format() {
    let peers = peers();
    let json_array = format!("[\"{}\",\"{}\"]", PEERS[0], PEERS[1]);

    assert_eq!(ClientKind::Besu.adapter().encode_static_nodes(&peers), json_array);
    assert_eq!(ClientKind::Nethermind.adapter().encode_static_nodes(&peers), json_array);
    assert_eq!(
        ClientKind::Geth.adapter().encode_static_nodes(&peers),
        format!("[Node.P2P]\nStaticNodes = [\"{}\",\"{}\"]", PEERS[0], PEERS[1])
    );
    assert_eq!(ClientKind::Parity.adapter().encode_static_nodes(&peers), PEERS.join("\n"));
}

#[test]
fn unknown_client_is_rejected() {
    let err = new_client("unknown-client").unwrap_err();
    assert_eq!(err, UnsupportedClientError("unknown-client".to_string()));
    assert!(err.to_string().contains("unknown-client"));

    // Tags are exact, lowercase names.
    assert!(new_client("Geth").is_err());
    assert!(new_client("openethereum").is_err());
}

#[test]
fn every_kind_resolves() {
    for kind in ClientKind::ALL {
        assert_eq!(new_client(kind.as_str()).unwrap().kind(), kind);
    }
}

#[test]
fn out_of_order_forks_are_all_reported() {
    let mut network = dev_network();
    let genesis = network.genesis.as_mut().unwrap();
    genesis.forks.homestead = 10;
    genesis.forks.berlin = 30;
    genesis.forks.london = 20;
    genesis.forks.arrow_glacier = 30;

    let Err(NetworkConfigError::ForkOrder(err)) = network.validate() else {
        panic!("expected fork order violations");
    };
    let later: Vec<_> = err.violations.iter().map(|violation| violation.later.0).collect();
    assert_eq!(later, [ForkName::Eip150, ForkName::London]);
}

#[test]
fn bootnode_hosts_cannot_smuggle_extra_entries() {
    let crafted = PEERS[0].replace("10.3.58.6", "10.0.0.1,evil host");
    let node = format!(r#"{{"client": "besu", "bootnodes": ["{crafted}"]}}"#);
    assert!(serde_json::from_str::<NodeSpec>(&node).is_err());
}
