use alloy_primitives::{address, Address};
use eth_clients::{
    spec::{ConsensusConfig, Enode, GenesisSpec, Ibft2Config},
    NetworkConfig, NodeSpec,
};

const DEV_NETWORK: &str = include_str!("../../etc/dev-network.json");
const DEV_NODE: &str = include_str!("../../etc/dev-node.json");

/// Validators of the three-node IBFT 2.0 reference network.
pub(crate) const VALIDATORS: [Address; 3] = [
    address!("427e2c7cecd72bc4cdd4f7ebb8bb6e49789c8044"),
    address!("d2c21213027cbf4d46c16b55fa98e5252b048706"),
    address!("8e1f6c7c76a1d7f74eda342d330ca9749f31cc2b"),
];

/// `extraData` Besu computes for [`VALIDATORS`].
#[allow(dead_code)]
pub(crate) const IBFT2_EXTRA_DATA: &str = "0xf869a00000000000000000000000000000000000000000000000000000000000000000f83f94427e2c7cecd72bc4cdd4f7ebb8bb6e49789c804494d2c21213027cbf4d46c16b55fa98e5252b048706948e1f6c7c76a1d7f74eda342d330ca9749f31cc2b808400000000c0";

#[allow(dead_code)]
pub(crate) const PEERS: [&str; 2] = [
    "enode://6f8a80d14311c39f35f516fa664deaaaa13e85b2f7493f37f6144d86991ec012937307647bd3b9a82abe2974e1407241d54947bbb39763a4cac9f77166ad92a0@10.3.58.6:30303",
    "enode://a979fb575495b8d6db44f750317d0f4622bf4c2aa3365d6af7c284339968eef29b69ad0dce72a4d8db5ebb4968de0e3bec910127f134779fbcb0cb6d3331163c@52.16.188.185:30303",
];

/// Private Clique network with London active at genesis.
#[allow(dead_code)]
pub(crate) fn dev_network() -> NetworkConfig {
    serde_json::from_str(DEV_NETWORK).expect("valid dev network")
}

/// Besu signer node of [`dev_network`].
#[allow(dead_code)]
pub(crate) fn dev_node() -> NodeSpec {
    serde_json::from_str(DEV_NODE).expect("valid dev node")
}

/// Private IBFT 2.0 network sealed by [`VALIDATORS`].
#[allow(dead_code)]
pub(crate) fn ibft2_network() -> NetworkConfig {
    let genesis =
        GenesisSpec::new(2021, 2021, ConsensusConfig::Ibft2(Ibft2Config::new(VALIDATORS.to_vec())));
    NetworkConfig::private(genesis)
}

#[allow(dead_code)]
pub(crate) fn peers() -> Vec<Enode> {
    PEERS.iter().map(|peer| peer.parse().expect("valid enode")).collect()
}
