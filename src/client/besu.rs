//! Hyperledger Besu.

use super::{
    args::{
        api_list, render, Arg, ArgContext, Emit, ANY_INTERFACE, GENESIS_FILE, JWT_SECRET_FILE,
        NODE_KEY_FILE, STATIC_NODES_FILE,
    },
    static_nodes_json, ClientAdapter,
};
use crate::{
    config::DEFAULT_BESU_IMAGE,
    error::GenesisError,
    genesis::{self, geth_style},
    spec::{ClientKind, Enode, GenesisSpec, NetworkConfig, NodeSpec, SyncMode},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Besu;

fn sync_mode(ctx: &ArgContext<'_>) -> String {
    match ctx.node.sync_mode {
        SyncMode::Full => "FULL",
        SyncMode::Snap => "X_SNAP",
        SyncMode::Fast | SyncMode::Light => "FAST",
    }
    .to_string()
}

fn rpc_enabled(ctx: &ArgContext<'_>) -> bool {
    ctx.node.rpc
}

fn ws_enabled(ctx: &ArgContext<'_>) -> bool {
    ctx.node.ws
}

fn graphql_enabled(ctx: &ArgContext<'_>) -> bool {
    ctx.node.graphql
}

fn engine_enabled(ctx: &ArgContext<'_>) -> bool {
    ctx.node.engine
}

const ARGS: &[Arg] = &[
    Arg::always(Emit::Value("--data-path", |ctx| ctx.data_dir())),
    Arg::when(|ctx| !ctx.is_private(), Emit::Value("--network", |ctx| ctx.network.network.clone())),
    Arg::when(
        |ctx| ctx.is_private(),
        Emit::Value("--genesis-file", |ctx| ctx.config_file(GENESIS_FILE)),
    ),
    Arg::when(|ctx| ctx.is_private(), Emit::Value("--network-id", |ctx| ctx.network_id())),
    Arg::when(|ctx| ctx.is_private(), Emit::Fixed("--discovery-enabled", "false")),
    Arg::when(
        |ctx| ctx.has_node_key(),
        Emit::Value("--node-private-key-file", |ctx| ctx.secret_file(NODE_KEY_FILE)),
    ),
    Arg::always(Emit::Value("--p2p-port", |ctx| ctx.node.p2p_port.to_string())),
    // Light sync is not offered by Besu.
    Arg::when(|ctx| ctx.node.sync_mode != SyncMode::Light, Emit::Value("--sync-mode", sync_mode)),
    Arg::always(Emit::Value("--logging", |ctx| ctx.node.logging.as_str().to_uppercase())),
    Arg::when(
        |ctx| !ctx.node.bootnodes.is_empty(),
        Emit::Value("--bootnodes", |ctx| ctx.bootnodes()),
    ),
    Arg::when(
        |ctx| !ctx.node.static_nodes.is_empty(),
        Emit::Value("--static-nodes-file", |ctx| ctx.config_file(STATIC_NODES_FILE)),
    ),
    Arg::when(|ctx| ctx.node.miner, Emit::Switch("--miner-enabled")),
    Arg::when(|ctx| ctx.signs_blocks(), Emit::Value("--miner-coinbase", |ctx| ctx.coinbase())),
    Arg::when(rpc_enabled, Emit::Switch("--rpc-http-enabled")),
    Arg::when(rpc_enabled, Emit::Fixed("--rpc-http-host", ANY_INTERFACE)),
    Arg::when(rpc_enabled, Emit::Value("--rpc-http-port", |ctx| ctx.node.rpc_port.to_string())),
    Arg::when(
        rpc_enabled,
        Emit::Value("--rpc-http-api", |ctx| api_list(&ctx.node.rpc_api).to_uppercase()),
    ),
    Arg::when(rpc_enabled, Emit::Value("--rpc-http-cors-origins", |ctx| ctx.cors_domains())),
    Arg::when(ws_enabled, Emit::Switch("--rpc-ws-enabled")),
    Arg::when(ws_enabled, Emit::Fixed("--rpc-ws-host", ANY_INTERFACE)),
    Arg::when(ws_enabled, Emit::Value("--rpc-ws-port", |ctx| ctx.node.ws_port.to_string())),
    Arg::when(
        ws_enabled,
        Emit::Value("--rpc-ws-api", |ctx| api_list(&ctx.node.ws_api).to_uppercase()),
    ),
    Arg::when(graphql_enabled, Emit::Switch("--graphql-http-enabled")),
    Arg::when(graphql_enabled, Emit::Fixed("--graphql-http-host", ANY_INTERFACE)),
    Arg::when(
        graphql_enabled,
        Emit::Value("--graphql-http-port", |ctx| ctx.node.graphql_port.to_string()),
    ),
    Arg::when(
        graphql_enabled,
        Emit::Value("--graphql-http-cors-origins", |ctx| ctx.cors_domains()),
    ),
    Arg::when(engine_enabled, Emit::Switch("--engine-rpc-enabled")),
    Arg::when(
        engine_enabled,
        Emit::Value("--engine-rpc-port", |ctx| ctx.node.engine_port.to_string()),
    ),
    Arg::when(engine_enabled, Emit::Value("--engine-host-allowlist", |ctx| ctx.hosts())),
    Arg::when(
        |ctx| ctx.node.engine && ctx.has_jwt_secret(),
        Emit::Value("--engine-jwt-secret", |ctx| ctx.secret_file(JWT_SECRET_FILE)),
    ),
    Arg::when(
        |ctx| ctx.node.rpc || ctx.node.ws || ctx.node.graphql,
        Emit::Value("--host-allowlist", |ctx| ctx.hosts()),
    ),
];

impl ClientAdapter for Besu {
    fn kind(&self) -> ClientKind {
        ClientKind::Besu
    }

    fn home_dir(&self) -> &'static str {
        "/opt/besu"
    }

    fn default_image(&self) -> &'static str {
        DEFAULT_BESU_IMAGE
    }

    fn args(&self, node: &NodeSpec, network: &NetworkConfig) -> Vec<String> {
        render(self.kind(), ARGS, &ArgContext::new(node, network, self.home_dir()))
    }

    fn genesis(&self, genesis: &GenesisSpec) -> Result<String, GenesisError> {
        genesis::to_json_string(&geth_style::build(genesis, geth_style::Dialect::Besu)?)
    }

    fn encode_static_nodes(&self, enodes: &[Enode]) -> String {
        static_nodes_json(enodes)
    }
}
