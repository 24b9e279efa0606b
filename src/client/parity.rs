//! OpenEthereum (formerly Parity Ethereum).
//!
//! OpenEthereum only accepts a node key as a literal value, so the key is
//! expected as a file at `<data>/network/key` instead of a flag. There is no
//! GraphQL or engine API.

use super::{
    args::{api_list, render, Arg, ArgContext, Emit, ACCOUNT_PASSWORD_FILE, GENESIS_FILE},
    ClientAdapter,
};
use crate::{
    config::DEFAULT_OPENETHEREUM_IMAGE,
    error::GenesisError,
    genesis::{self, chainspec},
    spec::{ClientKind, Enode, GenesisSpec, NetworkConfig, NodeSpec, SyncMode},
};

/// Newline separated enode list.
const RESERVED_PEERS_FILE: &str = "static-nodes";

/// OpenEthereum spells "any interface" and "any host" as `all`.
const ALL: &str = "all";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Parity;

fn translate_wildcard(values: &[String]) -> String {
    values
        .iter()
        .map(|value| if value == "*" { ALL } else { value.as_str() })
        .collect::<Vec<_>>()
        .join(",")
}

fn hosts(ctx: &ArgContext<'_>) -> String {
    translate_wildcard(&ctx.node.hosts)
}

fn cors_domains(ctx: &ArgContext<'_>) -> String {
    translate_wildcard(&ctx.node.cors_domains)
}

fn rpc_enabled(ctx: &ArgContext<'_>) -> bool {
    ctx.node.rpc
}

fn ws_enabled(ctx: &ArgContext<'_>) -> bool {
    ctx.node.ws
}

const ARGS: &[Arg] = &[
    Arg::always(Emit::Value("--base-path", |ctx| ctx.data_dir())),
    Arg::when(|ctx| !ctx.is_private(), Emit::Value("--chain", |ctx| ctx.network.network.clone())),
    Arg::when(|ctx| ctx.is_private(), Emit::Value("--chain", |ctx| ctx.config_file(GENESIS_FILE))),
    Arg::when(|ctx| ctx.is_private(), Emit::Value("--network-id", |ctx| ctx.network_id())),
    Arg::when(|ctx| ctx.is_private(), Emit::Switch("--no-discovery")),
    Arg::always(Emit::Value("--port", |ctx| ctx.node.p2p_port.to_string())),
    // Warp sync is OpenEthereum's fast sync and is on by default.
    Arg::when(|ctx| ctx.node.sync_mode == SyncMode::Full, Emit::Switch("--no-warp")),
    Arg::always(Emit::Value("--logging", |ctx| ctx.node.logging.as_str().to_string())),
    Arg::when(
        |ctx| !ctx.node.bootnodes.is_empty(),
        Emit::Value("--bootnodes", |ctx| ctx.bootnodes()),
    ),
    Arg::when(
        |ctx| !ctx.node.static_nodes.is_empty(),
        Emit::Value("--reserved-peers", |ctx| ctx.config_file(RESERVED_PEERS_FILE)),
    ),
    Arg::when(|ctx| ctx.unlocks_account(), Emit::Value("--unlock", |ctx| ctx.coinbase())),
    Arg::when(
        |ctx| ctx.unlocks_account(),
        Emit::Value("--password", |ctx| ctx.secret_file(ACCOUNT_PASSWORD_FILE)),
    ),
    Arg::when(|ctx| ctx.signs_blocks(), Emit::Value("--engine-signer", |ctx| ctx.coinbase())),
    Arg::when(|ctx| ctx.signs_blocks(), Emit::Switch("--force-sealing")),
    Arg::when(|ctx| !ctx.node.rpc, Emit::Switch("--no-jsonrpc")),
    Arg::when(rpc_enabled, Emit::Fixed("--jsonrpc-interface", ALL)),
    Arg::when(rpc_enabled, Emit::Value("--jsonrpc-port", |ctx| ctx.node.rpc_port.to_string())),
    Arg::when(rpc_enabled, Emit::Value("--jsonrpc-apis", |ctx| api_list(&ctx.node.rpc_api))),
    Arg::when(rpc_enabled, Emit::Value("--jsonrpc-hosts", hosts)),
    Arg::when(rpc_enabled, Emit::Value("--jsonrpc-cors", cors_domains)),
    Arg::when(|ctx| !ctx.node.ws, Emit::Switch("--no-ws")),
    Arg::when(ws_enabled, Emit::Fixed("--ws-interface", ALL)),
    Arg::when(ws_enabled, Emit::Value("--ws-port", |ctx| ctx.node.ws_port.to_string())),
    Arg::when(ws_enabled, Emit::Value("--ws-apis", |ctx| api_list(&ctx.node.ws_api))),
    Arg::when(ws_enabled, Emit::Value("--ws-hosts", hosts)),
    Arg::when(ws_enabled, Emit::Value("--ws-origins", cors_domains)),
];

impl ClientAdapter for Parity {
    fn kind(&self) -> ClientKind {
        ClientKind::Parity
    }

    fn home_dir(&self) -> &'static str {
        "/home/openethereum"
    }

    fn default_image(&self) -> &'static str {
        DEFAULT_OPENETHEREUM_IMAGE
    }

    fn args(&self, node: &NodeSpec, network: &NetworkConfig) -> Vec<String> {
        render(self.kind(), ARGS, &ArgContext::new(node, network, self.home_dir()))
    }

    fn genesis(&self, genesis: &GenesisSpec) -> Result<String, GenesisError> {
        genesis::to_json_string(&chainspec::build(genesis, chainspec::Dialect::OpenEthereum)?)
    }

    fn encode_static_nodes(&self, enodes: &[Enode]) -> String {
        enodes.iter().map(Enode::as_str).collect::<Vec<_>>().join("\n")
    }
}
