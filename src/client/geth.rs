//! Go Ethereum.

use super::{
    args::{
        api_list, render, Arg, ArgContext, Emit, ACCOUNT_PASSWORD_FILE, ANY_INTERFACE,
        JWT_SECRET_FILE, NODE_KEY_FILE,
    },
    ClientAdapter,
};
use crate::{
    config::DEFAULT_GETH_IMAGE,
    error::GenesisError,
    genesis::{self, geth_style},
    spec::{ClientKind, Enode, GenesisSpec, NetworkConfig, NodeSpec, VerbosityLevel},
};

/// Geth reads static peers from its TOML config rather than a dedicated file.
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Geth;

/// Geth verbosity runs from 0 (silent) to 5 (detail).
fn verbosity(ctx: &ArgContext<'_>) -> String {
    match ctx.node.logging {
        VerbosityLevel::Off => 0,
        VerbosityLevel::Fatal | VerbosityLevel::Error => 1,
        VerbosityLevel::Warn => 2,
        VerbosityLevel::Info => 3,
        VerbosityLevel::Debug => 4,
        VerbosityLevel::Trace | VerbosityLevel::All => 5,
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
    Arg::always(Emit::Value("--datadir", |ctx| ctx.data_dir())),
    // Mainnet is the default and has no flag of its own.
    Arg::when(
        |ctx| !ctx.is_private() && !ctx.network.is_mainnet(),
        Emit::Dynamic(|ctx| format!("--{}", ctx.network.network)),
    ),
    Arg::when(|ctx| ctx.is_private(), Emit::Value("--networkid", |ctx| ctx.network_id())),
    Arg::when(|ctx| ctx.is_private(), Emit::Switch("--nodiscover")),
    Arg::when(
        |ctx| ctx.has_node_key(),
        Emit::Value("--nodekey", |ctx| ctx.secret_file(NODE_KEY_FILE)),
    ),
    Arg::always(Emit::Value("--port", |ctx| ctx.node.p2p_port.to_string())),
    Arg::always(Emit::Value("--syncmode", |ctx| ctx.node.sync_mode.as_str().to_string())),
    Arg::always(Emit::Value("--verbosity", verbosity)),
    Arg::when(
        |ctx| !ctx.node.bootnodes.is_empty(),
        Emit::Value("--bootnodes", |ctx| ctx.bootnodes()),
    ),
    Arg::when(
        |ctx| !ctx.node.static_nodes.is_empty(),
        Emit::Value("--config", |ctx| ctx.config_file(CONFIG_FILE)),
    ),
    Arg::when(|ctx| ctx.unlocks_account(), Emit::Value("--unlock", |ctx| ctx.coinbase())),
    Arg::when(
        |ctx| ctx.unlocks_account(),
        Emit::Value("--password", |ctx| ctx.secret_file(ACCOUNT_PASSWORD_FILE)),
    ),
    Arg::when(|ctx| ctx.unlocks_account(), Emit::Switch("--allow-insecure-unlock")),
    Arg::when(|ctx| ctx.node.miner, Emit::Switch("--mine")),
    Arg::when(|ctx| ctx.signs_blocks(), Emit::Value("--miner.etherbase", |ctx| ctx.coinbase())),
    Arg::when(rpc_enabled, Emit::Switch("--http")),
    Arg::when(rpc_enabled, Emit::Fixed("--http.addr", ANY_INTERFACE)),
    Arg::when(rpc_enabled, Emit::Value("--http.port", |ctx| ctx.node.rpc_port.to_string())),
    Arg::when(rpc_enabled, Emit::Value("--http.api", |ctx| api_list(&ctx.node.rpc_api))),
    Arg::when(rpc_enabled, Emit::Value("--http.vhosts", |ctx| ctx.hosts())),
    Arg::when(rpc_enabled, Emit::Value("--http.corsdomain", |ctx| ctx.cors_domains())),
    Arg::when(ws_enabled, Emit::Switch("--ws")),
    Arg::when(ws_enabled, Emit::Fixed("--ws.addr", ANY_INTERFACE)),
    Arg::when(ws_enabled, Emit::Value("--ws.port", |ctx| ctx.node.ws_port.to_string())),
    Arg::when(ws_enabled, Emit::Value("--ws.api", |ctx| api_list(&ctx.node.ws_api))),
    Arg::when(ws_enabled, Emit::Value("--ws.origins", |ctx| ctx.cors_domains())),
    Arg::when(graphql_enabled, Emit::Switch("--graphql")),
    Arg::when(graphql_enabled, Emit::Value("--graphql.vhosts", |ctx| ctx.hosts())),
    Arg::when(graphql_enabled, Emit::Value("--graphql.corsdomain", |ctx| ctx.cors_domains())),
    Arg::when(engine_enabled, Emit::Fixed("--authrpc.addr", ANY_INTERFACE)),
    Arg::when(
        engine_enabled,
        Emit::Value("--authrpc.port", |ctx| ctx.node.engine_port.to_string()),
    ),
    Arg::when(engine_enabled, Emit::Value("--authrpc.vhosts", |ctx| ctx.hosts())),
    Arg::when(
        |ctx| ctx.node.engine && ctx.has_jwt_secret(),
        Emit::Value("--authrpc.jwtsecret", |ctx| ctx.secret_file(JWT_SECRET_FILE)),
    ),
];

impl ClientAdapter for Geth {
    fn kind(&self) -> ClientKind {
        ClientKind::Geth
    }

    fn home_dir(&self) -> &'static str {
        "/home/ethereum"
    }

    fn default_image(&self) -> &'static str {
        DEFAULT_GETH_IMAGE
    }

    fn args(&self, node: &NodeSpec, network: &NetworkConfig) -> Vec<String> {
        render(self.kind(), ARGS, &ArgContext::new(node, network, self.home_dir()))
    }

    fn genesis(&self, genesis: &GenesisSpec) -> Result<String, GenesisError> {
        genesis::to_json_string(&geth_style::build(genesis, geth_style::Dialect::Geth)?)
    }

    /// `config.toml` fragment. JSON string escapes are valid TOML basic strings.
    fn encode_static_nodes(&self, enodes: &[Enode]) -> String {
        let peers = enodes
            .iter()
            .map(|enode| serde_json::Value::from(enode.as_str()).to_string())
            .collect::<Vec<_>>();
        format!("[Node.P2P]\nStaticNodes = [{}]", peers.join(","))
    }
}
