//! Nethermind.
//!
//! Nethermind has no GraphQL endpoint and takes its host allowlist from its
//! own config, so neither hosts nor CORS domains are ever passed.

use super::{
    args::{
        api_list, render, Arg, ArgContext, Emit, ACCOUNT_PASSWORD_FILE, ANY_INTERFACE,
        GENESIS_FILE, JWT_SECRET_FILE, NODE_KEY_FILE, STATIC_NODES_FILE,
    },
    static_nodes_json, ClientAdapter,
};
use crate::{
    config::DEFAULT_NETHERMIND_IMAGE,
    error::GenesisError,
    genesis::{self, chainspec},
    spec::{ClientKind, Enode, GenesisSpec, NetworkConfig, NodeSpec, SyncMode, VerbosityLevel},
};

/// Config shipped with Nethermind that loads nothing, used for private chains.
const EMPTY_CONFIG: &str = "none.cfg";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Nethermind;

fn log_level(ctx: &ArgContext<'_>) -> String {
    match ctx.node.logging {
        VerbosityLevel::Off => "OFF",
        VerbosityLevel::Fatal | VerbosityLevel::Error => "ERROR",
        VerbosityLevel::Warn => "WARN",
        VerbosityLevel::Info => "INFO",
        VerbosityLevel::Debug => "DEBUG",
        VerbosityLevel::Trace | VerbosityLevel::All => "TRACE",
    }
    .to_string()
}

/// Fast and snap sync both start from a fast-synced pivot.
fn fast_sync(ctx: &ArgContext<'_>) -> bool {
    matches!(ctx.node.sync_mode, SyncMode::Fast | SyncMode::Snap)
}

fn rpc_enabled(ctx: &ArgContext<'_>) -> bool {
    ctx.node.rpc
}

fn engine_enabled(ctx: &ArgContext<'_>) -> bool {
    ctx.node.engine
}

const ARGS: &[Arg] = &[
    Arg::always(Emit::Value("--datadir", |ctx| ctx.data_dir())),
    Arg::when(|ctx| !ctx.is_private(), Emit::Value("--config", |ctx| ctx.network.network.clone())),
    Arg::when(|ctx| ctx.is_private(), Emit::Fixed("--config", EMPTY_CONFIG)),
    Arg::when(
        |ctx| ctx.is_private(),
        Emit::Value("--Init.ChainSpecPath", |ctx| ctx.config_file(GENESIS_FILE)),
    ),
    Arg::when(|ctx| ctx.is_private(), Emit::Fixed("--Init.DiscoveryEnabled", "false")),
    Arg::when(
        |ctx| ctx.has_node_key(),
        Emit::Value("--KeyStore.EnodeKeyFile", |ctx| ctx.secret_file(NODE_KEY_FILE)),
    ),
    Arg::always(Emit::Value("--Network.P2PPort", |ctx| ctx.node.p2p_port.to_string())),
    Arg::always(Emit::Value("--Network.DiscoveryPort", |ctx| ctx.node.p2p_port.to_string())),
    Arg::when(fast_sync, Emit::Fixed("--Sync.FastSync", "true")),
    Arg::when(fast_sync, Emit::Fixed("--Sync.FastBlocks", "true")),
    Arg::when(fast_sync, Emit::Fixed("--Sync.DownloadBodiesInFastSync", "true")),
    Arg::when(fast_sync, Emit::Fixed("--Sync.DownloadReceiptsInFastSync", "true")),
    Arg::when(|ctx| ctx.node.sync_mode == SyncMode::Snap, Emit::Fixed("--Sync.SnapSync", "true")),
    Arg::always(Emit::Value("--log", log_level)),
    Arg::when(
        |ctx| !ctx.node.bootnodes.is_empty(),
        Emit::Value("--Discovery.Bootnodes", |ctx| ctx.bootnodes()),
    ),
    Arg::when(
        |ctx| !ctx.node.static_nodes.is_empty(),
        Emit::Value("--Init.StaticNodesPath", |ctx| ctx.config_file(STATIC_NODES_FILE)),
    ),
    Arg::when(
        |ctx| ctx.unlocks_account(),
        Emit::Value("--KeyStore.UnlockAccounts", |ctx| ctx.coinbase()),
    ),
    Arg::when(
        |ctx| ctx.unlocks_account(),
        Emit::Value("--KeyStore.PasswordFiles", |ctx| ctx.secret_file(ACCOUNT_PASSWORD_FILE)),
    ),
    Arg::when(|ctx| ctx.node.miner, Emit::Fixed("--Mining.Enabled", "true")),
    Arg::when(
        |ctx| ctx.signs_blocks(),
        Emit::Value("--KeyStore.BlockAuthorAccount", |ctx| ctx.coinbase()),
    ),
    Arg::when(rpc_enabled, Emit::Fixed("--JsonRpc.Enabled", "true")),
    Arg::when(rpc_enabled, Emit::Fixed("--JsonRpc.Host", ANY_INTERFACE)),
    Arg::when(rpc_enabled, Emit::Value("--JsonRpc.Port", |ctx| ctx.node.rpc_port.to_string())),
    Arg::when(
        rpc_enabled,
        Emit::Value("--JsonRpc.EnabledModules", |ctx| api_list(&ctx.node.rpc_api)),
    ),
    Arg::when(|ctx| ctx.node.ws, Emit::Fixed("--Init.WebSocketsEnabled", "true")),
    Arg::when(
        |ctx| ctx.node.ws,
        Emit::Value("--JsonRpc.WebSocketsPort", |ctx| ctx.node.ws_port.to_string()),
    ),
    Arg::when(engine_enabled, Emit::Fixed("--JsonRpc.EngineHost", ANY_INTERFACE)),
    Arg::when(
        engine_enabled,
        Emit::Value("--JsonRpc.EnginePort", |ctx| ctx.node.engine_port.to_string()),
    ),
    Arg::when(
        |ctx| ctx.node.engine && ctx.has_jwt_secret(),
        Emit::Value("--JsonRpc.JwtSecretFile", |ctx| ctx.secret_file(JWT_SECRET_FILE)),
    ),
];

impl ClientAdapter for Nethermind {
    fn kind(&self) -> ClientKind {
        ClientKind::Nethermind
    }

    fn home_dir(&self) -> &'static str {
        "/home/nethermind"
    }

    fn default_image(&self) -> &'static str {
        DEFAULT_NETHERMIND_IMAGE
    }

    fn args(&self, node: &NodeSpec, network: &NetworkConfig) -> Vec<String> {
        render(self.kind(), ARGS, &ArgContext::new(node, network, self.home_dir()))
    }

    fn genesis(&self, genesis: &GenesisSpec) -> Result<String, GenesisError> {
        genesis::to_json_string(&chainspec::build(genesis, chainspec::Dialect::Nethermind)?)
    }

    fn encode_static_nodes(&self, enodes: &[Enode]) -> String {
        static_nodes_json(enodes)
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::address;

    use super::*;
    use crate::spec::{Api, CliqueConfig, Consensus, ConsensusConfig, Ibft2Config};

    #[test]
    fn public_network_uses_bundled_config() {
        let args =
            Nethermind.args(&NodeSpec::new(ClientKind::Nethermind), &NetworkConfig::public("goerli"));
        assert_eq!(
            args,
            [
                "--datadir",
                "/home/nethermind/kotal-data",
                "--config",
                "goerli",
                "--Network.P2PPort",
                "30303",
                "--Network.DiscoveryPort",
                "30303",
                "--Sync.FastSync",
                "true",
                "--Sync.FastBlocks",
                "true",
                "--Sync.DownloadBodiesInFastSync",
                "true",
                "--Sync.DownloadReceiptsInFastSync",
                "true",
                "--log",
                "INFO",
            ]
        );
    }

    #[test]
    fn private_network_loads_chainspec() {
        let signer = address!("427e2c7cecd72bc4cdd4f7ebb8bb6e49789c8044");
        let genesis =
            GenesisSpec::new(4444, 5555, ConsensusConfig::Clique(CliqueConfig::new(vec![signer])));
        let mut node = NodeSpec::new(ClientKind::Nethermind);
        node.sync_mode = SyncMode::Full;

        let joined = Nethermind.args(&node, &NetworkConfig::private(genesis)).join(" ");
        assert!(joined.contains(
            "--config none.cfg --Init.ChainSpecPath /home/nethermind/kotal-config/genesis.json \
             --Init.DiscoveryEnabled false"
        ));
        assert!(!joined.contains("--Sync.FastSync"));
    }

    #[test]
    fn snap_sync_builds_on_fast_sync() {
        let mut node = NodeSpec::new(ClientKind::Nethermind);
        node.sync_mode = SyncMode::Snap;
        let joined = Nethermind.args(&node, &NetworkConfig::default()).join(" ");
        assert!(joined.contains("--Sync.FastSync true"));
        assert!(joined.contains("--Sync.SnapSync true"));
    }

    #[test]
    fn never_passes_hosts_or_cors() {
        let mut node = NodeSpec::new(ClientKind::Nethermind);
        node.rpc = true;
        node.rpc_api = vec![Api::Eth, Api::Net];
        node.ws = true;
        node.graphql = true;
        node.engine = true;
        node.hosts = vec!["example.com".to_string()];
        node.cors_domains = vec!["cors.example.com".to_string()];

        let joined = Nethermind.args(&node, &NetworkConfig::default()).join(" ");
        assert!(joined.contains("--JsonRpc.EnabledModules eth,net"));
        assert!(joined.contains("--Init.WebSocketsEnabled true --JsonRpc.WebSocketsPort 8546"));
        assert!(joined.contains("--JsonRpc.EngineHost 0.0.0.0 --JsonRpc.EnginePort 8551"));
        assert!(!joined.contains("example.com"));
        assert!(!joined.to_lowercase().contains("graphql"));
    }

    #[test]
    fn ibft2_genesis_is_rejected() {
        let signer = address!("427e2c7cecd72bc4cdd4f7ebb8bb6e49789c8044");
        let genesis = GenesisSpec::new(1, 1, ConsensusConfig::Ibft2(Ibft2Config::new(vec![signer])));
        assert!(matches!(
            Nethermind.genesis(&genesis),
            Err(GenesisError::UnsupportedConsensus {
                client: "nethermind",
                consensus: Consensus::IstanbulBft
            })
        ));
    }
}
