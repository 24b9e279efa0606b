//! Declarative command-line tables.
//!
//! Each client lists its flags once as a `&'static [Arg]`; [`render`] walks the
//! table in order and emits the entries whose condition holds. Argument order
//! is therefore fixed by the table, never by control flow.

use tracing::debug;

use crate::spec::{Api, ClientKind, NetworkConfig, NodeSpec};

pub(crate) const GENESIS_FILE: &str = "genesis.json";
pub(crate) const STATIC_NODES_FILE: &str = "static-nodes.json";
pub(crate) const NODE_KEY_FILE: &str = "nodekey";
pub(crate) const JWT_SECRET_FILE: &str = "jwt.secret";
pub(crate) const ACCOUNT_PASSWORD_FILE: &str = "account.password";

/// Bind address for every exposed transport.
pub(crate) const ANY_INTERFACE: &str = "0.0.0.0";

/// Everything a rule may look at.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ArgContext<'a> {
    pub(crate) node: &'a NodeSpec,
    pub(crate) network: &'a NetworkConfig,
    pub(crate) home: &'static str,
}

impl<'a> ArgContext<'a> {
    pub(crate) fn new(node: &'a NodeSpec, network: &'a NetworkConfig, home: &'static str) -> Self {
        debug_assert!(
            network.genesis.as_ref().zip(network.consensus).map_or(true, |(genesis, declared)| {
                genesis.consensus() == declared
            }),
            "declared consensus must match the genesis engine"
        );
        Self { node, network, home }
    }

    pub(crate) fn data_dir(&self) -> String {
        format!("{}/kotal-data", self.home)
    }

    pub(crate) fn config_dir(&self) -> String {
        format!("{}/kotal-config", self.home)
    }

    pub(crate) fn config_file(&self, name: &str) -> String {
        format!("{}/{name}", self.config_dir())
    }

    pub(crate) fn secret_file(&self, name: &str) -> String {
        format!("{}/.kotal-secrets/{name}", self.home)
    }

    pub(crate) fn is_private(&self) -> bool {
        self.network.is_private()
    }

    /// Network id of a private network, `0` never reaches a rendered flag.
    pub(crate) fn network_id(&self) -> String {
        self.network.genesis.as_ref().map_or(0, |genesis| genesis.network_id).to_string()
    }

    pub(crate) fn has_node_key(&self) -> bool {
        self.node.node_private_key_secret_name.is_some()
    }

    pub(crate) fn has_jwt_secret(&self) -> bool {
        self.node.jwt_secret_name.is_some()
    }

    /// Imported keystore accounts are unlocked by their coinbase address.
    pub(crate) fn unlocks_account(&self) -> bool {
        self.node.import.is_some() && self.node.coinbase.is_some()
    }

    pub(crate) fn signs_blocks(&self) -> bool {
        self.node.miner && self.node.coinbase.is_some()
    }

    pub(crate) fn coinbase(&self) -> String {
        self.node.coinbase.map(|coinbase| coinbase.to_checksum(None)).unwrap_or_default()
    }

    pub(crate) fn bootnodes(&self) -> String {
        self.node.bootnodes.iter().map(|enode| enode.as_str()).collect::<Vec<_>>().join(",")
    }

    pub(crate) fn hosts(&self) -> String {
        self.node.hosts.join(",")
    }

    pub(crate) fn cors_domains(&self) -> String {
        self.node.cors_domains.join(",")
    }
}

/// Comma-separated module list.
pub(crate) fn api_list(apis: &[Api]) -> String {
    apis.iter().map(|api| api.as_str()).collect::<Vec<_>>().join(",")
}

pub(crate) type Condition = for<'a> fn(&ArgContext<'a>) -> bool;
pub(crate) type Render = for<'a> fn(&ArgContext<'a>) -> String;

/// What a rule contributes when its condition holds.
#[derive(Clone, Copy)]
pub(crate) enum Emit {
    /// `--flag`
    Switch(&'static str),
    /// `--flag value` with a constant value.
    Fixed(&'static str, &'static str),
    /// `--flag value` computed from the context.
    Value(&'static str, Render),
    /// A single computed token, for flags whose name depends on the input.
    Dynamic(Render),
}

#[derive(Clone, Copy)]
pub(crate) struct Arg {
    when: Condition,
    emit: Emit,
}

impl Arg {
    pub(crate) const fn always(emit: Emit) -> Self {
        Self { when: always, emit }
    }

    pub(crate) const fn when(when: Condition, emit: Emit) -> Self {
        Self { when, emit }
    }
}

fn always(_: &ArgContext<'_>) -> bool {
    true
}

/// Renders `table` against `ctx`, in table order.
pub(crate) fn render(kind: ClientKind, table: &[Arg], ctx: &ArgContext<'_>) -> Vec<String> {
    let mut args = Vec::with_capacity(table.len() * 2);
    for arg in table.iter().filter(|arg| (arg.when)(ctx)) {
        match arg.emit {
            Emit::Switch(flag) => args.push(flag.to_string()),
            Emit::Fixed(flag, value) => args.extend([flag.to_string(), value.to_string()]),
            Emit::Value(flag, value) => args.extend([flag.to_string(), value(ctx)]),
            Emit::Dynamic(token) => args.push(token(ctx)),
        }
    }

    debug!(
        target: "eth_clients::client",
        client = %kind,
        private = ctx.is_private(),
        args = args.len(),
        "Generated client arguments"
    );
    args
}
