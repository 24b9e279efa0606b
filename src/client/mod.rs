//! Per-client translation of a [`NodeSpec`] into startup artifacts.
//!
//! One [`ClientAdapter`] exists per supported execution client. Adapters are
//! stateless unit structs; every method is a pure function of its inputs.

use std::fmt;

use crate::{
    error::{GenesisError, UnsupportedClientError},
    spec::{ClientKind, Enode, GenesisSpec, NetworkConfig, NodeSpec},
};

mod args;
mod besu;
mod geth;
mod nethermind;
mod parity;

pub use besu::Besu;
pub use geth::Geth;
pub use nethermind::Nethermind;
pub use parity::Parity;

/// Startup artifacts of one execution client.
pub trait ClientAdapter: fmt::Debug + Send + Sync {
    fn kind(&self) -> ClientKind;

    /// Home directory of the client inside its container image.
    fn home_dir(&self) -> &'static str;

    /// Image used when the node does not pin one.
    fn default_image(&self) -> &'static str;

    /// Image the node runs: the pinned one, otherwise [`Self::default_image`].
    fn image(&self, node: &NodeSpec) -> String {
        node.image.clone().unwrap_or_else(|| self.default_image().to_string())
    }

    /// Ordered command-line arguments.
    fn args(&self, node: &NodeSpec, network: &NetworkConfig) -> Vec<String>;

    /// Genesis document in the client's own format.
    fn genesis(&self, genesis: &GenesisSpec) -> Result<String, GenesisError>;

    /// Static peers in the client's file format.
    fn encode_static_nodes(&self, enodes: &[Enode]) -> String;
}

impl ClientKind {
    /// Adapter of this client.
    pub fn adapter(self) -> Box<dyn ClientAdapter> {
        match self {
            Self::Besu => Box::new(Besu),
            Self::Geth => Box::new(Geth),
            Self::Nethermind => Box::new(Nethermind),
            Self::Parity => Box::new(Parity),
        }
    }
}

/// Resolves a client tag such as `"geth"` into its adapter.
pub fn new_client(kind: &str) -> Result<Box<dyn ClientAdapter>, UnsupportedClientError> {
    Ok(kind.parse::<ClientKind>()?.adapter())
}

/// JSON array of enode urls, the `static-nodes.json` layout.
fn static_nodes_json(enodes: &[Enode]) -> String {
    serde_json::Value::from(enodes.iter().map(Enode::to_string).collect::<Vec<_>>()).to_string()
}
