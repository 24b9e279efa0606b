//! Default container images, overridable from the environment.
//!
//! The translation core never reads the environment. The binary loads an
//! [`ImageConfig`] once and pins [`NodeSpec::image`] before calling an adapter.
//!
//! [`NodeSpec::image`]: crate::spec::NodeSpec::image

use tracing::{info, warn};

use crate::spec::{ClientKind, NodeSpec};

pub const DEFAULT_BESU_IMAGE: &str = "hyperledger/besu:22.7.0";
pub const DEFAULT_GETH_IMAGE: &str = "ethereum/client-go:v1.10.23";
pub const DEFAULT_NETHERMIND_IMAGE: &str = "kotalco/nethermind:v1.14.1";
pub const DEFAULT_OPENETHEREUM_IMAGE: &str = "openethereum/openethereum:v3.3.5";

const ENV_BESU_IMAGE: &str = "BESU_IMAGE";
const ENV_GETH_IMAGE: &str = "GETH_IMAGE";
const ENV_NETHERMIND_IMAGE: &str = "NETHERMIND_IMAGE";
const ENV_OPENETHEREUM_IMAGE: &str = "OPENETHEREUM_IMAGE";

/// Image used for each client when a node does not pin one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageConfig {
    pub besu: String,
    pub geth: String,
    pub nethermind: String,
    pub openethereum: String,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            besu: DEFAULT_BESU_IMAGE.to_string(),
            geth: DEFAULT_GETH_IMAGE.to_string(),
            nethermind: DEFAULT_NETHERMIND_IMAGE.to_string(),
            openethereum: DEFAULT_OPENETHEREUM_IMAGE.to_string(),
        }
    }
}

impl ImageConfig {
    /// Loads images from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let config = Self::from_lookup(|var| match std::env::var(var) {
            Ok(value) => Some(value),
            Err(std::env::VarError::NotPresent) => None,
            Err(err) => {
                warn!(
                    target: "eth_clients::config",
                    env_var = var,
                    %err,
                    "Failed reading image env var, using default"
                );
                None
            }
        });

        info!(
            target: "eth_clients::config",
            besu = %config.besu,
            geth = %config.geth,
            nethermind = %config.nethermind,
            openethereum = %config.openethereum,
            "Configured client images"
        );

        config
    }

    /// Builds the config from an arbitrary variable lookup. Blank values are ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let image = |var: &str, default: &str| {
            lookup(var)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            besu: image(ENV_BESU_IMAGE, DEFAULT_BESU_IMAGE),
            geth: image(ENV_GETH_IMAGE, DEFAULT_GETH_IMAGE),
            nethermind: image(ENV_NETHERMIND_IMAGE, DEFAULT_NETHERMIND_IMAGE),
            openethereum: image(ENV_OPENETHEREUM_IMAGE, DEFAULT_OPENETHEREUM_IMAGE),
        }
    }

    pub fn image_for(&self, kind: ClientKind) -> &str {
        match kind {
            ClientKind::Besu => &self.besu,
            ClientKind::Geth => &self.geth,
            ClientKind::Nethermind => &self.nethermind,
            ClientKind::Parity => &self.openethereum,
        }
    }

    /// Pins the configured image on `node` unless it already has one.
    pub fn resolve(&self, node: &mut NodeSpec) {
        if node.image.is_none() {
            node.image = Some(self.image_for(node.client).to_string());
        }
    }
}
