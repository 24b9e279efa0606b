//! Network-wide settings every node of a network shares.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Consensus, ConsensusConfig, GenesisSpec};
use crate::error::NetworkConfigError;

const MAINNET: &str = "mainnet";

/// Either a named public network or a private one described by a genesis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConfig {
    /// Public network name, ignored once `genesis` is set.
    #[serde(default = "default_network")]
    pub network: String,
    /// Declared consensus of a private network.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consensus: Option<Consensus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genesis: Option<GenesisSpec>,
}

fn default_network() -> String {
    MAINNET.to_string()
}

impl NetworkConfig {
    /// Joins the named public network (`mainnet`, `goerli`, ...).
    pub fn public(network: impl Into<String>) -> Self {
        Self { network: network.into(), consensus: None, genesis: None }
    }

    /// Private network whose declared consensus is taken from the genesis engine.
    pub fn private(genesis: GenesisSpec) -> Self {
        Self {
            network: default_network(),
            consensus: Some(genesis.consensus()),
            genesis: Some(genesis),
        }
    }

    pub fn is_private(&self) -> bool {
        self.genesis.is_some()
    }

    pub fn is_mainnet(&self) -> bool {
        !self.is_private() && self.network == MAINNET
    }

    /// Checks the invariants the genesis builders rely on.
    pub fn validate(&self) -> Result<(), NetworkConfigError> {
        let Some(genesis) = &self.genesis else {
            return Ok(());
        };

        let configured = genesis.consensus();
        if let Some(declared) = self.consensus {
            if declared != configured {
                return Err(NetworkConfigError::ConsensusMismatch { declared, configured });
            }
        }
        let sealers = match &genesis.engine {
            ConsensusConfig::Ethash(_) => None,
            ConsensusConfig::Clique(clique) => Some(&clique.signers),
            ConsensusConfig::Ibft2(ibft2) => Some(&ibft2.validators),
        };
        if sealers.is_some_and(|sealers| sealers.is_empty()) {
            return Err(NetworkConfigError::EmptySigners(configured));
        }
        genesis.forks.validate()?;

        debug!(
            target: "eth_clients::spec",
            chain_id = genesis.chain_id,
            %configured,
            "Network config validated"
        );
        Ok(())
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self::public(MAINNET)
    }
}
