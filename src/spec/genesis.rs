//! Client-agnostic genesis description.

use std::{collections::BTreeMap, fmt};

use alloy_primitives::{Address, B256};
use serde::{Deserialize, Serialize};

use super::{ForkSchedule, HexString};

/// Default gas limit used by the operator for new networks.
pub const DEFAULT_GAS_LIMIT: u64 = 4_700_000;

/// Consensus algorithm a network declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Consensus {
    #[serde(rename = "pow")]
    ProofOfWork,
    #[serde(rename = "poa")]
    ProofOfAuthority,
    #[serde(rename = "ibft2")]
    IstanbulBft,
}

impl fmt::Display for Consensus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ProofOfWork => "pow",
            Self::ProofOfAuthority => "poa",
            Self::IstanbulBft => "ibft2",
        })
    }
}

/// Genesis parameters shared by every client of a private network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenesisSpec {
    #[serde(default)]
    pub accounts: Vec<Account>,
    pub network_id: u64,
    pub chain_id: u64,
    #[serde(default)]
    pub coinbase: Address,
    #[serde(default = "default_difficulty")]
    pub difficulty: HexString,
    #[serde(default)]
    pub mix_hash: B256,
    #[serde(default = "zero")]
    pub nonce: HexString,
    #[serde(default = "zero")]
    pub timestamp: HexString,
    #[serde(default = "default_gas_limit")]
    pub gas_limit: HexString,
    #[serde(default)]
    pub forks: ForkSchedule,
    /// Exactly one engine section (`ethash`, `clique`, or `ibft2`).
    #[serde(flatten)]
    pub engine: ConsensusConfig,
}

impl GenesisSpec {
    /// Genesis with operator defaults for everything but ids and engine.
    pub fn new(chain_id: u64, network_id: u64, engine: ConsensusConfig) -> Self {
        Self {
            accounts: Vec::new(),
            network_id,
            chain_id,
            coinbase: Address::ZERO,
            difficulty: default_difficulty(),
            mix_hash: B256::ZERO,
            nonce: zero(),
            timestamp: zero(),
            gas_limit: default_gas_limit(),
            forks: ForkSchedule::default(),
            engine,
        }
    }

    /// Consensus implied by the populated engine section.
    pub fn consensus(&self) -> Consensus {
        self.engine.consensus()
    }
}

fn default_difficulty() -> HexString {
    HexString::from(1u64)
}

fn zero() -> HexString {
    HexString::from(0u64)
}

fn default_gas_limit() -> HexString {
    HexString::from(DEFAULT_GAS_LIMIT)
}

/// Engine-specific genesis parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsensusConfig {
    Ethash(EthashConfig),
    Clique(CliqueConfig),
    Ibft2(Ibft2Config),
}

impl ConsensusConfig {
    pub const fn consensus(&self) -> Consensus {
        match self {
            Self::Ethash(_) => Consensus::ProofOfWork,
            Self::Clique(_) => Consensus::ProofOfAuthority,
            Self::Ibft2(_) => Consensus::IstanbulBft,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EthashConfig {
    /// Pins difficulty for test networks; only Besu and the chainspec clients honour it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_difficulty: Option<u64>,
}

/// Clique proof-of-authority parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CliqueConfig {
    #[serde(default = "CliqueConfig::default_block_period")]
    pub block_period: u64,
    #[serde(default = "default_epoch_length")]
    pub epoch_length: u64,
    /// Initial signers, in the exact order they are written to `extraData`.
    pub signers: Vec<Address>,
}

impl CliqueConfig {
    const fn default_block_period() -> u64 {
        15
    }

    pub fn new(signers: Vec<Address>) -> Self {
        Self {
            block_period: Self::default_block_period(),
            epoch_length: default_epoch_length(),
            signers,
        }
    }
}

/// IBFT 2.0 parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ibft2Config {
    #[serde(default = "Ibft2Config::default_block_period")]
    pub block_period: u64,
    #[serde(default = "default_epoch_length")]
    pub epoch_length: u64,
    #[serde(default = "Ibft2Config::default_request_timeout")]
    pub request_timeout: u64,
    #[serde(default = "Ibft2Config::default_message_queue_limit")]
    pub message_queue_limit: u64,
    #[serde(default = "Ibft2Config::default_duplicate_message_limit")]
    pub duplicate_message_limit: u64,
    #[serde(default = "Ibft2Config::default_future_messages_limit")]
    pub future_messages_limit: u64,
    #[serde(default = "Ibft2Config::default_future_messages_max_distance")]
    pub future_messages_max_distance: u64,
    /// Initial validators, in the exact order they are RLP-encoded into `extraData`.
    pub validators: Vec<Address>,
}

impl Ibft2Config {
    const fn default_block_period() -> u64 {
        5
    }
    const fn default_request_timeout() -> u64 {
        10
    }
    const fn default_message_queue_limit() -> u64 {
        1000
    }
    const fn default_duplicate_message_limit() -> u64 {
        100
    }
    const fn default_future_messages_limit() -> u64 {
        1000
    }
    const fn default_future_messages_max_distance() -> u64 {
        10
    }

    pub fn new(validators: Vec<Address>) -> Self {
        Self {
            block_period: Self::default_block_period(),
            epoch_length: default_epoch_length(),
            request_timeout: Self::default_request_timeout(),
            message_queue_limit: Self::default_message_queue_limit(),
            duplicate_message_limit: Self::default_duplicate_message_limit(),
            future_messages_limit: Self::default_future_messages_limit(),
            future_messages_max_distance: Self::default_future_messages_max_distance(),
            validators,
        }
    }
}

const fn default_epoch_length() -> u64 {
    30_000
}

/// Pre-funded (and optionally pre-deployed) genesis account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub address: Address,
    pub balance: HexString,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<HexString>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<BTreeMap<HexString, HexString>>,
}
