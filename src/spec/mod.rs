//! Input data model: immutable value objects produced by the defaulting layer.
//!
//! Everything here is plain data with `serde` support so callers can hand the
//! core JSON straight from a custom resource. Nothing in this module is
//! mutated after construction.

mod forks;
mod genesis;
mod hex;
mod network;
mod node;

pub use forks::{ForkName, ForkSchedule};
pub use genesis::{
    Account, CliqueConfig, Consensus, ConsensusConfig, EthashConfig, GenesisSpec, Ibft2Config,
    DEFAULT_GAS_LIMIT,
};
pub use hex::HexString;
pub use network::NetworkConfig;
pub use node::{Api, ClientKind, Enode, ImportedAccount, NodeSpec, SyncMode, VerbosityLevel};
