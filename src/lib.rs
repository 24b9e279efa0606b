//! eth-clients: provisioning artifacts for Ethereum execution clients.
//!
//! One client-agnostic description of a node and its network is translated
//! into what a concrete client needs to boot and agree on a chain:
//! - **Arguments**: the ordered command line of Besu, Geth, Nethermind or OpenEthereum
//! - **Genesis**: geth-style `genesis.json` or an OpenEthereum/Nethermind chainspec
//! - **Static nodes**: the peer list in the client's own file format
//!
//! ## Architecture
//!
//! Everything is a pure function of immutable inputs:
//!
//! ```text
//! NodeSpec + NetworkConfig ─▶ new_client(kind) ─▶ ClientAdapter ─▶ args / genesis / static nodes
//!                                                     │
//!                              genesis builders ◀─────┘ (extraData codec, precompile registry)
//! ```
//!
//! | Client | Genesis format | Static nodes |
//! |--------|----------------|--------------|
//! | Besu | geth-style | JSON array |
//! | Geth | geth-style | `config.toml` |
//! | Nethermind | chainspec | JSON array |
//! | OpenEthereum | chainspec | newline separated |
//!
//! ## Usage
//!
//! ```bash
//! eth-clients args --node node.json --network network.json
//! eth-clients genesis --client besu --network network.json
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod extra_data;
pub mod genesis;
pub mod precompile;
pub mod spec;
pub mod version;

pub use client::{new_client, ClientAdapter};
pub use config::ImageConfig;
pub use error::{
    EncodingError, ForkOrderError, GenesisError, NetworkConfigError, UnsupportedClientError,
};
pub use spec::{ClientKind, GenesisSpec, NetworkConfig, NodeSpec};
