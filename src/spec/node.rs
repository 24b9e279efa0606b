//! Per-node settings handed over by the defaulting layer.

use std::{
    fmt,
    net::{Ipv4Addr, Ipv6Addr},
    str::FromStr,
};

use alloy_primitives::Address;
use derive_more::{Display, Into};
use serde::{Deserialize, Serialize};

use crate::error::{EncodingError, UnsupportedClientError};

/// Execution clients this crate can provision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientKind {
    Besu,
    Geth,
    Nethermind,
    Parity,
}

impl ClientKind {
    pub const ALL: [Self; 4] = [Self::Besu, Self::Geth, Self::Nethermind, Self::Parity];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Besu => "besu",
            Self::Geth => "geth",
            Self::Nethermind => "nethermind",
            Self::Parity => "parity",
        }
    }
}

impl fmt::Display for ClientKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClientKind {
    type Err = UnsupportedClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnsupportedClientError(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncMode {
    #[default]
    Fast,
    Full,
    Light,
    Snap,
}

impl SyncMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fast => "fast",
            Self::Full => "full",
            Self::Light => "light",
            Self::Snap => "snap",
        }
    }
}

/// Logging verbosity, from silent to everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerbosityLevel {
    Off,
    Fatal,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
    All,
}

impl VerbosityLevel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Fatal => "fatal",
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
            Self::All => "all",
        }
    }
}

/// JSON-RPC namespaces a transport may expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Api {
    Admin,
    Clique,
    Debug,
    Eea,
    Eth,
    Ibft,
    Miner,
    Net,
    Perm,
    Plugins,
    Priv,
    Txpool,
    Web3,
}

impl Api {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Clique => "clique",
            Self::Debug => "debug",
            Self::Eea => "eea",
            Self::Eth => "eth",
            Self::Ibft => "ibft",
            Self::Miner => "miner",
            Self::Net => "net",
            Self::Perm => "perm",
            Self::Plugins => "plugins",
            Self::Priv => "priv",
            Self::Txpool => "txpool",
            Self::Web3 => "web3",
        }
    }
}

/// Resolved `enode://<node id>@<host>:<port>` url of a peer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Into, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Enode(String);

impl Enode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Enode {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EncodingError::InvalidEnode(s.to_string());

        let (node_id, endpoint) =
            s.strip_prefix("enode://").and_then(|rest| rest.split_once('@')).ok_or_else(invalid)?;
        if node_id.len() != 128 || !node_id.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        // Optional `?discport=N` suffix when UDP discovery uses another port.
        let (endpoint, query) = match endpoint.split_once('?') {
            Some((endpoint, query)) => (endpoint, Some(query)),
            None => (endpoint, None),
        };
        if let Some(query) = query {
            let discport = query.strip_prefix("discport=").ok_or_else(invalid)?;
            discport.parse::<u16>().map_err(|_| invalid())?;
        }

        let (host, port) = endpoint.rsplit_once(':').ok_or_else(invalid)?;
        if !is_valid_host(host) || port.parse::<u16>().is_err() {
            return Err(invalid());
        }

        Ok(Self(s.to_string()))
    }
}

/// IPv4, bracketed IPv6, or a DNS name. Enodes end up in comma separated flags
/// and quoted config strings, so nothing else is allowed through.
fn is_valid_host(host: &str) -> bool {
    if let Some(v6) = host.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
        return v6.parse::<Ipv6Addr>().is_ok();
    }
    if host.parse::<Ipv4Addr>().is_ok() {
        return true;
    }
    host.len() <= 253 &&
        host.split('.').all(|label| {
            !label.is_empty() &&
                label.len() <= 63 &&
                !label.starts_with('-') &&
                !label.ends_with('-') &&
                label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
        })
}

impl TryFrom<String> for Enode {
    type Error = EncodingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Keystore account imported into the node, unlocked at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportedAccount {
    pub private_key_secret_name: String,
    pub password_secret_name: String,
}

/// Settings of one execution node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NodeSpec {
    pub client: ClientKind,
    /// Container image; resolved by the caller, never read from the environment here.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub sync_mode: SyncMode,
    pub logging: VerbosityLevel,
    pub p2p_port: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_private_key_secret_name: Option<String>,
    pub bootnodes: Vec<Enode>,
    pub static_nodes: Vec<Enode>,
    pub rpc: bool,
    pub rpc_port: u16,
    pub rpc_api: Vec<Api>,
    pub ws: bool,
    pub ws_port: u16,
    pub ws_api: Vec<Api>,
    pub graphql: bool,
    pub graphql_port: u16,
    pub engine: bool,
    pub engine_port: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jwt_secret_name: Option<String>,
    pub hosts: Vec<String>,
    pub cors_domains: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub import: Option<ImportedAccount>,
    pub miner: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coinbase: Option<Address>,
}

impl NodeSpec {
    /// Node of the given client with operator defaults.
    pub fn new(client: ClientKind) -> Self {
        Self { client, ..Default::default() }
    }
}

impl Default for NodeSpec {
    fn default() -> Self {
        Self {
            client: ClientKind::Besu,
            image: None,
            sync_mode: SyncMode::default(),
            logging: VerbosityLevel::default(),
            p2p_port: 30303,
            node_private_key_secret_name: None,
            bootnodes: Vec::new(),
            static_nodes: Vec::new(),
            rpc: false,
            rpc_port: 8545,
            rpc_api: vec![Api::Web3, Api::Eth, Api::Net],
            ws: false,
            ws_port: 8546,
            ws_api: vec![Api::Web3, Api::Eth, Api::Net],
            graphql: false,
            graphql_port: 8547,
            engine: false,
            engine_port: 8551,
            jwt_secret_name: None,
            hosts: vec!["*".to_string()],
            cors_domains: vec!["*".to_string()],
            import: None,
            miner: false,
            coinbase: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    const NODE_ID: &str = "2281549869465d98e90cebc45e1d6834a01465a990add7bcf07a49287e7e66b50ca27f9c70a46190cef7ad746dd5d5b6b9dfee0c9954104c8e9bd0d42758ec58";

    #[rstest]
    #[case("besu", ClientKind::Besu)]
    #[case("geth", ClientKind::Geth)]
    #[case("nethermind", ClientKind::Nethermind)]
    #[case("parity", ClientKind::Parity)]
    fn parses_known_clients(#[case] input: &str, #[case] expected: ClientKind) {
        assert_eq!(input.parse::<ClientKind>().unwrap(), expected);
        assert_eq!(expected.to_string(), input);
    }

    #[test]
    fn unknown_client_is_rejected_with_its_name() {
        let err = "unknown-client".parse::<ClientKind>().unwrap_err();
        assert_eq!(err, UnsupportedClientError("unknown-client".to_string()));
    }

    #[rstest]
    #[case(format!("enode://{NODE_ID}@10.5.0.2:30303"))]
    #[case(format!("enode://{NODE_ID}@bootnode.example.com:30303?discport=30301"))]
    #[case(format!("enode://{NODE_ID}@[fe80::1]:30303"))]
    fn accepts_valid_enodes(#[case] input: String) {
        let enode: Enode = input.parse().unwrap();
        assert_eq!(enode.as_str(), input);
    }

    #[rstest]
    #[case("10.5.0.2:30303".to_string())]
    #[case(format!("enode://{}@10.5.0.2:30303", &NODE_ID[..64]))]
    #[case(format!("enode://{NODE_ID}@10.5.0.2"))]
    #[case(format!("enode://{NODE_ID}@:30303"))]
    #[case(format!("enode://{NODE_ID}@10.5.0.2:port"))]
    #[case(format!("enode://{NODE_ID}@10.0.0.1,evil host:30303"))]
    #[case(format!("enode://{NODE_ID}@host\u{7}:30303"))]
    #[case(format!("enode://{NODE_ID}@bad_host.example:30303"))]
    #[case(format!("enode://{NODE_ID}@10.5.0.2:30303?discport=30301,30302"))]
    fn rejects_invalid_enodes(#[case] input: String) {
        assert_eq!(input.parse::<Enode>().unwrap_err(), EncodingError::InvalidEnode(input));
    }

    #[test]
    fn node_spec_defaults_fill_missing_fields() {
        let node: NodeSpec = serde_json::from_str(r#"{"client": "geth", "rpc": true}"#).unwrap();
        assert_eq!(node.client, ClientKind::Geth);
        assert!(node.rpc);
        assert_eq!(node.rpc_port, 8545);
        assert_eq!(node.p2p_port, 30303);
        assert_eq!(node.sync_mode, SyncMode::Fast);
        assert_eq!(node.logging, VerbosityLevel::Info);
        assert_eq!(node.rpc_api, vec![Api::Web3, Api::Eth, Api::Net]);
    }
}
