//! Genesis documents for the two JSON families execution clients read.
//!
//! Besu and Geth consume the flat "geth-style" `genesis.json`, OpenEthereum and
//! Nethermind the nested "chainspec" format. Both builders return a
//! [`serde_json::Value`]; adapters turn it into the string they mount.

use alloy_primitives::{hex, Address};
use serde_json::{json, Map, Value};

use crate::{error::GenesisError, spec::Account};

pub mod chainspec;
pub mod geth_style;

/// `mixHash` Besu requires on IBFT 2.0 genesis blocks ("istanbul byzantine fault tolerance").
pub const IBFT2_MIX_HASH: &str =
    "0x63746963616c2062797a616e74696e65206661756c7420746f6c6572616e6365";

/// Initial EIP-1559 base fee (1 gwei) when London is active at genesis.
pub const LONDON_BASE_FEE: &str = "0x3B9ACA00";

/// Block number in `0x` hex, as chainspec transitions expect.
pub(crate) fn hex_block(block: u64) -> String {
    format!("{block:#x}")
}

pub(crate) fn address_key(address: &Address) -> String {
    hex::encode_prefixed(address)
}

/// `0x00..=0xff` funded with one wei each so precompile calls never hit an
/// empty account.
pub(crate) fn low_address_accounts() -> Map<String, Value> {
    (0u8..=u8::MAX)
        .map(|last| (address_key(&Address::with_last_byte(last)), json!({ "balance": "0x1" })))
        .collect()
}

/// Genesis allocation entry of a user account.
pub(crate) fn account_entry(account: &Account) -> Value {
    let mut entry = Map::new();
    entry.insert("balance".into(), account.balance.as_str().into());
    if let Some(code) = &account.code {
        entry.insert("code".into(), code.as_str().into());
    }
    if let Some(storage) = &account.storage {
        let storage: Map<String, Value> = storage
            .iter()
            .map(|(slot, value)| (slot.to_string(), value.as_str().into()))
            .collect();
        entry.insert("storage".into(), storage.into());
    }
    entry.into()
}

/// Pretty-printed document, the form adapters write to disk.
pub(crate) fn to_json_string(document: &Value) -> Result<String, GenesisError> {
    Ok(serde_json::to_string_pretty(document)?)
}
