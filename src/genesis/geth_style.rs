//! Flat `genesis.json` read by Besu and Geth.

use alloy_primitives::hex;
use serde_json::{json, Map, Value};
use tracing::debug;

use super::{account_entry, address_key, low_address_accounts, IBFT2_MIX_HASH, LONDON_BASE_FEE};
use crate::{
    error::GenesisError,
    extra_data::{encode_clique, encode_ibft2},
    spec::{ConsensusConfig, ForkSchedule, GenesisSpec},
};

/// Which client the document is written for. Only the engine section differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Besu,
    Geth,
}

impl Dialect {
    const fn client(self) -> &'static str {
        match self {
            Self::Besu => "besu",
            Self::Geth => "geth",
        }
    }
}

/// Builds the genesis document of `genesis` in `dialect`.
pub fn build(genesis: &GenesisSpec, dialect: Dialect) -> Result<Value, GenesisError> {
    let mut config = fork_blocks(genesis.chain_id, &genesis.forks);
    let (key, engine) = engine_section(&genesis.engine, dialect);
    config.insert(key.into(), engine);

    let mut mix_hash = hex::encode_prefixed(genesis.mix_hash);
    let mut nonce = genesis.nonce.to_string();
    let mut difficulty = genesis.difficulty.to_string();
    let extra_data = match &genesis.engine {
        ConsensusConfig::Ethash(_) => "0x".to_string(),
        ConsensusConfig::Clique(clique) => encode_clique(&clique.signers),
        ConsensusConfig::Ibft2(ibft2) => {
            mix_hash = IBFT2_MIX_HASH.to_string();
            nonce = "0x0".to_string();
            difficulty = "0x1".to_string();
            encode_ibft2(&ibft2.validators)?
        }
    };

    let mut alloc = low_address_accounts();
    for account in &genesis.accounts {
        alloc.insert(address_key(&account.address), account_entry(account));
    }

    let mut document = json!({
        "config": config,
        "nonce": nonce,
        "timestamp": genesis.timestamp.as_str(),
        "gasLimit": genesis.gas_limit.as_str(),
        "difficulty": difficulty,
        "coinbase": address_key(&genesis.coinbase),
        "mixHash": mix_hash,
        "extraData": extra_data,
        "alloc": alloc,
    });
    if genesis.forks.london == 0 {
        document["baseFeePerGas"] = LONDON_BASE_FEE.into();
    }

    debug!(
        target: "eth_clients::genesis",
        client = dialect.client(),
        chain_id = genesis.chain_id,
        consensus = %genesis.consensus(),
        accounts = genesis.accounts.len(),
        "Built geth-style genesis"
    );
    Ok(document)
}

fn fork_blocks(chain_id: u64, forks: &ForkSchedule) -> Map<String, Value> {
    let mut config = Map::new();
    config.insert("chainId".into(), chain_id.into());
    config.insert("homesteadBlock".into(), forks.homestead.into());
    if let Some(dao) = forks.dao {
        config.insert("daoForkBlock".into(), dao.into());
        config.insert("daoForkSupport".into(), true.into());
    }
    for (key, block) in [
        ("eip150Block", forks.eip150),
        ("eip155Block", forks.eip155),
        ("eip158Block", forks.eip158),
        ("byzantiumBlock", forks.byzantium),
        ("constantinopleBlock", forks.constantinople),
        ("petersburgBlock", forks.petersburg),
        ("istanbulBlock", forks.istanbul),
        ("muirGlacierBlock", forks.muir_glacier),
        ("berlinBlock", forks.berlin),
        ("londonBlock", forks.london),
        ("arrowGlacierBlock", forks.arrow_glacier),
    ] {
        config.insert(key.into(), block.into());
    }
    config
}

fn engine_section(engine: &ConsensusConfig, dialect: Dialect) -> (&'static str, Value) {
    match (engine, dialect) {
        (ConsensusConfig::Ethash(ethash), Dialect::Besu) => {
            let mut section = Map::new();
            if let Some(difficulty) = ethash.fixed_difficulty {
                section.insert("fixeddifficulty".into(), difficulty.into());
            }
            ("ethash", section.into())
        }
        // Geth has no fixed difficulty knob.
        (ConsensusConfig::Ethash(_), Dialect::Geth) => ("ethash", json!({})),
        (ConsensusConfig::Clique(clique), Dialect::Besu) => (
            "clique",
            json!({
                "blockperiodseconds": clique.block_period,
                "epochlength": clique.epoch_length,
            }),
        ),
        (ConsensusConfig::Clique(clique), Dialect::Geth) => (
            "clique",
            json!({
                "period": clique.block_period,
                "epoch": clique.epoch_length,
            }),
        ),
        (ConsensusConfig::Ibft2(ibft2), Dialect::Besu) => (
            "ibft2",
            json!({
                "blockperiodseconds": ibft2.block_period,
                "epochlength": ibft2.epoch_length,
                "requesttimeoutseconds": ibft2.request_timeout,
                "messagequeuelimit": ibft2.message_queue_limit,
                "duplicatemessagelimit": ibft2.duplicate_message_limit,
                "futuremessageslimit": ibft2.future_messages_limit,
                "futuremessagesmaxdistance": ibft2.future_messages_max_distance,
            }),
        ),
        (ConsensusConfig::Ibft2(ibft2), Dialect::Geth) => (
            "ibft2",
            json!({
                "blockperiodseconds": ibft2.block_period,
                "epochlength": ibft2.epoch_length,
                "requesttimeoutseconds": ibft2.request_timeout,
            }),
        ),
    }
}
