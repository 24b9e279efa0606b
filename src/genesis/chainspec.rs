//! Nested "chainspec" genesis read by OpenEthereum and Nethermind.
//!
//! Unlike the geth-style format every EIP activation is spelled out as a
//! `*Transition` block and the builtin contracts carry their own pricing, so
//! the document is derived entirely from the [`ForkSchedule`].

use std::collections::BTreeMap;

use alloy_primitives::hex;
use serde_json::{json, Map, Value};
use tracing::debug;

use super::{account_entry, address_key, hex_block, low_address_accounts, LONDON_BASE_FEE};
use crate::{
    error::GenesisError,
    extra_data::encode_clique,
    precompile::precompiles,
    spec::{ConsensusConfig, EthashConfig, ForkSchedule, GenesisSpec},
};

/// Block rewards in wei: 5 ETH (Frontier), 3 ETH (Byzantium), 2 ETH (Constantinople).
const FRONTIER_REWARD: &str = "0x4563918244F40000";
const BYZANTIUM_REWARD: &str = "0x29A2241AF62C0000";
const CONSTANTINOPLE_REWARD: &str = "0x1BC16D674EC80000";

/// Seal nonces are 8 bytes.
const NONCE_WIDTH: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    OpenEthereum,
    Nethermind,
}

impl Dialect {
    const fn client(self) -> &'static str {
        match self {
            Self::OpenEthereum => "parity",
            Self::Nethermind => "nethermind",
        }
    }
}

/// Builds the chainspec of `genesis` for `dialect`.
///
/// IBFT 2.0 has no chainspec engine and is rejected with
/// [`GenesisError::UnsupportedConsensus`].
pub fn build(genesis: &GenesisSpec, dialect: Dialect) -> Result<Value, GenesisError> {
    let forks = &genesis.forks;
    let (engine, extra_data) = match &genesis.engine {
        ConsensusConfig::Ethash(ethash) => {
            (json!({ "Ethash": { "params": ethash_params(forks, ethash) } }), "0x".to_string())
        }
        ConsensusConfig::Clique(clique) => (
            json!({
                "clique": {
                    "params": { "period": clique.block_period, "epoch": clique.epoch_length }
                }
            }),
            encode_clique(&clique.signers),
        ),
        ConsensusConfig::Ibft2(_) => {
            return Err(GenesisError::UnsupportedConsensus {
                client: dialect.client(),
                consensus: genesis.consensus(),
            })
        }
    };

    let mut seal = Map::new();
    seal.insert("nonce".into(), genesis.nonce.to_fixed_width(NONCE_WIDTH)?.into());
    seal.insert("mixHash".into(), hex::encode_prefixed(genesis.mix_hash).into());

    let mut genesis_block = json!({
        "seal": { "ethereum": seal },
        "difficulty": genesis.difficulty.as_str(),
        "author": address_key(&genesis.coinbase),
        "timestamp": genesis.timestamp.as_str(),
        "extraData": extra_data,
        "gasLimit": genesis.gas_limit.as_str(),
    });
    if forks.london == 0 {
        genesis_block["baseFeePerGas"] = LONDON_BASE_FEE.into();
    }

    let mut accounts = low_address_accounts();
    for (address, builtin) in precompiles(forks) {
        accounts.insert(address_key(&address), json!({ "balance": "0x1", "builtin": builtin }));
    }
    for account in &genesis.accounts {
        accounts.insert(address_key(&account.address), account_entry(account));
    }

    debug!(
        target: "eth_clients::genesis",
        client = dialect.client(),
        chain_id = genesis.chain_id,
        consensus = %genesis.consensus(),
        accounts = genesis.accounts.len(),
        "Built chainspec genesis"
    );

    Ok(json!({
        "name": format!("chain-{}", genesis.chain_id),
        "engine": engine,
        "params": params(genesis),
        "genesis": genesis_block,
        "accounts": accounts,
    }))
}

fn ethash_params(forks: &ForkSchedule, ethash: &EthashConfig) -> Value {
    let mut rewards = BTreeMap::new();
    rewards.insert(0, FRONTIER_REWARD);
    rewards.insert(forks.byzantium, BYZANTIUM_REWARD);
    rewards.insert(forks.constantinople, CONSTANTINOPLE_REWARD);

    // Each delay postpones the bomb further, so delays landing on one block add up.
    let mut bomb_delays = BTreeMap::<u64, u64>::new();
    for (block, delay) in [
        (forks.byzantium, 3_000_000),
        (forks.constantinople, 2_000_000),
        (forks.muir_glacier, 4_000_000),
        (forks.london, 700_000),
        (forks.arrow_glacier, 1_000_000),
    ] {
        *bomb_delays.entry(block).or_default() += delay;
    }

    let block_reward = hex_keyed(rewards.into_iter().map(|(block, reward)| (block, reward.into())));
    let bomb_delays =
        hex_keyed(bomb_delays.into_iter().map(|(block, delay)| (block, hex_block(delay).into())));

    let mut params = json!({
        "minimumDifficulty": "0x20000",
        "difficultyBoundDivisor": "0x800",
        "durationLimit": "0xd",
        "blockReward": block_reward,
        "homesteadTransition": hex_block(forks.homestead),
        "eip100bTransition": hex_block(forks.byzantium),
        "difficultyBombDelays": bomb_delays,
    });
    if let Some(difficulty) = ethash.fixed_difficulty {
        params["fixedDifficulty"] = hex_block(difficulty).into();
    }
    params
}

fn hex_keyed(entries: impl Iterator<Item = (u64, Value)>) -> Value {
    entries.map(|(block, value)| (hex_block(block), value)).collect::<Map<_, _>>().into()
}

fn params(genesis: &GenesisSpec) -> Value {
    let forks = &genesis.forks;
    let mut params = json!({
        "accountStartNonce": "0x0",
        "chainID": hex_block(genesis.chain_id),
        "networkID": hex_block(genesis.network_id),
        "gasLimitBoundDivisor": "0x400",
        "maximumExtraDataSize": "0xffff",
        "minGasLimit": "0x1388",
        "maxCodeSize": "0x6000",
        "eip1559BaseFeeMaxChangeDenominator": "0x8",
        "eip1559ElasticityMultiplier": "0x2",
        "eip1559BaseFeeInitialValue": LONDON_BASE_FEE,
    });

    let transitions = [
        // Tangerine Whistle
        ("eip150Transition", forks.eip150),
        // Spurious Dragon
        ("eip155Transition", forks.eip155),
        ("eip160Transition", forks.eip158),
        ("eip161abcTransition", forks.eip158),
        ("eip161dTransition", forks.eip158),
        ("maxCodeSizeTransition", forks.eip158),
        // Byzantium
        ("eip140Transition", forks.byzantium),
        ("eip211Transition", forks.byzantium),
        ("eip214Transition", forks.byzantium),
        ("eip658Transition", forks.byzantium),
        // Constantinople
        ("eip145Transition", forks.constantinople),
        ("eip1014Transition", forks.constantinople),
        ("eip1052Transition", forks.constantinople),
        ("eip1283Transition", forks.constantinople),
        ("eip1283DisableTransition", forks.petersburg),
        // Istanbul
        ("eip1283ReenableTransition", forks.istanbul),
        ("eip1344Transition", forks.istanbul),
        ("eip1706Transition", forks.istanbul),
        ("eip1884Transition", forks.istanbul),
        ("eip2028Transition", forks.istanbul),
        // Berlin
        ("eip2929Transition", forks.berlin),
        ("eip2930Transition", forks.berlin),
        // London
        ("eip1559Transition", forks.london),
        ("eip3198Transition", forks.london),
        ("eip3529Transition", forks.london),
        ("eip3541Transition", forks.london),
    ];
    for (key, block) in transitions {
        params[key] = hex_block(block).into();
    }
    if let Some(dao) = forks.dao {
        params["daoHardforkTransition"] = hex_block(dao).into();
    }
    params
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{address, Address};
    use rstest::rstest;

    use super::*;
    use crate::spec::{CliqueConfig, HexString, Ibft2Config};

    const SIGNER: Address = address!("427e2c7cecd72bc4cdd4f7ebb8bb6e49789c8044");

    fn ethash_genesis() -> GenesisSpec {
        let mut genesis = GenesisSpec::new(
            4444,
            5555,
            ConsensusConfig::Ethash(EthashConfig { fixed_difficulty: None }),
        );
        genesis.forks = ForkSchedule {
            byzantium: 10,
            constantinople: 20,
            petersburg: 20,
            istanbul: 30,
            muir_glacier: 30,
            berlin: 40,
            london: 50,
            arrow_glacier: 50,
            ..Default::default()
        };
        genesis
    }

    #[test]
    fn ethash_rewards_follow_forks() {
        let document = build(&ethash_genesis(), Dialect::OpenEthereum).unwrap();
        let params = &document["engine"]["Ethash"]["params"];

        assert_eq!(
            params["blockReward"],
            json!({
                "0x0": FRONTIER_REWARD,
                "0xa": BYZANTIUM_REWARD,
                "0x14": CONSTANTINOPLE_REWARD,
            })
        );
        assert_eq!(params["eip100bTransition"], "0xa");
        assert!(params.get("fixedDifficulty").is_none());
    }

    #[test]
    fn bomb_delays_sharing_a_block_are_summed() {
        let document = build(&ethash_genesis(), Dialect::Nethermind).unwrap();
        assert_eq!(
            document["engine"]["Ethash"]["params"]["difficultyBombDelays"],
            json!({
                "0xa": "0x2dc6c0",
                "0x14": "0x1e8480",
                "0x1e": "0x3d0900",
                // London 700k + Arrow Glacier 1M
                "0x32": "0x19f0a0",
            })
        );
    }

    #[test]
    fn rewards_at_genesis_keep_the_latest() {
        let genesis = GenesisSpec::new(1, 1, ConsensusConfig::Ethash(EthashConfig::default()));
        let document = build(&genesis, Dialect::Nethermind).unwrap();
        assert_eq!(
            document["engine"]["Ethash"]["params"]["blockReward"],
            json!({ "0x0": CONSTANTINOPLE_REWARD })
        );
    }

    #[test]
    fn fixed_difficulty_is_forwarded() {
        let mut genesis = ethash_genesis();
        genesis.engine = ConsensusConfig::Ethash(EthashConfig { fixed_difficulty: Some(256) });
        let document = build(&genesis, Dialect::OpenEthereum).unwrap();
        assert_eq!(document["engine"]["Ethash"]["params"]["fixedDifficulty"], "0x100");
    }

    #[rstest]
    #[case::open_ethereum(Dialect::OpenEthereum)]
    #[case::nethermind(Dialect::Nethermind)]
    fn clique_engine_and_extra_data(#[case] dialect: Dialect) {
        let genesis =
            GenesisSpec::new(4444, 5555, ConsensusConfig::Clique(CliqueConfig::new(vec![SIGNER])));
        let document = build(&genesis, dialect).unwrap();

        assert_eq!(
            document["engine"],
            json!({ "clique": { "params": { "period": 15, "epoch": 30000 } } })
        );
        assert_eq!(document["genesis"]["extraData"], encode_clique(&[SIGNER]));
        assert_eq!(document["params"]["chainID"], "0x115c");
        assert_eq!(document["params"]["networkID"], "0x15b3");
    }

    #[rstest]
    #[case::open_ethereum(Dialect::OpenEthereum, "parity")]
    #[case::nethermind(Dialect::Nethermind, "nethermind")]
    fn ibft2_is_unsupported(#[case] dialect: Dialect, #[case] client: &str) {
        let genesis = GenesisSpec::new(1, 1, ConsensusConfig::Ibft2(Ibft2Config::new(vec![SIGNER])));
        let err = build(&genesis, dialect).unwrap_err();
        assert!(err.to_string().starts_with(client), "{err}");
    }

    #[test]
    fn seal_nonce_is_padded() {
        let mut genesis = ethash_genesis();
        genesis.nonce = HexString::from(0x42u64);
        let document = build(&genesis, Dialect::OpenEthereum).unwrap();
        assert_eq!(document["genesis"]["seal"]["ethereum"]["nonce"], "0x0000000000000042");
    }

    #[test]
    fn oversized_nonce_fails() {
        let mut genesis = ethash_genesis();
        genesis.nonce = "0x10000000000000000".parse().unwrap();
        assert!(matches!(
            build(&genesis, Dialect::OpenEthereum),
            Err(GenesisError::Encoding(_))
        ));
    }

    #[test]
    fn transitions_track_the_schedule() {
        let mut genesis = ethash_genesis();
        genesis.forks.dao = Some(0);
        let params = &build(&genesis, Dialect::OpenEthereum).unwrap()["params"];

        assert_eq!(params["eip140Transition"], "0xa");
        assert_eq!(params["eip1283DisableTransition"], "0x14");
        assert_eq!(params["eip2929Transition"], "0x28");
        assert_eq!(params["eip1559Transition"], "0x32");
        assert_eq!(params["daoHardforkTransition"], "0x0");
    }

    #[test]
    fn base_fee_only_when_london_at_genesis() {
        let document = build(&ethash_genesis(), Dialect::OpenEthereum).unwrap();
        assert!(document["genesis"].get("baseFeePerGas").is_none());

        let genesis = GenesisSpec::new(1, 1, ConsensusConfig::Ethash(EthashConfig::default()));
        let document = build(&genesis, Dialect::OpenEthereum).unwrap();
        assert_eq!(document["genesis"]["baseFeePerGas"], LONDON_BASE_FEE);
    }

    #[test]
    fn builtins_are_funded_accounts() {
        let document = build(&ethash_genesis(), Dialect::Nethermind).unwrap();
        let accounts = document["accounts"].as_object().unwrap();

        assert_eq!(accounts.len(), 256);
        let ecrecover = &accounts["0x0000000000000000000000000000000000000001"];
        assert_eq!(ecrecover["balance"], "0x1");
        assert_eq!(ecrecover["builtin"]["name"], "ecrecover");
        assert!(accounts["0x000000000000000000000000000000000000000a"].get("builtin").is_none());
    }
}
