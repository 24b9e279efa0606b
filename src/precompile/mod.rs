//! Builtin contract descriptors for the chainspec `accounts` section.
//!
//! OpenEthereum and Nethermind read precompile pricing from the chainspec, so
//! the nine standard builtins must be spelled out with a price per fork. Besu
//! and Geth hardcode them and never need this table.

use std::collections::BTreeMap;

use alloy_primitives::Address;
use serde::{ser::SerializeMap, Serialize, Serializer};

use crate::spec::ForkSchedule;

/// Gas pricing formula of a builtin, in chainspec spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Price {
    #[serde(rename = "linear")]
    Linear { base: u64, word: u64 },
    #[serde(rename = "modexp")]
    Modexp { divisor: u64 },
    /// EIP-2565 repricing (Berlin).
    #[serde(rename = "modexp2565")]
    Modexp2565 {},
    #[serde(rename = "alt_bn128_const_operations")]
    AltBn128ConstOperations { price: u64 },
    #[serde(rename = "alt_bn128_pairing")]
    AltBn128Pairing { base: u64, pair: u64 },
    #[serde(rename = "blake2_f")]
    Blake2F { gas_per_round: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<&'static str>,
    pub price: Price,
}

/// One builtin contract: its name and pricing keyed by activation block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Precompile {
    pub name: &'static str,
    pub pricing: BTreeMap<u64, PriceEntry>,
}

impl Precompile {
    fn new(name: &'static str) -> Self {
        Self { name, pricing: BTreeMap::new() }
    }

    /// Schedules `price` from `block` on. A later call for the same block wins.
    fn priced_at(mut self, block: u64, price: Price) -> Self {
        self.pricing.insert(block, PriceEntry { info: None, price });
        self
    }

    fn priced_with_info_at(mut self, block: u64, info: &'static str, price: Price) -> Self {
        self.pricing.insert(block, PriceEntry { info: Some(info), price });
        self
    }
}

impl Serialize for Precompile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        struct Pricing<'a>(&'a BTreeMap<u64, PriceEntry>);

        impl Serialize for Pricing<'_> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut map = serializer.serialize_map(Some(self.0.len()))?;
                for (block, entry) in self.0 {
                    map.serialize_entry(&format!("{block:#x}"), entry)?;
                }
                map.end()
            }
        }

        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("name", self.name)?;
        map.serialize_entry("pricing", &Pricing(&self.pricing))?;
        map.end()
    }
}

/// The nine standard builtins at `0x01..=0x09`, priced for `forks`.
pub fn precompiles(forks: &ForkSchedule) -> BTreeMap<Address, Precompile> {
    let byzantium = forks.byzantium;
    let istanbul = forks.istanbul;

    [
        Precompile::new("ecrecover").priced_at(0, Price::Linear { base: 3000, word: 0 }),
        Precompile::new("sha256").priced_at(0, Price::Linear { base: 60, word: 12 }),
        Precompile::new("ripemd160").priced_at(0, Price::Linear { base: 600, word: 120 }),
        Precompile::new("identity").priced_at(0, Price::Linear { base: 15, word: 3 }),
        Precompile::new("modexp")
            .priced_at(byzantium, Price::Modexp { divisor: 20 })
            .priced_at(forks.berlin, Price::Modexp2565 {}),
        Precompile::new("alt_bn128_add")
            .priced_at(byzantium, Price::AltBn128ConstOperations { price: 500 })
            .priced_with_info_at(
                istanbul,
                "EIP 1108 transition",
                Price::AltBn128ConstOperations { price: 150 },
            ),
        Precompile::new("alt_bn128_mul")
            .priced_at(byzantium, Price::AltBn128ConstOperations { price: 40_000 })
            .priced_with_info_at(
                istanbul,
                "EIP 1108 transition",
                Price::AltBn128ConstOperations { price: 6_000 },
            ),
        Precompile::new("alt_bn128_pairing")
            .priced_at(byzantium, Price::AltBn128Pairing { base: 100_000, pair: 80_000 })
            .priced_with_info_at(
                istanbul,
                "EIP 1108 transition",
                Price::AltBn128Pairing { base: 45_000, pair: 34_000 },
            ),
        Precompile::new("blake2_f").priced_at(istanbul, Price::Blake2F { gas_per_round: 1 }),
    ]
    .into_iter()
    .zip(1u8..)
    .map(|(precompile, index)| (Address::with_last_byte(index), precompile))
    .collect()
}
