//! Fork activation schedule shared by every genesis dialect.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ForkOrderError, ForkOrderViolation};

/// Named protocol upgrades in activation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ForkName {
    Homestead,
    Dao,
    Eip150,
    Eip155,
    Eip158,
    Byzantium,
    Constantinople,
    Petersburg,
    Istanbul,
    MuirGlacier,
    Berlin,
    London,
    ArrowGlacier,
}

impl ForkName {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Homestead => "homestead",
            Self::Dao => "dao",
            Self::Eip150 => "eip150",
            Self::Eip155 => "eip155",
            Self::Eip158 => "eip158",
            Self::Byzantium => "byzantium",
            Self::Constantinople => "constantinople",
            Self::Petersburg => "petersburg",
            Self::Istanbul => "istanbul",
            Self::MuirGlacier => "muirGlacier",
            Self::Berlin => "berlin",
            Self::London => "london",
            Self::ArrowGlacier => "arrowGlacier",
        }
    }
}

impl fmt::Display for ForkName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Block numbers at which each fork activates. Every fork defaults to genesis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ForkSchedule {
    pub homestead: u64,
    /// The DAO fork is only scheduled on networks that opt in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dao: Option<u64>,
    pub eip150: u64,
    pub eip155: u64,
    pub eip158: u64,
    pub byzantium: u64,
    pub constantinople: u64,
    pub petersburg: u64,
    pub istanbul: u64,
    pub muir_glacier: u64,
    pub berlin: u64,
    pub london: u64,
    pub arrow_glacier: u64,
}

impl ForkSchedule {
    /// Scheduled forks in activation order, skipping the DAO fork when unset.
    pub fn ordered(&self) -> Vec<(ForkName, u64)> {
        let mut forks = vec![(ForkName::Homestead, self.homestead)];
        if let Some(dao) = self.dao {
            forks.push((ForkName::Dao, dao));
        }
        forks.extend([
            (ForkName::Eip150, self.eip150),
            (ForkName::Eip155, self.eip155),
            (ForkName::Eip158, self.eip158),
            (ForkName::Byzantium, self.byzantium),
            (ForkName::Constantinople, self.constantinople),
            (ForkName::Petersburg, self.petersburg),
            (ForkName::Istanbul, self.istanbul),
            (ForkName::MuirGlacier, self.muir_glacier),
            (ForkName::Berlin, self.berlin),
            (ForkName::London, self.london),
            (ForkName::ArrowGlacier, self.arrow_glacier),
        ]);
        forks
    }

    /// Checks that activation blocks never decrease.
    ///
    /// Every offending adjacent pair is reported, not just the first one.
    pub fn validate(&self) -> Result<(), ForkOrderError> {
        let violations: Vec<_> = self
            .ordered()
            .windows(2)
            .filter(|pair| pair[1].1 < pair[0].1)
            .map(|pair| ForkOrderViolation { earlier: pair[0], later: pair[1] })
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ForkOrderError { violations })
        }
    }
}
