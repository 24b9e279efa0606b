//! Error types returned by the translation core.
//!
//! Every function in this crate is deterministic, so none of these errors are
//! retryable: the caller has to change its input.

use thiserror::Error;

use crate::spec::{Consensus, ForkName};

/// The factory was asked for a client this crate has no adapter for.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported client: {0}")]
pub struct UnsupportedClientError(pub String);

/// Hex, address, or RLP encoding failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    #[error("invalid hex string {0:?}: expected 0x-prefixed hex digits")]
    InvalidHex(String),
    #[error("hex value {value} does not fit in {width} hex digits")]
    HexTooWide { value: String, width: usize },
    #[error("invalid address {0:?}")]
    InvalidAddress(String),
    #[error("invalid enode url {0:?}")]
    InvalidEnode(String),
    #[error("extraData of {0} bytes is not vanity + signers + seal")]
    MalformedExtraData(usize),
    #[error("validator set must contain at least one address")]
    EmptyValidatorSet,
}

/// Failures while assembling a genesis document.
#[derive(Debug, Error)]
pub enum GenesisError {
    #[error(transparent)]
    Encoding(#[from] EncodingError),
    #[error("failed to marshal genesis document: {0}")]
    Marshal(#[from] serde_json::Error),
    #[error("{client} genesis cannot express {consensus} consensus")]
    UnsupportedConsensus { client: &'static str, consensus: Consensus },
}

/// One adjacent pair of forks scheduled out of order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForkOrderViolation {
    pub earlier: (ForkName, u64),
    pub later: (ForkName, u64),
}

impl std::fmt::Display for ForkOrderViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (earlier, earlier_block) = self.earlier;
        let (later, later_block) = self.later;
        write!(f, "{later} ({later_block}) is before {earlier} ({earlier_block})")
    }
}

/// Every out-of-order pair found in a fork schedule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("fork schedule is out of order: {}", display_violations(.violations))]
pub struct ForkOrderError {
    pub violations: Vec<ForkOrderViolation>,
}

fn display_violations(violations: &[ForkOrderViolation]) -> String {
    violations.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

/// Network-level contract violations caught by [`NetworkConfig::validate`].
///
/// [`NetworkConfig::validate`]: crate::spec::NetworkConfig::validate
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkConfigError {
    #[error("network declares {declared} consensus but genesis configures {configured}")]
    ConsensusMismatch { declared: Consensus, configured: Consensus },
    #[error("{0} consensus needs at least one signer")]
    EmptySigners(Consensus),
    #[error(transparent)]
    ForkOrder(#[from] ForkOrderError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_client_carries_requested_kind() {
        let err = UnsupportedClientError("unknown-client".to_string());
        assert!(err.to_string().contains("unknown-client"));
    }

    #[test]
    fn fork_order_error_lists_every_violation() {
        let err = ForkOrderError {
            violations: vec![
                ForkOrderViolation {
                    earlier: (ForkName::Homestead, 10),
                    later: (ForkName::Eip150, 5),
                },
                ForkOrderViolation {
                    earlier: (ForkName::Berlin, 30),
                    later: (ForkName::London, 20),
                },
            ],
        };
        let message = err.to_string();
        assert!(message.contains("eip150 (5) is before homestead (10)"));
        assert!(message.contains("london (20) is before berlin (30)"));
    }
}
