//! Validated hex text carried verbatim into genesis documents.

use std::str::FromStr;

use derive_more::{Display, Into};
use serde::{Deserialize, Serialize};

use crate::error::EncodingError;

/// `0x`-prefixed hex text such as a balance, difficulty, or bytecode.
///
/// The original spelling is preserved so genesis documents reproduce exactly
/// what the operator wrote (leading zeros and letter case included).
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Into, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct HexString(String);

impl HexString {
    /// Returns the text including the `0x` prefix.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Digits after the prefix.
    pub fn digits(&self) -> &str {
        &self.0[2..]
    }

    /// Left-pads the value to exactly `width` hex digits.
    ///
    /// Leading zeros beyond `width` are dropped first, so `0x00ff` fits into 2
    /// digits while `0x100` does not.
    pub fn to_fixed_width(&self, width: usize) -> Result<String, EncodingError> {
        let significant = self.digits().trim_start_matches('0');
        if significant.len() > width {
            return Err(EncodingError::HexTooWide { value: self.0.clone(), width });
        }
        Ok(format!("0x{significant:0>width$}"))
    }
}

impl FromStr for HexString {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").ok_or_else(|| EncodingError::InvalidHex(s.to_string()))?;
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(EncodingError::InvalidHex(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for HexString {
    type Error = EncodingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<u64> for HexString {
    fn from(value: u64) -> Self {
        Self(format!("{value:#x}"))
    }
}
