//! Genesis `extraData` encodings for the proof-of-authority engines.
//!
//! Both layouts carry the initial signer/validator set. Every node of a
//! network must produce byte-identical output or the genesis hashes diverge.

use alloy_primitives::{hex, Address, Bytes, B256};
use alloy_rlp::RlpEncodable;

use crate::error::EncodingError;

/// Leading bytes reserved for signer vanity data.
pub const VANITY_LENGTH: usize = 32;
/// Trailing bytes reserved for the block seal (secp256k1 signature).
pub const SEAL_LENGTH: usize = 65;

const ADDRESS_LENGTH: usize = 20;

/// Clique layout: vanity ‖ signer addresses ‖ empty seal.
pub fn encode_clique(signers: &[Address]) -> String {
    let mut extra =
        Vec::with_capacity(VANITY_LENGTH + signers.len() * ADDRESS_LENGTH + SEAL_LENGTH);
    extra.extend_from_slice(&[0u8; VANITY_LENGTH]);
    for signer in signers {
        extra.extend_from_slice(signer.as_slice());
    }
    extra.extend_from_slice(&[0u8; SEAL_LENGTH]);
    hex::encode_prefixed(extra)
}

/// Recovers the signer list from Clique `extraData`.
pub fn decode_clique(extra_data: &str) -> Result<Vec<Address>, EncodingError> {
    let bytes =
        hex::decode(extra_data).map_err(|_| EncodingError::InvalidHex(extra_data.to_string()))?;

    let signers = bytes
        .len()
        .checked_sub(VANITY_LENGTH + SEAL_LENGTH)
        .filter(|len| len % ADDRESS_LENGTH == 0)
        .map(|len| &bytes[VANITY_LENGTH..VANITY_LENGTH + len])
        .ok_or(EncodingError::MalformedExtraData(bytes.len()))?;

    Ok(signers.chunks_exact(ADDRESS_LENGTH).map(Address::from_slice).collect())
}

/// RLP list `[vanity, validators, vote, round, committer seals]`.
#[derive(Debug, RlpEncodable)]
struct Ibft2ExtraData {
    vanity: B256,
    validators: Vec<Address>,
    vote: Bytes,
    round: [u8; 4],
    committer_seals: Vec<Bytes>,
}

/// IBFT 2.0 layout: RLP-encoded validator set with no vote, round 0, no seals.
pub fn encode_ibft2(validators: &[Address]) -> Result<String, EncodingError> {
    if validators.is_empty() {
        return Err(EncodingError::EmptyValidatorSet);
    }

    let extra = Ibft2ExtraData {
        vanity: B256::ZERO,
        validators: validators.to_vec(),
        vote: Bytes::new(),
        round: [0u8; 4],
        committer_seals: Vec::new(),
    };
    Ok(hex::encode_prefixed(alloy_rlp::encode(&extra)))
}
