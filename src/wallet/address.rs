//! Base58Check address encoding
//!
//! An encoded value is `base58(prefix || payload || checksum)` where the
//! checksum is the first four bytes of SHA256d over `prefix || payload`. The
//! prefix identifies both the network and the address class.

use thiserror::Error;

use crate::crypto::sha256d;
use crate::params::{Base58Type, ChainParams};

const CHECKSUM_LEN: usize = 4;

/// Address decoding errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("Invalid base58 encoding")]
    InvalidEncoding,
    #[error("Address too short: {0} bytes")]
    TooShort(usize),
    #[error("Invalid checksum")]
    InvalidChecksum,
    #[error("Unknown version prefix for this network")]
    UnknownPrefix,
}

fn checksum(body: &[u8]) -> [u8; CHECKSUM_LEN] {
    let digest = sha256d(body);
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&digest.0[..CHECKSUM_LEN]);
    out
}

/// Encode `payload` as an address of class `kind` on the network of `params`
pub fn encode_address(params: &ChainParams, kind: Base58Type, payload: &[u8]) -> String {
    let prefix = params.base58_prefix(kind);
    let mut body = Vec::with_capacity(prefix.len() + payload.len() + CHECKSUM_LEN);
    body.extend_from_slice(prefix);
    body.extend_from_slice(payload);
    let check = checksum(&body);
    body.extend_from_slice(&check);
    bs58::encode(body).into_string()
}

/// Decode an address, returning its class and payload
///
/// When several prefixes match, the longest one wins.
pub fn decode_address(params: &ChainParams, address: &str) -> Result<(Base58Type, Vec<u8>), AddressError> {
    let decoded = bs58::decode(address)
        .into_vec()
        .map_err(|_| AddressError::InvalidEncoding)?;

    if decoded.len() <= CHECKSUM_LEN {
        return Err(AddressError::TooShort(decoded.len()));
    }

    let (body, check) = decoded.split_at(decoded.len() - CHECKSUM_LEN);
    if checksum(body) != check {
        return Err(AddressError::InvalidChecksum);
    }

    let kind = Base58Type::ALL
        .into_iter()
        .filter(|kind| {
            let prefix = params.base58_prefix(*kind);
            body.len() > prefix.len() && body.starts_with(prefix)
        })
        .max_by_key(|kind| params.base58_prefix(*kind).len())
        .ok_or(AddressError::UnknownPrefix)?;

    let payload = body[params.base58_prefix(kind).len()..].to_vec();
    Ok((kind, payload))
}
