//! Compact difficulty encoding
//!
//! A 256-bit target is packed into 32 bits: one exponent byte (size of the
//! target in bytes) followed by a 23-bit mantissa and a sign bit.

use primitive_types::U256;
use thiserror::Error;
use crate::crypto::Hash;

const SIGN_BIT: u32 = 0x0080_0000;
const MANTISSA_MASK: u32 = 0x007f_ffff;

/// Compact target decoding errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DifficultyError {
    #[error("Negative compact target 0x{0:08x}")]
    Negative(u32),
    #[error("Compact target 0x{0:08x} overflows 256 bits")]
    Overflow(u32),
}

/// Convert compact difficulty to 256-bit target
pub fn compact_to_target(compact: u32) -> Result<U256, DifficultyError> {
    let exponent = compact >> 24;
    let mantissa = compact & MANTISSA_MASK;

    if mantissa != 0 && compact & SIGN_BIT != 0 {
        return Err(DifficultyError::Negative(compact));
    }
    if mantissa != 0
        && (exponent > 34
            || (mantissa > 0xff && exponent > 33)
            || (mantissa > 0xffff && exponent > 32))
    {
        return Err(DifficultyError::Overflow(compact));
    }

    if exponent <= 3 {
        Ok(U256::from(mantissa >> (8 * (3 - exponent))))
    } else {
        Ok(U256::from(mantissa) << (8 * (exponent - 3)))
    }
}

/// Convert 256-bit target to compact difficulty
pub fn target_to_compact(target: U256) -> u32 {
    let mut size = (target.bits() + 7) / 8;

    let mut compact = if size <= 3 {
        (target.low_u64() << (8 * (3 - size))) as u32
    } else {
        (target >> (8 * (size - 3))).low_u32()
    };

    // Keep the mantissa positive
    if compact & SIGN_BIT != 0 {
        compact >>= 8;
        size += 1;
    }

    compact | ((size as u32) << 24)
}

/// Check a block hash against its compact target and the network ceiling
pub fn check_proof_of_work(hash: &Hash, bits: u32, pow_limit: U256) -> bool {
    let target = match compact_to_target(bits) {
        Ok(target) => target,
        Err(_) => return false,
    };

    if target.is_zero() || target > pow_limit {
        return false;
    }

    hash.to_u256() <= target
}
