//! BitcoinT chain parameters
//!
//! Per-network consensus constants for a hybrid proof-of-work/proof-of-stake
//! chain, the verified genesis block of each network, fixed bootstrap seeds
//! and super-stake reward tiers. Validation, networking and wallet code read
//! these values through a `ParamsRegistry`.

pub mod consensus;
pub mod crypto;
pub mod node;
pub mod p2p;
pub mod params;
pub mod wallet;

/// Money units - HARD-CODED, NEVER CONFIGURABLE
pub mod constants {
    /// One coin in base units (8 decimal places)
    pub const COIN: i64 = 100_000_000;

    /// One hundredth of a coin
    pub const CENT: i64 = 1_000_000;

    /// Upper bound on any amount
    pub const MAX_MONEY: i64 = 2_000_000_000 * COIN;
}
