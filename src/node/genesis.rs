//! Genesis block construction, verification and nonce search
//!
//! Every network pins its genesis block by hash and merkle root. Startup
//! rebuilds the block from the pinned inputs and refuses to continue if the
//! result differs. The nonce search is only used offline to produce new
//! pinned values.

use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;
use tracing::{debug, info};

use crate::consensus::{compact_to_target, Block, BlockHeader, DifficultyError, Script, Transaction};
use crate::crypto::Hash;

/// Genesis block version
pub const GENESIS_VERSION: i32 = 1;

/// Small integer pushed between `OP_0` and the message in the coinbase script
pub const GENESIS_SCRIPT_TAG: i64 = 42;

/// How often the nonce search polls its stop flag and reports progress
const PROGRESS_INTERVAL: u64 = 1 << 20;

/// Pinned inputs and expected outputs for one network's genesis block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GenesisSpec {
    /// Message embedded in the coinbase input script
    pub message: &'static str,
    /// Coinbase transaction time
    pub tx_time: u32,
    /// Header time
    pub time: u32,
    /// Compact-encoded PoW ceiling
    pub bits: u32,
    pub nonce: u32,
    /// Expected block hash (display hex)
    pub hash: &'static str,
    /// Expected merkle root (display hex)
    pub merkle_root: &'static str,
}

impl GenesisSpec {
    pub fn expected_hash(&self) -> Result<Hash, GenesisError> {
        parse_pinned("hash", self.hash)
    }

    pub fn expected_merkle_root(&self) -> Result<Hash, GenesisError> {
        parse_pinned("merkle_root", self.merkle_root)
    }
}

fn parse_pinned(field: &'static str, value: &'static str) -> Result<Hash, GenesisError> {
    Hash::from_hex(value).map_err(|_| GenesisError::MalformedConstant { field, value })
}

/// Genesis errors. Any of these at startup is fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenesisError {
    #[error("Malformed pinned genesis {field}: {value}")]
    MalformedConstant {
        field: &'static str,
        value: &'static str,
    },
    #[error("Genesis hash mismatch: expected {expected}, computed {actual}")]
    HashMismatch { expected: Hash, actual: Hash },
    #[error("Genesis merkle root mismatch: expected {expected}, computed {actual}")]
    MerkleMismatch { expected: Hash, actual: Hash },
    #[error("Invalid genesis target: {0}")]
    Difficulty(#[from] DifficultyError),
    #[error("Genesis target decodes to zero: 0x{0:08x}")]
    ZeroTarget(u32),
}

/// Build the genesis coinbase: `OP_0 <42> <message>` and one empty output
pub fn genesis_coinbase(spec: &GenesisSpec) -> Transaction {
    let script_sig = Script::new()
        .push_int(0)
        .push_int(GENESIS_SCRIPT_TAG)
        .push_slice(spec.message.as_bytes());

    Transaction::coinbase(spec.tx_time, script_sig)
}

/// Create the genesis block
///
/// Pure and byte-for-byte reproducible from `spec`.
pub fn build_genesis_block(spec: &GenesisSpec) -> Block {
    let coinbase = genesis_coinbase(spec);

    // One transaction: the merkle root is the coinbase hash
    let header = BlockHeader {
        version: GENESIS_VERSION,
        prev_hash: Hash::zero(),
        merkle_root: coinbase.hash(),
        time: spec.time,
        bits: spec.bits,
        nonce: spec.nonce,
    };

    Block::new(header, vec![coinbase])
}

/// Verify a genesis block against the pinned hash and merkle root
pub fn verify_genesis_block(block: &Block, spec: &GenesisSpec) -> Result<Hash, GenesisError> {
    let expected_merkle = spec.expected_merkle_root()?;
    let actual_merkle = block.compute_merkle_root();
    if actual_merkle != expected_merkle || block.header.merkle_root != expected_merkle {
        return Err(GenesisError::MerkleMismatch {
            expected: expected_merkle,
            actual: actual_merkle,
        });
    }

    let expected_hash = spec.expected_hash()?;
    let actual_hash = block.hash();
    if actual_hash != expected_hash {
        return Err(GenesisError::HashMismatch {
            expected: expected_hash,
            actual: actual_hash,
        });
    }

    debug!(hash = %actual_hash, merkle_root = %actual_merkle, "genesis verified");
    Ok(actual_hash)
}

/// Build and verify in one step
pub fn build_verified_genesis(spec: &GenesisSpec) -> Result<Block, GenesisError> {
    let block = build_genesis_block(spec);
    verify_genesis_block(&block, spec)?;
    Ok(block)
}

/// A header satisfying its own compact target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MinedGenesis {
    pub hash: Hash,
    pub merkle_root: Hash,
    pub time: u32,
    pub nonce: u32,
    /// Headers hashed during the search
    pub attempts: u64,
}

/// Nonce search result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenesisSearch {
    Found(MinedGenesis),
    Interrupted,
}

/// Search for a nonce whose header hash is at or below the target in `header.bits`
///
/// Starts from `header.nonce` and `header.time`. When the nonce wraps past
/// `u32::MAX` the time is bumped by one second and the search continues.
/// Expected cost grows with the inverse of the target's share of the hash
/// space, so this never runs at startup.
pub fn mine_genesis(mut header: BlockHeader, stop: &AtomicBool) -> Result<GenesisSearch, GenesisError> {
    let target = compact_to_target(header.bits)?;
    // No hash can reach a zero target
    if target.is_zero() {
        return Err(GenesisError::ZeroTarget(header.bits));
    }
    let mut attempts: u64 = 0;

    info!(
        bits = format_args!("0x{:08x}", header.bits),
        start_nonce = header.nonce,
        time = header.time,
        "searching for genesis nonce"
    );

    loop {
        let hash = header.hash();
        attempts += 1;

        if hash.to_u256() <= target {
            info!(%hash, nonce = header.nonce, time = header.time, attempts, "genesis nonce found");
            return Ok(GenesisSearch::Found(MinedGenesis {
                hash,
                merkle_root: header.merkle_root,
                time: header.time,
                nonce: header.nonce,
                attempts,
            }));
        }

        header.nonce = header.nonce.wrapping_add(1);
        if header.nonce == 0 {
            debug!(time = header.time, "nonce wrapped, incrementing time");
            header.time = header.time.wrapping_add(1);
        }

        if attempts % PROGRESS_INTERVAL == 0 {
            if stop.load(Ordering::Relaxed) {
                return Ok(GenesisSearch::Interrupted);
            }
            debug!(attempts, nonce = header.nonce, "genesis search progress");
        }
    }
}

/// Genesis block summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GenesisInfo {
    pub hash: Hash,
    pub merkle_root: Hash,
    pub time: u32,
    pub bits: u32,
    pub nonce: u32,
}

impl GenesisInfo {
    pub fn from_block(block: &Block) -> Self {
        Self {
            hash: block.hash(),
            merkle_root: block.header.merkle_root,
            time: block.header.time,
            bits: block.header.bits,
            nonce: block.header.nonce,
        }
    }
}
