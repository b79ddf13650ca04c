//! Block structure
//!
//! Defines the block and the 80-byte block header.

use serde::Serialize;
use crate::crypto::{compute_merkle_root, x11_hash, Hash};
use super::Transaction;

/// Serialized header length in bytes
pub const HEADER_SIZE: usize = 80;

/// Block header containing all metadata
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct BlockHeader {
    /// Protocol version
    pub version: i32,
    /// Hash of the previous block
    pub prev_hash: Hash,
    /// Merkle root of all transactions
    pub merkle_root: Hash,
    /// Block timestamp (seconds since Unix epoch)
    pub time: u32,
    /// Difficulty target (compact representation)
    pub bits: u32,
    /// Nonce used for PoW
    pub nonce: u32,
}

impl BlockHeader {
    /// Serialize the header for hashing
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[0..4].copy_from_slice(&self.version.to_le_bytes());
        bytes[4..36].copy_from_slice(&self.prev_hash.0);
        bytes[36..68].copy_from_slice(&self.merkle_root.0);
        bytes[68..72].copy_from_slice(&self.time.to_le_bytes());
        bytes[72..76].copy_from_slice(&self.bits.to_le_bytes());
        bytes[76..80].copy_from_slice(&self.nonce.to_le_bytes());
        bytes
    }

    /// X11 hash of the serialized header
    pub fn hash(&self) -> Hash {
        x11_hash(&self.to_bytes())
    }
}

/// A complete block containing header and transactions
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Block {
    pub header: BlockHeader,
    pub transactions: Vec<Transaction>,
}

impl Block {
    pub fn new(header: BlockHeader, transactions: Vec<Transaction>) -> Self {
        Self { header, transactions }
    }

    /// Get the block hash
    pub fn hash(&self) -> Hash {
        self.header.hash()
    }

    /// Recompute the merkle root from the transaction list
    pub fn compute_merkle_root(&self) -> Hash {
        let tx_hashes: Vec<Hash> = self.transactions.iter().map(|tx| tx.hash()).collect();
        compute_merkle_root(&tx_hashes)
    }

    /// Check if this is the genesis block
    pub fn is_genesis(&self) -> bool {
        self.header.prev_hash.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consensus::Script;

    fn header(nonce: u32) -> BlockHeader {
        BlockHeader {
            version: 1,
            prev_hash: Hash::zero(),
            merkle_root: Hash::zero(),
            time: 1_234_567_890,
            bits: 0x1d00ffff,
            nonce,
        }
    }

    #[test]
    fn test_block_header_serialization() {
        let bytes = header(0x01020304).to_bytes();
        assert_eq!(bytes.len(), HEADER_SIZE);
        assert_eq!(&bytes[0..4], &[1, 0, 0, 0]);
        assert_eq!(&bytes[72..76], &[0xff, 0xff, 0x00, 0x1d]);
        assert_eq!(&bytes[76..80], &[4, 3, 2, 1]);
    }

    #[test]
    fn test_main_genesis_header_hash() {
        let mut genesis = BlockHeader {
            version: 1,
            prev_hash: Hash::zero(),
            merkle_root: Hash::from_hex("11c47b76e8e52e603e08c07105fa6fa093379401082640d69f0f25b8177fb65b").unwrap(),
            time: 1_429_801_140,
            bits: 0x1e0fffff,
            nonce: 1_095_958,
        };
        assert_eq!(
            genesis.hash().to_hex(),
            "00000fe804f4811169424161e0e896cbfc20ca5a5c04f04f997c7e7776cf5613"
        );

        genesis.nonce += 1;
        assert_ne!(
            genesis.hash().to_hex(),
            "00000fe804f4811169424161e0e896cbfc20ca5a5c04f04f997c7e7776cf5613"
        );
    }

    #[test]
    fn test_nonce_changes_hash() {
        assert_ne!(header(0).hash(), header(1).hash());
    }

    #[test]
    fn test_single_tx_merkle_root_is_tx_hash() {
        let tx = Transaction::coinbase(1, Script::new().push_int(0));
        let block = Block::new(header(0), vec![tx.clone()]);
        assert_eq!(block.compute_merkle_root(), tx.hash());
        assert!(block.is_genesis());
    }
}
