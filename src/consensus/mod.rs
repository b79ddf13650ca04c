//! Consensus module - Transactions, blocks, compact difficulty and reward tiers

mod block;
mod difficulty;
mod rewards;
mod transaction;

pub use block::*;
pub use difficulty::*;
pub use rewards::*;
pub use transaction::*;
