//! Chain parameters - per-network constant sets and the registry that selects one

mod chain_params;
mod registry;
pub mod seed_data;

pub use chain_params::*;
pub use registry::*;

use thiserror::Error;

use crate::node::GenesisError;
use crate::p2p::SeedError;

/// Errors raised while building parameter sets
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamsError {
    #[error("Genesis check failed: {0}")]
    Genesis(#[from] GenesisError),
    #[error("Bad seed table: {0}")]
    Seeds(#[from] SeedError),
    #[error("Unknown network: {0}")]
    UnknownNetwork(String),
    #[error("unimplemented network: {0}")]
    Unimplemented(Network),
}
