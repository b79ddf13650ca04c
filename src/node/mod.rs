//! Node bootstrap - genesis block construction and verification

mod genesis;

pub use genesis::*;
