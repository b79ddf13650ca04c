//! P2P bootstrap - fixed seed decoding

mod seeds;

pub use seeds::*;
