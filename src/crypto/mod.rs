//! Cryptography module - SHA-256d hashing, Merkle trees and the X11 block hash

mod hash;
mod merkle;
pub mod x11;

pub use hash::*;
pub use merkle::*;
pub use x11::x11_hash;
