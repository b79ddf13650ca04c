//! Wallet module - Base58Check address encoding against the network prefixes

mod address;

pub use address::*;
