//! Fixed seed materialization
//!
//! Hardcoded bootstrap nodes ship as packed 18-byte records: a 16-byte IPv6
//! address (IPv4 in mapped form) followed by a big-endian port. Decoded seeds
//! get a random "last seen" time between one and two weeks in the past, so
//! nodes spread their first connections and prefer any fresher address they
//! learn afterwards.

use rand::Rng;
use serde::Serialize;
use std::net::{IpAddr, Ipv6Addr, SocketAddr};
use thiserror::Error;
use tracing::debug;

/// Size of one packed seed record
pub const SEED_RECORD_SIZE: usize = 18;

/// One week in seconds
pub const ONE_WEEK: i64 = 7 * 24 * 60 * 60;

/// Service bit advertised for seed nodes (full node)
pub const NODE_NETWORK: u64 = 1;

/// Seed table errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeedError {
    #[error("Seed table length {0} is not a multiple of 18")]
    BadLength(usize),
}

/// A bootstrap address with its jittered last-seen time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SeedAddress {
    pub ip: Ipv6Addr,
    pub port: u16,
    pub services: u64,
    /// Unix time this address was notionally last seen
    pub last_seen: i64,
}

impl SeedAddress {
    /// Socket address, with IPv4-mapped addresses unmapped
    pub fn socket_addr(&self) -> SocketAddr {
        let ip = match self.ip.to_ipv4_mapped() {
            Some(v4) => IpAddr::V4(v4),
            None => IpAddr::V6(self.ip),
        };
        SocketAddr::new(ip, self.port)
    }
}

/// Pack an address into a seed record
pub fn pack_seed(addr: SocketAddr) -> [u8; SEED_RECORD_SIZE] {
    let ip = match addr.ip() {
        IpAddr::V4(v4) => v4.to_ipv6_mapped(),
        IpAddr::V6(v6) => v6,
    };
    let mut record = [0u8; SEED_RECORD_SIZE];
    record[..16].copy_from_slice(&ip.octets());
    record[16..].copy_from_slice(&addr.port().to_be_bytes());
    record
}

/// Decode one packed record into (address, port)
pub fn unpack_seed(record: &[u8; SEED_RECORD_SIZE]) -> (Ipv6Addr, u16) {
    let mut octets = [0u8; 16];
    octets.copy_from_slice(&record[..16]);
    (Ipv6Addr::from(octets), u16::from_be_bytes([record[16], record[17]]))
}

/// Decode a packed seed table
///
/// Every `last_seen` falls in `[now - 2 weeks, now - 1 week)`. The result
/// depends only on `table`, `now` and the state of `rng`.
pub fn materialize_seeds<R: Rng + ?Sized>(
    table: &[u8],
    now: i64,
    rng: &mut R,
) -> Result<Vec<SeedAddress>, SeedError> {
    if table.len() % SEED_RECORD_SIZE != 0 {
        return Err(SeedError::BadLength(table.len()));
    }

    let seeds = table
        .chunks_exact(SEED_RECORD_SIZE)
        .map(|chunk| {
            let record: &[u8; SEED_RECORD_SIZE] =
                chunk.try_into().map_err(|_| SeedError::BadLength(table.len()))?;
            let (ip, port) = unpack_seed(record);
            Ok(SeedAddress {
                ip,
                port,
                services: NODE_NETWORK,
                last_seen: now - 2 * ONE_WEEK + rng.gen_range(0..ONE_WEEK),
            })
        })
        .collect::<Result<Vec<_>, SeedError>>()?;

    debug!(count = seeds.len(), "materialized fixed seeds");
    Ok(seeds)
}
