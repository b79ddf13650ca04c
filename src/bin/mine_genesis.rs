//! Offline genesis nonce search
//!
//! Rebuilds a network's genesis block and searches for a nonce that meets its
//! compact target. The output is what gets pinned in the parameter tables.

use bitcoint_params::node::{build_genesis_block, mine_genesis, GenesisSearch};
use bitcoint_params::params::{Network, MAIN_GENESIS, TESTNET_GENESIS};
use clap::Parser;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "mine-genesis", version, about = "Search for a genesis block nonce", long_about = None)]
struct Args {
    /// Network whose genesis inputs are used (main or testnet)
    #[arg(long, default_value = "main")]
    network: Network,

    /// First nonce to try
    #[arg(long, default_value_t = 0)]
    start_nonce: u32,

    /// Override the header time
    #[arg(long)]
    time: Option<u32>,

    /// Override the compact target, e.g. 0x1e0fffff
    #[arg(long, value_parser = parse_bits)]
    bits: Option<u32>,

    /// Give up after this many seconds
    #[arg(long)]
    max_seconds: Option<u64>,
}

fn parse_bits(s: &str) -> Result<u32, String> {
    let digits = s.trim_start_matches("0x");
    u32::from_str_radix(digits, 16).map_err(|e| format!("invalid compact bits {s}: {e}"))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let spec = match args.network {
        Network::Main => MAIN_GENESIS,
        Network::Testnet => TESTNET_GENESIS,
        other => return Err(format!("no genesis inputs for {other}").into()),
    };

    let mut header = build_genesis_block(&spec).header;
    header.nonce = args.start_nonce;
    if let Some(time) = args.time {
        header.time = time;
    }
    if let Some(bits) = args.bits {
        header.bits = bits;
    }

    let stop = Arc::new(AtomicBool::new(false));
    if let Some(secs) = args.max_seconds {
        let stop = Arc::clone(&stop);
        thread::spawn(move || {
            thread::sleep(Duration::from_secs(secs));
            stop.store(true, Ordering::Relaxed);
        });
    }

    let started = Instant::now();
    match mine_genesis(header, &stop)? {
        GenesisSearch::Found(found) => {
            info!(elapsed = ?started.elapsed(), "search finished");
            println!("network:     {}", args.network);
            println!("hash:        {}", found.hash);
            println!("merkle root: {}", found.merkle_root);
            println!("time:        {}", found.time);
            println!("bits:        0x{:08x}", header.bits);
            println!("nonce:       {}", found.nonce);
            println!("attempts:    {}", found.attempts);
        }
        GenesisSearch::Interrupted => {
            warn!(elapsed = ?started.elapsed(), "search stopped before a nonce was found");
        }
    }

    Ok(())
}
