//! BitcoinT parameter inspector
//!
//! Builds the parameter registry, selects the network from the command line
//! and prints the selected set.

use bitcoint_params::constants::COIN;
use bitcoint_params::node::GenesisInfo;
use bitcoint_params::params::{init_global, ChainParams, ParamsRegistry};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "bitcoint-params", version, about = "Show BitcoinT chain parameters", long_about = None)]
struct Args {
    /// Use the test network
    #[arg(long)]
    testnet: bool,

    /// Print the full parameter set as JSON
    #[arg(long)]
    json: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_tracing();

    let registry = init_global(ParamsRegistry::new());
    registry.select_from_args(args.testnet);
    let params = registry.current();

    if args.json {
        println!("{}", serde_json::to_string_pretty(params)?);
    } else {
        print_summary(params);
    }

    Ok(())
}

fn print_summary(params: &ChainParams) {
    let genesis = GenesisInfo::from_block(params.genesis_block());

    println!("╔══════════════════════════════════════════════════════════╗");
    println!("║              BITCOINT CHAIN PARAMETERS                   ║");
    println!("╚══════════════════════════════════════════════════════════╝");
    println!();
    println!("Network:       {}", params.network);
    println!("Magic:         {}", hex::encode(params.message_start));
    println!("Ports:         p2p {} / rpc {}", params.default_port, params.rpc_port);
    println!("PoW limit:     {:#x}", params.pow_limit);
    println!("PoS limit:     {:#x}", params.pos_limit);
    println!();
    println!("Genesis Block:");
    println!("  Hash:        {}", genesis.hash);
    println!("  Merkle Root: {}", genesis.merkle_root);
    println!("  Time:        {}", genesis.time);
    println!("  Bits:        0x{:08x}", genesis.bits);
    println!("  Nonce:       {}", genesis.nonce);
    println!();
    println!("Timing:");
    println!("  Spacing:     {} s", params.target_spacing);
    println!("  Timespan:    {} s ({} blocks)", params.target_timespan, params.difficulty_adjustment_interval());
    println!("  Launch:      {}", params.launch_time);
    println!(
        "  SuperStake:  {} .. {}",
        params.super_stake_start_time, params.super_stake_end_time
    );
    println!("  Last PoW:    {} (PoS only from {})", params.last_pow_block, params.pos_switch);
    println!();
    println!("Rewards:");
    println!("  PoW:         {} coins", params.pow_reward / COIN);
    println!("  PoS coin:    {} satoshi", params.pos_coin_reward);
    println!();
    println!("Seeds:");
    for seed in &params.dns_seeds {
        println!("  dns          {} ({})", seed.host, seed.name);
    }
    for seed in &params.fixed_seeds {
        println!("  fixed        {}", seed.socket_addr());
    }
}
