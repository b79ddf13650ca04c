//! Per-network consensus parameters
//!
//! The main network is built directly. The test network starts from a copy of
//! the main set and overrides a fixed list of fields. Every value is a
//! compile-time constant except the genesis block (rebuilt and verified) and
//! the fixed seeds (decoded with fresh last-seen times).

use primitive_types::U256;
use rand::Rng;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::consensus::{resolve_reward_tier, target_to_compact, Block, RewardSchedule};
use crate::constants::{CENT, COIN};
use crate::crypto::Hash;
use crate::node::{build_verified_genesis, GenesisSpec};
use crate::p2p::{materialize_seeds, SeedAddress};

use super::seed_data::{MAIN_SEEDS, TESTNET_SEEDS};
use super::ParamsError;

const MINUTE: u32 = 60;
const HOUR: u32 = 60 * MINUTE;
const DAY: u32 = 24 * HOUR;

/// Key used to verify broadcast alerts (same on every network)
const ALERT_PUB_KEY: [u8; 33] = [
    0x02, 0x84, 0x8b, 0x2b, 0x4a, 0x08, 0x98, 0xee, 0x71, 0x5d, 0x99, 0x8f, 0xa1, 0xeb, 0x74, 0xaa,
    0xaa, 0x07, 0xe8, 0x49, 0x88, 0x77, 0xb2, 0x24, 0xdb, 0x6e, 0xe1, 0x74, 0x78, 0x72, 0xd9, 0xf1,
    0x2a,
];

const GENESIS_MESSAGE: &str = "2015/04/23 14:59:00 GMT. Stairway to Heaven";
const GENESIS_MERKLE_ROOT: &str = "11c47b76e8e52e603e08c07105fa6fa093379401082640d69f0f25b8177fb65b";

/// Main network genesis
pub const MAIN_GENESIS: GenesisSpec = GenesisSpec {
    message: GENESIS_MESSAGE,
    tx_time: 1_429_801_200 - 60, // 2015/04/23 14:59:00 GMT
    time: 1_429_801_200 - 60,
    bits: 0x1e0fffff,
    nonce: 1_095_958,
    hash: "00000fe804f4811169424161e0e896cbfc20ca5a5c04f04f997c7e7776cf5613",
    merkle_root: GENESIS_MERKLE_ROOT,
};

/// Test network genesis. Same coinbase, earlier header time.
pub const TESTNET_GENESIS: GenesisSpec = GenesisSpec {
    message: GENESIS_MESSAGE,
    tx_time: 1_429_801_200 - 60,
    time: 1_429_801_200 - 3_600,
    bits: 0x1f00ffff,
    nonce: 9_687,
    hash: "0000f1509825aae54b0242ea1e836e3604dc1b7375f79d5e8ca2ee2433fc86f1",
    merkle_root: GENESIS_MERKLE_ROOT,
};

/// Supported networks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Main = 0,
    Testnet = 1,
    Regtest = 2,
}

impl Network {
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Network::Main),
            1 => Some(Network::Testnet),
            2 => Some(Network::Regtest),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Network::Main => "main",
            Network::Testnet => "testnet",
            Network::Regtest => "regtest",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Network {
    type Err = ParamsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "main" | "mainnet" => Ok(Network::Main),
            "test" | "testnet" => Ok(Network::Testnet),
            "regtest" => Ok(Network::Regtest),
            other => Err(ParamsError::UnknownNetwork(other.to_string())),
        }
    }
}

/// Address classes with their own Base58 version prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Base58Type {
    PubkeyAddress = 0,
    ScriptAddress = 1,
    SecretKey = 2,
    ExtPublicKey = 3,
    ExtSecretKey = 4,
}

impl Base58Type {
    pub const ALL: [Base58Type; 5] = [
        Base58Type::PubkeyAddress,
        Base58Type::ScriptAddress,
        Base58Type::SecretKey,
        Base58Type::ExtPublicKey,
        Base58Type::ExtSecretKey,
    ];
}

/// DNS seed entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DnsSeed {
    pub name: &'static str,
    pub host: &'static str,
}

/// Consensus parameters of one network
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainParams {
    pub network: Network,
    /// Wire message prefix
    pub message_start: [u8; 4],
    #[serde(serialize_with = "serialize_hex")]
    pub alert_pub_key: Vec<u8>,
    pub default_port: u16,
    pub rpc_port: u16,
    /// Easiest allowed proof-of-work target
    pub pow_limit: U256,
    /// Easiest allowed proof-of-stake target
    pub pos_limit: U256,
    /// Indexed by `Base58Type`
    pub base58_prefixes: [Vec<u8>; 5],
    /// Seconds between blocks
    pub target_spacing: u32,
    /// Seconds per retarget window
    pub target_timespan: i64,
    pub coinbase_maturity: u32,
    pub coinbase_maturity_super_stake: u32,
    pub stake_min_age: i64,
    /// `None` means unbounded
    pub stake_max_age: Option<i64>,
    pub modifier_interval: u32,
    pub launch_time: u32,
    pub super_stake_start_time: u32,
    pub super_stake_end_time: u32,
    pub last_pow_block: u32,
    /// Height from which only proof-of-stake blocks are accepted
    pub pos_switch: u32,
    pub pow_reward: i64,
    pub pos_coin_reward: i64,
    pub dns_seeds: Vec<DnsSeed>,
    /// Data directory suffix
    pub data_dir: &'static str,
    pub require_rpc_password: bool,
    pub genesis_spec: GenesisSpec,
    pub hash_genesis_block: Hash,
    pub genesis: Block,
    pub fixed_seeds: Vec<SeedAddress>,
}

fn serialize_hex<S: serde::Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&hex::encode(bytes))
}

impl ChainParams {
    /// Build the parameters of `network`
    ///
    /// The test network is derived from a freshly built main set, so `rng` is
    /// consumed by both seed tables in that case.
    pub fn build<R: Rng + ?Sized>(network: Network, now: i64, rng: &mut R) -> Result<Self, ParamsError> {
        match network {
            Network::Main => Self::main(now, rng),
            Network::Testnet => {
                let main = Self::main(now, rng)?;
                Self::testnet(&main, now, rng)
            }
            Network::Regtest => Err(ParamsError::Unimplemented(network)),
        }
    }

    /// Main network
    pub fn main<R: Rng + ?Sized>(now: i64, rng: &mut R) -> Result<Self, ParamsError> {
        let pow_limit = U256::MAX >> 20;
        let genesis_spec = GenesisSpec {
            bits: target_to_compact(pow_limit),
            ..MAIN_GENESIS
        };
        let genesis = build_verified_genesis(&genesis_spec)?;
        let fixed_seeds = materialize_seeds(MAIN_SEEDS, now, rng)?;

        let launch_time = genesis.header.time + MINUTE;
        let super_stake_start_time = launch_time + 2 * DAY;
        let last_pow_block = 2_880;

        debug!(network = %Network::Main, seeds = fixed_seeds.len(), "built chain parameters");

        Ok(Self {
            network: Network::Main,
            message_start: [0x2a, 0x1b, 0x0c, 0xfa],
            alert_pub_key: ALERT_PUB_KEY.to_vec(),
            default_port: 15_047,
            rpc_port: 15_048,
            pow_limit,
            pos_limit: U256::MAX >> 20,
            base58_prefixes: [
                vec![85],
                vec![101],
                vec![117],
                vec![0x04, 0x88, 0xB2, 0x1E],
                vec![0x04, 0x88, 0xAD, 0xE4],
            ],
            target_spacing: MINUTE,
            target_timespan: 20 * MINUTE as i64,
            coinbase_maturity: 30,
            coinbase_maturity_super_stake: 1_440,
            stake_min_age: HOUR as i64,
            stake_max_age: None,
            modifier_interval: MINUTE,
            launch_time,
            super_stake_start_time,
            super_stake_end_time: super_stake_start_time + 30 * DAY,
            last_pow_block,
            pos_switch: last_pow_block - 50,
            pow_reward: 7_500 * COIN,
            pos_coin_reward: 20 * CENT,
            dns_seeds: vec![DnsSeed {
                name: "bitcoint.net",
                host: "seed1.bitcoint.net",
            }],
            data_dir: "",
            require_rpc_password: true,
            hash_genesis_block: genesis.hash(),
            genesis_spec,
            genesis,
            fixed_seeds,
        })
    }

    /// Test network: a copy of `main` with its own identity and faster clock
    pub fn testnet<R: Rng + ?Sized>(main: &ChainParams, now: i64, rng: &mut R) -> Result<Self, ParamsError> {
        let pow_limit = U256::MAX >> 16;
        let genesis_spec = GenesisSpec {
            bits: target_to_compact(pow_limit),
            ..TESTNET_GENESIS
        };
        let genesis = build_verified_genesis(&genesis_spec)?;
        let fixed_seeds = materialize_seeds(TESTNET_SEEDS, now, rng)?;

        let launch_time = genesis.header.time + MINUTE;
        let super_stake_start_time = launch_time + 2 * DAY;

        debug!(network = %Network::Testnet, seeds = fixed_seeds.len(), "built chain parameters");

        Ok(Self {
            network: Network::Testnet,
            message_start: [0x2a, 0x1b, 0x0c, 0xf9],
            default_port: 25_047,
            rpc_port: 25_048,
            pow_limit,
            base58_prefixes: [
                vec![65],
                vec![97],
                vec![129],
                vec![0x04, 0x35, 0x87, 0xCF],
                vec![0x04, 0x35, 0x83, 0x94],
            ],
            target_spacing: 10,
            stake_min_age: 30 * MINUTE as i64,
            modifier_interval: 30,
            launch_time,
            super_stake_start_time,
            super_stake_end_time: super_stake_start_time + 3_560 * DAY,
            dns_seeds: Vec::new(),
            data_dir: "testnet",
            hash_genesis_block: genesis.hash(),
            genesis_spec,
            genesis,
            fixed_seeds,
            ..main.clone()
        })
    }

    pub fn base58_prefix(&self, kind: Base58Type) -> &[u8] {
        &self.base58_prefixes[kind as usize]
    }

    /// Maximum stake age, `None` when unbounded
    pub fn stake_max_age(&self) -> Option<i64> {
        self.stake_max_age
    }

    pub fn genesis_block(&self) -> &Block {
        &self.genesis
    }

    pub fn is_testnet(&self) -> bool {
        self.network == Network::Testnet
    }

    /// Blocks per retarget window
    pub fn difficulty_adjustment_interval(&self) -> i64 {
        self.target_timespan / self.target_spacing as i64
    }

    /// Whether `time` falls inside the super-stake window
    pub fn is_super_stake_window(&self, time: u32) -> bool {
        time >= self.super_stake_start_time && time < self.super_stake_end_time
    }

    pub fn reward_tier(&self, flags: u32) -> RewardSchedule {
        resolve_reward_tier(flags)
    }

    pub fn super_stake_min_value_in(&self, flags: u32) -> i64 {
        resolve_reward_tier(flags).min_value
    }

    pub fn super_stake_reward(&self, flags: u32) -> i64 {
        resolve_reward_tier(flags).reward
    }

    pub fn super_stake_timespan(&self, flags: u32) -> i64 {
        resolve_reward_tier(flags).timespan
    }
}
