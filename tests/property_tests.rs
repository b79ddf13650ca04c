//! Property-based and adversarial tests for the BitcoinT chain parameters
//!
//! These tests verify invariants hold under random inputs and tampered constants.

use bitcoint_params::consensus::{
    check_proof_of_work, compact_to_target, resolve_reward_tier, target_to_compact, RewardSchedule,
    RewardTier, SUPER_STAKE_15K, SUPER_STAKE_5K, SUPER_STAKE_60K,
};
use bitcoint_params::constants::MAX_MONEY;
use bitcoint_params::node::{build_genesis_block, verify_genesis_block, GenesisError, GenesisSpec};
use bitcoint_params::p2p::{materialize_seeds, pack_seed, SEED_RECORD_SIZE};
use bitcoint_params::params::{
    seed_data, Base58Type, ChainParams, Network, ParamsRegistry, MAIN_GENESIS, TESTNET_GENESIS,
};
use bitcoint_params::wallet::{decode_address, encode_address};
use primitive_types::U256;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

const ONE_WEEK: i64 = 7 * 24 * 60 * 60;

fn registry() -> ParamsRegistry {
    ParamsRegistry::with_seed_source(1_700_000_000, &mut StdRng::seed_from_u64(99))
}

// ============================================================================
// PROPERTY-BASED TESTS
// ============================================================================

proptest! {
    /// Tier priority: 5K beats 15K beats 60K whatever else is set
    #[test]
    fn prop_tier_priority(flags in any::<u32>()) {
        let schedule = resolve_reward_tier(flags);

        let expected = if flags & SUPER_STAKE_5K != 0 {
            RewardTier::Stake5K.schedule()
        } else if flags & SUPER_STAKE_15K != 0 {
            RewardTier::Stake15K.schedule()
        } else if flags & SUPER_STAKE_60K != 0 {
            RewardTier::Stake60K.schedule()
        } else {
            RewardSchedule::NOT_APPLICABLE
        };
        prop_assert_eq!(schedule, expected);
    }

    /// Flags without a tier bit always resolve to the sentinel
    #[test]
    fn prop_no_tier_is_unreachable(flags in any::<u32>()) {
        let flags = flags & !(SUPER_STAKE_5K | SUPER_STAKE_15K | SUPER_STAKE_60K);
        let schedule = resolve_reward_tier(flags);

        prop_assert_eq!(schedule.min_value, MAX_MONEY);
        prop_assert_eq!(schedule.timespan, -1);
        prop_assert!(!schedule.is_applicable());
    }

    /// Seed jitter stays inside [now - 2 weeks, now - 1 week)
    #[test]
    fn prop_seed_last_seen_window(
        now in 2 * ONE_WEEK..i64::from(u32::MAX),
        seed in any::<u64>()
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let seeds = materialize_seeds(seed_data::MAIN_SEEDS, now, &mut rng).unwrap();

        prop_assert_eq!(seeds.len(), seed_data::MAIN_SEEDS.len() / SEED_RECORD_SIZE);
        for addr in &seeds {
            prop_assert!(addr.last_seen >= now - 2 * ONE_WEEK);
            prop_assert!(addr.last_seen < now - ONE_WEEK);
        }
    }

    /// Decoded address and port match the packed source
    #[test]
    fn prop_seed_decode_matches_source(
        octets in any::<[u8; 4]>(),
        port in any::<u16>(),
        seed in any::<u64>()
    ) {
        let addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::from(octets)), port);
        let record = pack_seed(addr);
        let seeds = materialize_seeds(&record, 0, &mut StdRng::seed_from_u64(seed)).unwrap();

        prop_assert_eq!(seeds.len(), 1);
        prop_assert_eq!(seeds[0].socket_addr(), addr);
    }

    /// Re-encoding a decoded compact target is stable
    #[test]
    fn prop_compact_canonical(bytes in any::<[u8; 32]>()) {
        let target = U256::from_big_endian(&bytes);
        let compact = target_to_compact(target);
        let decoded = compact_to_target(compact).unwrap();

        // Encoding only drops low-order bits
        prop_assert!(decoded <= target);
        prop_assert_eq!(target_to_compact(decoded), compact);
    }

    /// Shifted ceilings with 16 significant bits or fewer round trip exactly
    #[test]
    fn prop_compact_ceiling_round_trip(shift in 8usize..=255) {
        let target = U256::MAX >> shift;
        let significant = 256 - shift;
        let decoded = compact_to_target(target_to_compact(target)).unwrap();
        if significant <= 16 {
            prop_assert_eq!(decoded, target);
        } else {
            prop_assert!(decoded <= target);
        }
    }

    /// Addresses decode to their class and payload on the issuing network
    #[test]
    fn prop_address_class_recovered(payload in proptest::collection::vec(any::<u8>(), 20..=33)) {
        let registry = registry();
        for network in [Network::Main, Network::Testnet] {
            let params = registry.get(network);
            for kind in [Base58Type::PubkeyAddress, Base58Type::ScriptAddress] {
                let encoded = encode_address(params, kind, &payload);
                let (decoded_kind, decoded) = decode_address(params, &encoded).unwrap();
                prop_assert_eq!(decoded_kind, kind);
                prop_assert_eq!(&decoded, &payload);
            }
        }
    }
}

// ============================================================================
// ADVERSARIAL TESTS
// ============================================================================

/// Test: Reference genesis hashes
///
/// The pinned headers hash to the reference network's genesis hashes.
#[test]
fn test_reference_genesis_hashes() {
    let main = build_genesis_block(&MAIN_GENESIS);
    assert_eq!(main.header.nonce, 1_095_958);
    assert_eq!(main.header.time, 1_429_801_140);
    assert_eq!(
        main.hash().to_hex(),
        "00000fe804f4811169424161e0e896cbfc20ca5a5c04f04f997c7e7776cf5613"
    );

    let testnet = build_genesis_block(&TESTNET_GENESIS);
    assert_eq!(testnet.header.nonce, 9_687);
    assert_eq!(testnet.header.time, 1_429_797_600);
    assert_eq!(testnet.header.bits, 0x1f00ffff);
    assert_eq!(
        testnet.hash().to_hex(),
        "0000f1509825aae54b0242ea1e836e3604dc1b7375f79d5e8ca2ee2433fc86f1"
    );
}

/// Test: Off-by-one nonce
///
/// A genesis block whose nonce differs from the pinned one by one must fail
/// verification with a hash mismatch.
#[test]
fn test_off_by_one_nonce_rejected() {
    for spec in [MAIN_GENESIS, TESTNET_GENESIS] {
        for nonce in [spec.nonce - 1, spec.nonce + 1] {
            let block = build_genesis_block(&GenesisSpec { nonce, ..spec });
            assert!(matches!(
                verify_genesis_block(&block, &spec),
                Err(GenesisError::HashMismatch { .. })
            ));
        }
    }
}

/// Test: Tampered embedded message
///
/// Changing one byte of the coinbase message changes the merkle root.
#[test]
fn test_tampered_message_rejected() {
    let spec = GenesisSpec {
        message: "2015/04/23 14:59:00 GMT. Stairway to Heaven!",
        ..MAIN_GENESIS
    };
    let block = build_genesis_block(&spec);
    assert!(matches!(
        verify_genesis_block(&block, &MAIN_GENESIS),
        Err(GenesisError::MerkleMismatch { .. })
    ));
}

/// Test: Genesis satisfies its own target
///
/// Both pinned headers meet the compact target encoded from their ceilings.
#[test]
fn test_genesis_meets_target() {
    let registry = registry();
    for network in [Network::Main, Network::Testnet] {
        let params = registry.get(network);
        let header = &params.genesis.header;
        assert_eq!(header.bits, target_to_compact(params.pow_limit));
        assert!(check_proof_of_work(&params.hash_genesis_block, header.bits, params.pow_limit));
    }
}

/// Test: Main hash under the test ceiling
///
/// The test network ceiling is wider, so MAIN's genesis also passes there,
/// but TESTNET's genesis does not pass under MAIN's ceiling.
#[test]
fn test_ceiling_ordering() {
    let registry = registry();
    let main = registry.get(Network::Main);
    let testnet = registry.get(Network::Testnet);

    assert!(check_proof_of_work(&main.hash_genesis_block, testnet.genesis.header.bits, testnet.pow_limit));
    assert!(!check_proof_of_work(&testnet.hash_genesis_block, main.genesis.header.bits, main.pow_limit));
}

/// Test: Selection scenario
///
/// MAIN, then TESTNET, then MAIN again returns the original set unchanged.
#[test]
fn test_selection_is_idempotent() {
    let registry = registry();
    let original: ChainParams = registry.current().clone();

    registry.select(Network::Main);
    registry.select(Network::Testnet);
    assert_eq!(registry.current().network, Network::Testnet);
    registry.select(Network::Main);

    assert_eq!(registry.current(), &original);
}

/// Test: Testnet derivation
///
/// Overridden fields differ from MAIN; every other field is copied.
#[test]
fn test_testnet_derivation() {
    let registry = registry();
    let main = registry.get(Network::Main);
    let testnet = registry.get(Network::Testnet);

    assert_ne!(testnet.message_start, main.message_start);
    assert_ne!(testnet.default_port, main.default_port);
    assert_ne!(testnet.rpc_port, main.rpc_port);
    assert!(testnet.pow_limit > main.pow_limit);
    assert_ne!(testnet.base58_prefixes, main.base58_prefixes);
    assert_ne!(testnet.fixed_seeds, main.fixed_seeds);
    assert_ne!(testnet.target_spacing, main.target_spacing);
    assert!(
        testnet.super_stake_end_time - testnet.super_stake_start_time
            > main.super_stake_end_time - main.super_stake_start_time
    );

    assert_eq!(testnet.pos_limit, main.pos_limit);
    assert_eq!(testnet.target_timespan, main.target_timespan);
    assert_eq!(testnet.coinbase_maturity, main.coinbase_maturity);
    assert_eq!(testnet.last_pow_block, main.last_pow_block);
    assert_eq!(testnet.pow_reward, main.pow_reward);
    assert_eq!(testnet.alert_pub_key, main.alert_pub_key);
}

/// Test: Seed tables are well formed
#[test]
fn test_seed_tables_well_formed() {
    assert_eq!(seed_data::MAIN_SEEDS.len() % SEED_RECORD_SIZE, 0);
    assert_eq!(seed_data::TESTNET_SEEDS.len() % SEED_RECORD_SIZE, 0);

    let registry = registry();
    assert!(registry.get(Network::Main).fixed_seeds.iter().all(|s| s.port == 15_047));
    assert!(registry.get(Network::Testnet).fixed_seeds.iter().all(|s| s.port == 25_047));
}
