//! Parameter registry
//!
//! Holds one `ChainParams` per implemented network and records which one is
//! current. Selection happens once at startup; afterwards every read is a
//! shared borrow.

use rand::Rng;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{error, info, warn};

use super::{ChainParams, Network, ParamsError};

static GLOBAL: OnceLock<ParamsRegistry> = OnceLock::new();

/// Owns the MAIN and TESTNET parameter sets
#[derive(Debug)]
pub struct ParamsRegistry {
    main: ChainParams,
    testnet: ChainParams,
    current: AtomicU8,
}

impl ParamsRegistry {
    /// Build with the system clock and the thread RNG
    ///
    /// Panics if any pinned genesis constant fails verification.
    pub fn new() -> Self {
        Self::with_seed_source(unix_time(SystemTime::now()), &mut rand::thread_rng())
    }

    /// Build with an injected clock and random source
    ///
    /// Panics if any pinned genesis constant fails verification.
    pub fn with_seed_source<R: Rng + ?Sized>(now: i64, rng: &mut R) -> Self {
        match Self::try_with_seed_source(now, rng) {
            Ok(registry) => registry,
            Err(err) => {
                error!(%err, "chain parameters are inconsistent");
                panic!("{err}");
            }
        }
    }

    pub fn try_with_seed_source<R: Rng + ?Sized>(now: i64, rng: &mut R) -> Result<Self, ParamsError> {
        let main = ChainParams::main(now, rng)?;
        let testnet = ChainParams::testnet(&main, now, rng)?;

        info!(
            main_genesis = %main.hash_genesis_block,
            testnet_genesis = %testnet.hash_genesis_block,
            "parameter registry ready"
        );

        Ok(Self {
            main,
            testnet,
            current: AtomicU8::new(Network::Main.as_u8()),
        })
    }

    /// Make `network` current
    ///
    /// Panics for a network without a parameter set.
    pub fn select(&self, network: Network) {
        if !matches!(network, Network::Main | Network::Testnet) {
            fatal_unimplemented(network);
        }
        self.current.store(network.as_u8(), Ordering::Release);
        info!(%network, "selected network");
    }

    /// Select from the command-line test network flag; absence means MAIN
    pub fn select_from_args(&self, testnet: bool) {
        self.select(if testnet { Network::Testnet } else { Network::Main });
    }

    /// Parameters of the current network
    pub fn current(&self) -> &ChainParams {
        self.get(self.current_network())
    }

    /// Parameters of `network`, leaving the selection untouched
    ///
    /// Panics for a network without a parameter set.
    pub fn get(&self, network: Network) -> &ChainParams {
        match network {
            Network::Main => &self.main,
            Network::Testnet => &self.testnet,
            other => fatal_unimplemented(other),
        }
    }

    pub fn current_network(&self) -> Network {
        let raw = self.current.load(Ordering::Acquire);
        match Network::from_u8(raw) {
            Some(network) => network,
            None => {
                error!(raw, "corrupt network selection");
                panic!("unimplemented network: {raw}");
            }
        }
    }

    pub fn is_testnet(&self) -> bool {
        self.current_network() == Network::Testnet
    }
}

impl Default for ParamsRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Seconds since the Unix epoch; negative for a clock set before it
fn unix_time(now: SystemTime) -> i64 {
    match now.duration_since(UNIX_EPOCH) {
        Ok(elapsed) => elapsed.as_secs() as i64,
        Err(err) => {
            let behind = err.duration().as_secs() as i64;
            warn!(behind_secs = behind, "system clock is before the Unix epoch");
            -behind
        }
    }
}

fn fatal_unimplemented(network: Network) -> ! {
    let err = ParamsError::Unimplemented(network);
    error!(%err, "network selection failed");
    panic!("{err}");
}

/// Install the process-wide registry
///
/// The first call wins; later calls return the already installed registry.
pub fn init_global(registry: ParamsRegistry) -> &'static ParamsRegistry {
    GLOBAL.get_or_init(|| registry)
}

/// Process-wide registry, if installed
pub fn global() -> Option<&'static ParamsRegistry> {
    GLOBAL.get()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const NOW: i64 = 1_700_000_000;

    fn registry() -> ParamsRegistry {
        ParamsRegistry::with_seed_source(NOW, &mut StdRng::seed_from_u64(11))
    }

    #[test]
    fn test_defaults_to_main() {
        let registry = registry();
        assert_eq!(registry.current_network(), Network::Main);
        assert!(!registry.is_testnet());
        assert_eq!(registry.current().default_port, 15_047);
    }

    #[test]
    fn test_reselect_returns_same_set() {
        let registry = registry();
        let before = registry.current().clone();

        registry.select(Network::Main);
        registry.select(Network::Testnet);
        assert!(registry.is_testnet());
        assert_eq!(registry.current().default_port, 25_047);

        registry.select(Network::Main);
        assert_eq!(registry.current(), &before);
        assert!(std::ptr::eq(registry.current(), registry.get(Network::Main)));
    }

    #[test]
    fn test_select_from_args() {
        let registry = registry();
        registry.select_from_args(true);
        assert_eq!(registry.current_network(), Network::Testnet);
        registry.select_from_args(false);
        assert_eq!(registry.current_network(), Network::Main);
    }

    #[test]
    fn test_get_leaves_selection() {
        let registry = registry();
        let testnet = registry.get(Network::Testnet);
        assert_eq!(testnet.network, Network::Testnet);
        assert_eq!(registry.current_network(), Network::Main);
    }

    #[test]
    fn test_testnet_is_easier() {
        let registry = registry();
        assert!(registry.get(Network::Testnet).pow_limit > registry.get(Network::Main).pow_limit);
    }

    #[test]
    fn test_same_inputs_same_registry() {
        let a = ParamsRegistry::with_seed_source(NOW, &mut StdRng::seed_from_u64(5));
        let b = ParamsRegistry::with_seed_source(NOW, &mut StdRng::seed_from_u64(5));
        assert_eq!(a.get(Network::Main), b.get(Network::Main));
        assert_eq!(a.get(Network::Testnet), b.get(Network::Testnet));
    }

    #[test]
    #[should_panic(expected = "unimplemented network")]
    fn test_select_regtest_panics() {
        registry().select(Network::Regtest);
    }

    #[test]
    #[should_panic(expected = "unimplemented network")]
    fn test_get_regtest_panics() {
        registry().get(Network::Regtest);
    }

    #[test]
    fn test_unix_time_from_clock() {
        use std::time::Duration;

        assert_eq!(unix_time(UNIX_EPOCH + Duration::from_secs(NOW as u64)), NOW);
        assert_eq!(unix_time(UNIX_EPOCH - Duration::from_secs(90)), -90);
    }

    #[test]
    fn test_global_is_set_once() {
        let first = init_global(registry());
        let second = init_global(ParamsRegistry::with_seed_source(NOW + 1, &mut StdRng::seed_from_u64(0)));
        assert!(std::ptr::eq(first, second));
        assert!(global().is_some());
    }
}
