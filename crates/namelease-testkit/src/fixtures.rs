//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::sync::Arc;

use namelease::{RegistrationService, ServiceConfig};
use namelease_core::{AccountId, Amount, Clock, ManualClock, Tick};
use namelease_ledger::{Ledger, MemoryLedger};

/// Balance given to every account the fixture hands out.
pub const DEFAULT_FUNDING: Amount = 1_000_000;

/// Tick the fixture clock starts at.
const START_TICK: Tick = 100;

/// A service wired to an in-memory ledger and a manual clock.
pub struct TestFixture {
    pub service: RegistrationService<MemoryLedger, ManualClock>,
    pub ledger: Arc<MemoryLedger>,
    pub clock: Arc<ManualClock>,
}

impl TestFixture {
    /// Create a fixture with the default configuration.
    pub fn new() -> Self {
        Self::with_config(ServiceConfig::default())
    }

    pub fn with_config(config: ServiceConfig) -> Self {
        let ledger = Arc::new(MemoryLedger::new());
        let clock = Arc::new(ManualClock::new(START_TICK));
        let service = RegistrationService::new(config, Arc::clone(&ledger), Arc::clone(&clock));
        Self {
            service,
            ledger,
            clock,
        }
    }

    /// Derive an account from `label` and fund it with [`DEFAULT_FUNDING`].
    pub fn account(&self, label: &str) -> AccountId {
        let account = AccountId::derive(label);
        self.fund(account);
        account
    }

    /// A funded account with random bytes.
    pub fn random_account(&self) -> AccountId {
        let account = loop {
            let candidate = AccountId::from_bytes(rand::random());
            if !candidate.is_unowned() {
                break candidate;
            }
        };
        self.fund(account);
        account
    }

    /// Create `count` funded accounts for multi-party tests.
    pub fn accounts(&self, count: usize) -> Vec<AccountId> {
        (0..count)
            .map(|i| self.account(&format!("party-{}", i)))
            .collect()
    }

    /// Move the clock forward, returning the new tick.
    pub fn advance(&self, ticks: Tick) -> Tick {
        self.clock.advance(ticks)
    }

    pub fn now(&self) -> Tick {
        self.clock.now()
    }

    /// Ledger balance of `account`.
    pub fn balance(&self, account: &AccountId) -> Amount {
        self.ledger
            .balance(account)
            .expect("ledger lock poisoned while reading a balance")
    }

    fn fund(&self, account: AccountId) {
        self.ledger
            .fund(account, DEFAULT_FUNDING)
            .expect("failed to fund test account");
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Install a test-writer tracing subscriber. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing_subscriber::filter::LevelFilter::DEBUG)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accounts_are_funded_and_distinct() {
        let fixture = TestFixture::new();
        let accounts = fixture.accounts(3);

        assert_eq!(accounts.len(), 3);
        assert_ne!(accounts[0], accounts[1]);
        for account in &accounts {
            assert_eq!(fixture.balance(account), DEFAULT_FUNDING);
        }
        assert_eq!(fixture.ledger.total_supply().unwrap(), 3 * DEFAULT_FUNDING);
    }

    #[test]
    fn test_funding_the_same_label_twice_accumulates() {
        let fixture = TestFixture::new();
        let first = fixture.account("alice");
        let second = fixture.account("alice");

        assert_eq!(first, second);
        assert_eq!(fixture.balance(&first), 2 * DEFAULT_FUNDING);
    }

    #[test]
    #[should_panic(expected = "failed to fund test account")]
    fn test_funding_failure_is_loud() {
        let fixture = TestFixture::new();
        let alice = AccountId::derive("alice");
        fixture.ledger.fund(alice, Amount::MAX).unwrap();
        fixture.account("alice");
    }

    #[test]
    fn test_random_account() {
        let fixture = TestFixture::new();
        let a = fixture.random_account();
        let b = fixture.random_account();

        assert_ne!(a, b);
        assert!(!a.is_unowned());
        assert_eq!(fixture.balance(&a), DEFAULT_FUNDING);
    }

    #[test]
    fn test_clock_drives_service() {
        init_tracing();
        let mut fixture = TestFixture::new();
        let alice = fixture.account("alice");

        fixture
            .service
            .register("Friendship", 10, 1000, alice)
            .unwrap();
        assert_eq!(fixture.service.expiration("Friendship"), START_TICK + 10);

        assert_eq!(fixture.advance(9), START_TICK + 9);
        assert!(fixture.service.is_registered("Friendship"));
        fixture.advance(1);
        assert!(!fixture.service.is_registered("Friendship"));
    }
}
