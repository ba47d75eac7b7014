//! End-to-end lease lifecycle through the RegistrationService.
//!
//! Balances are checked on the shared ledger, the way a participant would
//! observe them.

use std::sync::Arc;

use namelease::core::{Clock, ManualClock, Party};
use namelease::ledger::{Ledger, MemoryLedger};
use namelease::{
    AccountId, Amount, DuplicateCommitment, ErrorKind, RegistrationService, ServiceConfig,
    ServiceSnapshot, Tick,
};

const PRICE_PER_CHAR: Amount = 10;
const BLOCKS_IN_A_DAY: Tick = 6400;
const BLOCKS_IN_A_YEAR: Tick = BLOCKS_IN_A_DAY * 365;
const STARTING_BALANCE: Amount = 1_000_000;
const TEN_LETTER_WORD: &str = "Friendship";

struct Harness {
    service: RegistrationService<MemoryLedger, ManualClock>,
    ledger: Arc<MemoryLedger>,
    clock: Arc<ManualClock>,
    user1: AccountId,
    user2: AccountId,
}

impl Harness {
    fn new() -> Self {
        Self::with_config(ServiceConfig {
            price_per_unit: PRICE_PER_CHAR,
            ..ServiceConfig::default()
        })
    }

    fn with_config(config: ServiceConfig) -> Self {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();

        let ledger = Arc::new(MemoryLedger::new());
        let clock = Arc::new(ManualClock::new(100));
        let user1 = AccountId::derive("user-1");
        let user2 = AccountId::derive("user-2");
        ledger.fund(user1, STARTING_BALANCE).unwrap();
        ledger.fund(user2, STARTING_BALANCE).unwrap();

        let service = RegistrationService::new(config, Arc::clone(&ledger), Arc::clone(&clock));
        Self {
            service,
            ledger,
            clock,
            user1,
            user2,
        }
    }

    /// user1 holds TEN_LETTER_WORD for 10 ticks, paid exactly.
    fn registered() -> Self {
        let mut h = Self::new();
        h.service
            .register(TEN_LETTER_WORD, 10, 1000, h.user1)
            .unwrap();
        h
    }

    /// As `registered`, with the lease run out.
    fn expired() -> Self {
        let h = Self::registered();
        h.clock.advance(10);
        h
    }

    fn balance(&self, account: AccountId) -> Amount {
        self.ledger.balance(&account).unwrap()
    }

    fn escrow(&self) -> Amount {
        self.ledger.escrow_balance().unwrap()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Unregistered names
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn registering_locks_the_price() {
    let mut h = Harness::new();
    let registration = h
        .service
        .register(TEN_LETTER_WORD, 10, 1000, h.user1)
        .unwrap();

    assert_eq!(registration.locked, 1000);
    assert_eq!(registration.refund, 0);
    assert_eq!(h.escrow(), 1000);
    assert_eq!(h.balance(h.user1), STARTING_BALANCE - 1000);
}

#[test]
fn excess_payment_is_returned() {
    let mut h = Harness::new();
    let registration = h
        .service
        .register(TEN_LETTER_WORD, 10, 11_000, h.user1)
        .unwrap();

    assert_eq!(registration.refund, 10_000);
    assert_eq!(h.escrow(), 1000);
    assert_eq!(h.balance(h.user1), STARTING_BALANCE - 1000);
}

#[test]
fn expiration_is_now_plus_duration() {
    let mut h = Harness::new();
    let now = h.clock.now();
    h.service
        .register(TEN_LETTER_WORD, 10, 1000, h.user1)
        .unwrap();
    assert_eq!(h.service.expiration(TEN_LETTER_WORD), now + 10);
}

#[test]
fn active_name_cannot_be_registered_again() {
    let mut h = Harness::registered();
    for caller in [h.user1, h.user2] {
        let err = h
            .service
            .register(TEN_LETTER_WORD, 10, 1000, caller)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyRegistered);
    }
    assert_eq!(h.escrow(), 1000);
    assert_eq!(h.balance(h.user2), STARTING_BALANCE);
}

#[test]
fn unknown_name_resolves_to_unowned() {
    let h = Harness::new();
    assert_eq!(h.service.resolve("randomName"), AccountId::UNOWNED);
    assert!(!h.service.is_registered("randomName"));
    assert_eq!(h.service.expiration("randomName"), 0);
    assert_eq!(h.service.locked_balance("randomName"), 0);
}

#[test]
fn insufficient_payment_is_rejected() {
    let mut h = Harness::new();
    let err = h
        .service
        .register(TEN_LETTER_WORD, 10, 100, h.user1)
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InsufficientPayment);
    assert!(!h.service.is_registered(TEN_LETTER_WORD));
    assert_eq!(h.balance(h.user1), STARTING_BALANCE);
    assert_eq!(h.escrow(), 0);
}

#[test]
fn sufficient_payment_registers_the_caller() {
    let mut h = Harness::new();
    h.service
        .register(TEN_LETTER_WORD, 10, 1000, h.user1)
        .unwrap();

    assert!(h.service.is_registered(TEN_LETTER_WORD));
    assert_eq!(h.service.resolve(TEN_LETTER_WORD), h.user1);
}

#[test]
fn price_is_charged_per_character_per_tick() {
    let h = Harness::new();
    assert_eq!(h.service.registry_price(TEN_LETTER_WORD, 10).unwrap(), 1000);
    assert_eq!(
        h.service
            .registry_price(TEN_LETTER_WORD, BLOCKS_IN_A_DAY)
            .unwrap(),
        640_000
    );
    assert_eq!(
        h.service
            .registry_price(TEN_LETTER_WORD, BLOCKS_IN_A_YEAR)
            .unwrap(),
        233_600_000
    );
}

#[test]
fn zero_length_lease_is_free_and_never_active() {
    let mut h = Harness::new();
    let registration = h
        .service
        .register(TEN_LETTER_WORD, 0, 500, h.user1)
        .unwrap();

    assert_eq!(registration.locked, 0);
    assert_eq!(registration.refund, 500);
    assert!(!h.service.is_registered(TEN_LETTER_WORD));
    assert_eq!(h.balance(h.user1), STARTING_BALANCE);

    // Still owned, so the owner can renew it into a real lease
    h.service
        .renew(TEN_LETTER_WORD, 10, 1000, h.user1)
        .unwrap();
    assert!(h.service.is_registered(TEN_LETTER_WORD));
}

// ─────────────────────────────────────────────────────────────────────────────
// Registered names
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn owner_can_renew_before_expiration() {
    let mut h = Harness::registered();
    h.clock.advance(4);
    let now = h.clock.now();

    let renewal = h.service.renew(TEN_LETTER_WORD, 10, 0, h.user1).unwrap();
    assert_eq!(renewal.expiration, now + 10);
    assert_eq!(h.service.expiration(TEN_LETTER_WORD), now + 10);
}

#[test]
fn renewing_reuses_the_locked_balance() {
    let mut h = Harness::registered();
    let before = h.balance(h.user1);
    assert_eq!(h.escrow(), 1000);

    let renewal = h.service.renew(TEN_LETTER_WORD, 10, 0, h.user1).unwrap();

    assert_eq!(renewal.charged, 0);
    assert_eq!(h.balance(h.user1), before);
    assert_eq!(h.escrow(), 1000);
}

#[test]
fn renewing_at_a_higher_price_charges_the_difference() {
    let mut h = Harness::registered();
    let before = h.balance(h.user1);

    let renewal = h.service.renew(TEN_LETTER_WORD, 11, 200, h.user1).unwrap();

    assert_eq!(renewal.charged, 100);
    assert_eq!(renewal.refund, 100);
    assert_eq!(renewal.locked, 1100);
    assert_eq!(h.balance(h.user1), before - 100);
    assert_eq!(h.escrow(), 1100);
    assert_eq!(h.service.locked_balance(TEN_LETTER_WORD), 1100);
}

#[test]
fn renewing_at_a_lower_price_refunds_the_surplus() {
    let mut h = Harness::registered();
    let before = h.balance(h.user1);

    let renewal = h.service.renew(TEN_LETTER_WORD, 5, 30, h.user1).unwrap();

    assert_eq!(renewal.locked, 500);
    assert_eq!(renewal.refund, 530);
    assert_eq!(h.balance(h.user1), before + 500);
    assert_eq!(h.escrow(), 500);
}

#[test]
fn others_cannot_renew() {
    let mut h = Harness::registered();
    let err = h
        .service
        .renew(TEN_LETTER_WORD, 10, 1000, h.user2)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotOwner);
    assert_eq!(h.balance(h.user2), STARTING_BALANCE);
}

#[test]
fn renewing_an_unknown_name_fails() {
    let mut h = Harness::new();
    let err = h
        .service
        .renew(TEN_LETTER_WORD, 10, 1000, h.user1)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn active_name_resolves_to_owner() {
    let h = Harness::registered();
    assert_eq!(h.service.resolve(TEN_LETTER_WORD), h.user1);
}

#[test]
fn locked_balance_cannot_be_withdrawn_early() {
    let mut h = Harness::registered();
    let err = h.service.withdraw(TEN_LETTER_WORD, h.user1).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BalanceLocked);
    assert_eq!(h.escrow(), 1000);
}

// ─────────────────────────────────────────────────────────────────────────────
// Expired names
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn expired_name_loses_registration() {
    let h = Harness::expired();
    assert!(!h.service.is_registered(TEN_LETTER_WORD));
}

#[test]
fn expiry_is_exact() {
    let h = Harness::registered();
    let expiration = h.service.expiration(TEN_LETTER_WORD);

    h.clock.set(expiration - 1);
    assert!(h.service.is_registered(TEN_LETTER_WORD));
    h.clock.set(expiration);
    assert!(!h.service.is_registered(TEN_LETTER_WORD));
}

#[test]
fn original_owner_can_renew_after_expiry() {
    let mut h = Harness::expired();
    h.service
        .renew(TEN_LETTER_WORD, 10, 1000, h.user1)
        .unwrap();
    assert_eq!(h.service.resolve(TEN_LETTER_WORD), h.user1);
}

#[test]
fn owner_withdraws_after_expiry() {
    let mut h = Harness::expired();
    let before = h.balance(h.user1);
    let locked = h.service.locked_balance(TEN_LETTER_WORD);

    let withdrawal = h.service.withdraw(TEN_LETTER_WORD, h.user1).unwrap();

    assert_eq!(withdrawal.amount, locked);
    assert_eq!(h.balance(h.user1), before + locked);
    assert_eq!(h.escrow(), 0);
}

#[test]
fn only_owner_can_withdraw() {
    let mut h = Harness::expired();
    let err = h.service.withdraw(TEN_LETTER_WORD, h.user2).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotOwner);
}

#[test]
fn withdrawal_deregisters_the_name() {
    let mut h = Harness::expired();
    h.service.withdraw(TEN_LETTER_WORD, h.user1).unwrap();

    assert_eq!(h.service.expiration(TEN_LETTER_WORD), 0);
    assert!(!h.service.is_registered(TEN_LETTER_WORD));
    assert_eq!(h.service.resolve(TEN_LETTER_WORD), AccountId::UNOWNED);
    assert_eq!(h.service.locked_balance(TEN_LETTER_WORD), 0);

    // Released for good: the former owner no longer holds renewal rights
    let err = h
        .service
        .renew(TEN_LETTER_WORD, 10, 1000, h.user1)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    // And anyone may register it, with nothing to eject
    let registration = h
        .service
        .register(TEN_LETTER_WORD, 10, 1000, h.user2)
        .unwrap();
    assert_eq!(registration.ejected, None);
}

#[test]
fn expired_name_resolves_to_unowned() {
    let h = Harness::expired();
    assert_eq!(h.service.resolve(TEN_LETTER_WORD), AccountId::UNOWNED);
}

#[test]
fn new_user_cannot_renew_expired_name() {
    let mut h = Harness::expired();
    let err = h
        .service
        .renew(TEN_LETTER_WORD, 10, 1000, h.user2)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotOwner);
}

#[test]
fn registering_expired_name_ejects_previous_owner() {
    let mut h = Harness::expired();
    let user1_before = h.balance(h.user1);
    let user2_before = h.balance(h.user2);
    let locked = h.service.locked_balance(TEN_LETTER_WORD);

    let registration = h
        .service
        .register(TEN_LETTER_WORD, 10, 1000, h.user2)
        .unwrap();

    let ejection = registration.ejected.unwrap();
    assert_eq!(ejection.owner, h.user1);
    assert_eq!(ejection.amount, locked);
    assert_eq!(h.balance(h.user1), user1_before + locked);
    assert_eq!(h.balance(h.user2), user2_before - 1000);
    assert_eq!(h.service.resolve(TEN_LETTER_WORD), h.user2);
    assert_eq!(h.escrow(), 1000);
}

#[test]
fn failed_takeover_leaves_previous_owner_funds_locked() {
    let mut h = Harness::expired();
    let user1_before = h.balance(h.user1);

    let err = h
        .service
        .register(TEN_LETTER_WORD, 10, 999, h.user2)
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InsufficientPayment);
    assert_eq!(h.balance(h.user1), user1_before);
    assert_eq!(h.service.locked_balance(TEN_LETTER_WORD), 1000);
    assert_eq!(h.service.registry().record(TEN_LETTER_WORD).owner, h.user1);
}

// ─────────────────────────────────────────────────────────────────────────────
// Front-running protection
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn commit_then_reveal_registers() {
    let mut h = Harness::new();
    let digest = h
        .service
        .compute_digest(TEN_LETTER_WORD, &h.user1, 1000, 10);

    h.service.register_commitment(digest).unwrap();
    assert!(h
        .service
        .validate_commitment(&digest, TEN_LETTER_WORD, &h.user1, 1000, 10));
    // Validation does not consume
    assert!(h
        .service
        .validate_commitment(&digest, TEN_LETTER_WORD, &h.user1, 1000, 10));

    let registration = h
        .service
        .safe_register(digest, TEN_LETTER_WORD, 10, 1000, h.user1)
        .unwrap();

    assert_eq!(registration.owner, h.user1);
    assert_eq!(h.service.resolve(TEN_LETTER_WORD), h.user1);
    assert!(h.service.commitments().is_empty());
    assert_eq!(h.balance(h.user1), STARTING_BALANCE - 1000);
}

#[test]
fn reveal_with_mismatched_arguments_fails() {
    let mut h = Harness::new();
    let digest = h
        .service
        .compute_digest(TEN_LETTER_WORD, &h.user1, 1000, 10);
    h.service.register_commitment(digest).unwrap();

    // A front-runner replaying user1's digest under their own account
    let err = h
        .service
        .safe_register(digest, TEN_LETTER_WORD, 10, 1000, h.user2)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidCommitment);

    let err = h
        .service
        .safe_register(digest, TEN_LETTER_WORD, 11, 1000, h.user1)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidCommitment);

    assert!(!h.service.is_registered(TEN_LETTER_WORD));
    assert!(h.service.commitments().contains(&digest));
}

#[test]
fn uncommitted_digest_cannot_be_revealed() {
    let mut h = Harness::new();
    let digest = h
        .service
        .compute_digest(TEN_LETTER_WORD, &h.user1, 1000, 10);

    assert!(!h
        .service
        .validate_commitment(&digest, TEN_LETTER_WORD, &h.user1, 1000, 10));
    let err = h
        .service
        .safe_register(digest, TEN_LETTER_WORD, 10, 1000, h.user1)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidCommitment);
}

#[test]
fn consumed_digest_cannot_be_replayed() {
    let mut h = Harness::new();
    let digest = h
        .service
        .compute_digest(TEN_LETTER_WORD, &h.user1, 1000, 10);
    h.service.register_commitment(digest).unwrap();
    h.service
        .safe_register(digest, TEN_LETTER_WORD, 10, 1000, h.user1)
        .unwrap();

    h.clock.advance(10);
    let err = h
        .service
        .safe_register(digest, TEN_LETTER_WORD, 10, 1000, h.user1)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidCommitment);
}

#[test]
fn failed_reveal_keeps_the_commitment() {
    let mut h = Harness::registered();
    let digest = h
        .service
        .compute_digest(TEN_LETTER_WORD, &h.user2, 1000, 10);
    h.service.register_commitment(digest).unwrap();

    // Name is still held by user1
    let err = h
        .service
        .safe_register(digest, TEN_LETTER_WORD, 10, 1000, h.user2)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AlreadyRegistered);
    assert!(h.service.commitments().contains(&digest));

    // Once it expires the same commitment goes through
    h.clock.advance(10);
    let registration = h
        .service
        .safe_register(digest, TEN_LETTER_WORD, 10, 1000, h.user2)
        .unwrap();
    assert_eq!(registration.ejected.map(|e| e.owner), Some(h.user1));
    assert!(!h.service.commitments().contains(&digest));
}

#[test]
fn duplicate_commitment_policy() {
    let mut h = Harness::new();
    let digest = h
        .service
        .compute_digest(TEN_LETTER_WORD, &h.user1, 1000, 10);
    h.service.register_commitment(digest).unwrap();
    let err = h.service.register_commitment(digest).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Invalid);

    let mut lenient = Harness::with_config(ServiceConfig {
        price_per_unit: PRICE_PER_CHAR,
        duplicate_commitments: DuplicateCommitment::Ignore,
    });
    lenient.service.register_commitment(digest).unwrap();
    lenient.service.register_commitment(digest).unwrap();
    assert_eq!(lenient.service.commitments().len(), 1);
}

// ─────────────────────────────────────────────────────────────────────────────
// Accounting and snapshots
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn escrow_tracks_locked_balances_across_operations() {
    let mut h = Harness::new();
    let supply = h.ledger.total_supply().unwrap();

    h.service.register("alpha", 10, 5_000, h.user1).unwrap();
    h.service.register("beta", 20, 900, h.user2).unwrap();
    h.service.check_escrow().unwrap();

    h.clock.advance(10);
    h.service.renew("alpha", 3, 0, h.user1).unwrap();
    h.service.check_escrow().unwrap();

    h.clock.advance(3);
    h.service.register("alpha", 7, 1_000, h.user2).unwrap();
    h.service.check_escrow().unwrap();

    h.clock.advance(20);
    h.service.withdraw("beta", h.user2).unwrap();
    h.service.check_escrow().unwrap();

    assert_eq!(h.ledger.total_supply().unwrap(), supply);
    assert_eq!(
        h.escrow(),
        h.service.registry().total_locked().unwrap()
    );

    let escrow_in: i128 = h
        .ledger
        .history()
        .unwrap()
        .iter()
        .map(|t| {
            let amount = t.amount as i128;
            match (t.from, t.to) {
                (_, Party::Escrow) => amount,
                (Party::Escrow, _) => -amount,
                _ => 0,
            }
        })
        .sum();
    assert_eq!(escrow_in, h.escrow() as i128);
}

#[test]
fn snapshot_restores_state() {
    let mut h = Harness::registered();
    let digest = h.service.compute_digest("other", &h.user2, 50, 1);
    h.service.register_commitment(digest).unwrap();

    let bytes = h.service.snapshot().to_bytes().unwrap();
    let snapshot = ServiceSnapshot::from_bytes(&bytes).unwrap();

    let restored = RegistrationService::restore(
        h.service.config().clone(),
        Arc::clone(&h.ledger),
        Arc::clone(&h.clock),
        snapshot,
    )
    .unwrap();

    assert_eq!(restored.resolve(TEN_LETTER_WORD), h.user1);
    assert_eq!(restored.locked_balance(TEN_LETTER_WORD), 1000);
    assert!(restored.validate_commitment(&digest, "other", &h.user2, 50, 1));
}

#[test]
fn restore_rejects_escrow_mismatch() {
    let h = Harness::registered();
    let snapshot = h.service.snapshot();

    let empty_ledger = Arc::new(MemoryLedger::new());
    let err = RegistrationService::restore(
        h.service.config().clone(),
        empty_ledger,
        Arc::clone(&h.clock),
        snapshot,
    )
    .err()
    .unwrap();
    assert_eq!(err.kind(), ErrorKind::Settlement);
}
