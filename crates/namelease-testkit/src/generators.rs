//! Proptest generators for property-based testing.

use proptest::prelude::*;

use namelease::Result;
use namelease_core::{AccountId, Amount, Digest, Tick};

use crate::fixtures::TestFixture;

/// Names operations draw from. Small on purpose so operations collide.
pub const NAME_POOL: &[&str] = &["a", "io", "Friendship", "name", "lease"];

/// Generate a valid name.
pub fn name() -> impl Strategy<Value = String> {
    "[A-Za-z0-9][A-Za-z0-9-]{0,15}".prop_map(String::from)
}

/// Generate an index into [`NAME_POOL`].
pub fn pooled_name() -> impl Strategy<Value = usize> {
    0..NAME_POOL.len()
}

/// Generate a non-sentinel account.
pub fn account() -> impl Strategy<Value = AccountId> {
    any::<[u8; 32]>()
        .prop_filter("sentinel account", |bytes| bytes != &[0u8; 32])
        .prop_map(AccountId::from_bytes)
}

/// Generate a Digest.
pub fn digest() -> impl Strategy<Value = Digest> {
    any::<[u8; 32]>().prop_map(Digest::from_bytes)
}

/// Generate a short lease duration, zero included.
pub fn lease_duration() -> impl Strategy<Value = Tick> {
    0u64..=40
}

/// Generate a payment around typical prices for [`NAME_POOL`].
pub fn payment() -> impl Strategy<Value = Amount> {
    prop_oneof![Just(0u128), 0u128..=5_000u128]
}

/// One registry operation, with accounts given as indices.
#[derive(Debug, Clone)]
pub enum Op {
    Register {
        name: usize,
        account: usize,
        duration: Tick,
        payment: Amount,
    },
    Renew {
        name: usize,
        account: usize,
        duration: Tick,
        payment: Amount,
    },
    Withdraw {
        name: usize,
        account: usize,
    },
    /// Commit to a later `Reveal` with the same fields.
    Commit {
        name: usize,
        account: usize,
        duration: Tick,
        payment: Amount,
    },
    Reveal {
        name: usize,
        account: usize,
        duration: Tick,
        payment: Amount,
    },
    Advance(Tick),
}

impl Arbitrary for Op {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        let intent = || (pooled_name(), 0usize..4, lease_duration(), payment());
        prop_oneof![
            3 => intent().prop_map(|(name, account, duration, payment)| Op::Register {
                name,
                account,
                duration,
                payment,
            }),
            2 => intent().prop_map(|(name, account, duration, payment)| Op::Renew {
                name,
                account,
                duration,
                payment,
            }),
            2 => (pooled_name(), 0usize..4)
                .prop_map(|(name, account)| Op::Withdraw { name, account }),
            1 => intent().prop_map(|(name, account, duration, payment)| Op::Commit {
                name,
                account,
                duration,
                payment,
            }),
            1 => intent().prop_map(|(name, account, duration, payment)| Op::Reveal {
                name,
                account,
                duration,
                payment,
            }),
            2 => (0u64..=25).prop_map(Op::Advance),
        ]
        .boxed()
    }
}

/// Run `op` against the fixture's service.
///
/// Account indices wrap around `accounts`, which must not be empty.
pub fn apply_op(fixture: &mut TestFixture, accounts: &[AccountId], op: &Op) -> Result<()> {
    let pick = |i: usize| accounts[i % accounts.len()];

    match *op {
        Op::Register {
            name,
            account,
            duration,
            payment,
        } => {
            fixture
                .service
                .register(NAME_POOL[name], duration, payment, pick(account))?;
        }
        Op::Renew {
            name,
            account,
            duration,
            payment,
        } => {
            fixture
                .service
                .renew(NAME_POOL[name], duration, payment, pick(account))?;
        }
        Op::Withdraw { name, account } => {
            fixture.service.withdraw(NAME_POOL[name], pick(account))?;
        }
        Op::Commit {
            name,
            account,
            duration,
            payment,
        } => {
            let digest =
                fixture
                    .service
                    .compute_digest(NAME_POOL[name], &pick(account), payment, duration);
            fixture.service.register_commitment(digest)?;
        }
        Op::Reveal {
            name,
            account,
            duration,
            payment,
        } => {
            let caller = pick(account);
            let digest = fixture
                .service
                .compute_digest(NAME_POOL[name], &caller, payment, duration);
            fixture
                .service
                .safe_register(digest, NAME_POOL[name], duration, payment, caller)?;
        }
        Op::Advance(ticks) => {
            fixture.advance(ticks);
        }
    }
    Ok(())
}
