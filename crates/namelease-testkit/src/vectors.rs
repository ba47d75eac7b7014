//! Test vectors for deterministic verification.
//!
//! Price vectors pin the pricing formula. Commitment vectors pin the exact
//! preimage bytes, so any implementation that hashes them with Blake3
//! derives the same digest.

use namelease_commit::compute_digest;
use namelease_core::{commitment_preimage, AccountId, Amount, Blake3Hasher, PricingPolicy, Tick};

/// A known lease price.
#[derive(Debug, Clone)]
pub struct PriceVector {
    pub name: &'static str,
    pub price_per_unit: Amount,
    pub duration: Tick,
    pub expected: Amount,
}

/// A known commitment preimage.
#[derive(Debug, Clone)]
pub struct CommitmentVector {
    /// Human-readable label for the vector.
    pub label: &'static str,
    pub name: &'static str,
    pub caller: [u8; 32],
    pub payment: Amount,
    pub duration: Tick,
    /// Expected preimage (hex).
    pub expected_preimage: &'static str,
}

/// Get all price vectors.
pub fn all_price_vectors() -> Vec<PriceVector> {
    const DAY: Tick = 6400;
    vec![
        PriceVector {
            name: "Friendship",
            price_per_unit: 10,
            duration: 10,
            expected: 1000,
        },
        PriceVector {
            name: "Friendship",
            price_per_unit: 10,
            duration: DAY,
            expected: 640_000,
        },
        PriceVector {
            name: "Friendship",
            price_per_unit: 10,
            duration: DAY * 365,
            expected: 233_600_000,
        },
        PriceVector {
            name: "a",
            price_per_unit: 10,
            duration: 1,
            expected: 10,
        },
        PriceVector {
            name: "Friendship",
            price_per_unit: 10,
            duration: 0,
            expected: 0,
        },
        // Length is counted in bytes: "né" is 3
        PriceVector {
            name: "né",
            price_per_unit: 1,
            duration: 7,
            expected: 21,
        },
    ]
}

/// Get all commitment vectors.
pub fn all_commitment_vectors() -> Vec<CommitmentVector> {
    vec![
        CommitmentVector {
            label: "ten letter name",
            name: "Friendship",
            caller: [0x42; 32],
            payment: 1000,
            duration: 10,
            expected_preimage: concat!(
                "6e616d656c656173652e636f6d6d69742e7631",
                "84",
                "6a467269656e6473686970",
                "5820",
                "4242424242424242424242424242424242424242424242424242424242424242",
                "1903e8",
                "0a",
            ),
        },
        CommitmentVector {
            label: "zero payment and duration",
            name: "a",
            caller: [0x01; 32],
            payment: 0,
            duration: 0,
            expected_preimage: concat!(
                "6e616d656c656173652e636f6d6d69742e7631",
                "84",
                "6161",
                "5820",
                "0101010101010101010101010101010101010101010101010101010101010101",
                "00",
                "00",
            ),
        },
        CommitmentVector {
            label: "bignum payment",
            name: "x",
            caller: [0xff; 32],
            payment: u64::MAX as Amount + 1,
            duration: 6400,
            expected_preimage: concat!(
                "6e616d656c656173652e636f6d6d69742e7631",
                "84",
                "6178",
                "5820",
                "ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
                "c249010000000000000000",
                "191900",
            ),
        },
    ]
}

/// Hex preimage of a commitment vector.
pub fn preimage_hex(vector: &CommitmentVector) -> String {
    hex::encode(commitment_preimage(
        vector.name,
        &AccountId::from_bytes(vector.caller),
        vector.payment,
        vector.duration,
    ))
}

/// Verify every vector against this implementation.
///
/// Returns `(label, matches, observed)` per vector. For commitment vectors
/// `observed` is the Blake3 digest hex, for reporting across platforms.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    let prices = all_price_vectors().into_iter().map(|v| {
        let observed = PricingPolicy::new(v.price_per_unit).price(v.name.len(), v.duration);
        let matches = observed.as_ref().ok() == Some(&v.expected);
        let observed = match observed {
            Ok(price) => price.to_string(),
            Err(e) => e.to_string(),
        };
        (format!("price {} x {}", v.name, v.duration), matches, observed)
    });

    let commitments = all_commitment_vectors().into_iter().map(|v| {
        let matches = preimage_hex(&v) == v.expected_preimage;
        let digest = compute_digest(
            &Blake3Hasher,
            v.name,
            &AccountId::from_bytes(v.caller),
            v.payment,
            v.duration,
        );
        (format!("commitment {}", v.label), matches, digest.to_hex())
    });

    prices.chain(commitments).collect()
}
