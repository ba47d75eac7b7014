//! Commitment digest computation.

use namelease_core::{commitment_preimage, AccountId, Amount, Digest, HashPrimitive, Tick};

/// Compute the commitment digest for a registration intent.
///
/// Digest = hash(COMMIT_DOMAIN || canonical([name, caller, payment, lease_duration]))
pub fn compute_digest(
    hasher: &dyn HashPrimitive,
    name: &str,
    caller: &AccountId,
    payment: Amount,
    lease_duration: Tick,
) -> Digest {
    hasher.hash(&commitment_preimage(name, caller, payment, lease_duration))
}

#[cfg(test)]
mod tests {
    use super::*;
    use namelease_core::Blake3Hasher;

    #[test]
    fn test_digest_is_deterministic() {
        let alice = AccountId::derive("alice");
        let d1 = compute_digest(&Blake3Hasher, "Friendship", &alice, 1000, 10);
        let d2 = compute_digest(&Blake3Hasher, "Friendship", &alice, 1000, 10);
        assert_eq!(d1, d2);
    }

    #[test]
    fn test_digest_binds_caller() {
        let alice = AccountId::derive("alice");
        let bob = AccountId::derive("bob");
        assert_ne!(
            compute_digest(&Blake3Hasher, "Friendship", &alice, 1000, 10),
            compute_digest(&Blake3Hasher, "Friendship", &bob, 1000, 10)
        );
    }

    #[test]
    fn test_digest_uses_injected_primitive() {
        struct Constant;
        impl HashPrimitive for Constant {
            fn hash(&self, _data: &[u8]) -> Digest {
                Digest::from_bytes([7; 32])
            }
        }

        let alice = AccountId::derive("alice");
        assert_eq!(
            compute_digest(&Constant, "anything", &alice, 1, 1),
            Digest::from_bytes([7; 32])
        );
    }
}
