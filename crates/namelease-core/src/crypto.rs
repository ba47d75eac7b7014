//! Hash primitive used to build commitments.
//!
//! The registry never hashes directly. It goes through [`HashPrimitive`] so
//! the digest algorithm can be swapped without touching registry logic.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 32-byte digest.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Digest(pub [u8; 32]);

impl Digest {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        if bytes.len() != 32 {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for Digest {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

/// A deterministic, preimage-resistant hash function.
pub trait HashPrimitive: Send + Sync {
    /// Hash the given bytes.
    fn hash(&self, data: &[u8]) -> Digest;
}

/// Blake3, the default primitive.
#[derive(Debug, Clone, Copy, Default)]
pub struct Blake3Hasher;

impl HashPrimitive for Blake3Hasher {
    fn hash(&self, data: &[u8]) -> Digest {
        Digest(*blake3::hash(data).as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blake3_hash() {
        let h1 = Blake3Hasher.hash(b"test data");
        let h2 = Blake3Hasher.hash(b"test data");
        assert_eq!(h1, h2);

        let h3 = Blake3Hasher.hash(b"different data");
        assert_ne!(h1, h3);
    }

    #[test]
    fn test_digest_hex_roundtrip() {
        let digest = Blake3Hasher.hash(b"Friendship");
        let recovered = Digest::from_hex(&digest.to_hex()).unwrap();
        assert_eq!(digest, recovered);
        assert!(Digest::from_hex("abcd").is_err());
    }
}
