//! Strong type definitions for the registry.
//!
//! Identifiers are newtypes to prevent misuse at compile time.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

use crate::error::CoreError;

/// Logical clock value. Supplied by the environment, never advanced by the registry.
pub type Tick = u64;

/// Value unit moved by the ledger and escrowed by the registry.
pub type Amount = u128;

/// A 32-byte account identifier.
///
/// [`AccountId::UNOWNED`] is the "no owner" sentinel returned by lookups on
/// names that are free.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AccountId(pub [u8; 32]);

impl AccountId {
    /// The sentinel for "no owner".
    pub const UNOWNED: Self = Self([0u8; 32]);

    /// Create a new AccountId from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Derive a deterministic account id from a label.
    ///
    /// AccountId = Blake3("namelease.account" || label)
    pub fn derive(label: &str) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"namelease.account");
        hasher.update(label.as_bytes());
        Self(*hasher.finalize().as_bytes())
    }

    /// Whether this is the sentinel.
    pub fn is_unowned(&self) -> bool {
        *self == Self::UNOWNED
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

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for AccountId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for AccountId {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

/// A registrable name.
///
/// Any non-empty UTF-8 string. There is no hierarchy: dots and slashes are
/// ordinary characters. The priced length is the byte length.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Name(String);

impl Name {
    /// Validate and wrap a name.
    pub fn new(name: impl Into<String>) -> Result<Self, CoreError> {
        let name = name.into();
        if name.is_empty() {
            return Err(CoreError::InvalidName("name must not be empty".into()));
        }
        Ok(Self(name))
    }

    /// The name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Byte length, used for pricing.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false: empty names are rejected at construction.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({:?})", self.0)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Name {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Name {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Name {
    type Error = CoreError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Name> for String {
    fn from(name: Name) -> Self {
        name.0
    }
}
