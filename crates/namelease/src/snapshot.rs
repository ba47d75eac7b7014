//! Portable snapshots of registry and commitment state.
//!
//! Snapshots carry records and commitments only. Balances belong to the
//! ledger; restoring checks that the ledger's escrow matches the records.

use serde::{Deserialize, Serialize};

use namelease_commit::Commitment;
use namelease_core::{Name, Record, Tick};

use crate::error::{Result, ServiceError};

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u8 = 1;

/// Exported service state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSnapshot {
    pub version: u8,

    /// Tick at which the snapshot was taken.
    pub taken_at: Tick,

    /// Owned records, sorted by name.
    pub records: Vec<(Name, Record)>,

    /// Unrevealed commitments, sorted by digest.
    pub commitments: Vec<Commitment>,
}

impl ServiceSnapshot {
    /// Build a snapshot, sorting entries so equal states encode identically.
    pub fn new(
        taken_at: Tick,
        mut records: Vec<(Name, Record)>,
        mut commitments: Vec<Commitment>,
    ) -> Self {
        records.sort_by(|a, b| a.0.cmp(&b.0));
        commitments.sort_by(|a, b| a.digest.cmp(&b.digest));
        Self {
            version: SNAPSHOT_VERSION,
            taken_at,
            records,
            commitments,
        }
    }

    /// Serialize to CBOR bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::into_writer(self, &mut buf)
            .map_err(|e| ServiceError::InvalidSnapshot(e.to_string()))?;
        Ok(buf)
    }

    /// Deserialize from CBOR bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let snapshot: Self = ciborium::from_reader(bytes)
            .map_err(|e| ServiceError::InvalidSnapshot(e.to_string()))?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(ServiceError::InvalidSnapshot(format!(
                "unsupported snapshot version: {}",
                snapshot.version
            )));
        }
        Ok(snapshot)
    }
}
