//! Ledger trait: the abstract interface for value settlement.

use namelease_core::{AccountId, Amount, Settlement};

use crate::error::Result;

/// The value-transfer collaborator.
///
/// Implementations must apply a settlement atomically: either every
/// transfer in it takes effect or none does.
pub trait Ledger: Send + Sync {
    /// Current balance of an account. Unknown accounts hold zero.
    fn balance(&self, account: &AccountId) -> Result<Amount>;

    /// Value currently held in escrow.
    fn escrow_balance(&self) -> Result<Amount>;

    /// Apply every transfer in `settlement`, in order.
    ///
    /// # Returns
    /// - `Ok(())` if all transfers were applied.
    /// - `InsufficientFunds` if any debit would overdraw its party; nothing
    ///   is applied in that case.
    fn settle(&self, settlement: &Settlement) -> Result<()>;
}
