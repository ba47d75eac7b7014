//! Lease pricing.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::types::{Amount, Name, Tick};

/// Maps (name length, lease duration) to a cost.
///
/// `price = price_per_unit * name_len * duration`, computed in `u128` with
/// checked arithmetic. Overflow is an error, never a wrapped price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingPolicy {
    price_per_unit: Amount,
}

impl PricingPolicy {
    /// Create a policy charging `price_per_unit` per byte per tick.
    pub const fn new(price_per_unit: Amount) -> Self {
        Self { price_per_unit }
    }

    /// The configured unit price.
    pub const fn price_per_unit(&self) -> Amount {
        self.price_per_unit
    }

    /// Price a lease of `duration` ticks on a name of `name_len` bytes.
    pub fn price(&self, name_len: usize, duration: Tick) -> Result<Amount> {
        let overflow = || CoreError::PriceOverflow {
            price_per_unit: self.price_per_unit,
            name_len,
            duration,
        };

        let len = Amount::try_from(name_len).map_err(|_| overflow())?;
        self.price_per_unit
            .checked_mul(len)
            .and_then(|p| p.checked_mul(Amount::from(duration)))
            .ok_or_else(overflow)
    }

    /// Price a lease on a validated name.
    pub fn price_for(&self, name: &Name, duration: Tick) -> Result<Amount> {
        self.price(name.len(), duration)
    }
}
