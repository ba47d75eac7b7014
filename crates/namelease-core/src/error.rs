//! Error types for the core primitives.

use thiserror::Error;

use crate::types::{Amount, Tick};

/// Errors raised while building or pricing core values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("invalid name: {0}")]
    InvalidName(String),

    #[error("price overflow: {name_len} bytes for {duration} ticks at {price_per_unit} per unit")]
    PriceOverflow {
        price_per_unit: Amount,
        name_len: usize,
        duration: Tick,
    },

    #[error("tick overflow: {now} + {duration}")]
    TickOverflow { now: Tick, duration: Tick },

    #[error("amount overflow")]
    AmountOverflow,

    #[error("decoding error: {0}")]
    DecodingError(String),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
