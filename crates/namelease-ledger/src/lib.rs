//! # Namelease Ledger
//!
//! Settlement abstraction for the name lease registry. The registry never
//! moves value itself: every registry change produces a [`Settlement`] and
//! hands it to a [`Ledger`].
//!
//! ## Key Types
//!
//! - [`Ledger`] - The trait for the value-transfer collaborator
//! - [`MemoryLedger`] - In-memory ledger for tests and simulations
//! - [`LedgerError`] - Settlement failures
//!
//! ## Usage
//!
//! ```rust
//! use namelease_core::{AccountId, Party, Settlement};
//! use namelease_ledger::{Ledger, MemoryLedger};
//!
//! let ledger = MemoryLedger::new();
//! let alice = AccountId::derive("alice");
//! ledger.fund(alice, 5_000).unwrap();
//!
//! let mut settlement = Settlement::new();
//! settlement.deposit(alice, 1_000);
//! ledger.settle(&settlement).unwrap();
//!
//! assert_eq!(ledger.balance(&alice).unwrap(), 4_000);
//! assert_eq!(ledger.escrow_balance().unwrap(), 1_000);
//! ```
//!
//! ## Design Notes
//!
//! - **Atomic batches**: a settlement is validated in full before any of it
//!   is applied
//! - **No overdraft**: neither an account nor escrow may go below zero
//!
//! [`Settlement`]: namelease_core::Settlement

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{LedgerError, Result};
pub use memory::MemoryLedger;
pub use traits::Ledger;
