//! VAT SDK - Rust helpers for the Solana VAT router program
//!
//! This crate provides the pure client-side layer for the VAT router:
//!
//! - Computing the program's Program Derived Addresses (config, registry,
//!   treasury, per-key ledger entries)
//! - Client-side mirrors of program account and receipt types
//! - Input validation mirroring the on-chain rules, so submissions can be
//!   rejected before they cost a transaction
//!
//! # Example Usage
//!
//! ```
//! use anchor_lang::prelude::Pubkey;
//! use vat_sdk::{pda, validation};
//!
//! # fn main() -> vat_sdk::Result<()> {
//! let recipient = Pubkey::new_unique();
//!
//! // Where the ledger entry for (recipient, tax id) lives:
//! let ledger = pda::ledger_entry_address(&recipient, Some("A100200300"))?;
//!
//! // Preview the split a 13% bracket would apply to 20 SOL:
//! let (net, retained) = validation::preview_split(20_000_000_000, 13)?;
//! assert_eq!(net, 17_400_000_000);
//! assert_eq!(retained, 2_600_000_000);
//! # let _ = ledger;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod error;
pub mod pda;
pub mod program_types;
pub mod validation;

pub use error::{Result, VatSdkError};

/// The deployed VAT router program id, base58 encoded
pub const PROGRAM_ID: &str = "Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS";

/// The deployed VAT router program id as a string slice
#[must_use]
pub const fn program_id_string() -> &'static str {
    PROGRAM_ID
}
