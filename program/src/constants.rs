//! Program constants
//!
//! Protocol-level constants used throughout the VAT router program. These
//! values are invariants of the deployed program and must never change
//! post-deployment: rule accounting, ledger seeds and historical receipts
//! all depend on them.

/// Divisor for VAT percentage calculations
///
/// VAT rates are expressed as whole percentages in `[0, 100]`, matching the
/// rates published by tax authorities. The retained share of a payment is
/// `amount * vat_percentage / VAT_PERCENT_DIVISOR`, computed in `u128` to
/// avoid intermediate overflow.
pub const VAT_PERCENT_DIVISOR: u128 = 100;

/// Maximum VAT percentage (100% retained)
pub const MAX_VAT_PERCENTAGE: u8 = 100;

/// Maximum number of VAT rules the registry can hold
///
/// Rules are stored inline in the registry account so tier resolution is a
/// single account read. Real VAT schedules have a handful of brackets; 16
/// leaves generous headroom while keeping the account small.
pub const MAX_VAT_RULES: usize = 16;

/// Maximum byte length of a payer-supplied tax identifier
///
/// The tax identifier participates in the ledger PDA seeds, and a single
/// Solana seed is capped at 32 bytes.
pub const MAX_TAX_ID_LEN: usize = 32;
