//! Error types for the VAT SDK
//!
//! This module provides error handling for the VAT SDK, including automatic
//! mapping of program-specific error codes to meaningful error variants.
//!
//! # Program Error Mapping
//!
//! The SDK maps the router's error codes to dedicated variants:
//!
//! - **6000**: `Unauthorized` - Caller is not the administrator
//! - **6001**: `MaintenanceActive` - The maintenance switch is raised
//! - **6002**: `InvalidAmount` - Amount is zero or breaks the ceiling order
//! - **6003**: `InvalidPercentage` - VAT percentage above 100
//! - **6004**: `TaxIdRequired` - The resolved bracket requires a tax id
//! - **6005**: `TaxIdTooLong` - Tax id exceeds the seed length limit
//! - **6006**: `NoRulesConfigured` - The rule registry is empty
//! - **6007**: `RuleNotFound` - No rule with the requested id
//! - **6008**: `RecipientNotFound` - No recipient observed yet
//! - **6009**: `RuleLimitReached` - Registry capacity exhausted
//! - **6010**: `ArithmeticError` - Checked arithmetic overflowed
//! - **6011**: `TransferFailed` - Payer cannot cover the gross amount
//! - **6012**: `InsufficientFunds` - Treasury cannot cover the withdrawal
//!
//! # Example
//!
//! ```
//! use vat_sdk::error::VatSdkError;
//!
//! fn describe(code: u32) -> String {
//!     match VatSdkError::from_error_code(code) {
//!         Some(VatSdkError::MaintenanceActive) => "router is paused".to_string(),
//!         Some(other) => other.to_string(),
//!         None => format!("unrecognized error code {code}"),
//!     }
//! }
//!
//! assert_eq!(describe(6001), "router is paused");
//! ```

use thiserror::Error;

/// Result type for VAT SDK operations
pub type Result<T> = std::result::Result<T, VatSdkError>;

/// Error types that can occur when using the VAT SDK
#[derive(Error, Debug)]
pub enum VatSdkError {
    /// Error from Anchor framework
    #[error("Anchor error: {0}")]
    Anchor(anchor_lang::error::Error),

    /// Error parsing a base58 pubkey
    #[error("Pubkey parse error: {0}")]
    ParsePubkey(#[from] anchor_lang::solana_program::pubkey::ParsePubkeyError),

    /// Error from the Solana program layer
    #[error("Program error: {0}")]
    Program(#[from] anchor_lang::prelude::ProgramError),

    /// Generic error with message
    #[error("VAT SDK error: {0}")]
    Generic(String),

    /// Invalid PDA computation
    #[error("Invalid PDA: {0}")]
    InvalidPda(String),

    // Specific program error variants (maps to Anchor error codes 6000-6012)
    /// Caller is not the administrator (program error 6000)
    #[error("This operation can only be performed by the administrator.")]
    Unauthorized,

    /// The maintenance switch is raised (program error 6001)
    #[error("The router is in maintenance. Payments are rejected until the administrator clears the flag.")]
    MaintenanceActive,

    /// Amount is zero or breaks the ceiling order (program error 6002)
    #[error("Invalid amount. Amounts must be positive and rule ceilings must not decrease.")]
    InvalidAmount,

    /// VAT percentage above 100 (program error 6003)
    #[error("Invalid VAT percentage. Percentages are expressed as whole numbers from 0 to 100.")]
    InvalidPercentage,

    /// The resolved bracket requires a tax id (program error 6004)
    #[error("A tax id is required for this payment bracket.")]
    TaxIdRequired,

    /// Tax id exceeds the seed length limit (program error 6005)
    #[error("Tax id too long. Tax ids are limited to 32 bytes.")]
    TaxIdTooLong,

    /// The rule registry is empty (program error 6006)
    #[error("No VAT rules configured. The administrator must add rules before payments can route.")]
    NoRulesConfigured,

    /// No rule with the requested id (program error 6007)
    #[error("VAT rule not found. Rule ids are assigned densely starting from 1.")]
    RuleNotFound,

    /// No recipient observed yet (program error 6008)
    #[error("No recipient found. The top recipient is empty until a payment lands.")]
    RecipientNotFound,

    /// Registry capacity exhausted (program error 6009)
    #[error("The VAT rule registry is full.")]
    RuleLimitReached,

    /// Checked arithmetic overflowed (program error 6010)
    #[error("Arithmetic overflow while computing the VAT split.")]
    ArithmeticError,

    /// Payer cannot cover the gross amount (program error 6011)
    #[error("Transfer failed. The payer balance does not cover the gross amount.")]
    TransferFailed,

    /// Treasury cannot cover the withdrawal (program error 6012)
    #[error("Insufficient treasury funds for the requested withdrawal.")]
    InsufficientFunds,
}

impl From<anchor_lang::error::Error> for VatSdkError {
    fn from(error: anchor_lang::error::Error) -> Self {
        Self::from_anchor_error(error)
    }
}

impl From<String> for VatSdkError {
    fn from(msg: String) -> Self {
        Self::Generic(msg)
    }
}

impl From<&str> for VatSdkError {
    fn from(msg: &str) -> Self {
        Self::Generic(msg.to_string())
    }
}

impl VatSdkError {
    /// Map a raw custom error code to its `VatSdkError` variant
    ///
    /// Returns `None` for codes the router does not define, including
    /// framework codes below 6000.
    #[must_use]
    pub const fn from_error_code(code: u32) -> Option<Self> {
        match code {
            6000 => Some(Self::Unauthorized),
            6001 => Some(Self::MaintenanceActive),
            6002 => Some(Self::InvalidAmount),
            6003 => Some(Self::InvalidPercentage),
            6004 => Some(Self::TaxIdRequired),
            6005 => Some(Self::TaxIdTooLong),
            6006 => Some(Self::NoRulesConfigured),
            6007 => Some(Self::RuleNotFound),
            6008 => Some(Self::RecipientNotFound),
            6009 => Some(Self::RuleLimitReached),
            6010 => Some(Self::ArithmeticError),
            6011 => Some(Self::TransferFailed),
            6012 => Some(Self::InsufficientFunds),
            _ => None,
        }
    }

    /// Map program error codes to specific `VatSdkError` variants
    ///
    /// Takes an Anchor error and attempts to map it to a dedicated variant
    /// based on its error code. Anything outside the router's code range is
    /// returned wrapped in `VatSdkError::Anchor`.
    #[must_use]
    pub fn from_anchor_error(anchor_error: anchor_lang::error::Error) -> Self {
        use anchor_lang::error::Error;

        match &anchor_error {
            Error::AnchorError(anchor_err) => {
                match Self::from_error_code(anchor_err.error_code_number) {
                    Some(mapped) => mapped,
                    None => Self::Anchor(anchor_error),
                }
            }
            Error::ProgramError(_) => Self::Anchor(anchor_error),
        }
    }
}
