use anchor_lang::prelude::*;

/// Custom error codes for the VAT router program
///
/// Note: Anchor automatically assigns error codes starting from 6000.
#[error_code]
pub enum VatError {
    /// Error Code: 6000
    /// When a non-admin identity attempts an admin-only operation
    #[msg("Unauthorized. This operation can only be called by the administrator.")]
    Unauthorized,

    /// Error Code: 6001
    /// When fund routing is attempted while the maintenance flag is set
    #[msg("The contract is in maintenance. Fund routing is disabled until the administrator clears the flag.")]
    MaintenanceActive,

    /// Error Code: 6002
    /// When a monetary amount is invalid (zero, or a rule ceiling below the previous rule's ceiling)
    #[msg("Invalid amount provided. Amounts must be greater than zero and rule ceilings must be non-decreasing.")]
    InvalidAmount,

    /// Error Code: 6003
    /// When a VAT percentage is outside [0, 100]
    #[msg("Invalid VAT percentage. The retained percentage must be between 0 and 100.")]
    InvalidPercentage,

    /// Error Code: 6004
    /// When the resolved rule mandates a tax identifier and none was supplied
    #[msg("A tax identifier is required for this amount bracket but none was provided.")]
    TaxIdRequired,

    /// Error Code: 6005
    /// When the supplied tax identifier exceeds the maximum seed length
    #[msg("Tax identifier too long. A tax identifier is limited to 32 bytes.")]
    TaxIdTooLong,

    /// Error Code: 6006
    /// When routing or a registry query is attempted before any rule exists
    #[msg("No VAT rules configured. The administrator must add at least one rule before funds can be routed.")]
    NoRulesConfigured,

    /// Error Code: 6007
    /// When a rule lookup references an id the registry does not hold
    #[msg("VAT rule not found for the given rule id.")]
    RuleNotFound,

    /// Error Code: 6008
    /// When the top-recipient query runs before any payment was routed
    #[msg("No recipient recorded yet. At least one payment must be routed first.")]
    RecipientNotFound,

    /// Error Code: 6009
    /// When the registry already holds the maximum number of rules
    #[msg("VAT rule limit reached. The registry cannot hold any more rules.")]
    RuleLimitReached,

    /// Error Code: 6010
    /// When arithmetic operations would overflow/underflow
    #[msg("Arithmetic operation would result in overflow or underflow.")]
    ArithmeticError,

    /// Error Code: 6011
    /// When the payer cannot cover the gross amount being routed
    #[msg("Transfer failed. The payer balance does not cover the routed amount.")]
    TransferFailed,

    /// Error Code: 6012
    /// When a withdrawal exceeds the retained balance held by the treasury
    #[msg("Insufficient funds in the treasury to cover the withdrawal.")]
    InsufficientFunds,
}
