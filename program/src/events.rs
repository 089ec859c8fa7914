use anchor_lang::prelude::*;

/// Event emitted when the router configuration is initialized
#[event]
pub struct ConfigInitialized {
    /// Administrator identity (the initializing signer)
    pub admin: Pubkey,
    /// Initial maintenance state (always true at initialization)
    pub maintenance: bool,
    /// Unix timestamp when the config was initialized
    pub timestamp: i64,
}

/// Event emitted when a VAT rule is appended to the registry
#[event]
pub struct VatRuleAdded {
    /// Identifier assigned to the new rule
    pub rule_id: u64,
    /// Upper amount bound (inclusive) for the bracket, in lamports
    pub ceil_amount: u64,
    /// Retained percentage in [0, 100]
    pub vat_percentage: u8,
    /// Whether payments in this bracket must carry a tax identifier
    pub require_tax_id: bool,
    /// Administrator who added the rule
    pub added_by: Pubkey,
}

/// Event emitted when the rule registry is cleared
#[event]
pub struct VatRulesReset {
    /// Administrator who performed the reset
    pub reset_by: Pubkey,
    /// Number of rules discarded
    pub rules_dropped: u64,
    /// Unix timestamp of the reset
    pub timestamp: i64,
}

/// Event emitted when the maintenance flag is toggled
#[event]
pub struct MaintenanceFlagChanged {
    /// New state of the flag; true blocks fund routing
    pub active: bool,
    /// Administrator who toggled the flag
    pub authority: Pubkey,
    /// Unix timestamp of the change
    pub timestamp: i64,
}

/// Event emitted on every successfully routed payment
#[event]
pub struct FundsRouted {
    /// Payer who funded the payment
    pub payer: Pubkey,
    /// Recipient of the net amount
    pub recipient: Pubkey,
    /// Tax identifier used for the ledger key; empty when none was supplied
    pub tax_id: String,
    /// Rule that priced the payment
    pub rule_id: u64,
    /// Gross amount submitted, in lamports
    pub gross_amount: u64,
    /// Amount forwarded to the recipient
    pub net_amount: u64,
    /// Amount retained into the treasury
    pub retained_amount: u64,
    /// New cumulative net total for the ledger key
    pub total_received: u64,
}

/// Event emitted when retained VAT is withdrawn from the treasury
#[event]
pub struct RetainedWithdrawn {
    /// Administrator who authorized the withdrawal
    pub authority: Pubkey,
    /// Account the lamports were sent to
    pub destination: Pubkey,
    /// Amount withdrawn, in lamports
    pub amount: u64,
    /// Unix timestamp of the withdrawal
    pub timestamp: i64,
}
