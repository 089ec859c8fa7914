//! Program account types and structures

use anchor_lang::prelude::*;
use serde::{Deserialize, Serialize};

/// Lamports per SOL, for display helpers
const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// A single VAT bracket in the registry
///
/// Brackets are resolved by scanning for the first rule whose `ceil_amount`
/// is at least the payment amount; payments above every ceiling fall into the
/// last rule.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, AnchorSerialize, AnchorDeserialize,
)]
pub struct VatRule {
    /// Rule id, assigned densely starting from 1
    pub id: u64,
    /// Inclusive upper bound of the bracket, in lamports
    pub ceil_amount: u64,
    /// VAT percentage retained from payments in this bracket (0-100)
    pub vat_percentage: u8,
    /// Whether payments in this bracket must carry a tax id
    pub require_tax_id: bool,
    /// Free-form marker flag carried through from rule insertion
    pub comment: bool,
    /// Lamports retained under this rule since the registry was last reset
    pub retained_total: u64,
}

/// The identity a ledger entry is keyed by: recipient plus optional tax id
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, AnchorSerialize, AnchorDeserialize)]
pub struct UserId {
    /// The recipient's pubkey
    pub recipient: Pubkey,
    /// The recipient's tax id, empty when none was supplied
    pub tax_id: String,
}

/// Global configuration account
/// PDA seeds: `["config"]`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, AnchorSerialize, AnchorDeserialize)]
pub struct Config {
    /// Administrator pubkey recorded at initialization
    pub admin: Pubkey,
    /// Maintenance switch; routing is rejected while raised
    pub maintenance: bool,
    /// The recipient with the largest cumulative total, if any payment landed
    pub top_recipient: Option<UserId>,
    /// That recipient's cumulative total in lamports
    pub top_amount: u64,
    /// PDA bump seed
    pub bump: u8,
}

/// The VAT rule registry account
/// PDA seeds: `["registry"]`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, AnchorSerialize, AnchorDeserialize)]
pub struct RuleRegistry {
    /// Highest rule id handed out so far
    pub latest_rule_id: u64,
    /// The configured brackets, in insertion order
    pub rules: Vec<VatRule>,
    /// PDA bump seed
    pub bump: u8,
}

/// Cumulative receipts for one (recipient, tax id) pair
/// PDA seeds: `["ledger", recipient, tax_id]`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, AnchorSerialize, AnchorDeserialize)]
pub struct LedgerEntry {
    /// The recipient's pubkey
    pub recipient: Pubkey,
    /// The recipient's tax id, empty when none was supplied
    pub tax_id: String,
    /// Net lamports received across all payments to this entry
    pub total_received: u64,
    /// PDA bump seed
    pub bump: u8,
}

/// Return data from `route_funds`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, AnchorSerialize, AnchorDeserialize)]
pub struct RouteReceipt {
    /// The recipient the net amount was forwarded to
    pub recipient: Pubkey,
    /// The tax id the ledger entry is keyed by, empty when none was supplied
    pub tax_id: String,
    /// Id of the rule that priced the payment
    pub rule_id: u64,
    /// Lamports the payer put in
    pub gross_amount: u64,
    /// Lamports forwarded to the recipient
    pub net_amount: u64,
    /// Lamports retained in the treasury
    pub retained_amount: u64,
    /// The recipient's cumulative total after this payment
    pub total_received: u64,
}

/// Arguments for adding a VAT rule
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, AnchorSerialize, AnchorDeserialize,
)]
pub struct AddVatRuleArgs {
    /// Inclusive upper bound of the new bracket, in lamports
    pub ceil_amount: u64,
    /// VAT percentage for the bracket (0-100)
    pub vat_percentage: u8,
    /// Whether payments in the bracket must carry a tax id
    pub require_tax_id: bool,
    /// Free-form marker flag stored on the rule
    pub comment: bool,
}

/// Arguments for setting the maintenance switch
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, AnchorSerialize, AnchorDeserialize,
)]
pub struct SetMaintenanceArgs {
    /// The new state of the maintenance flag
    pub active: bool,
}

/// Arguments for routing a payment
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, AnchorSerialize, AnchorDeserialize)]
pub struct RouteFundsArgs {
    /// Gross payment amount in lamports
    pub amount: u64,
    /// The recipient's tax id, if they have one
    pub tax_id: Option<String>,
}

/// Arguments for withdrawing retained VAT from the treasury
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, AnchorSerialize, AnchorDeserialize,
)]
pub struct WithdrawRetainedArgs {
    /// Lamports to move from the treasury to the administrator
    pub amount: u64,
}

impl VatRule {
    /// Get the ceiling in SOL (human readable)
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn ceil_sol(&self) -> f64 {
        self.ceil_amount as f64 / LAMPORTS_PER_SOL as f64
    }
}

impl RouteFundsArgs {
    /// The tax id as the program sees it: a missing id and an empty one are
    /// the same ledger key
    #[must_use]
    pub fn normalized_tax_id(&self) -> &str {
        self.tax_id.as_deref().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_rule() -> VatRule {
        VatRule {
            id: 3,
            ceil_amount: 100 * LAMPORTS_PER_SOL,
            vat_percentage: 13,
            require_tax_id: true,
            comment: false,
            retained_total: 0,
        }
    }

    #[test]
    fn vat_rule_borsh_round_trip() {
        let rule = sample_rule();
        let bytes = rule.try_to_vec().unwrap();
        let back = VatRule::try_from_slice(&bytes).unwrap();
        assert_eq!(rule, back);
    }

    #[test]
    fn route_receipt_serializes_to_json() {
        let receipt = RouteReceipt {
            recipient: Pubkey::new_unique(),
            tax_id: "A100200300".to_string(),
            rule_id: 3,
            gross_amount: 20 * LAMPORTS_PER_SOL,
            net_amount: 17_400_000_000,
            retained_amount: 2_600_000_000,
            total_received: 17_400_000_000,
        };

        let json = serde_json::to_string(&receipt).unwrap();
        let back: RouteReceipt = serde_json::from_str(&json).unwrap();
        assert_eq!(receipt, back);
    }

    #[test]
    fn config_round_trips_with_and_without_top_recipient() {
        let mut config = Config {
            admin: Pubkey::new_unique(),
            maintenance: true,
            top_recipient: None,
            top_amount: 0,
            bump: 255,
        };

        let bytes = config.try_to_vec().unwrap();
        assert_eq!(config, Config::try_from_slice(&bytes).unwrap());

        config.top_recipient = Some(UserId {
            recipient: Pubkey::new_unique(),
            tax_id: "A100200300".to_string(),
        });
        config.top_amount = 110 * LAMPORTS_PER_SOL;

        let bytes = config.try_to_vec().unwrap();
        assert_eq!(config, Config::try_from_slice(&bytes).unwrap());
    }

    #[test]
    fn route_args_normalize_the_tax_id() {
        let without = RouteFundsArgs {
            amount: 1,
            tax_id: None,
        };
        let empty = RouteFundsArgs {
            amount: 1,
            tax_id: Some(String::new()),
        };
        let with_id = RouteFundsArgs {
            amount: 1,
            tax_id: Some("A100200300".to_string()),
        };

        assert_eq!(without.normalized_tax_id(), "");
        assert_eq!(empty.normalized_tax_id(), "");
        assert_eq!(with_id.normalized_tax_id(), "A100200300");
    }

    #[test]
    fn rule_ceiling_formats_as_sol() {
        let rule = sample_rule();
        assert!((rule.ceil_sol() - 100.0).abs() < f64::EPSILON);
    }
}
