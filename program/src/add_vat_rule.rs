use anchor_lang::prelude::*;

use crate::constants::MAX_VAT_PERCENTAGE;
use crate::errors::VatError;
use crate::events::VatRuleAdded;
use crate::state::{Config, RuleRegistry};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct AddVatRuleArgs {
    /// Upper amount bound (inclusive) for the bracket, in lamports
    pub ceil_amount: u64,
    /// Retained percentage in [0, 100]
    pub vat_percentage: u8,
    /// Whether payments in this bracket must carry a tax identifier
    pub require_tax_id: bool,
    /// Metadata flag stored on the rule; no computational effect
    pub comment: bool,
}

#[derive(Accounts)]
pub struct AddVatRule<'info> {
    /// Global configuration account
    #[account(
        seeds = [b"config"],
        bump = config.bump,
        has_one = admin @ VatError::Unauthorized
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [b"registry"],
        bump = registry.bump
    )]
    pub registry: Account<'info, RuleRegistry>,

    /// Administrator (must sign)
    pub admin: Signer<'info>,
}

/// Handler for appending a VAT rule
///
/// Rules must be supplied in non-decreasing ceiling order; out-of-order
/// ceilings are rejected because tier resolution takes the first qualifying
/// rule in insertion order. Returns the identifier assigned to the new rule.
///
/// # Errors
/// Returns an error if:
/// - Caller is not the administrator
/// - The percentage exceeds 100
/// - The ceiling is below the previous rule's ceiling
/// - The registry already holds the maximum number of rules
pub fn handler(ctx: Context<AddVatRule>, args: AddVatRuleArgs) -> Result<u64> {
    require!(
        args.vat_percentage <= MAX_VAT_PERCENTAGE,
        VatError::InvalidPercentage
    );

    let registry = &mut ctx.accounts.registry;
    let rule_id = registry.append(
        args.ceil_amount,
        args.vat_percentage,
        args.require_tax_id,
        args.comment,
    )?;

    emit!(VatRuleAdded {
        rule_id,
        ceil_amount: args.ceil_amount,
        vat_percentage: args.vat_percentage,
        require_tax_id: args.require_tax_id,
        added_by: ctx.accounts.admin.key(),
    });

    msg!(
        "VAT rule {} added: ceiling {} lamports, {}% retained",
        rule_id,
        args.ceil_amount,
        args.vat_percentage
    );

    Ok(rule_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_serialization_round_trip() {
        let args = AddVatRuleArgs {
            ceil_amount: 10_000_000_000,
            vat_percentage: 6,
            require_tax_id: true,
            comment: false,
        };

        let serialized = args.try_to_vec().unwrap();
        let deserialized = AddVatRuleArgs::try_from_slice(&serialized).unwrap();

        assert_eq!(deserialized.ceil_amount, args.ceil_amount);
        assert_eq!(deserialized.vat_percentage, args.vat_percentage);
        assert_eq!(deserialized.require_tax_id, args.require_tax_id);
        assert_eq!(deserialized.comment, args.comment);
    }

    #[test]
    fn test_percentage_bound_is_inclusive() {
        // 100% retained is a valid rule; 101 is not.
        assert!(100u8 <= MAX_VAT_PERCENTAGE);
        assert!(101u8 > MAX_VAT_PERCENTAGE);
    }
}
