use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Transfer};

use crate::constants::MAX_TAX_ID_LEN;
use crate::errors::VatError;
use crate::events::FundsRouted;
use crate::state::{Config, LedgerEntry, RuleRegistry};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct RouteFundsArgs {
    /// Gross amount to route, in lamports
    pub amount: u64,
    /// Optional payer-supplied tax identifier (at most 32 bytes); together
    /// with the recipient it forms the ledger key
    pub tax_id: Option<String>,
}

/// Receipt returned to the caller after a successful routing
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct RouteReceipt {
    /// Recipient of the net amount
    pub recipient: Pubkey,
    /// Tax identifier used for the ledger key; empty when none was supplied
    pub tax_id: String,
    /// Rule that priced the payment
    pub rule_id: u64,
    /// Gross amount submitted
    pub gross_amount: u64,
    /// Amount forwarded to the recipient
    pub net_amount: u64,
    /// Amount retained into the treasury
    pub retained_amount: u64,
    /// New cumulative net total for the ledger key
    pub total_received: u64,
}

#[derive(Accounts)]
#[instruction(args: RouteFundsArgs)]
pub struct RouteFunds<'info> {
    /// Global configuration account
    #[account(
        mut,
        seeds = [b"config"],
        bump = config.bump,
        constraint = !config.maintenance @ VatError::MaintenanceActive
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [b"registry"],
        bump = registry.bump
    )]
    pub registry: Account<'info, RuleRegistry>,

    /// Cumulative ledger entry for (recipient, tax identifier), created on
    /// first use with rent funded by the payer
    #[account(
        init_if_needed,
        payer = payer,
        space = LedgerEntry::SPACE,
        seeds = [
            b"ledger",
            recipient.key().as_ref(),
            args.tax_id.as_deref().unwrap_or("").as_bytes()
        ],
        bump
    )]
    pub ledger_entry: Account<'info, LedgerEntry>,

    /// Payer funding the gross amount (must sign)
    #[account(mut)]
    pub payer: Signer<'info>,

    /// Recipient of the net amount
    #[account(mut)]
    pub recipient: SystemAccount<'info>,

    /// Treasury PDA accumulating retained VAT
    #[account(
        mut,
        seeds = [b"treasury"],
        bump
    )]
    pub treasury: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}

/// Handler for routing one payment
///
/// Resolves the VAT bracket for the gross amount, forwards the net share to
/// the recipient and moves the retained share into the treasury, then updates
/// the ledger, the per-rule retained balance and the top-recipient tracker.
/// Any failure aborts the whole instruction, so a rejected payment leaves
/// every balance and counter untouched and the payer keeps the full amount —
/// this is also the refund path for zero-amount submissions.
///
/// # Errors
/// Returns an error if:
/// - The maintenance flag is raised
/// - The amount is zero
/// - The tax identifier exceeds 32 bytes
/// - No rules are configured
/// - The resolved rule requires a tax identifier and none was supplied
/// - The payer balance does not cover the gross amount
/// - A lamport transfer fails
pub fn handler(ctx: Context<RouteFunds>, args: RouteFundsArgs) -> Result<RouteReceipt> {
    let amount = args.amount;
    require!(amount > 0, VatError::InvalidAmount);

    let tax_id = args.tax_id.as_deref().unwrap_or("");
    require!(tax_id.len() <= MAX_TAX_ID_LEN, VatError::TaxIdTooLong);

    let tier = *ctx.accounts.registry.resolve_tier(amount)?;
    if tier.require_tax_id && tax_id.is_empty() {
        return err!(VatError::TaxIdRequired);
    }
    // A tax identifier supplied to a bracket that does not require one still
    // keys the ledger entry; it never influences bracket selection.

    let (net, retained) = tier.split(amount)?;

    // The runtime rejects an overdraw anyway; this pre-check surfaces the
    // shortfall as a typed error instead of a raw system-program failure.
    require!(
        ctx.accounts.payer.lamports() >= amount,
        VatError::TransferFailed
    );

    if net > 0 {
        system_program::transfer(
            CpiContext::new(
                ctx.accounts.system_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.payer.to_account_info(),
                    to: ctx.accounts.recipient.to_account_info(),
                },
            ),
            net,
        )?;
    }

    if retained > 0 {
        system_program::transfer(
            CpiContext::new(
                ctx.accounts.system_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.payer.to_account_info(),
                    to: ctx.accounts.treasury.to_account_info(),
                },
            ),
            retained,
        )?;
    }

    // The seeds bind these fields; stamping them keeps freshly created
    // entries readable by queries and event consumers.
    let entry = &mut ctx.accounts.ledger_entry;
    entry.recipient = ctx.accounts.recipient.key();
    entry.tax_id = tax_id.to_string();
    entry.bump = ctx.bumps.ledger_entry;

    let total_received = entry.credit(net)?;
    let user_id = entry.user_id();

    ctx.accounts.registry.accrue_retained(tier.id, retained)?;
    ctx.accounts
        .config
        .observe_recipient(user_id, total_received);

    emit!(FundsRouted {
        payer: ctx.accounts.payer.key(),
        recipient: ctx.accounts.recipient.key(),
        tax_id: tax_id.to_string(),
        rule_id: tier.id,
        gross_amount: amount,
        net_amount: net,
        retained_amount: retained,
        total_received,
    });

    Ok(RouteReceipt {
        recipient: ctx.accounts.recipient.key(),
        tax_id: tax_id.to_string(),
        rule_id: tier.id,
        gross_amount: amount,
        net_amount: net,
        retained_amount: retained,
        total_received,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_serialization_with_tax_id() {
        let args = RouteFundsArgs {
            amount: 20_000_000_000,
            tax_id: Some("A100200300".to_string()),
        };

        let serialized = args.try_to_vec().unwrap();
        let deserialized = RouteFundsArgs::try_from_slice(&serialized).unwrap();

        assert_eq!(deserialized.amount, args.amount);
        assert_eq!(deserialized.tax_id.as_deref(), Some("A100200300"));
    }

    #[test]
    fn test_args_serialization_without_tax_id() {
        let args = RouteFundsArgs {
            amount: 40_000_000,
            tax_id: None,
        };

        let serialized = args.try_to_vec().unwrap();
        let deserialized = RouteFundsArgs::try_from_slice(&serialized).unwrap();

        assert_eq!(deserialized.amount, args.amount);
        assert_eq!(deserialized.tax_id, None);
    }

    #[test]
    fn test_receipt_serialization_round_trip() {
        let receipt = RouteReceipt {
            recipient: Pubkey::new_unique(),
            tax_id: "A100200300".to_string(),
            rule_id: 3,
            gross_amount: 20_000_000_000,
            net_amount: 17_400_000_000,
            retained_amount: 2_600_000_000,
            total_received: 17_400_000_000,
        };

        let serialized = receipt.try_to_vec().unwrap();
        let deserialized = RouteReceipt::try_from_slice(&serialized).unwrap();

        assert_eq!(deserialized, receipt);
    }

    #[test]
    fn test_missing_tax_id_normalizes_to_empty_seed() {
        // None and Some("") must address the same ledger entry.
        let none: Option<String> = None;
        let empty = Some(String::new());
        assert_eq!(none.as_deref().unwrap_or(""), "");
        assert_eq!(empty.as_deref().unwrap_or(""), "");
    }
}
