//! Read-only query instructions
//!
//! Each query loads the relevant account, validates nothing beyond the PDA
//! derivation (plus the admin gate on the top-recipient lookup, which is a
//! privileged aggregate) and publishes its result through Anchor return data.
//! Queries never mutate state.

use anchor_lang::prelude::*;

use crate::errors::VatError;
use crate::state::{Config, LedgerEntry, RuleRegistry, UserId, VatRule};

/// Accounts for registry-level queries
#[derive(Accounts)]
pub struct ViewRegistry<'info> {
    #[account(
        seeds = [b"registry"],
        bump = registry.bump
    )]
    pub registry: Account<'info, RuleRegistry>,
}

/// Accounts for the privileged top-recipient query
#[derive(Accounts)]
pub struct ViewTopRecipient<'info> {
    #[account(
        seeds = [b"config"],
        bump = config.bump,
        has_one = admin @ VatError::Unauthorized
    )]
    pub config: Account<'info, Config>,

    /// Administrator (must sign)
    pub admin: Signer<'info>,
}

/// Accounts for the per-recipient funds query
///
/// The ledger entry is optional: a key that never received a routed payment
/// has no account, and the query reports zero for it.
#[derive(Accounts)]
#[instruction(recipient: Pubkey, tax_id: Option<String>)]
pub struct ViewFundsReceived<'info> {
    #[account(
        seeds = [
            b"ledger",
            recipient.as_ref(),
            tax_id.as_deref().unwrap_or("").as_bytes()
        ],
        bump
    )]
    pub ledger_entry: Option<Account<'info, LedgerEntry>>,
}

/// Identifier of the most recently added rule
pub fn latest_rule_id(ctx: Context<ViewRegistry>) -> Result<u64> {
    ctx.accounts.registry.latest_id()
}

/// Full definition of one rule, including its cumulative retained balance
pub fn vat_rule(ctx: Context<ViewRegistry>, rule_id: u64) -> Result<VatRule> {
    Ok(*ctx.accounts.registry.rule(rule_id)?)
}

/// Cumulative VAT retained under one rule
pub fn tier_balance(ctx: Context<ViewRegistry>, rule_id: u64) -> Result<u64> {
    Ok(ctx.accounts.registry.rule(rule_id)?.retained_total)
}

/// Ledger key that has received the most net funds so far
pub fn top_recipient(ctx: Context<ViewTopRecipient>) -> Result<UserId> {
    ctx.accounts
        .config
        .top_recipient
        .clone()
        .ok_or_else(|| error!(VatError::RecipientNotFound))
}

/// Cumulative net funds received under one ledger key; zero when the key was
/// never credited
pub fn funds_received(
    ctx: Context<ViewFundsReceived>,
    _recipient: Pubkey,
    _tax_id: Option<String>,
) -> Result<u64> {
    Ok(ctx
        .accounts
        .ledger_entry
        .as_ref()
        .map_or(0, |entry| entry.total_received))
}
