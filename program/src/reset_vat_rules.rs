use anchor_lang::prelude::*;

use crate::errors::VatError;
use crate::events::VatRulesReset;
use crate::state::{Config, RuleRegistry};

#[derive(Accounts)]
pub struct ResetVatRules<'info> {
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

/// Handler for clearing the rule registry
///
/// Drops every rule and resets the id counter to zero, so the next appended
/// rule gets id 1 again. Used to re-seed demo and test deployments with a
/// fresh schedule; gated behind the administrator like every other mutation.
/// Per-rule retained balances are discarded with the rules, but the lamports
/// already collected remain in the treasury and stay withdrawable.
///
/// # Errors
/// Returns an error if:
/// - Caller is not the administrator
pub fn handler(ctx: Context<ResetVatRules>) -> Result<()> {
    let registry = &mut ctx.accounts.registry;
    let rules_dropped = registry.rules.len() as u64;
    registry.reset();

    let clock = Clock::get()?;
    emit!(VatRulesReset {
        reset_by: ctx.accounts.admin.key(),
        rules_dropped,
        timestamp: clock.unix_timestamp,
    });

    msg!(
        "VAT rule registry reset ({} rules dropped) by administrator: {}",
        rules_dropped,
        ctx.accounts.admin.key()
    );

    Ok(())
}
