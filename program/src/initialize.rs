use anchor_lang::prelude::*;

use crate::events::ConfigInitialized;
use crate::state::{Config, RuleRegistry};

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(
        init,
        payer = admin,
        space = Config::SPACE,
        seeds = [b"config"],
        bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        init,
        payer = admin,
        space = RuleRegistry::SPACE,
        seeds = [b"registry"],
        bump
    )]
    pub registry: Account<'info, RuleRegistry>,

    /// The initializing signer becomes the administrator
    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

/// Handler for initializing the router
///
/// Creates the config and rule registry accounts. The signer becomes the
/// administrator for the lifetime of the deployment, and the maintenance flag
/// starts raised so no funds can be routed before rules are seeded and the
/// administrator explicitly opens the router.
pub fn handler(ctx: Context<Initialize>) -> Result<()> {
    let config = &mut ctx.accounts.config;
    config.admin = ctx.accounts.admin.key();
    config.maintenance = true;
    config.top_recipient = None;
    config.top_amount = 0;
    config.bump = ctx.bumps.config;

    let registry = &mut ctx.accounts.registry;
    registry.latest_rule_id = 0;
    registry.rules = Vec::new();
    registry.bump = ctx.bumps.registry;

    let clock = Clock::get()?;
    emit!(ConfigInitialized {
        admin: config.admin,
        maintenance: config.maintenance,
        timestamp: clock.unix_timestamp,
    });

    msg!("VAT router initialized; administrator: {}", config.admin);

    Ok(())
}
