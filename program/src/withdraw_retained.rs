use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Transfer};

use crate::errors::VatError;
use crate::events::RetainedWithdrawn;
use crate::state::Config;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default)]
pub struct WithdrawRetainedArgs {
    /// Amount to withdraw from the treasury, in lamports
    pub amount: u64,
}

#[derive(Accounts)]
pub struct WithdrawRetained<'info> {
    /// Global configuration account
    #[account(
        seeds = [b"config"],
        bump = config.bump,
        has_one = admin @ VatError::Unauthorized
    )]
    pub config: Account<'info, Config>,

    /// Administrator (must sign)
    pub admin: Signer<'info>,

    /// Treasury PDA accumulating retained VAT
    #[account(
        mut,
        seeds = [b"treasury"],
        bump
    )]
    pub treasury: SystemAccount<'info>,

    /// Destination for the withdrawn lamports
    #[account(mut)]
    pub destination: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}

/// Handler for withdrawing retained VAT from the treasury
///
/// Moves accumulated lamports out of the treasury PDA to a destination chosen
/// by the administrator. This also recovers lamports pushed directly at the
/// treasury address without going through `route_funds`.
///
/// # Errors
/// Returns an error if:
/// - Caller is not the administrator
/// - The amount is zero
/// - The treasury balance does not cover the amount
pub fn handler(ctx: Context<WithdrawRetained>, args: WithdrawRetainedArgs) -> Result<()> {
    require!(args.amount > 0, VatError::InvalidAmount);
    require!(
        ctx.accounts.treasury.lamports() >= args.amount,
        VatError::InsufficientFunds
    );

    let treasury_bump = ctx.bumps.treasury;
    let treasury_seeds: &[&[&[u8]]] = &[&[b"treasury", &[treasury_bump]]];

    system_program::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.system_program.to_account_info(),
            Transfer {
                from: ctx.accounts.treasury.to_account_info(),
                to: ctx.accounts.destination.to_account_info(),
            },
            treasury_seeds,
        ),
        args.amount,
    )?;

    let clock = Clock::get()?;
    emit!(RetainedWithdrawn {
        authority: ctx.accounts.admin.key(),
        destination: ctx.accounts.destination.key(),
        amount: args.amount,
        timestamp: clock.unix_timestamp,
    });

    msg!(
        "{} lamports of retained VAT withdrawn to {}",
        args.amount,
        ctx.accounts.destination.key()
    );

    Ok(())
}
