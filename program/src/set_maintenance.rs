use anchor_lang::prelude::*;

use crate::errors::VatError;
use crate::events::MaintenanceFlagChanged;
use crate::state::Config;

/// Arguments for toggling the maintenance flag
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct SetMaintenanceArgs {
    /// New state of the flag; true blocks fund routing
    pub active: bool,
}

/// Accounts required for toggling the maintenance flag
#[derive(Accounts)]
pub struct SetMaintenance<'info> {
    /// Global configuration account
    #[account(
        mut,
        seeds = [b"config"],
        bump = config.bump,
        has_one = admin @ VatError::Unauthorized
    )]
    pub config: Account<'info, Config>,

    /// Administrator (must sign)
    pub admin: Signer<'info>,
}

/// Handler for toggling the maintenance flag
///
/// While the flag is raised, `route_funds` is rejected with
/// `MaintenanceActive`. Admin operations stay available so rules can be
/// seeded and retained funds recovered during a halt.
///
/// # Errors
/// Returns an error if:
/// - Caller is not the administrator
pub fn handler(ctx: Context<SetMaintenance>, args: SetMaintenanceArgs) -> Result<()> {
    let config = &mut ctx.accounts.config;
    config.maintenance = args.active;

    let clock = Clock::get()?;
    emit!(MaintenanceFlagChanged {
        active: args.active,
        authority: ctx.accounts.admin.key(),
        timestamp: clock.unix_timestamp,
    });

    msg!(
        "Maintenance flag set to {} by administrator: {}",
        args.active,
        ctx.accounts.admin.key()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_serialization_round_trip() {
        for active in [true, false] {
            let args = SetMaintenanceArgs { active };
            let serialized = args.try_to_vec().unwrap();
            let deserialized = SetMaintenanceArgs::try_from_slice(&serialized).unwrap();
            assert_eq!(deserialized.active, active);
        }
    }
}
