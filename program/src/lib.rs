//! Solana VAT Router Program
//!
//! An on-chain tiered VAT computation and fund-routing ledger. Incoming
//! payments are split against an administrator-managed schedule of VAT
//! brackets: the net share is forwarded to the recipient, the retained share
//! accumulates in a program treasury per bracket. Cumulative net funds are
//! tracked per composite ledger key (optional tax identifier + recipient),
//! together with the key that has received the most.
//!
//! ## Core Features
//! - Ordered VAT rule registry with admin-only insertion and reset
//! - Bracket resolution by amount with last-rule fallback
//! - Exact integer splits: net + retained always equals the gross amount
//! - Per-key cumulative ledger and top-recipient tracking
//! - Maintenance flag halting the routing entry point
//! - Admin withdrawal of retained VAT from the treasury

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(unexpected_cfgs)]
#![allow(clippy::wildcard_imports)]
#![allow(clippy::needless_pass_by_value)] // Anchor handlers must take owned Context by design
#![allow(clippy::unnecessary_wraps)] // Anchor handlers return Result for consistency
#![allow(deprecated)] // Anchor framework uses deprecated AccountInfo::realloc internally

use anchor_lang::prelude::*;

mod add_vat_rule;
pub mod constants;
pub mod errors;
pub mod events;
mod initialize;
mod queries;
mod reset_vat_rules;
mod route_funds;
mod set_maintenance;
pub mod state;
mod withdraw_retained;

use add_vat_rule::*;
use initialize::*;
use queries::*;
pub use route_funds::RouteReceipt;
use route_funds::*;
use reset_vat_rules::*;
use set_maintenance::*;
use withdraw_retained::*;

use crate::state::{UserId, VatRule};

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

#[program]
pub mod vat_router {
    use super::*;

    /// Initialize the router configuration and rule registry
    ///
    /// The signer becomes the administrator and the maintenance flag starts
    /// raised, so routing stays blocked until rules are seeded and the flag
    /// is cleared.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config or registry account already exists
    /// - Account creation or initialization fails
    pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
        initialize::handler(ctx)
    }

    /// Append a VAT rule to the registry (admin only)
    ///
    /// Returns the identifier assigned to the new rule.
    ///
    /// # Errors
    /// Returns an error if:
    /// - Caller is not the administrator
    /// - The retained percentage exceeds 100
    /// - The ceiling is below the previous rule's ceiling
    /// - The registry is full
    pub fn add_vat_rule(ctx: Context<AddVatRule>, args: AddVatRuleArgs) -> Result<u64> {
        add_vat_rule::handler(ctx, args)
    }

    /// Clear the rule registry (admin only)
    ///
    /// Used to re-seed demo and test deployments; rule ids restart at 1.
    ///
    /// # Errors
    /// Returns an error if:
    /// - Caller is not the administrator
    pub fn reset_vat_rules(ctx: Context<ResetVatRules>) -> Result<()> {
        reset_vat_rules::handler(ctx)
    }

    /// Raise or clear the maintenance flag (admin only)
    ///
    /// # Errors
    /// Returns an error if:
    /// - Caller is not the administrator
    pub fn set_maintenance(ctx: Context<SetMaintenance>, args: SetMaintenanceArgs) -> Result<()> {
        set_maintenance::handler(ctx, args)
    }

    /// Route one payment through the VAT schedule
    ///
    /// Forwards the net share to the recipient, retains the VAT share in the
    /// treasury and updates the ledger, per-rule balances and top-recipient
    /// tracker. All-or-nothing: any failure leaves every balance untouched.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The maintenance flag is raised
    /// - The amount is zero or the tax identifier is too long
    /// - No rules are configured
    /// - The resolved rule requires a tax identifier and none was supplied
    /// - The payer balance does not cover the amount or a transfer fails
    pub fn route_funds(ctx: Context<RouteFunds>, args: RouteFundsArgs) -> Result<RouteReceipt> {
        route_funds::handler(ctx, args)
    }

    /// Withdraw retained VAT from the treasury (admin only)
    ///
    /// # Errors
    /// Returns an error if:
    /// - Caller is not the administrator
    /// - The amount is zero or exceeds the treasury balance
    pub fn withdraw_retained(
        ctx: Context<WithdrawRetained>,
        args: WithdrawRetainedArgs,
    ) -> Result<()> {
        withdraw_retained::handler(ctx, args)
    }

    /// Identifier of the most recently added rule
    ///
    /// # Errors
    /// Returns an error if:
    /// - The registry is empty
    pub fn get_latest_rule_id(ctx: Context<ViewRegistry>) -> Result<u64> {
        queries::latest_rule_id(ctx)
    }

    /// Full definition of one rule
    ///
    /// # Errors
    /// Returns an error if:
    /// - No rule exists with the given id
    pub fn get_vat_rule(ctx: Context<ViewRegistry>, rule_id: u64) -> Result<VatRule> {
        queries::vat_rule(ctx, rule_id)
    }

    /// Cumulative VAT retained under one rule
    ///
    /// # Errors
    /// Returns an error if:
    /// - No rule exists with the given id
    pub fn get_tier_balance(ctx: Context<ViewRegistry>, rule_id: u64) -> Result<u64> {
        queries::tier_balance(ctx, rule_id)
    }

    /// Ledger key with the most net funds received (admin only)
    ///
    /// # Errors
    /// Returns an error if:
    /// - Caller is not the administrator
    /// - No payment has ever been routed
    pub fn get_top_recipient(ctx: Context<ViewTopRecipient>) -> Result<UserId> {
        queries::top_recipient(ctx)
    }

    /// Cumulative net funds received under one ledger key
    ///
    /// Reports zero for keys that never received a routed payment.
    pub fn get_funds_received(
        ctx: Context<ViewFundsReceived>,
        recipient: Pubkey,
        tax_id: Option<String>,
    ) -> Result<u64> {
        queries::funds_received(ctx, recipient, tax_id)
    }
}
