//! Client-side validation mirroring the on-chain rules
//!
//! Every check here is also enforced by the program; running them before
//! submission lets a client reject bad input without paying for a failed
//! transaction, and `preview_route` reproduces the exact split the program
//! will apply.

use crate::error::{Result, VatSdkError};
use crate::program_types::VatRule;

/// Maximum accepted VAT percentage
pub const MAX_VAT_PERCENTAGE: u8 = 100;

/// Maximum byte length of a tax id
pub const MAX_TAX_ID_LEN: usize = 32;

/// Maximum number of rules the registry holds
pub const MAX_VAT_RULES: usize = 16;

/// Divisor turning a whole-number percentage into a fraction
const VAT_PERCENT_DIVISOR: u128 = 100;

/// What `route_funds` would do with a payment, computed off-chain
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoutePreview {
    /// Id of the rule the payment resolves to
    pub rule_id: u64,
    /// Lamports that would reach the recipient
    pub net_amount: u64,
    /// Lamports the treasury would retain
    pub retained_amount: u64,
}

/// Check that a payment amount is positive
pub fn validate_amount(amount: u64) -> Result<()> {
    if amount == 0 {
        return Err(VatSdkError::InvalidAmount);
    }
    Ok(())
}

/// Check that a VAT percentage is within 0-100
pub fn validate_percentage(vat_percentage: u8) -> Result<()> {
    if vat_percentage > MAX_VAT_PERCENTAGE {
        return Err(VatSdkError::InvalidPercentage);
    }
    Ok(())
}

/// Check that a tax id fits in the ledger seed
pub fn validate_tax_id(tax_id: Option<&str>) -> Result<()> {
    if tax_id.unwrap_or("").len() > MAX_TAX_ID_LEN {
        return Err(VatSdkError::TaxIdTooLong);
    }
    Ok(())
}

/// Check that a new rule would be accepted by the registry
///
/// Mirrors the on-chain append: the registry must have room, the percentage
/// must be in range and the ceiling must not fall below the current last
/// rule's.
pub fn validate_new_rule(rules: &[VatRule], ceil_amount: u64, vat_percentage: u8) -> Result<()> {
    validate_percentage(vat_percentage)?;
    if rules.len() >= MAX_VAT_RULES {
        return Err(VatSdkError::RuleLimitReached);
    }
    if let Some(last) = rules.last() {
        if ceil_amount < last.ceil_amount {
            return Err(VatSdkError::InvalidAmount);
        }
    }
    Ok(())
}

/// Resolve the rule a payment amount falls under
///
/// The first rule whose ceiling covers the amount wins; amounts above every
/// ceiling fall into the last rule.
pub fn resolve_rule(rules: &[VatRule], amount: u64) -> Result<&VatRule> {
    rules
        .iter()
        .find(|rule| rule.ceil_amount >= amount)
        .or_else(|| rules.last())
        .ok_or(VatSdkError::NoRulesConfigured)
}

/// Split a gross amount into (net, retained) under a VAT percentage
///
/// The retained share is floored, so net plus retained always equals the
/// gross amount exactly.
pub fn preview_split(amount: u64, vat_percentage: u8) -> Result<(u64, u64)> {
    validate_percentage(vat_percentage)?;

    let retained = u128::from(amount)
        .checked_mul(u128::from(vat_percentage))
        .and_then(|scaled| scaled.checked_div(VAT_PERCENT_DIVISOR))
        .and_then(|retained| u64::try_from(retained).ok())
        .ok_or(VatSdkError::ArithmeticError)?;
    let net = amount
        .checked_sub(retained)
        .ok_or(VatSdkError::ArithmeticError)?;

    Ok((net, retained))
}

/// Reproduce the full `route_funds` outcome for a payment
///
/// Runs the same checks in the same order as the program: positive amount,
/// tax id length, rule resolution, then the tax-id requirement of the
/// resolved bracket.
pub fn preview_route(rules: &[VatRule], amount: u64, tax_id: Option<&str>) -> Result<RoutePreview> {
    validate_amount(amount)?;
    validate_tax_id(tax_id)?;

    let rule = resolve_rule(rules, amount)?;
    if rule.require_tax_id && tax_id.unwrap_or("").is_empty() {
        return Err(VatSdkError::TaxIdRequired);
    }

    let (net_amount, retained_amount) = preview_split(amount, rule.vat_percentage)?;
    Ok(RoutePreview {
        rule_id: rule.id,
        net_amount,
        retained_amount,
    })
}
