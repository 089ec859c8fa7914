use anchor_lang::prelude::*;
use std::fmt;

use crate::constants::{MAX_TAX_ID_LEN, MAX_VAT_RULES, VAT_PERCENT_DIVISOR};
use crate::errors::VatError;

/// A single VAT bracket
///
/// Rules are appended in non-decreasing `ceil_amount` order and never removed,
/// so `id` values are dense and start at 1. `retained_total` accumulates the
/// VAT withheld under this bracket across all routed payments.
#[derive(AnchorSerialize, AnchorDeserialize, InitSpace, Clone, Copy, Debug, PartialEq, Eq)]
pub struct VatRule {
    /// Dense rule identifier, starting at 1
    pub id: u64, // 8 bytes
    /// Upper amount bound (inclusive) for this bracket, in lamports
    pub ceil_amount: u64, // 8 bytes
    /// Retained percentage in [0, 100]; the net share is `100 - vat_percentage`
    pub vat_percentage: u8, // 1 byte
    /// Whether payments in this bracket must carry a tax identifier
    pub require_tax_id: bool, // 1 byte
    /// Metadata flag carried through from rule creation; no computational effect
    pub comment: bool, // 1 byte
    /// Cumulative lamports retained under this rule
    pub retained_total: u64, // 8 bytes
}

impl VatRule {
    /// Splits a gross amount into `(net, retained)` under this rule
    ///
    /// The retained share is floored, so the remainder of the integer
    /// division always lands on the net side and `net + retained == amount`
    /// holds exactly.
    pub fn split(&self, amount: u64) -> Result<(u64, u64)> {
        let retained = u64::try_from(
            u128::from(amount)
                .checked_mul(u128::from(self.vat_percentage))
                .ok_or(VatError::ArithmeticError)?
                .checked_div(VAT_PERCENT_DIVISOR)
                .ok_or(VatError::ArithmeticError)?,
        )
        .map_err(|_| VatError::ArithmeticError)?;

        let net = amount
            .checked_sub(retained)
            .ok_or(VatError::ArithmeticError)?;

        Ok((net, retained))
    }
}

/// Composite ledger key: an optional payer-supplied tax identifier plus the
/// recipient identity
///
/// Two payments to the same recipient under different tax identifiers are
/// tracked as distinct entries. The `Display` form is the tax identifier
/// concatenated with the base58 recipient key, mirroring the ledger PDA seed
/// order.
#[derive(AnchorSerialize, AnchorDeserialize, InitSpace, Clone, Debug, PartialEq, Eq)]
pub struct UserId {
    /// Recipient identity
    pub recipient: Pubkey,
    /// Tax identifier; empty when none was supplied
    #[max_len(MAX_TAX_ID_LEN)]
    pub tax_id: String,
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.tax_id, self.recipient)
    }
}

/// Global configuration account
/// PDA seeds: `["config"]`
#[account]
#[derive(InitSpace)]
pub struct Config {
    /// Administrator identity; set to the initializing signer, immutable afterwards
    pub admin: Pubkey, // 32 bytes
    /// Operational halt switch; true blocks fund routing. Defaults to true at
    /// initialization so a fresh deployment cannot route before rules exist.
    pub maintenance: bool, // 1 byte
    /// Ledger key that has received the most net funds so far
    pub top_recipient: Option<UserId>, // 1 + 32 + (4 + 32) bytes
    /// Cumulative net amount held by `top_recipient` at the last update
    pub top_amount: u64, // 8 bytes
    /// PDA bump seed
    pub bump: u8, // 1 byte
}

impl Config {
    pub const SPACE: usize = 8 + Self::INIT_SPACE;

    /// Records a new cumulative total for a ledger key
    ///
    /// The incumbent is replaced only on a strictly greater total; ties keep
    /// the first-recorded recipient.
    pub fn observe_recipient(&mut self, user_id: UserId, cumulative: u64) {
        if cumulative > self.top_amount {
            self.top_amount = cumulative;
            self.top_recipient = Some(user_id);
        }
    }
}

/// Ordered collection of VAT rules
/// PDA seeds: `["registry"]`
///
/// Rules live inline in this account so tier resolution is a single scan over
/// one account read. The registry is mutated only by admin instructions.
#[account]
#[derive(InitSpace)]
pub struct RuleRegistry {
    /// Identifier of the most recently appended rule; 0 while empty
    pub latest_rule_id: u64, // 8 bytes
    /// Rules in insertion order with non-decreasing ceilings
    #[max_len(MAX_VAT_RULES)]
    pub rules: Vec<VatRule>, // 4 + 16 * 27 bytes
    /// PDA bump seed
    pub bump: u8, // 1 byte
}

impl RuleRegistry {
    pub const SPACE: usize = 8 + Self::INIT_SPACE;

    /// Appends a rule and returns its identifier
    ///
    /// Ceilings must be non-decreasing across insertions; an out-of-order
    /// ceiling is rejected rather than silently accepted, since tier
    /// resolution takes the first qualifying rule in insertion order.
    pub fn append(
        &mut self,
        ceil_amount: u64,
        vat_percentage: u8,
        require_tax_id: bool,
        comment: bool,
    ) -> Result<u64> {
        require!(self.rules.len() < MAX_VAT_RULES, VatError::RuleLimitReached);

        if let Some(last) = self.rules.last() {
            require!(ceil_amount >= last.ceil_amount, VatError::InvalidAmount);
        }

        let id = self
            .latest_rule_id
            .checked_add(1)
            .ok_or(VatError::ArithmeticError)?;

        self.rules.push(VatRule {
            id,
            ceil_amount,
            vat_percentage,
            require_tax_id,
            comment,
            retained_total: 0,
        });
        self.latest_rule_id = id;

        Ok(id)
    }

    /// Clears all rules and resets the id counter
    pub fn reset(&mut self) {
        self.rules.clear();
        self.latest_rule_id = 0;
    }

    /// Identifier of the most recently appended rule
    pub fn latest_id(&self) -> Result<u64> {
        if self.rules.is_empty() {
            return err!(VatError::NoRulesConfigured);
        }
        Ok(self.latest_rule_id)
    }

    /// Looks up a rule by identifier
    pub fn rule(&self, id: u64) -> Result<&VatRule> {
        self.rules
            .iter()
            .find(|rule| rule.id == id)
            .ok_or_else(|| error!(VatError::RuleNotFound))
    }

    /// Resolves the bracket for a gross amount
    ///
    /// Returns the first rule (in insertion order) whose ceiling covers the
    /// amount, or the last rule when the amount exceeds every ceiling.
    pub fn resolve_tier(&self, amount: u64) -> Result<&VatRule> {
        let last = self.rules.last().ok_or(VatError::NoRulesConfigured)?;
        Ok(self
            .rules
            .iter()
            .find(|rule| rule.ceil_amount >= amount)
            .unwrap_or(last))
    }

    /// Adds a retained amount to a rule's cumulative balance
    pub fn accrue_retained(&mut self, id: u64, retained: u64) -> Result<()> {
        let rule = self
            .rules
            .iter_mut()
            .find(|rule| rule.id == id)
            .ok_or(VatError::RuleNotFound)?;

        rule.retained_total = rule
            .retained_total
            .checked_add(retained)
            .ok_or(VatError::ArithmeticError)?;

        Ok(())
    }
}

/// Cumulative net funds received under one ledger key
/// PDA seeds: `["ledger", recipient, tax_id]`
///
/// Created lazily on the first routed payment to a key and only ever
/// increased afterwards.
#[account]
#[derive(InitSpace)]
pub struct LedgerEntry {
    /// Recipient identity
    pub recipient: Pubkey, // 32 bytes
    /// Tax identifier; empty when none was supplied
    #[max_len(MAX_TAX_ID_LEN)]
    pub tax_id: String, // 4 + 32 bytes
    /// Cumulative net lamports received (gross minus retained VAT)
    pub total_received: u64, // 8 bytes
    /// PDA bump seed
    pub bump: u8, // 1 byte
}

impl LedgerEntry {
    pub const SPACE: usize = 8 + Self::INIT_SPACE;

    /// Adds a net amount and returns the new cumulative total
    pub fn credit(&mut self, amount: u64) -> Result<u64> {
        self.total_received = self
            .total_received
            .checked_add(amount)
            .ok_or(VatError::ArithmeticError)?;
        Ok(self.total_received)
    }

    /// The composite ledger key of this entry
    pub fn user_id(&self) -> UserId {
        UserId {
            recipient: self.recipient,
            tax_id: self.tax_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOL: u64 = 1_000_000_000;

    fn rule(id: u64, ceil_amount: u64, vat_percentage: u8) -> VatRule {
        VatRule {
            id,
            ceil_amount,
            vat_percentage,
            require_tax_id: false,
            comment: false,
            retained_total: 0,
        }
    }

    fn error_code(err: Error) -> u32 {
        match ProgramError::from(err) {
            ProgramError::Custom(code) => code,
            other => panic!("expected custom error, got {other:?}"),
        }
    }

    #[test]
    fn split_floors_retained_share() {
        let rule = rule(1, 100 * SOL, 13);
        // 13% of 17 lamports is 2.21; the fraction stays on the net side.
        let (net, retained) = rule.split(17).unwrap();
        assert_eq!(retained, 2);
        assert_eq!(net, 15);
    }

    #[test]
    fn split_conserves_every_lamport() {
        for pct in [0u8, 1, 6, 13, 24, 50, 99, 100] {
            let rule = rule(1, u64::MAX, pct);
            for amount in [1u64, 99, 100, 101, 20 * SOL, u64::MAX] {
                let (net, retained) = rule.split(amount).unwrap();
                assert_eq!(net + retained, amount, "pct={pct} amount={amount}");
            }
        }
    }

    #[test]
    fn split_zero_percentage_retains_nothing() {
        let rule = rule(1, SOL, 0);
        let (net, retained) = rule.split(40_000_000).unwrap();
        assert_eq!(net, 40_000_000);
        assert_eq!(retained, 0);
    }

    #[test]
    fn split_full_percentage_retains_everything() {
        let rule = rule(1, SOL, 100);
        let (net, retained) = rule.split(SOL).unwrap();
        assert_eq!(net, 0);
        assert_eq!(retained, SOL);
    }

    fn seeded_registry() -> RuleRegistry {
        let mut registry = RuleRegistry {
            latest_rule_id: 0,
            rules: Vec::new(),
            bump: 255,
        };
        registry.append(SOL / 20, 0, false, false).unwrap();
        registry.append(10 * SOL, 6, true, false).unwrap();
        registry.append(100 * SOL, 13, true, false).unwrap();
        registry.append(120 * SOL, 24, true, true).unwrap();
        registry
    }

    #[test]
    fn append_assigns_dense_ids_from_one() {
        let registry = seeded_registry();
        let ids: Vec<u64> = registry.rules.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(registry.latest_id().unwrap(), 4);
    }

    #[test]
    fn append_rejects_decreasing_ceiling() {
        let mut registry = seeded_registry();
        let err = registry.append(50 * SOL, 10, false, false).unwrap_err();
        assert_eq!(error_code(err), VatError::InvalidAmount as u32 + 6000);
        // The failed append must not have consumed an id.
        assert_eq!(registry.latest_rule_id, 4);
    }

    #[test]
    fn append_accepts_equal_ceiling() {
        let mut registry = seeded_registry();
        let id = registry.append(120 * SOL, 30, false, false).unwrap();
        assert_eq!(id, 5);
    }

    #[test]
    fn append_stops_at_capacity() {
        let mut registry = RuleRegistry {
            latest_rule_id: 0,
            rules: Vec::new(),
            bump: 255,
        };
        for i in 0..MAX_VAT_RULES as u64 {
            registry.append(i * SOL, 5, false, false).unwrap();
        }
        let err = registry
            .append(MAX_VAT_RULES as u64 * SOL, 5, false, false)
            .unwrap_err();
        assert_eq!(error_code(err), VatError::RuleLimitReached as u32 + 6000);
    }

    #[test]
    fn resolve_returns_first_covering_rule() {
        let registry = seeded_registry();
        assert_eq!(registry.resolve_tier(SOL / 25).unwrap().id, 1);
        assert_eq!(registry.resolve_tier(SOL / 20).unwrap().id, 1);
        assert_eq!(registry.resolve_tier(SOL / 20 + 1).unwrap().id, 2);
        assert_eq!(registry.resolve_tier(10 * SOL).unwrap().id, 2);
        assert_eq!(registry.resolve_tier(20 * SOL).unwrap().id, 3);
        assert_eq!(registry.resolve_tier(120 * SOL).unwrap().id, 4);
    }

    #[test]
    fn resolve_falls_back_to_last_rule() {
        let registry = seeded_registry();
        assert_eq!(registry.resolve_tier(130 * SOL).unwrap().id, 4);
        assert_eq!(registry.resolve_tier(u64::MAX).unwrap().id, 4);
    }

    #[test]
    fn resolve_fails_on_empty_registry() {
        let registry = RuleRegistry {
            latest_rule_id: 0,
            rules: Vec::new(),
            bump: 255,
        };
        let err = registry.resolve_tier(SOL).unwrap_err();
        assert_eq!(error_code(err), VatError::NoRulesConfigured as u32 + 6000);
        let err = registry.latest_id().unwrap_err();
        assert_eq!(error_code(err), VatError::NoRulesConfigured as u32 + 6000);
    }

    #[test]
    fn reset_clears_rules_and_id_counter() {
        let mut registry = seeded_registry();
        registry.reset();
        assert!(registry.rules.is_empty());
        assert_eq!(registry.latest_rule_id, 0);
        // Ids restart from 1 after a reset.
        assert_eq!(registry.append(SOL, 5, false, false).unwrap(), 1);
    }

    #[test]
    fn accrue_retained_accumulates_per_rule() {
        let mut registry = seeded_registry();
        registry.accrue_retained(3, 2_600_000_000).unwrap();
        registry.accrue_retained(3, 1_300_000_000).unwrap();
        registry.accrue_retained(4, 31_200_000_000).unwrap();
        assert_eq!(registry.rule(3).unwrap().retained_total, 3_900_000_000);
        assert_eq!(registry.rule(4).unwrap().retained_total, 31_200_000_000);
        assert_eq!(registry.rule(1).unwrap().retained_total, 0);
    }

    #[test]
    fn accrue_retained_unknown_rule_fails() {
        let mut registry = seeded_registry();
        let err = registry.accrue_retained(9, 1).unwrap_err();
        assert_eq!(error_code(err), VatError::RuleNotFound as u32 + 6000);
    }

    #[test]
    fn credit_returns_running_total() {
        let mut entry = LedgerEntry {
            recipient: Pubkey::new_unique(),
            tax_id: "A100200300".to_string(),
            total_received: 0,
            bump: 254,
        };
        assert_eq!(entry.credit(90 * SOL).unwrap(), 90 * SOL);
        assert_eq!(entry.credit(20 * SOL).unwrap(), 110 * SOL);
        assert_eq!(entry.total_received, 110 * SOL);
    }

    #[test]
    fn credit_overflow_is_rejected() {
        let mut entry = LedgerEntry {
            recipient: Pubkey::new_unique(),
            tax_id: String::new(),
            total_received: u64::MAX,
            bump: 254,
        };
        let err = entry.credit(1).unwrap_err();
        assert_eq!(error_code(err), VatError::ArithmeticError as u32 + 6000);
        assert_eq!(entry.total_received, u64::MAX);
    }

    fn empty_config() -> Config {
        Config {
            admin: Pubkey::new_unique(),
            maintenance: true,
            top_recipient: None,
            top_amount: 0,
            bump: 253,
        }
    }

    #[test]
    fn observe_tracks_greatest_cumulative_total() {
        let mut config = empty_config();
        let first = UserId {
            recipient: Pubkey::new_unique(),
            tax_id: "A100200300".to_string(),
        };
        let second = UserId {
            recipient: Pubkey::new_unique(),
            tax_id: "B100200300".to_string(),
        };

        config.observe_recipient(first.clone(), 90 * SOL);
        assert_eq!(config.top_recipient.as_ref(), Some(&first));

        config.observe_recipient(second.clone(), 110 * SOL);
        assert_eq!(config.top_recipient.as_ref(), Some(&second));
        assert_eq!(config.top_amount, 110 * SOL);
    }

    #[test]
    fn observe_keeps_incumbent_on_tie() {
        let mut config = empty_config();
        let first = UserId {
            recipient: Pubkey::new_unique(),
            tax_id: String::new(),
        };
        let challenger = UserId {
            recipient: Pubkey::new_unique(),
            tax_id: String::new(),
        };

        config.observe_recipient(first.clone(), 50 * SOL);
        config.observe_recipient(challenger, 50 * SOL);
        assert_eq!(config.top_recipient.as_ref(), Some(&first));
    }

    #[test]
    fn observe_ignores_smaller_totals() {
        let mut config = empty_config();
        let top = UserId {
            recipient: Pubkey::new_unique(),
            tax_id: String::new(),
        };
        config.observe_recipient(top.clone(), 110 * SOL);
        config.observe_recipient(
            UserId {
                recipient: Pubkey::new_unique(),
                tax_id: String::new(),
            },
            90 * SOL,
        );
        assert_eq!(config.top_recipient.as_ref(), Some(&top));
        assert_eq!(config.top_amount, 110 * SOL);
    }

    #[test]
    fn user_id_display_concatenates_tax_id_and_recipient() {
        let recipient = Pubkey::new_unique();
        let user_id = UserId {
            recipient,
            tax_id: "B100200300".to_string(),
        };
        assert_eq!(user_id.to_string(), format!("B100200300{recipient}"));

        let bare = UserId {
            recipient,
            tax_id: String::new(),
        };
        assert_eq!(bare.to_string(), recipient.to_string());
    }
}
