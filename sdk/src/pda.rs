//! Program Derived Address (PDA) computation utilities

use crate::{error::Result, program_id_string};
use anchor_lang::prelude::Pubkey;

/// Compute the Config PDA
///
/// # Returns
/// * `Ok((Pubkey, u8))` - The PDA address and bump seed
///
/// # Errors
/// Returns an error if the program ID cannot be parsed
pub fn config() -> Result<(Pubkey, u8)> {
    let program_id = program_id_string().parse()?;
    Ok(config_with_program_id(&program_id))
}

/// Compute the Config PDA address only (without bump)
///
/// # Returns
/// * `Ok(Pubkey)` - The config PDA address
/// * `Err(VatSdkError)` - If the program ID cannot be parsed
pub fn config_address() -> Result<Pubkey> {
    let program_id = program_id_string().parse()?;
    Ok(config_address_with_program_id(&program_id))
}

/// Compute the Config PDA with custom program ID
///
/// # Arguments
/// * `program_id` - The program ID to use for PDA computation
///
/// # Returns
/// * `(Pubkey, u8)` - The PDA address and bump seed
#[must_use]
pub fn config_with_program_id(program_id: &Pubkey) -> (Pubkey, u8) {
    let seeds = &[b"config" as &[u8]];
    Pubkey::find_program_address(seeds, program_id)
}

/// Compute the Config PDA address only (without bump) with custom program ID
///
/// # Arguments
/// * `program_id` - The program ID to use for PDA computation
///
/// # Returns
/// * `Pubkey` - The config PDA address
#[must_use]
pub fn config_address_with_program_id(program_id: &Pubkey) -> Pubkey {
    config_with_program_id(program_id).0
}

/// Compute the `RuleRegistry` PDA
///
/// # Returns
/// * `Ok((Pubkey, u8))` - The PDA address and bump seed
///
/// # Errors
/// Returns an error if the program ID cannot be parsed
pub fn rule_registry() -> Result<(Pubkey, u8)> {
    let program_id = program_id_string().parse()?;
    Ok(rule_registry_with_program_id(&program_id))
}

/// Compute the `RuleRegistry` PDA address only (without bump)
///
/// # Returns
/// * `Ok(Pubkey)` - The registry PDA address
/// * `Err(VatSdkError)` - If the program ID cannot be parsed
pub fn rule_registry_address() -> Result<Pubkey> {
    let program_id = program_id_string().parse()?;
    Ok(rule_registry_address_with_program_id(&program_id))
}

/// Compute the `RuleRegistry` PDA with custom program ID
///
/// # Arguments
/// * `program_id` - The program ID to use for PDA computation
///
/// # Returns
/// * `(Pubkey, u8)` - The PDA address and bump seed
#[must_use]
pub fn rule_registry_with_program_id(program_id: &Pubkey) -> (Pubkey, u8) {
    let seeds = &[b"registry" as &[u8]];
    Pubkey::find_program_address(seeds, program_id)
}

/// Compute the `RuleRegistry` PDA address only (without bump) with custom program ID
///
/// # Arguments
/// * `program_id` - The program ID to use for PDA computation
///
/// # Returns
/// * `Pubkey` - The registry PDA address
#[must_use]
pub fn rule_registry_address_with_program_id(program_id: &Pubkey) -> Pubkey {
    rule_registry_with_program_id(program_id).0
}

/// Compute the Treasury PDA
///
/// The treasury is a data-less system account holding retained VAT until the
/// administrator withdraws it.
///
/// # Returns
/// * `Ok((Pubkey, u8))` - The PDA address and bump seed
///
/// # Errors
/// Returns an error if the program ID cannot be parsed
pub fn treasury() -> Result<(Pubkey, u8)> {
    let program_id = program_id_string().parse()?;
    Ok(treasury_with_program_id(&program_id))
}

/// Compute the Treasury PDA address only (without bump)
///
/// # Returns
/// * `Ok(Pubkey)` - The treasury PDA address
/// * `Err(VatSdkError)` - If the program ID cannot be parsed
pub fn treasury_address() -> Result<Pubkey> {
    let program_id = program_id_string().parse()?;
    Ok(treasury_address_with_program_id(&program_id))
}

/// Compute the Treasury PDA with custom program ID
///
/// # Arguments
/// * `program_id` - The program ID to use for PDA computation
///
/// # Returns
/// * `(Pubkey, u8)` - The PDA address and bump seed
#[must_use]
pub fn treasury_with_program_id(program_id: &Pubkey) -> (Pubkey, u8) {
    let seeds = &[b"treasury" as &[u8]];
    Pubkey::find_program_address(seeds, program_id)
}

/// Compute the Treasury PDA address only (without bump) with custom program ID
///
/// # Arguments
/// * `program_id` - The program ID to use for PDA computation
///
/// # Returns
/// * `Pubkey` - The treasury PDA address
#[must_use]
pub fn treasury_address_with_program_id(program_id: &Pubkey) -> Pubkey {
    treasury_with_program_id(program_id).0
}

/// Compute the `LedgerEntry` PDA
///
/// The ledger key is the pair of recipient and tax id. A missing tax id and
/// an empty one address the same entry, matching the program's seed
/// normalization.
///
/// # Arguments
/// * `recipient` - The recipient's pubkey
/// * `tax_id` - The recipient's tax id, if any
///
/// # Returns
/// * `Ok((Pubkey, u8))` - The PDA address and bump seed
///
/// # Errors
/// Returns an error if the program ID cannot be parsed
pub fn ledger_entry(recipient: &Pubkey, tax_id: Option<&str>) -> Result<(Pubkey, u8)> {
    let program_id = program_id_string().parse()?;
    Ok(ledger_entry_with_program_id(recipient, tax_id, &program_id))
}

/// Compute the `LedgerEntry` PDA address only (without bump)
///
/// # Arguments
/// * `recipient` - The recipient's pubkey
/// * `tax_id` - The recipient's tax id, if any
///
/// # Returns
/// * `Ok(Pubkey)` - The PDA address
/// * `Err(VatSdkError)` - If the program ID cannot be parsed
pub fn ledger_entry_address(recipient: &Pubkey, tax_id: Option<&str>) -> Result<Pubkey> {
    let program_id = program_id_string().parse()?;
    Ok(ledger_entry_address_with_program_id(
        recipient,
        tax_id,
        &program_id,
    ))
}

/// Compute the `LedgerEntry` PDA with custom program ID
///
/// # Arguments
/// * `recipient` - The recipient's pubkey
/// * `tax_id` - The recipient's tax id, if any
/// * `program_id` - The program ID to use for PDA computation
///
/// # Returns
/// * `(Pubkey, u8)` - The PDA address and bump seed
#[must_use]
pub fn ledger_entry_with_program_id(
    recipient: &Pubkey,
    tax_id: Option<&str>,
    program_id: &Pubkey,
) -> (Pubkey, u8) {
    let tax_id = tax_id.unwrap_or("");
    let seeds = &[b"ledger", recipient.as_ref(), tax_id.as_bytes()];
    Pubkey::find_program_address(seeds, program_id)
}

/// Compute the `LedgerEntry` PDA address only (without bump) with custom program ID
///
/// # Arguments
/// * `recipient` - The recipient's pubkey
/// * `tax_id` - The recipient's tax id, if any
/// * `program_id` - The program ID to use for PDA computation
///
/// # Returns
/// * `Pubkey` - The PDA address
#[must_use]
pub fn ledger_entry_address_with_program_id(
    recipient: &Pubkey,
    tax_id: Option<&str>,
    program_id: &Pubkey,
) -> Pubkey {
    ledger_entry_with_program_id(recipient, tax_id, program_id).0
}
