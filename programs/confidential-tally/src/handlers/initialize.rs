use anchor_lang::prelude::*;

use crate::{
    fhe::SymbolicEngine,
    state::{FheOpsRequested, TallyInitialized},
    Initialize,
};

/// Creates a confidential tally with `num_categories` encrypted counters.
///
/// The creator becomes the owner. Every counter starts as an encrypted zero
/// granted to this program, so later votes can build on it.
///
/// # Arguments
/// * `id` - Creator-chosen identifier (used for PDA derivation)
/// * `num_categories` - Number of categories, 1..=255
/// * `input_verifier` - secp256k1 key whose signatures attest voter ciphertexts
pub fn initialize(
    ctx: Context<Initialize>,
    id: u32,
    num_categories: u16,
    input_verifier: [u8; 64],
) -> Result<()> {
    msg!("Creating tally {} with {} categories", id, num_categories);

    let tally_key = ctx.accounts.tally_account.key();
    let owner = ctx.accounts.payer.key();
    let mut engine = SymbolicEngine::new(tally_key, input_verifier, &[]);

    let tally = &mut ctx.accounts.tally_account;
    tally.bump = ctx.bumps.tally_account;
    tally.id = id;
    tally.creator = owner;
    tally.initialize(&mut engine, owner, num_categories, input_verifier)?;

    emit!(FheOpsRequested {
        tally: tally_key,
        batch: engine.take_batch(),
    });
    emit!(TallyInitialized {
        tally: tally_key,
        owner,
        num_categories: tally.num_categories,
    });

    Ok(())
}
