use anchor_lang::prelude::*;

use crate::{
    fhe::{ExternalEuint8, InputContext, SymbolicEngine},
    state::{FheOpsRequested, VoteAccepted},
    Vote,
};

/// Submits an encrypted category choice.
///
/// The choice is ingested only with a valid attestation bound to this tally
/// and this voter, then added to the counters without ever being decrypted.
/// The voter's registry entry flips to voted once the counters are updated.
///
/// # Arguments
/// * `encrypted_choice` - Handle of the voter's encrypted category index
/// * `proof` - Attestation for `encrypted_choice`, must be non-empty
pub fn vote(ctx: Context<Vote>, encrypted_choice: [u8; 32], proof: Vec<u8>) -> Result<()> {
    let tally_key = ctx.accounts.tally_account.key();
    let voter_key = ctx.accounts.voter.key();
    let context = InputContext {
        contract: tally_key,
        user: voter_key,
    };

    let record = &mut ctx.accounts.voter_record;
    if !record.has_voted() {
        record.bump = ctx.bumps.voter_record;
        record.tally = tally_key;
        record.voter = voter_key;
    }

    let tally = &mut ctx.accounts.tally_account;
    let mut engine = SymbolicEngine::new(tally_key, tally.input_verifier, &tally.counters);
    tally.cast_vote(
        &mut engine,
        record,
        ExternalEuint8::from(encrypted_choice),
        &proof,
        &context,
    )?;

    msg!("Vote accepted from {}", voter_key);

    emit!(FheOpsRequested {
        tally: tally_key,
        batch: engine.take_batch(),
    });
    emit!(VoteAccepted {
        tally: tally_key,
        voter: voter_key,
    });

    Ok(())
}
