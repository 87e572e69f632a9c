use anchor_lang::prelude::*;

use crate::{HasVoted, ReadTally, VoterRecord};

/// Current counter handles. Readable at any time; decryptable only once published.
pub fn get_histogram_handles(ctx: Context<ReadTally>) -> Result<Vec<[u8; 32]>> {
    Ok(ctx
        .accounts
        .tally_account
        .histogram_handles()
        .into_iter()
        .map(|handle| handle.to_bytes())
        .collect())
}

pub fn categories_count(ctx: Context<ReadTally>) -> Result<u8> {
    Ok(ctx.accounts.tally_account.categories_count())
}

pub fn voting_open(ctx: Context<ReadTally>) -> Result<bool> {
    Ok(ctx.accounts.tally_account.voting_open())
}

pub fn histogram_published(ctx: Context<ReadTally>) -> Result<bool> {
    Ok(ctx.accounts.tally_account.histogram_published())
}

/// Whether `voter` has cast an accepted vote, read from their registry
/// record. The record must sit at the seeded address, so the answer cannot
/// be forged by passing another account or leaving it out.
pub fn has_voted(ctx: Context<HasVoted>, _voter: Pubkey) -> Result<bool> {
    let record = &ctx.accounts.voter_record;
    let data = record.try_borrow_data()?;
    VoterRecord::voted_in(record.owner, &data[..])
}
