use anchor_lang::prelude::*;

use crate::{
    fhe::SymbolicEngine,
    state::{FheOpsRequested, HistogramHandlesPublished, HistogramPublished},
    ManageTally,
};

/// Makes the aggregate counts publicly decryptable.
///
/// Only the owner can call this, once, after voting has closed. The counters
/// are frozen at that point, so only per-category sums ever become
/// decryptable. The coprocessor batch carrying the grants goes out first,
/// then one event per category and one with every handle.
pub fn publish_histogram(ctx: Context<ManageTally>) -> Result<()> {
    let caller = ctx.accounts.owner.key();
    let tally_key = ctx.accounts.tally_account.key();
    let tally = &mut ctx.accounts.tally_account;

    let mut engine = SymbolicEngine::new(tally_key, tally.input_verifier, &tally.counters);
    tally.publish_histogram(&mut engine, &caller)?;

    msg!("Publishing histogram with {} categories", tally.counters.len());

    emit!(FheOpsRequested {
        tally: tally_key,
        batch: engine.take_batch(),
    });
    for (category, handle) in (0..=u8::MAX).zip(&tally.counters) {
        emit!(HistogramPublished {
            tally: tally_key,
            category,
            handle: *handle,
        });
    }
    emit!(HistogramHandlesPublished {
        tally: tally_key,
        handles: tally.counters.clone(),
    });

    Ok(())
}
