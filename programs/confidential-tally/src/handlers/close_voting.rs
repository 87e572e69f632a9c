use anchor_lang::prelude::*;

use crate::{state::VotingClosed, ManageTally};

/// Stops accepting votes. Owner only, and only while voting is open.
pub fn close_voting(ctx: Context<ManageTally>) -> Result<()> {
    let caller = ctx.accounts.owner.key();
    ctx.accounts.tally_account.close_voting(&caller)?;

    msg!("Voting closed by {}", caller);

    emit!(VotingClosed {
        tally: ctx.accounts.tally_account.key(),
        closed_by: caller,
    });

    Ok(())
}
