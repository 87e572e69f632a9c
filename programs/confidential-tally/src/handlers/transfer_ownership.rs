use anchor_lang::prelude::*;

use crate::{state::OwnershipTransferred, ManageTally};

/// Hands the administrative capability to `new_owner`.
pub fn transfer_ownership(ctx: Context<ManageTally>, new_owner: Pubkey) -> Result<()> {
    let caller = ctx.accounts.owner.key();
    let previous_owner = ctx
        .accounts
        .tally_account
        .transfer_ownership(&caller, new_owner)?;

    msg!("Ownership transferred to {}", new_owner);

    emit!(OwnershipTransferred {
        tally: ctx.accounts.tally_account.key(),
        previous_owner,
        new_owner,
    });

    Ok(())
}
