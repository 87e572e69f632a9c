use anchor_lang::prelude::*;

use crate::error::ErrorCode;

/// Single-owner gate for administrative instructions.
pub fn require_owner(owner: &Pubkey, caller: &Pubkey) -> Result<()> {
    require_keys_eq!(*caller, *owner, ErrorCode::Unauthorized);
    Ok(())
}

/// Hands the owner capability to `new_owner` and returns the previous owner.
pub fn transfer_ownership(owner: &mut Pubkey, caller: &Pubkey, new_owner: Pubkey) -> Result<Pubkey> {
    require_owner(owner, caller)?;
    require_keys_neq!(new_owner, Pubkey::default(), ErrorCode::InvalidOwner);
    Ok(std::mem::replace(owner, new_owner))
}
