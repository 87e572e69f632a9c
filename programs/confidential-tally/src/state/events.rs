use anchor_lang::prelude::*;

use crate::fhe::FheOpBatch;

#[event]
pub struct TallyInitialized {
    pub tally: Pubkey,
    pub owner: Pubkey,
    pub num_categories: u8,
}

#[event]
pub struct VoteAccepted {
    pub tally: Pubkey,
    pub voter: Pubkey,
}

#[event]
pub struct VotingClosed {
    pub tally: Pubkey,
    pub closed_by: Pubkey,
}

#[event]
pub struct HistogramPublished {
    pub tally: Pubkey,
    pub category: u8,
    /// Publicly decryptable counter handle
    pub handle: [u8; 32],
}

/// All counter handles in one record, so observers need a single lookup.
#[event]
pub struct HistogramHandlesPublished {
    pub tally: Pubkey,
    pub handles: Vec<[u8; 32]>,
}

#[event]
pub struct OwnershipTransferred {
    pub tally: Pubkey,
    pub previous_owner: Pubkey,
    pub new_owner: Pubkey,
}

/// Work for the coprocessor to replay off-chain. Emitted first, and of
/// constant size, so it always fits in the transaction's log.
#[event]
pub struct FheOpsRequested {
    pub tally: Pubkey,
    pub batch: FheOpBatch,
}
