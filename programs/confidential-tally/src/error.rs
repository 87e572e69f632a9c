use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("Category count must be between 1 and 255")]
    InvalidCategoryCount,
    #[msg("Caller is not the tally owner")]
    Unauthorized,
    #[msg("New owner must not be the null identity")]
    InvalidOwner,
    #[msg("Voting is closed")]
    VotingClosed,
    #[msg("Participant has already voted")]
    AlreadyVoted,
    #[msg("Voting is already closed")]
    AlreadyClosed,
    #[msg("Voting must be closed before publishing")]
    VotingNotClosed,
    #[msg("Histogram is already published")]
    AlreadyPublished,
    #[msg("Input proof is empty")]
    EmptyProof,
    #[msg("Input attestation failed")]
    AttestationFailed,
    #[msg("Ciphertext is not allowed for this program")]
    CiphertextNotAllowed,
    #[msg("Ciphertext has an unexpected encrypted type")]
    CiphertextTypeMismatch,
    #[msg("Stored counters do not match the category count")]
    CounterCountMismatch,
}
