use anchor_lang::prelude::*;

use crate::error::ErrorCode;

/// Tally lifecycle. Moves strictly forward: `Open -> Closed -> Published`.
#[derive(AnchorSerialize, AnchorDeserialize, InitSpace, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    Open,
    Closed,
    Published,
}

impl Lifecycle {
    pub fn require_accepting_votes(self) -> Result<()> {
        match self {
            Lifecycle::Open => Ok(()),
            Lifecycle::Closed | Lifecycle::Published => err!(ErrorCode::VotingClosed),
        }
    }

    pub fn close(self) -> Result<Self> {
        match self {
            Lifecycle::Open => Ok(Lifecycle::Closed),
            Lifecycle::Closed | Lifecycle::Published => err!(ErrorCode::AlreadyClosed),
        }
    }

    pub fn publish(self) -> Result<Self> {
        match self {
            Lifecycle::Closed => Ok(Lifecycle::Published),
            Lifecycle::Open => err!(ErrorCode::VotingNotClosed),
            Lifecycle::Published => err!(ErrorCode::AlreadyPublished),
        }
    }

    pub fn is_open(self) -> bool {
        self == Lifecycle::Open
    }

    pub fn is_published(self) -> bool {
        self == Lifecycle::Published
    }
}
