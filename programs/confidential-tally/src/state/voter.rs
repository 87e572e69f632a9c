use anchor_lang::prelude::*;

/// Voter registry entry for one participant of one tally.
///
/// Participation is public; the choice never is.
#[account]
#[derive(InitSpace)]
pub struct VoterRecord {
    /// PDA bump seed
    pub bump: u8,
    /// Tally this record belongs to
    pub tally: Pubkey,
    /// Participant identity
    pub voter: Pubkey,
    /// Set once an accepted vote is committed, never cleared
    pub voted: bool,
}

impl VoterRecord {
    pub fn has_voted(&self) -> bool {
        self.voted
    }

    /// Final commit step of an accepted vote; callers validate beforehand.
    pub fn mark_voted(&mut self) {
        self.voted = true;
    }

    /// Reads participation from a registry account's raw state. A record
    /// that was never created means no vote.
    pub fn voted_in(owner: &Pubkey, mut data: &[u8]) -> Result<bool> {
        if owner != &crate::ID || data.is_empty() {
            return Ok(false);
        }
        Ok(Self::try_deserialize(&mut data)?.has_voted())
    }
}
