use anchor_lang::prelude::*;

use crate::access;
use crate::error::ErrorCode;
use crate::fhe::{ExternalEuint8, FheEngine, Handle, InputContext};
use crate::lifecycle::Lifecycle;
use crate::state::VoterRecord;
use crate::tally::EncryptedTally;

/// A confidential tally: encrypted per-category counters plus the state
/// that governs who may touch them and when.
#[account]
#[derive(InitSpace)]
pub struct TallyAccount {
    /// PDA bump seed
    pub bump: u8,
    /// Creator-chosen identifier, part of the PDA seeds
    pub id: u32,
    /// Account that created the tally, part of the PDA seeds
    pub creator: Pubkey,
    /// Holder of the administrative capability
    pub owner: Pubkey,
    /// Uncompressed secp256k1 key (without prefix) that attests voter inputs
    pub input_verifier: [u8; 64],
    pub lifecycle: Lifecycle,
    /// Fixed at initialization, 1..=255
    pub num_categories: u8,
    /// Counter handles, one per category, each granted to this program
    #[max_len(255)]
    pub counters: Vec<[u8; 32]>,
}

impl TallyAccount {
    pub fn initialize<E: FheEngine>(
        &mut self,
        engine: &mut E,
        owner: Pubkey,
        num_categories: u16,
        input_verifier: [u8; 64],
    ) -> Result<()> {
        let tally = EncryptedTally::initialize(engine, num_categories)?;

        self.owner = owner;
        self.input_verifier = input_verifier;
        self.lifecycle = Lifecycle::Open;
        self.num_categories =
            u8::try_from(tally.len()).map_err(|_| error!(ErrorCode::InvalidCategoryCount))?;
        tally.write_to(&mut self.counters);
        Ok(())
    }

    /// Applies one participant's encrypted choice.
    ///
    /// The registry entry is committed only after the counters are updated.
    pub fn cast_vote<E: FheEngine>(
        &mut self,
        engine: &mut E,
        voter: &mut VoterRecord,
        choice: ExternalEuint8,
        proof: &[u8],
        context: &InputContext,
    ) -> Result<()> {
        self.lifecycle.require_accepting_votes()?;
        require!(!voter.has_voted(), ErrorCode::AlreadyVoted);

        let next =
            EncryptedTally::apply_vote(engine, self.stored_counters()?, choice, proof, context)?;

        next.write_to(&mut self.counters);
        voter.mark_voted();
        Ok(())
    }

    pub fn close_voting(&mut self, caller: &Pubkey) -> Result<()> {
        access::require_owner(&self.owner, caller)?;
        self.lifecycle = self.lifecycle.close()?;
        Ok(())
    }

    /// Makes every counter publicly decryptable. The counters themselves
    /// stay as they are, so `histogram_handles` names what was published.
    pub fn publish_histogram<E: FheEngine>(&mut self, engine: &mut E, caller: &Pubkey) -> Result<()> {
        access::require_owner(&self.owner, caller)?;
        let next = self.lifecycle.publish()?;

        EncryptedTally::publish(engine, self.stored_counters()?)?;
        self.lifecycle = next;
        Ok(())
    }

    pub fn transfer_ownership(&mut self, caller: &Pubkey, new_owner: Pubkey) -> Result<Pubkey> {
        access::transfer_ownership(&mut self.owner, caller, new_owner)
    }

    pub fn histogram_handles(&self) -> Vec<Handle> {
        self.counters.iter().copied().map(Handle::from).collect()
    }

    pub fn categories_count(&self) -> u8 {
        self.num_categories
    }

    pub fn voting_open(&self) -> bool {
        self.lifecycle.is_open()
    }

    pub fn histogram_published(&self) -> bool {
        self.lifecycle.is_published()
    }

    fn stored_counters(&self) -> Result<&[[u8; 32]]> {
        require_eq!(
            self.counters.len(),
            usize::from(self.num_categories),
            ErrorCode::CounterCountMismatch
        );
        Ok(&self.counters)
    }
}
