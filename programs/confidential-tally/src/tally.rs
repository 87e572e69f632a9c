//! Encrypted per-category counters and the vote-application algorithm.

use anchor_lang::prelude::*;

use crate::constants::MAX_CATEGORIES;
use crate::error::ErrorCode;
use crate::fhe::{Euint8, ExternalEuint8, FheEngine, Granted, Handle, InputContext, Uint32};

/// One encrypted counter per category, each held with a persistent grant.
pub struct EncryptedTally {
    counters: Vec<Granted<Uint32>>,
}

/// Validates a requested category count and returns it as a length.
pub fn validate_category_count(requested: u16) -> Result<usize> {
    let count = usize::from(requested);
    require!(
        (1..=MAX_CATEGORIES).contains(&count),
        ErrorCode::InvalidCategoryCount
    );
    Ok(count)
}

impl EncryptedTally {
    /// Allocates `num_categories` counters, each its own encrypted zero.
    pub fn initialize<E: FheEngine>(engine: &mut E, num_categories: u16) -> Result<Self> {
        let count = validate_category_count(num_categories)?;
        let mut counters = Vec::with_capacity(count);
        for _ in 0..count {
            let zero = engine.as_euint32(0)?;
            counters.push(engine.allow_this(zero)?);
        }
        Ok(Self { counters })
    }

    /// Ingests an attested choice and adds it to the matching counter among
    /// those persisted in `stored`, returning the next tally.
    ///
    /// `stored` is only read, so a failure at any step leaves it as it was.
    pub fn apply_vote<E: FheEngine>(
        engine: &mut E,
        stored: &[[u8; 32]],
        choice: ExternalEuint8,
        proof: &[u8],
        context: &InputContext,
    ) -> Result<Self> {
        require!(!proof.is_empty(), ErrorCode::EmptyProof);
        let choice = engine.from_external(choice, proof, context)?;
        let counters = oblivious_increment(engine, &choice, stored)?;
        Ok(Self { counters })
    }

    /// Marks every persisted counter publicly decryptable.
    pub fn publish<E: FheEngine>(engine: &mut E, stored: &[[u8; 32]]) -> Result<()> {
        for bytes in stored {
            let counter = engine.restore::<Uint32>(Handle::from(*bytes))?;
            engine.make_publicly_decryptable(&counter)?;
        }
        Ok(())
    }

    pub fn handles(&self) -> Vec<Handle> {
        self.counters.iter().map(|counter| counter.handle()).collect()
    }

    /// Overwrites `stored` with these counters, reusing its allocation.
    pub fn write_to(&self, stored: &mut Vec<[u8; 32]>) {
        stored.clear();
        stored.extend(self.counters.iter().map(|counter| counter.handle().to_bytes()));
    }

    pub fn len(&self) -> usize {
        self.counters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }
}

/// Adds `select(choice == i, 1, 0)` to every counter `i`.
///
/// Every counter goes through the same restore/eq/select/add/grant sequence,
/// so the work done never depends on the encrypted choice. Results land in a
/// fresh vector that the caller commits only once all of them are granted.
fn oblivious_increment<E: FheEngine>(
    engine: &mut E,
    choice: &Euint8,
    stored: &[[u8; 32]],
) -> Result<Vec<Granted<Uint32>>> {
    let one = engine.as_euint32(1)?;
    let zero = engine.as_euint32(0)?;

    let mut next = Vec::with_capacity(stored.len());
    for (category, bytes) in (0..=u8::MAX).zip(stored) {
        let counter = engine.restore::<Uint32>(Handle::from(*bytes))?;
        let is_this = engine.eq_scalar(choice, category)?;
        let add_one = engine.select(&is_this, &one, &zero)?;
        let sum = engine.add(&counter, &add_one)?;
        next.push(engine.allow_this(sum)?);
    }
    Ok(next)
}
