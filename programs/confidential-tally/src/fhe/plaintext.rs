//! Plaintext oracle used by tests: same permission rules as the on-chain
//! engine, but every handle maps to a known value.

use std::collections::{HashMap, HashSet};

use anchor_lang::prelude::*;
use solana_sha256_hasher::hashv;

use super::{
    Ebool, Encrypted, Euint32, Euint8, ExternalEuint8, FheEngine, FheType, FheTypeTag, Granted,
    Handle, InputContext,
};
use crate::error::ErrorCode;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OpCounts {
    pub trivial: u64,
    pub eq: u64,
    pub select: u64,
    pub add: u64,
}

struct IssuedInput {
    value: u8,
    context: InputContext,
    proof: Vec<u8>,
}

#[derive(Default)]
pub struct PlaintextEngine {
    values: HashMap<Handle, u64>,
    inputs: HashMap<Handle, IssuedInput>,
    persistent: HashSet<Handle>,
    transient: HashSet<Handle>,
    public: HashSet<Handle>,
    next_id: u64,
    counts: OpCounts,
    fail_add_at: Option<u64>,
}

impl PlaintextEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Client-side encryption of a choice, attested for `context`.
    pub fn encrypt_input(&mut self, value: u8, context: &InputContext) -> (ExternalEuint8, Vec<u8>) {
        let handle = self.next_handle(FheTypeTag::Uint8);
        let proof = hashv(&[
            b"plaintext-input".as_slice(),
            handle.0.as_slice(),
            context.contract.as_ref(),
            context.user.as_ref(),
        ])
        .to_bytes()
        .to_vec();
        self.inputs.insert(
            handle,
            IssuedInput {
                value,
                context: *context,
                proof: proof.clone(),
            },
        );
        (ExternalEuint8(handle), proof)
    }

    /// Transaction boundary: transient permissions do not survive it.
    pub fn end_transaction(&mut self) {
        self.transient.clear();
    }

    pub fn decrypt(&self, handle: &Handle) -> u64 {
        self.values[handle]
    }

    pub fn public_decrypt(&self, handle: &Handle) -> Option<u64> {
        self.public
            .contains(handle)
            .then(|| self.values[handle])
    }

    pub fn counts(&self) -> OpCounts {
        self.counts
    }

    pub fn reset_counts(&mut self) {
        self.counts = OpCounts::default();
    }

    pub fn is_persisted(&self, handle: &Handle) -> bool {
        self.persistent.contains(handle)
    }

    /// Makes the `nth` addition from now on fail (1-based).
    pub fn fail_add_at(&mut self, nth: u64) {
        self.fail_add_at = Some(self.counts.add + nth);
    }

    fn next_handle(&mut self, tag: FheTypeTag) -> Handle {
        self.next_id += 1;
        let mut bytes = [0u8; 32];
        bytes[..8].copy_from_slice(&self.next_id.to_le_bytes());
        Handle::tagged(bytes, tag)
    }

    fn mint<T: FheType>(&mut self, value: u64) -> Result<Encrypted<T>> {
        let handle = self.next_handle(T::TAG);
        self.values.insert(handle, value);
        self.transient.insert(handle);
        Encrypted::checked(handle)
    }

    fn value_of<T: FheType>(&self, ciphertext: &Encrypted<T>) -> Result<u64> {
        let handle = ciphertext.handle();
        require!(
            self.transient.contains(&handle) || self.persistent.contains(&handle),
            ErrorCode::CiphertextNotAllowed
        );
        Ok(self.values[&handle])
    }
}

impl FheEngine for PlaintextEngine {
    fn as_euint32(&mut self, value: u32) -> Result<Euint32> {
        self.counts.trivial += 1;
        self.mint(u64::from(value))
    }

    fn from_external(
        &mut self,
        input: ExternalEuint8,
        proof: &[u8],
        context: &InputContext,
    ) -> Result<Euint8> {
        let handle = input.handle();
        let issued = self
            .inputs
            .get(&handle)
            .ok_or(error!(ErrorCode::AttestationFailed))?;
        require!(
            issued.context == *context && issued.proof == proof,
            ErrorCode::AttestationFailed
        );
        self.values.insert(handle, u64::from(issued.value));
        self.transient.insert(handle);
        Encrypted::checked(handle)
    }

    fn eq_scalar(&mut self, lhs: &Euint8, rhs: u8) -> Result<Ebool> {
        self.counts.eq += 1;
        let lhs = self.value_of(lhs)?;
        self.mint(u64::from(lhs == u64::from(rhs)))
    }

    fn select(
        &mut self,
        condition: &Ebool,
        if_true: &Euint32,
        if_false: &Euint32,
    ) -> Result<Euint32> {
        self.counts.select += 1;
        let condition = self.value_of(condition)?;
        let if_true = self.value_of(if_true)?;
        let if_false = self.value_of(if_false)?;
        self.mint(if condition != 0 { if_true } else { if_false })
    }

    fn add(&mut self, lhs: &Euint32, rhs: &Euint32) -> Result<Euint32> {
        self.counts.add += 1;
        require!(
            self.fail_add_at != Some(self.counts.add),
            ErrorCode::CiphertextNotAllowed
        );
        let lhs = self.value_of(lhs)? as u32;
        let rhs = self.value_of(rhs)? as u32;
        self.mint(u64::from(lhs.wrapping_add(rhs)))
    }

    fn allow_this<T: FheType>(&mut self, ciphertext: Encrypted<T>) -> Result<Granted<T>> {
        self.value_of(&ciphertext)?;
        self.persistent.insert(ciphertext.handle());
        Ok(Granted::new(ciphertext))
    }

    fn restore<T: FheType>(&mut self, handle: Handle) -> Result<Granted<T>> {
        require!(
            self.persistent.contains(&handle),
            ErrorCode::CiphertextNotAllowed
        );
        Ok(Granted::new(Encrypted::checked(handle)?))
    }

    fn make_publicly_decryptable<T: FheType>(&mut self, ciphertext: &Granted<T>) -> Result<()> {
        self.value_of::<T>(ciphertext)?;
        self.public.insert(ciphertext.handle());
        Ok(())
    }
}
