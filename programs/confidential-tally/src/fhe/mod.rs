//! Boundary to the homomorphic-encryption engine.
//!
//! The program never sees plaintext. It holds 32-byte handles to ciphertexts
//! and asks an [`FheEngine`] to combine them. Every ciphertext the program
//! wants to keep across transactions must carry a [`Granted`] capability,
//! which only an engine can mint.

use std::marker::PhantomData;
use std::ops::Deref;

use anchor_lang::prelude::*;

use crate::error::ErrorCode;

pub mod coprocessor;
#[cfg(test)]
pub mod plaintext;

pub use coprocessor::{FheOpBatch, FheOpcode, SymbolicEngine};

/// Encrypted type carried in the last byte of every handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum FheTypeTag {
    Bool = 0,
    Uint8 = 2,
    Uint32 = 4,
}

/// Stable external identifier of a ciphertext.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Handle(pub [u8; 32]);

impl Handle {
    pub(crate) fn tagged(mut bytes: [u8; 32], tag: FheTypeTag) -> Self {
        bytes[31] = tag as u8;
        Self(bytes)
    }

    pub fn to_bytes(self) -> [u8; 32] {
        self.0
    }

    pub fn type_tag(&self) -> u8 {
        self.0[31]
    }
}

impl From<[u8; 32]> for Handle {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

pub trait FheType: Copy {
    const TAG: FheTypeTag;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bool;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Uint8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Uint32;

impl FheType for Bool {
    const TAG: FheTypeTag = FheTypeTag::Bool;
}

impl FheType for Uint8 {
    const TAG: FheTypeTag = FheTypeTag::Uint8;
}

impl FheType for Uint32 {
    const TAG: FheTypeTag = FheTypeTag::Uint32;
}

/// A typed ciphertext handle produced by an engine during the current transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Encrypted<T> {
    handle: Handle,
    ty: PhantomData<T>,
}

impl<T: FheType> Encrypted<T> {
    fn checked(handle: Handle) -> Result<Self> {
        require_eq!(
            handle.type_tag(),
            T::TAG as u8,
            ErrorCode::CiphertextTypeMismatch
        );
        Ok(Self {
            handle,
            ty: PhantomData,
        })
    }

    pub fn handle(&self) -> Handle {
        self.handle
    }
}

pub type Ebool = Encrypted<Bool>;
pub type Euint8 = Encrypted<Uint8>;
pub type Euint32 = Encrypted<Uint32>;

/// Untrusted ciphertext handle supplied by a caller, usable only after
/// [`FheEngine::from_external`] has checked its attestation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExternalEuint8(Handle);

impl ExternalEuint8 {
    pub fn handle(&self) -> Handle {
        self.0
    }
}

impl From<[u8; 32]> for ExternalEuint8 {
    fn from(bytes: [u8; 32]) -> Self {
        Self(Handle(bytes))
    }
}

/// Capability token: the program holds a persistent permission on this ciphertext.
#[derive(Debug, PartialEq, Eq)]
pub struct Granted<T> {
    inner: Encrypted<T>,
}

impl<T> Granted<T> {
    fn new(inner: Encrypted<T>) -> Self {
        Self { inner }
    }
}

impl<T> Deref for Granted<T> {
    type Target = Encrypted<T>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

/// Public context an input attestation must be bound to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputContext {
    /// Account whose state the input is meant for.
    pub contract: Pubkey,
    /// Identity submitting the input.
    pub user: Pubkey,
}

/// Homomorphic operations the tally relies on.
///
/// Operands must be allowed for the program, either transiently (produced
/// earlier in the same transaction) or persistently (granted via
/// [`FheEngine::allow_this`]). Results are transiently allowed.
pub trait FheEngine {
    /// Trivially encrypts a public constant.
    fn as_euint32(&mut self, value: u32) -> Result<Euint32>;

    /// Validated ingestion of an external ciphertext. Fails closed with
    /// `AttestationFailed` when `proof` does not bind `input` to `context`.
    fn from_external(
        &mut self,
        input: ExternalEuint8,
        proof: &[u8],
        context: &InputContext,
    ) -> Result<Euint8>;

    fn eq_scalar(&mut self, lhs: &Euint8, rhs: u8) -> Result<Ebool>;

    fn select(
        &mut self,
        condition: &Ebool,
        if_true: &Euint32,
        if_false: &Euint32,
    ) -> Result<Euint32>;

    fn add(&mut self, lhs: &Euint32, rhs: &Euint32) -> Result<Euint32>;

    /// Grants the program a persistent permission on `ciphertext`.
    fn allow_this<T: FheType>(&mut self, ciphertext: Encrypted<T>) -> Result<Granted<T>>;

    /// Reacquires the capability for a handle granted in an earlier transaction.
    fn restore<T: FheType>(&mut self, handle: Handle) -> Result<Granted<T>>;

    /// One-way grant letting anyone request decryption of `ciphertext`.
    fn make_publicly_decryptable<T: FheType>(&mut self, ciphertext: &Granted<T>) -> Result<()>;
}
