use std::mem;

use anchor_lang::prelude::*;
use solana_secp256k1_recover::secp256k1_recover;
use solana_sha256_hasher::hashv;

use super::{
    Ebool, Encrypted, Euint32, Euint8, ExternalEuint8, FheEngine, FheType, FheTypeTag, Granted,
    Handle, InputContext,
};
use crate::constants::{ATTESTATION_LEN, FHE_OP_DOMAIN, INPUT_DOMAIN};
use crate::error::ErrorCode;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum FheOpcode {
    TrivialEncrypt,
    VerifyInput,
    Eq,
    Select,
    Add,
    AllowThis,
    MakePubliclyDecryptable,
}

/// What one instruction asked of the coprocessor.
///
/// Result handles are derived deterministically, so the coprocessor replays
/// the instruction itself and checks its replay against `transcript`. The
/// batch has the same size whatever the category count.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct FheOpBatch {
    /// Operations recorded, grants included
    pub op_count: u32,
    /// Ciphertexts made publicly decryptable
    pub public_grants: u32,
    /// External ciphertexts whose attestation was verified
    pub inputs: Vec<[u8; 32]>,
    /// sha256 chain over every (opcode, handle) in order
    pub transcript: [u8; 32],
}

/// On-chain engine in the coprocessor model.
///
/// Nothing is computed here: each operation derives its result handle from
/// its position and inputs, and is folded into the batch so the coprocessor
/// can evaluate it off-chain. An `Encrypted<T>` only comes out of an engine
/// call made during the current instruction, so holding one is the
/// transient permission. Persistent grants from earlier transactions are
/// the handles the tally account stores.
pub struct SymbolicEngine {
    contract: Pubkey,
    input_verifier: [u8; 64],
    /// Sorted
    persisted: Vec<Handle>,
    batch: FheOpBatch,
}

impl SymbolicEngine {
    pub fn new(contract: Pubkey, input_verifier: [u8; 64], persisted: &[[u8; 32]]) -> Self {
        let mut persisted: Vec<Handle> = persisted.iter().copied().map(Handle).collect();
        persisted.sort_unstable();
        Self {
            contract,
            input_verifier,
            persisted,
            batch: FheOpBatch::default(),
        }
    }

    /// Drains the batch recorded so far.
    pub fn take_batch(&mut self) -> FheOpBatch {
        mem::take(&mut self.batch)
    }

    fn derive(
        &self,
        opcode: FheOpcode,
        operands: &[Handle],
        scalar: Option<u64>,
        tag: FheTypeTag,
    ) -> Handle {
        let op_index = self.batch.op_count.to_le_bytes();
        let opcode_byte = [opcode as u8];
        let scalar_bytes = scalar.unwrap_or_default().to_le_bytes();
        let digest = hashv(&[
            FHE_OP_DOMAIN,
            self.contract.as_ref(),
            op_index.as_slice(),
            opcode_byte.as_slice(),
            operand(operands, 0),
            operand(operands, 1),
            operand(operands, 2),
            scalar_bytes.as_slice(),
        ]);
        Handle::tagged(digest.to_bytes(), tag)
    }

    fn log(&mut self, opcode: FheOpcode, handle: &Handle) {
        let opcode_byte = [opcode as u8];
        self.batch.transcript = hashv(&[
            self.batch.transcript.as_slice(),
            opcode_byte.as_slice(),
            handle.0.as_slice(),
        ])
        .to_bytes();
        self.batch.op_count += 1;
    }

    fn record<T: FheType>(
        &mut self,
        opcode: FheOpcode,
        operands: &[Handle],
        scalar: Option<u64>,
    ) -> Result<Encrypted<T>> {
        let result = self.derive(opcode, operands, scalar, T::TAG);
        self.log(opcode, &result);
        Encrypted::checked(result)
    }
}

// Operand counts are fixed per opcode, so absent operands hash as empty.
fn operand(operands: &[Handle], index: usize) -> &[u8] {
    operands
        .get(index)
        .map_or(&[][..], |handle| handle.0.as_slice())
}

/// Digest the input verifier signs to attest `handle` for `context`.
pub fn attestation_digest(handle: &Handle, context: &InputContext) -> [u8; 32] {
    hashv(&[
        INPUT_DOMAIN,
        handle.0.as_slice(),
        context.contract.as_ref(),
        context.user.as_ref(),
    ])
    .to_bytes()
}

impl FheEngine for SymbolicEngine {
    fn as_euint32(&mut self, value: u32) -> Result<Euint32> {
        self.record(FheOpcode::TrivialEncrypt, &[], Some(u64::from(value)))
    }

    fn from_external(
        &mut self,
        input: ExternalEuint8,
        proof: &[u8],
        context: &InputContext,
    ) -> Result<Euint8> {
        let handle = input.handle();
        require_keys_eq!(context.contract, self.contract, ErrorCode::AttestationFailed);
        require!(
            handle.type_tag() == FheTypeTag::Uint8 as u8,
            ErrorCode::AttestationFailed
        );
        require!(proof.len() == ATTESTATION_LEN, ErrorCode::AttestationFailed);

        let (signature, recovery_id) = proof.split_at(64);
        let digest = attestation_digest(&handle, context);
        let signer = secp256k1_recover(&digest, recovery_id[0], signature)
            .map_err(|_| error!(ErrorCode::AttestationFailed))?;
        require!(
            signer.to_bytes() == self.input_verifier,
            ErrorCode::AttestationFailed
        );

        self.batch.inputs.push(handle.0);
        self.log(FheOpcode::VerifyInput, &handle);
        Encrypted::checked(handle)
    }

    fn eq_scalar(&mut self, lhs: &Euint8, rhs: u8) -> Result<Ebool> {
        self.record(FheOpcode::Eq, &[lhs.handle()], Some(u64::from(rhs)))
    }

    fn select(
        &mut self,
        condition: &Ebool,
        if_true: &Euint32,
        if_false: &Euint32,
    ) -> Result<Euint32> {
        self.record(
            FheOpcode::Select,
            &[condition.handle(), if_true.handle(), if_false.handle()],
            None,
        )
    }

    fn add(&mut self, lhs: &Euint32, rhs: &Euint32) -> Result<Euint32> {
        self.record(FheOpcode::Add, &[lhs.handle(), rhs.handle()], None)
    }

    fn allow_this<T: FheType>(&mut self, ciphertext: Encrypted<T>) -> Result<Granted<T>> {
        self.log(FheOpcode::AllowThis, &ciphertext.handle());
        Ok(Granted::new(ciphertext))
    }

    fn restore<T: FheType>(&mut self, handle: Handle) -> Result<Granted<T>> {
        require!(
            self.persisted.binary_search(&handle).is_ok(),
            ErrorCode::CiphertextNotAllowed
        );
        Ok(Granted::new(Encrypted::checked(handle)?))
    }

    fn make_publicly_decryptable<T: FheType>(&mut self, ciphertext: &Granted<T>) -> Result<()> {
        self.log(FheOpcode::MakePubliclyDecryptable, &ciphertext.handle());
        self.batch.public_grants += 1;
        Ok(())
    }
}
