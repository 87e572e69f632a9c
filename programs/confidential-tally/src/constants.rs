// PDA seeds
pub const TALLY_SEED: &[u8] = b"tally";
pub const VOTER_SEED: &[u8] = b"voter";

/// Upper bound on the category count; a category index always fits in one byte.
pub const MAX_CATEGORIES: usize = u8::MAX as usize;

// Domain separators for handle derivation and input attestation digests
pub const FHE_OP_DOMAIN: &[u8] = b"confidential-tally/fhe-op";
pub const INPUT_DOMAIN: &[u8] = b"confidential-tally/input";

/// Attestation layout: 64-byte compact secp256k1 signature followed by the recovery id.
pub const ATTESTATION_LEN: usize = 65;
