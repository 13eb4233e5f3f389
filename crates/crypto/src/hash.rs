//! Domain-separated Keccak-256 hashing.
//!
//! A single hash function serves four distinct protocol roles, kept
//! apart by one-byte domain prefixes:
//!
//! - `0x1`: prepended to the identity preimage before hash-to-curve
//!   (consumed by the hash-to-curve itself, not by this module)
//! - `0x2`: serialized pairing value to 32-byte symmetric key
//! - `0x3`: `sigma ‖ message` to the scalar `r`, reduced modulo the
//!   BLS12-381 subgroup order
//! - `0x4`: `sigma ‖ block index` to the per-block keystream key
//!
//! These prefixes must never be reused for other purposes.

use blstrs::Scalar;
use num_bigint::BigUint;
use sha3::{Digest, Keccak256};

use crate::error::CryptoError;
use crate::pad::BLOCK_SIZE;

/// Domain prefix for the identity preimage (used by the encrypt
/// pipeline when hashing to the curve).
pub const DOMAIN_IDENTITY: u8 = 0x1;

const DOMAIN_GT_KEY: u8 = 0x2;
const DOMAIN_SCALAR: u8 = 0x3;
const DOMAIN_BLOCK_KEY: u8 = 0x4;

/// The BLS12-381 subgroup order, big-endian.
const BLS_SUBGROUP_ORDER: [u8; 32] = [
    0x73, 0xed, 0xa7, 0x53, 0x29, 0x9d, 0x7d, 0x48, 0x33, 0x39, 0xd8, 0x08, 0x09, 0xa1, 0xd8, 0x05,
    0x53, 0xbd, 0xa4, 0x02, 0xff, 0xfe, 0x5b, 0xfe, 0xff, 0xff, 0xff, 0xff, 0x00, 0x00, 0x00, 0x01,
];

fn keccak_with_prefix(prefix: u8, payload: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update([prefix]);
    hasher.update(payload);
    hasher.finalize().into()
}

/// Hash a serialized target-group element into a 32-byte symmetric key
/// (domain `0x2`).
pub fn hash_gt_to_key(gt_bytes: &[u8]) -> [u8; 32] {
    keccak_with_prefix(DOMAIN_GT_KEY, gt_bytes)
}

/// Hash `sigma ‖ message` into the scalar `r` (domain `0x3`).
///
/// The digest is interpreted as a big-endian integer and reduced modulo
/// the subgroup order, so encryption is deterministic given sigma.
pub fn hash_to_scalar(sigma: &[u8; 32], message: &[u8]) -> Result<Scalar, CryptoError> {
    let mut preimage = Vec::with_capacity(sigma.len() + message.len());
    preimage.extend_from_slice(sigma);
    preimage.extend_from_slice(message);
    let digest = keccak_with_prefix(DOMAIN_SCALAR, &preimage);

    let order = BigUint::from_bytes_be(&BLS_SUBGROUP_ORDER);
    let reduced = BigUint::from_bytes_be(&digest) % order;

    // Left-pad the minimal big-endian encoding back to 32 bytes.
    let reduced_bytes = reduced.to_bytes_be();
    let mut repr = [0u8; 32];
    repr[32 - reduced_bytes.len()..].copy_from_slice(&reduced_bytes);

    Option::from(Scalar::from_bytes_be(&repr)).ok_or(CryptoError::InvalidScalar)
}

/// Derive the keystream key for one 32-byte block (domain `0x4`).
///
/// The block index is appended as the shortest non-empty big-endian
/// byte sequence representing it; index 0 encodes as a single zero
/// byte, not a fixed-width field.
pub fn block_key(sigma: &[u8; 32], index: u32) -> [u8; 32] {
    let suffix = index.to_be_bytes();
    let start = suffix
        .iter()
        .position(|&b| b != 0)
        .unwrap_or(suffix.len() - 1);

    let mut preimage = Vec::with_capacity(sigma.len() + suffix.len() - start);
    preimage.extend_from_slice(sigma);
    preimage.extend_from_slice(&suffix[start..]);
    keccak_with_prefix(DOMAIN_BLOCK_KEY, &preimage)
}

/// Derive the keystream keys for `n` consecutive blocks.
pub fn block_keys(sigma: &[u8; 32], n: usize) -> Vec<[u8; BLOCK_SIZE]> {
    (0..n).map(|i| block_key(sigma, i as u32)).collect()
}
