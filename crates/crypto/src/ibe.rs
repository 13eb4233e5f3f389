//! Identity-based encryption pipelines over BLS12-381 pairings.
//!
//! # Encryption
//!
//! To encrypt a message `m` under identity preimage `id` and eon key
//! `K` (an element of G2 shared by every identity in the epoch):
//! 1. Compute `identity = H1(0x1 ‖ id)` ∈ G1 via hash-to-curve
//! 2. Derive `r = H3(sigma ‖ m)` from the random blinding seed sigma
//! 3. Compute `C1 = r·G2`
//! 4. Compute `C2 = sigma ⊕ H2(e(identity, K)^r)`
//! 5. Pad `m` into 32-byte blocks and mask each with the keystream:
//!    `C3[i] = block[i] ⊕ H4(sigma ‖ i)`
//!
//! # Decryption
//!
//! Given the epoch secret key `sk = s·identity` ∈ G1 released by the
//! threshold system (where `K = s·G2`):
//! 1. Recover `sigma = C2 ⊕ H2(e(sk, C1))`, equal by bilinearity
//!    since `e(sk, C1) = e(identity, G2)^{s·r} = e(identity, K)^r`
//! 2. Rebuild the keystream from sigma and unmask each block
//! 3. Strip the padding
//!
//! The scheme is confidentiality-only: there is no authentication tag,
//! so tampering with `C2`/`C3` surfaces only as a padding failure or
//! silently wrong plaintext. Callers that need integrity must layer
//! their own authentication over the envelope.

use blstrs::G1Affine;
use rand::{CryptoRng, RngCore};
use tracing::debug;

use shutter_types::{decode_hex, encode_hex, G1Point, G2Point};

use crate::envelope::EncryptedMessage;
use crate::error::CryptoError;
use crate::hash::{block_keys, hash_gt_to_key, hash_to_scalar, DOMAIN_IDENTITY};
use crate::pad::{pad_and_split, unpad, BLOCK_SIZE};
use crate::pairing::{
    compress_g2, compute_pairing, decompress_g1, decompress_g2, g2_generator_mul, gt_exp,
    gt_to_bytes, hash_to_g1,
};

/// Hash an identity preimage to its G1 identity point.
///
/// The domain prefix `0x1` is prepended before hash-to-curve, so the
/// preimage bytes themselves are caller-chosen and never interpreted.
pub fn compute_identity(preimage: &[u8]) -> G1Affine {
    let mut prefixed = Vec::with_capacity(1 + preimage.len());
    prefixed.push(DOMAIN_IDENTITY);
    prefixed.extend_from_slice(preimage);
    hash_to_g1(&prefixed)
}

/// Encrypt a message to an identity under an eon public key.
///
/// # Arguments
/// * `plaintext` - The message to encrypt
/// * `identity_preimage` - Caller-chosen identity bytes (hashed to a curve point)
/// * `eon_key` - Compressed eon public key for the encryption epoch
/// * `sigma` - Optional 32-byte blinding seed; pass `None` outside of
///   deterministic tests. Sigma must never be reused across messages
///   under the same identity.
/// * `rng` - Cryptographically secure random number generator, used
///   only when `sigma` is `None`
///
/// # Returns
/// The ciphertext envelope. With an explicit sigma this is a pure
/// function of its inputs.
pub fn encrypt<R: RngCore + CryptoRng>(
    plaintext: &[u8],
    identity_preimage: &[u8],
    eon_key: &G2Point,
    sigma: Option<[u8; 32]>,
    rng: &mut R,
) -> Result<EncryptedMessage, CryptoError> {
    let identity = compute_identity(identity_preimage);
    let eon = decompress_g2(&eon_key.0)?;

    let sigma = sigma.unwrap_or_else(|| {
        let mut seed = [0u8; 32];
        rng.fill_bytes(&mut seed);
        seed
    });

    let r = hash_to_scalar(&sigma, plaintext)?;
    let c1 = compress_g2(&g2_generator_mul(&r));

    let shared = gt_exp(&compute_pairing(&identity, &eon), &r);
    let key = hash_gt_to_key(&gt_to_bytes(&shared));
    let c2 = xor_blocks(&sigma, &key)?;

    let blocks = pad_and_split(plaintext);
    let keys = block_keys(&sigma, blocks.len());
    let c3 = blocks
        .iter()
        .zip(keys.iter())
        .map(|(block, key)| xor_blocks(block, key))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(blocks = c3.len(), "message encrypted");

    Ok(EncryptedMessage { c1, c2, c3 })
}

/// Decrypt a ciphertext envelope using a released epoch secret key.
///
/// The codec performs no correctness check on the key beyond trusting
/// the external key-release system: a key for a different identity
/// yields an unrelated sigma, which surfaces downstream as an
/// `InvalidPadding` error or garbage plaintext.
pub fn decrypt(envelope: &[u8], epoch_secret_key: &G1Point) -> Result<Vec<u8>, CryptoError> {
    let message = EncryptedMessage::decode(envelope)?;
    let c1 = decompress_g2(&message.c1.0)?;
    let secret = decompress_g1(&epoch_secret_key.0)?;

    let shared = compute_pairing(&secret, &c1);
    let key = hash_gt_to_key(&gt_to_bytes(&shared));
    let sigma = xor_blocks(&message.c2, &key)?;

    let keys = block_keys(&sigma, message.c3.len());
    let mut padded = Vec::with_capacity(message.c3.len() * BLOCK_SIZE);
    for (block, key) in message.c3.iter().zip(keys.iter()) {
        padded.extend_from_slice(&xor_blocks(block, key)?);
    }

    debug!(blocks = message.c3.len(), "message decrypted");

    unpad(&padded)
}

/// Encrypt over the hex interchange form used at the system boundary.
///
/// All inputs are `0x`-prefixed (or bare) lowercase hex; the returned
/// envelope is `0x`-prefixed lowercase hex.
pub fn encrypt_hex<R: RngCore + CryptoRng>(
    plaintext_hex: &str,
    identity_preimage_hex: &str,
    eon_key_hex: &str,
    sigma_hex: Option<&str>,
    rng: &mut R,
) -> Result<String, CryptoError> {
    let plaintext = decode_hex(plaintext_hex).map_err(|_| CryptoError::InvalidHex)?;
    let preimage = decode_hex(identity_preimage_hex).map_err(|_| CryptoError::InvalidHex)?;
    let eon_key = G2Point::from_hex(eon_key_hex).map_err(|_| CryptoError::InvalidG2Point)?;

    let sigma = match sigma_hex {
        Some(s) => {
            let bytes = decode_hex(s).map_err(|_| CryptoError::InvalidHex)?;
            let got = bytes.len();
            Some(bytes.try_into().map_err(|_| CryptoError::LengthMismatch {
                expected: BLOCK_SIZE,
                got,
            })?)
        }
        None => None,
    };

    let message = encrypt(&plaintext, &preimage, &eon_key, sigma, rng)?;
    Ok(encode_hex(&message.encode()))
}

/// Decrypt over the hex interchange form used at the system boundary.
pub fn decrypt_hex(envelope_hex: &str, epoch_secret_key_hex: &str) -> Result<String, CryptoError> {
    let envelope = decode_hex(envelope_hex).map_err(|_| CryptoError::InvalidHex)?;
    let secret_key =
        G1Point::from_hex(epoch_secret_key_hex).map_err(|_| CryptoError::InvalidG1Point)?;

    let plaintext = decrypt(&envelope, &secret_key)?;
    Ok(encode_hex(&plaintext))
}

/// XOR two equal-length 32-byte operands.
///
/// The length guard is an internal invariant check; both operands are
/// fixed at 32 bytes everywhere this is called.
fn xor_blocks(x: &[u8], y: &[u8]) -> Result<[u8; BLOCK_SIZE], CryptoError> {
    if x.len() != BLOCK_SIZE || y.len() != x.len() {
        return Err(CryptoError::LengthMismatch {
            expected: BLOCK_SIZE,
            got: x.len().max(y.len()),
        });
    }
    let mut out = [0u8; BLOCK_SIZE];
    for (i, (a, b)) in x.iter().zip(y.iter()).enumerate() {
        out[i] = a ^ b;
    }
    Ok(out)
}
