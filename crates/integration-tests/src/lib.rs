//! End-to-end integration tests for the threshold-encryption codec.
//!
//! These tests exercise the full ciphertext lifecycle:
//! 1. Eon key publication (simulated threshold system)
//! 2. Identity registration
//! 3. Encryption to the identity
//! 4. Epoch secret key release (simulated)
//! 5. Decryption and verification

use blstrs::{G1Projective, Scalar};
use ff::Field;
use rand::rngs::OsRng;
use rand::RngCore;

use shutter_crypto::pairing::{compress_g1, compress_g2, g2_generator_mul};
use shutter_crypto::{
    compute_identity, decrypt, decrypt_hex, encrypt, encrypt_hex, CryptoError, EncryptedMessage,
};
use shutter_types::{encode_hex, identity_preimage, G1Point, G2Point};

/// A stand-in for the external threshold system: holds the eon secret
/// and releases per-identity epoch keys on demand.
struct KeyReleaseSystem {
    secret: Scalar,
}

impl KeyReleaseSystem {
    fn new(rng: &mut OsRng) -> Self {
        Self {
            secret: Scalar::random(rng),
        }
    }

    fn eon_key(&self) -> G2Point {
        compress_g2(&g2_generator_mul(&self.secret))
    }

    fn release_epoch_key(&self, preimage: &[u8]) -> G1Point {
        let identity = compute_identity(preimage);
        compress_g1(&(G1Projective::from(identity) * self.secret).into())
    }
}

/// Test the complete encrypt-release-decrypt flow.
#[test]
fn test_full_lifecycle() {
    let mut rng = OsRng;

    // ========================================
    // Phase 1: Threshold system publishes eon key
    // ========================================

    let system = KeyReleaseSystem::new(&mut rng);
    let eon_key = system.eon_key();

    println!("Setup complete: eon public key published");

    // ========================================
    // Phase 2: Register an identity
    // ========================================

    let mut prefix = [0u8; 32];
    rng.fill_bytes(&mut prefix);
    let registrant = [0x42u8; 20];
    let preimage = identity_preimage(&prefix, &registrant);

    println!("Identity registered ({} preimage bytes)", preimage.len());

    // ========================================
    // Phase 3: Encrypt a message to the identity
    // ========================================

    let plaintext = b"prediction: the sealed value is 7500".to_vec();
    let envelope = encrypt(&plaintext, &preimage, &eon_key, None, &mut rng)
        .expect("encryption failed")
        .encode();

    println!("Message encrypted: {} envelope bytes", envelope.len());
    assert_eq!(envelope.len(), 129 + 32 * ((plaintext.len() + 1).div_ceil(32)));

    // ========================================
    // Phase 4: Epoch secret key release
    // ========================================

    let epoch_key = system.release_epoch_key(&preimage);

    println!("Epoch secret key released");

    // ========================================
    // Phase 5: Decrypt and verify
    // ========================================

    let decrypted = decrypt(&envelope, &epoch_key).expect("decryption failed");
    assert_eq!(decrypted, plaintext);

    println!("Message decrypted and verified");
}

/// One released epoch key must open every envelope encrypted to its
/// identity, and no envelope encrypted to a different identity.
#[test]
fn test_one_key_many_envelopes() {
    let mut rng = OsRng;
    let system = KeyReleaseSystem::new(&mut rng);
    let eon_key = system.eon_key();

    let preimage = b"shared identity".to_vec();
    let epoch_key = system.release_epoch_key(&preimage);

    for i in 0..5u8 {
        let plaintext = vec![i; 10 + i as usize * 17];
        let envelope = encrypt(&plaintext, &preimage, &eon_key, None, &mut rng)
            .unwrap()
            .encode();
        assert_eq!(decrypt(&envelope, &epoch_key).unwrap(), plaintext);
    }

    let other_envelope = encrypt(b"for someone else", b"other identity", &eon_key, None, &mut rng)
        .unwrap()
        .encode();
    match decrypt(&other_envelope, &epoch_key) {
        Ok(garbage) => assert_ne!(garbage, b"for someone else"),
        Err(CryptoError::InvalidPadding(_)) => {}
        Err(other) => panic!("unexpected error class: {other}"),
    }
}

/// Exercise the hex interchange form end to end, as the on-chain
/// integration consumes it.
#[test]
fn test_hex_boundary_lifecycle() {
    let mut rng = OsRng;
    let system = KeyReleaseSystem::new(&mut rng);
    let eon_key_hex = system.eon_key().to_hex();

    let preimage = b"hex lifecycle";
    let plaintext = b"on-chain commitment";

    let envelope_hex = encrypt_hex(
        &encode_hex(plaintext),
        &encode_hex(preimage),
        &eon_key_hex,
        None,
        &mut rng,
    )
    .expect("hex encryption failed");

    assert!(envelope_hex.starts_with("0x03"));

    let epoch_key_hex = system.release_epoch_key(preimage).to_hex();
    let plaintext_hex = decrypt_hex(&envelope_hex, &epoch_key_hex).expect("hex decryption failed");
    assert_eq!(plaintext_hex, encode_hex(plaintext));
}

/// Envelopes survive a decode/re-encode cycle unchanged, so they can be
/// stored and forwarded by components that never decrypt them.
#[test]
fn test_envelope_transport_round_trip() {
    let mut rng = OsRng;
    let system = KeyReleaseSystem::new(&mut rng);
    let eon_key = system.eon_key();

    let envelope = encrypt(b"store and forward", b"transport", &eon_key, None, &mut rng)
        .unwrap()
        .encode();
    let reencoded = EncryptedMessage::decode(&envelope).unwrap().encode();
    assert_eq!(envelope, reencoded);
}

/// Two encryptions of the same message under the same identity must
/// produce unlinkable envelopes when sigma is fresh.
#[test]
fn test_envelopes_are_unlinkable() {
    let mut rng = OsRng;
    let system = KeyReleaseSystem::new(&mut rng);
    let eon_key = system.eon_key();

    let e1 = encrypt(b"same message", b"same identity", &eon_key, None, &mut rng).unwrap();
    let e2 = encrypt(b"same message", b"same identity", &eon_key, None, &mut rng).unwrap();

    assert_ne!(e1.c1, e2.c1);
    assert_ne!(e1.c2, e2.c2);
    assert_ne!(e1.c3, e2.c3);
}
