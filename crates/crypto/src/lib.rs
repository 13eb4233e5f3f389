//! Identity-based threshold-encryption codec over BLS12-381.
//!
//! This crate turns a plaintext message plus a future decryption
//! identity into a self-contained binary ciphertext envelope, and later
//! turns that envelope plus a released epoch secret key back into
//! plaintext.
//!
//! # Overview
//!
//! The scheme works as follows:
//!
//! 1. **Setup (external)**: a distributed threshold system publishes an
//!    eon public key `K = s·G2` for the encryption epoch. The codec
//!    never sees the shares behind it.
//!
//! 2. **Encryption**: anyone can encrypt to an identity preimage using
//!    only the eon key. The preimage is hashed to a G1 point, a random
//!    sigma blinds the symmetric key via a pairing, and the padded
//!    message is masked by a Keccak-based keystream.
//!
//! 3. **Key release (external)**: once the reveal condition is met, the
//!    threshold system releases the epoch secret key `s·H(identity)`.
//!
//! 4. **Decryption**: anyone holding the released key can open every
//!    envelope encrypted to that identity.
//!
//! The codec is a pure, synchronous computation over byte strings and
//! group elements. It holds no state, performs no I/O, and every call
//! builds its own group elements, so calls may run concurrently.

pub mod envelope;
pub mod error;
pub mod hash;
pub mod ibe;
pub mod pad;
pub mod pairing;

pub use envelope::{EncryptedMessage, VERSION_ID};
pub use error::CryptoError;
pub use ibe::{compute_identity, decrypt, decrypt_hex, encrypt, encrypt_hex};
