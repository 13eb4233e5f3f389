//! Error types for codec operations.

use thiserror::Error;

/// Errors that can occur during encryption or decryption.
///
/// Every failure is local to a single call and is always surfaced to the
/// caller; the codec never retries or silently recovers.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// The envelope's leading byte is not the pinned version `0x3`.
    #[error("Unsupported envelope version {0:#04x}")]
    InvalidVersion(u8),

    /// The envelope's total length is not `1 + 96 + 32 + 32*n`.
    #[error("Invalid envelope length {0}")]
    InvalidEnvelopeLength(usize),

    /// XOR operands of unequal length. Unreachable given the fixed
    /// 32-byte fields, but guarded as an internal invariant.
    #[error("Length mismatch: expected {expected} bytes, got {got}")]
    LengthMismatch { expected: usize, got: usize },

    /// Decrypted padding length is 0, greater than 32, or the padded
    /// data is empty.
    #[error("Invalid padding length {0:?}")]
    InvalidPadding(Option<u8>),

    #[error("Invalid G1 point encoding")]
    InvalidG1Point,

    #[error("Invalid G2 point encoding")]
    InvalidG2Point,

    #[error("Invalid scalar encoding")]
    InvalidScalar,

    #[error("Invalid hex encoding")]
    InvalidHex,

    /// The pairing backend has not finished initializing. The native
    /// blst backend is always ready; this exists for bindings to
    /// backends that load asynchronously.
    #[error("Pairing backend not ready")]
    NotReady,
}
