//! Error types for identifier generation and verification.
//!
//! One enum covers the whole pipeline. Codec failures, capability failures,
//! and caller-configuration mistakes all land here, so `generate` can return
//! a single error type and `verify` can collapse every variant to `false`
//! in exactly one place.

use thiserror::Error;

/// Errors that can occur while encoding, generating, or verifying an
/// identifier.
///
/// These are intentionally terse. Anything that flows back from `verify`
/// is reduced to a boolean before it reaches the caller, precisely so the
/// caller cannot distinguish "malformed" from "forged" — but `generate`
/// callers and test code still get a real taxonomy to match on.
#[derive(Debug, Error)]
pub enum SigilError {
    /// The text is not well-formed: bad charset, mixed case, missing
    /// separator, bad padding bits, and so on.
    #[error("malformed encoding: {0}")]
    Format(&'static str),

    /// The checksum residue does not equal the Bech32m constant. The string
    /// was transcribed wrong, truncated, or tampered with.
    #[error("checksum mismatch")]
    Checksum,

    /// The decoded human-readable prefix differs from the one the caller
    /// demanded.
    #[error("prefix mismatch: expected '{expected}', got '{got}'")]
    PrefixMismatch {
        /// The prefix the caller expected.
        expected: String,
        /// The prefix actually found in the string.
        got: String,
    },

    /// The key/hash pairing is outside the supported allow-list, or a MAC
    /// capability produced a tag whose length contradicts it.
    #[error("unsupported HMAC algorithm or key: {0}")]
    UnsupportedAlgorithm(String),

    /// Encoding the payload would exceed the caller's length limit. The
    /// codec never truncates; it refuses.
    #[error("encoded length {required} exceeds limit {limit}")]
    EncodingTooLong {
        /// Length the encoded string would have had.
        required: usize,
        /// The caller-supplied ceiling.
        limit: usize,
    },

    /// An injected capability (random source or MAC primitive) failed.
    #[error("capability failure: {0}")]
    Capability(String),
}
