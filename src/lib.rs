// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Sigil — Self-Verifying Random Identifiers
//!
//! Sigil mints short, human-readable identifiers that carry their own proof
//! of authenticity: a random payload, an HMAC tag binding it to a secret
//! key, and a Bech32m text encoding with a built-in checksum. A verifier
//! holding the same key can confirm an identifier is genuine — and catch
//! transcription errors — without ever touching a database.
//!
//! ```text
//! random bytes (8)  ──┐
//!                     ├── payload ── Bech32m("order", payload) ── order1q3f...x7ke
//! HMAC(key, bytes) ──┘
//! ```
//!
//! What you get, and what you don't:
//!
//! - **Authenticity**: only a key holder can mint a string that verifies.
//! - **Error detection**: the checksum catches any 4 typos.
//! - **No confidentiality**: the payload is recoverable by anyone. Don't
//!   put secrets in it; the random bytes are an identifier, not a key.
//! - **No key management**: bring your own key, rotate it yourself.
//!
//! ## Architecture
//!
//! Three stateless components, leaves first:
//!
//! - **codec** — the checksummed Bech32m text codec. Pure functions,
//!   strict on decode, refuses to truncate on encode.
//! - **crypto** — the signing key handle and the injected capability seams
//!   (randomness, MAC) plus constant-time comparison.
//! - **mint** — the generator/verifier pair. Verification recomputes the
//!   canonical string through the generator rather than re-implementing
//!   tag checks, and compares in constant time.
//!
//! ## Quick start
//!
//! ```
//! use sigil::{HashAlgorithm, SigningKey};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let key = SigningKey::new([42u8; 20], HashAlgorithm::Sha1);
//!
//! let id = sigil::generate(&key, "invoice").await.unwrap();
//! assert!(id.starts_with("invoice1"));
//! assert!(id.len() <= 63);
//!
//! assert!(sigil::verify(&key, &id, Some("invoice")).await);
//! assert!(!sigil::verify(&key, &id, Some("receipt")).await);
//! # }
//! ```
//!
//! ## Design philosophy
//!
//! 1. Fail closed. `verify` returns a bare boolean; every failure mode —
//!    bad charset, bad checksum, wrong prefix, broken capability — is
//!    indistinguishable from a forged tag.
//! 2. One canonical path. The verifier calls the generator; there is no
//!    second encode-and-MAC implementation to drift.
//! 3. No timing oracles. Comparison is constant-time with no fallback,
//!    and prefix mismatches bail out before any MAC work.

pub mod codec;
pub mod crypto;
pub mod error;
pub mod mint;

pub use crypto::capability::{HmacProvider, MacProvider, OsRandomSource, RandomSource};
pub use crypto::key::{HashAlgorithm, SigningKey};
pub use error::SigilError;
pub use mint::{
    generate, verify, Mint, MintOptions, DEFAULT_ID_BYTE_LENGTH, DEFAULT_OUTPUT_LIMIT,
};
