//! # Identifier Minting and Verification
//!
//! A [`Mint`] produces self-verifying identifiers and checks them again
//! later. Generation is: draw random bytes, MAC them under the signing key,
//! concatenate, encode. Verification is deliberately *not* a mirror image —
//! instead of decoding and comparing tag bytes, the verifier re-runs the
//! generator with the extracted random component and compares the whole
//! recomputed string against the input in constant time. One code path
//! computes canonical strings; there is no second, subtly-different one to
//! drift out of sync.
//!
//! ## Fail closed
//!
//! `verify` never returns an error. Malformed text, bad checksums, wrong
//! prefixes, misbehaving capabilities — every failure collapses to `false`
//! at a single `match`, so a caller probing with garbage learns nothing
//! about *why* a string was rejected.

use tracing::debug;

use crate::codec;
use crate::crypto::capability::{HmacProvider, MacProvider, OsRandomSource, RandomSource};
use crate::crypto::compare::constant_time_eq;
use crate::crypto::key::SigningKey;
use crate::error::SigilError;

/// Default number of random payload bytes in a freshly minted identifier.
pub const DEFAULT_ID_BYTE_LENGTH: usize = 8;

/// Default ceiling on the encoded identifier's length.
pub const DEFAULT_OUTPUT_LIMIT: usize = 63;

/// Knobs for a single mint operation.
///
/// `Default` gives the standard shape: 8 random bytes, 63-character limit,
/// fresh randomness.
#[derive(Debug, Clone)]
pub struct MintOptions {
    /// How many random bytes to draw. Ignored when `random_id` is supplied.
    pub id_byte_length: usize,
    /// Maximum length of the encoded string; exceeding it is an error,
    /// never a truncation.
    pub output_limit: usize,
    /// Use these bytes verbatim instead of drawing randomness. This is the
    /// verifier's recomputation path; production callers want `None`.
    pub random_id: Option<Vec<u8>>,
}

impl Default for MintOptions {
    fn default() -> Self {
        Self {
            id_byte_length: DEFAULT_ID_BYTE_LENGTH,
            output_limit: DEFAULT_OUTPUT_LIMIT,
            random_id: None,
        }
    }
}

/// Generates and verifies self-verifying identifiers.
///
/// Generic over its two capabilities so tests can inject deterministic
/// randomness or a failing MAC. [`Mint::new`] wires the production pair
/// (OS randomness, HMAC).
///
/// A `Mint` is stateless; calls are independent and safe to issue
/// concurrently.
///
/// # Examples
///
/// ```
/// use sigil::{HashAlgorithm, Mint, SigningKey};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let key = SigningKey::new([7u8; 20], HashAlgorithm::Sha1);
/// let mint = Mint::new();
/// let id = mint.generate(&key, "order").await.unwrap();
/// assert!(id.starts_with("order1"));
/// assert!(mint.verify(&key, &id, Some("order")).await);
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Mint<R = OsRandomSource, M = HmacProvider> {
    random: R,
    mac: M,
}

impl Mint {
    /// A mint backed by the OS CSPRNG and HMAC.
    pub fn new() -> Self {
        Self {
            random: OsRandomSource,
            mac: HmacProvider,
        }
    }
}

impl Default for Mint {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RandomSource, M: MacProvider> Mint<R, M> {
    /// A mint with injected capabilities. Test seam; see [`Mint::new`] for
    /// the production wiring.
    pub fn with_capabilities(random: R, mac: M) -> Self {
        Self { random, mac }
    }

    /// Mint a fresh identifier under `key` with default options.
    pub async fn generate(&self, key: &SigningKey, prefix: &str) -> Result<String, SigilError> {
        self.generate_with(key, prefix, MintOptions::default()).await
    }

    /// Mint an identifier with explicit options.
    ///
    /// When `options.random_id` is set the result is fully deterministic:
    /// the same `(key, prefix, random_id)` always yields the same string.
    /// Otherwise every call draws fresh randomness and the results are
    /// unpredictable.
    ///
    /// Fails with [`SigilError::EncodingTooLong`] when the result would
    /// exceed `options.output_limit`, and propagates capability failures.
    pub async fn generate_with(
        &self,
        key: &SigningKey,
        prefix: &str,
        options: MintOptions,
    ) -> Result<String, SigilError> {
        let random_id = match options.random_id {
            Some(id) => id,
            None => self.random.random_bytes(options.id_byte_length).await?,
        };

        let tag = self.mac.mac(key, &random_id).await?;
        let expected_tag_len = key.algorithm().tag_length();
        if tag.len() != expected_tag_len {
            return Err(SigilError::UnsupportedAlgorithm(format!(
                "MAC capability produced a {}-byte tag, but {} requires {}",
                tag.len(),
                key.algorithm(),
                expected_tag_len
            )));
        }

        let mut payload = Vec::with_capacity(random_id.len() + tag.len());
        payload.extend_from_slice(&random_id);
        payload.extend_from_slice(&tag);

        codec::encode(prefix, &payload, options.output_limit)
    }

    /// Verify an identifier. Never fails; every error becomes `false`.
    ///
    /// When `expected_prefix` is given, a decoded prefix that differs
    /// returns `false` before any MAC work happens, so probes with an
    /// unrelated prefix learn nothing from timing.
    pub async fn verify(
        &self,
        key: &SigningKey,
        encoded: &str,
        expected_prefix: Option<&str>,
    ) -> bool {
        // The sole point where failure modes collapse to a boolean.
        match self.recompute_and_compare(key, encoded, expected_prefix).await {
            Ok(matches) => matches,
            Err(err) => {
                debug!(error = %err, "identifier rejected");
                false
            }
        }
    }

    /// The fallible interior of [`Mint::verify`].
    async fn recompute_and_compare(
        &self,
        key: &SigningKey,
        encoded: &str,
        expected_prefix: Option<&str>,
    ) -> Result<bool, SigilError> {
        let (prefix, payload) = codec::decode(encoded)?;

        if let Some(expected) = expected_prefix {
            if expected != prefix {
                return Err(SigilError::PrefixMismatch {
                    expected: expected.to_string(),
                    got: prefix,
                });
            }
        }

        let tag_len = key.algorithm().tag_length();
        if payload.len() < tag_len {
            return Err(SigilError::Format("payload shorter than tag"));
        }
        let random_id = payload[..payload.len() - tag_len].to_vec();

        // Recompute the canonical string. The limit has enough headroom
        // that a genuine match can never spuriously fail on length.
        let canonical = self
            .generate_with(
                key,
                &prefix,
                MintOptions {
                    id_byte_length: random_id.len(),
                    output_limit: encoded.len() + prefix.len(),
                    random_id: Some(random_id),
                },
            )
            .await?;

        Ok(constant_time_eq(canonical.as_bytes(), encoded.as_bytes()))
    }
}

/// Mint a fresh identifier with the production capabilities and default
/// options. Convenience for callers who don't need a long-lived [`Mint`].
pub async fn generate(key: &SigningKey, prefix: &str) -> Result<String, SigilError> {
    Mint::new().generate(key, prefix).await
}

/// Verify an identifier with the production capabilities. See
/// [`Mint::verify`].
pub async fn verify(key: &SigningKey, encoded: &str, expected_prefix: Option<&str>) -> bool {
    Mint::new().verify(key, encoded, expected_prefix).await
}
