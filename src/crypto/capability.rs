//! # Injected Capabilities
//!
//! The generator needs two things from the outside world: random bytes and
//! a keyed MAC. Both are modeled as async traits so that embedders can plug
//! in hardware tokens, KMS-backed signers, or deterministic test doubles
//! without the core caring. The production implementations below are what
//! everyone else should use.

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use rand::rngs::OsRng;
use rand::RngCore;
use sha1::Sha1;
use sha2::Sha512;

use crate::crypto::key::{HashAlgorithm, SigningKey};
use crate::error::SigilError;

/// A cryptographically secure source of random bytes.
#[async_trait]
pub trait RandomSource: Send + Sync {
    /// Draw exactly `n` fresh random bytes.
    async fn random_bytes(&self, n: usize) -> Result<Vec<u8>, SigilError>;
}

/// A keyed MAC primitive: `(key, message) -> tag`.
///
/// Implementations must produce tags whose length matches
/// [`HashAlgorithm::tag_length`] for the key's bound algorithm; the
/// generator checks and refuses tags that don't.
#[async_trait]
pub trait MacProvider: Send + Sync {
    /// Compute the MAC tag of `message` under `key`.
    async fn mac(&self, key: &SigningKey, message: &[u8]) -> Result<Vec<u8>, SigilError>;
}

/// Production randomness: the operating system's CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandomSource;

#[async_trait]
impl RandomSource for OsRandomSource {
    async fn random_bytes(&self, n: usize) -> Result<Vec<u8>, SigilError> {
        let mut bytes = vec![0u8; n];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| SigilError::Capability(e.to_string()))?;
        Ok(bytes)
    }
}

/// Production MAC: HMAC over the key's bound hash algorithm.
#[derive(Debug, Clone, Copy, Default)]
pub struct HmacProvider;

#[async_trait]
impl MacProvider for HmacProvider {
    async fn mac(&self, key: &SigningKey, message: &[u8]) -> Result<Vec<u8>, SigilError> {
        match key.algorithm() {
            HashAlgorithm::Sha1 => {
                let mut mac = Hmac::<Sha1>::new_from_slice(key.as_bytes())
                    .map_err(|e| SigilError::Capability(e.to_string()))?;
                mac.update(message);
                Ok(mac.finalize().into_bytes().to_vec())
            }
            HashAlgorithm::Sha512 => {
                let mut mac = Hmac::<Sha512>::new_from_slice(key.as_bytes())
                    .map_err(|e| SigilError::Capability(e.to_string()))?;
                mac.update(message);
                Ok(mac.finalize().into_bytes().to_vec())
            }
        }
    }
}
