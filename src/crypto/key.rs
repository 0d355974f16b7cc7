//! # Key Handles
//!
//! A [`SigningKey`] is raw HMAC key material bound to exactly one hash
//! algorithm. The binding is the important part: the tag length that the
//! verifier peels off the end of a decoded payload is derived from the
//! algorithm alone, so a key that could mean "SHA-1 or SHA-512 depending
//! on context" would be a parsing ambiguity waiting to happen.
//!
//! ## Security considerations
//!
//! - `SigningKey` implements neither `Serialize` nor `Deserialize`, on
//!   purpose. Keys cross the trust boundary never; only encoded identifiers
//!   do.
//! - The `Debug` impl redacts key bytes. If you add logging that prints
//!   them, you will be asked to leave.

use std::fmt;

/// The closed allow-list of hash algorithms an HMAC key may be bound to.
///
/// Exactly two entries, matching the two tag lengths the wire format
/// supports. Extending this list is a format change, not a refactor:
/// every verifier in the field derives payload split points from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    /// HMAC-SHA-1: 20-byte tags. Fine for short-lived identifiers where
    /// compactness wins; HMAC-SHA-1 is not affected by SHA-1's collision
    /// breaks.
    Sha1,
    /// HMAC-SHA-512: 64-byte tags, for callers who want margin over brevity.
    Sha512,
}

impl HashAlgorithm {
    /// Length in bytes of the MAC tag this algorithm produces.
    pub fn tag_length(self) -> usize {
        match self {
            Self::Sha1 => 20,
            Self::Sha512 => 64,
        }
    }

    /// Canonical name, for error messages and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sha1 => "SHA-1",
            Self::Sha512 => "SHA-512",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// HMAC key material bound to one [`HashAlgorithm`].
///
/// The core only ever borrows a `SigningKey`; ownership and lifecycle stay
/// with the caller. Any key length is accepted — HMAC handles short and
/// long keys by construction — but 20 bytes (SHA-1) or 64 bytes (SHA-512)
/// are the conventional sizes.
///
/// # Examples
///
/// ```
/// use sigil::{HashAlgorithm, SigningKey};
///
/// let key = SigningKey::new([0u8; 20], HashAlgorithm::Sha1);
/// assert_eq!(key.algorithm().tag_length(), 20);
/// ```
#[derive(Clone)]
pub struct SigningKey {
    bytes: Vec<u8>,
    algorithm: HashAlgorithm,
}

impl SigningKey {
    /// Bind key material to a hash algorithm.
    pub fn new(bytes: impl Into<Vec<u8>>, algorithm: HashAlgorithm) -> Self {
        Self {
            bytes: bytes.into(),
            algorithm,
        }
    }

    /// The hash algorithm this key is bound to.
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Borrow the raw key bytes. Intended for MAC capability
    /// implementations; don't let these escape into logs or storage.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("algorithm", &self.algorithm)
            .field("bytes", &format_args!("[{} bytes redacted]", self.bytes.len()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_lengths_match_allow_list() {
        assert_eq!(HashAlgorithm::Sha1.tag_length(), 20);
        assert_eq!(HashAlgorithm::Sha512.tag_length(), 64);
    }

    #[test]
    fn debug_redacts_key_bytes() {
        let key = SigningKey::new(vec![0xAA; 20], HashAlgorithm::Sha1);
        let rendered = format!("{:?}", key);
        assert!(rendered.contains("redacted"));
        assert!(!rendered.contains("170")); // 0xAA in decimal
    }

    #[test]
    fn key_binds_algorithm() {
        let key = SigningKey::new(b"secret-key".to_vec(), HashAlgorithm::Sha512);
        assert_eq!(key.algorithm(), HashAlgorithm::Sha512);
        assert_eq!(key.as_bytes(), b"secret-key");
    }
}
