//! # Checksummed Text Codec (Bech32m)
//!
//! Converts a byte payload plus a human-readable prefix into a single
//! checksummed string, and back. The format is Bech32m (BIP-350): the prefix,
//! a `1` separator, the payload repacked into 5-bit groups over a 32-symbol
//! alphabet, and a 6-symbol checksum computed as a degree-5 polynomial over
//! GF(2).
//!
//! ```text
//! sigil 1 m6kmamc d237xw
//! └HRP┘ │ └data─┘ └chk─┘
//! ```
//!
//! The checksum is the reason to use this format instead of base32 or hex:
//! it detects any 4 transcription errors and most larger ones, which matters
//! for identifiers humans read aloud, paste into URLs, and type from paper.
//!
//! ## Bech32m, not Bech32
//!
//! The two variants differ only in the constant XORed into the checksum
//! residue (`0x2bc830a3` here versus `1` for classic Bech32). Strings from
//! one variant always fail the other's check, so the constant doubles as a
//! format-version tag.
//!
//! ## Strictness
//!
//! `decode` is deliberately unforgiving: unknown characters, mixed case,
//! a missing separator, an empty prefix, or non-zero padding bits are all
//! rejected before the checksum is even consulted. `encode` refuses to
//! produce a string longer than the caller's limit — it never truncates.

use crate::error::SigilError;

/// The 32-symbol data alphabet. Chosen by the Bech32 authors to minimize
/// visual ambiguity: no `1`, `b`, `i`, or `o`.
const CHARSET: &[u8; 32] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";

/// Generator taps for the checksum polynomial.
const GENERATOR: [u32; 5] = [0x3b6a57b2, 0x26508e6d, 0x1ea119fa, 0x3d4233dd, 0x2a1462b3];

/// The residue a valid Bech32m checksum must produce.
const BECH32M_CONST: u32 = 0x2bc8_30a3;

/// Separator between the human-readable prefix and the data part.
const SEPARATOR: char = '1';

/// Number of checksum symbols at the end of every encoded string.
const CHECKSUM_LEN: usize = 6;

/// Shortest possible encoding: 1-char prefix + separator + checksum.
const MIN_ENCODED_LEN: usize = 8;

/// Encode `payload` under `prefix`, refusing to exceed `length_limit`.
///
/// The output is `prefix` + `1` + data symbols + 6 checksum symbols, all
/// lower-case. The length check happens before any work: if the result
/// would not fit, this returns [`SigilError::EncodingTooLong`] and nothing
/// is ever truncated to fit.
///
/// # Examples
///
/// ```
/// let s = sigil::codec::encode("sigil", &[0xde, 0xad, 0xbe, 0xef], 63).unwrap();
/// assert_eq!(s, "sigil1m6kmamcd237xw");
/// ```
pub fn encode(prefix: &str, payload: &[u8], length_limit: usize) -> Result<String, SigilError> {
    let data_len = (payload.len() * 8).div_ceil(5);
    let required = prefix.len() + 1 + data_len + CHECKSUM_LEN;
    if required > length_limit {
        return Err(SigilError::EncodingTooLong {
            required,
            limit: length_limit,
        });
    }
    if prefix.is_empty() {
        // An empty prefix would encode to a string our own decoder rejects,
        // which breaks the round-trip guarantee. Refuse up front.
        return Err(SigilError::Format("empty prefix"));
    }

    let prefix = prefix.to_lowercase();
    let mut chk = prefix_checksum_state(&prefix)?;

    let mut out = String::with_capacity(required);
    out.push_str(&prefix);
    out.push(SEPARATOR);

    for word in to_words(payload) {
        chk = polymod_step(chk, word);
        out.push(CHARSET[word as usize] as char);
    }

    for _ in 0..CHECKSUM_LEN {
        chk = polymod_step(chk, 0);
    }
    chk ^= BECH32M_CONST;
    for i in 0..CHECKSUM_LEN {
        let word = ((chk >> (5 * (5 - i))) & 0x1f) as usize;
        out.push(CHARSET[word] as char);
    }

    Ok(out)
}

/// Decode an encoded string back into `(prefix, payload)`.
///
/// Validation order: overall length, case consistency, separator, prefix
/// charset, data charset, checksum, padding bits. The returned prefix is
/// always lower-case, even when the input was entirely upper-case.
pub fn decode(encoded: &str) -> Result<(String, Vec<u8>), SigilError> {
    if encoded.len() < MIN_ENCODED_LEN {
        return Err(SigilError::Format("string too short"));
    }

    let has_lower = encoded.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = encoded.bytes().any(|b| b.is_ascii_uppercase());
    if has_lower && has_upper {
        return Err(SigilError::Format("mixed-case string"));
    }
    let lowered = encoded.to_lowercase();

    // The prefix may itself contain the separator character, so the split
    // point is the last occurrence, not the first.
    let split = lowered
        .rfind(SEPARATOR)
        .ok_or(SigilError::Format("missing separator"))?;
    if split == 0 {
        return Err(SigilError::Format("empty prefix"));
    }
    if lowered.len() - (split + 1) < CHECKSUM_LEN {
        return Err(SigilError::Format("data part too short"));
    }

    let prefix = &lowered[..split];
    let mut chk = prefix_checksum_state(prefix)?;

    let data_part = &lowered.as_bytes()[split + 1..];
    let mut words = Vec::with_capacity(data_part.len());
    for &c in data_part {
        let word = charset_index(c).ok_or(SigilError::Format("unknown character"))?;
        chk = polymod_step(chk, word);
        words.push(word);
    }

    if chk != BECH32M_CONST {
        return Err(SigilError::Checksum);
    }

    let payload = from_words(&words[..words.len() - CHECKSUM_LEN])?;
    Ok((prefix.to_string(), payload))
}

/// One step of the checksum polynomial: multiply the accumulated residue by
/// `x`, add the next 5-bit coefficient, and reduce by the generator.
fn polymod_step(chk: u32, value: u8) -> u32 {
    let top = chk >> 25;
    let mut chk = ((chk & 0x01ff_ffff) << 5) ^ u32::from(value);
    for (i, gen) in GENERATOR.iter().enumerate() {
        if (top >> i) & 1 == 1 {
            chk ^= gen;
        }
    }
    chk
}

/// Feed the prefix into the checksum: high 3 bits of each character, a zero,
/// then the low 5 bits of each character. Also validates that every prefix
/// character is in the printable US-ASCII range the format permits.
fn prefix_checksum_state(prefix: &str) -> Result<u32, SigilError> {
    for b in prefix.bytes() {
        if !(33..=126).contains(&b) {
            return Err(SigilError::Format("invalid prefix character"));
        }
    }
    let mut chk: u32 = 1;
    for b in prefix.bytes() {
        chk = polymod_step(chk, b >> 5);
    }
    chk = polymod_step(chk, 0);
    for b in prefix.bytes() {
        chk = polymod_step(chk, b & 0x1f);
    }
    Ok(chk)
}

/// Map an encoded character back to its 5-bit value.
fn charset_index(c: u8) -> Option<u8> {
    CHARSET.iter().position(|&x| x == c).map(|i| i as u8)
}

/// Repack 8-bit bytes into 5-bit words, big-endian bit order, zero-padding
/// the tail to a word boundary.
fn to_words(bytes: &[u8]) -> Vec<u8> {
    let mut words = Vec::with_capacity((bytes.len() * 8).div_ceil(5));
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    for &b in bytes {
        acc = (acc << 8) | u32::from(b);
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            words.push(((acc >> bits) & 0x1f) as u8);
        }
    }
    if bits > 0 {
        words.push(((acc << (5 - bits)) & 0x1f) as u8);
    }
    words
}

/// Repack 5-bit words into 8-bit bytes, rejecting malformed padding.
///
/// A whole leftover word means the encoder emitted more padding than any
/// byte sequence needs; non-zero leftover bits mean the tail was tampered
/// with. Both reject — the round-trip guarantee requires every decoded
/// string to have exactly one encoding.
fn from_words(words: &[u8]) -> Result<Vec<u8>, SigilError> {
    let mut bytes = Vec::with_capacity(words.len() * 5 / 8);
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    for &w in words {
        acc = (acc << 5) | u32::from(w);
        bits += 5;
        if bits >= 8 {
            bits -= 8;
            bytes.push(((acc >> bits) & 0xff) as u8);
        }
    }
    if bits >= 5 {
        return Err(SigilError::Format("excess padding"));
    }
    if bits > 0 && acc & ((1 << bits) - 1) != 0 {
        return Err(SigilError::Format("non-zero padding"));
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_vector_roundtrip() {
        let s = encode("sigil", &[0xde, 0xad, 0xbe, 0xef], 63).unwrap();
        assert_eq!(s, "sigil1m6kmamcd237xw");
        let (prefix, payload) = decode(&s).unwrap();
        assert_eq!(prefix, "sigil");
        assert_eq!(payload, vec![0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn empty_payload_roundtrip() {
        let s = encode("bare", &[], 63).unwrap();
        assert_eq!(s, "bare18hr8hy");
        let (prefix, payload) = decode(&s).unwrap();
        assert_eq!(prefix, "bare");
        assert!(payload.is_empty());
    }

    #[test]
    fn two_byte_vector() {
        let s = encode("abc", &[0x00, 0xff], 63).unwrap();
        assert_eq!(s, "abc1qrlslr35g5");
    }

    #[test]
    fn roundtrip_all_byte_values() {
        let payload: Vec<u8> = (0..=255).collect();
        let s = encode("full", &payload, 1024).unwrap();
        let (prefix, decoded) = decode(&s).unwrap();
        assert_eq!(prefix, "full");
        assert_eq!(decoded, payload);
    }

    #[test]
    fn bip350_valid_strings_decode() {
        // Checksum-valid test strings from BIP-350.
        for s in [
            "a1lqfn3a",
            "A1LQFN3A",
            "abcdef1l7aum6echk45nj3s0wdvt2fg8x9yrzpqzd3ryx",
            "split1checkupstagehandshakeupstreamerranterredcaperredlc445v",
        ] {
            assert!(decode(s).is_ok(), "should decode: {}", s);
        }
    }

    #[test]
    fn upper_case_decodes_to_lower_case_prefix() {
        let (prefix, payload) = decode("SIGIL1M6KMAMCD237XW").unwrap();
        assert_eq!(prefix, "sigil");
        assert_eq!(payload, vec![0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn mixed_case_rejected() {
        let err = decode("Sigil1m6kmamcd237xw").unwrap_err();
        assert!(matches!(err, SigilError::Format("mixed-case string")));
    }

    #[test]
    fn unknown_character_rejected() {
        // 'b' is not in the charset.
        let err = decode("sigil1m6kmamcdb37xw").unwrap_err();
        assert!(matches!(err, SigilError::Format("unknown character")));
    }

    #[test]
    fn missing_separator_rejected() {
        let err = decode("nosepatall").unwrap_err();
        assert!(matches!(err, SigilError::Format("missing separator")));
    }

    #[test]
    fn empty_prefix_rejected_on_decode() {
        let err = decode("1qqqqqqqq").unwrap_err();
        assert!(matches!(err, SigilError::Format("empty prefix")));
    }

    #[test]
    fn empty_prefix_rejected_on_encode() {
        let err = encode("", &[1, 2, 3], 63).unwrap_err();
        assert!(matches!(err, SigilError::Format("empty prefix")));
    }

    #[test]
    fn short_string_rejected() {
        let err = decode("a1lqfn3").unwrap_err();
        assert!(matches!(err, SigilError::Format("string too short")));
    }

    #[test]
    fn data_part_shorter_than_checksum_rejected() {
        // 8 chars total but only 5 after the separator.
        let err = decode("ab1qqqqq").unwrap_err();
        assert!(matches!(err, SigilError::Format("data part too short")));
    }

    #[test]
    fn corrupted_checksum_rejected() {
        let mut s = encode("sigil", &[0xde, 0xad, 0xbe, 0xef], 63)
            .unwrap()
            .into_bytes();
        let last = *s.last().unwrap();
        *s.last_mut().unwrap() = if last == b'q' { b'p' } else { b'q' };
        let err = decode(std::str::from_utf8(&s).unwrap()).unwrap_err();
        assert!(matches!(err, SigilError::Checksum));
    }

    #[test]
    fn every_single_symbol_flip_detected() {
        let s = encode("flip", &[1, 2, 3, 4, 5, 6, 7, 8], 63).unwrap();
        let bytes = s.as_bytes();
        for i in 0..bytes.len() {
            for &candidate in CHARSET.iter() {
                if candidate == bytes[i] || i < 5 {
                    // Skip the prefix and separator; flips there change the
                    // decoded prefix or split point instead.
                    continue;
                }
                let mut tampered = bytes.to_vec();
                tampered[i] = candidate;
                let tampered = String::from_utf8(tampered).unwrap();
                assert!(
                    decode(&tampered).is_err(),
                    "undetected flip at {} -> {}",
                    i,
                    tampered
                );
            }
        }
    }

    #[test]
    fn non_zero_padding_rejected() {
        // "pad1luczzqwu" encodes the single byte 0xff as words [31, 28];
        // this string carries words [31, 29] (a set padding bit) with a
        // correct checksum over them.
        let err = decode("pad1la95k4nw").unwrap_err();
        assert!(matches!(err, SigilError::Format("non-zero padding")));
    }

    #[test]
    fn excess_padding_rejected() {
        // A single data word is 5 bits of pure padding: no byte sequence
        // encodes to it. Checksum is valid over the word.
        let err = decode("pad1l2latlx").unwrap_err();
        assert!(matches!(err, SigilError::Format("excess padding")));
    }

    #[test]
    fn length_limit_enforced_exactly() {
        // 4 bytes -> 7 data words; "sigil" -> 5 + 1 + 7 + 6 = 19 chars.
        let s = encode("sigil", &[0xde, 0xad, 0xbe, 0xef], 19).unwrap();
        assert_eq!(s.len(), 19);

        let err = encode("sigil", &[0xde, 0xad, 0xbe, 0xef], 18).unwrap_err();
        match err {
            SigilError::EncodingTooLong { required, limit } => {
                assert_eq!(required, 19);
                assert_eq!(limit, 18);
            }
            other => panic!("expected EncodingTooLong, got {:?}", other),
        }
    }

    #[test]
    fn non_ascii_prefix_rejected() {
        let err = encode("café", &[1], 63).unwrap_err();
        assert!(matches!(err, SigilError::Format("invalid prefix character")));
    }

    #[test]
    fn prefix_containing_separator_roundtrips() {
        let s = encode("a1b", &[42], 63).unwrap();
        let (prefix, payload) = decode(&s).unwrap();
        assert_eq!(prefix, "a1b");
        assert_eq!(payload, vec![42]);
    }

    #[test]
    fn upper_case_prefix_encodes_lower_case() {
        let upper = encode("SIGIL", &[0xde, 0xad, 0xbe, 0xef], 63).unwrap();
        let lower = encode("sigil", &[0xde, 0xad, 0xbe, 0xef], 63).unwrap();
        assert_eq!(upper, lower);
    }

    #[test]
    fn bech32_constant_variant_rejected() {
        // Same charset and polynomial, classic Bech32 constant (BIP-173
        // valid string). Must fail our Bech32m residue check.
        let err = decode("a12uel5l").unwrap_err();
        assert!(matches!(err, SigilError::Checksum));
    }
}
