//! Constant-time byte comparison.
//!
//! Verification compares a caller-supplied string against a recomputed
//! canonical one. An early-exit comparison would leak, through timing, how
//! many leading bytes of a guess are correct — a classic oracle. There is
//! deliberately no fast-path fallback here: every call pays full length.

use subtle::ConstantTimeEq;

/// Compare two byte slices in constant time.
///
/// Slices of different lengths compare unequal immediately; length is
/// public information (it is visible in the encoded string itself).
/// Equal-length slices are XOR-accumulated over every byte regardless of
/// where the first mismatch occurs.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}
