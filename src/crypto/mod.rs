//! # Cryptographic Seams
//!
//! Everything security-sensitive lives behind this module: the signing key
//! handle, the injected capability traits for randomness and MAC
//! computation, and the constant-time comparison that verification rests on.
//!
//! We deliberately chose boring, well-audited cryptography:
//!
//! - **HMAC** (RustCrypto `hmac`) for the integrity tag — the one MAC
//!   construction nobody has managed to break in thirty years.
//! - **OS randomness** (`OsRng`) for identifier payloads. If your OS RNG is
//!   broken, you have bigger problems than identifier collisions.
//! - **`subtle`** for comparisons. Timing side channels are real; hand-rolled
//!   "optimized" equality checks are how you get them.
//!
//! The capability traits exist so tests can substitute deterministic
//! implementations. Production code should never need anything beyond
//! [`OsRandomSource`] and [`HmacProvider`].

pub mod capability;
pub mod compare;
pub mod key;

pub use capability::{HmacProvider, MacProvider, OsRandomSource, RandomSource};
pub use compare::constant_time_eq;
pub use key::{HashAlgorithm, SigningKey};
