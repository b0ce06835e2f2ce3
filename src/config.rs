//! Library configuration and key-generation parameters.

use crate::error::KeygenError;

/// Number of Miller-Rabin witness rounds (false-positive bound 4^-20).
pub const MILLER_RABIN_ROUNDS: usize = 20;

/// Fixed RSA public exponent `e = 2^16 + 1`.
pub const PUBLIC_EXPONENT: u32 = 65_537;

/// Size (in bits) of the short prime `q`; `p` receives the remaining bits.
pub const SHORT_PRIME_BITS: u64 = 20;

/// Conventional modulus size for [`crate::generate_key`].
pub const DEFAULT_KEY_BITS: u64 = 2048;

/// Smallest bit length whose candidate range `[2^(n-1)+1, 2^n-1)` is non-empty.
pub const MIN_CANDIDATE_BITS: u64 = 3;

/// Maximum candidate draws for a single prime before giving up.
pub const PRIME_GEN_MAX_ATTEMPTS: usize = 1_000_000;

/// Maximum `(p, q)` draws before giving up on hitting the exact modulus size.
pub const KEY_PAIR_MAX_ATTEMPTS: usize = 1_000;

/// Tunable parameters for prime production and key assembly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeygenConfig {
    /// Witness rounds per Miller-Rabin test.
    pub miller_rabin_rounds: usize,
    /// Bits given to `q`; `p` gets the rest of the modulus.
    pub short_prime_bits: u64,
    /// Public exponent `e`; must be odd and at least 3.
    pub public_exponent: u32,
    /// Cap on candidate draws per prime. A safety margin, never hit in practice.
    pub max_prime_attempts: usize,
    /// Cap on `(p, q)` draws per key. A safety margin, never hit in practice.
    pub max_pair_attempts: usize,
}

impl Default for KeygenConfig {
    fn default() -> Self {
        Self {
            miller_rabin_rounds: MILLER_RABIN_ROUNDS,
            short_prime_bits: SHORT_PRIME_BITS,
            public_exponent: PUBLIC_EXPONENT,
            max_prime_attempts: PRIME_GEN_MAX_ATTEMPTS,
            max_pair_attempts: KEY_PAIR_MAX_ATTEMPTS,
        }
    }
}

impl KeygenConfig {
    /// Reject parameters that cannot produce a valid key.
    pub fn validate(&self) -> Result<(), KeygenError> {
        if self.miller_rabin_rounds == 0 {
            return Err(KeygenError::InvalidConfig(
                "miller_rabin_rounds must be at least 1".to_string(),
            ));
        }
        if self.public_exponent < 3 || self.public_exponent % 2 == 0 {
            return Err(KeygenError::InvalidConfig(format!(
                "public_exponent must be odd and >= 3 (got {})",
                self.public_exponent
            )));
        }
        if self.short_prime_bits < MIN_CANDIDATE_BITS {
            return Err(KeygenError::InvalidConfig(format!(
                "short_prime_bits must be >= {} (got {})",
                MIN_CANDIDATE_BITS, self.short_prime_bits
            )));
        }
        Ok(())
    }

    /// Smallest modulus size this configuration can assemble.
    pub fn min_key_bits(&self) -> u64 {
        self.short_prime_bits + MIN_CANDIDATE_BITS
    }
}
