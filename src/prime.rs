//! Prime production: candidate -> sieve -> Miller-Rabin, retried until one passes.

use log::{debug, trace};
use num_bigint::BigUint;
use rand::RngCore;

use crate::candidate::generate_candidate;
use crate::config::{KeygenConfig, MILLER_RABIN_ROUNDS, PRIME_GEN_MAX_ATTEMPTS};
use crate::error::KeygenError;
use crate::miller_rabin::is_probably_prime;
use crate::sieve::passes_sieve;
use crate::utils::default_rng;

/// Produce a probable prime of exactly `bits` bits using the default parameters.
pub fn produce_prime<R: RngCore + ?Sized>(bits: u64, rng: &mut R) -> Result<BigUint, KeygenError> {
    produce_prime_bounded(bits, MILLER_RABIN_ROUNDS, PRIME_GEN_MAX_ATTEMPTS, rng)
}

/// Produce a probable prime of exactly `bits` bits using `config`.
pub fn produce_prime_with_config<R: RngCore + ?Sized>(
    bits: u64,
    config: &KeygenConfig,
    rng: &mut R,
) -> Result<BigUint, KeygenError> {
    config.validate()?;
    produce_prime_bounded(bits, config.miller_rabin_rounds, config.max_prime_attempts, rng)
}

/// Generate a random prime of `bits` bits from OS entropy.
pub fn generate_prime(bits: u64) -> Result<BigUint, KeygenError> {
    let mut rng = default_rng()?;
    produce_prime(bits, &mut rng)
}

fn produce_prime_bounded<R: RngCore + ?Sized>(
    bits: u64,
    rounds: usize,
    max_attempts: usize,
    rng: &mut R,
) -> Result<BigUint, KeygenError> {
    let mut sieved_out = 0usize;

    for attempt in 1..=max_attempts {
        let candidate = generate_candidate(bits, rng)?;

        if !passes_sieve(&candidate) {
            trace!("{}-bit candidate rejected by sieve (attempt {})", bits, attempt);
            sieved_out += 1;
            continue;
        }

        if !is_probably_prime(&candidate, rounds, rng)? {
            trace!("{}-bit candidate failed Miller-Rabin (attempt {})", bits, attempt);
            continue;
        }

        debug!(
            "found {}-bit prime after {} attempts ({} rejected by sieve)",
            bits, attempt, sieved_out
        );
        return Ok(candidate);
    }

    Err(KeygenError::AttemptsExhausted {
        what: "prime",
        attempts: max_attempts,
    })
}
