//! Miller-Rabin probabilistic primality test with random witnesses.

use log::trace;
use num_bigint::{BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::One;
use rand::RngCore;

use crate::error::KeygenError;

/// Write `candidate - 1` as `2^s * d` with `d` odd. Returns `(s, d)`.
///
/// `candidate` must be at least 3.
pub fn decompose(candidate: &BigUint) -> Result<(u64, BigUint), KeygenError> {
    if candidate < &BigUint::from(3u32) {
        return Err(KeygenError::InternalConsistency(format!(
            "cannot decompose {} - 1 into 2^s * d",
            candidate
        )));
    }

    let n_minus_1 = candidate - 1u32;
    let mut d = n_minus_1.clone();
    let mut s: u64 = 0;
    while d.is_even() {
        d >>= 1u32;
        s += 1;
    }

    if (&d << s) != n_minus_1 {
        return Err(KeygenError::InternalConsistency(format!(
            "2^{} * {} != {} - 1",
            s, d, candidate
        )));
    }

    Ok((s, d))
}

/// Returns `true` if `witness` proves `candidate` composite.
///
/// `witness` is expected in `[2, candidate - 1)`.
pub fn proves_composite(candidate: &BigUint, witness: &BigUint) -> Result<bool, KeygenError> {
    let (s, d) = decompose(candidate)?;
    let n_minus_1 = candidate - 1u32;
    Ok(witness_round(witness, &d, s, candidate, &n_minus_1))
}

/// Run `rounds` Miller-Rabin rounds with witnesses drawn from `[2, candidate - 1)`.
///
/// Stops at the first witness that proves compositeness. Values below 4 and
/// even values are classified directly.
pub fn is_probably_prime<R: RngCore + ?Sized>(
    candidate: &BigUint,
    rounds: usize,
    rng: &mut R,
) -> Result<bool, KeygenError> {
    let two = BigUint::from(2u32);

    if candidate < &two {
        return Ok(false);
    }
    if candidate <= &BigUint::from(3u32) {
        return Ok(true);
    }
    if candidate.is_even() {
        return Ok(false);
    }

    let (s, d) = decompose(candidate)?;
    let n_minus_1 = candidate - 1u32;

    for round in 0..rounds {
        let a = rng.gen_biguint_range(&two, &n_minus_1);
        if witness_round(&a, &d, s, candidate, &n_minus_1) {
            trace!("witness round {} proved a {}-bit candidate composite", round, candidate.bits());
            return Ok(false);
        }
    }

    Ok(true)
}

// true if `a` is a witness for compositeness of `n = 2^s * d + 1`
fn witness_round(a: &BigUint, d: &BigUint, s: u64, n: &BigUint, n_minus_1: &BigUint) -> bool {
    // x = a^(2^i * d) mod n, starting at i = 0
    let mut x = a.modpow(d, n);
    if x.is_one() {
        return false;
    }

    for _ in 0..s {
        if &x == n_minus_1 {
            return false;
        }
        x = (&x * &x) % n;
    }

    true
}
