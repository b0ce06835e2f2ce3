//! Random candidate generation.

use num_bigint::{BigUint, RandBigInt};
use num_traits::One;
use rand::RngCore;

use crate::config::MIN_CANDIDATE_BITS;
use crate::error::KeygenError;

/// Half-open range `[2^(bits-1) + 1, 2^bits - 1)` that candidates are drawn from.
pub fn candidate_range(bits: u64) -> Result<(BigUint, BigUint), KeygenError> {
    if bits < MIN_CANDIDATE_BITS {
        return Err(KeygenError::InvalidBitLength {
            bits,
            min_bits: MIN_CANDIDATE_BITS,
        });
    }

    let one = BigUint::one();
    let low = (&one << (bits - 1)) + &one;
    let high = (&one << bits) - &one;

    Ok((low, high))
}

/// Draw a uniformly random candidate of exactly `bits` bits.
///
/// The draw does not force the low bit; even values are left for the sieve
/// to throw away.
pub fn generate_candidate<R: RngCore + ?Sized>(
    bits: u64,
    rng: &mut R,
) -> Result<BigUint, KeygenError> {
    let (low, high) = candidate_range(bits)?;
    Ok(rng.gen_biguint_range(&low, &high))
}
