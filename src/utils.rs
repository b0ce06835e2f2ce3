use getrandom::getrandom;
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{One, Zero};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::KeygenError;

/// Extended Euclidean algorithm.
pub fn extended_gcd(a: BigInt, b: BigInt) -> (BigInt, BigInt, BigInt) {
    if b.is_zero() {
        return (a, BigInt::one(), BigInt::zero());
    }

    let (gcd, x1, y1) = extended_gcd(b.clone(), &a % &b);
    let x = y1.clone();
    let y = x1 - (&a / &b) * y1;

    (gcd, x, y)
}

/// Compute `a^-1 mod m`, or `None` when `gcd(a, m) != 1`.
pub fn mod_inverse(a: &BigUint, m: &BigUint) -> Option<BigUint> {
    if m.is_zero() {
        return None;
    }

    let a_bigint = BigInt::from_biguint(Sign::Plus, a % m);
    let m_bigint = BigInt::from_biguint(Sign::Plus, m.clone());

    let (gcd, x, _) = extended_gcd(a_bigint, m_bigint.clone());
    if gcd != BigInt::one() {
        return None;
    }

    // Ensure a positive result.
    let mut x_mod = x % &m_bigint;
    if x_mod.sign() == Sign::Minus {
        x_mod += &m_bigint;
    }

    x_mod.to_biguint()
}

/// A `StdRng` seeded from the operating system's entropy source.
pub fn default_rng() -> Result<StdRng, KeygenError> {
    let mut seed = <StdRng as SeedableRng>::Seed::default();
    getrandom(&mut seed).map_err(|_| KeygenError::RandomGenerationFailed)?;
    Ok(StdRng::from_seed(seed))
}
