//! Cheap trial-division pre-filter run before Miller-Rabin.

use num_bigint::BigUint;
use num_traits::Zero;

/// The first 70 primes, 2 through 349.
pub const SMALL_PRIMES: [u32; 70] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89,
    97, 101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173, 179, 181, 191,
    193, 197, 199, 211, 223, 227, 229, 233, 239, 241, 251, 257, 263, 269, 271, 277, 281, 283,
    293, 307, 311, 313, 317, 331, 337, 347, 349,
];

/// Returns `false` if some table prime `d` divides `candidate` with `d*d <= candidate`.
///
/// A divisor whose square exceeds the candidate never rejects it, so the
/// table primes themselves pass.
pub fn passes_sieve(candidate: &BigUint) -> bool {
    for &divisor in SMALL_PRIMES.iter() {
        let d = BigUint::from(divisor);
        if (candidate % &d).is_zero() && &(&d * &d) <= candidate {
            return false;
        }
    }
    true
}
