//! Random prime generation and RSA key material assembly.
//!
//! Primes are found by drawing random candidates of the requested size,
//! discarding those with a small factor, and certifying the rest with
//! Miller-Rabin. Two such primes are combined into the raw RSA components
//! `(p, q, n, e, d, dP, dQ, qInv)`; serializing them is left to a
//! [`KeyEncoder`].

pub mod candidate;
pub mod config;
pub mod error;
pub mod keygen;
pub mod miller_rabin;
pub mod prime;
pub mod sieve;
pub mod utils;

#[cfg(test)]
pub mod tests;

pub use crate::config::KeygenConfig;
pub use crate::error::{KeygenError, Result};
pub use crate::keygen::{assemble_key, assemble_key_with_config, generate_key};
pub use crate::keygen::{KeyEncoder, RsaKeyMaterial};
pub use crate::prime::{generate_prime, produce_prime, produce_prime_with_config};
pub use crate::utils::{default_rng, mod_inverse};
