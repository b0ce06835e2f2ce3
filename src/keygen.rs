//! RSA key material assembly from two generated primes.
//!
//! The modulus is split asymmetrically: `p` gets `total_bits - 20` bits and
//! `q` gets 20. A pair whose product misses the requested size is thrown away
//! and both primes are drawn again.

use core::fmt;

use log::{debug, info};
use num_bigint::BigUint;
use num_traits::One;
use rand::RngCore;

use crate::config::KeygenConfig;
use crate::error::KeygenError;
use crate::prime::produce_prime_with_config;
use crate::utils::{default_rng, mod_inverse};

/// Raw RSA key components `(p, q, n, e, d, dP, dQ, qInv)`.
#[derive(Clone, PartialEq, Eq)]
pub struct RsaKeyMaterial {
    p: BigUint,
    q: BigUint,
    n: BigUint,
    e: BigUint,
    d: BigUint,
    dp: BigUint,
    dq: BigUint,
    qinv: BigUint,
}

/// Downstream consumer of finished key material, e.g. a PEM/DER writer.
pub trait KeyEncoder {
    type Output;
    type Error;

    fn encode(&self, key: RsaKeyMaterial) -> Result<Self::Output, Self::Error>;
}

impl RsaKeyMaterial {
    pub fn p(&self) -> &BigUint {
        &self.p
    }

    pub fn q(&self) -> &BigUint {
        &self.q
    }

    pub fn n(&self) -> &BigUint {
        &self.n
    }

    pub fn e(&self) -> &BigUint {
        &self.e
    }

    pub fn d(&self) -> &BigUint {
        &self.d
    }

    /// `d mod (p - 1)`
    pub fn dp(&self) -> &BigUint {
        &self.dp
    }

    /// `d mod (q - 1)`
    pub fn dq(&self) -> &BigUint {
        &self.dq
    }

    /// `q^-1 mod p`
    pub fn qinv(&self) -> &BigUint {
        &self.qinv
    }

    /// Size of the modulus in bits.
    pub fn bits(&self) -> u64 {
        self.n.bits()
    }

    /// The public half `(n, e)`.
    pub fn public_components(&self) -> (&BigUint, &BigUint) {
        (&self.n, &self.e)
    }

    /// Hand the key over to an encoder.
    pub fn encode_with<E: KeyEncoder>(self, encoder: &E) -> Result<E::Output, E::Error> {
        encoder.encode(self)
    }

    /// Textbook RSA public operation `m^e mod n`.
    pub fn encrypt_raw(&self, message: &BigUint) -> Result<BigUint, KeygenError> {
        if message >= &self.n {
            return Err(KeygenError::MessageOutOfRange);
        }
        Ok(message.modpow(&self.e, &self.n))
    }

    /// Private operation `c^d mod n`, computed through the CRT parameters.
    pub fn decrypt_crt(&self, ciphertext: &BigUint) -> Result<BigUint, KeygenError> {
        if ciphertext >= &self.n {
            return Err(KeygenError::MessageOutOfRange);
        }

        let m1 = ciphertext.modpow(&self.dp, &self.p);
        let m2 = ciphertext.modpow(&self.dq, &self.q);

        // h = qInv * (m1 - m2) mod p
        let m2_mod_p = &m2 % &self.p;
        let diff = if m1 >= m2_mod_p {
            m1 - m2_mod_p
        } else {
            m1 + &self.p - m2_mod_p
        };
        let h = (&self.qinv * diff) % &self.p;

        Ok(m2 + h * &self.q)
    }

    /// Re-verify the relations between all components.
    pub fn check(&self) -> Result<(), KeygenError> {
        let one = BigUint::one();
        let p_minus_1 = &self.p - 1u32;
        let q_minus_1 = &self.q - 1u32;

        if &self.p * &self.q != self.n {
            return Err(inconsistent("n != p * q"));
        }
        if self.e <= one || self.e >= self.n {
            return Err(inconsistent("e out of range"));
        }
        if (&self.e * &self.d) % (&p_minus_1 * &q_minus_1) != one {
            return Err(inconsistent("e * d != 1 mod (p-1)(q-1)"));
        }
        if &self.d % &p_minus_1 != self.dp {
            return Err(inconsistent("dP != d mod (p-1)"));
        }
        if &self.d % &q_minus_1 != self.dq {
            return Err(inconsistent("dQ != d mod (q-1)"));
        }
        if (&self.q * &self.qinv) % &self.p != one {
            return Err(inconsistent("q * qInv != 1 mod p"));
        }

        Ok(())
    }
}

// Private values stay out of logs and panic messages.
impl fmt::Debug for RsaKeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaKeyMaterial")
            .field("bits", &self.bits())
            .field("n", &self.n)
            .field("e", &self.e)
            .finish_non_exhaustive()
    }
}

fn inconsistent(msg: &str) -> KeygenError {
    KeygenError::InternalConsistency(msg.to_string())
}

/// Assemble an RSA key whose modulus has exactly `total_bits` bits, with `e = 65537`.
pub fn assemble_key<R: RngCore + ?Sized>(
    total_bits: u64,
    rng: &mut R,
) -> Result<RsaKeyMaterial, KeygenError> {
    assemble_key_with_config(total_bits, &KeygenConfig::default(), rng)
}

/// Generate a `total_bits`-bit key from OS entropy.
pub fn generate_key(total_bits: u64) -> Result<RsaKeyMaterial, KeygenError> {
    let mut rng = default_rng()?;
    assemble_key(total_bits, &mut rng)
}

/// Assemble a key using the exponent, short-prime size and retry caps in `config`.
pub fn assemble_key_with_config<R: RngCore + ?Sized>(
    total_bits: u64,
    config: &KeygenConfig,
    rng: &mut R,
) -> Result<RsaKeyMaterial, KeygenError> {
    config.validate()?;

    let min_bits = config.min_key_bits();
    if total_bits < min_bits {
        return Err(KeygenError::InvalidBitLength {
            bits: total_bits,
            min_bits,
        });
    }

    let (p, q, n, attempts) = draw_pair(total_bits, config, rng)?;

    let e = BigUint::from(config.public_exponent);
    let p_minus_1 = &p - 1u32;
    let q_minus_1 = &q - 1u32;
    let et = &p_minus_1 * &q_minus_1;

    let d = mod_inverse(&e, &et).ok_or(KeygenError::ModularInverseNotFound {
        what: "e mod (p-1)(q-1)",
    })?;

    let dp = &d % &p_minus_1;
    let dq = &d % &q_minus_1;
    let qinv = mod_inverse(&q, &p).ok_or(KeygenError::ModularInverseNotFound { what: "q mod p" })?;

    info!("assembled {}-bit RSA key after {} prime pair(s)", n.bits(), attempts);

    Ok(RsaKeyMaterial {
        p,
        q,
        n,
        e,
        d,
        dp,
        dq,
        qinv,
    })
}

// Returns (p, q, n, pairs drawn).
fn draw_pair<R: RngCore + ?Sized>(
    total_bits: u64,
    config: &KeygenConfig,
    rng: &mut R,
) -> Result<(BigUint, BigUint, BigUint, usize), KeygenError> {
    let long_bits = total_bits - config.short_prime_bits;

    for attempt in 1..=config.max_pair_attempts {
        let p = produce_prime_with_config(long_bits, config, rng)?;
        let q = produce_prime_with_config(config.short_prime_bits, config, rng)?;
        let n = &p * &q;

        if n.bits() == total_bits {
            return Ok((p, q, n, attempt));
        }

        debug!(
            "modulus has {} bits, wanted {}; drawing a new pair",
            n.bits(),
            total_bits
        );
    }

    Err(KeygenError::AttemptsExhausted {
        what: "prime pair",
        attempts: config.max_pair_attempts,
    })
}
