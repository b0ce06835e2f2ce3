use std::sync::OnceLock;

use num_bigint::BigUint;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::RsaKeyMaterial;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn rng(seed: u64) -> StdRng {
    init_logging();
    StdRng::seed_from_u64(seed)
}

/// One 2048-bit key shared by every test that needs a full-size key.
fn key_2048() -> &'static RsaKeyMaterial {
    static KEY: OnceLock<RsaKeyMaterial> = OnceLock::new();
    KEY.get_or_init(|| {
        crate::assemble_key(2048, &mut rng(0x5eed_2048)).expect("assemble_key(2048) failed")
    })
}

fn is_prime_by_trial_division(n: u32) -> bool {
    if n < 2 {
        return false;
    }
    let mut i = 2;
    while i * i <= n {
        if n % i == 0 {
            return false;
        }
        i += 1;
    }
    true
}

/// Primality check that shares no code with this crate.
fn independently_prime(n: &BigUint) -> bool {
    let n = num_bigint_dig::BigUint::from_bytes_be(&n.to_bytes_be());
    num_bigint_dig::prime::probably_prime(&n, 20)
}

pub mod integration;
