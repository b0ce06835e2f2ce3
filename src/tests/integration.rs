use num_bigint::BigUint;
use num_traits::One;

use super::{independently_prime, key_2048, rng};
use crate::{
    assemble_key, default_rng, generate_prime, produce_prime_with_config, KeyEncoder,
    KeygenConfig, KeygenError, RsaKeyMaterial,
};

#[test]
fn test_2048_bit_key_components() {
    let key = key_2048();

    assert_eq!(key.n().bits(), 2048);
    assert_eq!(key.e(), &BigUint::from(65_537u32));
    assert_eq!(&(key.p() * key.q()), key.n());

    let et = (key.p() - 1u32) * (key.q() - 1u32);
    assert_eq!((key.d() * key.e()) % &et, BigUint::one());

    assert_eq!(key.dp(), &(key.d() % (key.p() - 1u32)));
    assert_eq!(key.dq(), &(key.d() % (key.q() - 1u32)));
    assert_eq!((key.q() * key.qinv()) % key.p(), BigUint::one());

    key.check().expect("2048-bit key failed its own consistency check");
}

#[test]
fn test_encrypt_decrypt_round_trip() {
    let key = key_2048();
    let (n, e) = key.public_components();

    let messages = [
        BigUint::from(3u32),
        BigUint::from(42u32),
        BigUint::from_bytes_be(b"super secret message"),
        n - 2u32,
    ];

    for m in messages {
        let c = m.modpow(e, n);
        assert_eq!(c.modpow(key.d(), n), m);
        assert_eq!(key.encrypt_raw(&m).unwrap(), c);
        assert_eq!(key.decrypt_crt(&c).unwrap(), m);
    }
}

#[test]
fn test_crt_exponents_agree_with_d() {
    let key = key_2048();

    for m in [5u32, 65_537, 1_000_003] {
        let m = BigUint::from(m);
        assert_eq!(m.modpow(key.dp(), key.p()), m.modpow(key.d(), key.p()));
        assert_eq!(m.modpow(key.dq(), key.q()), m.modpow(key.d(), key.q()));
    }
}

#[test]
fn test_raw_operations_reject_oversized_input() {
    let key = key_2048();
    let too_big = key.n().clone();

    assert_eq!(key.encrypt_raw(&too_big), Err(KeygenError::MessageOutOfRange));
    assert_eq!(key.decrypt_crt(&too_big), Err(KeygenError::MessageOutOfRange));
}

struct ComponentList;

impl KeyEncoder for ComponentList {
    type Output = Vec<BigUint>;
    type Error = KeygenError;

    fn encode(&self, key: RsaKeyMaterial) -> Result<Self::Output, Self::Error> {
        key.check()?;
        Ok(vec![
            key.n().clone(),
            key.e().clone(),
            key.d().clone(),
            key.p().clone(),
            key.q().clone(),
            key.dp().clone(),
            key.dq().clone(),
            key.qinv().clone(),
        ])
    }
}

#[test]
fn test_hand_off_to_encoder() {
    let key = assemble_key(256, &mut rng(20)).unwrap();
    let n = key.n().clone();

    let encoded = key.encode_with(&ComponentList).unwrap();
    assert_eq!(encoded.len(), 8);
    assert_eq!(encoded[0], n);
    assert_eq!(encoded[1], BigUint::from(65_537u32));
}

#[test]
fn test_debug_output_hides_private_values() {
    let key = assemble_key(128, &mut rng(21)).unwrap();
    let printed = format!("{:?}", key);

    assert!(printed.contains("bits: 128"));
    assert!(!printed.contains(&key.d().to_string()));
    assert!(!printed.contains(&key.p().to_string()));
}

#[test]
fn test_same_seed_same_key() {
    let a = assemble_key(192, &mut rng(22)).unwrap();
    let b = assemble_key(192, &mut rng(22)).unwrap();
    let c = assemble_key(192, &mut rng(23)).unwrap();

    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_os_entropy_entry_points() {
    let p = generate_prime(128).unwrap();
    assert_eq!(p.bits(), 128);
    assert!(independently_prime(&p));

    let mut rng = default_rng().unwrap();
    let key = assemble_key(160, &mut rng).unwrap();
    assert_eq!(key.bits(), 160);
    key.check().unwrap();
}

#[test]
fn test_prime_with_custom_rounds() {
    let config = KeygenConfig {
        miller_rabin_rounds: 40,
        ..KeygenConfig::default()
    };
    let p = produce_prime_with_config(200, &config, &mut rng(24)).unwrap();
    assert_eq!(p.bits(), 200);
    assert!(independently_prime(&p));
}

#[test]
fn test_generate_key_honors_requested_size() {
    for bits in [48u64, 96, 200] {
        let key = crate::generate_key(bits).unwrap();
        assert_eq!(key.bits(), bits);
        key.check().unwrap();
    }
    assert!(matches!(
        crate::generate_key(22),
        Err(KeygenError::InvalidBitLength { bits: 22, .. })
    ));
}

#[test]
#[ignore] // full-size key from OS entropy; run manually
fn test_generate_default_key() {
    let key = crate::generate_key(crate::config::DEFAULT_KEY_BITS).unwrap();
    assert_eq!(key.bits(), crate::config::DEFAULT_KEY_BITS);
    key.check().unwrap();
}
