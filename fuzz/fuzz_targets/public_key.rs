#![no_main]
// Feeds arbitrary bytes to the ECDH public key decoder and shared secret
// computation on Curve25519.
use ecdhe::{EcDiffieHellman, Error, ecdh::public_key_to_point};
use ecgroup::{CurveGroup, Domain};
use libfuzzer_sys::fuzz_target;
use std::sync::LazyLock;

static KEY_PAIR: LazyLock<EcDiffieHellman<'static>> = LazyLock::new(|| {
    EcDiffieHellman::from_private_key(Domain::curve25519(), &[0x5e; 32]).unwrap()
});

fuzz_target!(|data: &[u8]| {
    let curve = Domain::curve25519().curve();

    match KEY_PAIR.shared_secret_raw(data) {
        Ok(secret) => {
            let point = public_key_to_point(curve, data).unwrap();
            assert!(curve.contains(&point));
            assert!(secret.len() <= 32);
        }
        Err(Error::MalformedPublicKey) => assert!(public_key_to_point(curve, data).is_err()),
        Err(Error::PointNotOnCurve) => {
            let point = public_key_to_point(curve, data).unwrap();
            assert!(!curve.contains(&point));
        }
        // remote point of small order lands on infinity
        Err(err) if err.is_invalid_point_access() => {}
        Err(err) => panic!("unexpected error: {err}"),
    }
});
