#![no_main]
// Feeds arbitrary bytes to both roles of the RSA-authenticated exchange.
use ecdhe::{
    EcDiffieHellmanRsa, Error,
    authenticated::{decode_secure_part, encode_secure_part},
    rsa::RsaPrivateKey,
};
use libfuzzer_sys::fuzz_target;
use rand_chacha::{ChaChaRng, rand_core::SeedableRng};
use std::sync::LazyLock;

static PEERS: LazyLock<(EcDiffieHellmanRsa, EcDiffieHellmanRsa)> = LazyLock::new(|| {
    let mut rng = ChaChaRng::seed_from_u64(0);
    let identity = RsaPrivateKey::new(&mut rng, 1024).unwrap();
    let verifier = EcDiffieHellmanRsa::new(&mut rng, identity.to_public_key()).unwrap();
    let signer = EcDiffieHellmanRsa::new(&mut rng, identity).unwrap();
    (signer, verifier)
});

fuzz_target!(|data: &[u8]| {
    let framed = decode_secure_part(data);
    if let Ok((public, proof)) = framed {
        assert_eq!(encode_secure_part(public, proof).unwrap(), data);
    }

    let mut rng = ChaChaRng::seed_from_u64(data.len() as u64);
    for peer in [&PEERS.0, &PEERS.1] {
        match peer.verified_shared_part(&mut rng, data) {
            Err(Error::TruncatedMessage | Error::LengthMismatch) => assert!(framed.is_err()),
            _ => assert!(framed.is_ok()),
        }
    }
});
