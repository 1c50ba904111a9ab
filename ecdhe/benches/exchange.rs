//! Key agreement benchmarks

use criterion::{
    BenchmarkGroup, Criterion, criterion_group, criterion_main, measurement::Measurement,
};
use ecdhe::{EcDiffieHellman, EcDiffieHellmanRsa, Prf, ecgroup::Domain, kdf, rsa::RsaPrivateKey};
use hex_literal::hex;
use rand_chacha::{ChaCha20Rng, rand_core::SeedableRng};
use std::hint::black_box;

const ALICE_SCALAR: [u8; 32] =
    hex!("6a2cb91da5fb77b12a99c0eb872f4cdf4566b25172c1163c7da518730a6d0770");
const BOB_SCALAR: [u8; 32] =
    hex!("6be088ff278b2f1cfdb6182629b13b6fe60e80838b7fe1794b8a4a627e08ab58");

fn key_pair(scalar: &[u8]) -> EcDiffieHellman<'static> {
    EcDiffieHellman::from_private_key(Domain::curve25519(), scalar).unwrap()
}

fn bench_key_generation<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    let mut rng = ChaCha20Rng::seed_from_u64(0);
    group.bench_function("generate", |b| {
        b.iter(|| EcDiffieHellman::new(black_box(&mut rng)).unwrap())
    });
}

fn bench_shared_secret<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    let alice = key_pair(&ALICE_SCALAR);
    let bob_public = key_pair(&BOB_SCALAR).public_key().unwrap();
    group.bench_function("shared_secret_raw", |b| {
        b.iter(|| alice.shared_secret_raw(black_box(&bob_public)).unwrap())
    });
}

fn bench_stretch<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    let secret = hex!("4217161e3c9bf076339ed147c9217ee0250f3580f43b8e72e12dcea45b9d5d4a");
    for prf in [Prf::HmacSha1, Prf::HmacSha256] {
        group.bench_function(format!("stretch/{prf:?}/10000"), |b| {
            b.iter(|| kdf::stretch(prf, black_box(&secret), b"salt0123", 10_000, 32).unwrap())
        });
    }
}

fn bench_authenticated<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    let mut rng = ChaCha20Rng::seed_from_u64(1);
    let identity = RsaPrivateKey::new(&mut rng, 2048).unwrap();
    let signer = EcDiffieHellmanRsa::new(&mut rng, identity.clone()).unwrap();
    let verifier = EcDiffieHellmanRsa::new(&mut rng, identity.to_public_key()).unwrap();

    let from_signer = signer.secure_public_part(&mut rng).unwrap();
    let from_verifier = verifier.secure_public_part(&mut rng).unwrap();

    group.bench_function("rsa/verify_signer", |b| {
        b.iter(|| {
            verifier
                .verified_shared_part(&mut rng, black_box(&from_signer))
                .unwrap()
        })
    });
    group.bench_function("rsa/decrypt_verifier", |b| {
        b.iter(|| {
            signer
                .verified_shared_part(&mut rng, black_box(&from_verifier))
                .unwrap()
        })
    });
}

fn bench_exchange(c: &mut Criterion) {
    let mut group = c.benchmark_group("ECDHE/Curve25519");
    group.sample_size(10);
    bench_key_generation(&mut group);
    bench_shared_secret(&mut group);
    bench_stretch(&mut group);
    bench_authenticated(&mut group);
    group.finish();
}

criterion_group!(benches, bench_exchange);
criterion_main!(benches);
