// -*- mode: rust; -*-
//
// This file is part of x25519-donna.
// See LICENSE for licensing information.

//! Benchmark public key derivation and the Diffie-Hellman operation.

use criterion::{criterion_group, criterion_main, Criterion};

use rand::{rngs::StdRng, SeedableRng};

use x25519_donna::{compute_shared, derive_public, PrivateKey, PublicKey};

fn bench_diffie_hellman(c: &mut Criterion) {
    let mut csprng = StdRng::seed_from_u64(0);
    let bob_secret = PrivateKey::random_from_rng(&mut csprng).unwrap();
    let bob_public = PublicKey::from(&bob_secret);

    c.bench_function("diffie_hellman", move |b| {
        b.iter_with_setup(
            || PrivateKey::random_from_rng(&mut csprng).unwrap(),
            |alice_secret| alice_secret.diffie_hellman(&bob_public),
        )
    });
}

fn bench_pubkey_constructor(c: &mut Criterion) {
    let mut csprng = StdRng::seed_from_u64(1);
    let bob_secret = PrivateKey::random_from_rng(&mut csprng).unwrap();

    c.bench_function("PublicKey::from", move |b| {
        b.iter(|| PublicKey::from(&bob_secret))
    });
}

fn bench_byte_api(c: &mut Criterion) {
    let alice_secret = [0x77u8; 32];
    let bob_public = derive_public(&[0x5du8; 32]).unwrap();

    c.bench_function("derive_public", move |b| {
        b.iter(|| derive_public(&alice_secret))
    });
    c.bench_function("compute_shared", move |b| {
        b.iter(|| compute_shared(&alice_secret, &bob_public))
    });
}

criterion_group! {
    name = x25519_benches;
    config = Criterion::default();
    targets =
        bench_diffie_hellman,
        bench_pubkey_constructor,
        bench_byte_api,
}
criterion_main! {
    x25519_benches,
}
