use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use cx_ecc::{domain, ecdomain_generator_bn, ecpoint_alloc, ecpoint_scalarmul, x25519, CurveId};
use cx_mpi::Arena;
use std::hint::black_box;

fn scalarmul_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("ecpoint_scalarmul");
    group.sample_size(10);

    for curve in [CurveId::Secp256k1, CurveId::Secp384r1, CurveId::Ed25519, CurveId::Curve25519] {
        let len = domain(curve).length;
        let scalar = vec![0xA5u8; len];
        group.bench_with_input(BenchmarkId::from_parameter(format!("{:?}", curve)), &curve, |b, &curve| {
            let mut arena = Arena::default();
            arena.lock(32, 0).unwrap();
            let p = ecpoint_alloc(&mut arena, curve).unwrap();
            b.iter(|| {
                ecdomain_generator_bn(&mut arena, curve, &p).unwrap();
                ecpoint_scalarmul(&mut arena, &p, black_box(&scalar)).unwrap();
            });
        });
    }
    group.finish();
}

fn x25519_benchmark(c: &mut Criterion) {
    let k = [0x5Au8; 32];
    let mut u = [0u8; 32];
    u[0] = 9;
    c.bench_function("x25519", |b| {
        let mut out = [0u8; 32];
        b.iter(|| x25519(&mut out, black_box(&k), black_box(&u)).unwrap());
    });
}

criterion_group!(benches, scalarmul_benchmark, x25519_benchmark);
criterion_main!(benches);
