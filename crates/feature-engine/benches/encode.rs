use criterion::{black_box, criterion_group, criterion_main, Criterion};
use feature_engine::{default_inputs, FeatureEncoder};

fn bench_encode(c: &mut Criterion) {
    let encoder = FeatureEncoder::default();
    let inputs = default_inputs(feature_schema::catalogue());

    c.bench_function("encode", |b| {
        b.iter(|| encoder.encode(black_box(&inputs)))
    });

    let features = encoder.encode(&inputs).unwrap();
    c.bench_function("decode", |b| {
        b.iter(|| encoder.decode(black_box(&features)))
    });
}

criterion_group!(benches, bench_encode);
criterion_main!(benches);
