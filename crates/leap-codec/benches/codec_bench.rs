use criterion::{black_box, criterion_group, criterion_main, Criterion};
use leap_codec::{AccessPoint, BitStream, HilbertCurve, SpatialCodec};

fn stream(len: usize) -> BitStream {
    (0..len).map(|i| (i * 7 + 3) % 5 < 2).collect()
}

fn bench_curve_build_16(c: &mut Criterion) {
    c.bench_function("hilbert_curve_build_16", |b| {
        b.iter(|| HilbertCurve::new(black_box(16)))
    });
}

fn bench_encode_8(c: &mut Criterion) {
    let codec = SpatialCodec::leap(8).unwrap();
    let bits = stream(codec.frame_bits());
    c.bench_function("encode_8_ap3", |b| {
        b.iter(|| codec.encode(black_box(&bits), AccessPoint::Ap3))
    });
}

fn bench_decode_8(c: &mut Criterion) {
    let codec = SpatialCodec::leap(8).unwrap();
    let frame = codec.encode(&stream(codec.frame_bits()), AccessPoint::Ap1).unwrap();
    c.bench_function("decode_8", |b| b.iter(|| codec.decode(black_box(&frame))));
}

fn bench_hardware_map_8(c: &mut Criterion) {
    let codec = SpatialCodec::leap(8).unwrap();
    let frame = codec.encode(&stream(codec.frame_bits()), AccessPoint::Ap0).unwrap();
    c.bench_function("hardware_map_8", |b| {
        b.iter(|| codec.hardware_map(black_box(&frame)))
    });
}

criterion_group!(
    benches,
    bench_curve_build_16,
    bench_encode_8,
    bench_decode_8,
    bench_hardware_map_8,
);
criterion_main!(benches);
