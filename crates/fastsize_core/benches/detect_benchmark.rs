use criterion::{Criterion, black_box, criterion_group, criterion_main};
use fastsize_core::detect_bytes;

fn jpeg_with_metadata(segments: usize) -> Vec<u8> {
    let mut data = vec![0xFF, 0xD8];
    for _ in 0..segments {
        data.extend_from_slice(&[0xFF, 0xE1, 0x10, 0x02]);
        data.extend(std::iter::repeat_n(0u8, 0x1000));
    }
    data.extend_from_slice(&[
        0xFF, 0xC0, 0x00, 0x11, 0x08, 0x0F, 0xA0, 0x17, 0x70, 0x03, 0x01, 0x22, 0x00, 0x02, 0x11,
        0x01, 0x03, 0x11, 0x01,
    ]);
    data
}

fn bench_detect(c: &mut Criterion) {
    let png = {
        let mut data = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 13];
        data.extend_from_slice(b"IHDR");
        data.extend_from_slice(&1920u32.to_be_bytes());
        data.extend_from_slice(&1080u32.to_be_bytes());
        data
    };
    let jpeg = jpeg_with_metadata(16);

    c.bench_function("detect_png", |b| b.iter(|| detect_bytes(black_box(&png))));
    c.bench_function("detect_jpeg_16_app1", |b| {
        b.iter(|| detect_bytes(black_box(&jpeg)))
    });
}

criterion_group!(benches, bench_detect);
criterion_main!(benches);
