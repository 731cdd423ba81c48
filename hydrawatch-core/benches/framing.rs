use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use hydrawatch_core::{parse_sample, Framer};

fn sensor_stream(frames: usize) -> Vec<u8> {
    let mut bytes = Vec::new();
    for i in 0..frames {
        let text = format!("<temperature={}.5, pressure={}>\r\n", i % 40, i % 2);
        bytes.extend_from_slice(text.as_bytes());
    }
    bytes
}

fn bench_framing(c: &mut Criterion) {
    let bytes = sensor_stream(1000);
    let mut group = c.benchmark_group("framer");
    group.throughput(Throughput::Bytes(bytes.len() as u64));

    group.bench_function("push_per_byte", |b| {
        b.iter(|| {
            let mut framer = Framer::new();
            let mut count = 0;
            for &byte in black_box(&bytes) {
                if framer.push(byte).is_some() {
                    count += 1;
                }
            }
            count
        })
    });

    group.bench_function("extend_batch", |b| {
        b.iter(|| {
            let mut framer = Framer::new();
            framer.extend(black_box(&bytes)).count()
        })
    });

    group.bench_function("frame_and_parse", |b| {
        b.iter(|| {
            let mut framer = Framer::new();
            framer
                .extend(black_box(&bytes))
                .filter(|m| parse_sample(m.as_str()).is_ok())
                .count()
        })
    });

    group.finish();
}

criterion_group!(benches, bench_framing);
criterion_main!(benches);
