//! Criterion benchmark untuk Event Queue dan Bit Codec
//!
//! Run dengan: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use iris::core::EventQueue;
use iris::protocol::{BinaryEvent, BitEncoder, MessageAssembler};

fn event_for(i: u64) -> BinaryEvent {
    if i & 1 == 0 {
        BinaryEvent::Zero
    } else {
        BinaryEvent::One
    }
}

fn bench_push_pop(c: &mut Criterion) {
    let mut group = c.benchmark_group("event_queue");
    group.throughput(Throughput::Elements(1));

    // Benchmark push
    group.bench_function("push", |b| {
        let queue: EventQueue<65536> = EventQueue::new();
        let mut i = 0u64;
        b.iter(|| {
            let event = event_for(i);
            if !queue.push(black_box(event)) {
                queue.pop();
                queue.push(black_box(event));
            }
            i = i.wrapping_add(1);
        });
    });

    // Benchmark pop
    group.bench_function("pop", |b| {
        let queue: EventQueue<65536> = EventQueue::new();
        // Pre-fill
        for i in 0..32768 {
            queue.push(event_for(i));
        }
        b.iter(|| {
            if let Some(event) = queue.pop() {
                queue.push(black_box(event));
            }
        });
    });

    // Benchmark push+pop cycle (jalur handler -> drain)
    group.bench_function("push_pop_cycle", |b| {
        let queue: EventQueue<65536> = EventQueue::new();
        let mut i = 0u64;
        b.iter(|| {
            queue.push(black_box(event_for(i)));
            let _ = queue.pop();
            i = i.wrapping_add(1);
        });
    });

    group.finish();
}

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");
    let payload = [0x55u8; 64];

    // 64 byte payload + 1 byte terminator
    group.throughput(Throughput::Bytes(65));

    group.bench_function("encode_64b", |b| {
        b.iter(|| {
            let mut ones = 0usize;
            for event in BitEncoder::new(black_box(&payload[..])) {
                ones += event.as_u8() as usize;
            }
            black_box(ones)
        });
    });

    group.bench_function("assemble_64b", |b| {
        let events: Vec<BinaryEvent> = BitEncoder::new(&payload[..]).collect();
        let mut assembler = MessageAssembler::new();
        b.iter(|| {
            for &event in &events {
                if let Some(line) = assembler.push(event) {
                    black_box(line.len());
                }
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_push_pop, bench_codec);
criterion_main!(benches);
