//! Iris - Inter-Process Messenger over POSIX Signals
//!
//! Arsitektur:
//! - One Bit per Signal: SIGUSR1 = 0, SIGUSR2 = 1
//! - Lock-Free: handler hanya push ke atomic event queue
//! - No-Allocation: semua buffer pre-allocated
//! - MSB-first framing dengan NUL terminator

use std::time::Instant;

use iris::core::EventQueue;
use iris::protocol::{BinaryEvent, BitEncoder, MessageAssembler};

fn main() {
    println!("🚀 Iris Signal Messenger - PoC v0.1");
    println!("===================================\n");

    // Benchmark Event Queue
    benchmark_event_queue();

    // Benchmark Bit Codec
    benchmark_codec();

    // In-memory loopback demo
    loopback_demo();

    println!("\n✅ All benchmarks complete!");
    println!("\nTo start server: cargo run --release --bin iris_server");
}

fn benchmark_event_queue() {
    println!("📊 Event Queue Benchmark (Lock-Free SPSC)");
    println!("-----------------------------------------");

    const ITERATIONS: usize = 1_000_000;
    let queue: EventQueue<65536> = EventQueue::new();

    // Warm up
    for i in 0..1000 {
        queue.push(event_for(i));
    }
    for _ in 0..1000 {
        queue.pop();
    }

    // Benchmark push
    let start = Instant::now();
    for i in 0..ITERATIONS {
        while !queue.push(event_for(i)) {
            queue.pop();
        }
    }
    let push_duration = start.elapsed();

    // Drain
    while queue.pop().is_some() {}

    // Benchmark pop
    for i in 0..ITERATIONS.min(65536) {
        queue.push(event_for(i));
    }

    let start = Instant::now();
    while queue.pop().is_some() {}
    let pop_duration = start.elapsed();

    let push_ns = push_duration.as_nanos() as f64 / ITERATIONS as f64;
    let pop_ns = pop_duration.as_nanos() as f64 / 65536.0;

    println!("  Operations: {}", ITERATIONS);
    println!(
        "  Push latency: {:.2} ns/op ({:.3} μs/op)",
        push_ns,
        push_ns / 1000.0
    );
    println!(
        "  Pop latency:  {:.2} ns/op ({:.3} μs/op)",
        pop_ns,
        pop_ns / 1000.0
    );
    println!(
        "  Throughput:   {:.2} M ops/sec\n",
        ITERATIONS as f64 / push_duration.as_secs_f64() / 1_000_000.0
    );
}

fn benchmark_codec() {
    println!("📊 Bit Codec Benchmark (Encode + Assemble)");
    println!("------------------------------------------");

    const ITERATIONS: usize = 100_000;
    let payload = [0x55u8; 64];
    let events: Vec<BinaryEvent> = BitEncoder::new(&payload[..]).collect();

    // Benchmark encode
    let start = Instant::now();
    let mut ones = 0usize;
    for _ in 0..ITERATIONS {
        for event in BitEncoder::new(&payload[..]) {
            ones += event.as_u8() as usize;
        }
    }
    let encode_duration = start.elapsed();

    // Benchmark assemble
    let mut assembler = MessageAssembler::new();
    let start = Instant::now();
    let mut lines = 0usize;
    for _ in 0..ITERATIONS {
        for &event in &events {
            if assembler.push(event).is_some() {
                lines += 1;
            }
        }
    }
    let assemble_duration = start.elapsed();

    let encode_ns = encode_duration.as_nanos() as f64 / ITERATIONS as f64;
    let assemble_ns = assemble_duration.as_nanos() as f64 / ITERATIONS as f64;

    println!("  Payload size: {} bytes ({} events/message)", payload.len(), events.len());
    println!("  Messages: {} (one bits seen: {}, lines out: {})", ITERATIONS, ones, lines);
    println!(
        "  Encode latency:   {:.2} ns/msg ({:.3} μs/msg)",
        encode_ns,
        encode_ns / 1000.0
    );
    println!(
        "  Assemble latency: {:.2} ns/msg ({:.3} μs/msg)",
        assemble_ns,
        assemble_ns / 1000.0
    );
    println!(
        "  Throughput:       {:.2} M msgs/sec\n",
        ITERATIONS as f64 / encode_duration.as_secs_f64() / 1_000_000.0
    );
}

fn loopback_demo() {
    println!("📊 In-Memory Loopback");
    println!("---------------------");

    let payload = b"Hi";
    let mut assembler = MessageAssembler::new();
    let mut output: Vec<Vec<u8>> = Vec::new();

    for event in BitEncoder::new(payload) {
        if let Some(line) = assembler.push(event) {
            output.push(line.to_vec());
        }
    }

    println!("  Sent:     {:?}", String::from_utf8_lossy(payload));
    for line in &output {
        println!("  Received: {:?}", String::from_utf8_lossy(line));
    }
    println!(
        "  Events:   {} ({} per byte plus terminator)",
        BitEncoder::event_count(payload),
        8
    );
}

#[inline(always)]
fn event_for(i: usize) -> BinaryEvent {
    if i & 1 == 0 {
        BinaryEvent::Zero
    } else {
        BinaryEvent::One
    }
}
