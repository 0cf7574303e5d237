//! Criterion benchmark untuk RingBuffer dan BoundedQueue
//!
//! Run dengan: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use fifobuf::core::RingBuffer;
use fifobuf::sync::BoundedQueue;
use std::thread;

fn bench_insert_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("ring_buffer");
    group.throughput(Throughput::Elements(1));

    // Benchmark insert
    group.bench_function("insert", |b| {
        let mut rb: RingBuffer<'_, u64> = RingBuffer::new(65536).unwrap();
        let mut i = 0u64;
        b.iter(|| {
            if rb.insert(black_box(i)).is_err() {
                rb.discard();
                let _ = rb.insert(black_box(i));
            }
            i = i.wrapping_add(1);
        });
    });

    // Benchmark remove
    group.bench_function("remove", |b| {
        let mut rb: RingBuffer<'_, u64> = RingBuffer::new(65536).unwrap();
        // Pre-fill
        for i in 0..32768 {
            let _ = rb.insert(i);
        }
        b.iter(|| {
            if let Some(v) = rb.remove() {
                let _ = rb.insert(black_box(v));
            }
        });
    });

    // Benchmark insert+remove cycle
    group.bench_function("insert_remove_cycle", |b| {
        let mut rb: RingBuffer<'_, u64> = RingBuffer::new(65536).unwrap();
        let mut i = 0u64;
        b.iter(|| {
            let _ = rb.insert(black_box(i));
            black_box(rb.remove());
            i = i.wrapping_add(1);
        });
    });

    group.finish();
}

fn bench_queue(c: &mut Criterion) {
    let mut group = c.benchmark_group("bounded_queue");
    group.throughput(Throughput::Elements(1));

    // Tanpa contention: biaya lock + dua semaphore per operasi
    group.bench_function("try_insert_try_remove", |b| {
        let queue: BoundedQueue<'_, u64> = BoundedQueue::new(1024).unwrap();
        let mut i = 0u64;
        b.iter(|| {
            let _ = queue.try_insert(black_box(i));
            black_box(queue.try_remove());
            i = i.wrapping_add(1);
        });
    });

    group.finish();
}

fn bench_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("throughput");

    // Batch operations, single-owner
    for batch_size in [100, 1000, 10000].iter() {
        group.throughput(Throughput::Elements(*batch_size as u64));
        group.bench_function(format!("batch_{}", batch_size), |b| {
            let mut rb: RingBuffer<'_, u64> = RingBuffer::new(65536).unwrap();
            b.iter(|| {
                for i in 0..*batch_size {
                    let _ = rb.insert(black_box(i as u64));
                }
                for _ in 0..*batch_size {
                    black_box(rb.remove());
                }
            });
        });
    }

    // Satu producer, satu consumer lewat queue kecil: backpressure penuh
    for capacity in [16, 1024].iter() {
        const ITEMS: u64 = 10_000;
        group.throughput(Throughput::Elements(ITEMS));
        group.bench_function(format!("spsc_blocking_cap_{}", capacity), |b| {
            let queue: BoundedQueue<'_, u64> = BoundedQueue::new(*capacity).unwrap();
            b.iter(|| {
                thread::scope(|s| {
                    s.spawn(|| {
                        for i in 0..ITEMS {
                            queue.insert_blocking(i);
                        }
                    });
                    for _ in 0..ITEMS {
                        black_box(queue.remove_blocking());
                    }
                });
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_insert_remove, bench_queue, bench_throughput);
criterion_main!(benches);
