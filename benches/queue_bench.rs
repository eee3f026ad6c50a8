use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dnsqueue::dns::Service;
use dnsqueue::resolution::{ResolutionQueue, ResolutionRequest};

/// Benchmark queue operations under the single lock.
/// These are pure in-memory operations that don't require network I/O.
fn benchmark_queue_operations(c: &mut Criterion) {
    c.bench_function("queue_enqueue_dequeue", |b| {
        let queue = ResolutionQueue::new();
        b.iter(|| {
            queue.enqueue(ResolutionRequest::new("example.com", "http"));
            black_box(queue.dequeue_front())
        })
    });

    // Snapshot and removal scan the whole queue
    let queue = ResolutionQueue::new();
    for i in 0..256 {
        queue.enqueue(ResolutionRequest::new(format!("host{i}.example.com"), "https"));
    }

    c.bench_function("queue_snapshot_256", |b| b.iter(|| black_box(queue.snapshot())));

    c.bench_function("queue_remove_missing_256", |b| {
        b.iter(|| black_box(queue.remove_all("absent.example.com")))
    });

    c.bench_function("service_port_lookup", |b| {
        let service = Service::from("imaps");
        b.iter(|| black_box(service.port()))
    });
}

criterion_group!(benches, benchmark_queue_operations);
criterion_main!(benches);
