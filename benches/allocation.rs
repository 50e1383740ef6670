use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nextfit_sim::{NextFitAllocator, PlacementPolicy, ProcessId, Request, Simulation, SimulationConfig};

/// Benchmark allocating into large block tables
fn bench_allocate(c: &mut Criterion) {
    let mut group = c.benchmark_group("next_fit_allocate");

    for &blocks in &[16usize, 256, 4096] {
        let capacities: Vec<u64> = (0..blocks).map(|i| 64 + (i as u64 * 37) % 512).collect();

        group.bench_with_input(BenchmarkId::from_parameter(blocks), &capacities, |b, caps| {
            b.iter(|| {
                let mut alloc = NextFitAllocator::new(caps).unwrap();
                for i in 0..1_000u32 {
                    let size = 8 + (i as u64 * 13) % 128;
                    black_box(alloc.allocate(Request::new(ProcessId::new(i + 1), size)).unwrap());
                }
            });
        });
    }

    group.finish();
}

/// Benchmark the worst case: every request scans the whole table and is denied
fn bench_full_scan_denied(c: &mut Criterion) {
    let capacities = vec![10u64; 4096];

    c.bench_function("next_fit_full_scan_denied", |b| {
        let mut alloc = NextFitAllocator::new(&capacities).unwrap();
        b.iter(|| {
            black_box(alloc.allocate(Request::new(ProcessId::new(1), 11)).unwrap());
        });
    });
}

/// Benchmark a complete run including per-step snapshots
fn bench_simulation_run(c: &mut Criterion) {
    let config = SimulationConfig::new(vec![100, 500, 200, 300, 600], vec![212, 417, 112, 426]);

    c.bench_function("simulation_reference_run", |b| {
        b.iter(|| {
            let report = Simulation::new(config.clone()).unwrap().run().unwrap();
            black_box(report);
        });
    });
}

criterion_group!(
    benches,
    bench_allocate,
    bench_full_scan_denied,
    bench_simulation_run
);
criterion_main!(benches);
