//! Criterion benchmarks for the placement engine and set assembly.
//! Focus: one regime each (rising, falling, vertical) on the 60×60 reference canvas.
//! Results: by default under target/criterion.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use fracnet::api::{
    generate_centers, generate_set, reference_configs, sample_spacing, LengthDist,
    PlacementLimits, PlacementRequest, SamplingCfg,
};
use fracnet::geom2::deg_to_rad;
use rand::{rngs::StdRng, SeedableRng};

fn bench_placement(c: &mut Criterion) {
    let (canvas, _) = reference_configs();
    let mut group = c.benchmark_group("placement");
    for &theta in &[30.0f64, 140.0, 90.0] {
        let mut rng = StdRng::seed_from_u64(5);
        let spacing = sample_spacing(&mut rng, 3.0, 1000).unwrap();
        let lengths = LengthDist::Normal.sample(&mut rng, 6.0, 2.0, 1000).unwrap();
        group.bench_with_input(
            BenchmarkId::new("generate_centers", theta as u32),
            &theta,
            |b, &theta| {
                b.iter_batched(
                    || StdRng::seed_from_u64(11),
                    |mut rng| {
                        let req = PlacementRequest {
                            theta: deg_to_rad(theta),
                            spacing: 3.0,
                            spacing_samples: &spacing,
                            length: 6.0,
                            length_samples: &lengths,
                        };
                        let _pool =
                            generate_centers(&mut rng, &req, &canvas, &PlacementLimits::default());
                    },
                    BatchSize::SmallInput,
                )
            },
        );
    }

    let (_, configs) = reference_configs();
    group.bench_function(BenchmarkId::new("generate_set", "set1"), |b| {
        b.iter_batched(
            || StdRng::seed_from_u64(5),
            |mut rng| {
                let _set = generate_set(&mut rng, &configs[0], &canvas, &SamplingCfg::default());
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(benches, bench_placement);
criterion_main!(benches);
