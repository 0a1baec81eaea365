use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use topos::geometry::primitives::{Point, SPolygon};
use topos::nfp::Orbiter;
use topos::placement::pack;
use topos::util::{CacheConfig, CacheMode, PackConfig};

criterion_main!(benches);
criterion_group!(benches, orbit_bench, pack_bench);

const N_ITEMS: [usize; 3] = [5, 10, 20];

fn polygon(points: &[(f64, f64)]) -> SPolygon {
    SPolygon::new(points.iter().map(|p| Point::from(*p)).collect()).unwrap()
}

fn shapes() -> Vec<SPolygon> {
    vec![
        polygon(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]),
        polygon(&[(0.0, 0.0), (2.0, 0.0), (1.0, 2.0)]),
        polygon(&[(1.0, 0.0), (2.0, 1.0), (1.0, 2.0), (0.0, 1.0)]),
        polygon(&[(0.0, 0.0), (3.0, 0.0), (3.0, 1.0), (0.0, 1.0)]),
        polygon(&[(0.0, 0.0), (2.0, 0.0), (2.5, 1.0), (1.0, 2.0), (-0.5, 1.0)]),
    ]
}

fn orbit_bench(c: &mut Criterion) {
    let shapes = shapes();
    let orbiter = Orbiter::default();
    let mut group = c.benchmark_group("orbit");
    for (i, stationary) in shapes.iter().enumerate() {
        for (j, sliding) in shapes.iter().enumerate() {
            group.bench_function(BenchmarkId::from_parameter(format!("{i}_{j}")), |b| {
                b.iter(|| orbiter.nfp(black_box(stationary), black_box(sliding)))
            });
        }
    }
    group.finish();
}

fn pack_bench(c: &mut Criterion) {
    let shapes = shapes();
    let mut group = c.benchmark_group("pack");
    group.sample_size(10);
    for n_items in N_ITEMS {
        let items = shapes.iter().cycle().take(n_items).cloned().collect::<Vec<_>>();
        for mode in [CacheMode::Eager, CacheMode::Lazy] {
            let config = PackConfig {
                cache: CacheConfig {
                    mode,
                    ..CacheConfig::default()
                },
                ..PackConfig::default()
            };
            group.bench_with_input(
                BenchmarkId::new(format!("{mode:?}"), n_items),
                &items,
                |b, items| b.iter(|| pack(black_box(items), 6.0, config)),
            );
        }
    }
    group.finish();
}
