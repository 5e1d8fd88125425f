use std::{iter::FromIterator, time::Duration};

use criterion::Criterion;
use surface_delaunay::{DelaunayTriangulation, Triangulation};

use crate::benchmark_utilities::{uniform_distribution, uniform_f64, RANGE, SEED2};

pub fn locate_benchmark(c: &mut Criterion) {
    const NUM_ELEMENTS: usize = 20_000;

    let mut group = c.benchmark_group("locate benchmark (uniform)");
    group
        .warm_up_time(Duration::from_secs(2))
        .measurement_time(Duration::from_secs(4));

    let triangulation: DelaunayTriangulation =
        DelaunayTriangulation::from_iter(uniform_distribution(*SEED2, RANGE).take(NUM_ELEMENTS));

    let mut elements = uniform_f64();
    group.bench_function("locate (last used face)", |b| {
        b.iter_with_setup(
            || elements.next().unwrap(),
            |point| triangulation.locate(point.x, point.y),
        )
    });

    // Each query starts at the face found by the previous one
    let mut walk = crate::benchmark_utilities::random_walk_distribution(RANGE * 1.0e-3, *SEED2);
    group.bench_function("locate (last used face, local queries)", |b| {
        b.iter_with_setup(
            || walk.next().unwrap(),
            |point| triangulation.locate(point.x, point.y),
        )
    });

    group.finish();
}
