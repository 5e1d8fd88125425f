use crate::Point;
use rand::distributions::{Distribution, Uniform};
use rand::SeedableRng;

pub const SEED: &[u8; 32] = b"wPYxAkIiHcEmSBAxQFoXFrpYToCe1B71";
pub const SEED2: &[u8; 32] = b"14LzG37Y9EHTcmLW8vBDqWwtYsCeVVyF";

/// Uniformly distributed points in `[-range, range)²`, with `z` drawn from the same range.
pub fn random_points_in_range(range: f64, size: usize, seed: &[u8; 32]) -> Vec<Point> {
    let mut rng = rand::rngs::StdRng::from_seed(*seed);
    let range = Uniform::new(-range, range);
    let mut points = Vec::with_capacity(size);
    for _ in 0..size {
        let x = range.sample(&mut rng);
        let y = range.sample(&mut rng);
        let z = range.sample(&mut rng);
        points.push(Point::new(x, y, z));
    }
    points
}

pub fn random_points_with_seed(size: usize, seed: &[u8; 32]) -> Vec<Point> {
    random_points_in_range(1.0, size, seed)
}
