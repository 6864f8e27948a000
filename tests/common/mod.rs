#![allow(dead_code)]

use dpam::DissimilarityMeasure;
use rand::prelude::*;

/// Six points in two well separated groups of three.
pub fn two_groups() -> Vec<Vec<f64>> {
    vec![
        vec![1.0, 1.0],
        vec![1.5, 2.0],
        vec![2.0, 1.2],
        vec![8.0, 8.0],
        vec![8.5, 9.0],
        vec![9.0, 8.2],
    ]
}

/// `n` points scattered around `centers` with a fixed seed.
pub fn blobs(seed: u64, n: usize, centers: &[[f64; 2]], spread: f64) -> Vec<Vec<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|i| {
            let [cx, cy] = centers[i % centers.len()];
            vec![
                cx + rng.gen_range(-spread..spread),
                cy + rng.gen_range(-spread..spread),
            ]
        })
        .collect()
}

/// Uniformly random points in the unit cube of dimension `dims`.
pub fn uniform(seed: u64, n: usize, dims: usize) -> Vec<Vec<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| (0..dims).map(|_| rng.gen::<f64>()).collect())
        .collect()
}

/// Points on a `side` x `side` integer grid. Small grids repeat rows and tie
/// distances.
pub fn integer_grid(seed: u64, n: usize, side: u32) -> Vec<Vec<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| (0..2).map(|_| rng.gen_range(0..side) as f64).collect())
        .collect()
}

/// Total distance of every point to its nearest medoid.
pub fn cost(data: &[Vec<f64>], medoids: &[usize], measure: DissimilarityMeasure) -> f64 {
    data.iter()
        .map(|point| {
            medoids
                .iter()
                .map(|&m| measure.distance(point, &data[m]))
                .fold(f64::INFINITY, f64::min)
        })
        .sum()
}

/// The row minimising the total distance to all rows, first one on ties.
pub fn most_central(data: &[Vec<f64>], measure: DissimilarityMeasure) -> usize {
    let mut best = 0;
    let mut best_total = f64::MAX;
    for (i, candidate) in data.iter().enumerate() {
        let total = data
            .iter()
            .fold(0.0, |acc, point| acc + measure.distance(point, candidate));
        if total < best_total {
            best_total = total;
            best = i;
        }
    }
    best
}

/// The lowest cost over every pair of rows.
pub fn best_pair(data: &[Vec<f64>], measure: DissimilarityMeasure) -> ((usize, usize), f64) {
    let mut best = ((0, 1), f64::INFINITY);
    for a in 0..data.len() {
        for b in a + 1..data.len() {
            let c = cost(data, &[a, b], measure);
            if c < best.1 {
                best = ((a, b), c);
            }
        }
    }
    best
}

pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}
