use palette::Srgb;
use rand::Rng;
use tracing::trace;

use crate::distance::{Centroid, distance};

/// Random candidates examined when choosing each seed after the first.
pub const PROBE_COUNT: usize = 32;

/// Choose `k` starting centroids with a bounded farthest-point heuristic.
///
/// The first seed is a uniformly random sample. Each following seed is the one
/// among [`PROBE_COUNT`] random probes (drawn with replacement) that lies
/// farthest from its nearest already-chosen seed. When no probe is strictly
/// farther than zero, as happens on single-color input, a random sample is
/// taken instead so the loop always advances.
///
/// An empty sample set yields `k` gray centroids.
pub fn initialize_centroids<R: Rng>(samples: &[Srgb<u8>], k: usize, rng: &mut R) -> Vec<Centroid> {
    if samples.is_empty() {
        return vec![Centroid::GRAY; k];
    }

    let mut centroids = Vec::with_capacity(k);
    if k == 0 {
        return centroids;
    }

    let n = samples.len();
    centroids.push(Centroid::from(samples[rng.random_range(0..n)]));

    while centroids.len() < k {
        let mut best: Option<Centroid> = None;
        let mut best_dist = 0.0;

        for _ in 0..PROBE_COUNT {
            let probe = Centroid::from(samples[rng.random_range(0..n)]);
            let nearest = centroids
                .iter()
                .map(|c| distance(&probe, c))
                .fold(f64::INFINITY, f64::min);
            if nearest > best_dist {
                best_dist = nearest;
                best = Some(probe);
            }
        }

        let next = match best {
            Some(c) => c,
            None => {
                trace!(
                    seeded = centroids.len(),
                    "no probe improved, falling back to random sample"
                );
                Centroid::from(samples[rng.random_range(0..n)])
            }
        };
        centroids.push(next);
    }

    centroids
}
