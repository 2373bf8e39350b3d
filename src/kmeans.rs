use palette::Srgb;
use tracing::{debug, trace};

use crate::distance::{Centroid, distance};

/// What happens to a centroid that receives no pixels in an iteration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EmptyClusterPolicy {
    /// Reset to neutral gray (128, 128, 128).
    #[default]
    Gray,
    /// Keep the position from the previous iteration.
    Retain,
}

/// Index of the nearest centroid for every sample. Ties go to the lower index.
pub fn assign(samples: &[Srgb<u8>], centroids: &[Centroid]) -> Vec<usize> {
    samples
        .iter()
        .map(|s| nearest(&Centroid::from(s), centroids))
        .collect()
}

#[inline]
fn nearest(point: &Centroid, centroids: &[Centroid]) -> usize {
    let mut best_idx = 0;
    let mut best_dist = f64::INFINITY;
    for (idx, c) in centroids.iter().enumerate() {
        let d = distance(point, c);
        if d < best_dist {
            best_dist = d;
            best_idx = idx;
        }
    }
    best_idx
}

/// Run `iterations` rounds of Lloyd's algorithm starting from `initial`.
///
/// Every round is an assignment pass that fills per-cluster sums and counts,
/// followed by a reduction pass that replaces each centroid with the mean of
/// its members. There is no convergence check. The output always has the same
/// length and order as `initial`.
pub fn cluster(
    samples: &[Srgb<u8>],
    initial: &[Centroid],
    iterations: usize,
    policy: EmptyClusterPolicy,
) -> Vec<Centroid> {
    let k = initial.len();
    let mut centroids = initial.to_vec();
    if k == 0 {
        return centroids;
    }

    let mut sums = vec![[0.0f64; 3]; k];
    let mut counts = vec![0usize; k];

    for iteration in 0..iterations {
        sums.iter_mut().for_each(|s| *s = [0.0; 3]);
        counts.iter_mut().for_each(|c| *c = 0);

        // assignment
        for s in samples {
            let point = Centroid::from(s);
            let idx = nearest(&point, &centroids);
            sums[idx][0] += point.r;
            sums[idx][1] += point.g;
            sums[idx][2] += point.b;
            counts[idx] += 1;
        }

        // reduction
        let mut empty = 0usize;
        for (i, centroid) in centroids.iter_mut().enumerate() {
            if counts[i] == 0 {
                empty += 1;
                if policy == EmptyClusterPolicy::Gray {
                    *centroid = Centroid::GRAY;
                }
                continue;
            }
            let n = counts[i] as f64;
            *centroid = Centroid::new(sums[i][0] / n, sums[i][1] / n, sums[i][2] / n);
        }

        trace!(iteration, empty, "k-means iteration");
    }

    debug!(k, iterations, samples = samples.len(), "clustering finished");
    centroids
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ties_go_to_first_centroid() {
        let samples = vec![Srgb::new(100u8, 100, 100)];
        let centroids = vec![Centroid::new(90.0, 100.0, 100.0), Centroid::new(110.0, 100.0, 100.0)];
        assert_eq!(assign(&samples, &centroids), vec![0]);
    }

    #[test]
    fn two_obvious_groups() {
        let samples = vec![
            Srgb::new(250u8, 0, 0),
            Srgb::new(240, 10, 0),
            Srgb::new(0, 0, 250),
            Srgb::new(10, 0, 240),
        ];
        let initial = vec![Centroid::new(255.0, 0.0, 0.0), Centroid::new(0.0, 0.0, 255.0)];
        let out = cluster(&samples, &initial, 10, EmptyClusterPolicy::Gray);
        assert_eq!(out, vec![Centroid::new(245.0, 5.0, 0.0), Centroid::new(5.0, 0.0, 245.0)]);
    }

    #[test]
    fn empty_cluster_resets_to_gray() {
        let samples = vec![Srgb::new(0u8, 0, 0); 4];
        let initial = vec![Centroid::new(0.0, 0.0, 0.0), Centroid::new(255.0, 255.0, 255.0)];
        let out = cluster(&samples, &initial, 1, EmptyClusterPolicy::Gray);
        assert_eq!(out, vec![Centroid::new(0.0, 0.0, 0.0), Centroid::GRAY]);
    }

    #[test]
    fn empty_cluster_can_retain_position() {
        let samples = vec![Srgb::new(0u8, 0, 0); 4];
        let initial = vec![Centroid::new(0.0, 0.0, 0.0), Centroid::new(255.0, 255.0, 255.0)];
        let out = cluster(&samples, &initial, 3, EmptyClusterPolicy::Retain);
        assert_eq!(out, initial);
    }

    #[test]
    fn no_samples_means_all_gray() {
        let initial = vec![Centroid::new(1.0, 2.0, 3.0); 3];
        let out = cluster(&[], &initial, 10, EmptyClusterPolicy::Gray);
        assert_eq!(out, vec![Centroid::GRAY; 3]);
    }

    #[test]
    fn zero_iterations_returns_initial() {
        let samples = vec![Srgb::new(9u8, 9, 9)];
        let initial = vec![Centroid::new(1.0, 2.0, 3.0)];
        assert_eq!(cluster(&samples, &initial, 0, EmptyClusterPolicy::Gray), initial);
    }

    #[test]
    fn clustering_is_deterministic() {
        let samples: Vec<Srgb<u8>> = (0..500u32)
            .map(|i| Srgb::new((i * 37 % 256) as u8, (i * 11 % 256) as u8, (i * 101 % 256) as u8))
            .collect();
        let initial = vec![
            Centroid::new(10.0, 10.0, 10.0),
            Centroid::new(200.0, 50.0, 50.0),
            Centroid::new(50.0, 200.0, 50.0),
            Centroid::new(50.0, 50.0, 200.0),
            Centroid::new(240.0, 240.0, 240.0),
        ];
        let a = cluster(&samples, &initial, 10, EmptyClusterPolicy::Gray);
        let b = cluster(&samples, &initial, 10, EmptyClusterPolicy::Gray);
        let bits = |cs: &[Centroid]| -> Vec<[u64; 3]> {
            cs.iter().map(|c| [c.r.to_bits(), c.g.to_bits(), c.b.to_bits()]).collect()
        };
        assert_eq!(bits(&a), bits(&b));
    }
}
