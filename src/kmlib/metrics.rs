use crate::kmlib::{Centroid, Point};
use ordered_float::OrderedFloat;

/// Computes the Euclidean distance between two positions.
///
/// # Parameters
/// - `a`: The first position as an `(x, y)` pair.
/// - `b`: The second position as an `(x, y)` pair.
///
/// # Returns
/// The straight-line distance between `a` and `b`. Infinite only when the
/// true distance exceeds `f64::MAX`.
pub fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    quarter_distance(a, b) * 4.0
}

/// A quarter of the distance, finite for any finite positions
fn quarter_distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    // Scale before subtracting so opposite extremes cannot overflow
    let dx = a.0 / 4.0 - b.0 / 4.0;
    let dy = a.1 / 4.0 - b.1 / 4.0;
    dx.hypot(dy)
}

/// Finds the index of the centroid closest to a position.
///
/// # Parameters
/// - `pos`: The position as an `(x, y)` pair.
/// - `centroids`: The candidate centroids, in cluster index order.
///
/// # Returns
/// The index of a centroid at minimum Euclidean distance. When several are
/// equally close the lowest index wins. `None` if `centroids` is empty.
pub fn nearest_centroid(pos: (f64, f64), centroids: &[Centroid]) -> Option<usize> {
    // min_by_key keeps the first of equal minima
    centroids
        .iter()
        .enumerate()
        .min_by_key(|(_, c)| OrderedFloat(quarter_distance(pos, c.position())))
        .map(|(idx, _)| idx)
}

/// Running mean of positions for one cluster.
///
/// Keeps the mean itself rather than a sum, so it stays finite for any
/// finite inputs.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MeanAccumulator {
    mean_x: f64,
    mean_y: f64,
    count: usize,
}

impl MeanAccumulator {
    pub fn push(&mut self, pos: (f64, f64)) {
        self.count += 1;
        let n = self.count as f64;
        // Divide each term first; (pos - mean) can overflow
        self.mean_x += pos.0 / n - self.mean_x / n;
        self.mean_y += pos.1 / n - self.mean_y / n;
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Mean of everything pushed so far, `None` when nothing was pushed
    pub fn mean(&self) -> Option<(f64, f64)> {
        if self.count == 0 {
            return None;
        }
        Some((self.mean_x, self.mean_y))
    }
}

/// Computes the within-cluster sum of squared distances.
///
/// # Parameters
/// - `points`: The points; unassigned points are ignored.
/// - `centroids`: The centroids each point's cluster indexes into.
///
/// # Returns
/// The sum over assigned points of the squared distance to their centroid.
/// 0.0 if no point is assigned.
pub fn inertia(points: &[Point], centroids: &[Centroid]) -> f64 {
    points
        .iter()
        .filter_map(|p| {
            p.cluster()
                .and_then(|c| centroids.get(c))
                .map(|c| distance(p.position(), c.position()).powi(2))
        })
        .sum()
}
