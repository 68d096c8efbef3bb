use crate::kmlib::{
    metrics::{self, MeanAccumulator},
    Centroid, CentroidView, Color, DatasetSource, Error, Membership, Point, PointView, Result,
    Snapshot, UNASSIGNED_COLOR,
};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use serde::Serialize;
use std::fmt;

/// Which half of the algorithm the next `step` runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Phase {
    /// Every free point joins its nearest centroid
    #[default]
    Assign,
    /// Every centroid moves to the mean of its points
    Update,
}

impl Phase {
    pub fn next(self) -> Self {
        match self {
            Phase::Assign => Phase::Update,
            Phase::Update => Phase::Assign,
        }
    }

    /// Expectation / Maximization shorthand shown on the step button
    pub fn label(self) -> &'static str {
        match self {
            Phase::Assign => "E",
            Phase::Update => "M",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Assign => write!(f, "ASSIGN"),
            Phase::Update => write!(f, "UPDATE"),
        }
    }
}

/// Step-wise k-means over a set of 2D points.
///
/// The engine never runs to convergence on its own: each call to [`step`]
/// performs exactly one assignment or one update pass. Between steps the
/// caller may move points and centroids, add centroids, and pin points to a
/// cluster. Every mutating operation validates its input before touching any
/// state, so a returned error always leaves the engine as it was.
///
/// [`step`]: ClusteringEngine::step
#[derive(Debug)]
pub struct ClusteringEngine<R: Rng = StdRng> {
    points: Vec<Point>,
    centroids: Vec<Centroid>,
    phase: Phase,
    iteration_count: u64,
    source: Option<Box<dyn DatasetSource>>,
    rng: R,
}

impl ClusteringEngine<StdRng> {
    /// Reproducible seeding
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

fn random_color<R: Rng>(rng: &mut R) -> Color {
    [rng.gen(), rng.gen(), rng.gen()]
}

/// New centroid on top of a uniformly chosen point
fn seed_centroid<R: Rng>(points: &[Point], rng: &mut R) -> Option<Centroid> {
    let p = points.choose(rng)?;
    let color = random_color(rng);
    Some(Centroid::new(p.x, p.y, color))
}

fn check_finite(x: f64, y: f64) -> Result<()> {
    if x.is_finite() && y.is_finite() {
        Ok(())
    } else {
        Err(Error::NonFiniteCoordinate { x, y })
    }
}

impl<R: Rng> ClusteringEngine<R> {
    pub fn new(rng: R) -> Self {
        Self {
            points: Vec::new(),
            centroids: Vec::new(),
            phase: Phase::Assign,
            iteration_count: 0,
            source: None,
            rng,
        }
    }

    /// Replace all points and seed a single centroid on one of them.
    pub fn load_dataset(&mut self, positions: &[(f64, f64)]) -> Result<()> {
        if positions.is_empty() {
            return Err(Error::InvalidDataset("no points".to_string()));
        }
        if let Some((x, y)) = positions
            .iter()
            .find(|(x, y)| !x.is_finite() || !y.is_finite())
        {
            return Err(Error::InvalidDataset(format!(
                "non-finite coordinate ({}, {})",
                x, y
            )));
        }

        let points: Vec<Point> = positions.iter().map(|&(x, y)| Point::new(x, y)).collect();
        let seed = seed_centroid(&points, &mut self.rng)
            .ok_or_else(|| Error::InvalidDataset("no seed position".to_string()))?;
        info!(
            "loaded {} points, first centroid at ({:.2}, {:.2})",
            points.len(),
            seed.x,
            seed.y
        );

        self.points = points;
        self.centroids = vec![seed];
        self.phase = Phase::Assign;
        self.iteration_count = 0;
        Ok(())
    }

    /// Fetch and load, then keep `source` for later resets
    pub fn load_source(&mut self, source: Box<dyn DatasetSource>) -> Result<()> {
        info!("loading {}", source.describe());
        let positions = source.fetch()?;
        self.load_dataset(&positions)?;
        self.source = Some(source);
        Ok(())
    }

    /// Use `source` for later resets without loading it now
    pub fn set_source(&mut self, source: Box<dyn DatasetSource>) {
        self.source = Some(source);
    }

    pub fn source(&self) -> Option<&dyn DatasetSource> {
        self.source.as_deref()
    }

    /// Re-fetch the configured source and start over.
    ///
    /// Pins, extra centroids and progress are discarded. If the fetch fails the
    /// current state is kept.
    pub fn reset(&mut self) -> Result<()> {
        let source = self.source.as_ref().ok_or(Error::NoDatasetSource)?;
        info!("resetting from {}", source.describe());
        let positions = source.fetch()?;
        self.load_dataset(&positions)
    }

    /// Append a centroid seeded on a random point. Returns its index.
    pub fn add_centroid(&mut self) -> Result<usize> {
        let centroid =
            seed_centroid(&self.points, &mut self.rng).ok_or(Error::NoPointsAvailable)?;
        debug!(
            "centroid {} added at ({:.2}, {:.2})",
            self.centroids.len(),
            centroid.x,
            centroid.y
        );
        self.centroids.push(centroid);
        Ok(self.centroids.len() - 1)
    }

    pub fn move_point(&mut self, index: usize, x: f64, y: f64) -> Result<()> {
        check_finite(x, y)?;
        let len = self.points.len();
        let point = self.points.get_mut(index).ok_or(Error::IndexOutOfRange {
            kind: "point",
            index,
            len,
        })?;
        point.x = x;
        point.y = y;
        Ok(())
    }

    pub fn move_centroid(&mut self, index: usize, x: f64, y: f64) -> Result<()> {
        check_finite(x, y)?;
        let len = self.centroids.len();
        let centroid = self.centroids.get_mut(index).ok_or(Error::IndexOutOfRange {
            kind: "centroid",
            index,
            len,
        })?;
        centroid.x = x;
        centroid.y = y;
        Ok(())
    }

    /// Force a point into `cluster` until it is unpinned
    pub fn pin_point(&mut self, index: usize, cluster: usize) -> Result<()> {
        let len = self.points.len();
        let n_centroids = self.centroids.len();
        let point = self.points.get_mut(index).ok_or(Error::IndexOutOfRange {
            kind: "point",
            index,
            len,
        })?;
        if cluster >= n_centroids {
            return Err(Error::InvalidCluster {
                cluster,
                n_centroids,
            });
        }
        point.membership = Membership::Pinned(cluster);
        Ok(())
    }

    /// Release a pin. The point keeps its cluster until the next assignment.
    pub fn unpin_point(&mut self, index: usize) -> Result<()> {
        let len = self.points.len();
        let point = self.points.get_mut(index).ok_or(Error::IndexOutOfRange {
            kind: "point",
            index,
            len,
        })?;
        if let Membership::Pinned(c) = point.membership {
            point.membership = Membership::Free(c);
        }
        Ok(())
    }

    /// Run the current phase, then flip to the other one.
    ///
    /// Returns the phase that was run. Fails only when nothing is loaded.
    pub fn step(&mut self) -> Result<Phase> {
        if !self.is_loaded() {
            return Err(Error::NotLoaded);
        }

        let done = self.phase;
        match done {
            Phase::Assign => self.assign(),
            Phase::Update => self.update(),
        }
        self.phase = done.next();
        self.iteration_count += 1;
        debug!("iteration {} ran {}", self.iteration_count, done);
        Ok(done)
    }

    fn assign(&mut self) {
        let mut changed = 0;
        for point in self.points.iter_mut().filter(|p| !p.is_fixed()) {
            if let Some(nearest) = metrics::nearest_centroid(point.position(), &self.centroids) {
                if point.cluster() != Some(nearest) {
                    changed += 1;
                }
                point.membership = Membership::Free(nearest);
            }
        }
        trace!("{} points changed cluster", changed);
    }

    fn update(&mut self) {
        // Pinned points count toward their cluster's mean too
        let mut sums = vec![MeanAccumulator::default(); self.centroids.len()];
        for point in &self.points {
            if let Some(acc) = point.cluster().and_then(|c| sums.get_mut(c)) {
                acc.push(point.position());
            }
        }

        for (idx, (centroid, acc)) in self.centroids.iter_mut().zip(&sums).enumerate() {
            match acc.mean() {
                Some((x, y)) => {
                    centroid.x = x;
                    centroid.y = y;
                }
                None => trace!("centroid {} has no points, left in place", idx),
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        !self.centroids.is_empty()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn centroids(&self) -> &[Centroid] {
        &self.centroids
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn iteration_count(&self) -> u64 {
        self.iteration_count
    }

    /// Color a point is drawn with: its centroid's, or gray when unassigned
    pub fn point_color(&self, index: usize) -> Result<Color> {
        let point = self.points.get(index).ok_or(Error::IndexOutOfRange {
            kind: "point",
            index,
            len: self.points.len(),
        })?;
        Ok(self.color_of(point))
    }

    fn color_of(&self, point: &Point) -> Color {
        point
            .cluster()
            .and_then(|c| self.centroids.get(c))
            .map_or(UNASSIGNED_COLOR, |c| c.color)
    }

    /// Number of points currently in each cluster
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.centroids.len()];
        for c in self.points.iter().filter_map(Point::cluster) {
            if let Some(n) = sizes.get_mut(c) {
                *n += 1;
            }
        }
        sizes
    }

    pub fn inertia(&self) -> f64 {
        metrics::inertia(&self.points, &self.centroids)
    }

    /// Everything a renderer needs, detached from the engine
    pub fn snapshot(&self) -> Snapshot {
        let sizes = self.cluster_sizes();
        Snapshot {
            iteration: self.iteration_count,
            phase: self.phase,
            next_step: self.phase.label(),
            inertia: self.inertia(),
            centroids: self
                .centroids
                .iter()
                .zip(sizes)
                .enumerate()
                .map(|(index, (c, members))| CentroidView {
                    index,
                    x: c.x,
                    y: c.y,
                    color: c.color,
                    members,
                })
                .collect(),
            points: self
                .points
                .iter()
                .enumerate()
                .map(|(index, p)| PointView {
                    index,
                    x: p.x,
                    y: p.y,
                    cluster: p.cluster(),
                    fixed: p.is_fixed(),
                    color: self.color_of(p),
                })
                .collect(),
        }
    }
}
