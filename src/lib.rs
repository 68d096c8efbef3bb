//! Step-through k-means.
//!
//! [`ClusteringEngine`] holds a set of 2D points and centroids and advances
//! the algorithm one half-iteration at a time: an assignment step moves every
//! free point into its nearest centroid's cluster, an update step moves every
//! centroid to the mean of its points. Between steps points and centroids can
//! be dragged, centroids added, and points pinned to a cluster the assignment
//! step must respect.
//!
//! ```rust
//! use kmstep::{ClusteringEngine, Phase};
//!
//! let mut engine = ClusteringEngine::seeded(42);
//! engine.load_dataset(&[(0.0, 0.0), (1.0, 0.0), (9.0, 9.0)]).unwrap();
//! engine.add_centroid().unwrap();
//! engine.move_centroid(0, 0.0, 0.0).unwrap();
//! engine.move_centroid(1, 9.0, 9.0).unwrap();
//!
//! assert_eq!(engine.step().unwrap(), Phase::Assign);
//! assert_eq!(engine.points()[2].cluster(), Some(1));
//! assert_eq!(engine.step().unwrap(), Phase::Update);
//! assert_eq!(engine.centroids()[0].position(), (0.5, 0.0));
//! ```

#[macro_use]
extern crate log;

mod kmlib;
pub use self::kmlib::{
    metrics, Action, ArgParser, Canvas, Centroid, CentroidView, ClusteringEngine, Color,
    DatasetSource, EngineParams, Error, IOParams, InMemoryDataset, JsonDataset, JsonRenderer,
    Membership, OutputFormat, Phase, Point, PointView, RenderSink, Result, Session, SessionStats,
    Snapshot, TextRenderer, UNASSIGNED_COLOR,
};
