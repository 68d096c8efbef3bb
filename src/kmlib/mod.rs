mod canvas;
pub use crate::kmlib::canvas::Canvas;

mod cli;
pub use crate::kmlib::cli::{ArgParser, EngineParams, IOParams, OutputFormat};

mod command;
pub use crate::kmlib::command::Action;

mod dataset;
pub use crate::kmlib::dataset::{DatasetSource, InMemoryDataset, JsonDataset};

mod engine;
pub use crate::kmlib::engine::{ClusteringEngine, Phase};

mod error;
pub use crate::kmlib::error::{Error, Result};

pub mod metrics;

mod point;
pub use crate::kmlib::point::{Centroid, Color, Membership, Point, UNASSIGNED_COLOR};

mod render;
pub use crate::kmlib::render::{
    CentroidView, JsonRenderer, PointView, RenderSink, Snapshot, TextRenderer,
};

mod session;
pub use crate::kmlib::session::{Session, SessionStats};
