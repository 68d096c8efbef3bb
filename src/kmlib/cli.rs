use crate::kmlib::Canvas;
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

#[derive(Parser, Clone, Debug)]
#[command(name = "kmstep")]
#[command(about = "Step-through k-means with manual overrides")]
#[command(version)]
pub struct ArgParser {
    #[command(flatten)]
    pub io: IOParams,

    #[command(flatten)]
    pub engine: EngineParams,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human readable summary
    Text,
    /// One JSON snapshot per line
    Json,
}

#[derive(clap::Args, Clone, Debug)]
pub struct IOParams {
    /// Dataset of normalized points (JSON array of {"x", "y"})
    #[arg(short, long, help_heading = "I/O")]
    pub dataset: PathBuf,

    /// File of actions to replay (default stdin)
    #[arg(short, long, help_heading = "I/O")]
    pub script: Option<PathBuf>,

    /// Where to draw the state (default stdout)
    #[arg(short, long, help_heading = "I/O")]
    pub out: Option<PathBuf>,

    /// Rendering of the state after every action
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, help_heading = "I/O")]
    pub format: OutputFormat,

    /// Verbose logging
    #[arg(long, default_value_t = false, help_heading = "I/O")]
    pub debug: bool,
}

#[derive(clap::Args, Clone, Debug)]
pub struct EngineParams {
    /// Width points are scaled to
    #[arg(long, default_value_t = 800.0, help_heading = "Engine")]
    pub width: f64,

    /// Height points are scaled to
    #[arg(long, default_value_t = 600.0, help_heading = "Engine")]
    pub height: f64,

    /// Seed for centroid placement and colors (default random)
    #[arg(long, help_heading = "Engine")]
    pub seed: Option<u64>,

    /// Number of centroids to start with
    #[arg(short, long, default_value_t = 1, help_heading = "Engine")]
    pub centroids: usize,

    /// List every point in text output
    #[arg(long, default_value_t = false, help_heading = "Engine")]
    pub show_points: bool,
}

impl EngineParams {
    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.width, self.height)
    }
}

impl ArgParser {
    /// Validate command line arguments
    pub fn validate(&self) -> bool {
        let mut is_ok = true;

        is_ok &= validate_file(&self.io.dataset, "--dataset");

        if let Some(script) = &self.io.script {
            is_ok &= validate_file(script, "--script");
        }

        if !(self.engine.width.is_finite() && self.engine.width > 0.0) {
            error!("--width must be positive");
            is_ok = false;
        }

        if !(self.engine.height.is_finite() && self.engine.height > 0.0) {
            error!("--height must be positive");
            is_ok = false;
        }

        if self.engine.centroids < 1 {
            error!("--centroids must be at least 1");
            is_ok = false;
        }

        if self.engine.show_points && self.io.format == OutputFormat::Json {
            warn!("--show-points has no effect on json output");
        }

        is_ok
    }
}

/// Helper function to validate a file's existence and type
fn validate_file(path: &Path, label: &str) -> bool {
    if !path.exists() {
        error!("{} does not exist", label);
        return false;
    }
    if !path.is_file() {
        error!("{} is not a file", label);
        return false;
    }
    true
}
