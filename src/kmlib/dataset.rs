use crate::kmlib::{Canvas, Error, Result};
use serde::Deserialize;
use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

/// Provider of the points a dataset (re)load starts from
pub trait DatasetSource: std::fmt::Debug {
    /// Positions in the engine's coordinate space
    fn fetch(&self) -> Result<Vec<(f64, f64)>>;

    /// Human readable name for logging
    fn describe(&self) -> String;
}

/// One record of a dataset file. Coordinates are normalized to [0, 1].
#[derive(Deserialize, Debug, Clone, Copy)]
struct NormPoint {
    x: f64,
    y: f64,
}

/// JSON array of `{"x": .., "y": ..}` records, scaled onto a canvas
#[derive(Debug, Clone)]
pub struct JsonDataset {
    path: PathBuf,
    canvas: Canvas,
}

impl JsonDataset {
    pub fn new(path: &Path, canvas: Canvas) -> Self {
        Self {
            path: path.to_path_buf(),
            canvas,
        }
    }
}

impl DatasetSource for JsonDataset {
    fn fetch(&self) -> Result<Vec<(f64, f64)>> {
        let file = File::open(&self.path)?;
        let records: Vec<NormPoint> = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| Error::InvalidDataset(format!("{}: {}", self.path.display(), e)))?;
        debug!("read {} records from {}", records.len(), self.path.display());

        Ok(records
            .into_iter()
            .map(|r| self.canvas.scale(r.x, r.y))
            .collect())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Fixed positions already in the engine's coordinate space
#[derive(Debug, Clone, Default)]
pub struct InMemoryDataset {
    points: Vec<(f64, f64)>,
}

impl InMemoryDataset {
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }
}

impl DatasetSource for InMemoryDataset {
    fn fetch(&self) -> Result<Vec<(f64, f64)>> {
        Ok(self.points.clone())
    }

    fn describe(&self) -> String {
        format!("{} in-memory points", self.points.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_tmp(dir: &tempfile::TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut f = File::create(&path).unwrap();
        f.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_json_scaled() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_tmp(
            &dir,
            "circle.json",
            r#"[{"x": 0.5, "y": 0.5}, {"x": 0.0, "y": 1.0}, {"x": 0.25, "y": 0.1}]"#,
        );
        let source = JsonDataset::new(&path, Canvas::new(800.0, 600.0));
        let pts = source.fetch().unwrap();
        assert_eq!(pts, vec![(400.0, 300.0), (0.0, 600.0), (200.0, 60.0)]);
    }

    #[test]
    fn test_json_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_tmp(&dir, "bad.json", r#"[{"x": 0.5}]"#);
        let source = JsonDataset::new(&path, Canvas::default());
        assert!(matches!(source.fetch(), Err(Error::InvalidDataset(_))));

        let path = write_tmp(&dir, "garbage.json", "not json");
        let source = JsonDataset::new(&path, Canvas::default());
        assert!(matches!(source.fetch(), Err(Error::InvalidDataset(_))));
    }

    #[test]
    fn test_json_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = JsonDataset::new(&dir.path().join("nope.json"), Canvas::default());
        assert!(matches!(source.fetch(), Err(Error::Io(_))));
    }

    #[test]
    fn test_in_memory() {
        let source = InMemoryDataset::new(vec![(1.0, 2.0)]);
        assert_eq!(source.fetch().unwrap(), vec![(1.0, 2.0)]);
        assert_eq!(source.describe(), "1 in-memory points");
    }
}
