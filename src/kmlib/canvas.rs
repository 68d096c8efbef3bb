/// Target coordinate space points and centroids live in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

impl Canvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Map a normalized [0, 1] coordinate onto the canvas
    pub fn scale(&self, nx: f64, ny: f64) -> (f64, f64) {
        (nx * self.width, ny * self.height)
    }

    /// Keep a dragged position inside the canvas.
    ///
    /// Negative or NaN bounds collapse to 0 and a NaN coordinate lands on 0,
    /// so this never panics.
    pub fn clamp(&self, x: f64, y: f64) -> (f64, f64) {
        (
            x.max(0.0).min(self.width.max(0.0)),
            y.max(0.0).min(self.height.max(0.0)),
        )
    }
}
