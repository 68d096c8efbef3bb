/// RGB display color
pub type Color = [u8; 3];

/// Color of a point that belongs to no cluster yet
pub const UNASSIGNED_COLOR: Color = [200, 200, 200];

/// Cluster membership of a point.
///
/// A pinned point always carries its cluster, so "fixed without a cluster"
/// cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Membership {
    #[default]
    Unassigned,
    /// Set by the assignment step; may change on the next one
    Free(usize),
    /// Set by the user; the assignment step leaves it alone
    Pinned(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub membership: Membership,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            membership: Membership::Unassigned,
        }
    }

    pub fn cluster(&self) -> Option<usize> {
        match self.membership {
            Membership::Unassigned => None,
            Membership::Free(c) | Membership::Pinned(c) => Some(c),
        }
    }

    pub fn is_fixed(&self) -> bool {
        matches!(self.membership, Membership::Pinned(_))
    }

    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Centroid {
    pub x: f64,
    pub y: f64,
    pub color: Color,
}

impl Centroid {
    pub fn new(x: f64, y: f64, color: Color) -> Self {
        Self { x, y, color }
    }

    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}
