//! World-plane geometry type definitions

use std::fmt;

/// A point on the world plane.
///
/// The terrain plane is spanned by `x` (east) and `z` (north). Elevation is
/// carried separately as a normalized unit and never stored here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldPoint {
    /// East-west coordinate in world units (feet)
    pub x: f64,
    /// North-south coordinate in world units (feet)
    pub z: f64,
}

impl WorldPoint {
    /// Create a new world point.
    #[inline]
    pub fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }

    /// Squared Euclidean distance to another point.
    ///
    /// Preferred for comparisons; avoids the square root.
    #[inline]
    pub fn distance_squared_to(&self, other: &WorldPoint) -> f64 {
        let dx = self.x - other.x;
        let dz = self.z - other.z;
        dx * dx + dz * dz
    }

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance_to(&self, other: &WorldPoint) -> f64 {
        self.distance_squared_to(other).sqrt()
    }
}

impl fmt::Display for WorldPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.z)
    }
}

/// Axis-aligned bounding box on the world plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_z: f64,
    pub max_z: f64,
}

impl Bounds {
    /// Create a bounding box from explicit extents.
    pub fn new(min_x: f64, max_x: f64, min_z: f64, max_z: f64) -> Self {
        Self {
            min_x,
            max_x,
            min_z,
            max_z,
        }
    }

    /// Smallest box containing all given points.
    ///
    /// An empty slice yields a degenerate inverted box that intersects
    /// nothing; callers supplying corner sets always pass at least one point.
    pub fn from_points(points: &[WorldPoint]) -> Self {
        let mut bounds = Self::new(f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY);
        for p in points {
            bounds.min_x = bounds.min_x.min(p.x);
            bounds.max_x = bounds.max_x.max(p.x);
            bounds.min_z = bounds.min_z.min(p.z);
            bounds.max_z = bounds.max_z.max(p.z);
        }
        bounds
    }

    /// Inclusive box/box overlap test.
    ///
    /// Touching edges count as intersecting: disjointness requires a strict
    /// `<` / `>` separation on some axis.
    #[inline]
    pub fn intersects(&self, other: &Bounds) -> bool {
        !(self.max_x < other.min_x
            || self.min_x > other.max_x
            || self.max_z < other.min_z
            || self.min_z > other.max_z)
    }

    /// Inclusive point membership test.
    #[inline]
    pub fn contains(&self, x: f64, z: f64) -> bool {
        x >= self.min_x && x <= self.max_x && z >= self.min_z && z <= self.max_z
    }

    /// Center of the box.
    pub fn center(&self) -> WorldPoint {
        WorldPoint::new(
            (self.min_x + self.max_x) * 0.5,
            (self.min_z + self.max_z) * 0.5,
        )
    }

    /// Box grown by `margin` on every side.
    pub fn expanded(&self, margin: f64) -> Self {
        Self {
            min_x: self.min_x - margin,
            max_x: self.max_x + margin,
            min_z: self.min_z - margin,
            max_z: self.max_z + margin,
        }
    }
}

/// Discrete chunk-grid key.
///
/// A structural key (pair of integers) hashed directly; chunk buckets in the
/// registry's spatial index are keyed by this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkKey {
    /// Chunk column (east-west)
    pub x: i32,
    /// Chunk row (north-south)
    pub z: i32,
}

impl ChunkKey {
    /// Create a new chunk key.
    #[inline]
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }
}

impl fmt::Display for ChunkKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.z)
    }
}
