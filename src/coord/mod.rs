//! Coordinate conversion module
//!
//! Provides the world-plane geometry types and the conversions between
//! continuous world coordinates and the discrete chunk grid used by the
//! registry's spatial index and by streaming terrain loaders.

mod types;


pub use types::{Bounds, ChunkKey, WorldPoint};

/// Converts a world coordinate to its chunk-grid coordinate.
///
/// Uses floor division so negative coordinates map to negative chunk
/// indices without a discontinuity at zero.
#[inline]
pub fn to_chunk_coord(v: f64, chunk_size: f64) -> i32 {
    (v / chunk_size).floor() as i32
}

/// Range of chunk keys overlapped by a bounding box.
///
/// Returns the inclusive (low, high) corner keys. Every chunk whose
/// world-space cell touches the box is covered by the range.
pub fn chunk_range(bounds: &Bounds, chunk_size: f64) -> (ChunkKey, ChunkKey) {
    let lo = ChunkKey::new(
        to_chunk_coord(bounds.min_x, chunk_size),
        to_chunk_coord(bounds.min_z, chunk_size),
    );
    let hi = ChunkKey::new(
        to_chunk_coord(bounds.max_x, chunk_size),
        to_chunk_coord(bounds.max_z, chunk_size),
    );
    (lo, hi)
}

/// World-space bounding box of a chunk.
pub fn chunk_bounds(key: ChunkKey, chunk_size: f64) -> Bounds {
    let min_x = key.x as f64 * chunk_size;
    let min_z = key.z as f64 * chunk_size;
    Bounds::new(min_x, min_x + chunk_size, min_z, min_z + chunk_size)
}
