//! Terrain sampling interface.
//!
//! The placement core never generates terrain itself. It reads normalized
//! elevation and a coarse zone classification from an external provider
//! through the [`TerrainSampler`] trait, and overrides elevation inside
//! computed flatten zones.
//!
//! Providers must be pure functions of `(x, z)` for a given world seed: no
//! caching side effects visible to this core, no dependence on query order.

/// Coarse terrain classification at a world point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneClass {
    /// Open water; never suitable for placement.
    Ocean,
    /// Transitional band between water and land; too unstable for runways.
    Shore,
    /// Flat low terrain; the usual placement target.
    Plains,
    /// Rolling elevated terrain.
    Hills,
    /// Steep high terrain.
    Mountains,
}

impl ZoneClass {
    /// True for classifications that can host an airfield candidate.
    #[inline]
    pub fn is_land(self) -> bool {
        matches!(self, ZoneClass::Plains | ZoneClass::Hills | ZoneClass::Mountains)
    }
}

/// Read-only view of the world terrain.
///
/// Both methods must be deterministic and side-effect-free for a fixed
/// world seed.
pub trait TerrainSampler {
    /// Normalized elevation in `[0, 1]` at a world point.
    fn elevation(&self, x: f64, z: f64) -> f64;

    /// Zone classification at a world point.
    fn classify(&self, x: f64, z: f64) -> ZoneClass;
}

/// Pure sine-based terrain used by tests, demos and golden scenarios.
///
/// Not a production height field; it exists so the placement core can be
/// exercised end-to-end without a real terrain engine attached.
#[derive(Debug, Clone)]
pub struct SyntheticTerrain {
    /// Elevations below this classify as ocean.
    pub sea_level: f64,
    /// Wavelength of the dominant terrain undulation, in world units.
    pub feature_scale: f64,
}

impl Default for SyntheticTerrain {
    fn default() -> Self {
        Self {
            sea_level: 0.35,
            // Long wavelength keeps natural slopes gentle enough that a
            // realistic share of candidate sites passes the slope gate
            feature_scale: 400_000.0,
        }
    }
}

impl TerrainSampler for SyntheticTerrain {
    fn elevation(&self, x: f64, z: f64) -> f64 {
        let k = std::f64::consts::TAU / self.feature_scale;
        // Three incommensurate octaves centered on mid-band
        let raw =
            0.25 * (x * k).sin() + 0.15 * (z * k * 1.7).sin() + 0.10 * ((x + z) * k * 0.6).sin();
        (0.5 + raw).clamp(0.0, 1.0)
    }

    fn classify(&self, x: f64, z: f64) -> ZoneClass {
        let e = self.elevation(x, z);
        if e < self.sea_level {
            ZoneClass::Ocean
        } else if e < self.sea_level + 0.05 {
            ZoneClass::Shore
        } else if e < 0.65 {
            ZoneClass::Plains
        } else if e < 0.85 {
            ZoneClass::Hills
        } else {
            ZoneClass::Mountains
        }
    }
}
