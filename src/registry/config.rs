//! Generation settings for procedural airfield placement.
//!
//! Pure data with documented defaults; loadable from a TOML file for
//! scenario tooling. Parsing has no side effects on the registry.

use std::path::Path;

use serde::Deserialize;

fn default_grid_spacing() -> f64 {
    20_000.0
}
fn default_search_radius() -> i32 {
    3
}
fn default_min_elevation() -> f64 {
    0.30
}
fn default_max_elevation() -> f64 {
    0.75
}
fn default_max_slope() -> f64 {
    0.06
}
fn default_min_spacing() -> f64 {
    25_000.0
}
fn default_runway_length() -> f64 {
    10_000.0
}
fn default_runway_width() -> f64 {
    150.0
}
fn default_apron_radius() -> f64 {
    crate::airfield::DEFAULT_APRON_RADIUS
}
fn default_chunk_size() -> f64 {
    2_000.0
}
fn default_ils_probability() -> f64 {
    0.7
}

/// Error type for loading generation settings from disk.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Settings controlling the procedural placement pass and the chunk index.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationConfig {
    /// World seed shared with other procedural systems. The registry
    /// derives its own RNG stream from it; see the registry module.
    #[serde(default)]
    pub world_seed: u64,
    /// Spacing of the candidate search grid, world units.
    #[serde(default = "default_grid_spacing")]
    pub grid_spacing: f64,
    /// Search extends this many cells from the origin on each axis, so the
    /// scan covers a `(2r+1) x (2r+1)` grid.
    #[serde(default = "default_search_radius")]
    pub search_radius: i32,
    /// Lower bound of the suitable normalized-elevation band.
    #[serde(default = "default_min_elevation")]
    pub min_elevation: f64,
    /// Upper bound of the suitable normalized-elevation band.
    #[serde(default = "default_max_elevation")]
    pub max_elevation: f64,
    /// Maximum allowed elevation spread across the candidate footprint.
    #[serde(default = "default_max_slope")]
    pub max_slope: f64,
    /// Minimum distance between any two airfield centers, world units.
    #[serde(default = "default_min_spacing")]
    pub min_spacing: f64,
    /// Baseline runway length in feet; actual lengths vary ±20% in 100-ft
    /// increments.
    #[serde(default = "default_runway_length")]
    pub default_runway_length: f64,
    /// Runway width in feet for generated airfields.
    #[serde(default = "default_runway_width")]
    pub default_runway_width: f64,
    /// Apron transition band width in feet for generated airfields.
    #[serde(default = "default_apron_radius")]
    pub default_apron_radius: f64,
    /// Cell size of the chunk-bucketed spatial index, world units. Chunk
    /// streaming callers must query with the same value they index with.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: f64,
    /// Probability that a generated airfield is ILS-equipped.
    #[serde(default = "default_ils_probability")]
    pub ils_probability: f64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            world_seed: 0,
            grid_spacing: default_grid_spacing(),
            search_radius: default_search_radius(),
            min_elevation: default_min_elevation(),
            max_elevation: default_max_elevation(),
            max_slope: default_max_slope(),
            min_spacing: default_min_spacing(),
            default_runway_length: default_runway_length(),
            default_runway_width: default_runway_width(),
            default_apron_radius: default_apron_radius(),
            chunk_size: default_chunk_size(),
            ils_probability: default_ils_probability(),
        }
    }
}

impl GenerationConfig {
    /// Load settings from a TOML file; absent keys take their defaults.
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }
}
