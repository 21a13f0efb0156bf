//! AirfieldGen - Deterministic airfield placement for procedural terrain
//!
//! This library places airfields on a large procedurally generated terrain,
//! computes the flatten zone in which terrain elevation is overridden to
//! produce a level runway with a smoothly blended apron, and indexes the
//! resulting airfields spatially so that streaming terrain queries only
//! consider airfields overlapping the requested region.
//!
//! Everything is reproducible bit-for-bit from a single integer world seed.
//!
//! # High-Level API
//!
//! ```
//! use airfieldgen::registry::{AirfieldRegistry, GenerationConfig};
//! use airfieldgen::terrain::SyntheticTerrain;
//!
//! let config = GenerationConfig {
//!     world_seed: 42,
//!     ..GenerationConfig::default()
//! };
//! let terrain = SyntheticTerrain::default();
//!
//! let mut registry = AirfieldRegistry::new(config);
//! registry.generate_airfields(&terrain);
//!
//! for airfield in registry.all_airfields() {
//!     println!("{} at ({}, {})", airfield.name(), airfield.position().x, airfield.position().z);
//! }
//! ```
//!
//! The registry is an explicitly owned value: create it at world-session
//! start, pass it by reference to whichever subsystem needs it (renderer,
//! chunk streamer), and drop it at session end. There is no ambient global.

pub mod airfield;
pub mod coord;
pub mod logging;
pub mod registry;
pub mod rng;
pub mod terrain;

/// Version of the AirfieldGen library.
///
/// Defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
