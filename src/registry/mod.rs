//! Airfield registry: procedural placement and spatial indexing.
//!
//! The registry drives candidate generation across a square search grid,
//! gates candidates through terrain suitability and minimum-spacing checks,
//! and maintains a chunk-bucketed spatial index so streaming terrain queries
//! only consider airfields overlapping the requested region.
//!
//! # Determinism
//!
//! Placement draws from a dedicated RNG stream derived from
//! `world_seed + AIRFIELD_STREAM_OFFSET`, so airfield placement never
//! consumes from, nor is perturbed by, other procedural systems sharing the
//! world seed. The draw order per grid cell is fixed:
//!
//! 1. jitter-x, 2. jitter-z — always drawn, even for rejected cells, so a
//!    rejection never shifts the stream for later cells; then, for accepted
//!    candidates only: 3. heading, 4. runway-length variation, 5. name
//!    suffix, 6. ILS gate.
//!
//! TACAN channels and ILS frequencies are stepped by airfield index, not
//! drawn. For a given seed the exact same ordered sequence of airfields is
//! produced every run, on any platform.
//!
//! # Concurrency
//!
//! Generation and queries are single-threaded and synchronous. Once
//! generation has completed, read operations are safe for concurrent
//! read-only access; `add_airfield` rebuilds the chunk index non-atomically
//! and must be serialized against readers.

mod config;
mod names;

pub use config::{ConfigError, GenerationConfig};

use std::collections::{BTreeSet, HashMap};

use crate::airfield::{Airfield, AirfieldConfig};
use crate::coord::{self, Bounds, ChunkKey, WorldPoint};
use crate::rng::SeededRng;
use crate::terrain::TerrainSampler;

/// Fixed offset added to the world seed to derive the airfield RNG stream.
pub const AIRFIELD_STREAM_OFFSET: u64 = 0x41_46_47_4E;

/// TACAN channel assignment: fixed stride per airfield index, wrapped into
/// the valid 1..=126 channel range.
fn tacan_channel_for(index: usize) -> u16 {
    ((16 + index * 7) % 126 + 1) as u16
}

/// ILS frequency assignment: fixed 0.05 MHz stride per airfield index from
/// the bottom of the localizer band, rounded to avoid float drift.
fn ils_frequency_for(index: usize) -> f64 {
    let raw = 108.10 + (index % 40) as f64 * 0.05;
    (raw * 100.0).round() / 100.0
}

/// Registry lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryPhase {
    /// No airfields yet.
    Empty,
    /// A generation pass is running.
    Generating,
    /// Airfields present and the chunk index is consistent.
    Populated,
}

/// Error type for registry mutations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Airfield id already registered: {0}")]
    DuplicateId(String),
}

/// Process-wide airfield state for one generated world.
///
/// Holds the ordered airfield sequence (insertion order = generation
/// order), an id lookup table, and the chunk-bucketed spatial index. Create
/// one per world session and pass it by reference to consumers; there is no
/// ambient global instance.
#[derive(Debug)]
pub struct AirfieldRegistry {
    config: GenerationConfig,
    airfields: Vec<Airfield>,
    by_id: HashMap<String, usize>,
    chunk_index: HashMap<ChunkKey, Vec<usize>>,
    phase: RegistryPhase,
}

impl AirfieldRegistry {
    /// Create an empty registry with the given generation settings.
    pub fn new(config: GenerationConfig) -> Self {
        Self {
            config,
            airfields: Vec::new(),
            by_id: HashMap::new(),
            chunk_index: HashMap::new(),
            phase: RegistryPhase::Empty,
        }
    }

    /// Generation settings this registry was built with.
    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> RegistryPhase {
        self.phase
    }

    /// Run the procedural placement pass.
    ///
    /// Expected to run exactly once per world session. Re-invoking appends
    /// duplicate candidates unless the caller clears state first; this is a
    /// deliberate design constraint, not a bug.
    pub fn generate_airfields<T: TerrainSampler>(&mut self, terrain: &T) {
        self.phase = RegistryPhase::Generating;
        let mut rng = SeededRng::stream(self.config.world_seed, AIRFIELD_STREAM_OFFSET);

        let radius = self.config.search_radius;
        let spacing = self.config.grid_spacing;
        let mut rejected_terrain = 0usize;
        let mut rejected_spacing = 0usize;

        tracing::info!(
            world_seed = self.config.world_seed,
            grid_spacing = spacing,
            search_radius = radius,
            "Generating airfields"
        );

        for gz in -radius..=radius {
            for gx in -radius..=radius {
                // Jitter draws happen for every cell so that rejecting one
                // candidate never shifts the stream for later cells.
                let jitter_x = (rng.next_unit() - 0.5) * spacing;
                let jitter_z = (rng.next_unit() - 0.5) * spacing;
                let x = gx as f64 * spacing + jitter_x;
                let z = gz as f64 * spacing + jitter_z;

                if !self.is_suitable(terrain, x, z) {
                    rejected_terrain += 1;
                    continue;
                }
                if !self.is_spaced(x, z) {
                    rejected_spacing += 1;
                    continue;
                }

                // Heading is drawn uniformly from the 36 compass directions;
                // deliberately not derived from terrain slope.
                let heading = rng.pick_index(36) as f64 * 10.0;

                // Runway length varies ±20% from the default in 100-ft steps.
                let variation = rng.next_range(-0.2, 0.2) * self.config.default_runway_length;
                let runway_length =
                    self.config.default_runway_length + (variation / 100.0).round() * 100.0;

                let index = self.airfields.len();
                let name = names::airfield_name(index, &mut rng);
                let tacan_channel = Some(tacan_channel_for(index));
                let ils_frequency = if rng.next_unit() < self.config.ils_probability {
                    Some(ils_frequency_for(index))
                } else {
                    None
                };

                let airfield = Airfield::new(AirfieldConfig {
                    id: format!("AF-{:03}", index + 1),
                    name,
                    x,
                    z,
                    heading,
                    elevation: terrain.elevation(x, z),
                    runway_length,
                    runway_width: self.config.default_runway_width,
                    tacan_channel,
                    ils_frequency,
                    apron_radius: self.config.default_apron_radius,
                });

                tracing::debug!(
                    id = airfield.id(),
                    name = airfield.name(),
                    x,
                    z,
                    heading,
                    "Placed airfield"
                );
                self.insert_unindexed(airfield);
            }
        }

        self.rebuild_chunk_index();
        self.phase = RegistryPhase::Populated;

        tracing::info!(
            count = self.airfields.len(),
            rejected_terrain,
            rejected_spacing,
            chunks = self.chunk_index.len(),
            "Airfield generation complete"
        );
    }

    /// Composite suitability test, short-circuiting on first failure:
    /// land zone, elevation band, then footprint slope spread.
    fn is_suitable<T: TerrainSampler>(&self, terrain: &T, x: f64, z: f64) -> bool {
        if !terrain.classify(x, z).is_land() {
            return false;
        }

        let center = terrain.elevation(x, z);
        if center < self.config.min_elevation || center > self.config.max_elevation {
            return false;
        }

        // Sample half a default runway length out along both world axes and
        // reject if the elevation spread exceeds the slope budget.
        let h = self.config.default_runway_length * 0.5;
        let samples = [
            center,
            terrain.elevation(x + h, z),
            terrain.elevation(x - h, z),
            terrain.elevation(x, z + h),
            terrain.elevation(x, z - h),
        ];
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for s in samples {
            min = min.min(s);
            max = max.max(s);
        }
        max - min <= self.config.max_slope
    }

    /// Minimum-spacing test against every already-placed airfield.
    ///
    /// O(n) per candidate; acceptable because placement is a one-time
    /// world-generation cost, not a hot path.
    fn is_spaced(&self, x: f64, z: f64) -> bool {
        let candidate = WorldPoint::new(x, z);
        let min_sq = self.config.min_spacing * self.config.min_spacing;
        self.airfields
            .iter()
            .all(|a| a.position().distance_squared_to(&candidate) >= min_sq)
    }

    fn insert_unindexed(&mut self, airfield: Airfield) {
        self.by_id.insert(airfield.id().to_string(), self.airfields.len());
        self.airfields.push(airfield);
    }

    /// Rebuild the chunk index from scratch.
    ///
    /// Each airfield is bucketed under every chunk key its flatten-zone
    /// bounds overlap; an airfield may appear under multiple keys.
    fn rebuild_chunk_index(&mut self) {
        self.chunk_index.clear();
        for (index, airfield) in self.airfields.iter().enumerate() {
            let (lo, hi) = coord::chunk_range(&airfield.bounds(), self.config.chunk_size);
            for cz in lo.z..=hi.z {
                for cx in lo.x..=hi.x {
                    self.chunk_index
                        .entry(ChunkKey::new(cx, cz))
                        .or_default()
                        .push(index);
                }
            }
        }
    }

    /// Manual insertion path for fixed scenarios and tests.
    ///
    /// Triggers a full chunk-index rebuild: correctness over incremental
    /// update, since manual insertion is rare.
    pub fn add_airfield(&mut self, config: AirfieldConfig) -> Result<&Airfield, RegistryError> {
        if self.by_id.contains_key(&config.id) {
            return Err(RegistryError::DuplicateId(config.id));
        }
        let airfield = Airfield::new(config);
        tracing::debug!(id = airfield.id(), "Adding airfield");
        self.insert_unindexed(airfield);
        self.rebuild_chunk_index();
        self.phase = RegistryPhase::Populated;
        Ok(self.airfields.last().expect("just inserted"))
    }

    /// Guarantee at least one airfield within `max_distance` of a reference
    /// point.
    ///
    /// If the nearest existing airfield is farther than the threshold (or
    /// none exists), inserts a fixed non-procedural airfield offset 2000 ft
    /// east of the reference point, with field elevation sampled from the
    /// terrain. Returns `true` if an airfield was inserted. The starter id
    /// is `AF-HOME`, suffixed with a counter when earlier starters already
    /// exist, so repeated calls with distant reference points each succeed.
    ///
    /// This is a deterministic safety net independent of the procedural
    /// search succeeding near the reference point; a degenerate seed that
    /// yields zero airfields is a valid outcome, and this keeps features
    /// that need a home field working anyway.
    pub fn ensure_starter_airfield<T: TerrainSampler>(
        &mut self,
        near_x: f64,
        near_z: f64,
        max_distance: f64,
        terrain: &T,
    ) -> Result<bool, RegistryError> {
        if let Some((airfield, distance)) = self.nearest_airfield(near_x, near_z) {
            if distance <= max_distance {
                tracing::debug!(
                    id = airfield.id(),
                    distance,
                    "Starter airfield already satisfied"
                );
                return Ok(false);
            }
        }

        let x = near_x + 2_000.0;
        let z = near_z;
        let mut id = String::from("AF-HOME");
        let mut n = 1;
        while self.by_id.contains_key(&id) {
            n += 1;
            id = format!("AF-HOME-{}", n);
        }
        self.add_airfield(AirfieldConfig {
            id,
            name: "Home Field".to_string(),
            x,
            z,
            heading: 90.0,
            elevation: terrain.elevation(x, z),
            runway_length: self.config.default_runway_length,
            runway_width: self.config.default_runway_width,
            tacan_channel: Some(tacan_channel_for(self.airfields.len())),
            ils_frequency: None,
            apron_radius: self.config.default_apron_radius,
        })?;
        tracing::info!(x, z, "Inserted starter airfield");
        Ok(true)
    }

    /// All airfields whose flatten-zone bounds overlap a query box.
    ///
    /// The chunk index is a coarse pre-filter, not authoritative: candidates
    /// from the overlapped buckets are re-verified with the airfield's own
    /// intersection test so bucketing can never introduce false positives.
    /// Results are in generation order.
    pub fn airfields_in_bounds(&self, bounds: &Bounds) -> Vec<&Airfield> {
        let (lo, hi) = coord::chunk_range(bounds, self.config.chunk_size);
        let mut candidates = BTreeSet::new();
        for cz in lo.z..=hi.z {
            for cx in lo.x..=hi.x {
                if let Some(bucket) = self.chunk_index.get(&ChunkKey::new(cx, cz)) {
                    candidates.extend(bucket.iter().copied());
                }
            }
        }
        candidates
            .into_iter()
            .map(|index| &self.airfields[index])
            .filter(|a| a.intersects_bounds(bounds))
            .collect()
    }

    /// Convenience wrapper: airfields overlapping one chunk of a streaming
    /// loader's grid.
    ///
    /// `chunk_size` is the caller's streaming cell size; it need not match
    /// the registry's index cell size, because the chunk id is converted to
    /// a world-space box before querying.
    pub fn airfields_in_chunk(&self, chunk_x: i32, chunk_z: i32, chunk_size: f64) -> Vec<&Airfield> {
        let bounds = coord::chunk_bounds(ChunkKey::new(chunk_x, chunk_z), chunk_size);
        self.airfields_in_bounds(&bounds)
    }

    /// Nearest airfield to a world point and its true distance.
    ///
    /// Linear scan over squared distances; `None` when the registry is
    /// empty.
    pub fn nearest_airfield(&self, x: f64, z: f64) -> Option<(&Airfield, f64)> {
        let point = WorldPoint::new(x, z);
        self.airfields
            .iter()
            .map(|a| (a, a.position().distance_squared_to(&point)))
            .min_by(|(_, d1), (_, d2)| d1.total_cmp(d2))
            .map(|(a, d_sq)| (a, d_sq.sqrt()))
    }

    /// Look up an airfield by id. `None` when absent; lookup misses never
    /// raise.
    pub fn airfield_by_id(&self, id: &str) -> Option<&Airfield> {
        self.by_id.get(id).map(|&index| &self.airfields[index])
    }

    /// All airfields in generation order.
    pub fn all_airfields(&self) -> &[Airfield] {
        &self.airfields
    }

    /// Number of registered airfields.
    pub fn count(&self) -> usize {
        self.airfields.len()
    }
}
