//! Airfield records and runway geometry.
//!
//! An [`Airfield`] is the geometric and administrative record for one runway
//! installation: identity, world position, heading, runway dimensions, and
//! the derived threshold points and runway numbers. Each airfield owns its
//! [`FlattenZone`], the region in which terrain elevation is overridden.
//!
//! Airfields are created once (by the registry's generation pass, or
//! explicitly from an [`AirfieldConfig`] for fixed scenarios) and are
//! immutable thereafter.

mod zone;

pub use zone::FlattenZone;

use serde::{Deserialize, Serialize};

use crate::coord::{Bounds, WorldPoint};

/// Default apron transition band width in feet.
pub const DEFAULT_APRON_RADIUS: f64 = 500.0;

fn default_apron_radius() -> f64 {
    DEFAULT_APRON_RADIUS
}

/// Input configuration for one airfield.
///
/// This is the persistence shape: [`Airfield::serialize`] produces exactly
/// this struct, and constructing an [`Airfield`] from it is the inverse.
/// Derived fields (thresholds, runway numbers, bounds) are never stored.
///
/// Configuration is not validated; degenerate values (zero lengths,
/// non-finite numbers) produce degenerate but defined geometry. Callers
/// authoring fixed scenarios are responsible for input sanity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirfieldConfig {
    /// Unique identifier, e.g. "AF-001".
    pub id: String,
    /// Display name, e.g. "Bravo Field".
    pub name: String,
    /// World x coordinate of the runway center.
    pub x: f64,
    /// World z coordinate of the runway center.
    pub z: f64,
    /// Heading in degrees, `[0, 360)`, 0 = north, clockwise.
    pub heading: f64,
    /// Target field elevation, normalized unit.
    pub elevation: f64,
    /// Runway length in feet.
    pub runway_length: f64,
    /// Runway width in feet.
    pub runway_width: f64,
    /// TACAN channel, if the field carries a beacon.
    #[serde(default)]
    pub tacan_channel: Option<u16>,
    /// ILS localizer frequency in MHz, if equipped.
    #[serde(default)]
    pub ils_frequency: Option<f64>,
    /// Apron transition band width in feet.
    #[serde(default = "default_apron_radius")]
    pub apron_radius: f64,
}

/// Map a heading to its runway number in `1..=36`.
///
/// Round to the nearest 10 degrees; 0 wraps to 36 (runway "36" is the
/// northbound runway, there is no runway "00").
fn runway_number_from_heading(heading: f64) -> u8 {
    let n = ((heading / 10.0).round() as i64).rem_euclid(36);
    if n == 0 {
        36
    } else {
        n as u8
    }
}

/// Reciprocal runway number, wrapped into `1..=36`.
fn opposite_runway_number(number: u8) -> u8 {
    (number as u16 + 18 - 1) as u8 % 36 + 1
}

/// One runway installation with identity, position, heading and derived
/// geometry.
#[derive(Debug, Clone)]
pub struct Airfield {
    id: String,
    name: String,
    position: WorldPoint,
    heading: f64,
    elevation: f64,
    runway_length: f64,
    runway_width: f64,
    tacan_channel: Option<u16>,
    ils_frequency: Option<f64>,
    apron_radius: f64,
    zone: FlattenZone,
    threshold: WorldPoint,
    opposite_threshold: WorldPoint,
    runway_number: u8,
    opposite_runway_number: u8,
}

impl Airfield {
    /// Construct an airfield from its configuration.
    ///
    /// Construction is total: there is no error path. Derived geometry
    /// (flatten zone, thresholds, runway numbers) is computed here and
    /// never recomputed.
    pub fn new(config: AirfieldConfig) -> Self {
        let position = WorldPoint::new(config.x, config.z);
        let zone = FlattenZone::new(
            position,
            config.heading,
            config.runway_length,
            config.runway_width,
            config.elevation,
            config.apron_radius,
        );

        // Thresholds sit half a runway length from the center along the
        // heading line, so they are always runway_length apart.
        let half_length = config.runway_length * 0.5;
        let threshold = zone.to_world(-half_length, 0.0);
        let opposite_threshold = zone.to_world(half_length, 0.0);

        let runway_number = runway_number_from_heading(config.heading);

        Self {
            id: config.id,
            name: config.name,
            position,
            heading: config.heading,
            elevation: config.elevation,
            runway_length: config.runway_length,
            runway_width: config.runway_width,
            tacan_channel: config.tacan_channel,
            ils_frequency: config.ils_frequency,
            apron_radius: config.apron_radius,
            zone,
            threshold,
            opposite_threshold,
            runway_number,
            opposite_runway_number: opposite_runway_number(runway_number),
        }
    }

    /// Unique identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// World position of the runway center.
    pub fn position(&self) -> WorldPoint {
        self.position
    }

    /// Heading in degrees, 0 = north, clockwise.
    pub fn heading(&self) -> f64 {
        self.heading
    }

    /// Target field elevation, normalized unit.
    pub fn elevation(&self) -> f64 {
        self.elevation
    }

    /// Runway length in feet.
    pub fn runway_length(&self) -> f64 {
        self.runway_length
    }

    /// Runway width in feet.
    pub fn runway_width(&self) -> f64 {
        self.runway_width
    }

    /// TACAN channel, if the field carries a beacon.
    pub fn tacan_channel(&self) -> Option<u16> {
        self.tacan_channel
    }

    /// ILS localizer frequency in MHz, if equipped.
    pub fn ils_frequency(&self) -> Option<f64> {
        self.ils_frequency
    }

    /// Apron transition band width in feet.
    pub fn apron_radius(&self) -> f64 {
        self.apron_radius
    }

    /// The flatten zone owned by this airfield.
    pub fn flatten_zone(&self) -> &FlattenZone {
        &self.zone
    }

    /// Primary threshold point (approach end of the primary runway number).
    pub fn threshold(&self) -> WorldPoint {
        self.threshold
    }

    /// Opposite threshold point.
    pub fn opposite_threshold(&self) -> WorldPoint {
        self.opposite_threshold
    }

    /// Primary runway number, `1..=36`.
    pub fn runway_number(&self) -> u8 {
        self.runway_number
    }

    /// Reciprocal runway number, `1..=36`.
    pub fn opposite_runway_number(&self) -> u8 {
        self.opposite_runway_number
    }

    /// Runway number formatted as two zero-padded digits, e.g. "09".
    pub fn runway_designator(&self) -> String {
        format!("{:02}", self.runway_number)
    }

    /// Flatten-zone bounding box. O(1), read-only.
    pub fn bounds(&self) -> Bounds {
        self.zone.bounds()
    }

    /// Inclusive axis-aligned overlap test against the flatten-zone bounds.
    pub fn intersects_bounds(&self, other: &Bounds) -> bool {
        self.zone.bounds().intersects(other)
    }

    /// World point to runway-local `(along, across)`.
    pub fn to_runway_local(&self, x: f64, z: f64) -> (f64, f64) {
        self.zone.to_local(x, z)
    }

    /// Runway-local `(along, across)` to world point.
    pub fn runway_to_world(&self, along: f64, across: f64) -> WorldPoint {
        self.zone.to_world(along, across)
    }

    /// Euclidean distance from a world point to the primary threshold.
    pub fn distance_to_threshold(&self, x: f64, z: f64) -> f64 {
        self.threshold.distance_to(&WorldPoint::new(x, z))
    }

    /// Euclidean distance from a world point to the runway center.
    pub fn distance_to(&self, x: f64, z: f64) -> f64 {
        self.position.distance_to(&WorldPoint::new(x, z))
    }

    /// Persistence shape: every input configuration field, no derived
    /// fields. Feeding the result back to [`Airfield::new`] reconstructs an
    /// identical airfield.
    pub fn serialize(&self) -> AirfieldConfig {
        AirfieldConfig {
            id: self.id.clone(),
            name: self.name.clone(),
            x: self.position.x,
            z: self.position.z,
            heading: self.heading,
            elevation: self.elevation,
            runway_length: self.runway_length,
            runway_width: self.runway_width,
            tacan_channel: self.tacan_channel,
            ils_frequency: self.ils_frequency,
            apron_radius: self.apron_radius,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn east_field() -> Airfield {
        Airfield::new(AirfieldConfig {
            id: "AF-TEST".to_string(),
            name: "Echo Field".to_string(),
            x: 0.0,
            z: 0.0,
            heading: 90.0,
            elevation: 0.45,
            runway_length: 10_000.0,
            runway_width: 150.0,
            tacan_channel: Some(41),
            ils_frequency: Some(108.55),
            apron_radius: 500.0,
        })
    }

    // =========================================================================
    // Derived geometry
    // =========================================================================

    #[test]
    fn test_thresholds_for_east_heading() {
        let field = east_field();

        let t = field.threshold();
        assert!((t.x - (-5_000.0)).abs() < 1e-9);
        assert!(t.z.abs() < 1e-9);

        let o = field.opposite_threshold();
        assert!((o.x - 5_000.0).abs() < 1e-9);
        assert!(o.z.abs() < 1e-9);
    }

    #[test]
    fn test_thresholds_always_runway_length_apart() {
        for heading in [0.0, 45.0, 137.0, 269.0, 355.0] {
            let field = Airfield::new(AirfieldConfig {
                id: "AF-X".to_string(),
                name: "X".to_string(),
                x: 1_234.0,
                z: -5_678.0,
                heading,
                elevation: 0.5,
                runway_length: 8_000.0,
                runway_width: 150.0,
                tacan_channel: None,
                ils_frequency: None,
                apron_radius: 500.0,
            });

            let spread = field.threshold().distance_to(&field.opposite_threshold());
            assert!((spread - 8_000.0).abs() < 1e-6, "heading {}", heading);

            // Centered on the position
            let mid = WorldPoint::new(
                (field.threshold().x + field.opposite_threshold().x) * 0.5,
                (field.threshold().z + field.opposite_threshold().z) * 0.5,
            );
            assert!(mid.distance_to(&field.position()) < 1e-6);
        }
    }

    #[test]
    fn test_runway_numbers() {
        assert_eq!(runway_number_from_heading(90.0), 9);
        assert_eq!(runway_number_from_heading(270.0), 27);
        assert_eq!(runway_number_from_heading(0.0), 36);
        assert_eq!(runway_number_from_heading(355.0), 36);
        assert_eq!(runway_number_from_heading(4.9), 36);
        assert_eq!(runway_number_from_heading(5.0), 1);

        assert_eq!(opposite_runway_number(9), 27);
        assert_eq!(opposite_runway_number(27), 9);
        assert_eq!(opposite_runway_number(36), 18);
        assert_eq!(opposite_runway_number(18), 36);
    }

    #[test]
    fn test_scenario_east_field_numbers() {
        let field = east_field();
        assert_eq!(field.runway_number(), 9);
        assert_eq!(field.opposite_runway_number(), 27);
    }

    #[test]
    fn test_runway_designator_zero_padded() {
        let field = east_field();
        assert_eq!(field.runway_designator(), "09");

        let north = Airfield::new(AirfieldConfig {
            heading: 0.0,
            ..field.serialize()
        });
        assert_eq!(north.runway_designator(), "36");
    }

    // =========================================================================
    // Queries
    // =========================================================================

    #[test]
    fn test_distance_to_threshold() {
        let field = east_field();
        // Threshold is at (-5000, 0)
        assert!((field.distance_to_threshold(-5_000.0, 300.0) - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_transform_delegation_roundtrip() {
        let field = east_field();
        let p = field.runway_to_world(1_250.0, -40.0);
        let (along, across) = field.to_runway_local(p.x, p.z);
        assert!((along - 1_250.0).abs() < 1e-6);
        assert!((across - (-40.0)).abs() < 1e-6);
    }

    #[test]
    fn test_intersects_bounds() {
        let field = east_field();

        // Query box overlapping the runway midpoint
        assert!(field.intersects_bounds(&Bounds::new(-100.0, 100.0, -100.0, 100.0)));
        // Query box far away
        assert!(!field.intersects_bounds(&Bounds::new(50_000.0, 60_000.0, 0.0, 100.0)));
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    #[test]
    fn test_serialize_roundtrip() {
        let field = east_field();
        let config = field.serialize();
        let rebuilt = Airfield::new(config.clone());

        assert_eq!(rebuilt.serialize(), config);
        assert_eq!(rebuilt.id(), field.id());
        assert_eq!(rebuilt.runway_number(), field.runway_number());
        assert_eq!(rebuilt.bounds(), field.bounds());
    }

    #[test]
    fn test_serialize_json_shape() {
        let field = east_field();
        let json = serde_json::to_string(&field.serialize()).expect("serializable");
        let config: AirfieldConfig = serde_json::from_str(&json).expect("deserializable");
        assert_eq!(config, field.serialize());
    }

    #[test]
    fn test_apron_radius_default_when_absent() {
        let json = r#"{
            "id": "AF-9",
            "name": "Kilo Strip",
            "x": 0.0,
            "z": 0.0,
            "heading": 180.0,
            "elevation": 0.4,
            "runway_length": 6000.0,
            "runway_width": 100.0
        }"#;
        let config: AirfieldConfig = serde_json::from_str(json).expect("deserializable");
        assert_eq!(config.apron_radius, DEFAULT_APRON_RADIUS);
        assert_eq!(config.tacan_channel, None);
        assert_eq!(config.ils_frequency, None);
    }
}
