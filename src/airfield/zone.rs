//! Flatten zone: the region in which terrain elevation is overridden.
//!
//! A flatten zone is owned one-to-one by its airfield. It is the only place
//! where world space and runway-local space meet: the same precomputed
//! heading sine/cosine drive the placement transform, the in-zone membership
//! test and the elevation blend.
//!
//! Runway-local coordinates are `(along, across)`: `along` runs down the
//! runway centerline (positive toward the heading direction), `across` runs
//! perpendicular to it (positive to the right of the heading). Heading 0 is
//! north (+z), measured clockwise, so heading 90 points east (+x).

use crate::coord::{Bounds, WorldPoint};

/// Cubic Hermite smoothstep, `C¹` continuous at both edges.
///
/// Zero derivative at `edge0` and `edge1` keeps the blended terrain free of
/// visible creases where the apron meets the runway and the natural ground.
#[inline]
fn smoothstep(edge0: f64, edge1: f64, x: f64) -> f64 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Geometric region (runway rectangle plus blended apron) within which
/// terrain elevation is overridden.
#[derive(Debug, Clone)]
pub struct FlattenZone {
    center: WorldPoint,
    sin_heading: f64,
    cos_heading: f64,
    half_length: f64,
    half_width: f64,
    target_elevation: f64,
    apron_radius: f64,
    bounds: Bounds,
}

impl FlattenZone {
    /// Build a zone from runway geometry.
    ///
    /// `heading_deg` is in degrees, 0 = north, clockwise. Construction is
    /// total: degenerate inputs (zero lengths) produce a degenerate but
    /// well-defined zone rather than an error.
    pub fn new(
        center: WorldPoint,
        heading_deg: f64,
        runway_length: f64,
        runway_width: f64,
        target_elevation: f64,
        apron_radius: f64,
    ) -> Self {
        let theta = heading_deg.to_radians();
        let mut zone = Self {
            center,
            sin_heading: theta.sin(),
            cos_heading: theta.cos(),
            half_length: runway_length * 0.5,
            half_width: runway_width * 0.5,
            target_elevation,
            apron_radius,
            // Placeholder until compute_bounds below
            bounds: Bounds::new(0.0, 0.0, 0.0, 0.0),
        };
        zone.bounds = zone.compute_bounds();
        zone
    }

    /// World center of the zone (= runway center).
    pub fn center(&self) -> WorldPoint {
        self.center
    }

    /// Target field elevation the runway rectangle is flattened to.
    pub fn target_elevation(&self) -> f64 {
        self.target_elevation
    }

    /// Apron transition band width in world units.
    pub fn apron_radius(&self) -> f64 {
        self.apron_radius
    }

    /// Axis-aligned box covering the apron-expanded rotated rectangle.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Forward transform: runway-local `(along, across)` to world space.
    ///
    /// Rotates by the heading angle around the zone center. The along axis
    /// is `(sin θ, cos θ)`, the across axis `(cos θ, −sin θ)`; together they
    /// form an orthonormal frame, so this transform and [`to_local`] are
    /// exact mathematical inverses.
    ///
    /// [`to_local`]: FlattenZone::to_local
    #[inline]
    pub fn to_world(&self, along: f64, across: f64) -> WorldPoint {
        WorldPoint::new(
            self.center.x + along * self.sin_heading + across * self.cos_heading,
            self.center.z + along * self.cos_heading - across * self.sin_heading,
        )
    }

    /// Inverse transform: world space to runway-local `(along, across)`.
    ///
    /// Translates by the negated center, then applies the inverse rotation
    /// using the same precomputed sine/cosine pair.
    #[inline]
    pub fn to_local(&self, x: f64, z: f64) -> (f64, f64) {
        let dx = x - self.center.x;
        let dz = z - self.center.z;
        (
            dx * self.sin_heading + dz * self.cos_heading,
            dx * self.cos_heading - dz * self.sin_heading,
        )
    }

    /// Compute the AABB of the apron-expanded runway rectangle.
    ///
    /// A rotated rectangle's AABB is not the unrotated AABB: all four
    /// corners must be transformed and enclosed, not just two.
    fn compute_bounds(&self) -> Bounds {
        let hl = self.half_length + self.apron_radius;
        let hw = self.half_width + self.apron_radius;
        let corners = [
            self.to_world(-hl, -hw),
            self.to_world(-hl, hw),
            self.to_world(hl, -hw),
            self.to_world(hl, hw),
        ];
        Bounds::from_points(&corners)
    }

    /// O(1) AABB membership, used as a fast rejection before the rotation
    /// and blend math.
    #[inline]
    pub fn in_bounds(&self, x: f64, z: f64) -> bool {
        self.bounds.contains(x, z)
    }

    /// Distance from a runway-local point to the runway rectangle's edge.
    ///
    /// Rectilinear clamp then Euclidean: zero strictly inside or on the
    /// rectangle boundary.
    #[inline]
    pub fn distance_from_runway(&self, along: f64, across: f64) -> f64 {
        let dist_along = (along.abs() - self.half_length).max(0.0);
        let dist_across = (across.abs() - self.half_width).max(0.0);
        (dist_along * dist_along + dist_across * dist_across).sqrt()
    }

    /// Elevation-override policy for a world point.
    ///
    /// Returns `(elevation, modified)`:
    /// - outside the AABB: the natural elevation, unmodified;
    /// - inside the runway rectangle: the target elevation;
    /// - within the apron band: smoothstep blend from target back to
    ///   natural, `t = 0` at the runway edge rising to `t = 1` at the
    ///   apron's outer edge;
    /// - otherwise unmodified.
    pub fn modified_elevation(&self, x: f64, z: f64, natural_elevation: f64) -> (f64, bool) {
        if !self.in_bounds(x, z) {
            return (natural_elevation, false);
        }

        let (along, across) = self.to_local(x, z);
        if along.abs() <= self.half_length && across.abs() <= self.half_width {
            return (self.target_elevation, true);
        }

        let dist = self.distance_from_runway(along, across);
        if dist < self.apron_radius {
            let t = smoothstep(0.0, self.apron_radius, dist);
            return (lerp(self.target_elevation, natural_elevation, t), true);
        }

        (natural_elevation, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn east_zone() -> FlattenZone {
        // Heading 90: runway runs along the x axis
        FlattenZone::new(WorldPoint::new(0.0, 0.0), 90.0, 10_000.0, 150.0, 0.42, 500.0)
    }

    // =========================================================================
    // Transforms
    // =========================================================================

    #[test]
    fn test_forward_transform_heading_east() {
        let zone = east_zone();

        let p = zone.to_world(-5_000.0, 0.0);
        assert!((p.x - (-5_000.0)).abs() < 1e-9);
        assert!(p.z.abs() < 1e-9);

        let p = zone.to_world(5_000.0, 0.0);
        assert!((p.x - 5_000.0).abs() < 1e-9);
        assert!(p.z.abs() < 1e-9);
    }

    #[test]
    fn test_forward_transform_heading_north() {
        let zone = FlattenZone::new(WorldPoint::new(100.0, 200.0), 0.0, 8_000.0, 150.0, 0.5, 500.0);

        // Along points north (+z), across points east (+x)
        let p = zone.to_world(4_000.0, 0.0);
        assert!((p.x - 100.0).abs() < 1e-9);
        assert!((p.z - 4_200.0).abs() < 1e-9);

        let p = zone.to_world(0.0, 75.0);
        assert!((p.x - 175.0).abs() < 1e-9);
        assert!((p.z - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_transforms_are_exact_inverses() {
        for heading in [0.0, 37.5, 90.0, 123.4, 180.0, 270.0, 355.0] {
            let zone =
                FlattenZone::new(WorldPoint::new(-812.0, 3_444.0), heading, 9_000.0, 200.0, 0.5, 400.0);

            for (along, across) in [
                (0.0, 0.0),
                (4_500.0, 100.0),
                (-4_500.0, -100.0),
                (123.456, -987.654),
                (1e6, -1e6),
            ] {
                let p = zone.to_world(along, across);
                let (a2, c2) = zone.to_local(p.x, p.z);
                assert!(
                    (a2 - along).abs() < 1e-6 && (c2 - across).abs() < 1e-6,
                    "heading {}: ({}, {}) round-tripped to ({}, {})",
                    heading,
                    along,
                    across,
                    a2,
                    c2
                );
            }
        }
    }

    // =========================================================================
    // Bounds
    // =========================================================================

    #[test]
    fn test_bounds_contain_all_expanded_corners() {
        for heading in [0.0, 30.0, 45.0, 90.0, 217.0] {
            let zone =
                FlattenZone::new(WorldPoint::new(500.0, -500.0), heading, 10_000.0, 150.0, 0.5, 500.0);
            let bounds = zone.bounds();

            let hl = 5_000.0 + 500.0;
            let hw = 75.0 + 500.0;
            for (a, c) in [(-hl, -hw), (-hl, hw), (hl, -hw), (hl, hw)] {
                let p = zone.to_world(a, c);
                assert!(
                    bounds.contains(p.x, p.z),
                    "heading {}: corner {} outside {:?}",
                    heading,
                    p,
                    bounds
                );
            }
        }
    }

    #[test]
    fn test_rotated_bounds_wider_than_axis_aligned() {
        // At 45 degrees the AABB must grow beyond the unrotated half-extents
        let zone = FlattenZone::new(WorldPoint::new(0.0, 0.0), 45.0, 10_000.0, 150.0, 0.5, 500.0);
        let bounds = zone.bounds();

        let unrotated_half_width = 75.0 + 500.0;
        assert!(bounds.max_x > unrotated_half_width * 2.0);
        assert!(bounds.max_z > unrotated_half_width * 2.0);
    }

    // =========================================================================
    // Distance to runway rectangle
    // =========================================================================

    #[test]
    fn test_distance_zero_inside_and_on_boundary() {
        let zone = east_zone();

        assert_eq!(zone.distance_from_runway(0.0, 0.0), 0.0);
        assert_eq!(zone.distance_from_runway(5_000.0, 75.0), 0.0);
        assert_eq!(zone.distance_from_runway(-5_000.0, -75.0), 0.0);
    }

    #[test]
    fn test_distance_beyond_edges() {
        let zone = east_zone();

        // Straight out past the threshold
        assert!((zone.distance_from_runway(5_100.0, 0.0) - 100.0).abs() < 1e-9);
        // Straight out past the side
        assert!((zone.distance_from_runway(0.0, 175.0) - 100.0).abs() < 1e-9);
        // Diagonal past a corner: Euclidean of the two overshoots
        let d = zone.distance_from_runway(5_030.0, 115.0);
        assert!((d - (30.0f64 * 30.0 + 40.0 * 40.0).sqrt()).abs() < 1e-9);
    }

    // =========================================================================
    // Elevation override
    // =========================================================================

    #[test]
    fn test_elevation_on_runway_is_target() {
        let zone = east_zone();

        let (e, modified) = zone.modified_elevation(0.0, 0.0, 0.9);
        assert_eq!(e, 0.42);
        assert!(modified);

        let (e, modified) = zone.modified_elevation(4_999.0, 70.0, 0.9);
        assert_eq!(e, 0.42);
        assert!(modified);
    }

    #[test]
    fn test_elevation_outside_aabb_unmodified() {
        let zone = east_zone();

        // Far north of the runway, outside the apron-expanded AABB
        let (e, modified) = zone.modified_elevation(0.0, 10_000.0, 0.9);
        assert_eq!(e, 0.9);
        assert!(!modified);
    }

    #[test]
    fn test_elevation_in_apron_band_blends() {
        let zone = east_zone();
        let natural = 0.9;

        // 250 ft past the runway side edge: halfway through the apron
        let (e, modified) = zone.modified_elevation(0.0, 75.0 + 250.0, natural);
        assert!(modified);
        assert!(e > 0.42 && e < natural, "blended value {} out of range", e);

        // smoothstep(0.5) = 0.5, so the blend is exactly the midpoint
        assert!((e - (0.42 + (natural - 0.42) * 0.5)).abs() < 1e-9);
    }

    #[test]
    fn test_elevation_monotonic_across_apron() {
        let zone = east_zone();
        let natural = 0.9;

        let mut prev = zone.modified_elevation(0.0, 75.0, natural).0;
        for i in 1..=100 {
            let across = 75.0 + 500.0 * i as f64 / 100.0;
            let (e, _) = zone.modified_elevation(0.0, across, natural);
            assert!(
                e >= prev,
                "elevation must rise toward natural through the apron"
            );
            prev = e;
        }
        // At the apron's outer edge the blend reaches the natural value
        assert!((prev - natural).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_zero_size_runway() {
        let zone = FlattenZone::new(WorldPoint::new(0.0, 0.0), 0.0, 0.0, 0.0, 0.3, 0.0);

        // Zero-area geometry is defined, not an error
        let (e, modified) = zone.modified_elevation(0.0, 0.0, 0.8);
        assert_eq!(e, 0.3);
        assert!(modified);

        let (e, modified) = zone.modified_elevation(1.0, 0.0, 0.8);
        assert_eq!(e, 0.8);
        assert!(!modified);
    }
}
