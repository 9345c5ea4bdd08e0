//! Polar-to-screen projection for radar targets
//!
//! Converts a target's distance and bearing into a pixel offset from the
//! scope centre, and picks the glyph that represents its vertical
//! separation. Nothing here touches the frame buffer.

use libm::{cosf, sinf};

use super::zoom::{UnitSystem, ZoomLevel};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default vertical separation threshold (metres)
pub const DEFAULT_VERTICAL_THRESHOLD: f32 = 50.0;

/// Scope orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Orientation {
    #[default]
    NorthUp,
    TrackUp,
}

impl Orientation {
    /// The other orientation
    pub fn toggled(self) -> Self {
        match self {
            Orientation::NorthUp => Orientation::TrackUp,
            Orientation::TrackUp => Orientation::NorthUp,
        }
    }
}

/// Vertical separation class of a target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GlyphKind {
    /// Target is above us by more than the threshold
    Climbing,
    /// Target is below us by more than the threshold
    Descending,
    /// Within the threshold band (boundary values included)
    Level,
}

impl GlyphKind {
    /// Classify a relative altitude against the threshold
    ///
    /// Exactly `±threshold` is `Level`.
    pub fn classify(relative_altitude: f32, threshold: f32) -> Self {
        if relative_altitude > threshold {
            GlyphKind::Climbing
        } else if relative_altitude < -threshold {
            GlyphKind::Descending
        } else {
            GlyphKind::Level
        }
    }
}

/// Rendering variant of a glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GlyphVariant {
    /// Solid shape
    Filled,
    /// Double outline, used for team members
    Team,
}

/// Glyph selected for a target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Glyph {
    pub kind: GlyphKind,
    pub variant: GlyphVariant,
}

/// Result of projecting one target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Projection {
    /// Offset to the right of centre (pixels)
    pub dx: i16,
    /// Offset *up* from centre (pixels); screen y is `centre_y - dy`
    pub dy: i16,
    pub glyph: Glyph,
}

/// Per-frame projection parameters
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProjectionParams {
    pub zoom: ZoomLevel,
    pub units: UnitSystem,
    pub orientation: Orientation,
    /// Own course over ground (degrees)
    pub own_course: f32,
    /// Vertical separation threshold, same unit as relative altitude
    pub vertical_threshold: f32,
    /// Outer ring radius (pixels)
    pub radius: u16,
}

impl ProjectionParams {
    /// Project a target given in polar form relative to own position
    ///
    /// - `distance`: metres
    /// - `bearing`: degrees from north
    /// - `relative_altitude`: target altitude minus own altitude
    pub fn project(
        &self,
        distance: f32,
        bearing: f32,
        relative_altitude: f32,
        team_member: bool,
    ) -> Projection {
        let bearing = match self.orientation {
            Orientation::NorthUp => bearing,
            Orientation::TrackUp => bearing - self.own_course,
        };
        let radians = bearing.to_radians();

        let raw_x = saturate_i16(distance * sinf(radians));
        let raw_y = saturate_i16(distance * cosf(radians));

        let divider = self.zoom.divider(self.units);

        Projection {
            dx: scale(raw_x, self.radius, divider),
            dy: scale(raw_y, self.radius, divider),
            glyph: Glyph {
                kind: GlyphKind::classify(relative_altitude, self.vertical_threshold),
                variant: if team_member {
                    GlyphVariant::Team
                } else {
                    GlyphVariant::Filled
                },
            },
        }
    }
}

/// Clamp a float into the signed 16-bit range (NaN maps to 0)
fn saturate_i16(value: f32) -> i16 {
    // float-to-int `as` saturates, the explicit clamp keeps the intent visible
    value.clamp(i16::MIN as f32, i16::MAX as f32) as i16
}

fn scale(raw: i16, radius: u16, divider: i32) -> i16 {
    let scaled = (raw as i32 * radius as i32) / divider;
    scaled.clamp(i16::MIN as i32, i16::MAX as i32) as i16
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn params(orientation: Orientation, own_course: f32) -> ProjectionParams {
        ProjectionParams {
            zoom: ZoomLevel::Medium,
            units: UnitSystem::Metric,
            orientation,
            own_course,
            vertical_threshold: DEFAULT_VERTICAL_THRESHOLD,
            radius: 98,
        }
    }

    #[test]
    fn test_north_target_projects_straight_up() {
        let p = params(Orientation::NorthUp, 0.0).project(2_000.0, 0.0, 0.0, false);
        assert_eq!(p.dx, 0);
        assert_eq!(p.dy, 98);
    }

    #[test]
    fn test_east_target_projects_right() {
        let p = params(Orientation::NorthUp, 0.0).project(1_000.0, 90.0, 0.0, false);
        assert_eq!(p.dx, 49);
        assert!(p.dy.abs() <= 1);
    }

    #[test]
    fn test_track_up_rotates_by_own_course() {
        let p = params(Orientation::TrackUp, 90.0).project(2_000.0, 90.0, 0.0, false);
        assert!(p.dx.abs() <= 1);
        assert_eq!(p.dy, 98);
    }

    #[test]
    fn test_north_up_ignores_own_course() {
        let north = params(Orientation::NorthUp, 0.0).project(1_500.0, 45.0, 0.0, false);
        let course = params(Orientation::NorthUp, 270.0).project(1_500.0, 45.0, 0.0, false);
        assert_eq!(north, course);
    }

    #[test]
    fn test_far_target_saturates_instead_of_wrapping() {
        let mut p = params(Orientation::NorthUp, 0.0);
        p.zoom = ZoomLevel::High;
        let proj = p.project(1_000_000.0, 0.0, 0.0, false);
        // raw offset clamps at 32767 before scaling
        assert_eq!(proj.dy, ((32_767i32 * 98) / 1_000) as i16);
        assert!(proj.dy > 0);

        let south = p.project(1_000_000.0, 180.0, 0.0, false);
        assert_eq!(south.dy, ((-32_768i32 * 98) / 1_000) as i16);
    }

    #[test]
    fn test_glyph_selection_boundaries() {
        let p = params(Orientation::NorthUp, 0.0);
        let kind = |rel: f32| p.project(500.0, 0.0, rel, false).glyph.kind;
        assert_eq!(kind(51.0), GlyphKind::Climbing);
        assert_eq!(kind(-51.0), GlyphKind::Descending);
        assert_eq!(kind(49.0), GlyphKind::Level);
        assert_eq!(kind(-49.0), GlyphKind::Level);
        assert_eq!(kind(50.0), GlyphKind::Level);
        assert_eq!(kind(-50.0), GlyphKind::Level);
    }

    #[test]
    fn test_team_variant() {
        let p = params(Orientation::NorthUp, 0.0);
        assert_eq!(
            p.project(500.0, 0.0, 0.0, true).glyph.variant,
            GlyphVariant::Team
        );
        assert_eq!(
            p.project(500.0, 0.0, 0.0, false).glyph.variant,
            GlyphVariant::Filled
        );
    }

    #[test]
    fn test_higher_zoom_magnifies() {
        let mut p = params(Orientation::NorthUp, 0.0);
        p.zoom = ZoomLevel::Lowest;
        let wide = p.project(900.0, 0.0, 0.0, false);
        p.zoom = ZoomLevel::High;
        let narrow = p.project(900.0, 0.0, 0.0, false);
        assert!(narrow.dy > wide.dy);
    }

    #[test]
    fn test_nan_distance_projects_to_centre() {
        let p = params(Orientation::NorthUp, 0.0).project(f32::NAN, 10.0, 0.0, false);
        assert_eq!((p.dx, p.dy), (0, 0));
    }

    proptest! {
        #[test]
        fn offset_magnitude_non_decreasing_in_distance(
            near in 0.0f32..100_000.0,
            extra in 0.0f32..100_000.0,
            bearing in 0.0f32..360.0,
        ) {
            let p = params(Orientation::NorthUp, 0.0);
            let a = p.project(near, bearing, 0.0, false);
            let b = p.project(near + extra, bearing, 0.0, false);
            prop_assert!(a.dx.unsigned_abs() <= b.dx.unsigned_abs());
            prop_assert!(a.dy.unsigned_abs() <= b.dy.unsigned_abs());
        }

        #[test]
        fn offset_stays_within_outer_ring_when_in_range(
            bearing in 0.0f32..360.0,
            fraction in 0.0f32..1.0,
        ) {
            let p = params(Orientation::TrackUp, 123.0);
            let distance = fraction * p.zoom.divider(p.units) as f32;
            let proj = p.project(distance, bearing, 0.0, false);
            prop_assert!(proj.dx.unsigned_abs() <= p.radius);
            prop_assert!(proj.dy.unsigned_abs() <= p.radius);
        }
    }
}
