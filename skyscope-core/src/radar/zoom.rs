//! Radar zoom levels and the distance-to-pixel divider table
//!
//! The divider is half of the scope's full-scale range, so a target at
//! exactly `divider` distance lands on the outer ring.
//!
//! | Zoom   | Metric / Mixed        | Imperial               |
//! |--------|-----------------------|------------------------|
//! | LOWEST | 60 km across (30 km)  | 30 NM across (15 NM)   |
//! | LOW    | 10 km across ( 5 km)  |  5 NM across (2.5 NM)  |
//! | MEDIUM |  4 km across ( 2 km)  |  2 NM across (  1 NM)  |
//! | HIGH   |  2 km across ( 1 km)  |  1 NM across (0.5 NM)  |

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Unit system used for ranges and altitudes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
    /// Metric ranges, altitudes in feet
    Mixed,
}

impl UnitSystem {
    /// Metric and mixed share the kilometre range table
    pub fn uses_km(&self) -> bool {
        matches!(self, UnitSystem::Metric | UnitSystem::Mixed)
    }

    /// Range unit shown next to the scope
    pub fn range_unit(&self) -> &'static str {
        if self.uses_km() {
            "km"
        } else {
            "NM"
        }
    }
}

/// Radar zoom level, ordered from widest to narrowest range
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ZoomLevel {
    Lowest,
    Low,
    #[default]
    Medium,
    High,
}

/// Dividers for metric and mixed units (metres)
const METRIC_DIVIDERS: [i32; 4] = [30_000, 5_000, 2_000, 1_000];

/// Dividers for imperial units (metres, multiples of a nautical mile)
const IMPERIAL_DIVIDERS: [i32; 4] = [27_780, 4_630, 1_852, 926];

impl ZoomLevel {
    /// All levels, widest first
    pub const ALL: [ZoomLevel; 4] = [
        ZoomLevel::Lowest,
        ZoomLevel::Low,
        ZoomLevel::Medium,
        ZoomLevel::High,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// Distance-to-pixel divider for this level
    pub fn divider(self, units: UnitSystem) -> i32 {
        if units.uses_km() {
            METRIC_DIVIDERS[self.index()]
        } else {
            IMPERIAL_DIVIDERS[self.index()]
        }
    }

    /// Zoom in one level; stays at `High`
    pub fn zoom_in(self) -> Self {
        match self {
            ZoomLevel::Lowest => ZoomLevel::Low,
            ZoomLevel::Low => ZoomLevel::Medium,
            ZoomLevel::Medium | ZoomLevel::High => ZoomLevel::High,
        }
    }

    /// Zoom out one level; wraps from `Lowest` back to `High`
    pub fn zoom_out(self) -> Self {
        match self {
            ZoomLevel::Lowest => ZoomLevel::High,
            ZoomLevel::Low => ZoomLevel::Lowest,
            ZoomLevel::Medium => ZoomLevel::Low,
            ZoomLevel::High => ZoomLevel::Medium,
        }
    }

    /// Full-scale range label (scope diameter), right-aligned to two columns
    pub fn range_label(self, units: UnitSystem) -> &'static str {
        match (units.uses_km(), self) {
            (true, ZoomLevel::Lowest) => "60",
            (true, ZoomLevel::Low) => "10",
            (true, ZoomLevel::Medium) => " 4",
            (true, ZoomLevel::High) => " 2",
            (false, ZoomLevel::Lowest) => "30",
            (false, ZoomLevel::Low) => " 5",
            (false, ZoomLevel::Medium) => " 2",
            (false, ZoomLevel::High) => " 1",
        }
    }
}
