//! Traffic target records
//!
//! Targets are owned by the traffic container in the firmware; views read
//! them through [`Telemetry::traffic`](crate::traits::Telemetry::traffic)
//! and only ever see an immutable slice.

use crate::config::UiSettings;

/// Maximum number of tracked targets
pub const MAX_TRACKING_OBJECTS: usize = 8;

/// Targets older than this are not drawn or counted (ms)
pub const TARGET_EXPIRY_MS: u64 = 5_000;

/// One tracked aircraft relative to own position
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Target {
    /// 24-bit aircraft address, 0 marks an empty slot
    pub address: u32,
    /// Horizontal distance (metres)
    pub distance_m: f32,
    /// Bearing from own position (degrees from north)
    pub bearing_deg: f32,
    /// Target altitude minus own altitude (metres)
    pub relative_altitude_m: f32,
    /// Flagged as team member by the traffic container
    pub team: bool,
    /// Time of the last update (ms, same clock as the view tick)
    pub timestamp_ms: u64,
}

impl Target {
    /// Occupied slot updated within the expiry window
    pub fn is_live(&self, now_ms: u64) -> bool {
        self.address != 0 && now_ms.saturating_sub(self.timestamp_ms) <= TARGET_EXPIRY_MS
    }

    /// Team member by flag or by configured team address
    pub fn is_team_member(&self, settings: &UiSettings) -> bool {
        self.team || settings.is_team_address(self.address)
    }
}

/// Live targets in container order
pub fn live_targets(targets: &[Target], now_ms: u64) -> impl Iterator<Item = &Target> {
    targets.iter().filter(move |t| t.is_live(now_ms))
}

/// Number of live targets
pub fn traffic_count(targets: &[Target], now_ms: u64) -> usize {
    live_targets(targets, now_ms).count()
}
