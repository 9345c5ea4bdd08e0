//! Sensor and traffic provider trait
//!
//! The views pull everything they show through [`Telemetry`] once per
//! cadence tick. Implementations wrap the GNSS parser, barometer, battery
//! monitor, RTC, radio counters and the traffic container.

use crate::traffic::Target;

/// One GNSS-derived value with its own validity and age
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reading<T> {
    pub value: T,
    pub valid: bool,
    /// Time since the value was last updated (ms)
    pub age_ms: u32,
}

impl<T: Copy> Reading<T> {
    /// A valid reading updated `age_ms` ago
    pub const fn new(value: T, age_ms: u32) -> Self {
        Self {
            value,
            valid: true,
            age_ms,
        }
    }

    /// The value if it is valid and no older than `expiry_ms`
    pub fn fresh(&self, expiry_ms: u32) -> Option<T> {
        (self.valid && self.age_ms <= expiry_ms).then_some(self.value)
    }
}

/// GNSS receiver output
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GnssFix {
    /// Receiver is delivering sentences at all
    pub receiving: bool,
    /// Position fix is valid
    pub fix_valid: bool,
    /// Altitude above MSL (metres)
    pub altitude_m: Reading<f32>,
    /// Ground speed (knots)
    pub speed_knots: Reading<f32>,
    /// Course over ground (degrees)
    pub course_deg: Reading<f32>,
    pub pdop: Reading<f32>,
    pub vdop: Reading<f32>,
    pub satellites: u8,
}

/// Barometric sensor output
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BaroData {
    /// Static pressure (Pa)
    pub pressure_pa: f32,
    /// Pressure altitude (metres)
    pub altitude_m: f32,
    pub temperature_c: f32,
}

/// Battery monitor output
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatteryStatus {
    /// Charge (0-100 %)
    pub percent: u8,
    pub voltage: f32,
}

/// Radio counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkStats {
    pub tx_packets: u32,
    pub rx_packets: u32,
    /// Signal strength of the last received packet (dBm)
    pub rssi: i16,
}

/// Wall-clock time from the RTC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockTime {
    pub year: u16,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

/// Own aircraft category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AircraftCategory {
    #[default]
    Unknown,
    Glider,
    Towplane,
    Helicopter,
    Parachute,
    Dropplane,
    Hangglider,
    Paraglider,
    Powered,
    Jet,
    Ufo,
    Balloon,
    Zeppelin,
    Uav,
    Static,
}

impl AircraftCategory {
    /// Fixed or rotary wing aircraft drawn with the airplane icon
    pub fn is_airplane(&self) -> bool {
        matches!(
            self,
            AircraftCategory::Glider
                | AircraftCategory::Towplane
                | AircraftCategory::Helicopter
                | AircraftCategory::Dropplane
                | AircraftCategory::Powered
                | AircraftCategory::Jet
        )
    }
}

/// Own aircraft state
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OwnState {
    pub address: u32,
    /// Course over ground (degrees)
    pub course_deg: f32,
    /// Altitude (metres)
    pub altitude_m: f32,
    /// Vertical speed (feet per minute)
    pub vertical_speed_fpm: f32,
    pub category: AircraftCategory,
}

/// Snapshot provider for the views
///
/// Every call returns the current value; the views never hold on to
/// anything past the tick that read it.
pub trait Telemetry {
    /// Current GNSS output
    fn gnss(&self) -> GnssFix;

    /// Barometer output, `None` when no sensor is fitted
    fn baro(&self) -> Option<BaroData>;

    /// Battery state
    fn battery(&self) -> BatteryStatus;

    /// Radio packet counters
    fn link(&self) -> LinkStats;

    /// RTC time, `None` when the RTC is absent or not running
    fn clock(&self) -> Option<ClockTime>;

    /// Own aircraft state
    fn own_state(&self) -> OwnState;

    /// Tracked targets
    fn traffic(&self) -> &[Target];

    /// True when a BLE client is connected
    fn ble_connected(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reading_freshness() {
        let r = Reading::new(12.5f32, 1_000);
        assert_eq!(r.fresh(3_500), Some(12.5));
        assert_eq!(r.fresh(999), None);
        assert_eq!(Reading::new(1.0f32, 3_500).fresh(3_500), Some(1.0));
    }

    #[test]
    fn test_invalid_reading_is_never_fresh() {
        let r = Reading {
            value: 3.0f32,
            valid: false,
            age_ms: 0,
        };
        assert_eq!(r.fresh(u32::MAX), None);
        assert_eq!(Reading::<f32>::default().fresh(3_500), None);
    }

    #[test]
    fn test_airplane_categories() {
        assert!(AircraftCategory::Glider.is_airplane());
        assert!(AircraftCategory::Jet.is_airplane());
        assert!(!AircraftCategory::Paraglider.is_airplane());
        assert!(!AircraftCategory::Unknown.is_airplane());
    }
}
