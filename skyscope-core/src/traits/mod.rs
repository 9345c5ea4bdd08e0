//! Provider traits
//!
//! These traits define the interface between the views and the board's
//! sensor, radio and traffic implementations.

pub mod telemetry;

pub use telemetry::{
    AircraftCategory, BaroData, BatteryStatus, ClockTime, GnssFix, LinkStats, OwnState, Reading,
    Telemetry,
};
