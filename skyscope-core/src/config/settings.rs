//! UI settings
//!
//! Read-only inputs for the views. Loading and storing them is the job of
//! the board firmware; these types only describe the values.

use crate::radar::{Orientation, UnitSystem, ZoomLevel, DEFAULT_VERTICAL_THRESHOLD};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// GNSS component freshness window (ms)
pub const GNSS_EXPIRY_MS: u32 = 3500;

/// Radio protocol the device transmits and receives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RfProtocol {
    #[default]
    Legacy,
    Ogntp,
    P3i,
    Adsb1090,
    AdsbUat,
    Fanet,
}

impl RfProtocol {
    /// Short label used as a tile title
    pub fn label(&self) -> &'static str {
        match self {
            RfProtocol::Legacy => "LEG",
            RfProtocol::Ogntp => "OGN",
            RfProtocol::P3i => "P3I",
            RfProtocol::Adsb1090 => "ADS",
            RfProtocol::AdsbUat => "UAT",
            RfProtocol::Fanet => "FAN",
        }
    }
}

/// Operating mode of the device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DeviceMode {
    #[default]
    Normal,
    /// Receive only
    Receiver,
    /// Bench test; radar runs without a GNSS fix
    TxRxTest,
}

/// Transmitter power setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TxPower {
    #[default]
    Full,
    Low,
    Off,
}

/// Settings consumed by the views
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UiSettings {
    pub units: UnitSystem,
    /// Initial radar zoom
    pub zoom: ZoomLevel,
    pub orientation: Orientation,
    /// Vertical separation threshold (metres)
    pub vertical_threshold: f32,
    pub protocol: RfProtocol,
    /// Team aircraft address (0 = no team)
    pub team: u32,
    pub mode: DeviceMode,
    pub tx_power: TxPower,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            units: UnitSystem::Metric,
            zoom: ZoomLevel::Medium,
            orientation: Orientation::NorthUp,
            vertical_threshold: DEFAULT_VERTICAL_THRESHOLD,
            protocol: RfProtocol::Legacy,
            team: 0,
            mode: DeviceMode::Normal,
            tx_power: TxPower::Full,
        }
    }
}

impl UiSettings {
    /// Test mode lets the radar draw without a fix
    pub fn test_mode(&self) -> bool {
        self.mode == DeviceMode::TxRxTest
    }

    /// True when the transmitter is actually in use
    pub fn transmitting(&self) -> bool {
        !(self.mode == DeviceMode::Receiver
            || self.protocol == RfProtocol::AdsbUat
            || self.tx_power == TxPower::Off)
    }

    /// Team membership by configured address
    pub fn is_team_address(&self, address: u32) -> bool {
        self.team != 0 && address == self.team
    }
}
