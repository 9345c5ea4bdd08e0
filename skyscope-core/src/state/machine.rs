//! View state machine
//!
//! Every view re-evaluates its state from scratch on each cadence tick.
//! There is no hysteresis: the inputs of the current tick alone decide.

/// What a view is currently showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ViewState {
    /// Not drawn yet
    #[default]
    None,
    /// Live data on screen
    Active,
    /// GNSS data present but no valid fix, placeholder on screen
    NoFix,
    /// No upstream GNSS data at all, placeholder on screen
    NoData,
}

/// Inputs sampled at the start of a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FixInputs {
    /// Device runs in TX/RX test mode (fix not required)
    pub test_mode: bool,
    /// GNSS reports a valid position fix
    pub fix_valid: bool,
    /// GNSS receiver is delivering data at all
    pub receiving: bool,
}

impl ViewState {
    /// State for the next tick
    pub fn evaluate(inputs: FixInputs) -> Self {
        if inputs.test_mode || inputs.fix_valid {
            ViewState::Active
        } else if !inputs.receiving {
            ViewState::NoData
        } else {
            ViewState::NoFix
        }
    }

    /// True when a placeholder screen is shown instead of data
    pub fn is_placeholder(&self) -> bool {
        matches!(self, ViewState::NoFix | ViewState::NoData)
    }
}
