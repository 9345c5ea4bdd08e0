//! View state and redraw cadence
//!
//! Defines what each view shows on a given tick and when it may redraw.

pub mod cadence;
pub mod machine;

pub use cadence::{Cadence, REDRAW_INTERVAL_MS};
pub use machine::{FixInputs, ViewState};
