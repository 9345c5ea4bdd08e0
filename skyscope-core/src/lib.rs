//! Board-agnostic core logic for the Skyscope e-paper UI
//!
//! This crate contains everything that does not depend on a specific
//! panel or sensor:
//!
//! - Radar zoom table and target projection
//! - Display update gate shared with the flush worker
//! - View state machine and redraw cadence
//! - Provider traits for GNSS, barometer, battery, radio and traffic
//! - Settings types and bounded value formatting

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod format;
pub mod gate;
pub mod radar;
pub mod state;
pub mod traffic;
pub mod traits;

pub use gate::{FlushKind, GateState, RedrawPermit, UpdateGate};
