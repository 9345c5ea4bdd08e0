//! Configuration types
//!
//! Board-agnostic settings consumed by the views.

pub mod settings;

pub use settings::*;
