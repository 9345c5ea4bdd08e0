//! Radar scope math
//!
//! Zoom table and target projection. Pure functions only; drawing lives in
//! the display crate.

pub mod projection;
pub mod zoom;

pub use projection::{
    Glyph, GlyphKind, GlyphVariant, Orientation, Projection, ProjectionParams,
    DEFAULT_VERTICAL_THRESHOLD,
};
pub use zoom::{UnitSystem, ZoomLevel};
