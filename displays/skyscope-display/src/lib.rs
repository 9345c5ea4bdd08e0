//! E-paper views for Skyscope
//!
//! This crate provides:
//! - `FrameBuffer`: the 1-bit screen buffer views draw into
//! - `DisplayResource`: frame buffer plus update gate, one per panel
//! - `Tile`: titled, self-centring value boxes for the status pages
//! - Radar and status views driven by a cadence-gated `tick`
//! - `FlushWorker`: moves finished screens to an `EpdPanel`
//!
//! # Architecture
//!
//! Views and the flush worker never share anything except the
//! `DisplayResource`. A view claims the gate, draws a complete screen and
//! marks it pending; the worker writes it to the panel and releases the
//! gate. While a flush is outstanding every redraw attempt is dropped and
//! retried on the view's next cadence tick.
//!
//! ```text
//! dispatcher ── tick() ──> ActiveView ── compose() ──> DisplayResource
//!                                                           │ gate
//!                           EpdPanel <── service()/run() ── FlushWorker
//! ```

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod backend;
pub mod flush;
pub mod fonts;
pub mod framebuffer;
pub mod resource;
pub mod tile;
pub mod views;

// Re-export key types
pub use backend::{EpdPanel, PanelError};
pub use flush::FlushWorker;
pub use framebuffer::{FrameBuffer, DISPLAY_HEIGHT, DISPLAY_WIDTH};
pub use resource::DisplayResource;
pub use tile::{Tile, TileRow};
pub use views::{ActiveView, TickOutcome, View, ViewMode};
