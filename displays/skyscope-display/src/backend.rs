//! Panel backend trait
//!
//! The physical e-paper driver is supplied by the board firmware. The
//! flush worker is the only caller.

use skyscope_core::FlushKind;

/// Panel errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelError {
    /// Communication error with the panel controller
    Communication,
    /// Panel stayed busy past the driver's timeout
    BusyTimeout,
    /// Panel not initialized
    NotInitialized,
}

/// E-paper panel backend
///
/// Implementations handle SPI, busy-pin polling and the controller's
/// refresh waveforms. Both calls are async so a multi-second refresh waits
/// on the busy pin without blocking the executor.
#[allow(async_fn_in_trait)]
pub trait EpdPanel {
    /// Write a complete frame and refresh the panel
    ///
    /// - `frame`: 1 bit per pixel, row-major, MSB first, set bit = black
    /// - `kind`: full (`Slow`) or partial (`Fast`) refresh
    async fn refresh(&mut self, frame: &[u8], kind: FlushKind) -> Result<(), PanelError>;

    /// Put the panel controller into its lowest power state
    async fn hibernate(&mut self) -> Result<(), PanelError> {
        Ok(())
    }

    /// Check if the panel can accept a frame
    fn is_ready(&self) -> bool;
}
