//! Panel flush worker
//!
//! Moves completed screens from the frame buffer to the panel. The worker
//! and the views share nothing but the [`DisplayResource`]: a view submits
//! a screen by setting the gate to `Slow`/`Fast`, the worker writes it out
//! and returns the gate to `None`.
//!
//! Boards with a spare task run [`FlushWorker::run`] in the background.
//! Boards without one call [`FlushWorker::service`] right after each view
//! tick.

use embedded_hal_async::delay::DelayNs;
use skyscope_core::FlushKind;

use crate::backend::{EpdPanel, PanelError};
use crate::resource::DisplayResource;

/// Poll interval of the background loop (ms)
pub const FLUSH_POLL_MS: u32 = 50;

/// Flush worker for one panel
pub struct FlushWorker<'a, P> {
    panel: P,
    display: &'a DisplayResource,
    hibernate: bool,
    flushes: u32,
}

impl<'a, P: EpdPanel> FlushWorker<'a, P> {
    /// Create a worker; `hibernate` powers the panel down after each flush
    pub fn new(panel: P, display: &'a DisplayResource, hibernate: bool) -> Self {
        Self {
            panel,
            display,
            hibernate,
            flushes: 0,
        }
    }

    /// Flush the pending screen, if any
    ///
    /// Returns the kind of flush performed, `None` when nothing was pending
    /// or the panel is not ready yet. The gate is released after a panel
    /// error too, so the next tick can try again with a fresh screen.
    pub async fn service(&mut self) -> Result<Option<FlushKind>, PanelError> {
        let Some(kind) = self.display.gate().pending() else {
            return Ok(None);
        };
        if !self.panel.is_ready() {
            return Ok(None);
        }

        let mut result = {
            let frame = self.display.frame().await;
            self.panel.refresh(frame.as_bytes(), kind).await
        };
        if result.is_ok() && self.hibernate {
            result = self.panel.hibernate().await;
        }

        self.display.gate().complete();

        match result {
            Ok(()) => {
                self.flushes = self.flushes.wrapping_add(1);
                trace!("flush {} done ({})", self.flushes, kind);
                Ok(Some(kind))
            }
            Err(e) => {
                warn!("panel flush failed: {}", e);
                Err(e)
            }
        }
    }

    /// Background flush loop
    pub async fn run<D: DelayNs>(&mut self, mut delay: D) -> ! {
        info!("flush worker started");
        loop {
            // errors are logged in service(); the next screen retries
            let _ = self.service().await;
            delay.delay_ms(FLUSH_POLL_MS).await;
        }
    }

    /// Completed flushes since start
    pub fn flush_count(&self) -> u32 {
        self.flushes
    }

    /// The panel backend
    pub fn panel(&self) -> &P {
        &self.panel
    }
}
