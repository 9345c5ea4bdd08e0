//! Owned display resource
//!
//! One `DisplayResource` exists per physical panel. It owns the frame
//! buffer and the update gate; views and the flush worker borrow it. The
//! gate decides who may touch the frame buffer: views only while it is
//! idle, the flush worker only while a flush is outstanding. The async
//! mutex around the buffer is never contended under that protocol; it makes
//! the handle `Sync` so it can live in a `static`, and unlike a blocking
//! mutex it holds no critical section while the panel is being written.

use core::convert::Infallible;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::{Mutex, MutexGuard};
use skyscope_core::{FlushKind, UpdateGate};

use crate::framebuffer::FrameBuffer;

/// Frame buffer plus update gate for one panel
pub struct DisplayResource {
    gate: UpdateGate,
    frame: Mutex<CriticalSectionRawMutex, FrameBuffer>,
}

impl Default for DisplayResource {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayResource {
    /// Create an idle resource with a blank frame
    pub const fn new() -> Self {
        Self {
            gate: UpdateGate::new(),
            frame: Mutex::new(FrameBuffer::new()),
        }
    }

    /// The update gate
    pub fn gate(&self) -> &UpdateGate {
        &self.gate
    }

    /// Draw a complete screen and hand it to the flush worker
    ///
    /// The frame is blanked before `draw` runs. Returns false without
    /// drawing when the gate is busy; the caller skips this tick.
    pub fn compose<F>(&self, kind: FlushKind, draw: F) -> bool
    where
        F: FnOnce(&mut FrameBuffer) -> Result<(), Infallible>,
    {
        let Some(permit) = self.gate.try_begin_redraw() else {
            trace!("display busy, redraw skipped");
            return false;
        };

        // the gate keeps the flush worker away, so this never waits
        let Ok(mut frame) = self.frame.try_lock() else {
            warn!("frame buffer held outside a flush, redraw skipped");
            return false;
        };
        frame.fill_white();
        match draw(&mut *frame) {
            Ok(()) => {}
            Err(never) => match never {},
        }
        drop(frame);

        // one flush signal per complete screen
        permit.submit(kind);
        true
    }

    /// Lock the frame for the flush worker
    ///
    /// Awaits instead of spinning, so a long panel write never blocks the
    /// executor or masks interrupts.
    pub async fn frame(&self) -> MutexGuard<'_, CriticalSectionRawMutex, FrameBuffer> {
        self.frame.lock().await
    }

    /// Read the current frame, `None` while the flush worker holds it
    pub fn with_frame<R>(&self, f: impl FnOnce(&FrameBuffer) -> R) -> Option<R> {
        self.frame.try_lock().ok().map(|frame| f(&*frame))
    }
}
