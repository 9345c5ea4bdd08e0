//! Display update gate
//!
//! A tri-state flag shared between the view tick logic and the flush
//! worker. Views may only compose a new screen while the gate is idle;
//! once a screen is complete the view marks it `Slow` or `Fast` and the
//! flush worker returns the gate to `None` after the panel has been
//! written. Nothing here blocks: a busy gate simply means "skip this tick".

use portable_atomic::{AtomicU8, Ordering};

const NONE: u8 = 0;
const SLOW: u8 = 1;
const FAST: u8 = 2;

/// Set while a view holds a [`RedrawPermit`] and is still drawing
const COMPOSING: u8 = 0x80;

/// Observable gate state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GateState {
    /// No flush outstanding
    None,
    /// Full refresh pending or in progress
    Slow,
    /// Partial refresh pending or in progress
    Fast,
}

/// Kind of flush requested when a screen is submitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlushKind {
    /// Full refresh (clears ghosting, slow)
    Slow,
    /// Partial refresh
    Fast,
}

impl FlushKind {
    fn raw(self) -> u8 {
        match self {
            FlushKind::Slow => SLOW,
            FlushKind::Fast => FAST,
        }
    }
}

/// Tri-state gate serializing access to the physical display
#[derive(Debug)]
pub struct UpdateGate {
    state: AtomicU8,
}

impl Default for UpdateGate {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdateGate {
    /// Create an idle gate
    pub const fn new() -> Self {
        Self {
            state: AtomicU8::new(NONE),
        }
    }

    /// Try to start composing a screen
    ///
    /// Succeeds only when no flush is outstanding and nobody else is
    /// composing. A denied caller drops its redraw for this tick.
    pub fn try_begin_redraw(&self) -> Option<RedrawPermit<'_>> {
        self.state
            .compare_exchange(NONE, COMPOSING, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| RedrawPermit {
                gate: self,
                submitted: false,
            })
    }

    /// True when nothing is being composed or flushed
    pub fn is_idle(&self) -> bool {
        self.state.load(Ordering::Acquire) == NONE
    }

    /// Outstanding flush, if any
    ///
    /// A screen that is still being composed reports `None` here; use
    /// [`is_idle`](Self::is_idle) to tell the two apart.
    pub fn state(&self) -> GateState {
        match self.state.load(Ordering::Acquire) {
            SLOW => GateState::Slow,
            FAST => GateState::Fast,
            _ => GateState::None,
        }
    }

    /// Flush requested by the last submitted screen
    pub fn pending(&self) -> Option<FlushKind> {
        match self.state() {
            GateState::Slow => Some(FlushKind::Slow),
            GateState::Fast => Some(FlushKind::Fast),
            GateState::None => None,
        }
    }

    /// Mark the outstanding flush as done
    ///
    /// Called by the flush worker once the panel write has finished.
    /// Returns false if there was no submitted flush to complete.
    pub fn complete(&self) -> bool {
        let current = self.state.load(Ordering::Acquire);
        if current != SLOW && current != FAST {
            return false;
        }
        self.state
            .compare_exchange(current, NONE, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

/// Exclusive right to compose the next screen
///
/// Submitting hands the screen to the flush worker. Dropping the permit
/// without submitting returns the gate to idle.
#[derive(Debug)]
#[must_use = "a permit that is dropped without submit() discards the redraw"]
pub struct RedrawPermit<'a> {
    gate: &'a UpdateGate,
    submitted: bool,
}

impl RedrawPermit<'_> {
    /// Signal that the complete screen is ready to flush
    pub fn submit(mut self, kind: FlushKind) {
        self.gate.state.store(kind.raw(), Ordering::Release);
        self.submitted = true;
    }
}

impl Drop for RedrawPermit<'_> {
    fn drop(&mut self) {
        if !self.submitted {
            self.gate.state.store(NONE, Ordering::Release);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_gate_is_idle() {
        let gate = UpdateGate::new();
        assert!(gate.is_idle());
        assert_eq!(gate.state(), GateState::None);
        assert_eq!(gate.pending(), None);
    }

    #[test]
    fn test_only_one_redraw_accepted_until_flushed() {
        let gate = UpdateGate::new();

        let first = gate.try_begin_redraw();
        assert!(first.is_some());
        if let Some(permit) = first {
            permit.submit(FlushKind::Fast);
        }
        assert_eq!(gate.state(), GateState::Fast);

        assert!(gate.try_begin_redraw().is_none());
        assert!(!gate.is_idle());

        assert!(gate.complete());
        assert!(gate.is_idle());
        assert!(gate.try_begin_redraw().is_some());
    }

    #[test]
    fn test_second_caller_denied_while_composing() {
        let gate = UpdateGate::new();
        let permit = gate.try_begin_redraw();
        assert!(permit.is_some());
        assert!(!gate.is_idle());
        assert_eq!(gate.state(), GateState::None);
        assert!(gate.try_begin_redraw().is_none());
        drop(permit);
    }

    #[test]
    fn test_dropped_permit_releases_gate() {
        let gate = UpdateGate::new();
        {
            let _permit = gate.try_begin_redraw();
        }
        assert!(gate.is_idle());
    }

    #[test]
    fn test_complete_ignores_composing_and_idle() {
        let gate = UpdateGate::new();
        assert!(!gate.complete());

        let permit = gate.try_begin_redraw();
        assert!(!gate.complete());
        assert!(!gate.is_idle());
        drop(permit);
    }

    #[test]
    fn test_slow_flush_reported() {
        let gate = UpdateGate::new();
        if let Some(permit) = gate.try_begin_redraw() {
            permit.submit(FlushKind::Slow);
        }
        assert_eq!(gate.pending(), Some(FlushKind::Slow));
        assert_eq!(gate.state(), GateState::Slow);
    }
}
