//! View controllers
//!
//! Each view owns its tiles and navigation state from activation until it
//! is replaced. The outer dispatcher calls [`View::tick`] as often as it
//! likes; the view itself decides when a redraw is due and goes through
//! the [`DisplayResource`] gate to submit it.

pub mod message;
pub mod radar;
pub mod status1;
pub mod status2;

use skyscope_core::config::UiSettings;
use skyscope_core::state::ViewState;
use skyscope_core::traits::Telemetry;
use skyscope_core::FlushKind;

use crate::resource::DisplayResource;

pub use radar::{RadarLayout, RadarView};
pub use status1::Status1View;
pub use status2::Status2View;

/// Selectable views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ViewMode {
    #[default]
    Status1,
    Status2,
    Radar,
}

/// Result of one dispatcher call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickOutcome {
    /// Redraw interval has not elapsed yet
    NotDue,
    /// A complete screen was handed to the flush worker
    Submitted(FlushKind),
    /// Display still flushing the previous screen, this tick was dropped
    Busy,
}

/// One full-screen view
pub trait View {
    fn mode(&self) -> ViewMode;

    /// State after the last tick
    fn state(&self) -> ViewState;

    /// Cadence-gated refresh and redraw
    fn tick(
        &mut self,
        now_ms: u64,
        telemetry: &dyn Telemetry,
        display: &DisplayResource,
    ) -> TickOutcome;

    fn next(&mut self) {}

    fn prev(&mut self) {}

    fn zoom(&mut self) {}

    fn unzoom(&mut self) {}
}

/// Map a compose result to a tick outcome
pub(crate) fn outcome(drawn: bool, kind: FlushKind) -> TickOutcome {
    if drawn {
        TickOutcome::Submitted(kind)
    } else {
        TickOutcome::Busy
    }
}

/// The view currently on screen
pub enum ActiveView {
    Status1(Status1View),
    Status2(Status2View),
    Radar(RadarView),
}

impl ActiveView {
    /// Build the view's state for `mode`
    ///
    /// Replacing the previous `ActiveView` drops its tiles and navigation
    /// state.
    pub fn setup(mode: ViewMode, settings: &UiSettings) -> Self {
        info!("view setup: {}", mode);
        match mode {
            ViewMode::Status1 => ActiveView::Status1(Status1View::new()),
            ViewMode::Status2 => ActiveView::Status2(Status2View::new(settings)),
            ViewMode::Radar => ActiveView::Radar(RadarView::new(settings)),
        }
    }

    fn view(&self) -> &dyn View {
        match self {
            ActiveView::Status1(v) => v,
            ActiveView::Status2(v) => v,
            ActiveView::Radar(v) => v,
        }
    }

    fn view_mut(&mut self) -> &mut dyn View {
        match self {
            ActiveView::Status1(v) => v,
            ActiveView::Status2(v) => v,
            ActiveView::Radar(v) => v,
        }
    }

    pub fn mode(&self) -> ViewMode {
        self.view().mode()
    }

    pub fn state(&self) -> ViewState {
        self.view().state()
    }

    pub fn tick(
        &mut self,
        now_ms: u64,
        telemetry: &dyn Telemetry,
        display: &DisplayResource,
    ) -> TickOutcome {
        self.view_mut().tick(now_ms, telemetry, display)
    }

    pub fn next(&mut self) {
        self.view_mut().next();
    }

    pub fn prev(&mut self) {
        self.view_mut().prev();
    }

    pub fn zoom(&mut self) {
        self.view_mut().zoom();
    }

    pub fn unzoom(&mut self) {
        self.view_mut().unzoom();
    }
}


#[cfg(test)]
mod tests {
    use super::testing::MockTelemetry;
    use super::*;

    #[test]
    fn test_setup_builds_requested_view() {
        let settings = UiSettings::default();
        for mode in [ViewMode::Status1, ViewMode::Status2, ViewMode::Radar] {
            let view = ActiveView::setup(mode, &settings);
            assert_eq!(view.mode(), mode);
            assert_eq!(view.state(), ViewState::None);
        }
    }

    #[test]
    fn test_tick_is_cadence_gated() {
        let display = DisplayResource::new();
        let telemetry = MockTelemetry::with_fix();
        let mut view = ActiveView::setup(ViewMode::Status2, &UiSettings::default());

        assert_eq!(
            view.tick(0, &telemetry, &display),
            TickOutcome::Submitted(FlushKind::Fast)
        );
        display.gate().complete();

        assert_eq!(view.tick(500, &telemetry, &display), TickOutcome::NotDue);
        assert_eq!(view.tick(1000, &telemetry, &display), TickOutcome::NotDue);
        assert_eq!(
            view.tick(1001, &telemetry, &display),
            TickOutcome::Submitted(FlushKind::Fast)
        );
    }

    #[test]
    fn test_busy_display_drops_tick() {
        let display = DisplayResource::new();
        let telemetry = MockTelemetry::with_fix();
        let mut radar = ActiveView::setup(ViewMode::Radar, &UiSettings::default());
        let mut status = ActiveView::setup(ViewMode::Status1, &UiSettings::default());

        assert_eq!(
            radar.tick(0, &telemetry, &display),
            TickOutcome::Submitted(FlushKind::Fast)
        );
        // flush outstanding, the other view must skip
        assert_eq!(status.tick(0, &telemetry, &display), TickOutcome::Busy);
        assert_eq!(status.tick(10, &telemetry, &display), TickOutcome::NotDue);
    }

    #[test]
    fn test_status_views_ignore_navigation() {
        let display = DisplayResource::new();
        let telemetry = MockTelemetry::with_fix();
        let mut view = ActiveView::setup(ViewMode::Status1, &UiSettings::default());
        view.next();
        view.prev();
        view.zoom();
        view.unzoom();
        assert_eq!(view.mode(), ViewMode::Status1);
        assert_eq!(
            view.tick(0, &telemetry, &display),
            TickOutcome::Submitted(FlushKind::Fast)
        );
        assert_eq!(view.state(), ViewState::Active);
    }
}
