//! Radar view
//!
//! Plan view of the surrounding traffic. Every live target is projected
//! onto the scope and drawn as a glyph for its vertical separation; the
//! own aircraft sits in the centre. Around the scope the view shows the
//! compass labels, battery charge, number of aircraft and the range.
//!
//! Without a position fix the view shows a placeholder message instead,
//! unless the device runs in TX/RX test mode.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, PrimitiveStyle, Rectangle, RoundedRectangle, Triangle};
use heapless::{String, Vec};
use skyscope_core::config::UiSettings;
use skyscope_core::format::{self, NO_DATA_TEXT, NO_FIX_TEXT};
use skyscope_core::radar::{
    Glyph, GlyphKind, GlyphVariant, Orientation, Projection, ProjectionParams, UnitSystem,
    ZoomLevel,
};
use skyscope_core::state::{Cadence, FixInputs, ViewState};
use skyscope_core::traffic::{self, MAX_TRACKING_OBJECTS};
use skyscope_core::traits::{AircraftCategory, Telemetry};
use skyscope_core::FlushKind;

use super::{message, outcome, TickOutcome, View, ViewMode};
use crate::fonts::{self, COURSE_FONT, LABEL_FONT, LARGE_FONT};
use crate::framebuffer::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use crate::resource::DisplayResource;

/// Filled glyphs: triangle half-width and circle radius
const FILLED_SIZE: i32 = 4;
const FILLED_RADIUS: u32 = 5;

/// Team glyphs: two nested outlines
const TEAM_SIZES: [i32; 2] = [5, 6];
const TEAM_RADII: [u32; 2] = [6, 7];

/// Airplane icon strokes as (x, y, width, height) relative to the centre
const AIRPLANE: [(i32, i32, u32, u32); 5] = [
    (0, -4, 2, 14), // fuselage
    (-8, 0, 18, 1), // wing
    (-10, 1, 22, 1),
    (-3, 8, 8, 1), // tail
    (-2, 9, 6, 1),
];

/// Battery icon body
const BATTERY_BODY: Size = Size::new(24, 10);
const BATTERY_BARS: u8 = 5;

/// Vertical gap between a caption and the figure above it
const CAPTION_GAP: i32 = 5;

/// Number of bars shown for a charge level, 0..=5
pub fn battery_bars(percent: u8) -> u8 {
    ((percent.min(100) as u16 + 19) / 20) as u8
}

/// Scope geometry for a panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RadarLayout {
    pub panel: Size,
    /// Top-left corner of the scope's square
    pub origin: Point,
    /// Side of the scope's square
    pub width: i32,
    pub center: Point,
    /// Outer ring radius
    pub radius: u16,
    /// 2:1 panel with the scope pushed to the bottom
    pub wide: bool,
}

impl RadarLayout {
    pub fn new(panel: Size) -> Self {
        let w = panel.width as i32;
        let h = panel.height as i32;
        let wide = w > h;

        let (origin, width, center) = if wide {
            let x = (w - h) / 4;
            let width = (w + h) / 2;
            (Point::new(x, 0), width, Point::new(x + width / 2, h - h / 4))
        } else {
            let y = (h - w) / 2;
            (Point::new(0, y), w, Point::new(w / 2, y + w / 2))
        };

        Self {
            panel,
            origin,
            width,
            center,
            radius: (width / 2 - 2).max(0) as u16,
            wide,
        }
    }

    /// Screen position of a projected target
    pub fn target_point(&self, projection: &Projection) -> Point {
        self.center + Point::new(projection.dx as i32, -(projection.dy as i32))
    }
}

/// Everything one radar frame needs, sampled before drawing starts
pub struct RadarScene<'a> {
    pub layout: RadarLayout,
    pub projections: &'a [Projection],
    pub orientation: Orientation,
    pub zoom: ZoomLevel,
    pub units: UnitSystem,
    pub own_course: f32,
    pub category: AircraftCategory,
    pub battery_percent: u8,
    pub traffic: usize,
}

impl RadarScene<'_> {
    /// Draw the complete scope
    pub fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        for projection in self.projections {
            draw_glyph(target, self.layout.target_point(projection), projection.glyph)?;
        }
        self.draw_rings(target)?;
        draw_own_aircraft(target, self.layout.center, self.category)?;
        self.draw_compass(target)?;
        self.draw_battery(target)?;
        self.draw_traffic_count(target)?;
        self.draw_range(target)
    }

    fn draw_rings<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let stroke = PrimitiveStyle::with_stroke(BinaryColor::On, 1);
        let radius = self.layout.radius as u32;
        for r in [radius, radius / 2] {
            Circle::with_center(self.layout.center, 2 * r + 1)
                .into_styled(stroke)
                .draw(target)?;
        }
        Ok(())
    }

    fn draw_compass<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let glyph = fonts::measure(LABEL_FONT, "N");
        let (w, h) = (glyph.width as i32, glyph.ascent as i32);
        let origin = self.layout.origin;
        let side = self.layout.width;
        let radius = self.layout.radius as i32;

        let mid_y = origin.y + (side + h) / 2;
        let left = Point::new(origin.x + side / 2 - radius + w / 2, mid_y);
        let right = Point::new(origin.x + side / 2 + radius - (3 * w) / 2, mid_y);
        let top = Point::new(origin.x + (side - w) / 2, origin.y + side / 2 - radius + (3 * h) / 2);
        let bottom = Point::new(origin.x + (side - w) / 2, origin.y + side / 2 + radius - h / 2);

        match self.orientation {
            Orientation::NorthUp => {
                fonts::draw_text(target, "W", LABEL_FONT, left)?;
                fonts::draw_text(target, "E", LABEL_FONT, right)?;
                fonts::draw_text(target, "N", LABEL_FONT, top)?;
                fonts::draw_text(target, "S", LABEL_FONT, bottom)
            }
            Orientation::TrackUp => {
                fonts::draw_text(target, "L", LABEL_FONT, left)?;
                fonts::draw_text(target, "R", LABEL_FONT, right)?;
                fonts::draw_text(target, "B", LABEL_FONT, bottom)?;
                self.draw_course_box(target)
            }
        }
    }

    /// Own course in a rounded box at the top of a track-up scope
    fn draw_course_box<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let mut text: String<8> = String::new();
        format::write_truncated(&mut text, format_args!("{:03}", self.own_course as i32));
        let extent = fonts::measure(COURSE_FONT, &text);
        let (w, h) = (extent.width as i32, extent.ascent as i32);

        let origin = self.layout.origin;
        let side = self.layout.width;
        let radius = self.layout.radius as i32;
        let pen = Point::new(
            origin.x + (side - w) / 2,
            origin.y + side / 2 - radius + (3 * h) / 2,
        );
        fonts::draw_text(target, &text, COURSE_FONT, pen)?;

        let frame = Rectangle::new(
            pen - Point::new(2, h + 2),
            Size::new(extent.width + 8, extent.ascent + 6),
        );
        RoundedRectangle::with_equal_corners(frame, Size::new(4, 4))
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(target)
    }

    /// Charge in percent and a bar icon in the top-right corner
    fn draw_battery<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let panel_w = self.layout.panel.width as i32;
        let mut text: String<4> = String::new();
        format::write_truncated(&mut text, format_args!("{}", self.battery_percent));
        let extent = fonts::measure(LARGE_FONT, &text);
        let baseline = extent.ascent as i32;
        fonts::draw_text(
            target,
            &text,
            LARGE_FONT,
            Point::new(panel_w - extent.width as i32 - 3, baseline),
        )?;

        let body = Rectangle::new(
            Point::new(panel_w - 3 - 2 - BATTERY_BODY.width as i32, baseline + 4),
            BATTERY_BODY,
        );
        body.into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(target)?;
        let nub = Rectangle::new(
            body.top_left + Point::new(BATTERY_BODY.width as i32, 3),
            Size::new(2, BATTERY_BODY.height - 6),
        );
        let fill = PrimitiveStyle::with_fill(BinaryColor::On);
        nub.into_styled(fill).draw(target)?;

        let bars = battery_bars(self.battery_percent).min(BATTERY_BARS);
        for i in 0..bars as i32 {
            Rectangle::new(
                body.top_left + Point::new(2 + 4 * i, 2),
                Size::new(3, BATTERY_BODY.height - 4),
            )
            .into_styled(fill)
            .draw(target)?;
        }
        Ok(())
    }

    /// "ACFTS" caption with the live target count above it
    fn draw_traffic_count<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let caption = fonts::measure(LABEL_FONT, "ACFTS");
        let x = if self.layout.wide {
            caption.width as i32 / 2
        } else {
            0
        };
        let y = self.layout.panel.height as i32 - 1;
        fonts::draw_text(target, "ACFTS", LABEL_FONT, Point::new(x, y))?;

        let mut count: String<4> = String::new();
        format::write_truncated(&mut count, format_args!("{}", self.traffic));
        let y = y - caption.ascent as i32 - CAPTION_GAP;
        fonts::draw_text(target, &count, LARGE_FONT, Point::new(x, y))
    }

    /// Range figure above its unit in the bottom-right corner
    fn draw_range<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let right = if self.layout.wide {
            self.layout.origin.x + self.layout.width
        } else {
            self.layout.panel.width as i32
        };

        let unit = fonts::measure(LABEL_FONT, "km ");
        let y = self.layout.panel.height as i32 - 1;
        fonts::draw_text(
            target,
            self.units.range_unit(),
            LABEL_FONT,
            Point::new(right - unit.width as i32, y),
        )?;

        let label = self.zoom.range_label(self.units);
        let extent = fonts::measure(LARGE_FONT, label);
        let y = y - unit.ascent as i32 - CAPTION_GAP;
        fonts::draw_text(
            target,
            label,
            LARGE_FONT,
            Point::new(right - extent.width as i32, y),
        )
    }
}

fn triangle(at: Point, half_width: i32, pointing_up: bool) -> Triangle {
    let s = if pointing_up { 1 } else { -1 };
    Triangle::new(
        at + Point::new(-half_width, s * (half_width - 1)),
        at + Point::new(0, -s * (half_width + 1)),
        at + Point::new(half_width, s * (half_width - 1)),
    )
}

/// Draw one target glyph centred on `at`
pub fn draw_glyph<D>(target: &mut D, at: Point, glyph: Glyph) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let fill = PrimitiveStyle::with_fill(BinaryColor::On);
    let stroke = PrimitiveStyle::with_stroke(BinaryColor::On, 1);

    match (glyph.kind, glyph.variant) {
        (GlyphKind::Level, GlyphVariant::Filled) => Circle::with_center(at, 2 * FILLED_RADIUS + 1)
            .into_styled(fill)
            .draw(target),
        (GlyphKind::Level, GlyphVariant::Team) => {
            for r in TEAM_RADII {
                Circle::with_center(at, 2 * r + 1)
                    .into_styled(stroke)
                    .draw(target)?;
            }
            Ok(())
        }
        (kind, GlyphVariant::Filled) => triangle(at, FILLED_SIZE, kind == GlyphKind::Climbing)
            .into_styled(fill)
            .draw(target),
        (kind, GlyphVariant::Team) => {
            for size in TEAM_SIZES {
                triangle(at, size, kind == GlyphKind::Climbing)
                    .into_styled(stroke)
                    .draw(target)?;
            }
            Ok(())
        }
    }
}

/// Own aircraft marker: an airplane for winged aircraft, an arrow head
/// for everything else
pub fn draw_own_aircraft<D>(
    target: &mut D,
    center: Point,
    category: AircraftCategory,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    if category.is_airplane() {
        let fill = PrimitiveStyle::with_fill(BinaryColor::On);
        for (x, y, w, h) in AIRPLANE {
            Rectangle::new(center + Point::new(x, y), Size::new(w, h))
                .into_styled(fill)
                .draw(target)?;
        }
        return Ok(());
    }

    // arrow: a filled triangle with a notch cut out of its base
    Triangle::new(
        center + Point::new(-7, 5),
        center + Point::new(0, -5),
        center + Point::new(7, 5),
    )
    .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
    .draw(target)?;
    Triangle::new(
        center + Point::new(-7, 5),
        center + Point::new(0, 2),
        center + Point::new(7, 5),
    )
    .into_styled(PrimitiveStyle::with_fill(BinaryColor::Off))
    .draw(target)
}

/// Radar view state
pub struct RadarView {
    settings: UiSettings,
    layout: RadarLayout,
    zoom: ZoomLevel,
    orientation: Orientation,
    cadence: Cadence,
    state: ViewState,
    projections: Vec<Projection, MAX_TRACKING_OBJECTS>,
}

impl RadarView {
    /// Radar for the built-in panel, starting at the configured zoom and
    /// orientation
    pub fn new(settings: &UiSettings) -> Self {
        Self::with_layout(
            settings,
            RadarLayout::new(Size::new(DISPLAY_WIDTH, DISPLAY_HEIGHT)),
        )
    }

    pub fn with_layout(settings: &UiSettings, layout: RadarLayout) -> Self {
        Self {
            settings: *settings,
            layout,
            zoom: settings.zoom,
            orientation: settings.orientation,
            cadence: Cadence::default(),
            state: ViewState::None,
            projections: Vec::new(),
        }
    }

    pub fn zoom_level(&self) -> ZoomLevel {
        self.zoom
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn layout(&self) -> &RadarLayout {
        &self.layout
    }

    /// Targets projected on the last drawn scope
    pub fn projections(&self) -> &[Projection] {
        &self.projections
    }

    fn params(&self, own_course: f32) -> ProjectionParams {
        ProjectionParams {
            zoom: self.zoom,
            units: self.settings.units,
            orientation: self.orientation,
            own_course,
            vertical_threshold: self.settings.vertical_threshold,
            radius: self.layout.radius,
        }
    }

    fn draw_scope(
        &mut self,
        now_ms: u64,
        telemetry: &dyn Telemetry,
        display: &DisplayResource,
    ) -> TickOutcome {
        let own = telemetry.own_state();
        let params = self.params(own.course_deg);
        let targets = telemetry.traffic();

        self.projections.clear();
        for target in traffic::live_targets(targets, now_ms) {
            let projection = params.project(
                target.distance_m,
                target.bearing_deg,
                target.relative_altitude_m,
                target.is_team_member(&self.settings),
            );
            if self.projections.push(projection).is_err() {
                break;
            }
        }

        let scene = RadarScene {
            layout: self.layout,
            projections: &self.projections,
            orientation: self.orientation,
            zoom: self.zoom,
            units: self.settings.units,
            own_course: own.course_deg,
            category: own.category,
            battery_percent: telemetry.battery().percent,
            traffic: traffic::traffic_count(targets, now_ms),
        };
        let drawn = display.compose(FlushKind::Fast, |frame| scene.draw(frame));
        outcome(drawn, FlushKind::Fast)
    }
}

impl View for RadarView {
    fn mode(&self) -> ViewMode {
        ViewMode::Radar
    }

    fn state(&self) -> ViewState {
        self.state
    }

    fn tick(
        &mut self,
        now_ms: u64,
        telemetry: &dyn Telemetry,
        display: &DisplayResource,
    ) -> TickOutcome {
        if !self.cadence.is_due(now_ms) {
            return TickOutcome::NotDue;
        }
        self.cadence.mark(now_ms);

        let gnss = telemetry.gnss();
        let state = ViewState::evaluate(FixInputs {
            test_mode: self.settings.test_mode(),
            fix_valid: gnss.fix_valid,
            receiving: gnss.receiving,
        });
        if state != self.state {
            debug!("radar: {} -> {}", self.state, state);
            self.state = state;
        }

        match state {
            ViewState::NoFix => {
                self.projections.clear();
                outcome(message::show(display, NO_FIX_TEXT), FlushKind::Slow)
            }
            ViewState::NoData => {
                self.projections.clear();
                outcome(message::show(display, NO_DATA_TEXT), FlushKind::Slow)
            }
            ViewState::Active | ViewState::None => self.draw_scope(now_ms, telemetry, display),
        }
    }

    /// Toggle north-up / track-up
    fn next(&mut self) {
        self.orientation = self.orientation.toggled();
        debug!("radar orientation {}", self.orientation);
    }

    fn prev(&mut self) {
        self.next();
    }

    fn zoom(&mut self) {
        self.zoom = self.zoom.zoom_in();
        debug!("radar zoom {}", self.zoom);
    }

    fn unzoom(&mut self) {
        self.zoom = self.zoom.zoom_out();
        debug!("radar zoom {}", self.zoom);
    }
}
