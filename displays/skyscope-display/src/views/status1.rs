//! Status page 1
//!
//! Large-font flight figures in a 4-row grid:
//!
//! ```text
//! UTC            BAT%
//! QNHft   QNEft  knot
//! QNHm    QNEm   km/h
//! ACFT    ^ms    TRK
//! ```
//!
//! QNH rows are GNSS altitude, QNE rows barometric altitude.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use skyscope_core::config::GNSS_EXPIRY_MS;
use skyscope_core::format::{self, CLOCK_PLACEHOLDER, FEET_PER_METER};
use skyscope_core::state::{Cadence, ViewState};
use skyscope_core::traffic;
use skyscope_core::traits::Telemetry;
use skyscope_core::FlushKind;

use super::{outcome, TickOutcome, View, ViewMode};
use crate::fonts::{self, COURSE_FONT, LARGE_FONT};
use crate::framebuffer::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use crate::resource::DisplayResource;
use crate::tile::{Tile, TileRow};

const KMH_PER_KNOT: f32 = 1.852;

/// Marker drawn in the clock tile while a BLE client is connected
const BLE_MARKER: &str = "BT";

const TRAFFIC_SAMPLE: &str = "0";
const TRAFFIC_ALERT_SAMPLE: &str = "* 0 *";

/// Status page 1 state
pub struct Status1View {
    clock: Tile,
    battery: Tile,
    gnss_alt_ft: Tile,
    baro_alt_ft: Tile,
    speed_knots: Tile,
    gnss_alt_m: Tile,
    baro_alt_m: Tile,
    speed_kmh: Tile,
    traffic: Tile,
    vario: Tile,
    track: Tile,
    traffic_alert: bool,
    ble_connected: bool,
    cadence: Cadence,
    state: ViewState,
}

impl Status1View {
    pub fn new() -> Self {
        let width = DISPLAY_WIDTH as i32;
        let box_w = width / 3;
        let box_h = DISPLAY_HEIGHT / 4;
        let row_y = |row: u32| (row * box_h) as i32;

        let left = (width - 2 * (box_w - 1) + 14) as u32;
        let middle = (box_w + 6) as u32;
        let right = (box_w - 20) as u32;

        let mut row = TileRow::new(row_y(0), box_h);
        let clock = row.place("UTC", (width - box_w + 20) as u32, LARGE_FONT, "00:00:00");
        let battery = row.place("BAT%", right, LARGE_FONT, "100");

        let mut row = TileRow::new(row_y(1), box_h);
        let gnss_alt_ft = row.place("QNHft", left, LARGE_FONT, "00000?");
        let baro_alt_ft = row.place("QNEft", middle, LARGE_FONT, "00000");
        let speed_knots = row.place("knot", right, LARGE_FONT, "000");

        let mut row = TileRow::new(row_y(2), box_h);
        let gnss_alt_m = row.place("QNHm", left, LARGE_FONT, "00000?");
        let baro_alt_m = row.place("QNEm", middle, LARGE_FONT, "00000");
        let speed_kmh = row.place("km/h", right, LARGE_FONT, "000");

        let mut row = TileRow::new(row_y(3), box_h);
        let traffic = row.place("ACFT", left, LARGE_FONT, TRAFFIC_SAMPLE);
        let vario = row.place("^ms", middle, LARGE_FONT, "-00");
        let track = row.place("TRK", right, LARGE_FONT, "000");

        Self {
            clock,
            battery,
            gnss_alt_ft,
            baro_alt_ft,
            speed_knots,
            gnss_alt_m,
            baro_alt_m,
            speed_kmh,
            traffic,
            vario,
            track,
            traffic_alert: false,
            ble_connected: false,
            cadence: Cadence::default(),
            state: ViewState::None,
        }
    }

    fn tiles(&self) -> [&Tile; 11] {
        [
            &self.clock,
            &self.battery,
            &self.gnss_alt_ft,
            &self.baro_alt_ft,
            &self.speed_knots,
            &self.gnss_alt_m,
            &self.baro_alt_m,
            &self.speed_kmh,
            &self.traffic,
            &self.vario,
            &self.track,
        ]
    }

    /// Refresh every tile value from the providers
    fn update(&mut self, now_ms: u64, telemetry: &dyn Telemetry) {
        match telemetry.clock() {
            Some(t) if format::clock_year_valid(t.year) => self.clock.set_value(format_args!(
                "{:02}:{:02}:{:02}",
                t.hour, t.minute, t.second
            )),
            _ => self.clock.set_text(CLOCK_PLACEHOLDER),
        }
        self.battery
            .set_value(format_args!("{}", telemetry.battery().percent));

        let gnss = telemetry.gnss();
        let flag = format::altitude_flag(
            gnss.pdop.fresh(GNSS_EXPIRY_MS),
            gnss.vdop.fresh(GNSS_EXPIRY_MS),
        );
        match gnss.altitude_m.fresh(GNSS_EXPIRY_MS) {
            Some(alt) => {
                self.gnss_alt_ft
                    .set_value(format_args!("{:<5.0}{}", alt * FEET_PER_METER, flag));
                self.gnss_alt_m.set_value(format_args!("{:<5.0}{}", alt, flag));
            }
            None => {
                self.gnss_alt_ft.set_placeholder();
                self.gnss_alt_m.set_placeholder();
            }
        }

        match telemetry.baro() {
            Some(baro) => {
                self.baro_alt_ft
                    .set_value(format_args!("{:.0}", baro.altitude_m * FEET_PER_METER));
                self.baro_alt_m
                    .set_value(format_args!("{:.0}", baro.altitude_m));
                let vs = format::vertical_speed_ms(telemetry.own_state().vertical_speed_fpm);
                self.vario.set_value(format_args!("{:.0}", vs));
            }
            None => {
                self.baro_alt_ft.set_placeholder();
                self.baro_alt_m.set_placeholder();
                self.vario.set_placeholder();
            }
        }

        match gnss.speed_knots.fresh(GNSS_EXPIRY_MS) {
            Some(knots) => {
                self.speed_knots.set_value(format_args!("{:.0}", knots));
                self.speed_kmh
                    .set_value(format_args!("{:.0}", knots * KMH_PER_KNOT));
            }
            None => {
                self.speed_knots.set_placeholder();
                self.speed_kmh.set_placeholder();
            }
        }

        match gnss.course_deg.fresh(GNSS_EXPIRY_MS) {
            Some(course) => self.track.set_value(format_args!("{:.0}", course)),
            None => self.track.set_placeholder(),
        }

        let count = traffic::traffic_count(telemetry.traffic(), now_ms);
        let alert = count > 0;
        if alert != self.traffic_alert {
            let sample = if alert {
                TRAFFIC_ALERT_SAMPLE
            } else {
                TRAFFIC_SAMPLE
            };
            self.traffic.relayout(LARGE_FONT, sample);
            self.traffic_alert = alert;
        }
        if alert {
            self.traffic.set_value(format_args!("* {} *", count));
        } else {
            self.traffic.set_value(format_args!("{}", count));
        }

        self.ble_connected = telemetry.ble_connected();
    }

    fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        for tile in self.tiles() {
            tile.render(target)?;
        }
        if self.ble_connected {
            let extent = fonts::measure(COURSE_FONT, BLE_MARKER);
            let bounds = self.clock.bounds();
            let pen = Point::new(
                bounds.top_left.x + bounds.size.width as i32 - 3 - extent.width as i32,
                bounds.top_left.y + 3 + extent.ascent as i32,
            );
            fonts::draw_text(target, BLE_MARKER, COURSE_FONT, pen)?;
        }
        Ok(())
    }
}

impl Default for Status1View {
    fn default() -> Self {
        Self::new()
    }
}

impl View for Status1View {
    fn mode(&self) -> ViewMode {
        ViewMode::Status1
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

        self.update(now_ms, telemetry);
        let drawn = display.compose(FlushKind::Fast, |frame| self.draw(frame));
        if drawn && self.state != ViewState::Active {
            debug!("status1: {} -> {}", self.state, ViewState::Active);
            self.state = ViewState::Active;
        }
        outcome(drawn, FlushKind::Fast)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::testing::MockTelemetry;
    use embedded_graphics::primitives::Rectangle;
    use skyscope_core::traffic::Target;
    use skyscope_core::traits::{ClockTime, Reading};

    fn ticked(telemetry: &MockTelemetry) -> Status1View {
        let display = DisplayResource::new();
        let mut view = Status1View::new();
        assert_eq!(
            view.tick(10_000, telemetry, &display),
            TickOutcome::Submitted(FlushKind::Fast)
        );
        view
    }

    #[test]
    fn test_grid_fills_panel() {
        let view = Status1View::new();
        assert_eq!(view.clock.bounds().size.width, 154);
        assert_eq!(view.battery.right_edge(), 198);
        assert_eq!(view.speed_knots.right_edge(), 199);
        assert_eq!(view.speed_kmh.right_edge(), 199);
        assert_eq!(view.track.right_edge(), 199);
        assert_eq!(view.traffic.bounds().top_left.y, 150);
    }

    #[test]
    fn test_live_values() {
        let view = ticked(&MockTelemetry::with_fix());
        assert_eq!(view.clock.value(), "09:05:07");
        assert_eq!(view.battery.value(), "87");
        assert_eq!(view.gnss_alt_ft.value(), "3281  ");
        assert_eq!(view.gnss_alt_m.value(), "1000  ");
        assert_eq!(view.baro_alt_m.value(), "950");
        assert_eq!(view.baro_alt_ft.value(), "3117");
        assert_eq!(view.speed_knots.value(), "54");
        assert_eq!(view.speed_kmh.value(), "100");
        assert_eq!(view.track.value(), "270");
        assert_eq!(view.vario.value(), "2");
        assert_eq!(view.traffic.value(), "0");
    }

    #[test]
    fn test_missing_barometer_blanks_baro_tiles_only() {
        let mut telemetry = MockTelemetry::with_fix();
        telemetry.baro = None;
        let view = ticked(&telemetry);

        assert_eq!(view.baro_alt_ft.value(), "--");
        assert_eq!(view.baro_alt_m.value(), "--");
        assert_eq!(view.vario.value(), "--");
        // GNSS-derived tiles keep their values
        assert_eq!(view.speed_kmh.value(), "100");
        assert_eq!(view.speed_knots.value(), "54");
        assert_eq!(view.gnss_alt_m.value(), "1000  ");
    }

    #[test]
    fn test_stale_gnss_shows_placeholders() {
        let mut telemetry = MockTelemetry::with_fix();
        telemetry.gnss.altitude_m = Reading::new(1000.0, GNSS_EXPIRY_MS + 1);
        telemetry.gnss.speed_knots.valid = false;
        telemetry.gnss.course_deg = Reading::default();
        let view = ticked(&telemetry);

        assert_eq!(view.gnss_alt_ft.value(), "--");
        assert_eq!(view.speed_knots.value(), "--");
        assert_eq!(view.speed_kmh.value(), "--");
        assert_eq!(view.track.value(), "--");
    }

    #[test]
    fn test_poor_dop_flags_altitude() {
        let mut telemetry = MockTelemetry::with_fix();
        telemetry.gnss.vdop = Reading::new(2.5, 100);
        let view = ticked(&telemetry);
        assert_eq!(view.gnss_alt_m.value(), "1000 ?");
    }

    #[test]
    fn test_clock_outside_plausible_years() {
        let mut telemetry = MockTelemetry::with_fix();
        telemetry.clock = Some(ClockTime {
            year: 2000,
            ..ClockTime::default()
        });
        assert_eq!(ticked(&telemetry).clock.value(), "--:--:--");

        telemetry.clock = None;
        assert_eq!(ticked(&telemetry).clock.value(), "--:--:--");
    }

    #[test]
    fn test_traffic_tile_relayouts() {
        let mut telemetry = MockTelemetry::with_fix();
        let quiet = ticked(&telemetry);
        let quiet_x = quiet.traffic.value_anchor().x;

        for address in 1..=3 {
            telemetry.add_target(Target {
                address,
                distance_m: 800.0,
                timestamp_ms: 9_000,
                ..Target::default()
            });
        }
        let busy = ticked(&telemetry);
        assert_eq!(busy.traffic.value(), "* 3 *");
        assert!(busy.traffic.value_anchor().x < quiet_x);
    }

    #[test]
    fn test_traffic_tile_keeps_anchor_until_alert_changes() {
        let display = DisplayResource::new();
        let mut telemetry = MockTelemetry::with_fix();
        let mut view = Status1View::new();
        let quiet = view.traffic.value_anchor();

        view.tick(10_000, &telemetry, &display);
        display.gate().complete();
        assert_eq!(view.traffic.value_anchor(), quiet);

        telemetry.add_target(Target {
            address: 7,
            distance_m: 800.0,
            timestamp_ms: 10_000,
            ..Target::default()
        });
        view.tick(11_001, &telemetry, &display);
        display.gate().complete();
        assert!(view.traffic_alert);
        assert_ne!(view.traffic.value_anchor(), quiet);

        // same sample: the anchor is left alone
        view.traffic.relayout(LARGE_FONT, TRAFFIC_SAMPLE);
        view.tick(12_002, &telemetry, &display);
        assert_eq!(view.traffic.value(), "* 1 *");
        assert_eq!(view.traffic.value_anchor(), quiet);
    }

    #[test]
    fn test_ble_marker() {
        let display = DisplayResource::new();
        let mut telemetry = MockTelemetry::with_fix();
        telemetry.ble = true;
        let mut view = Status1View::new();
        view.tick(0, &telemetry, &display);

        // top-right corner of the clock tile, clear of the centred time
        let corner = Rectangle::new(Point::new(130, 2), Size::new(20, 16));
        assert!(display.with_frame(|fb| fb.ink_in(&corner)).unwrap() > 0);
    }
}
