//! Status page 2
//!
//! Diagnostic figures in a 5-row grid:
//!
//! ```text
//! UTC         BAT   TMP
//! QNHft   mbar   QNEft
//! knot  TRK  ^ms  SAT
//! <proto>     VDOP  PDOP
//! TX    RX   RSSI ACFT
//! ```
//!
//! The protocol tile carries the active RF protocol as its title and the
//! own device address as its value.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use skyscope_core::config::{UiSettings, GNSS_EXPIRY_MS};
use skyscope_core::format::{self, CLOCK_PLACEHOLDER, FEET_PER_METER};
use skyscope_core::state::{Cadence, ViewState};
use skyscope_core::traffic;
use skyscope_core::traits::Telemetry;
use skyscope_core::FlushKind;

use super::{outcome, TickOutcome, View, ViewMode};
use crate::fonts::MEDIUM_FONT;
use crate::framebuffer::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use crate::resource::DisplayResource;
use crate::tile::{Tile, TileRow};

/// Radio counters wrap at this value to fit their tiles
const COUNTER_MODULUS: u32 = 1000;

/// Device addresses are 24 bit
const ADDRESS_MASK: u32 = 0x00FF_FFFF;

const TX_OFF_TEXT: &str = "OFF";

/// Status page 2 state
pub struct Status2View {
    settings: UiSettings,
    clock: Tile,
    voltage: Tile,
    temperature: Tile,
    gnss_alt_ft: Tile,
    pressure: Tile,
    baro_alt_ft: Tile,
    speed_knots: Tile,
    track: Tile,
    vario: Tile,
    satellites: Tile,
    device_id: Tile,
    vdop: Tile,
    pdop: Tile,
    tx: Tile,
    rx: Tile,
    rssi: Tile,
    traffic: Tile,
    cadence: Cadence,
    state: ViewState,
}

impl Status2View {
    pub fn new(settings: &UiSettings) -> Self {
        let width = DISPLAY_WIDTH as i32;
        let box_w = width / 3;
        let box_h = DISPLAY_HEIGHT / 5;
        let row_y = |row: u32| (row * box_h) as i32;
        let font = MEDIUM_FONT;

        let narrow = (box_w - 20) as u32;
        let quarter = (box_w - 15) as u32;

        let mut row = TileRow::new(row_y(0), box_h);
        let clock = row.place("UTC", (width - 2 * (box_w - 21)) as u32, font, "00:00:00");
        let voltage = row.place("BAT", narrow, font, "0.0");
        let temperature = row.place("TMP", narrow, font, "-00");

        let mut row = TileRow::new(row_y(1), box_h);
        let gnss_alt_ft = row.place("QNHft", (width - 2 * (box_w - 1) + 10) as u32, font, "00000?");
        let pressure = row.place("mbar", (box_w - 10) as u32, font, "1000");
        let baro_alt_ft = row.place("QNEft", box_w as u32, font, "00000");

        let mut row = TileRow::new(row_y(2), box_h);
        let speed_knots = row.place("knot", (width - 3 * (box_w - 16)) as u32, font, "000");
        let track = row.place("TRK", quarter, font, "000");
        let vario = row.place("^ms", quarter, font, "-00");
        let satellites = row.place("SAT", quarter, font, "00");

        let mut row = TileRow::new(row_y(3), box_h);
        let device_id = row.place(
            settings.protocol.label(),
            (width - 2 * (box_w - 16)) as u32,
            font,
            "000000",
        );
        let vdop = row.place("VDOP", quarter, font, "00.0");
        let pdop = row.place("PDOP", quarter, font, "00.0");

        let mut row = TileRow::new(row_y(4), box_h);
        let tx = row.place("TX", (width - 3 * (box_w - 16)) as u32, font, "000");
        let rx = row.place("RX", quarter, font, "000");
        let rssi = row.place("RSSI", quarter, font, "00");
        let traffic = row.place("ACFT", quarter, font, "0");

        Self {
            settings: *settings,
            clock,
            voltage,
            temperature,
            gnss_alt_ft,
            pressure,
            baro_alt_ft,
            speed_knots,
            track,
            vario,
            satellites,
            device_id,
            vdop,
            pdop,
            tx,
            rx,
            rssi,
            traffic,
            cadence: Cadence::default(),
            state: ViewState::None,
        }
    }

    fn tiles(&self) -> [&Tile; 17] {
        [
            &self.clock,
            &self.voltage,
            &self.temperature,
            &self.gnss_alt_ft,
            &self.pressure,
            &self.baro_alt_ft,
            &self.speed_knots,
            &self.track,
            &self.vario,
            &self.satellites,
            &self.device_id,
            &self.vdop,
            &self.pdop,
            &self.tx,
            &self.rx,
            &self.rssi,
            &self.traffic,
        ]
    }

    fn update(&mut self, now_ms: u64, telemetry: &dyn Telemetry) {
        match telemetry.clock() {
            Some(t) if format::clock_year_valid(t.year) => self.clock.set_value(format_args!(
                "{:02}:{:02}:{:02}",
                t.hour, t.minute, t.second
            )),
            _ => self.clock.set_text(CLOCK_PLACEHOLDER),
        }
        self.voltage
            .set_value(format_args!("{:.1}", telemetry.battery().voltage));

        let gnss = telemetry.gnss();
        let pdop = gnss.pdop.fresh(GNSS_EXPIRY_MS);
        let vdop = gnss.vdop.fresh(GNSS_EXPIRY_MS);
        match gnss.altitude_m.fresh(GNSS_EXPIRY_MS) {
            Some(alt) => self.gnss_alt_ft.set_value(format_args!(
                "{:<5.0}{}",
                alt * FEET_PER_METER,
                format::altitude_flag(pdop, vdop)
            )),
            None => self.gnss_alt_ft.set_placeholder(),
        }

        match telemetry.baro() {
            Some(baro) => {
                self.temperature
                    .set_value(format_args!("{:.0}", baro.temperature_c));
                self.pressure
                    .set_value(format_args!("{:.0}", baro.pressure_pa / 100.0));
                self.baro_alt_ft
                    .set_value(format_args!("{:.0}", baro.altitude_m * FEET_PER_METER));
                let vs = format::vertical_speed_ms(telemetry.own_state().vertical_speed_fpm);
                self.vario.set_value(format_args!("{:.0}", vs));
            }
            None => {
                self.temperature.set_placeholder();
                self.pressure.set_placeholder();
                self.baro_alt_ft.set_placeholder();
                self.vario.set_placeholder();
            }
        }

        match gnss.speed_knots.fresh(GNSS_EXPIRY_MS) {
            Some(knots) => self.speed_knots.set_value(format_args!("{:.0}", knots)),
            None => self.speed_knots.set_placeholder(),
        }
        match gnss.course_deg.fresh(GNSS_EXPIRY_MS) {
            Some(course) => self.track.set_value(format_args!("{:.0}", course)),
            None => self.track.set_placeholder(),
        }
        self.satellites
            .set_value(format_args!("{}", gnss.satellites));

        match vdop {
            Some(dop) => self.vdop.set_value(format_args!("{:.1}", dop)),
            None => self.vdop.set_placeholder(),
        }
        match pdop {
            Some(dop) => self.pdop.set_value(format_args!("{:.1}", dop)),
            None => self.pdop.set_placeholder(),
        }

        let own = telemetry.own_state();
        self.device_id
            .set_value(format_args!("{:06X}", own.address & ADDRESS_MASK));

        let link = telemetry.link();
        if self.settings.transmitting() {
            self.tx
                .set_value(format_args!("{}", link.tx_packets % COUNTER_MODULUS));
        } else {
            self.tx.set_text(TX_OFF_TEXT);
        }
        self.rx
            .set_value(format_args!("{}", link.rx_packets % COUNTER_MODULUS));
        self.rssi.set_value(format_args!("{}", link.rssi));
        self.traffic.set_value(format_args!(
            "{}",
            traffic::traffic_count(telemetry.traffic(), now_ms)
        ));
    }

    fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        for tile in self.tiles() {
            tile.render(target)?;
        }
        Ok(())
    }
}

impl View for Status2View {
    fn mode(&self) -> ViewMode {
        ViewMode::Status2
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
            debug!("status2: {} -> {}", self.state, ViewState::Active);
            self.state = ViewState::Active;
        }
        outcome(drawn, FlushKind::Fast)
    }
}
