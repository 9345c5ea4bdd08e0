//! Bounded value formatting
//!
//! Tile values live in fixed-capacity strings. Formatting never fails:
//! anything past the capacity is dropped.

use core::fmt;

use heapless::String;

/// Maximum characters in a tile value
pub const VALUE_LEN: usize = 15;

/// Maximum characters in a tile title
pub const TITLE_LEN: usize = 15;

/// Shown in place of invalid, stale or absent data
pub const PLACEHOLDER: &str = "--";

/// Shown in place of an unset clock
pub const CLOCK_PLACEHOLDER: &str = "--:--:--";

/// Radar placeholder without a GNSS fix
pub const NO_FIX_TEXT: &str = "NO FIX";

/// Radar placeholder without any GNSS data
pub const NO_DATA_TEXT: &str = "NO DATA";

pub const FEET_PER_METER: f32 = 3.280_84;

/// PDOP/VDOP at or below this count as a good altitude solution
pub const GOOD_DOP: f32 = 1.1;

/// RTC years before this are treated as "not set"
pub const MIN_CLOCK_YEAR: u16 = 2024;

/// RTC years this far past [`MIN_CLOCK_YEAR`] are treated as garbage
pub const CLOCK_YEAR_SPAN: u16 = 15;

/// Tile value buffer
pub type Value = String<VALUE_LEN>;

struct Truncating<'a, const N: usize> {
    buf: &'a mut String<N>,
    full: bool,
}

impl<const N: usize> fmt::Write for Truncating<'_, N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            if self.full {
                break;
            }
            if self.buf.push(c).is_err() {
                self.full = true;
            }
        }
        Ok(())
    }
}

/// Replace `buf` with the formatted text, cut at capacity
pub fn write_truncated<const N: usize>(buf: &mut String<N>, args: fmt::Arguments<'_>) {
    buf.clear();
    let mut writer = Truncating { buf, full: false };
    // Truncating::write_str never fails; errors can only come from user Display impls
    let _ = fmt::Write::write_fmt(&mut writer, args);
}

/// Replace `buf` with `text`, cut at capacity
pub fn set_truncated<const N: usize>(buf: &mut String<N>, text: &str) {
    write_truncated(buf, format_args!("{}", text));
}

/// Vertical speed in m/s from feet per minute, with small values snapped to 0
///
/// Keeps "-0" off the display.
pub fn vertical_speed_ms(fpm: f32) -> f32 {
    let ms = fpm / (FEET_PER_METER * 60.0);
    if ms > -0.5 && ms < 0.5 {
        0.0
    } else {
        ms
    }
}

/// RTC year within the plausible window
pub fn clock_year_valid(year: u16) -> bool {
    (MIN_CLOCK_YEAR..MIN_CLOCK_YEAR + CLOCK_YEAR_SPAN).contains(&year)
}

/// Altitude quality flag: ' ' for a good solution, '?' otherwise
pub fn altitude_flag(pdop: Option<f32>, vdop: Option<f32>) -> char {
    match (pdop, vdop) {
        (Some(p), Some(v)) if p <= GOOD_DOP && v <= GOOD_DOP => ' ',
        _ => '?',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncates_silently() {
        let mut buf: String<4> = String::new();
        write_truncated(&mut buf, format_args!("{}", 123_456));
        assert_eq!(buf.as_str(), "1234");
    }

    #[test]
    fn test_overwrites_previous_value() {
        let mut buf: Value = String::new();
        set_truncated(&mut buf, "long value here");
        set_truncated(&mut buf, "7");
        assert_eq!(buf.as_str(), "7");
    }

    #[test]
    fn test_multi_part_format_stops_at_capacity() {
        let mut buf: String<5> = String::new();
        write_truncated(&mut buf, format_args!("{:<5.0}{}", 1234.0f32, '?'));
        assert_eq!(buf.as_str(), "1234 ");
    }

    #[test]
    fn test_vertical_speed_snaps_near_zero() {
        assert_eq!(vertical_speed_ms(-50.0), 0.0);
        assert_eq!(vertical_speed_ms(90.0), 0.0);
        let climb = vertical_speed_ms(600.0);
        assert!(climb > 3.0 && climb < 3.1);
    }

    #[test]
    fn test_clock_year_window() {
        assert!(!clock_year_valid(2000));
        assert!(clock_year_valid(2024));
        assert!(clock_year_valid(2038));
        assert!(!clock_year_valid(2039));
    }

    #[test]
    fn test_altitude_flag() {
        assert_eq!(altitude_flag(Some(0.9), Some(1.1)), ' ');
        assert_eq!(altitude_flag(Some(1.2), Some(1.0)), '?');
        assert_eq!(altitude_flag(None, Some(1.0)), '?');
    }
}
