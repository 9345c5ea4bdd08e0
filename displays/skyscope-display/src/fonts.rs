//! Fonts and text measurement
//!
//! All text is anchored on its alphabetic baseline, so an anchor point is
//! the pen position of the first glyph.

use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X10, FONT_7X13_BOLD, FONT_9X15_BOLD};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::renderer::TextRenderer;
use embedded_graphics::text::{Baseline, Text};

/// Font type used throughout the views
pub type Font = MonoFont<'static>;

/// Tile titles
pub const TITLE_FONT: &Font = &FONT_6X10;

/// Glyph used to place every title, so titles with and without
/// descenders end up on the same baseline
pub const TITLE_REFERENCE: &str = "B";

/// Large values (status-1, radar figures, placeholder messages)
pub const LARGE_FONT: &Font = &FONT_10X20;

/// Medium values (status-2)
pub const MEDIUM_FONT: &Font = &FONT_9X15_BOLD;

/// Compass labels and small captions
pub const LABEL_FONT: &Font = &FONT_6X10;

/// Own course box in track-up mode
pub const COURSE_FONT: &Font = &FONT_7X13_BOLD;

/// Measured size of a string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextExtent {
    /// Width of the bounding box
    pub width: u32,
    /// Height of the bounding box above the baseline
    pub ascent: u32,
}

/// Measure `text` in `font`
pub fn measure(font: &Font, text: &str) -> TextExtent {
    let metrics = MonoTextStyle::new(font, BinaryColor::On).measure_string(
        text,
        Point::zero(),
        Baseline::Alphabetic,
    );
    let bounds = metrics.bounding_box;
    TextExtent {
        width: bounds.size.width,
        ascent: (-bounds.top_left.y).max(0) as u32,
    }
}

/// Draw `text` with its baseline starting at `position`
pub fn draw_text<D>(target: &mut D, text: &str, font: &Font, position: Point) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    Text::with_baseline(
        text,
        position,
        MonoTextStyle::new(font, BinaryColor::On),
        Baseline::Alphabetic,
    )
    .draw(target)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monospace_width() {
        assert_eq!(measure(LARGE_FONT, "100").width, 30);
        assert_eq!(measure(LARGE_FONT, "* 0 *").width, 50);
        assert_eq!(measure(TITLE_FONT, "QNHft").width, 30);
    }

    #[test]
    fn test_ascent_is_font_baseline() {
        let extent = measure(LARGE_FONT, "0");
        assert_eq!(extent.ascent, LARGE_FONT.baseline);
        assert_eq!(
            measure(TITLE_FONT, TITLE_REFERENCE).ascent,
            measure(TITLE_FONT, "g").ascent
        );
    }

    #[test]
    fn test_empty_text_has_no_width() {
        assert_eq!(measure(MEDIUM_FONT, "").width, 0);
    }
}
