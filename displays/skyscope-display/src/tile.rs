//! Titled value tiles
//!
//! A tile is a sharp-cornered box with a small title in its top-left
//! corner and one value centred in the remaining space. Status pages are
//! grids of tiles.
//!
//! Anchors are computed once when the tile is created and again only when
//! the value font or the representative sample text changes. The value is
//! centred on the *sample*, not on the current text, so a value that
//! changes from "9" to "10" does not jump around between ticks.

use core::fmt;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use heapless::String;
use skyscope_core::format::{self, Value, PLACEHOLDER, TITLE_LEN};

use crate::fonts::{self, Font, TITLE_FONT, TITLE_REFERENCE};

/// Inset of the title from the tile's top-left corner
const TITLE_MARGIN: i32 = 4;

/// Bottom padding subtracted before centring the value
const VALUE_BOTTOM_PAD: i32 = 2;

/// One titled value box
#[derive(Clone)]
pub struct Tile {
    title: String<TITLE_LEN>,
    bounds: Rectangle,
    /// Title pen position relative to `bounds.top_left`
    title_anchor: Point,
    /// Value pen position relative to `bounds.top_left`
    value_anchor: Point,
    value: Value,
    value_font: &'static Font,
}

impl Tile {
    /// Create a tile and lay it out for `sample`
    pub fn new(title: &str, bounds: Rectangle, value_font: &'static Font, sample: &str) -> Self {
        let mut tile = Self {
            title: String::new(),
            bounds,
            title_anchor: Point::zero(),
            value_anchor: Point::zero(),
            value: String::new(),
            value_font,
        };
        tile.set_title(title);
        tile.relayout(value_font, sample);
        tile
    }

    /// Replace the title and recompute its anchor
    pub fn set_title(&mut self, title: &str) {
        format::set_truncated(&mut self.title, title);
        let reference = fonts::measure(TITLE_FONT, TITLE_REFERENCE);
        self.title_anchor = Point::new(TITLE_MARGIN, TITLE_MARGIN + reference.ascent as i32);
    }

    /// Re-centre the value area for a new font or sample text
    pub fn relayout(&mut self, value_font: &'static Font, sample: &str) {
        self.value_font = value_font;
        let extent = fonts::measure(value_font, sample);
        let width = self.bounds.size.width as i32;
        let height = self.bounds.size.height as i32;

        let x = ((width - extent.width as i32) / 2).max(0);
        // centre between the title baseline and the bottom edge
        let y = (self.title_anchor.y + height - VALUE_BOTTOM_PAD + extent.ascent as i32) / 2;
        self.value_anchor = Point::new(x, y);
    }

    /// Format a new value, truncated to capacity
    pub fn set_value(&mut self, args: fmt::Arguments<'_>) {
        format::write_truncated(&mut self.value, args);
    }

    /// Replace the value with fixed text
    pub fn set_text(&mut self, text: &str) {
        format::set_truncated(&mut self.value, text);
    }

    /// Show the "no data" placeholder
    pub fn set_placeholder(&mut self) {
        self.set_text(PLACEHOLDER);
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn bounds(&self) -> Rectangle {
        self.bounds
    }

    /// Title anchor relative to the tile origin
    pub fn title_anchor(&self) -> Point {
        self.title_anchor
    }

    /// Value anchor relative to the tile origin
    pub fn value_anchor(&self) -> Point {
        self.value_anchor
    }

    /// x coordinate just right of this tile, sharing its border column
    pub fn right_edge(&self) -> i32 {
        self.bounds.top_left.x + self.bounds.size.width as i32 - 1
    }

    /// Draw the tile border
    pub fn draw_border<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        self.bounds
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(target)
    }

    /// Draw the title
    pub fn draw_title<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        fonts::draw_text(
            target,
            &self.title,
            TITLE_FONT,
            self.bounds.top_left + self.title_anchor,
        )
    }

    /// Draw the current value
    pub fn draw_value<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        if self.value.is_empty() {
            return Ok(());
        }
        fonts::draw_text(
            target,
            &self.value,
            self.value_font,
            self.bounds.top_left + self.value_anchor,
        )
    }

    /// Draw border, title and value
    pub fn render<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        self.draw_border(target)?;
        self.draw_title(target)?;
        self.draw_value(target)
    }
}

/// Places tiles left to right along one row
///
/// Neighbouring tiles overlap by one column so they share a border line.
pub struct TileRow {
    x: i32,
    y: i32,
    height: u32,
}

impl TileRow {
    pub fn new(y: i32, height: u32) -> Self {
        Self { x: 0, y, height }
    }

    /// Create the next tile in the row
    pub fn place(&mut self, title: &str, width: u32, font: &'static Font, sample: &str) -> Tile {
        let bounds = Rectangle::new(Point::new(self.x, self.y), Size::new(width, self.height));
        let tile = Tile::new(title, bounds, font, sample);
        self.x = tile.right_edge();
        tile
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::{LARGE_FONT, MEDIUM_FONT};
    use crate::framebuffer::FrameBuffer;

    fn rect(x: i32, y: i32, w: u32, h: u32) -> Rectangle {
        Rectangle::new(Point::new(x, y), Size::new(w, h))
    }

    #[test]
    fn test_value_centred_horizontally() {
        // "100" is 30 px wide in the large font
        let tile = Tile::new("ALT", rect(0, 0, 60, 50), LARGE_FONT, "100");
        assert!((tile.value_anchor().x - 15).abs() <= 1);
    }

    #[test]
    fn test_value_centred_below_title() {
        let tile = Tile::new("ALT", rect(0, 0, 60, 50), LARGE_FONT, "100");
        let title_baseline = 4 + TITLE_FONT.baseline as i32;
        assert_eq!(tile.title_anchor(), Point::new(4, title_baseline));
        let expected = (title_baseline + 50 - 2 + LARGE_FONT.baseline as i32) / 2;
        assert_eq!(tile.value_anchor().y, expected);
    }

    #[test]
    fn test_title_anchor_independent_of_title_text() {
        let caps = Tile::new("QNH", rect(0, 0, 60, 40), MEDIUM_FONT, "0");
        let lower = Tile::new("^ms", rect(0, 0, 60, 40), MEDIUM_FONT, "0");
        assert_eq!(caps.title_anchor(), lower.title_anchor());
    }

    #[test]
    fn test_relayout_recentres_wider_sample() {
        let mut tile = Tile::new("ACFT", rect(0, 0, 84, 50), LARGE_FONT, "0");
        let narrow = tile.value_anchor().x;
        tile.relayout(LARGE_FONT, "* 0 *");
        assert_eq!(narrow, (84 - 10) / 2);
        assert_eq!(tile.value_anchor().x, (84 - 50) / 2);
    }

    #[test]
    fn test_sample_wider_than_box_pins_left() {
        let tile = Tile::new("UTC", rect(0, 0, 40, 40), LARGE_FONT, "00:00:00");
        assert_eq!(tile.value_anchor().x, 0);
    }

    #[test]
    fn test_value_truncated_not_wrapped() {
        let mut tile = Tile::new("ID", rect(0, 0, 60, 40), MEDIUM_FONT, "000000");
        tile.set_value(format_args!("{}", "ABCDEFGHIJKLMNOPQRSTUVWXYZ"));
        assert_eq!(tile.value(), "ABCDEFGHIJKLMNO");
        assert_eq!(tile.bounds(), rect(0, 0, 60, 40));
    }

    #[test]
    fn test_render_draws_border_and_text() {
        let mut tile = Tile::new("BAT%", rect(10, 10, 60, 50), LARGE_FONT, "100");
        tile.set_text("87");
        let mut fb = FrameBuffer::new();
        tile.render(&mut fb).unwrap();

        // corners of the border
        assert_eq!(fb.pixel(Point::new(10, 10)), BinaryColor::On);
        assert_eq!(fb.pixel(Point::new(69, 59)), BinaryColor::On);
        // some ink inside the value area
        let inner = rect(11, 30, 58, 28);
        assert!(fb.ink_in(&inner) > 0);
    }

    #[test]
    fn test_render_with_empty_value() {
        let tile = Tile::new("TRK", rect(0, 0, 50, 40), MEDIUM_FONT, "000");
        let mut fb = FrameBuffer::new();
        tile.render(&mut fb).unwrap();
        assert!(!fb.is_blank());
        assert_eq!(tile.value(), "");
    }

    #[test]
    fn test_placeholder() {
        let mut tile = Tile::new("knot", rect(0, 0, 50, 40), MEDIUM_FONT, "000");
        tile.set_value(format_args!("{:.0}", 123.4f32));
        assert_eq!(tile.value(), "123");
        tile.set_placeholder();
        assert_eq!(tile.value(), "--");
    }

    #[test]
    fn test_right_edge_shares_border() {
        let tile = Tile::new("UTC", rect(0, 0, 154, 50), LARGE_FONT, "00:00:00");
        assert_eq!(tile.right_edge(), 153);
    }

    #[test]
    fn test_row_places_tiles_edge_to_edge() {
        let mut row = TileRow::new(50, 50);
        let first = row.place("QNHft", 84, LARGE_FONT, "00000?");
        let second = row.place("QNEft", 72, LARGE_FONT, "00000");
        let third = row.place("knot", 46, LARGE_FONT, "000");

        assert_eq!(first.bounds(), rect(0, 50, 84, 50));
        assert_eq!(second.bounds(), rect(83, 50, 72, 50));
        assert_eq!(third.bounds(), rect(154, 50, 46, 50));
        assert_eq!(third.right_edge(), 199);
    }
}
