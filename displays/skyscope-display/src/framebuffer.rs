//! 1-bit frame buffer
//!
//! Holds one complete screen for the 200x200 e-paper panel. Views draw into
//! it through `embedded-graphics`; the flush worker hands the raw bytes to
//! the panel backend.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PointsIter, Rectangle};

/// Panel width in pixels
pub const DISPLAY_WIDTH: u32 = 200;

/// Panel height in pixels
pub const DISPLAY_HEIGHT: u32 = 200;

const ROW_BYTES: usize = (DISPLAY_WIDTH as usize).div_ceil(8);

/// Frame buffer size in bytes
pub const BUFFER_LEN: usize = ROW_BYTES * DISPLAY_HEIGHT as usize;

/// Screen buffer, `BinaryColor::On` is black ink
#[derive(Clone)]
pub struct FrameBuffer {
    bits: [u8; BUFFER_LEN],
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    /// Create a blank (white) buffer
    pub const fn new() -> Self {
        Self {
            bits: [0; BUFFER_LEN],
        }
    }

    /// Raw bytes, row-major, MSB first
    pub fn as_bytes(&self) -> &[u8] {
        &self.bits
    }

    /// Blank the whole screen
    pub fn fill_white(&mut self) {
        self.bits.fill(0);
    }

    fn index(point: Point) -> Option<(usize, u8)> {
        if point.x < 0
            || point.y < 0
            || point.x >= DISPLAY_WIDTH as i32
            || point.y >= DISPLAY_HEIGHT as i32
        {
            return None;
        }
        let x = point.x as usize;
        let y = point.y as usize;
        Some((y * ROW_BYTES + x / 8, 0x80 >> (x % 8)))
    }

    /// Set a single pixel, ignoring points outside the panel
    pub fn set_pixel(&mut self, point: Point, color: BinaryColor) {
        if let Some((byte, mask)) = Self::index(point) {
            if color.is_on() {
                self.bits[byte] |= mask;
            } else {
                self.bits[byte] &= !mask;
            }
        }
    }

    /// Pixel colour; points outside the panel read as white
    pub fn pixel(&self, point: Point) -> BinaryColor {
        match Self::index(point) {
            Some((byte, mask)) if self.bits[byte] & mask != 0 => BinaryColor::On,
            _ => BinaryColor::Off,
        }
    }

    /// Number of black pixels inside `area`
    pub fn ink_in(&self, area: &Rectangle) -> usize {
        area.points()
            .filter(|p| self.pixel(*p) == BinaryColor::On)
            .count()
    }

    /// True when no pixel is black
    pub fn is_blank(&self) -> bool {
        self.bits.iter().all(|b| *b == 0)
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(DISPLAY_WIDTH, DISPLAY_HEIGHT)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point, color);
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.bits.fill(if color.is_on() { 0xFF } else { 0x00 });
        Ok(())
    }
}
