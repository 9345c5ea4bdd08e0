//! Full-screen message
//!
//! Shown instead of a view's data when there is nothing sensible to draw,
//! e.g. "NO FIX". Messages go out as a full (`Slow`) refresh so the panel
//! is cleaned of ghosting left by the partial updates before it.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use skyscope_core::FlushKind;

use crate::fonts::{self, LARGE_FONT};
use crate::resource::DisplayResource;

/// Draw `text` centred on the target
pub fn draw_message<D>(target: &mut D, text: &str) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor> + OriginDimensions,
{
    let size = target.size();
    let extent = fonts::measure(LARGE_FONT, text);
    let x = (size.width.saturating_sub(extent.width) / 2) as i32;
    let y = ((size.height + extent.ascent) / 2) as i32;
    fonts::draw_text(target, text, LARGE_FONT, Point::new(x, y))
}

/// Compose a message screen; false when the display is busy
pub fn show(display: &DisplayResource, text: &str) -> bool {
    display.compose(FlushKind::Slow, |frame| draw_message(frame, text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::primitives::Rectangle;
    use skyscope_core::format::NO_FIX_TEXT;
    use skyscope_core::GateState;

    use crate::framebuffer::FrameBuffer;

    #[test]
    fn test_message_is_centred() {
        let mut fb = FrameBuffer::new();
        draw_message(&mut fb, NO_FIX_TEXT).unwrap();

        // "NO FIX" is 60 px wide in the large font
        let left = Rectangle::new(Point::new(0, 0), Size::new(70, 200));
        let right = Rectangle::new(Point::new(130, 0), Size::new(70, 200));
        let middle = Rectangle::new(Point::new(70, 80), Size::new(60, 40));
        assert_eq!(fb.ink_in(&left), 0);
        assert_eq!(fb.ink_in(&right), 0);
        assert!(fb.ink_in(&middle) > 0);
    }

    #[test]
    fn test_show_requests_full_refresh() {
        let display = DisplayResource::new();
        assert!(show(&display, NO_FIX_TEXT));
        assert_eq!(display.gate().state(), GateState::Slow);
        assert!(!show(&display, NO_FIX_TEXT));
    }
}
