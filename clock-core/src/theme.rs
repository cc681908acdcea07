//! Clock face colours.

use embedded_graphics::pixelcolor::{
    Rgb565,
    Rgb888,
};
use palette::Srgb;

pub const BACKGROUND: Srgb<u8> = Srgb::new(90, 25, 70);
pub const ACCENT: Srgb<u8> = Srgb::new(255, 50, 255);
pub const HIGHLIGHT: Srgb<u8> = Srgb::new(50, 255, 50);
pub const HUB: Srgb<u8> = Srgb::new(0, 0, 0);
pub const STARS: Srgb<u8> = Srgb::new(220, 200, 220);

/// Convert a theme colour to the panel's pixel format.
pub fn rgb565(color: Srgb<u8>) -> Rgb565 {
    Rgb888::new(color.red, color.green, color.blue).into()
}
