//! Immediate-mode drawing surface used by the clock face.
//!
//! [`Canvas`] is the pen-and-primitives interface the face is drawn through.
//! [`FrameCanvas`] implements it on top of an `embedded-graphics` framebuffer
//! and hands finished frames to a [`Panel`].

use embedded_graphics::{
    Pixel,
    mono_font::{
        MonoFont,
        MonoTextStyle,
        ascii::{
            FONT_6X10,
            FONT_10X20,
        },
    },
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{
        Circle,
        Line,
        PrimitiveStyle,
        Rectangle,
    },
    text::{
        Baseline,
        Text,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextScale {
    Small,
    Large,
}

impl TextScale {
    const fn font(self) -> &'static MonoFont<'static> {
        match self {
            Self::Small => &FONT_6X10,
            Self::Large => &FONT_10X20,
        }
    }

    const fn advance(self) -> u32 {
        let font = self.font();
        font.character_size.width + font.character_spacing
    }

    const fn line_height(self) -> u32 {
        self.font().character_size.height
    }

    /// Characters that fit in `max_width` pixels; `None` when unlimited.
    const fn columns(self, max_width: u32) -> Option<usize> {
        if max_width == 0 {
            return None;
        }
        let columns = (max_width + self.font().character_spacing) / self.advance();
        Some(if columns == 0 { 1 } else { columns as usize })
    }
}

/// Splits text into lines of at most `columns` characters, breaking at
/// spaces where it can and inside a word only when the word alone is too
/// long.
struct WrapLines<'a> {
    rest: &'a str,
    columns: Option<usize>,
}

impl<'a> Iterator for WrapLines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let rest = self.rest.trim_start_matches(' ');
        if rest.is_empty() {
            return None;
        }
        let limit = self
            .columns
            .and_then(|c| rest.char_indices().nth(c))
            .map(|(i, _)| i);
        let Some(limit) = limit else {
            self.rest = "";
            return Some(rest);
        };
        let cut = if rest[limit..].starts_with(' ') {
            limit
        } else {
            rest[..limit].rfind(' ').unwrap_or(limit)
        };
        self.rest = &rest[cut..];
        Some(rest[..cut].trim_end_matches(' '))
    }
}

/// Pen-based drawing surface. Coordinates are pixels, origin top left.
pub trait Canvas {
    fn set_color(&mut self, color: Rgb565);
    /// Fill the whole surface with the pen colour.
    fn clear(&mut self);
    /// Filled circle centred on `(x, y)`.
    fn circle(&mut self, x: i32, y: i32, radius: u32);
    fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32);
    /// Filled rectangle.
    fn rectangle(&mut self, x: i32, y: i32, width: u32, height: u32);
    /// Draw text with its top-left corner at `(x, y)`. Text wider than
    /// `max_width` pixels wraps at word boundaries onto following lines, one
    /// font height apart (0 means no limit).
    fn text(&mut self, text: &str, x: i32, y: i32, max_width: u32, scale: TextScale);
    fn measure_text(&self, text: &str, scale: TextScale) -> u32;
    /// Show everything drawn since the last present.
    fn present(&mut self);
    /// Backlight brightness, 0.0 (off) to 1.0 (full).
    fn set_backlight(&mut self, level: f32);
}

impl<C: Canvas + ?Sized> Canvas for &mut C {
    fn set_color(&mut self, color: Rgb565) {
        (**self).set_color(color);
    }

    fn clear(&mut self) {
        (**self).clear();
    }

    fn circle(&mut self, x: i32, y: i32, radius: u32) {
        (**self).circle(x, y, radius);
    }

    fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        (**self).line(x0, y0, x1, y1);
    }

    fn rectangle(&mut self, x: i32, y: i32, width: u32, height: u32) {
        (**self).rectangle(x, y, width, height);
    }

    fn text(&mut self, text: &str, x: i32, y: i32, max_width: u32, scale: TextScale) {
        (**self).text(text, x, y, max_width, scale);
    }

    fn measure_text(&self, text: &str, scale: TextScale) -> u32 {
        (**self).measure_text(text, scale)
    }

    fn present(&mut self) {
        (**self).present();
    }

    fn set_backlight(&mut self, level: f32) {
        (**self).set_backlight(level);
    }
}

/// The physical display behind a [`FrameCanvas`].
pub trait Panel {
    /// Push a full frame, row-major, `size.width * size.height` pixels.
    fn flush(&mut self, pixels: &[Rgb565], size: Size);
    fn set_backlight(&mut self, level: f32);
}

impl<P: Panel + ?Sized> Panel for &mut P {
    fn flush(&mut self, pixels: &[Rgb565], size: Size) {
        (**self).flush(pixels, size);
    }

    fn set_backlight(&mut self, level: f32) {
        (**self).set_backlight(level);
    }
}

// ── Framebuffer ─────────────────────────────────────────────────────────────

/// Minimal DrawTarget backed by a flat pixel slice.
pub struct Framebuffer<'a> {
    pixels: &'a mut [Rgb565],
    size: Size,
}

impl<'a> Framebuffer<'a> {
    /// `pixels` must hold at least `size.width * size.height` entries; any
    /// excess is ignored.
    pub fn new(pixels: &'a mut [Rgb565], size: Size) -> Self {
        let len = (size.width * size.height) as usize;
        let len = len.min(pixels.len());
        Self {
            pixels: &mut pixels[..len],
            size,
        }
    }

    pub fn pixels(&self) -> &[Rgb565] {
        &*self.pixels
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgb565> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let (w, h) = (self.size.width as i32, self.size.height as i32);
        if x >= 0 && x < w && y >= 0 && y < h {
            let i = (y * w + x) as usize;
            (i < self.pixels.len()).then_some(i)
        } else {
            None
        }
    }
}

impl DrawTarget for Framebuffer<'_> {
    type Color = Rgb565;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(Point { x, y }, color) in pixels {
            if let Some(i) = self.index(x, y) {
                self.pixels[i] = color;
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.pixels.fill(color);
        Ok(())
    }
}

impl OriginDimensions for Framebuffer<'_> {
    fn size(&self) -> Size {
        self.size
    }
}

// ── Framebuffer canvas ──────────────────────────────────────────────────────

pub struct FrameCanvas<'a, P> {
    frame: Framebuffer<'a>,
    pen: Rgb565,
    panel: P,
}

impl<'a, P: Panel> FrameCanvas<'a, P> {
    pub fn new(pixels: &'a mut [Rgb565], size: Size, panel: P) -> Self {
        Self {
            frame: Framebuffer::new(pixels, size),
            pen: Rgb565::BLACK,
            panel,
        }
    }

    pub fn frame(&self) -> &Framebuffer<'a> {
        &self.frame
    }

    pub fn panel(&self) -> &P {
        &self.panel
    }

    fn fill(&self) -> PrimitiveStyle<Rgb565> {
        PrimitiveStyle::with_fill(self.pen)
    }
}

// Drawing into the framebuffer cannot fail.
impl<P: Panel> Canvas for FrameCanvas<'_, P> {
    fn set_color(&mut self, color: Rgb565) {
        self.pen = color;
    }

    fn clear(&mut self) {
        let _ = DrawTarget::clear(&mut self.frame, self.pen);
    }

    fn circle(&mut self, x: i32, y: i32, radius: u32) {
        let _ = Circle::with_center(Point::new(x, y), radius * 2 + 1)
            .into_styled(self.fill())
            .draw(&mut self.frame);
    }

    fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        let _ = Line::new(Point::new(x0, y0), Point::new(x1, y1))
            .into_styled(PrimitiveStyle::with_stroke(self.pen, 1))
            .draw(&mut self.frame);
    }

    fn rectangle(&mut self, x: i32, y: i32, width: u32, height: u32) {
        let _ = Rectangle::new(Point::new(x, y), Size::new(width, height))
            .into_styled(self.fill())
            .draw(&mut self.frame);
    }

    fn text(&mut self, text: &str, x: i32, y: i32, max_width: u32, scale: TextScale) {
        let style = MonoTextStyle::new(scale.font(), self.pen);
        let lines = WrapLines {
            rest: text,
            columns: scale.columns(max_width),
        };
        let mut top = y;
        for line in lines {
            let _ = Text::with_baseline(line, Point::new(x, top), style, Baseline::Top)
                .draw(&mut self.frame);
            top += scale.line_height() as i32;
        }
    }

    fn measure_text(&self, text: &str, scale: TextScale) -> u32 {
        let font = scale.font();
        match text.chars().count() as u32 {
            0 => 0,
            n => n * font.character_size.width + (n - 1) * font.character_spacing,
        }
    }

    fn present(&mut self) {
        self.panel.flush(self.frame.pixels(), self.frame.size);
    }

    fn set_backlight(&mut self, level: f32) {
        self.panel.set_backlight(level.clamp(0.0, 1.0));
    }
}
