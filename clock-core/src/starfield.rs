//! Starfield background: a fixed set of stars streaming out of the centre.

use embedded_graphics::prelude::{
    Point,
    Size,
};

/// A single star. Positions are screen pixels; velocities are scaled down by
/// the divisor passed to [`Starfield::advance`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    pub dx: i16,
    pub dy: i16,
    pub radius: u8,
}

impl Star {
    pub fn position(&self) -> Point {
        Point::new(self.x as i32, self.y as i32)
    }
}

/// How fast the stars move for a given clock second.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpeedProfile {
    /// Same divisor every frame.
    Constant(f32),
    /// Divisor shrinks from `slowest` at second 0 to `fastest` at second 59,
    /// so the field speeds up over each minute and snaps back.
    Accelerating { slowest: f32, fastest: f32 },
}

impl SpeedProfile {
    pub fn divisor(&self, seconds: u8) -> f32 {
        match *self {
            Self::Constant(divisor) => divisor,
            Self::Accelerating { slowest, fastest } => {
                let progress = f32::from(seconds.min(59)) / 59.0;
                slowest - (slowest - fastest) * progress
            }
        }
    }
}

pub struct Starfield<const N: usize> {
    stars: [Star; N],
    rng: fastrand::Rng,
    width: f32,
    height: f32,
    max_speed: i16,
}

impl<const N: usize> Starfield<N> {
    pub fn new(seed: u64, viewport: Size, max_speed: i16, radius: u8) -> Self {
        let width = viewport.width as f32;
        let height = viewport.height as f32;
        let mut field = Self {
            stars: [Star {
                x: 0.0,
                y: 0.0,
                dx: 0,
                dy: 0,
                radius,
            }; N],
            rng: fastrand::Rng::with_seed(seed),
            width,
            height,
            max_speed: max_speed.abs(),
        };
        for i in 0..N {
            field.rebirth(i);
        }
        field
    }

    /// Move every star by its velocity over `divisor`, respawning any that
    /// left the viewport.
    pub fn advance(&mut self, divisor: f32) {
        let divisor = if divisor > 0.0 { divisor } else { 1.0 };
        for i in 0..N {
            let star = &mut self.stars[i];
            star.x += f32::from(star.dx) / divisor;
            star.y += f32::from(star.dy) / divisor;
            if star.x < 0.0 || star.x > self.width || star.y < 0.0 || star.y > self.height {
                self.rebirth(i);
            }
        }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn center(&self) -> (f32, f32) {
        (self.width / 2.0, self.height / 2.0)
    }

    fn rebirth(&mut self, index: usize) {
        let (x, y) = self.center();
        let range = -self.max_speed..=self.max_speed;
        let dx = self.rng.i16(range.clone());
        let dy = self.rng.i16(range);
        let star = &mut self.stars[index];
        star.x = x;
        star.y = y;
        star.dx = dx;
        star.dy = dy;
    }
}
