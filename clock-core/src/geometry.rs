//! Clock-face geometry: positions on the marker rings and hand tips.

use core::f32::consts::{
    FRAC_PI_2,
    TAU,
};

use embedded_graphics::prelude::Point;
use micromath::F32Ext as _;

use crate::config::CENTER;

/// Layout of one ring of markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RingStyle {
    /// Radius of the ring from the face centre.
    pub distance: u32,
    /// Number of markers around the ring.
    pub intervals: u8,
    pub small: u32,
    pub large: u32,
    /// Radius of the hole punched into each marker.
    pub inner: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MarkerSize {
    Small,
    Large,
}

/// Whether a marker lies behind or ahead of the current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MarkerTone {
    Passed,
    Upcoming,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Marker {
    pub index: u8,
    pub position: Point,
    pub size: MarkerSize,
    pub tone: MarkerTone,
}

/// Point on a circle of radius `distance` around the face centre, with
/// `value == 0` straight up and values increasing clockwise.
///
/// Values above `max_value` are clamped to it (which is straight up again).
pub fn ring_position(value: u8, max_value: u8, distance: u32) -> Point {
    let fraction = if max_value == 0 {
        0.0
    } else {
        f32::from(value.min(max_value)) / f32::from(max_value)
    };
    let angle = TAU * fraction - FRAC_PI_2;
    let distance = distance as f32;
    Point::new(
        CENTER.x + (angle.cos() * distance).round() as i32,
        CENTER.y + (angle.sin() * distance).round() as i32,
    )
}

/// End point of a hand pointing at `value` out of `max_value`.
pub fn hand_tip(value: u8, max_value: u8, length: u32) -> Point {
    ring_position(value, max_value, length)
}

/// Every marker of a ring showing `value`.
pub fn ring_markers(value: u8, style: RingStyle) -> impl Iterator<Item = Marker> {
    (0..style.intervals).map(move |index| Marker {
        index,
        position: ring_position(index, style.intervals, style.distance),
        size: if index == value {
            MarkerSize::Large
        } else {
            MarkerSize::Small
        },
        tone: if index >= value {
            MarkerTone::Upcoming
        } else {
            MarkerTone::Passed
        },
    })
}

impl RingStyle {
    pub const fn radius(&self, size: MarkerSize) -> u32 {
        match size {
            MarkerSize::Small => self.small,
            MarkerSize::Large => self.large,
        }
    }
}
