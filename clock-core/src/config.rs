//! Compile-time configuration: display geometry, pacing, starfield, rings,
//! alarm table and announcement timing.

use embassy_time::Duration;
use embedded_graphics::prelude::{
    Point,
    Size,
};

use crate::{
    alarm::AlarmDefinition,
    geometry::RingStyle,
    starfield::SpeedProfile,
};

// ── Display ─────────────────────────────────────────────────────────────────

pub const WIDTH: u32 = 240;
pub const HEIGHT: u32 = 240;
pub const VIEWPORT: Size = Size::new(WIDTH, HEIGHT);
pub const CENTER: Point = Point::new((WIDTH / 2) as i32, (HEIGHT / 2) as i32);

pub const DAY_BACKLIGHT: f32 = 1.0;
pub const NIGHT_BACKLIGHT: f32 = 0.3;

// ── Frame pacing ────────────────────────────────────────────────────────────

pub const FRAME_RATE: u64 = 25;
pub const FRAME_INTERVAL: Duration = Duration::from_millis(1000 / FRAME_RATE);

// ── Starfield ───────────────────────────────────────────────────────────────

pub const STARS_TOTAL: usize = 200;
pub const STARS_SPEED_MAX: i16 = 25;
pub const STAR_RADIUS: u8 = 1;
pub const STAR_SPEED: SpeedProfile = SpeedProfile::Constant(10.0);

// ── Clock face ──────────────────────────────────────────────────────────────

pub const HOUR_RING: RingStyle = RingStyle {
    distance: 70,
    intervals: 12,
    small: 6,
    large: 8,
    inner: 2,
};
pub const MINUTE_RING: RingStyle = RingStyle {
    distance: 85,
    intervals: 60,
    small: 3,
    large: 6,
    inner: 1,
};
pub const SECOND_RING: RingStyle = RingStyle {
    distance: 100,
    intervals: 60,
    small: 3,
    large: 6,
    inner: 1,
};

pub const HOUR_HAND: u32 = 60;
pub const MINUTE_HAND: u32 = 75;
pub const SECOND_HAND: u32 = 90;

/// Radius of the disk covering the hub where the hands meet.
pub const HUB_RADIUS: u32 = 10;

/// Top edge of the digital readout.
pub const READOUT_Y: i32 = 85;
/// Vertical position of notification text.
pub const NOTIFICATION_Y: i32 = 110;
pub const NOTIFICATION_WIDTH: u32 = 200;

// ── Alarms ──────────────────────────────────────────────────────────────────

pub const ALARMS: &[AlarmDefinition] = &[
    AlarmDefinition::new(8, 30, 0, "Time to get up!"),
    AlarmDefinition::new(12, 0, 0, "Lunch time!"),
    AlarmDefinition::new(17, 0, 0, "Time to go home!"),
    AlarmDefinition::new(22, 30, 0, "Time to go to bed!"),
];

/// How many skipped seconds a late frame still checks for alarms.
pub const ALARM_CATCH_UP_SECONDS: u32 = 2;

// ── Announcement ────────────────────────────────────────────────────────────

pub const FLASH_COUNT: u8 = 5;
pub const FLASH_INTERVAL: Duration = Duration::from_millis(500);
/// Longest uninterrupted wait inside an announcement.
pub const CANCEL_POLL: Duration = Duration::from_millis(100);
pub const MAX_ANNOUNCE_CYCLES: u8 = 10;

pub const BPM: u32 = 120;
pub const NOTE_GAP: Duration = Duration::from_millis(10);
/// Buzzer duty in 1/65535ths of the period.
pub const TONE_DUTY: u16 = 1000;

// ── Input ───────────────────────────────────────────────────────────────────

pub const DEBOUNCE_WINDOW: Duration = Duration::from_secs(1);

// ── Wall clock ──────────────────────────────────────────────────────────────

/// 2023-02-09 13:59:00 UTC, used until a time source sets the clock.
pub const FALLBACK_EPOCH: u64 = 1_675_951_140;

pub const NOTIFICATION_HOLD: Duration = Duration::from_secs(2);
