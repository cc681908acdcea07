//! # desk-clock-core
//!
//! Hardware-independent heart of the desk clock:
//! - **Starfield**: stars streaming out of the face centre
//! - **Geometry**: marker rings and hand positions
//! - **Alarms**: the alarm table and the per-frame trigger check
//! - **Announcer**: flashing message plus buzzer tune until cancelled
//! - **Input**: button debouncing and night mode
//! - **Scheduler**: the fixed-rate frame loop tying it together
//!
//! The board crate supplies a [`canvas::Panel`], a [`melody::ToneOutput`], a
//! [`time::TimeSource`] and an async delay; everything here runs on the host
//! too.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod alarm;
pub mod announcer;
pub mod canvas;
pub mod config;
pub mod face;
pub mod geometry;
pub mod input;
pub mod melody;
pub mod scheduler;
pub mod starfield;
pub mod state;
pub mod theme;
pub mod time;

pub use alarm::{
    AlarmDefinition,
    AlarmError,
    AlarmEvaluator,
};
pub use announcer::{
    Announcer,
    AnnouncerConfig,
    Outcome,
};
pub use canvas::{
    Canvas,
    FrameCanvas,
    Panel,
    TextScale,
};
pub use input::{
    Button,
    Debouncer,
    InputEvent,
};
pub use melody::ToneOutput;
pub use scheduler::{
    FramePacer,
    FrameReport,
    FrameScheduler,
};
pub use starfield::{
    SpeedProfile,
    Star,
    Starfield,
};
pub use state::{
    AnnouncerPhase,
    SharedState,
};
pub use time::{
    ClockTime,
    TimeSource,
};

/// The clock exactly as the firmware runs it.
pub type Clock<'s> = FrameScheduler<'s, { config::STARS_TOTAL }>;

impl<'s> Clock<'s> {
    /// Build the frame loop from the compile-time configuration.
    pub fn with_defaults(state: &'s SharedState, seed: u64) -> Self {
        if let Err(e) = alarm::validate_table(config::ALARMS) {
            warn!("Alarm table: {:?}", e);
        }
        FrameScheduler::new(
            state,
            Starfield::new(
                seed,
                config::VIEWPORT,
                config::STARS_SPEED_MAX,
                config::STAR_RADIUS,
            ),
            config::STAR_SPEED,
            AlarmEvaluator::new(config::ALARMS, config::ALARM_CATCH_UP_SECONDS),
            Announcer::new(state, AnnouncerConfig::default()),
        )
    }
}
