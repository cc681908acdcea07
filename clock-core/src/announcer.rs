//! Alarm announcement: flash the message, play the tune, repeat until the
//! alarm is cancelled.
//!
//! Cancellation is cooperative. The announcer polls [`SharedState::is_active`]
//! between every wait slice, so a button press silences it within one
//! [`CANCEL_POLL`](crate::config::CANCEL_POLL).

use embassy_time::Duration;
use embedded_hal_async::delay::DelayNs;

use crate::{
    canvas::Canvas,
    config,
    face::notification,
    melody::{
        self,
        Player,
        Step,
        ToneOutput,
    },
    state::{
        AnnouncerPhase,
        SharedState,
    },
    theme::{
        self,
        rgb565,
    },
};

/// Why an announcement ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// A button cleared the alarm.
    Cancelled,
    /// Every cycle played out with nobody around; the announcer cleared the
    /// alarm itself.
    Exhausted,
}

#[derive(Debug, Clone, Copy)]
pub struct AnnouncerConfig {
    /// Flash pairs per cycle.
    pub flash_count: u8,
    pub flash_interval: Duration,
    pub tune: &'static [Step],
    pub bpm: u32,
    pub note_gap: Duration,
    pub duty: u16,
    pub poll: Duration,
    /// Flash-and-tune cycles before giving up.
    pub max_cycles: u8,
}

impl Default for AnnouncerConfig {
    fn default() -> Self {
        Self {
            flash_count: config::FLASH_COUNT,
            flash_interval: config::FLASH_INTERVAL,
            tune: melody::ALARM_TUNE,
            bpm: config::BPM,
            note_gap: config::NOTE_GAP,
            duty: config::TONE_DUTY,
            poll: config::CANCEL_POLL,
            max_cycles: config::MAX_ANNOUNCE_CYCLES,
        }
    }
}

pub struct Announcer<'s> {
    state: &'s SharedState,
    config: AnnouncerConfig,
}

impl<'s> Announcer<'s> {
    pub const fn new(state: &'s SharedState, config: AnnouncerConfig) -> Self {
        Self { state, config }
    }

    /// Run the announcement for `message` until the alarm is cleared.
    ///
    /// Returns immediately with [`Outcome::Cancelled`] if no alarm is active.
    /// The phase in [`SharedState`] tracks progress and is `Idle` again, with
    /// the tone silenced, when this returns.
    pub async fn announce<C, T, D>(
        &mut self,
        message: &str,
        canvas: &mut C,
        tone: &mut T,
        delay: &mut D,
    ) -> Outcome
    where
        C: Canvas,
        T: ToneOutput,
        D: DelayNs,
    {
        let outcome = self.cycle(message, canvas, tone, delay).await;
        tone.silence();
        self.state.set_phase(AnnouncerPhase::Idle);
        info!("Announcement ended: {:?}", outcome);
        outcome
    }

    async fn cycle<C, T, D>(
        &mut self,
        message: &str,
        canvas: &mut C,
        tone: &mut T,
        delay: &mut D,
    ) -> Outcome
    where
        C: Canvas,
        T: ToneOutput,
        D: DelayNs,
    {
        let state = self.state;
        let mut active = || state.is_active();
        let player = Player {
            bpm: self.config.bpm,
            duty: self.config.duty,
            gap: self.config.note_gap,
            poll: self.config.poll,
        };

        for round in 0..self.config.max_cycles.max(1) {
            state.set_phase(AnnouncerPhase::Flashing);
            debug!("Announcement round {}: flashing", round);
            if !self.flash(message, canvas, delay, &mut active).await {
                return Outcome::Cancelled;
            }

            state.set_phase(AnnouncerPhase::Sounding);
            debug!("Announcement round {}: sounding", round);
            if !player.play(self.config.tune, tone, delay, &mut active).await {
                return Outcome::Cancelled;
            }
        }

        if state.cancel() {
            warn!("Alarm \"{}\" unattended, giving up", message);
            Outcome::Exhausted
        } else {
            Outcome::Cancelled
        }
    }

    async fn flash<C, D, F>(
        &self,
        message: &str,
        canvas: &mut C,
        delay: &mut D,
        active: &mut F,
    ) -> bool
    where
        C: Canvas,
        D: DelayNs,
        F: FnMut() -> bool,
    {
        let accent = rgb565(theme::ACCENT);
        let background = rgb565(theme::BACKGROUND);
        let interval = self.config.flash_interval;
        let poll = self.config.poll;

        for _ in 0..self.config.flash_count {
            for (text, fill) in [(accent, background), (background, accent)] {
                if !active() {
                    return false;
                }
                notification(canvas, message, text, fill);
                if !melody::wait(delay, interval, poll, active).await {
                    return false;
                }
            }
        }
        active()
    }
}
