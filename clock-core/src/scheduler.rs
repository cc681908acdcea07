//! The frame loop: read the clock, check alarms, move the stars, draw.

use embassy_time::{
    Duration,
    Ticker,
};
use embedded_hal_async::delay::DelayNs;

use crate::{
    alarm::AlarmEvaluator,
    announcer::{
        Announcer,
        Outcome,
    },
    canvas::Canvas,
    config::{
        DAY_BACKLIGHT,
        NIGHT_BACKLIGHT,
    },
    face::draw_frame,
    melody::ToneOutput,
    starfield::{
        SpeedProfile,
        Starfield,
    },
    state::SharedState,
    time::{
        ClockTime,
        TimeSource,
    },
};

/// Paces the frame loop.
#[allow(async_fn_in_trait)]
pub trait FramePacer {
    /// Wait for the next frame slot.
    async fn next(&mut self);
    /// Forget missed slots and start counting from now.
    fn reset(&mut self);
}

impl FramePacer for Ticker {
    async fn next(&mut self) {
        Ticker::next(self).await;
    }

    fn reset(&mut self) {
        Ticker::reset(self);
    }
}

/// What happened during one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameReport {
    /// The time the face was drawn for.
    pub time: ClockTime,
    pub announcement: Option<Outcome>,
}

pub struct FrameScheduler<'s, const N: usize> {
    state: &'s SharedState,
    starfield: Starfield<N>,
    speed: SpeedProfile,
    evaluator: AlarmEvaluator,
    announcer: Announcer<'s>,
    night_mode: Option<bool>,
}

impl<'s, const N: usize> FrameScheduler<'s, N> {
    pub fn new(
        state: &'s SharedState,
        starfield: Starfield<N>,
        speed: SpeedProfile,
        evaluator: AlarmEvaluator,
        announcer: Announcer<'s>,
    ) -> Self {
        Self {
            state,
            starfield,
            speed,
            evaluator,
            announcer,
            night_mode: None,
        }
    }

    pub fn starfield(&self) -> &Starfield<N> {
        &self.starfield
    }

    /// Run one frame. An alarm that comes due is announced to completion
    /// before the face is drawn.
    pub async fn frame<S, C, T, D>(
        &mut self,
        clock: &S,
        canvas: &mut C,
        tone: &mut T,
        delay: &mut D,
    ) -> FrameReport
    where
        S: TimeSource,
        C: Canvas,
        T: ToneOutput,
        D: DelayNs,
    {
        let mut time = clock.now();

        let mut announcement = None;
        if let Some(alarm) = self.evaluator.evaluate(&time, self.state) {
            // Make sure the alarm is readable even at night.
            canvas.set_backlight(DAY_BACKLIGHT);
            self.night_mode = None;
            announcement = Some(
                self.announcer
                    .announce(alarm.message, canvas, tone, delay)
                    .await,
            );
            time = clock.now();
        }

        self.apply_backlight(canvas);

        self.starfield.advance(self.speed.divisor(time.seconds));
        draw_frame(canvas, &time, self.starfield.stars());

        FrameReport { time, announcement }
    }

    /// Run one frame, then wait for the pacer's next slot.
    pub async fn paced_frame<S, C, T, D, P>(
        &mut self,
        clock: &S,
        canvas: &mut C,
        tone: &mut T,
        delay: &mut D,
        pacer: &mut P,
    ) -> FrameReport
    where
        S: TimeSource,
        C: Canvas,
        T: ToneOutput,
        D: DelayNs,
        P: FramePacer,
    {
        let report = self.frame(clock, canvas, tone, delay).await;
        if report.announcement.is_some() {
            // The announcement overran many slots; don't rush to catch up.
            pacer.reset();
        }
        pacer.next().await;
        report
    }

    /// Draw frames forever at `interval`.
    pub async fn run<S, C, T, D>(
        &mut self,
        clock: &S,
        canvas: &mut C,
        tone: &mut T,
        delay: &mut D,
        interval: Duration,
    ) -> !
    where
        S: TimeSource,
        C: Canvas,
        T: ToneOutput,
        D: DelayNs,
    {
        info!("Frame loop running every {} ms", interval.as_millis());
        let mut ticker = Ticker::every(interval);
        loop {
            self.paced_frame(clock, canvas, tone, delay, &mut ticker).await;
        }
    }

    fn apply_backlight<C: Canvas>(&mut self, canvas: &mut C) {
        let night = self.state.night_mode();
        if self.night_mode != Some(night) {
            let level = if night { NIGHT_BACKLIGHT } else { DAY_BACKLIGHT };
            debug!("Backlight {}", level);
            canvas.set_backlight(level);
            self.night_mode = Some(night);
        }
    }
}
