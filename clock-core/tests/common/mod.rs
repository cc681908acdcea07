//! Recording doubles for the clock's hardware seams.
#![allow(dead_code)]

use std::{
    cell::{
        Cell,
        RefCell,
    },
    rc::Rc,
};

use desk_clock_core::{
    Canvas,
    FramePacer,
    SharedState,
    TextScale,
    TimeSource,
    ToneOutput,
};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_hal_async::delay::DelayNs;

/// Everything the doubles saw, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Present,
    Text(String),
    Backlight(f32),
    Play(u32),
    Silence,
    Wait(u32),
    Tick,
    PacerReset,
}

pub type Log = Rc<RefCell<Vec<Event>>>;

pub fn new_log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

pub struct RecordingCanvas {
    pub log: Log,
}

impl Canvas for RecordingCanvas {
    fn set_color(&mut self, _color: Rgb565) {}
    fn clear(&mut self) {}
    fn circle(&mut self, _x: i32, _y: i32, _radius: u32) {}
    fn line(&mut self, _x0: i32, _y0: i32, _x1: i32, _y1: i32) {}
    fn rectangle(&mut self, _x: i32, _y: i32, _width: u32, _height: u32) {}

    fn text(&mut self, text: &str, _x: i32, _y: i32, _max_width: u32, _scale: TextScale) {
        self.log.borrow_mut().push(Event::Text(text.into()));
    }

    fn measure_text(&self, text: &str, _scale: TextScale) -> u32 {
        text.len() as u32 * 10
    }

    fn present(&mut self) {
        self.log.borrow_mut().push(Event::Present);
    }

    fn set_backlight(&mut self, level: f32) {
        self.log.borrow_mut().push(Event::Backlight(level));
    }
}

pub struct RecordingTone {
    pub log: Log,
}

impl ToneOutput for RecordingTone {
    fn play(&mut self, frequency_hz: u32, _duty: u16) {
        self.log.borrow_mut().push(Event::Play(frequency_hz));
    }

    fn silence(&mut self) {
        self.log.borrow_mut().push(Event::Silence);
    }
}

/// Pacer whose slots are always due.
pub struct RecordingPacer {
    pub log: Log,
}

impl FramePacer for RecordingPacer {
    async fn next(&mut self) {
        self.log.borrow_mut().push(Event::Tick);
    }

    fn reset(&mut self) {
        self.log.borrow_mut().push(Event::PacerReset);
    }
}

/// Delay that returns immediately, advances a fake clock, and can fire a
/// scripted action once a number of milliseconds have elapsed.
pub struct ScriptedDelay<'a> {
    pub log: Log,
    pub elapsed_ms: Rc<Cell<u64>>,
    trigger: Option<(u64, Box<dyn FnMut() + 'a>)>,
}

impl<'a> ScriptedDelay<'a> {
    pub fn new(log: Log) -> Self {
        Self {
            log,
            elapsed_ms: Rc::new(Cell::new(0)),
            trigger: None,
        }
    }

    /// Run `action` on the first wait that ends at or after `at_ms`.
    pub fn at(mut self, at_ms: u64, action: impl FnMut() + 'a) -> Self {
        self.trigger = Some((at_ms, Box::new(action)));
        self
    }

    /// Clear the alarm once `at_ms` have elapsed.
    pub fn cancel_at(self, at_ms: u64, state: &'a SharedState) -> Self {
        self.at(at_ms, move || {
            state.cancel();
        })
    }

    /// Clear the alarm on the first wait after the `n`th tone starts.
    pub fn cancel_after_notes(mut self, n: usize, state: &'a SharedState) -> Self {
        let log = self.log.clone();
        self.trigger = Some((
            0,
            Box::new(move || {
                if plays(&log) >= n {
                    state.cancel();
                }
            }),
        ));
        self
    }
}

impl DelayNs for ScriptedDelay<'_> {
    async fn delay_ns(&mut self, ns: u32) {
        self.delay_us(ns / 1_000).await;
    }

    async fn delay_us(&mut self, us: u32) {
        self.delay_ms(us / 1_000).await;
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.log.borrow_mut().push(Event::Wait(ms));
        let now = self.elapsed_ms.get() + u64::from(ms);
        self.elapsed_ms.set(now);
        if let Some((at, action)) = self.trigger.as_mut()
            && now >= *at
        {
            action();
        }
    }
}

/// Time source stuck at a fixed instant unless moved.
pub struct FixedClock(pub Cell<u64>);

impl FixedClock {
    pub fn at(hour: u64, minute: u64, second: u64) -> Self {
        // 2024-01-01 00:00:00 UTC
        Self(Cell::new(1_704_067_200 + hour * 3600 + minute * 60 + second))
    }

    pub fn advance(&self, seconds: u64) {
        self.0.set(self.0.get() + seconds);
    }
}

impl TimeSource for FixedClock {
    fn epoch_seconds(&self) -> u64 {
        self.0.get()
    }
}

pub fn plays(log: &Log) -> usize {
    log.borrow()
        .iter()
        .filter(|e| matches!(e, Event::Play(_)))
        .count()
}

pub fn presents(log: &Log) -> usize {
    log.borrow()
        .iter()
        .filter(|e| matches!(e, Event::Present))
        .count()
}
