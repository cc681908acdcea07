//! Buzzer tunes: notes, note lengths and the tunes the clock plays.

use embassy_time::Duration;
use embedded_hal_async::delay::DelayNs;

use self::{
    Note::*,
    length::{
        CROTCHET,
        MINIM,
        QUAVER,
        SEMIQUAVER,
    },
};

/// Something that can hold a square-wave tone.
pub trait ToneOutput {
    /// Start (or retune) a tone. `duty` is in 1/65535ths of the period.
    fn play(&mut self, frequency_hz: u32, duty: u16);
    fn silence(&mut self);
}

impl<T: ToneOutput + ?Sized> ToneOutput for &mut T {
    fn play(&mut self, frequency_hz: u32, duty: u16) {
        (**self).play(frequency_hz, duty);
    }

    fn silence(&mut self) {
        (**self).silence();
    }
}

/// Equal-tempered pitches the tunes use, in Hz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Note {
    C4,
    D4,
    E4,
    F4,
    G4,
    C5,
    D5,
    A5,
    B5,
}

impl Note {
    pub const fn frequency(self) -> u32 {
        match self {
            Self::C4 => 262,
            Self::D4 => 294,
            Self::E4 => 330,
            Self::F4 => 349,
            Self::G4 => 392,
            Self::C5 => 523,
            Self::D5 => 587,
            Self::A5 => 880,
            Self::B5 => 988,
        }
    }
}

/// Note lengths in quarter beats.
pub mod length {
    pub const SEMIBREVE: u32 = 16;
    pub const MINIM: u32 = 8;
    pub const CROTCHET: u32 = 4;
    pub const QUAVER: u32 = 2;
    pub const SEMIQUAVER: u32 = 1;
}

/// A note or a rest, `quarters` quarter-beats long.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Step {
    pub note: Option<Note>,
    pub quarters: u32,
}

impl Step {
    pub const fn note(note: Note, quarters: u32) -> Self {
        Self {
            note: Some(note),
            quarters,
        }
    }

    pub const fn rest(quarters: u32) -> Self {
        Self {
            note: None,
            quarters,
        }
    }

    pub const fn duration(&self, bpm: u32) -> Duration {
        let bpm = if bpm == 0 { 1 } else { bpm };
        Duration::from_millis(60_000 * self.quarters as u64 / (4 * bpm as u64))
    }
}

/// Happy Birthday, the alarm tune.
pub const ALARM_TUNE: &[Step] = &[
    Step::note(C4, QUAVER),
    Step::note(C4, QUAVER),
    Step::note(D4, CROTCHET),
    Step::note(C4, CROTCHET),
    Step::note(F4, CROTCHET),
    Step::note(E4, MINIM),
    Step::note(C4, QUAVER),
    Step::note(C4, QUAVER),
    Step::note(D4, CROTCHET),
    Step::note(C4, CROTCHET),
    Step::note(G4, CROTCHET),
    Step::note(F4, MINIM),
    Step::note(C4, QUAVER),
    Step::note(C4, QUAVER),
    Step::note(C5, CROTCHET),
    Step::note(A5, CROTCHET),
    Step::note(F4, CROTCHET),
    Step::note(E4, CROTCHET),
    Step::note(D4, CROTCHET),
    Step::note(B5, QUAVER),
    Step::note(B5, QUAVER),
    Step::note(A5, CROTCHET),
    Step::note(F4, CROTCHET),
    Step::note(G4, CROTCHET),
    Step::note(F4, MINIM),
];

pub const BEEP: &[Step] = &[Step::note(B5, SEMIQUAVER), Step::note(D5, SEMIQUAVER)];
pub const CONFIRM: &[Step] = &[Step::note(C5, SEMIQUAVER)];
pub const REJECT: &[Step] = &[Step::note(E4, SEMIQUAVER), Step::note(C4, SEMIQUAVER)];

/// Plays a tune through a [`ToneOutput`], checking a keep-going condition
/// between waits so playback can be cut short.
pub struct Player {
    pub bpm: u32,
    pub duty: u16,
    /// Silence after every step.
    pub gap: Duration,
    /// Longest single wait before the condition is checked again.
    pub poll: Duration,
}

impl Player {
    /// Returns `false` if `keep_going` stopped playback early; the output is
    /// silent either way when this returns.
    pub async fn play<T, D, F>(
        &self,
        steps: &[Step],
        tone: &mut T,
        delay: &mut D,
        mut keep_going: F,
    ) -> bool
    where
        T: ToneOutput,
        D: DelayNs,
        F: FnMut() -> bool,
    {
        for step in steps {
            if !keep_going() {
                tone.silence();
                return false;
            }
            match step.note {
                Some(note) => tone.play(note.frequency(), self.duty),
                None => tone.silence(),
            }
            let finished = wait(delay, step.duration(self.bpm), self.poll, &mut keep_going).await;
            tone.silence();
            if !finished {
                return false;
            }
            if !wait(delay, self.gap, self.poll, &mut keep_going).await {
                return false;
            }
        }
        true
    }
}

/// Wait `total`, in slices no longer than `poll`, giving up as soon as
/// `keep_going` returns `false`.
pub async fn wait<D, F>(delay: &mut D, total: Duration, poll: Duration, keep_going: &mut F) -> bool
where
    D: DelayNs,
    F: FnMut() -> bool,
{
    let poll_ms = poll.as_millis().max(1);
    let mut remaining = total.as_millis();
    while remaining > 0 {
        let slice = remaining.min(poll_ms);
        delay.delay_ms(slice as u32).await;
        remaining -= slice;
        if !keep_going() {
            return false;
        }
    }
    true
}

/// Rising alert sweep, 500 Hz to 900 Hz in 3 Hz steps of 10 ms.
pub async fn alert<T: ToneOutput, D: DelayNs>(tone: &mut T, delay: &mut D, duty: u16) {
    for frequency in (500..900).step_by(3) {
        tone.play(frequency, duty);
        delay.delay_ms(10).await;
    }
    tone.silence();
}
