//! State shared between the frame loop, the announcer and the button task.
//!
//! Every field is an atomic so the button task can write it while the frame
//! loop is suspended mid-announcement.

use portable_atomic::{
    AtomicBool,
    AtomicU8,
    Ordering,
};

/// Where the alarm announcer is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum AnnouncerPhase {
    Idle = 0,
    Flashing = 1,
    Sounding = 2,
}

impl AnnouncerPhase {
    const fn from_u8(raw: u8) -> Self {
        match raw {
            1 => Self::Flashing,
            2 => Self::Sounding,
            _ => Self::Idle,
        }
    }
}

pub struct SharedState {
    active: AtomicBool,
    night_mode: AtomicBool,
    phase: AtomicU8,
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedState {
    pub const fn new() -> Self {
        Self {
            active: AtomicBool::new(false),
            night_mode: AtomicBool::new(false),
            phase: AtomicU8::new(AnnouncerPhase::Idle as u8),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Raise the alarm. Returns `false` if one was already active.
    pub fn try_activate(&self) -> bool {
        self.active
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Clear the alarm, returning whether it was active.
    pub fn cancel(&self) -> bool {
        self.active.swap(false, Ordering::AcqRel)
    }

    pub fn night_mode(&self) -> bool {
        self.night_mode.load(Ordering::Acquire)
    }

    /// Flip night mode and return the new value.
    pub fn toggle_night_mode(&self) -> bool {
        !self.night_mode.fetch_xor(true, Ordering::AcqRel)
    }

    pub fn phase(&self) -> AnnouncerPhase {
        AnnouncerPhase::from_u8(self.phase.load(Ordering::Acquire))
    }

    pub fn set_phase(&self, phase: AnnouncerPhase) {
        self.phase.store(phase as u8, Ordering::Release);
    }
}
