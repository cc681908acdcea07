//! Button debouncing and the effect of each accepted press.

use embassy_time::Duration;

use crate::state::SharedState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Cancels a sounding alarm, otherwise toggles night mode.
    Primary,
    /// Silences the alarm.
    Snooze,
}

impl Button {
    const fn slot(self) -> usize {
        match self {
            Self::Primary => 0,
            Self::Snooze => 1,
        }
    }
}

/// What an accepted press did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    AlarmCancelled,
    NightMode(bool),
    Snoozed,
}

/// Turns raw button edges into at most one event per button per window.
pub struct Debouncer<'s> {
    state: &'s SharedState,
    window_ms: u64,
    last_accepted: [Option<u64>; 2],
}

impl<'s> Debouncer<'s> {
    pub const fn new(state: &'s SharedState, window: Duration) -> Self {
        Self {
            state,
            window_ms: window.as_millis(),
            last_accepted: [None; 2],
        }
    }

    /// Handle an edge seen at `timestamp_ms` (any monotonic millisecond clock).
    ///
    /// Edges within the window of the last accepted edge on the same button
    /// are dropped.
    pub fn on_edge(&mut self, button: Button, timestamp_ms: u64) -> Option<InputEvent> {
        let slot = &mut self.last_accepted[button.slot()];
        if let Some(last) = *slot
            && timestamp_ms.saturating_sub(last) <= self.window_ms
        {
            trace!("Bounce on {:?} ignored", button);
            return None;
        }
        *slot = Some(timestamp_ms);

        let event = match button {
            Button::Primary => {
                if self.state.cancel() {
                    InputEvent::AlarmCancelled
                } else {
                    InputEvent::NightMode(self.state.toggle_night_mode())
                }
            }
            Button::Snooze => {
                self.state.cancel();
                InputEvent::Snoozed
            }
        };
        debug!("{:?} -> {:?}", button, event);
        Some(event)
    }
}
