//! Alarm table and the per-frame trigger check.

use core::fmt;

use crate::{
    state::SharedState,
    time::{
        ClockTime,
        SECONDS_PER_DAY,
    },
};

/// One scheduled alarm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlarmDefinition {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub message: &'static str,
}

impl AlarmDefinition {
    /// Panics (at compile time, in a const table) on an impossible time.
    pub const fn new(hour: u8, minute: u8, second: u8, message: &'static str) -> Self {
        assert!(hour < 24, "alarm hour out of range");
        assert!(minute < 60, "alarm minute out of range");
        assert!(second < 60, "alarm second out of range");
        Self {
            hour,
            minute,
            second,
            message,
        }
    }

    pub const fn second_of_day(&self) -> u32 {
        self.hour as u32 * 3600 + self.minute as u32 * 60 + self.second as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlarmError {
    /// Two entries share a time; only `first` can ever fire.
    DuplicateTime { first: usize, second: usize },
}

impl fmt::Display for AlarmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateTime { first, second } => {
                write!(f, "alarms {first} and {second} share the same time")
            }
        }
    }
}

/// Check a table for entries that would shadow each other.
pub fn validate_table(table: &[AlarmDefinition]) -> Result<(), AlarmError> {
    for (first, a) in table.iter().enumerate() {
        if let Some(offset) = table[first + 1..]
            .iter()
            .position(|b| b.second_of_day() == a.second_of_day())
        {
            return Err(AlarmError::DuplicateTime {
                first,
                second: first + 1 + offset,
            });
        }
    }
    Ok(())
}

/// Matches the clock against the alarm table once per frame.
pub struct AlarmEvaluator {
    table: &'static [AlarmDefinition],
    catch_up: u32,
    last_checked: Option<u32>,
    last_fired: Option<u32>,
}

impl AlarmEvaluator {
    /// `catch_up` is how many skipped seconds are still examined when frames
    /// fall behind; zero means exact-second matching only.
    pub const fn new(table: &'static [AlarmDefinition], catch_up: u32) -> Self {
        Self {
            table,
            catch_up,
            last_checked: None,
            last_fired: None,
        }
    }

    /// Raise an alarm if one is due at `now` and none is active.
    ///
    /// Fires at most once for any given second of the day, even when several
    /// frames land in that second or the alarm is cancelled before the second
    /// ends.
    pub fn evaluate(
        &mut self,
        now: &ClockTime,
        state: &SharedState,
    ) -> Option<&'static AlarmDefinition> {
        let current = now.second_of_day();
        // Once the fired second is out of reach of the catch-up window it
        // can only come round again tomorrow, when it must fire again.
        if let Some(fired) = self.last_fired
            && (current + SECONDS_PER_DAY - fired) % SECONDS_PER_DAY > self.catch_up
        {
            self.last_fired = None;
        }
        let span = match self.last_checked {
            Some(previous) if previous != current => {
                let gap = (current + SECONDS_PER_DAY - previous) % SECONDS_PER_DAY;
                gap.min(self.catch_up + 1)
            }
            _ => 1,
        };
        self.last_checked = Some(current);

        // Oldest candidate first.
        for back in (0..span).rev() {
            let second = (current + SECONDS_PER_DAY - back) % SECONDS_PER_DAY;
            if self.last_fired == Some(second) {
                continue;
            }
            let Some(alarm) = self.table.iter().find(|a| a.second_of_day() == second) else {
                continue;
            };
            if !state.try_activate() {
                warn!("Alarm \"{}\" missed, another is active", alarm.message);
                continue;
            }
            if back > 0 {
                debug!("Alarm caught up {} s late", back);
            }
            self.last_fired = Some(second);
            info!(
                "Alarm {}:{}:{} \"{}\"",
                alarm.hour,
                alarm.minute,
                alarm.second,
                alarm.message
            );
            return Some(alarm);
        }
        None
    }
}
