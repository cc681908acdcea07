//! Wall-clock time as seen by the frame loop.

use core::fmt::Write as _;

pub const SECONDS_PER_DAY: u32 = 24 * 60 * 60;

/// Supplies the current wall-clock time. Setting the clock (NTP, RTC restore)
/// happens elsewhere; the frame loop only reads it.
pub trait TimeSource {
    /// Seconds since the Unix epoch, UTC.
    fn epoch_seconds(&self) -> u64;

    fn now(&self) -> ClockTime {
        ClockTime::from_epoch(self.epoch_seconds())
    }
}

/// Time of day broken into the fields the clock face draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockTime {
    pub hours24: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl ClockTime {
    pub const fn new(hours24: u8, minutes: u8, seconds: u8) -> Self {
        Self {
            hours24: hours24 % 24,
            minutes: minutes % 60,
            seconds: seconds % 60,
        }
    }

    pub const fn from_epoch(epoch: u64) -> Self {
        Self::from_second_of_day((epoch % SECONDS_PER_DAY as u64) as u32)
    }

    pub const fn from_second_of_day(second: u32) -> Self {
        let second = second % SECONDS_PER_DAY;
        Self {
            hours24: (second / 3600) as u8,
            minutes: (second % 3600 / 60) as u8,
            seconds: (second % 60) as u8,
        }
    }

    pub const fn second_of_day(&self) -> u32 {
        self.hours24 as u32 * 3600 + self.minutes as u32 * 60 + self.seconds as u32
    }

    /// Hour on a 12-hour dial.
    ///
    /// Afternoon hours subtract twelve, noon stays 12 and midnight reads 12
    /// rather than 0.
    pub const fn hours12(&self) -> u8 {
        match self.hours24 {
            0 => 12,
            h @ 1..=12 => h,
            h => h - 12,
        }
    }

    /// Digital readout, `H:MM:SS` on the 12-hour dial.
    pub fn readout(&self) -> heapless::String<8> {
        let mut text = heapless::String::new();
        // 8 bytes always fit "12:59:59"
        let _ = write!(
            text,
            "{}:{:02}:{:02}",
            self.hours12(),
            self.minutes,
            self.seconds
        );
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_epoch_into_time_of_day() {
        // 2023-02-09 13:59:00 UTC
        let time = ClockTime::from_epoch(1_675_951_140);
        assert_eq!(time, ClockTime::new(13, 59, 0));
        assert_eq!(time.second_of_day(), 13 * 3600 + 59 * 60);
    }

    #[test]
    fn wraps_at_midnight() {
        let time = ClockTime::from_epoch(SECONDS_PER_DAY as u64 * 3 + 5);
        assert_eq!(time, ClockTime::new(0, 0, 5));
    }

    #[test]
    fn twelve_hour_dial() {
        assert_eq!(ClockTime::new(13, 0, 0).hours12(), 1);
        assert_eq!(ClockTime::new(23, 0, 0).hours12(), 11);
        assert_eq!(ClockTime::new(12, 0, 0).hours12(), 12);
        assert_eq!(ClockTime::new(0, 0, 0).hours12(), 12);
        assert_eq!(ClockTime::new(1, 0, 0).hours12(), 1);
    }

    #[test]
    fn readout_pads_minutes_and_seconds() {
        assert_eq!(ClockTime::new(8, 5, 9).readout().as_str(), "8:05:09");
        assert_eq!(ClockTime::new(0, 59, 59).readout().as_str(), "12:59:59");
        assert_eq!(ClockTime::new(22, 30, 0).readout().as_str(), "10:30:00");
    }
}
