//! Display backlight, dimmed with LEDC PWM.

use defmt::{
    debug,
    error,
};
use esp_hal::{
    gpio::DriveMode,
    ledc::{
        Ledc,
        LowSpeed,
        channel::{
            self,
            ChannelIFace,
        },
        timer::{
            self,
            TimerIFace,
        },
    },
    time::Rate,
};

use crate::{
    BacklightResources,
    mk_static,
};

/// Controls the display backlight brightness.
pub struct Backlight {
    channel: channel::Channel<'static, LowSpeed>,
}

impl Backlight {
    /// Starts at full brightness.
    pub fn new(res: BacklightResources<'static>, ledc: &'static Ledc<'static>) -> Self {
        let timer = mk_static!(
            timer::Timer<'static, LowSpeed>,
            ledc.timer::<LowSpeed>(timer::Number::Timer0)
        );
        timer
            .configure(timer::config::Config {
                duty: timer::config::Duty::Duty8Bit,
                clock_source: timer::LSClockSource::APBClk,
                frequency: Rate::from_khz(24),
            })
            .unwrap();

        let mut channel = ledc.channel(channel::Number::Channel0, res.led);
        channel
            .configure(channel::config::Config {
                timer,
                duty_pct: 100,
                drive_mode: DriveMode::PushPull,
            })
            .unwrap();

        Self { channel }
    }

    /// Set brightness, `0.0` (off) to `1.0` (full).
    pub fn set_level(&mut self, level: f32) {
        let percent = (level.clamp(0.0, 1.0) * 100.0) as u8;
        debug!("Backlight {}%", percent);
        if self.channel.set_duty(percent).is_err() {
            error!("Backlight duty {}% rejected", percent);
        }
    }
}
