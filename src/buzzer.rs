//! Piezo buzzer on an LEDC channel.
//!
//! Tone requests travel through a [`Signal`] so the caller never blocks; the
//! newest request replaces whatever is playing. Each note retunes the
//! buzzer's timer and silence drops the duty to zero.

use defmt::{
    Format,
    info,
    warn,
};
use desk_clock_core::ToneOutput;
use embassy_sync::{
    blocking_mutex::raw::CriticalSectionRawMutex,
    signal::Signal,
};
use esp_hal::{
    gpio::DriveMode,
    ledc::{
        Ledc,
        LowSpeed,
        channel::{
            self,
            ChannelHW,
            ChannelIFace,
        },
        timer::{
            self,
            TimerHW,
            TimerIFace,
        },
    },
    time::Rate,
};

use crate::{
    BuzzerResources,
    mk_static,
};

const APB_HZ: u64 = 80_000_000;
const DUTY_BITS: u32 = 10;
/// Largest divisor the low-speed timer register holds (10.8 fixed point).
const DIVISOR_MAX: u64 = 0x3_FFFF;
const DIVISOR_MIN: u64 = 1 << 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum ToneCommand {
    /// `duty` is in 1/65535ths of the period.
    Play { frequency_hz: u32, duty: u16 },
    Silence,
}

static TONE: Signal<CriticalSectionRawMutex, ToneCommand> = Signal::new();

/// Drives the buzzer pin from LEDC timer 1 and channel 1.
pub struct Buzzer {
    timer: &'static timer::Timer<'static, LowSpeed>,
    channel: channel::Channel<'static, LowSpeed>,
}

impl Buzzer {
    /// Starts silent, with the timer parked at 1 kHz.
    pub fn new(res: BuzzerResources<'static>, ledc: &'static Ledc<'static>) -> Self {
        let timer = mk_static!(
            timer::Timer<'static, LowSpeed>,
            ledc.timer::<LowSpeed>(timer::Number::Timer1)
        );
        timer
            .configure(timer::config::Config {
                duty: timer::config::Duty::Duty10Bit,
                clock_source: timer::LSClockSource::APBClk,
                frequency: Rate::from_hz(1_000),
            })
            .unwrap();
        let timer: &'static timer::Timer<'static, LowSpeed> = timer;

        let mut channel = ledc.channel(channel::Number::Channel1, res.pin);
        channel
            .configure(channel::config::Config {
                timer,
                duty_pct: 0,
                drive_mode: DriveMode::PushPull,
            })
            .unwrap();

        Self { timer, channel }
    }

    /// Play requests forever. Run this from a dedicated task.
    pub async fn run(&mut self) -> ! {
        info!("Buzzer ready");
        loop {
            let command = TONE.wait().await;
            self.apply(command);
        }
    }

    fn apply(&mut self, command: ToneCommand) {
        match command {
            ToneCommand::Silence => self.channel.set_duty_hw(0),
            ToneCommand::Play { frequency_hz, duty } => {
                let Some(divisor) = divisor_for(frequency_hz) else {
                    warn!("Buzzer cannot reach {} Hz", frequency_hz);
                    self.channel.set_duty_hw(0);
                    return;
                };
                self.timer.configure_hw(divisor);
                self.timer.update_hw();
                self.channel.set_duty_hw(u32::from(duty) >> (16 - DUTY_BITS));
            }
        }
    }
}

/// Timer divisor for `frequency_hz` at 10-bit resolution, or `None` when the
/// timer cannot be tuned that far.
fn divisor_for(frequency_hz: u32) -> Option<u32> {
    let ticks = u64::from(frequency_hz) << DUTY_BITS;
    if ticks == 0 {
        return None;
    }
    let divisor = ((APB_HZ << 8) + ticks / 2) / ticks;
    if (DIVISOR_MIN..DIVISOR_MAX).contains(&divisor) {
        u32::try_from(divisor).ok()
    } else {
        None
    }
}

/// Cheap handle the clock core plays tunes through.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToneHandle;

impl ToneOutput for ToneHandle {
    fn play(&mut self, frequency_hz: u32, duty: u16) {
        TONE.signal(ToneCommand::Play { frequency_hz, duty });
    }

    fn silence(&mut self) {
        TONE.signal(ToneCommand::Silence);
    }
}
