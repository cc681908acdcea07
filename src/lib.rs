//! # desk-clock
//!
//! Board support for the desk clock (ESP32-S3).
//!
//! Wraps the onboard peripherals in the shapes the clock core expects:
//! - **Display**: 240×240 round GC9A01 LCD over SPI with DMA
//! - **Backlight**: PWM-dimmed display backlight
//! - **Buttons**: primary (cancel / night mode) and snooze
//! - **Buzzer**: piezo on an LEDC channel, retuned per note from its own task
//! - **Wall clock**: epoch time kept on top of the embassy time base
//!
//! ## Quick start
//!
//! ```rust,ignore
//! let peripherals = desk_clock::init();
//! let resources = desk_clock::split_resources!(peripherals);
//!
//! let display: desk_clock::Display = resources.display.into();
//! let buttons: desk_clock::Buttons = resources.buttons.into();
//! let ledc: &'static esp_hal::ledc::Ledc<'static> = resources.pwm.into();
//! let buzzer = desk_clock::Buzzer::new(resources.buzzer, ledc);
//! ```

#![no_std]

mod backlight;
mod buttons;
mod buzzer;
mod display;
mod wall_clock;

pub use backlight::Backlight;
pub use buttons::Buttons;
pub use buzzer::{
    Buzzer,
    ToneCommand,
    ToneHandle,
};
pub use display::{
    ClockPanel,
    Display,
};
use esp_hal::{
    assign_resources,
    clock::{
        Clock,
        CpuClock,
    },
    ledc::{
        LSGlobalClkSource,
        Ledc,
    },
    rom,
};
pub use wall_clock::WallClock;

/// Moves a value into its own `static` slot and hands back `&'static mut`.
///
/// Each expansion owns one slot, so a call site may only run once. The
/// clock uses it for the panel, the LEDC timers and the tasks' drivers.
#[macro_export]
macro_rules! mk_static {
    ($t:ty, $val:expr) => {{
        static STATIC_CELL: static_cell::StaticCell<$t> = static_cell::StaticCell::new();
        #[deny(unused_attributes)]
        let x = STATIC_CELL.uninit().write($val);
        x
    }};
}

// ── Pin / peripheral assignments ────────────────────────────────────────────

assign_resources! {
    pub Resources<'d> {
        display: DisplayResources<'d> {
            dc: GPIO15,
            rst: GPIO7,
            sck: GPIO4,
            cs: GPIO6,
            mosi: GPIO5,
            spi: SPI2,
            dma: DMA_CH0,
        },
        pwm: PwmResources<'d> {
            ledc: LEDC,
        },
        backlight: BacklightResources<'d> {
            led: GPIO19,
        },
        buttons: ButtonResources<'d> {
            primary: GPIO13,
            snooze: GPIO38,
        },
        buzzer: BuzzerResources<'d> {
            pin: GPIO20,
        }
    }
}

// ── Board initialisation ────────────────────────────────────────────────────

/// Selects the PLL as the CPU source and sets the divider for `cpu_clock_speed`.
///
/// [`init`] calls this with 160 MHz first. The ESP32-S3 does not come out of
/// the bootloader's clock straight into 240 MHz reliably, so `esp_hal::init`
/// only raises it to the maximum after this step. The ROM delay loops are
/// told the new rate so busy waits stay accurate.
fn set_cpu_clock(cpu_clock_speed: CpuClock) {
    let _ = esp_hal::peripherals::SYSTEM::regs()
        .sysclk_conf()
        .modify(|_, w| unsafe { w.soc_clk_sel().bits(1) });
    let _ = esp_hal::peripherals::SYSTEM::regs()
        .cpu_per_conf()
        .modify(|_, w| unsafe {
            let _ = w.pll_freq_sel().set_bit();
            w.cpuperiod_sel().bits(match cpu_clock_speed {
                CpuClock::_80MHz => 0,
                CpuClock::_160MHz => 1,
                CpuClock::_240MHz => 2,
                _ => panic!("Unsupported CPU clock speed"),
            })
        });

    rom::ets_update_cpu_frequency_rom(cpu_clock_speed.frequency().as_mhz());
}

/// Brings the CPU up to full speed and takes the peripherals.
///
/// The frame loop redraws 240×240 pixels 25 times a second, so the clock
/// always runs at [`CpuClock::max`]. Call once from `main` and hand the
/// result to [`split_resources!`].
#[must_use]
pub fn init() -> esp_hal::peripherals::Peripherals {
    set_cpu_clock(CpuClock::_160MHz);
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    esp_hal::init(config)
}

impl From<esp_hal::peripherals::Peripherals> for Resources<'_> {
    fn from(peripherals: esp_hal::peripherals::Peripherals) -> Self {
        split_resources!(peripherals)
    }
}

/// The LEDC block shared by the backlight (timer 0, channel 0) and the
/// buzzer (timer 1, channel 1). Both run from the APB clock.
impl From<PwmResources<'static>> for &'static Ledc<'static> {
    fn from(res: PwmResources<'static>) -> Self {
        let ledc = mk_static!(Ledc<'static>, Ledc::new(res.ledc));
        ledc.set_global_slow_clock(LSGlobalClkSource::APBClk);
        ledc
    }
}
