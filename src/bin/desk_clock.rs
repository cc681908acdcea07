//! Desk clock firmware.
//!
//! Three tasks share one `SharedState`:
//! - clock: start-up splash, then the 25 Hz frame loop (alarms run inline)
//! - input: button edges through the debouncer
//! - buzzer: retunes the LEDC channel to whatever tone was last requested

#![no_std]
#![no_main]

use alloc::vec;

use defmt::{
    debug,
    info,
};
#[allow(clippy::wildcard_imports)]
use desk_clock::*;
use desk_clock_core::{
    Canvas,
    Clock,
    Debouncer,
    FrameCanvas,
    InputEvent,
    SharedState,
    TimeSource,
    config,
    face,
    melody::{
        self,
        Player,
    },
    theme::{
        self,
        rgb565,
    },
};
use embassy_executor::Spawner;
use embassy_time::{
    Delay,
    Duration,
    Instant,
    Timer,
};
use embedded_graphics::pixelcolor::{
    Rgb565,
    RgbColor,
};
use esp_backtrace as _;
use esp_hal::{
    ledc::Ledc,
    timer::timg::TimerGroup,
};
use esp_println as _;

extern crate alloc;

esp_bootloader_esp_idf::esp_app_desc!();

const PIXELS: usize = (config::WIDTH * config::HEIGHT) as usize;

static STATE: SharedState = SharedState::new();

#[embassy_executor::task]
async fn clock_task(
    panel: &'static mut ClockPanel,
    framebuffer: &'static mut [Rgb565],
    wall_clock: &'static WallClock,
) {
    let mut canvas = FrameCanvas::new(framebuffer, config::VIEWPORT, panel);
    let mut tone = ToneHandle;
    let mut delay = Delay;

    canvas.set_backlight(config::DAY_BACKLIGHT);
    face::notification(
        &mut canvas,
        "Starting up!",
        rgb565(theme::HIGHLIGHT),
        rgb565(theme::BACKGROUND),
    );
    melody::alert(&mut tone, &mut delay, config::TONE_DUTY).await;
    Timer::after(config::NOTIFICATION_HOLD).await;

    let seed = wall_clock.epoch_seconds() ^ Instant::now().as_ticks();
    let mut clock = Clock::with_defaults(&STATE, seed);
    info!("Clock task running, {} alarms", config::ALARMS.len());
    clock
        .run(wall_clock, &mut canvas, &mut tone, &mut delay, config::FRAME_INTERVAL)
        .await
}

#[embassy_executor::task]
async fn input_task(buttons: &'static mut Buttons) {
    info!("Input task started");
    let mut debouncer = Debouncer::new(&STATE, config::DEBOUNCE_WINDOW);
    let mut tone = ToneHandle;
    let mut delay = Delay;
    let chirp = Player {
        bpm: config::BPM,
        duty: config::TONE_DUTY,
        gap: config::NOTE_GAP,
        poll: config::CANCEL_POLL,
    };

    loop {
        let button = buttons.next_press().await;
        match debouncer.on_edge(button, Instant::now().as_millis()) {
            Some(InputEvent::NightMode(on)) => {
                info!("Night mode {}", if on { "ON" } else { "OFF" });
                let tune = if on { melody::CONFIRM } else { melody::REJECT };
                chirp
                    .play(tune, &mut tone, &mut delay, || !STATE.is_active())
                    .await;
            }
            Some(event) => info!("{}", event),
            None => debug!("{} press ignored", button),
        }
    }
}

#[embassy_executor::task]
async fn buzzer_task(buzzer: &'static mut Buzzer) {
    buzzer.run().await
}

#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    let peripherals = desk_clock::init();
    let resources = split_resources!(peripherals);

    // Holds the framebuffer.
    esp_alloc::heap_allocator!(size: 160 * 1024);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    info!("Desk clock starting");

    let display: Display<'static> = resources.display.into();
    let ledc: &'static Ledc<'static> = resources.pwm.into();
    let backlight = Backlight::new(resources.backlight, ledc);
    let panel = mk_static!(ClockPanel, ClockPanel::new(display, backlight));
    let framebuffer = vec![Rgb565::BLACK; PIXELS].leak();
    let wall_clock = mk_static!(WallClock, WallClock::default());
    let buttons = mk_static!(Buttons, resources.buttons.into());
    let buzzer = mk_static!(Buzzer, Buzzer::new(resources.buzzer, ledc));

    spawner.must_spawn(buzzer_task(buzzer));
    spawner.must_spawn(input_task(buttons));
    spawner.must_spawn(clock_task(panel, framebuffer, wall_clock));

    loop {
        Timer::after(Duration::from_secs(600)).await;
    }
}
