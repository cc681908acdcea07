//! The clock's two buttons: primary (cancel alarm / night mode) and snooze.
//!
//! Both are active low with pull-ups. Edges come from interrupt-driven GPIO
//! futures; the time-window debouncing lives in the core's `Debouncer`.

use desk_clock_core::Button;
use embassy_futures::select::{
    Either,
    select,
};
use embassy_time::{
    Duration,
    Timer,
};
use esp_hal::gpio::{
    Input,
    InputConfig,
    Pull,
};

use crate::ButtonResources;

pub struct Buttons {
    pub primary: Input<'static>,
    pub snooze: Input<'static>,
}

/// Contact bounce settle time before a falling edge counts.
const SETTLE_MS: u64 = 20;

impl From<ButtonResources<'static>> for Buttons {
    fn from(res: ButtonResources<'static>) -> Self {
        let pull_up = InputConfig::default().with_pull(Pull::Up);
        Self {
            primary: Input::new(res.primary, pull_up),
            snooze: Input::new(res.snooze, pull_up),
        }
    }
}

impl Buttons {
    /// Wait for the next press on either button.
    pub async fn next_press(&mut self) -> Button {
        loop {
            let button = match select(
                self.primary.wait_for_falling_edge(),
                self.snooze.wait_for_falling_edge(),
            )
            .await
            {
                Either::First(()) => Button::Primary,
                Either::Second(()) => Button::Snooze,
            };

            Timer::after(Duration::from_millis(SETTLE_MS)).await;
            if self.input(button).is_low() {
                return button;
            }
        }
    }

    fn input(&self, button: Button) -> &Input<'static> {
        match button {
            Button::Primary => &self.primary,
            Button::Snooze => &self.snooze,
        }
    }
}
