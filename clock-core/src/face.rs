//! Drawing the clock face and full-screen notifications.

use embedded_graphics::pixelcolor::Rgb565;

use crate::{
    canvas::{
        Canvas,
        TextScale,
    },
    config::{
        CENTER,
        HOUR_HAND,
        HOUR_RING,
        HUB_RADIUS,
        MINUTE_HAND,
        MINUTE_RING,
        NOTIFICATION_WIDTH,
        NOTIFICATION_Y,
        READOUT_Y,
        SECOND_HAND,
        SECOND_RING,
        WIDTH,
    },
    geometry::{
        MarkerTone,
        RingStyle,
        hand_tip,
        ring_markers,
    },
    starfield::Star,
    theme::{
        self,
        rgb565,
    },
    time::ClockTime,
};

/// Fill the screen with `background` and centre `text` on it in `color`.
/// Messages wider than [`NOTIFICATION_WIDTH`] wrap onto further lines.
pub fn notification<C: Canvas>(canvas: &mut C, text: &str, color: Rgb565, background: Rgb565) {
    canvas.set_color(background);
    canvas.clear();
    canvas.set_color(color);
    let width = canvas
        .measure_text(text, TextScale::Large)
        .min(NOTIFICATION_WIDTH);
    let x = (WIDTH.saturating_sub(width) / 2) as i32;
    canvas.text(text, x, NOTIFICATION_Y, NOTIFICATION_WIDTH, TextScale::Large);
    canvas.present();
}

/// Draw one complete frame of the clock and present it.
pub fn draw_frame<C: Canvas>(canvas: &mut C, time: &ClockTime, stars: &[Star]) {
    let background = rgb565(theme::BACKGROUND);
    canvas.set_color(background);
    canvas.clear();

    canvas.set_color(rgb565(theme::STARS));
    for star in stars {
        let p = star.position();
        canvas.circle(p.x, p.y, u32::from(star.radius));
    }

    let hours = time.hours12();
    draw_ring(canvas, hours, HOUR_RING);
    draw_ring(canvas, time.minutes, MINUTE_RING);
    draw_ring(canvas, time.seconds, SECOND_RING);

    canvas.set_color(rgb565(theme::HIGHLIGHT));
    draw_hand(canvas, time.seconds, 60, SECOND_HAND);
    draw_hand(canvas, time.minutes, 60, MINUTE_HAND);
    draw_hand(canvas, hours, 12, HOUR_HAND);

    canvas.set_color(rgb565(theme::HUB));
    canvas.circle(CENTER.x, CENTER.y, HUB_RADIUS);

    draw_readout(canvas, time);

    canvas.present();
}

fn draw_ring<C: Canvas>(canvas: &mut C, value: u8, style: RingStyle) {
    let background = rgb565(theme::BACKGROUND);
    for marker in ring_markers(value, style) {
        let color = match marker.tone {
            MarkerTone::Upcoming => theme::HIGHLIGHT,
            MarkerTone::Passed => theme::ACCENT,
        };
        let p = marker.position;
        canvas.set_color(rgb565(color));
        canvas.circle(p.x, p.y, style.radius(marker.size));
        canvas.set_color(background);
        canvas.circle(p.x, p.y, style.inner);
    }
}

fn draw_hand<C: Canvas>(canvas: &mut C, value: u8, max_value: u8, length: u32) {
    let tip = hand_tip(value, max_value, length);
    canvas.line(CENTER.x, CENTER.y, tip.x, tip.y);
}

/// Digital time in a box punched out of the face.
fn draw_readout<C: Canvas>(canvas: &mut C, time: &ClockTime) {
    let text = time.readout();
    let width = canvas.measure_text(&text, TextScale::Large);
    let x = (WIDTH.saturating_sub(width) / 2) as i32;

    canvas.set_color(rgb565(theme::BACKGROUND));
    canvas.rectangle(x - 2, READOUT_Y - 2, width + 4, 20);

    canvas.set_color(rgb565(theme::HIGHLIGHT));
    canvas.text(&text, x, READOUT_Y, 0, TextScale::Large);
}
