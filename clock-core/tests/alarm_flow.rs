mod common;

use common::{
    Event,
    FixedClock,
    RecordingCanvas,
    RecordingPacer,
    RecordingTone,
    ScriptedDelay,
    new_log,
    plays,
    presents,
};
use desk_clock_core::{
    AlarmDefinition,
    AlarmEvaluator,
    Announcer,
    AnnouncerConfig,
    AnnouncerPhase,
    Button,
    Debouncer,
    FrameScheduler,
    Outcome,
    SharedState,
    SpeedProfile,
    Starfield,
    config,
    melody,
};
use embassy_futures::block_on;
use embassy_time::Duration;

static WAKE_UP: [AlarmDefinition; 1] = [AlarmDefinition::new(8, 30, 0, "Wake up")];

fn scheduler<'s>(state: &'s SharedState, announcer: AnnouncerConfig) -> FrameScheduler<'s, 16> {
    FrameScheduler::new(
        state,
        Starfield::new(9, config::VIEWPORT, config::STARS_SPEED_MAX, 1),
        SpeedProfile::Constant(10.0),
        AlarmEvaluator::new(&WAKE_UP, 0),
        Announcer::new(state, announcer),
    )
}

fn events_before_first_play(log: &common::Log) -> Vec<Event> {
    log.borrow()
        .iter()
        .take_while(|e| !matches!(e, Event::Play(_)))
        .cloned()
        .collect()
}

#[test]
fn wake_up_alarm_flashes_then_plays_until_snoozed() {
    let state = SharedState::new();
    let log = new_log();
    let clock = FixedClock::at(8, 30, 0);
    let mut canvas = RecordingCanvas { log: log.clone() };
    let mut tone = RecordingTone { log: log.clone() };

    let mut snooze = Debouncer::new(&state, config::DEBOUNCE_WINDOW);
    let note_log = log.clone();
    let mut delay = ScriptedDelay::new(log.clone()).at(0, move || {
        if plays(&note_log) >= 1 {
            snooze.on_edge(Button::Snooze, 60_000);
        }
    });

    let mut clock_loop = scheduler(&state, AnnouncerConfig::default());
    let report = block_on(clock_loop.frame(&clock, &mut canvas, &mut tone, &mut delay));

    assert_eq!(report.announcement, Some(Outcome::Cancelled));
    assert!(!state.is_active());
    assert_eq!(state.phase(), AnnouncerPhase::Idle);

    // Five flash pairs, each showing the message, before any sound.
    let flashing = events_before_first_play(&log);
    let flashes = flashing.iter().filter(|e| **e == Event::Present).count();
    assert_eq!(flashes, 10);
    assert!(
        flashing
            .iter()
            .filter_map(|e| match e {
                Event::Text(t) => Some(t.as_str()),
                _ => None,
            })
            .all(|t| t == "Wake up")
    );

    // The snooze landed during the first note: it is the only one, and the
    // buzzer was silenced right after it.
    assert_eq!(plays(&log), 1);
    let events = log.borrow();
    let first_play = events
        .iter()
        .position(|e| matches!(e, Event::Play(_)))
        .unwrap();
    assert_eq!(events[first_play], Event::Play(melody::ALARM_TUNE[0].note.unwrap().frequency()));
    let waited_in_note: u32 = events[first_play..]
        .iter()
        .take_while(|e| !matches!(e, Event::Silence))
        .filter_map(|e| match e {
            Event::Wait(ms) => Some(*ms),
            _ => None,
        })
        .sum();
    assert!(waited_in_note <= config::CANCEL_POLL.as_millis() as u32);
    assert_eq!(events[first_play + 1..].iter().filter(|e| matches!(e, Event::Play(_))).count(), 0);

    // The face is drawn once the announcement is over.
    assert_eq!(events.last(), Some(&Event::Present));
    assert!(events.contains(&Event::Text("8:30:00".into())));
}

#[test]
fn same_second_does_not_trigger_twice() {
    let state = SharedState::new();
    let log = new_log();
    let clock = FixedClock::at(8, 30, 0);
    let mut canvas = RecordingCanvas { log: log.clone() };
    let mut tone = RecordingTone { log: log.clone() };
    let mut delay = ScriptedDelay::new(log.clone()).cancel_at(1_200, &state);

    let mut clock_loop = scheduler(&state, AnnouncerConfig::default());
    let first = block_on(clock_loop.frame(&clock, &mut canvas, &mut tone, &mut delay));
    assert_eq!(first.announcement, Some(Outcome::Cancelled));

    let second = block_on(clock_loop.frame(&clock, &mut canvas, &mut tone, &mut delay));
    assert_eq!(second.announcement, None);
    assert!(!state.is_active());
}

#[test]
fn alarm_fires_again_the_next_day() {
    let state = SharedState::new();
    let log = new_log();
    let clock = FixedClock::at(8, 30, 0);
    let mut canvas = RecordingCanvas { log: log.clone() };
    let mut tone = RecordingTone { log: log.clone() };
    let mut delay = ScriptedDelay::new(log.clone()).cancel_at(1_200, &state);
    let mut clock_loop = scheduler(&state, AnnouncerConfig::default());

    let today = block_on(clock_loop.frame(&clock, &mut canvas, &mut tone, &mut delay));
    assert_eq!(today.announcement, Some(Outcome::Cancelled));

    // Midday, then one second short of the alarm tomorrow.
    clock.advance(3 * 3600 + 30 * 60);
    let noon = block_on(clock_loop.frame(&clock, &mut canvas, &mut tone, &mut delay));
    assert_eq!(noon.announcement, None);
    clock.advance(20 * 3600 + 29 * 60 + 59);
    let before = block_on(clock_loop.frame(&clock, &mut canvas, &mut tone, &mut delay));
    assert_eq!(before.announcement, None);

    clock.advance(1);
    let tomorrow = block_on(clock_loop.frame(&clock, &mut canvas, &mut tone, &mut delay));
    assert_eq!(tomorrow.time.hours24, 8);
    assert_eq!(tomorrow.time.minutes, 30);
    assert_eq!(tomorrow.announcement, Some(Outcome::Cancelled));
    assert!(!state.is_active());
}

#[test]
fn frames_are_paced_and_pacing_restarts_after_an_alarm() {
    assert_eq!(config::FRAME_INTERVAL, Duration::from_millis(40));

    let state = SharedState::new();
    let log = new_log();
    let clock = FixedClock::at(8, 29, 59);
    let mut canvas = RecordingCanvas { log: log.clone() };
    let mut tone = RecordingTone { log: log.clone() };
    let mut delay = ScriptedDelay::new(log.clone()).cancel_at(1_200, &state);
    let mut pacer = RecordingPacer { log: log.clone() };
    let mut clock_loop = scheduler(&state, AnnouncerConfig::default());

    let mut announcements = Vec::new();
    for _ in 0..3 {
        let report = block_on(clock_loop.paced_frame(
            &clock,
            &mut canvas,
            &mut tone,
            &mut delay,
            &mut pacer,
        ));
        announcements.push(report.announcement);
        clock.advance(1);
    }
    assert_eq!(announcements, [None, Some(Outcome::Cancelled), None]);

    let pacing: Vec<Event> = log
        .borrow()
        .iter()
        .filter(|e| matches!(e, Event::Tick | Event::PacerReset))
        .cloned()
        .collect();
    assert_eq!(pacing, [Event::Tick, Event::PacerReset, Event::Tick, Event::Tick]);

    // Each slot is waited for only after that frame's face is on screen.
    let events = log.borrow();
    for (i, event) in events.iter().enumerate() {
        if *event == Event::Tick {
            let drawn = events[..i].iter().rev().find(|e| **e != Event::PacerReset);
            assert_eq!(drawn, Some(&Event::Present));
        }
    }
}

#[test]
fn cancel_while_flashing_makes_no_sound() {
    let state = SharedState::new();
    let log = new_log();
    let clock = FixedClock::at(8, 30, 0);
    let mut canvas = RecordingCanvas { log: log.clone() };
    let mut tone = RecordingTone { log: log.clone() };
    let mut delay = ScriptedDelay::new(log.clone()).cancel_at(1_200, &state);

    let mut clock_loop = scheduler(&state, AnnouncerConfig::default());
    let report = block_on(clock_loop.frame(&clock, &mut canvas, &mut tone, &mut delay));

    assert_eq!(report.announcement, Some(Outcome::Cancelled));
    assert_eq!(plays(&log), 0);
    assert_eq!(state.phase(), AnnouncerPhase::Idle);
    // Three flash halves were shown before the cancel, plus the clock face.
    assert_eq!(presents(&log), 4);
}

#[test]
fn tune_repeats_with_flashing_until_cancelled() {
    let state = SharedState::new();
    let log = new_log();
    let clock = FixedClock::at(8, 30, 0);
    let mut canvas = RecordingCanvas { log: log.clone() };
    let mut tone = RecordingTone { log: log.clone() };
    let mut delay = ScriptedDelay::new(log.clone()).cancel_after_notes(3, &state);

    let announcer = AnnouncerConfig {
        tune: melody::BEEP,
        ..AnnouncerConfig::default()
    };
    let mut clock_loop = scheduler(&state, announcer);
    let report = block_on(clock_loop.frame(&clock, &mut canvas, &mut tone, &mut delay));
    assert_eq!(report.announcement, Some(Outcome::Cancelled));
    assert_eq!(plays(&log), 3);

    // A second round of flashing separates the second and third notes.
    let events = log.borrow();
    let play_at: Vec<usize> = events
        .iter()
        .enumerate()
        .filter(|(_, e)| matches!(e, Event::Play(_)))
        .map(|(i, _)| i)
        .collect();
    let flashes_between = events[play_at[1]..play_at[2]]
        .iter()
        .filter(|e| **e == Event::Present)
        .count();
    assert_eq!(flashes_between, 10);
}

#[test]
fn unattended_alarm_gives_up() {
    let state = SharedState::new();
    let log = new_log();
    let clock = FixedClock::at(8, 30, 0);
    let mut canvas = RecordingCanvas { log: log.clone() };
    let mut tone = RecordingTone { log: log.clone() };
    let mut delay = ScriptedDelay::new(log.clone());

    let announcer = AnnouncerConfig {
        tune: melody::BEEP,
        max_cycles: 2,
        ..AnnouncerConfig::default()
    };
    let mut clock_loop = scheduler(&state, announcer);
    let report = block_on(clock_loop.frame(&clock, &mut canvas, &mut tone, &mut delay));

    assert_eq!(report.announcement, Some(Outcome::Exhausted));
    assert!(!state.is_active());
    assert_eq!(plays(&log), 4);
    assert_eq!(presents(&log), 21);
    assert_eq!(
        log.borrow().iter().rev().find(|e| matches!(e, Event::Play(_) | Event::Silence)),
        Some(&Event::Silence)
    );
}

#[test]
fn night_mode_dims_and_alarm_brightens() {
    let state = SharedState::new();
    let log = new_log();
    let clock = FixedClock::at(8, 29, 58);
    let mut canvas = RecordingCanvas { log: log.clone() };
    let mut tone = RecordingTone { log: log.clone() };
    let mut delay = ScriptedDelay::new(log.clone()).cancel_at(600, &state);
    let mut buttons = Debouncer::new(&state, config::DEBOUNCE_WINDOW);
    let mut clock_loop = scheduler(&state, AnnouncerConfig::default());

    let backlight = |log: &common::Log| -> Vec<f32> {
        log.borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Backlight(level) => Some(*level),
                _ => None,
            })
            .collect()
    };

    block_on(clock_loop.frame(&clock, &mut canvas, &mut tone, &mut delay));
    assert_eq!(backlight(&log), [config::DAY_BACKLIGHT]);

    buttons.on_edge(Button::Primary, 1_000);
    clock.advance(1);
    block_on(clock_loop.frame(&clock, &mut canvas, &mut tone, &mut delay));
    block_on(clock_loop.frame(&clock, &mut canvas, &mut tone, &mut delay));
    assert_eq!(backlight(&log), [config::DAY_BACKLIGHT, config::NIGHT_BACKLIGHT]);

    clock.advance(1);
    let report = block_on(clock_loop.frame(&clock, &mut canvas, &mut tone, &mut delay));
    assert_eq!(report.announcement, Some(Outcome::Cancelled));
    assert_eq!(
        backlight(&log),
        [
            config::DAY_BACKLIGHT,
            config::NIGHT_BACKLIGHT,
            config::DAY_BACKLIGHT,
            config::NIGHT_BACKLIGHT,
        ]
    );
}

#[test]
fn stars_move_between_frames() {
    let state = SharedState::new();
    let log = new_log();
    let clock = FixedClock::at(10, 0, 0);
    let mut canvas = RecordingCanvas { log: log.clone() };
    let mut tone = RecordingTone { log: log.clone() };
    let mut delay = ScriptedDelay::new(log.clone());
    let mut clock_loop = scheduler(&state, AnnouncerConfig::default());

    let report = block_on(clock_loop.frame(&clock, &mut canvas, &mut tone, &mut delay));
    assert_eq!(report.announcement, None);
    assert_eq!(plays(&log), 0);
    assert!(
        clock_loop
            .starfield()
            .stars()
            .iter()
            .any(|s| (s.x, s.y) != (120.0, 120.0))
    );
}
