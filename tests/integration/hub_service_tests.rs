//! End-to-end service scenarios against the mock hardware.

use envnode::app::events::AppEvent;
use envnode::app::service::{DisplayMode, HubService};
use envnode::clock::WallClock;
use envnode::config::SystemConfig;
use envnode::drivers::button::ButtonId;
use envnode::error::BusError;
use envnode::link::parse_frame;

use crate::mock_hw::{MockHardware, RecordingSink};

fn setup() -> (HubService, MockHardware, WallClock, RecordingSink) {
    (
        HubService::new(SystemConfig::default()),
        MockHardware::new(),
        WallClock::new(),
        RecordingSink::new(),
    )
}

/// One full press-and-release of a button across two ticks.
fn click(
    service: &mut HubService,
    hw: &mut MockHardware,
    clock: &WallClock,
    sink: &mut RecordingSink,
    id: ButtonId,
) {
    hw.press(id);
    service.tick(hw, clock, sink);
    hw.release(id);
    service.tick(hw, clock, sink);
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn startup_announces_node_and_shows_ready() {
    let (mut service, mut hw, _clock, mut sink) = setup();
    service.start(&mut hw, &mut sink);

    assert_eq!(hw.sent, vec!["ENVNODE Porneste\r\n".to_string()]);
    assert_eq!(hw.screen[0], "Sistem Gata");
    assert!(matches!(sink.events[..], [AppEvent::Started]));
    assert_eq!(service.mode(), DisplayMode::Welcome);
}

#[test]
fn welcome_screen_until_a_mode_is_chosen() {
    let (mut service, mut hw, clock, mut sink) = setup();
    service.tick(&mut hw, &clock, &mut sink);
    assert_eq!(hw.screen[0], "Apasa un buton");
    assert_eq!(hw.screen[1], "pentru meniu");
}

// ── Frame emission ────────────────────────────────────────────

#[test]
fn frame_goes_out_every_fifth_tick() {
    let (mut service, mut hw, clock, mut sink) = setup();

    for _ in 0..4 {
        service.tick(&mut hw, &clock, &mut sink);
    }
    assert!(hw.sent.is_empty());

    service.tick(&mut hw, &clock, &mut sink);
    assert_eq!(hw.sent.len(), 1);
    assert!(matches!(
        sink.events.last(),
        Some(AppEvent::FrameSent(_))
    ));

    for _ in 0..5 {
        service.tick(&mut hw, &clock, &mut sink);
    }
    assert_eq!(hw.sent.len(), 2);
}

#[test]
fn frame_carries_converted_channel_values() {
    let (mut service, mut hw, clock, mut sink) = setup();
    for _ in 0..5 {
        service.tick(&mut hw, &clock, &mut sink);
    }

    let line = hw.last_sent().unwrap();
    assert!(line.ends_with("\r\n"));
    let frame = parse_frame(line).unwrap();

    // lm35_raw = 51 -> 24.9C; hih_raw = 512 -> ~54.8%; ldr_raw = 900 -> ~12%.
    assert!((frame.analog_temp.value - 24.9).abs() < 0.1);
    assert!((frame.analog_humidity.value - 55.0).abs() < 1.0);
    assert!((frame.light.value - 12.0).abs() < 1.0);
    // Digital raws 0x6640 / 0x7C80 -> ~23.3C / ~54.8%.
    assert!(frame.digital_temp.valid);
    assert!((frame.digital_temp.value - 23.3).abs() < 0.1);
    assert!(frame.digital_humidity.valid);
    assert!((frame.digital_humidity.value - 55.0).abs() < 1.0);
}

#[test]
fn digital_temperature_failure_invalidates_both_digital_channels() {
    let (mut service, mut hw, clock, mut sink) = setup();
    hw.temp_result = Err(BusError::NoAck);

    for _ in 0..5 {
        service.tick(&mut hw, &clock, &mut sink);
    }

    let frame = parse_frame(hw.last_sent().unwrap()).unwrap();
    assert!(!frame.digital_temp.valid);
    assert!(!frame.digital_humidity.valid);
    assert!(frame.analog_temp.valid); // analog channels unaffected

    assert!(
        sink.events
            .iter()
            .any(|e| matches!(e, AppEvent::DigitalSensorError(BusError::NoAck)))
    );
}

#[test]
fn humidity_only_failure_keeps_temperature_valid() {
    let (mut service, mut hw, clock, mut sink) = setup();
    hw.humid_result = Err(BusError::ReadFailed);

    for _ in 0..5 {
        service.tick(&mut hw, &clock, &mut sink);
    }

    let frame = parse_frame(hw.last_sent().unwrap()).unwrap();
    assert!(frame.digital_temp.valid);
    assert!(!frame.digital_humidity.valid);
}

// ── Mode selection ────────────────────────────────────────────

#[test]
fn mode_button_switches_view_and_clears_display() {
    let (mut service, mut hw, clock, mut sink) = setup();

    click(&mut service, &mut hw, &clock, &mut sink, ButtonId::AnalogView);
    assert_eq!(service.mode(), DisplayMode::AnalogSensors);
    assert!(hw.clears >= 1);
    assert!(hw.screen[0].starts_with("LM35 T:"));
    assert!(
        sink.events.iter().any(|e| matches!(
            e,
            AppEvent::ModeChanged {
                from: DisplayMode::Welcome,
                to: DisplayMode::AnalogSensors
            }
        ))
    );

    click(&mut service, &mut hw, &clock, &mut sink, ButtonId::LightView);
    assert_eq!(service.mode(), DisplayMode::Light);
    assert_eq!(hw.screen[0], "Nivel Lumina:");
}

#[test]
fn held_button_switches_mode_once() {
    let (mut service, mut hw, clock, mut sink) = setup();

    hw.press(ButtonId::DigitalView);
    for _ in 0..3 {
        service.tick(&mut hw, &clock, &mut sink);
    }
    let changes = sink
        .events
        .iter()
        .filter(|e| matches!(e, AppEvent::ModeChanged { .. }))
        .count();
    assert_eq!(changes, 1);
}

#[test]
fn tap_released_during_settle_wait_still_registers() {
    let (mut service, mut hw, clock, mut sink) = setup();
    hw.release_on_wait = true;

    hw.press(ButtonId::Alarm);
    service.tick(&mut hw, &clock, &mut sink);
    assert!(service.alarm().is_active());
    assert_eq!(hw.debounce_waits, 1);

    hw.press(ButtonId::AnalogView);
    service.tick(&mut hw, &clock, &mut sink);
    // Mode buttons stay ignored while the alarm runs, even for taps.
    assert_eq!(service.mode(), DisplayMode::Welcome);

    for _ in 0..15 {
        service.on_second(&mut hw, &mut sink);
    }
    hw.press(ButtonId::AnalogView);
    service.tick(&mut hw, &clock, &mut sink);
    assert_eq!(service.mode(), DisplayMode::AnalogSensors);
}

#[test]
fn digital_view_shows_eroare_on_sensor_failure() {
    let (mut service, mut hw, clock, mut sink) = setup();
    hw.temp_result = Err(BusError::CommandNack);

    click(&mut service, &mut hw, &clock, &mut sink, ButtonId::DigitalView);
    assert_eq!(hw.screen[0], "SHT21 T: Eroare");
    assert_eq!(hw.screen[1], "SHT21 H: Eroare");
}

// ── Alarm ─────────────────────────────────────────────────────

#[test]
fn alarm_arms_preempts_modes_and_expires_with_buzzer_and_notification() {
    let (mut service, mut hw, clock, mut sink) = setup();

    hw.press(ButtonId::Alarm);
    service.tick(&mut hw, &clock, &mut sink);
    hw.release(ButtonId::Alarm);

    assert!(service.alarm().is_active());
    assert_eq!(hw.screen[0], "Alarma: 00:15");
    assert_eq!(hw.screen[1], "+ Apasa pt 15s");
    assert!(sink.events.iter().any(|e| matches!(e, AppEvent::AlarmArmed { secs: 15 })));

    // Mode buttons are ignored while the countdown runs.
    hw.press(ButtonId::TimeView);
    service.tick(&mut hw, &clock, &mut sink);
    hw.release(ButtonId::TimeView);
    assert_eq!(service.mode(), DisplayMode::Welcome);

    // No sensor frames go out while the alarm is active.
    for _ in 0..10 {
        service.tick(&mut hw, &clock, &mut sink);
    }
    assert!(hw.sent.is_empty());

    // 15 wall-clock seconds later the countdown expires exactly once.
    for _ in 0..15 {
        service.on_second(&mut hw, &mut sink);
    }
    assert!(!service.alarm().is_active());
    assert_eq!(hw.buzzer_pulses, vec![1000]);
    assert_eq!(hw.sent, vec!["alarm_end\r\n".to_string()]);
    assert!(sink.events.iter().any(|e| matches!(e, AppEvent::AlarmEnded)));

    service.on_second(&mut hw, &mut sink);
    assert_eq!(hw.buzzer_pulses.len(), 1);
}

#[test]
fn press_during_countdown_extends_by_fifteen_seconds() {
    let (mut service, mut hw, clock, mut sink) = setup();

    click(&mut service, &mut hw, &clock, &mut sink, ButtonId::Alarm);
    for _ in 0..5 {
        service.on_second(&mut hw, &mut sink);
    }
    assert_eq!(service.alarm().remaining_secs(), 10);

    hw.press(ButtonId::Alarm);
    service.tick(&mut hw, &clock, &mut sink);
    hw.release(ButtonId::Alarm);

    assert_eq!(service.alarm().remaining_secs(), 25);
    assert!(sink.events.iter().any(|e| matches!(e, AppEvent::AlarmExtended { secs: 25 })));
}

// ── Clock sync ────────────────────────────────────────────────

#[test]
fn time_line_syncs_clock_and_time_view_shows_it() {
    let (mut service, mut hw, clock, mut sink) = setup();

    service.handle_line("TIME:12:30:45", &clock, &mut sink);
    assert!(clock.snapshot().time_valid);
    assert!(sink.events.iter().any(|e| matches!(e, AppEvent::TimeSynced)));

    // The free-run stays off after sync.
    clock.tick_second();
    assert_eq!(clock.snapshot().as_str(), "12:30:45");

    click(&mut service, &mut hw, &clock, &mut sink, ButtonId::TimeView);
    assert_eq!(hw.screen[0], "Timpul Curent:");
    assert_eq!(hw.screen[1], "12:30:45");
}

#[test]
fn unrecognized_and_malformed_lines_are_discarded() {
    let (mut service, _hw, clock, mut sink) = setup();

    service.handle_line("garbage", &clock, &mut sink);
    service.handle_line("TIME:9:5:1", &clock, &mut sink); // wrong shape
    service.handle_line("TIME:ab:cd:ef", &clock, &mut sink);

    assert!(!clock.snapshot().time_valid);
    assert!(sink.events.is_empty());
}
