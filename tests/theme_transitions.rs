//! Theme Transition Integration Tests
//!
//! End-to-end tests for switching themes: timed color interpolation, exact
//! final values, preemption, event ordering and the global runtime lifecycle.

use app_state::{
    global, ConsumerId, ManualClock, RuntimeConfig, StyleError, StyleEvent, StyleRuntime,
};
use app_ui::color::Color;
use app_ui::components::{custom_link, themed_text, themed_view};
use app_ui::style::{StyleDescriptor, StyleFactory, StyleValue};
use app_ui::theme::{dark_theme, fonts, tokens, Theme, ThemeKey, DARK, LIGHT};
use app_ui::typography::{FontWeight, TextSize};
use podcast_app::config::StylingConfig;
use podcast_app::{bootstrap, screens};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Helper to build the two single-token themes used by the timing scenario
fn mono_config() -> RuntimeConfig {
    RuntimeConfig {
        themes: vec![
            Theme::builder(LIGHT)
                .color(tokens::PRIMARY, Color::parse("#000000").unwrap())
                .build(),
            Theme::builder(DARK)
                .color(tokens::PRIMARY, Color::parse("#ffffff").unwrap())
                .build(),
        ],
        ..RuntimeConfig::default()
    }
}

/// Helper to create a runtime driven by a manual clock
fn manual_runtime(config: RuntimeConfig) -> (Arc<StyleRuntime>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new());
    let runtime = StyleRuntime::with_clock(config, clock.clone()).unwrap();
    (Arc::new(runtime), clock)
}

fn primary_factory() -> StyleFactory {
    StyleFactory::new("primary", |theme| {
        StyleDescriptor::new().theme_color("color", theme, tokens::PRIMARY)
    })
}

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

/// Test the 200 ms black-to-white scenario: mid-gray halfway, exact white at the end
#[test]
fn test_timed_switch_scenario() {
    let (runtime, clock) = manual_runtime(mono_config());
    let factory = primary_factory();

    runtime.switch(DARK).unwrap();

    clock.set(ms(100));
    runtime.tick();
    assert_eq!(
        runtime.evaluate(&factory).get_color("color"),
        Some(Color::parse("#7f7f7f").unwrap())
    );

    clock.set(ms(200));
    assert!(!runtime.tick());
    let color = runtime.evaluate(&factory).get_color("color").unwrap();
    assert_eq!(color.to_hex(), "#FFFFFF");
}

/// Test that every color of the shipped themes lands exactly on the target
#[test]
fn test_round_trip_has_no_drift() {
    let (runtime, clock) = manual_runtime(RuntimeConfig::default());
    let view = themed_view();
    let link = custom_link();

    runtime.switch(DARK).unwrap();
    for step in 1..=13 {
        clock.set(ms(step * 16));
        runtime.tick();
    }
    assert!(!runtime.is_transitioning());

    let target = dark_theme();
    assert_eq!(
        runtime.evaluate(&view).get_color("backgroundColor"),
        target.color(tokens::PRIMARY_BACKGROUND)
    );
    assert_eq!(
        runtime.evaluate(&link).get_color("borderColor"),
        target.color(tokens::PRIMARY)
    );
}

/// Test that preempting a running transition never jumps
#[test]
fn test_preemption_has_no_visible_jump() {
    let (runtime, clock) = manual_runtime(mono_config());
    let factory = primary_factory();

    runtime.switch(DARK).unwrap();
    clock.set(ms(60));
    runtime.tick();
    let before = runtime.evaluate(&factory).get_color("color");

    runtime.switch(LIGHT).unwrap();
    let after = runtime.evaluate(&factory).get_color("color");
    assert_eq!(before, after);

    // the reverse transition heads back to black from the interrupted gray
    clock.set(ms(160));
    runtime.tick();
    let mid = runtime.evaluate(&factory).get_color("color").unwrap();
    assert!(mid.r < after.unwrap().r);

    clock.set(ms(260));
    runtime.tick();
    assert_eq!(runtime.evaluate(&factory).get_color("color"), Some(Color::BLACK));
}

/// Test that rapid toggling keeps every emitted frame continuous
#[test]
fn test_rapid_toggle_frames_are_continuous() {
    let (runtime, clock) = manual_runtime(mono_config());
    let frames = Arc::new(Mutex::new(Vec::new()));
    let sink = frames.clone();
    runtime.subscribe(ConsumerId::next(), move |event: &StyleEvent| {
        if let StyleEvent::Frame(frame) = event {
            sink.lock().unwrap().push(frame.colors[tokens::PRIMARY]);
        }
    });

    let mut target = DARK;
    for step in 0..10u64 {
        clock.set(ms(step * 30));
        runtime.switch(target).unwrap();
        clock.set(ms(step * 30 + 15));
        runtime.tick();
        target = if target == DARK { LIGHT } else { DARK };
    }

    let frames = frames.lock().unwrap();
    // every switch frame repeats the color that was on screen just before it
    for pair in frames.chunks(2).collect::<Vec<_>>().windows(2) {
        let last_tick = pair[0][1];
        let next_switch = pair[1][0];
        assert_eq!(last_tick, next_switch);
    }
}

/// Test that fonts snap to the new theme while colors animate
#[test]
fn test_fonts_snap_colors_animate() {
    let mut config = RuntimeConfig::default();
    config.themes[1] = Theme::builder(DARK)
        .color(tokens::PRIMARY, Color::WHITE)
        .color(tokens::PRIMARY_BACKGROUND, Color::BLACK)
        .font(app_ui::theme::FontRole::Bold, "Inter-Bold")
        .build();
    let (runtime, clock) = manual_runtime(config);
    let text = themed_text(FontWeight::Bold, TextSize::Lg);

    assert_eq!(
        runtime.evaluate(&text).get("fontFamily"),
        Some(&StyleValue::Font(fonts::ROBOTO_BOLD.to_string()))
    );

    runtime.switch(DARK).unwrap();
    clock.set(ms(100));
    runtime.tick();

    let style = runtime.evaluate(&text);
    assert_eq!(
        style.get("fontFamily"),
        Some(&StyleValue::Font("Inter-Bold".to_string()))
    );
    assert_eq!(style.get_color("color"), Some(Color::rgb(0x7F, 0x7F, 0x7F)));
}

/// Test event order and switch-to-active / unknown-key behavior
#[test]
fn test_switch_events_and_errors() {
    let (runtime, clock) = manual_runtime(RuntimeConfig::default());
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    runtime.subscribe(ConsumerId::next(), move |event: &StyleEvent| {
        sink.lock().unwrap().push(event.kind());
    });

    runtime.switch(LIGHT).unwrap();
    assert!(events.lock().unwrap().is_empty());

    assert_eq!(
        runtime.switch("sepia").unwrap_err(),
        StyleError::UnknownTheme("sepia".to_string())
    );
    assert_eq!(runtime.active_key(), ThemeKey::from(LIGHT));

    runtime.switch(DARK).unwrap();
    clock.set(ms(200));
    runtime.tick();
    assert!(!runtime.tick());

    assert_eq!(
        *events.lock().unwrap(),
        vec!["theme_changed", "frame", "frame"]
    );
}

/// Test channel subscribers receive frames for their next render pass
#[tokio::test]
async fn test_channel_subscriber_sees_whole_transition() {
    let (runtime, clock) = manual_runtime(mono_config());
    let mut rx = runtime.subscribe_channel(ConsumerId::next());

    runtime.switch(DARK).unwrap();
    clock.set(ms(100));
    runtime.tick();
    clock.set(ms(200));
    runtime.tick();

    let mut kinds = Vec::new();
    let mut last = None;
    while let Ok(event) = rx.try_recv() {
        kinds.push(event.kind());
        if let StyleEvent::Frame(frame) = event {
            last = Some(frame);
        }
    }
    assert_eq!(kinds, vec!["theme_changed", "frame", "frame", "frame"]);
    let last = last.unwrap();
    assert!(last.finished);
    assert_eq!(last.colors[tokens::PRIMARY], Color::WHITE);
}

/// Test the account screen toggle through the global runtime lifecycle
#[test]
fn test_bootstrap_and_toggle_through_global() {
    global::reset();
    assert!(matches!(global::get(), Err(StyleError::NotInitialized)));

    let runtime = bootstrap(StylingConfig::default()).unwrap();
    assert!(bootstrap(StylingConfig::default()).is_err());

    let installed = global::get().unwrap();
    assert!(Arc::ptr_eq(&runtime, &installed));
    assert_eq!(screens::toggle_theme(&installed).unwrap(), ThemeKey::from(DARK));
    assert_eq!(runtime.active_key(), ThemeKey::from(DARK));

    assert!(global::reset());
    assert!(global::try_get().is_none());

    // a fresh runtime starts from the configured theme again
    let runtime = bootstrap(StylingConfig::default()).unwrap();
    assert_eq!(runtime.active_key(), ThemeKey::from(LIGHT));
    global::reset();
}
