use gesture_remap::gestures::{
    resolve, try_resolve, GestureResolver, Operation, ResolveError, ResolvedAction, Scheme,
    TouchEvent, TriggerConfiguration,
};
use gesture_remap::settings::{GestureSettings, ENABLED_KEY, SCHEMA_KEY, TRIGGER_KEY};
use gesture_remap::store::{KeyValueStore, MemoryStore};

fn regional(code: &str) -> TriggerConfiguration {
    TriggerConfiguration::new(Scheme::Regional, code)
}

#[test]
fn long_press_performs_assigned_operation() {
    let event = TouchEvent::long_press(200.0, 200.0, 1000, 1000);
    assert_eq!(
        resolve(&event, &regional("10000000"), true),
        ResolvedAction::Perform(Operation::Like)
    );
}

#[test]
fn unassigned_double_tap_falls_back_to_native_like() {
    let event = TouchEvent::double_tap(800.0, 800.0, 1000, 1000);
    assert_eq!(
        resolve(&event, &regional("00000000"), true),
        ResolvedAction::PassThrough
    );
}

#[test]
fn double_tap_remapped_elsewhere_suppresses_native() {
    let event = TouchEvent::double_tap(800.0, 800.0, 1000, 1000);
    assert_eq!(
        resolve(&event, &regional("00000005"), true),
        ResolvedAction::Suppress
    );
}

#[test]
fn zero_width_viewport_passes_through() {
    let config = regional("55555555");
    for event in [
        TouchEvent::long_press(10.0, 10.0, 0, 500),
        TouchEvent::double_tap(10.0, 10.0, 0, 500),
    ] {
        assert!(matches!(
            try_resolve(&event, &config),
            Err(ResolveError::Classification(_))
        ));
        assert_eq!(resolve(&event, &config, true), ResolvedAction::PassThrough);
    }
}

#[test]
fn disabled_setting_always_passes_through() {
    let events = [
        TouchEvent::long_press(1.0, 1.0, 100, 100),
        TouchEvent::double_tap(99.0, 99.0, 100, 100),
        TouchEvent::long_press(1.0, 1.0, 0, 0),
    ];
    for code in ["11111111", "55555555", "", "zz"] {
        for event in &events {
            assert_eq!(
                resolve(event, &regional(code), false),
                ResolvedAction::PassThrough
            );
        }
    }
}

#[test]
fn explicit_like_on_double_tap_passes_through() {
    let event = TouchEvent::double_tap(10.0, 10.0, 100, 100);
    assert_eq!(
        resolve(&event, &regional("00001000"), true),
        ResolvedAction::PassThrough
    );
}

#[test]
fn long_press_original_passes_through() {
    let event = TouchEvent::long_press(90.0, 10.0, 100, 100);
    assert_eq!(
        resolve(&event, &regional("50500000"), true),
        ResolvedAction::PassThrough
    );
}

#[test]
fn corrupted_configuration_fails_open() {
    let event = TouchEvent::double_tap(90.0, 90.0, 100, 100);
    for code in ["0000", "0000000x", "00000009"] {
        assert!(matches!(
            try_resolve(&event, &regional(code)),
            Err(ResolveError::Decode(_))
        ));
        assert_eq!(
            resolve(&event, &regional(code), true),
            ResolvedAction::PassThrough
        );
    }
}

#[test]
fn resolution_is_repeatable() {
    let config = regional("12345670");
    let event = TouchEvent::long_press(700.0, 300.0, 1000, 1000);
    let first = resolve(&event, &config, true);
    let second = resolve(&event, &config, true);
    assert_eq!(first, second);
    assert_eq!(first, ResolvedAction::Perform(Operation::Comment));
}

#[test]
fn legacy_double_tap_uses_single_digit() {
    let config = TriggerConfiguration::new(Scheme::Legacy, "00002");
    for (x, y) in [(10.0, 10.0), (90.0, 90.0)] {
        assert_eq!(
            resolve(&TouchEvent::double_tap(x, y, 100, 100), &config, true),
            ResolvedAction::Suppress
        );
    }
    let pause = TriggerConfiguration::new(Scheme::Legacy, "07000");
    assert_eq!(
        resolve(&TouchEvent::long_press(90.0, 10.0, 100, 100), &pause, true),
        ResolvedAction::Perform(Operation::Pause)
    );
}

#[test]
fn resolver_reads_settings_at_call_time() {
    let mut settings = GestureSettings::new(MemoryStore::new());
    let event = TouchEvent::long_press(10.0, 10.0, 100, 100);

    settings
        .set_trigger_configuration(&regional("40000000"))
        .unwrap();
    assert_eq!(
        GestureResolver::new(&settings).resolve(&event),
        ResolvedAction::PassThrough
    );

    settings.set_enabled(true).unwrap();
    assert_eq!(
        GestureResolver::new(&settings).resolve(&event),
        ResolvedAction::Perform(Operation::Collect)
    );
}

#[test]
fn resolver_fails_open_on_unknown_schema() {
    let mut store = MemoryStore::new();
    store.put_bool(ENABLED_KEY, true).unwrap();
    store.put_string(TRIGGER_KEY, "10000000").unwrap();
    store.put_string(SCHEMA_KEY, "9").unwrap();
    let settings = GestureSettings::new(store);
    assert_eq!(
        GestureResolver::new(&settings).resolve(&TouchEvent::long_press(1.0, 1.0, 10, 10)),
        ResolvedAction::PassThrough
    );
}

#[test]
fn string_from_other_layout_passes_through() {
    let double_tap = TouchEvent::double_tap(10.0, 10.0, 100, 100);

    let mut untagged = MemoryStore::new();
    untagged.put_bool(ENABLED_KEY, true).unwrap();
    untagged.put_string(TRIGGER_KEY, "00005").unwrap();
    let settings = GestureSettings::new(untagged);
    assert!(settings.trigger_configuration().is_err());
    assert_eq!(
        GestureResolver::new(&settings).resolve(&double_tap),
        ResolvedAction::PassThrough
    );

    let mut legacy = MemoryStore::new();
    legacy.put_bool(ENABLED_KEY, true).unwrap();
    legacy.put_string(SCHEMA_KEY, "1").unwrap();
    legacy.put_string(TRIGGER_KEY, "00003000").unwrap();
    let settings = GestureSettings::new(legacy);
    assert!(settings.trigger_configuration().is_err());
    assert_eq!(
        GestureResolver::new(&settings).resolve(&double_tap),
        ResolvedAction::PassThrough
    );
}
