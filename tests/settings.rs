use serde_json::Value;
use shiftlight_link::core::settings::{rpm_json, ShiftSettings};

#[test]
fn edits_are_clamped_to_the_rpm_range() {
    let mut settings = ShiftSettings::new();

    settings.set_ring(0, "4500");
    assert_eq!(settings.ring(0), "4500");

    settings.set_ring(1, "25000");
    assert_eq!(settings.ring(1), "20000");

    settings.set_offset("0");
    assert_eq!(settings.offset(), "0");
}

#[test]
fn non_digit_characters_are_stripped_before_parsing() {
    let mut settings = ShiftSettings::new();

    settings.set_ring(0, "6k500");
    assert_eq!(settings.ring(0), "6500");

    settings.set_ring(1, " 7,000 rpm");
    assert_eq!(settings.ring(1), "7000");
}

#[test]
fn empty_after_stripping_stores_empty_not_zero() {
    let mut settings = ShiftSettings::new();

    settings.set_ring(0, "rpm");
    assert_eq!(settings.ring(0), "");

    settings.set_offset("");
    assert_eq!(settings.offset(), "");
}

#[test]
fn overflowing_digit_runs_store_zero() {
    let mut settings = ShiftSettings::new();
    settings.set_ring(0, "99999999999999999999");
    assert_eq!(settings.ring(0), "0");
}

#[test]
fn values_json_counts_empty_fields_as_zero() {
    let mut settings = ShiftSettings::new();
    settings.set_ring(0, "3000");

    let parsed: Value = serde_json::from_str(&settings.values_json()).unwrap();
    assert_eq!(parsed["ring 1"], 3000);
    assert_eq!(parsed["ring 2"], 0);
    assert_eq!(parsed["offset"], 0);
}

#[test]
fn values_json_round_trips() {
    let mut settings = ShiftSettings::new();
    settings.set_ring(0, "3000");
    settings.set_ring(1, "4500");
    settings.set_ring(2, "6000");
    settings.set_ring(3, "7200");
    settings.set_offset("250");

    let json = settings.values_json();

    let mut restored = ShiftSettings::new();
    restored.apply_values_json(&json);
    assert_eq!(restored.ring(0), "3000");
    assert_eq!(restored.ring(1), "4500");
    assert_eq!(restored.ring(2), "6000");
    assert_eq!(restored.ring(3), "7200");
    assert_eq!(restored.offset(), "250");
}

#[test]
fn malformed_json_leaves_fields_untouched() {
    let mut settings = ShiftSettings::new();
    settings.set_ring(0, "5000");
    settings.set_offset("100");

    settings.apply_values_json("not json at all");
    settings.apply_values_json("{\"ring 1\": ");

    assert_eq!(settings.ring(0), "5000");
    assert_eq!(settings.offset(), "100");
}

#[test]
fn restore_keeps_current_value_for_missing_keys() {
    let mut settings = ShiftSettings::new();
    settings.set_ring(0, "5000");
    settings.set_ring(1, "6000");

    settings.apply_values_json("{\"ring 1\": 3000}");

    assert_eq!(settings.ring(0), "3000");
    assert_eq!(settings.ring(1), "6000");
}

#[test]
fn restored_values_are_clamped() {
    let mut settings = ShiftSettings::new();
    settings.apply_values_json("{\"ring 1\": 25000, \"ring 2\": -5, \"offset\": 19999}");

    assert_eq!(settings.ring(0), "20000");
    assert_eq!(settings.ring(1), "0");
    assert_eq!(settings.offset(), "19999");
}

#[test]
fn rpm_json_has_the_expected_shape() {
    let parsed: Value = serde_json::from_str(&rpm_json(7200)).unwrap();
    assert_eq!(parsed["rpm"], 7200);
}
