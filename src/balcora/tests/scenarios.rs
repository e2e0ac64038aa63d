//! End-to-end scenarios: editor JSON in, Lua script out

use balcora::{statements, validate, weapon_to_lua, EmitError, WeaponExt};

const FIXED_WEAPON: &str = r#"{
    "name": "kus_ioncannon",
    "display_name": "Ion Cannon",
    "weapon_type": "fixed",
    "projectile_type": "instanthit",
    "fire_script": "Ion_Beam_Fire",
    "activation_context": "normal",
    "projectile_speed": 0,
    "range": 3200,
    "sphereburst_radius": 0,
    "beam_duration": 3.5,
    "beam_anticipation_time": 0,
    "missile_fire_axis": 0,
    "max_effects": 0,
    "use_velocity_prediction": false,
    "check_line_of_fire": true,
    "shot_interval": 10,
    "burst_duration": 0,
    "burst_interval": 0,
    "shoot_at_secondaries": true,
    "shoot_at_surroundings": false,
    "tracking_speed_x": 0,
    "tracking_speed_y": 0,
    "speed_mult_when_over_target": 1,
    "shield_penetration_mode": "normal",
    "track_outside_range": false,
    "wait_for_codered": false,
    "beam_penetration_threshold": 0,
    "weapon_result": {
        "condition": "hit",
        "effect": "damagehealth",
        "target": "target",
        "effect_min": 200,
        "effect_max": 250
    },
    "accuracy": { "default": 50, "exceptions": { "fighter": 70 } },
    "penetration": { "default": 10, "field_pen": 0, "exceptions": { "lightarmour": 5 } },
    "fire_angles": {
        "cone_radius": 0,
        "rotate_x_min": 0,
        "rotate_x_max": 0,
        "rotate_y_min": 0,
        "rotate_y_max": 0
    }
}"#;

const OPTIONAL_SETTERS: &[&str] = &[
    "setBallistics",
    "setAccuracyFalloff",
    "setDamageFalloff",
    "setFrustratedTimers",
    "setLifetimeMult",
    "setMagneticFieldPenetration",
    "setMiscValues",
    "setMissProperties",
    "setRangeBoost",
];

fn with(extra: &str) -> WeaponExt {
    let mut value: serde_json::Value = serde_json::from_str(FIXED_WEAPON).unwrap();
    let extra: serde_json::Value = serde_json::from_str(extra).unwrap();
    if let (Some(obj), Some(extra)) = (value.as_object_mut(), extra.as_object()) {
        for (k, v) in extra {
            obj.insert(k.clone(), v.clone());
        }
    }
    serde_json::from_value(value).unwrap()
}

#[test]
fn fixed_weapon_emits_only_required_statements() {
    let weapon = WeaponExt::from_json(FIXED_WEAPON).unwrap();
    let script = weapon_to_lua(&weapon).unwrap();

    let count = |prefix: &str| script.lines().filter(|l| l.starts_with(prefix)).count();
    assert_eq!(count("StartWeaponConfig("), 1);
    assert_eq!(count("AddWeaponResult("), 1);
    assert_eq!(count("setAngles("), 1);
    assert!(script
        .lines()
        .any(|l| l == "setPenetration(NewWeaponType, 10, 0, {lightarmour = 5});"));
    assert!(script
        .lines()
        .any(|l| l == "setAccuracy(NewWeaponType, 50, {fighter = 70});"));
    for setter in OPTIONAL_SETTERS {
        assert_eq!(count(setter), 0, "{} should not be emitted", setter);
    }
}

#[test]
fn complete_fixed_weapon_is_valid() {
    let weapon = WeaponExt::from_json(FIXED_WEAPON).unwrap();
    let report = validate(&weapon);
    assert!(report.is_clean(), "{:?}", report.findings);
}

#[test]
fn script_starts_with_attribution_and_has_no_blank_edges() {
    let script = weapon_to_lua(&WeaponExt::from_json(FIXED_WEAPON).unwrap()).unwrap();
    assert_eq!(script.lines().next(), Some(balcora::lua::ATTRIBUTION));
    assert!(!script.starts_with('\n'));
    assert!(!script.ends_with('\n'));
    assert_eq!(script.lines().count(), 6);
}

#[test]
fn override_order_ignores_input_key_order() {
    let a = with(
        r#"{"penetration": {"default": 1, "field_pen": 0,
            "exceptions": {"probearmour": 3, "heavyarmour": 2, "unarmoured": 1}}}"#,
    );
    let b = with(
        r#"{"penetration": {"default": 1, "field_pen": 0,
            "exceptions": {"unarmoured": 1, "probearmour": 3, "heavyarmour": 2}}}"#,
    );

    let expected = "setPenetration(NewWeaponType, 1, 0, {unarmoured = 1}, {heavyarmour = 2}, \
                    {probearmour = 3});";
    assert!(weapon_to_lua(&a).unwrap().lines().any(|l| l == expected));
    assert_eq!(weapon_to_lua(&a).unwrap(), weapon_to_lua(&b).unwrap());
}

#[test]
fn override_count_matches_present_entries() {
    let weapon = with(
        r#"{"accuracy": {"default": 10, "exceptions": {
            "fighter": 0.9, "corvette": 0.7, "frigate": 0.5, "mothership": null}}}"#,
    );
    let statements = statements(&weapon).unwrap();
    let accuracy = statements
        .iter()
        .find(|s| s.name() == "setAccuracy")
        .unwrap();
    let tables: Vec<_> = accuracy.args().iter().filter(|a| a.starts_with('{')).collect();
    assert_eq!(tables, vec!["{fighter = 0.9}", "{corvette = 0.7}", "{frigate = 0.5}"]);
}

#[test]
fn range_boost_zero_is_suppressed() {
    let zero = weapon_to_lua(&with(r#"{"range_boost": 0}"#)).unwrap();
    assert!(!zero.contains("setRangeBoost"));

    let five = weapon_to_lua(&with(r#"{"range_boost": 5}"#)).unwrap();
    assert!(five.lines().any(|l| l == "setRangeBoost(NewWeaponType, 5);"));
}

#[test]
fn booleans_and_strings_render_as_engine_literals() {
    let weapon = WeaponExt::from_json(FIXED_WEAPON).unwrap();
    let script = weapon_to_lua(&weapon).unwrap();
    let start = script
        .lines()
        .find(|l| l.starts_with("StartWeaponConfig"))
        .unwrap();

    assert!(!start.contains("true"));
    assert!(!start.contains("false"));
    assert!(start.starts_with(
        "StartWeaponConfig(NewWeaponType, \"fixed\", \"instanthit\", \"Ion_Beam_Fire\", \"normal\", 0, 3200,"
    ));
    assert!(start.ends_with(", \"normal\", 0, 0, 0);"));
}

#[test]
fn optional_sections_each_add_one_line() {
    let base = weapon_to_lua(&WeaponExt::from_json(FIXED_WEAPON).unwrap()).unwrap();
    let cases = [
        (r#"{"ballistics": {"disabled": false, "lead_amount": 1}}"#, "setBallistics(NewWeaponType, 0, 1);"),
        (
            r#"{"accuracy_falloff": {"falloff_over_range": 0.5, "percentage_start": 0.25}}"#,
            "setAccuracyFalloff(NewWeaponType, 0.5, 0.25);",
        ),
        (
            r#"{"magnetic_field_pen": {"default": 0.5, "family_exceptions": {"MagneticField": 1}}}"#,
            "setMagneticFieldPenetration(NewWeaponType, 0.5, {MagneticField = 1});",
        ),
        (r#"{"lifetime_mult": 2}"#, "setLifetimeMult(NewWeaponType, 2);"),
    ];

    for (extra, line) in cases {
        let script = weapon_to_lua(&with(extra)).unwrap();
        assert_eq!(script, format!("{}\n{}", base, line));
    }
}

#[test]
fn missing_required_section_is_an_error() {
    let mut value: serde_json::Value = serde_json::from_str(FIXED_WEAPON).unwrap();
    value.as_object_mut().unwrap().remove("fire_angles");
    let weapon: WeaponExt = serde_json::from_value(value).unwrap();

    assert_eq!(
        weapon_to_lua(&weapon),
        Err(EmitError::MissingSection("fire_angles"))
    );
    assert!(!validate(&weapon).is_exportable());
}

#[test]
fn unknown_family_key_is_rejected_at_input() {
    let err = WeaponExt::from_json(
        r#"{"accuracy": {"default": 1, "exceptions": {"battlecruiser": 2}}}"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("attack_family"));
}
