//! Pre-export validation
//!
//! The emitter writes whatever it is given. This pass is what the editor runs
//! before exporting: it flags values that would make the emitter fail or
//! produce a script the engine cannot load, and values that export but are
//! probably not what the user meant.

use std::fmt;

use crate::lua::is_truthy;
use crate::reference::family::{Family, FamilyExceptions};
use crate::weapon::{SpeedAccuracyModifier, WeaponExt};

/// How serious a finding is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Exports, but likely not as intended
    Warning,
    /// Export fails or yields a script the engine rejects
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A single validation finding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub severity: Severity,
    /// Dotted path of the offending field, e.g. `accuracy.exceptions.fighter`
    pub path: String,
    pub message: String,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.severity, self.path, self.message)
    }
}

/// Full validation result
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub findings: Vec<Finding>,
}

impl ValidationReport {
    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.findings.push(Finding {
            severity: Severity::Error,
            path: path.into(),
            message: message.into(),
        });
    }

    fn warning(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.findings.push(Finding {
            severity: Severity::Warning,
            path: path.into(),
            message: message.into(),
        });
    }

    pub fn errors(&self) -> impl Iterator<Item = &Finding> {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Finding> {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Warning)
    }

    /// True when nothing blocks export
    pub fn is_exportable(&self) -> bool {
        self.errors().next().is_none()
    }

    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }
}

fn check_string(report: &mut ValidationReport, path: &str, value: Option<&str>) {
    let Some(value) = value else {
        return;
    };
    if value.contains(['"', '\\', '\n', '\r']) {
        report.error(
            path,
            "contains a quote, backslash or line break, which breaks the Lua string literal",
        );
    }
}

fn check_number(report: &mut ValidationReport, path: &str, value: Option<f64>) {
    if let Some(v) = value {
        if !v.is_finite() {
            report.error(path, format!("{} is not a finite number", v));
        }
    }
}

/// Check every number of a section record, as `section.field`
fn check_section(report: &mut ValidationReport, section: &str, fields: &[(&str, f64)]) {
    for (field, value) in fields {
        check_number(report, &format!("{}.{}", section, field), Some(*value));
    }
}

/// The name doubles as the default export file stem
fn check_stem(report: &mut ValidationReport, name: Option<&str>) {
    let Some(name) = name else {
        return;
    };
    let trimmed = name.trim();
    if trimmed == "." || trimmed == ".." || trimmed.contains(['/', '\\']) {
        report.warning("name", "cannot be used as the export file name; pass a stem instead");
    }
}

fn check_exceptions<F: Family>(
    report: &mut ValidationReport,
    section: &str,
    exceptions: Option<&FamilyExceptions<F>>,
) {
    let Some(exceptions) = exceptions else {
        return;
    };
    for (family, value) in exceptions.iter() {
        let path = format!("{}.exceptions.{}", section, family.as_str());
        check_number(report, &path, Some(value));
        if value == 0.0 {
            report.warning(path, "override of 0 is dropped on export");
        }
    }
}

fn check_speed_accuracy(report: &mut ValidationReport, modifier: &SpeedAccuracyModifier) {
    let count = modifier.mults.len();
    if !(1..=SpeedAccuracyModifier::MAX_MULTS).contains(&count) {
        report.error(
            "speed_accuracy_modifier.mults",
            format!(
                "needs 1 to {} speed/accuracy pairs, got {}",
                SpeedAccuracyModifier::MAX_MULTS,
                count
            ),
        );
    }
    for (i, pair) in modifier.mults.iter().enumerate() {
        let path = format!("speed_accuracy_modifier.mults[{}]", i);
        check_number(report, &format!("{}.speed", path), Some(pair.speed));
        check_number(report, &format!("{}.accuracy", path), Some(pair.accuracy));
    }
}

fn check_truthy_setter(report: &mut ValidationReport, path: &str, value: Option<f64>) {
    check_number(report, path, value);
    if let Some(v) = value {
        if !is_truthy(v) && !v.is_nan() {
            report.warning(path, "a value of 0 is not exported");
        }
    }
}

/// Numbers of the optional record sections, when present
fn check_optional_sections(report: &mut ValidationReport, weapon: &WeaponExt) {
    if let Some(b) = &weapon.ballistics {
        check_section(report, "ballistics", &[("lead_amount", b.lead_amount)]);
    }
    for (section, falloff) in [
        ("accuracy_falloff", &weapon.accuracy_falloff),
        ("damage_falloff", &weapon.damage_falloff),
    ] {
        if let Some(f) = falloff {
            check_section(
                report,
                section,
                &[
                    ("falloff_over_range", f.falloff_over_range),
                    ("percentage_start", f.percentage_start),
                ],
            );
        }
    }
    if let Some(t) = &weapon.frustrated_timers {
        check_section(report, "frustrated_timers", &[("min", t.min), ("max", t.max)]);
    }
    if let Some(m) = &weapon.misc_values {
        check_section(
            report,
            "misc_values",
            &[
                ("barrel_recoil_distance", m.barrel_recoil_distance),
                ("slave_fire_delay", m.slave_fire_delay),
            ],
        );
    }
    if let Some(m) = &weapon.miss_properties {
        check_section(
            report,
            "miss_properties",
            &[
                ("cone_x", m.cone_x),
                ("cone_y", m.cone_y),
                ("damage_mult_low", m.damage_mult_low),
                ("damage_mult_high", m.damage_mult_high),
                ("projectile_speed_mult", m.projectile_speed_mult),
                ("projectile_lifetime_mult", m.projectile_lifetime_mult),
            ],
        );
    }
    if let Some(s) = &weapon.stance_ranges {
        check_section(
            report,
            "stance_ranges",
            &[
                ("evasive", s.evasive),
                ("neutral", s.neutral),
                ("aggressive", s.aggressive),
            ],
        );
    }
}

/// Validate a weapon before export
pub fn validate(weapon: &WeaponExt) -> ValidationReport {
    let mut report = ValidationReport::default();
    let base = &weapon.weapon;

    for field in base.missing_fields() {
        // not passed to the engine
        if field == "name" || field == "display_name" {
            continue;
        }
        report.warning(field, "not set, exported as `undefined`");
    }

    check_stem(&mut report, base.name.as_deref());
    check_string(&mut report, "fire_script", base.fire_script.as_deref());
    check_string(&mut report, "turret_sound", weapon.turret_sound.as_deref());

    for (path, value) in [
        ("projectile_speed", base.projectile_speed),
        ("range", base.range),
        ("sphereburst_radius", base.sphereburst_radius),
        ("beam_duration", base.beam_duration),
        ("beam_anticipation_time", base.beam_anticipation_time),
        ("max_effects", base.max_effects),
        ("shot_interval", base.shot_interval),
        ("burst_duration", base.burst_duration),
        ("burst_interval", base.burst_interval),
        ("tracking_speed_x", base.tracking_speed_x),
        ("tracking_speed_y", base.tracking_speed_y),
        ("speed_mult_when_over_target", base.speed_mult_when_over_target),
        ("beam_penetration_threshold", base.beam_penetration_threshold),
    ] {
        check_number(&mut report, path, value);
    }

    match &weapon.weapon_result {
        Some(result) => {
            check_number(&mut report, "weapon_result.effect_min", Some(result.effect_min));
            check_number(&mut report, "weapon_result.effect_max", Some(result.effect_max));
            if result.effect_min > result.effect_max {
                report.warning(
                    "weapon_result.effect_min",
                    format!(
                        "effect_min ({}) is greater than effect_max ({})",
                        result.effect_min, result.effect_max
                    ),
                );
            }
            check_string(
                &mut report,
                "weapon_result.spawns_weapon",
                result.spawns_weapon.as_deref(),
            );
            if result.effect.spawns() && result.spawns_weapon.is_none() {
                report.warning(
                    "weapon_result.spawns_weapon",
                    "effect is spawnweaponfire but no weapon to spawn is set",
                );
            }
        }
        None => report.error("weapon_result", "required section is missing"),
    }

    match &weapon.accuracy {
        Some(accuracy) => {
            check_number(&mut report, "accuracy.default", Some(accuracy.default));
            check_exceptions(&mut report, "accuracy", accuracy.exceptions.as_ref());
        }
        None => report.error("accuracy", "required section is missing"),
    }

    match &weapon.penetration {
        Some(pen) => {
            check_number(&mut report, "penetration.default", Some(pen.default));
            check_number(&mut report, "penetration.field_pen", Some(pen.field_pen));
            check_exceptions(&mut report, "penetration", pen.exceptions.as_ref());
        }
        None => report.error("penetration", "required section is missing"),
    }

    match &weapon.fire_angles {
        Some(angles) => check_section(
            &mut report,
            "fire_angles",
            &[
                ("cone_radius", angles.cone_radius),
                ("rotate_x_min", angles.rotate_x_min),
                ("rotate_x_max", angles.rotate_x_max),
                ("rotate_y_min", angles.rotate_y_min),
                ("rotate_y_max", angles.rotate_y_max),
            ],
        ),
        None => report.error("fire_angles", "required section is missing"),
    }

    check_optional_sections(&mut report, weapon);

    if let Some(field) = &weapon.magnetic_field_pen {
        check_number(&mut report, "magnetic_field_pen.default", Some(field.default));
        check_exceptions(&mut report, "magnetic_field_pen", field.exceptions.as_ref());
    }

    check_truthy_setter(&mut report, "lifetime_mult", weapon.lifetime_mult);
    check_truthy_setter(&mut report, "range_boost", weapon.range_boost);

    if let Some(modifier) = &weapon.speed_accuracy_modifier {
        check_speed_accuracy(&mut report, modifier);
    }

    tracing::debug!(
        findings = report.findings.len(),
        exportable = report.is_exportable(),
        "validated weapon"
    );

    report
}
