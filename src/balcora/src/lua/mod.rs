//! Lua weapon script emitter
//!
//! Turns a [`WeaponExt`] into the call statements the engine's weapon loader
//! expects:
//!
//! ```text
//! -- Generated with https://www.balcora-gate.com/tools/weapon-editor (by Fear)
//! StartWeaponConfig(NewWeaponType, "fixed", "instanthit", ...);
//! AddWeaponResult(NewWeaponType, "hit", "damagehealth", "target", 90, 110);
//! setPenetration(NewWeaponType, 10, 0, {lightarmour = 5});
//! setAccuracy(NewWeaponType, 50, {fighter = 70});
//! setAngles(NewWeaponType, 0, -5, 5, -5, 5);
//! ```
//!
//! Every statement has its own rule below; argument order is fixed by the
//! engine's call signatures. Base fields and the four required sections are
//! always written, optional sections only when present. The emitter does not
//! validate; see [`crate::validate`] for that.

mod scalar;

pub use scalar::{format_number, is_truthy, LuaScalar, UNDEFINED};

use std::fmt;
use thiserror::Error;

use crate::reference::family::{Family, FamilyExceptions};
use crate::weapon::{
    Accuracy, Ballistics, Falloff, FireAngles, FrustratedTimers, MagneticFieldPen, MiscValues,
    MissProperties, Penetration, Weapon, WeaponExt, WeaponResult,
};

/// First line of every generated script
pub const ATTRIBUTION: &str =
    "-- Generated with https://www.balcora-gate.com/tools/weapon-editor (by Fear)";

/// Object every statement configures
pub const TARGET: &str = "NewWeaponType";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EmitError {
    #[error("Missing required section: {0}")]
    MissingSection(&'static str),
}

/// One call-style statement: `name(NewWeaponType, arg, ...);`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    name: &'static str,
    args: Vec<String>,
}

impl Statement {
    fn call(name: &'static str) -> Self {
        Statement {
            name,
            args: Vec::new(),
        }
    }

    fn arg<'a>(mut self, value: impl Into<LuaScalar<'a>>) -> Self {
        self.args.push(value.into().to_string());
        self
    }

    /// Append one `{family = value}` table per truthy override, in
    /// canonical family order
    fn overrides<F: Family>(mut self, exceptions: Option<&FamilyExceptions<F>>) -> Self {
        let Some(exceptions) = exceptions else {
            return self;
        };
        for (family, value) in exceptions.iter() {
            if is_truthy(value) {
                self.args
                    .push(format!("{{{} = {}}}", family.as_str(), format_number(value)));
            }
        }
        self
    }

    /// Engine function name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Rendered arguments after the target
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}", self.name, TARGET)?;
        for arg in &self.args {
            write!(f, ", {}", arg)?;
        }
        f.write_str(");")
    }
}

fn start_weapon_config(w: &Weapon) -> Statement {
    Statement::call("StartWeaponConfig")
        .arg(w.weapon_type)
        .arg(w.projectile_type)
        .arg(w.fire_script.as_deref())
        .arg(w.activation_context)
        .arg(w.projectile_speed)
        .arg(w.range)
        .arg(w.sphereburst_radius)
        .arg(w.beam_duration)
        .arg(w.beam_anticipation_time)
        .arg(w.missile_fire_axis)
        .arg(w.max_effects)
        .arg(w.use_velocity_prediction)
        .arg(w.check_line_of_fire)
        .arg(w.shot_interval)
        .arg(w.burst_duration)
        .arg(w.burst_interval)
        .arg(w.shoot_at_secondaries)
        .arg(w.shoot_at_surroundings)
        .arg(w.tracking_speed_x)
        .arg(w.tracking_speed_y)
        .arg(w.speed_mult_when_over_target)
        .arg(w.shield_penetration_mode)
        .arg(w.track_outside_range)
        .arg(w.wait_for_codered)
        .arg(w.beam_penetration_threshold)
}

fn add_weapon_result(result: &WeaponResult) -> Statement {
    let statement = Statement::call("AddWeaponResult")
        .arg(result.condition)
        .arg(result.effect)
        .arg(result.target)
        .arg(result.effect_min)
        .arg(result.effect_max);

    // only written when set, never as `undefined`
    match &result.spawns_weapon {
        Some(spawns) => statement.arg(spawns),
        None => statement,
    }
}

fn set_penetration(pen: &Penetration) -> Statement {
    Statement::call("setPenetration")
        .arg(pen.default)
        .arg(pen.field_pen)
        .overrides(pen.exceptions.as_ref())
}

fn set_accuracy(acc: &Accuracy) -> Statement {
    Statement::call("setAccuracy")
        .arg(acc.default)
        .overrides(acc.exceptions.as_ref())
}

fn set_angles(angles: &FireAngles) -> Statement {
    Statement::call("setAngles")
        .arg(angles.cone_radius)
        .arg(angles.rotate_x_min)
        .arg(angles.rotate_x_max)
        .arg(angles.rotate_y_min)
        .arg(angles.rotate_y_max)
}

fn set_ballistics(b: &Ballistics) -> Statement {
    Statement::call("setBallistics")
        .arg(b.disabled)
        .arg(b.lead_amount)
}

fn set_falloff(name: &'static str, falloff: &Falloff) -> Statement {
    Statement::call(name)
        .arg(falloff.falloff_over_range)
        .arg(falloff.percentage_start)
}

fn set_frustrated_timers(timers: &FrustratedTimers) -> Statement {
    Statement::call("setFrustratedTimers")
        .arg(timers.min)
        .arg(timers.max)
}

fn set_magnetic_field_penetration(field: &MagneticFieldPen) -> Statement {
    Statement::call("setMagneticFieldPenetration")
        .arg(field.default)
        .overrides(field.exceptions.as_ref())
}

fn set_misc_values(misc: &MiscValues) -> Statement {
    Statement::call("setMiscValues")
        .arg(misc.barrel_recoil_distance)
        .arg(misc.slave_fire_delay)
}

fn set_miss_properties(miss: &MissProperties) -> Statement {
    Statement::call("setMissProperties")
        .arg(miss.cone_x)
        .arg(miss.cone_y)
        .arg(miss.damage_mult_low)
        .arg(miss.damage_mult_high)
        .arg(miss.projectile_speed_mult)
        .arg(miss.projectile_lifetime_mult)
}

/// Single-number setters are skipped for zero as well as absence, unlike the
/// record sections
fn set_truthy(name: &'static str, value: Option<f64>) -> Option<Statement> {
    value.filter(|v| is_truthy(*v)).map(|v| Statement::call(name).arg(v))
}

fn required<'a, T>(section: &'a Option<T>, name: &'static str) -> Result<&'a T, EmitError> {
    section.as_ref().ok_or(EmitError::MissingSection(name))
}

/// Build the statements for a weapon, in emission order
///
/// Fails only when one of the required sections (`weapon_result`,
/// `accuracy`, `penetration`, `fire_angles`) is absent.
pub fn statements(weapon: &WeaponExt) -> Result<Vec<Statement>, EmitError> {
    let result = required(&weapon.weapon_result, "weapon_result")?;
    let penetration = required(&weapon.penetration, "penetration")?;
    let accuracy = required(&weapon.accuracy, "accuracy")?;
    let angles = required(&weapon.fire_angles, "fire_angles")?;

    let mut out = vec![
        start_weapon_config(&weapon.weapon),
        add_weapon_result(result),
        set_penetration(penetration),
        set_accuracy(accuracy),
        set_angles(angles),
    ];

    let optional = [
        weapon.ballistics.as_ref().map(set_ballistics),
        weapon
            .accuracy_falloff
            .as_ref()
            .map(|f| set_falloff("setAccuracyFalloff", f)),
        weapon
            .damage_falloff
            .as_ref()
            .map(|f| set_falloff("setDamageFalloff", f)),
        weapon.frustrated_timers.as_ref().map(set_frustrated_timers),
        set_truthy("setLifetimeMult", weapon.lifetime_mult),
        weapon
            .magnetic_field_pen
            .as_ref()
            .map(set_magnetic_field_penetration),
        weapon.misc_values.as_ref().map(set_misc_values),
        weapon.miss_properties.as_ref().map(set_miss_properties),
        set_truthy("setRangeBoost", weapon.range_boost),
    ];
    out.extend(optional.into_iter().flatten());

    tracing::debug!(
        weapon = weapon.weapon.name.as_deref().unwrap_or("<unnamed>"),
        statements = out.len(),
        "built weapon statements"
    );

    Ok(out)
}

/// Render a weapon as a Lua weapon script
///
/// The attribution comment is the very first line (no blank line before it),
/// then one statement per line. There is no trailing newline.
pub fn weapon_to_lua(weapon: &WeaponExt) -> Result<String, EmitError> {
    let statements = statements(weapon)?;

    let mut lines = Vec::with_capacity(statements.len() + 1);
    lines.push(ATTRIBUTION.to_string());
    lines.extend(statements.iter().map(Statement::to_string));

    Ok(lines.join("\n"))
}
