//! Weapon configuration model
//!
//! [`Weapon`] holds the flat base fields passed to `StartWeaponConfig`.
//! [`WeaponExt`] adds the structured sections, each of which maps to one
//! engine setter. The editor works on partially filled values, so base
//! fields and the required sections are `Option` here; the emitter decides
//! what absence means for each of them.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::reference::{
    ActivationContext, ArmourFamily, AttackFamily, MagneticFieldFamily, MissileFireAxis,
    ProjectileType, ResultCondition, ResultEffect, ResultTarget, ShieldPenetrationMode,
    WeaponType,
};
use crate::reference::family::FamilyExceptions;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Unsupported input format: {0}")]
    UnsupportedFormat(String),
}

/// Serialized forms a configuration can be loaded from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Yaml,
}

impl InputFormat {
    /// Pick a format from a file extension
    pub fn from_path(path: &Path) -> Result<Self, ParseError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(ParseError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Base weapon fields, all optional while the form is being filled in
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Weapon {
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub weapon_type: Option<WeaponType>,
    pub projectile_type: Option<ProjectileType>,
    pub fire_script: Option<String>,
    pub activation_context: Option<ActivationContext>,
    pub projectile_speed: Option<f64>,
    pub range: Option<f64>,
    pub sphereburst_radius: Option<f64>,
    pub beam_duration: Option<f64>,
    pub beam_anticipation_time: Option<f64>,
    pub missile_fire_axis: Option<MissileFireAxis>,
    pub max_effects: Option<f64>,
    pub use_velocity_prediction: Option<bool>,
    pub check_line_of_fire: Option<bool>,
    pub shot_interval: Option<f64>,
    pub burst_duration: Option<f64>,
    pub burst_interval: Option<f64>,
    pub shoot_at_secondaries: Option<bool>,
    pub shoot_at_surroundings: Option<bool>,
    pub tracking_speed_x: Option<f64>,
    pub tracking_speed_y: Option<f64>,
    pub speed_mult_when_over_target: Option<f64>,
    pub shield_penetration_mode: Option<ShieldPenetrationMode>,
    pub track_outside_range: Option<bool>,
    pub wait_for_codered: Option<bool>,
    pub beam_penetration_threshold: Option<f64>,
}

impl Weapon {
    /// Names of base fields that have not been filled in, in declared order
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let present = [
            ("name", self.name.is_some()),
            ("display_name", self.display_name.is_some()),
            ("weapon_type", self.weapon_type.is_some()),
            ("projectile_type", self.projectile_type.is_some()),
            ("fire_script", self.fire_script.is_some()),
            ("activation_context", self.activation_context.is_some()),
            ("projectile_speed", self.projectile_speed.is_some()),
            ("range", self.range.is_some()),
            ("sphereburst_radius", self.sphereburst_radius.is_some()),
            ("beam_duration", self.beam_duration.is_some()),
            ("beam_anticipation_time", self.beam_anticipation_time.is_some()),
            ("missile_fire_axis", self.missile_fire_axis.is_some()),
            ("max_effects", self.max_effects.is_some()),
            ("use_velocity_prediction", self.use_velocity_prediction.is_some()),
            ("check_line_of_fire", self.check_line_of_fire.is_some()),
            ("shot_interval", self.shot_interval.is_some()),
            ("burst_duration", self.burst_duration.is_some()),
            ("burst_interval", self.burst_interval.is_some()),
            ("shoot_at_secondaries", self.shoot_at_secondaries.is_some()),
            ("shoot_at_surroundings", self.shoot_at_surroundings.is_some()),
            ("tracking_speed_x", self.tracking_speed_x.is_some()),
            ("tracking_speed_y", self.tracking_speed_y.is_some()),
            (
                "speed_mult_when_over_target",
                self.speed_mult_when_over_target.is_some(),
            ),
            ("shield_penetration_mode", self.shield_penetration_mode.is_some()),
            ("track_outside_range", self.track_outside_range.is_some()),
            ("wait_for_codered", self.wait_for_codered.is_some()),
            (
                "beam_penetration_threshold",
                self.beam_penetration_threshold.is_some(),
            ),
        ];

        present
            .iter()
            .filter(|(_, is_set)| !is_set)
            .map(|(name, _)| *name)
            .collect()
    }

    /// Whether every base field has a value
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

/// `AddWeaponResult` arguments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponResult {
    pub condition: ResultCondition,
    pub effect: ResultEffect,
    pub target: ResultTarget,
    pub effect_min: f64,
    pub effect_max: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spawns_weapon: Option<String>,
}

/// Accuracy against attack families
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Accuracy {
    pub default: f64,
    #[serde(
        default,
        alias = "family_exceptions",
        skip_serializing_if = "Option::is_none"
    )]
    pub exceptions: Option<FamilyExceptions<AttackFamily>>,
}

/// Penetration against armour families
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Penetration {
    pub default: f64,
    pub field_pen: f64,
    #[serde(
        default,
        alias = "family_exceptions",
        skip_serializing_if = "Option::is_none"
    )]
    pub exceptions: Option<FamilyExceptions<ArmourFamily>>,
}

/// Penetration of magnetic fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MagneticFieldPen {
    pub default: f64,
    #[serde(
        default,
        alias = "family_exceptions",
        skip_serializing_if = "Option::is_none"
    )]
    pub exceptions: Option<FamilyExceptions<MagneticFieldFamily>>,
}

/// Firing cone and turret rotation limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FireAngles {
    pub cone_radius: f64,
    pub rotate_x_min: f64,
    pub rotate_x_max: f64,
    pub rotate_y_min: f64,
    pub rotate_y_max: f64,
}

/// Shared shape of the accuracy and damage falloff sections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Falloff {
    pub falloff_over_range: f64,
    pub percentage_start: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ballistics {
    pub disabled: bool,
    pub lead_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrustratedTimers {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MiscValues {
    pub barrel_recoil_distance: f64,
    pub slave_fire_delay: f64,
}

/// Behaviour of shots that miss
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissProperties {
    pub cone_x: f64,
    pub cone_y: f64,
    pub damage_mult_low: f64,
    pub damage_mult_high: f64,
    pub projectile_speed_mult: f64,
    pub projectile_lifetime_mult: f64,
}

/// Engagement ranges per tactics stance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StanceRanges {
    pub evasive: f64,
    pub neutral: f64,
    #[serde(alias = "aggresive")]
    pub aggressive: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedVsAccuracy {
    pub speed: f64,
    pub accuracy: f64,
}

/// Accuracy scaling by target speed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeedAccuracyModifier {
    pub use_as_target_prio_source: bool,
    /// Between one and [`SpeedAccuracyModifier::MAX_MULTS`] pairs
    #[serde(default)]
    pub mults: Vec<SpeedVsAccuracy>,
}

impl SpeedAccuracyModifier {
    pub const MAX_MULTS: usize = 6;
}

/// A weapon with all of its optional sections
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponExt {
    #[serde(flatten)]
    pub weapon: Weapon,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub weapon_result: Option<WeaponResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<Accuracy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub penetration: Option<Penetration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fire_angles: Option<FireAngles>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub turret_sound: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy_falloff: Option<Falloff>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ballistics: Option<Ballistics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub damage_falloff: Option<Falloff>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frustrated_timers: Option<FrustratedTimers>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lifetime_mult: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub magnetic_field_pen: Option<MagneticFieldPen>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub misc_values: Option<MiscValues>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missile_killer: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub miss_properties: Option<MissProperties>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range_boost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stance_ranges: Option<StanceRanges>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed_accuracy_modifier: Option<SpeedAccuracyModifier>,
}

impl WeaponExt {
    /// Parse a configuration from JSON (the editor's form state)
    pub fn from_json(json: &str) -> Result<Self, ParseError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a configuration from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self, ParseError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parse a configuration in the given format
    pub fn parse(input: &str, format: InputFormat) -> Result<Self, ParseError> {
        match format {
            InputFormat::Json => Self::from_json(input),
            InputFormat::Yaml => Self::from_yaml(input),
        }
    }

    /// Serialize back to pretty JSON
    pub fn to_json_pretty(&self) -> Result<String, ParseError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> Result<String, ParseError> {
        Ok(serde_yaml::to_string(self)?)
    }
}
