//! Weapon kind vocabularies

use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter, EnumString, IntoStaticStr};

use super::vocabulary;

/// How the weapon is mounted and aimed
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    IntoStaticStr,
    EnumIter,
    EnumCount,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(try_from = "String", into = "&'static str")]
pub enum WeaponType {
    Gimble,
    AnimatedTurret,
    Fixed,
}

vocabulary!(WeaponType, "weapon_type", [Gimble, AnimatedTurret, Fixed]);

/// What the weapon fires
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    IntoStaticStr,
    EnumIter,
    EnumCount,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(try_from = "String", into = "&'static str")]
pub enum ProjectileType {
    InstantHit,
    Bullet,
    Mine,
    Missile,
    SphereBurst,
}

vocabulary!(
    ProjectileType,
    "projectile_type",
    [InstantHit, Bullet, Mine, Missile, SphereBurst]
);

/// When the weapon is allowed to fire
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    IntoStaticStr,
    EnumIter,
    EnumCount,
    Serialize,
    Deserialize,
)]
#[serde(try_from = "String", into = "&'static str")]
pub enum ActivationContext {
    #[strum(serialize = "normal")]
    Normal,
    #[strum(serialize = "special attack")]
    SpecialAttack,
    #[strum(serialize = "normal only")]
    NormalOnly,
    #[strum(serialize = "dropped")]
    Dropped,
}

vocabulary!(
    ActivationContext,
    "activation_context",
    [Normal, SpecialAttack, NormalOnly, Dropped]
);

/// How projectiles interact with shields
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    IntoStaticStr,
    EnumIter,
    EnumCount,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(try_from = "String", into = "&'static str")]
pub enum ShieldPenetrationMode {
    Normal,
    Enhanced,
    Bypass,
}

vocabulary!(
    ShieldPenetrationMode,
    "shield_penetration_mode",
    [Normal, Enhanced, Bypass]
);

/// Missile launch axis; the engine takes the raw number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum MissileFireAxis {
    X = 0,
    Y = 1,
    Z = 2,
}

impl MissileFireAxis {
    pub const ALL: &'static [Self] = &[Self::X, Self::Y, Self::Z];

    pub fn value(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for MissileFireAxis {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::X),
            1 => Ok(Self::Y),
            2 => Ok(Self::Z),
            other => Err(format!("missile_fire_axis must be 0, 1 or 2, got {}", other)),
        }
    }
}

impl From<MissileFireAxis> for u8 {
    fn from(axis: MissileFireAxis) -> Self {
        axis.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::Vocabulary;
    use strum::{EnumCount, IntoEnumIterator};

    #[test]
    fn test_weapon_type_names() {
        assert_eq!(WeaponType::AnimatedTurret.as_str(), "animatedturret");
        assert_eq!("gimble".parse::<WeaponType>().ok(), Some(WeaponType::Gimble));
        assert!("Gimble".parse::<WeaponType>().is_err());
    }

    #[test]
    fn test_activation_context_with_spaces() {
        assert_eq!(ActivationContext::SpecialAttack.to_string(), "special attack");
        assert_eq!(
            "normal only".parse::<ActivationContext>().ok(),
            Some(ActivationContext::NormalOnly)
        );
    }

    #[test]
    fn test_all_matches_declaration_order() {
        assert_eq!(WeaponType::ALL.len(), WeaponType::COUNT);
        assert!(WeaponType::iter().eq(WeaponType::ALL.iter().copied()));
        assert!(ProjectileType::iter().eq(ProjectileType::ALL.iter().copied()));
        assert!(ActivationContext::iter().eq(ActivationContext::ALL.iter().copied()));
        assert!(ShieldPenetrationMode::iter().eq(ShieldPenetrationMode::ALL.iter().copied()));
    }

    #[test]
    fn test_serde_uses_engine_names() {
        let json = serde_json::to_string(&ProjectileType::SphereBurst).unwrap();
        assert_eq!(json, "\"sphereburst\"");
        let parsed: ActivationContext = serde_json::from_str("\"special attack\"").unwrap();
        assert_eq!(parsed, ActivationContext::SpecialAttack);
        let err = serde_json::from_str::<WeaponType>("\"turret\"").unwrap_err();
        assert!(err.to_string().contains("unknown weapon_type `turret`"));
    }

    #[test]
    fn test_missile_fire_axis() {
        let axis: MissileFireAxis = serde_json::from_str("2").unwrap();
        assert_eq!(axis, MissileFireAxis::Z);
        assert!(serde_json::from_str::<MissileFireAxis>("3").is_err());
        assert_eq!(serde_json::to_string(&MissileFireAxis::Y).unwrap(), "1");
    }
}
