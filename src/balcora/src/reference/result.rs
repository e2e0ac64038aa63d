//! Weapon result vocabularies (`AddWeaponResult` arguments)

use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter, EnumString, IntoStaticStr};

use super::vocabulary;

/// Whether the result applies on a hit or a miss
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
pub enum ResultCondition {
    Hit,
    Miss,
}

vocabulary!(ResultCondition, "result_condition", [Hit, Miss]);

/// What the result does
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
pub enum ResultEffect {
    DamageHealth,
    Disable,
    Push,
    SpawnWeaponFire,
}

impl ResultEffect {
    /// Whether this effect needs a weapon to spawn
    pub fn spawns(self) -> bool {
        matches!(self, Self::SpawnWeaponFire)
    }
}

vocabulary!(
    ResultEffect,
    "result_effect",
    [DamageHealth, Disable, Push, SpawnWeaponFire]
);

/// Who the result is applied to
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
pub enum ResultTarget {
    Target,
    Owner,
}

vocabulary!(ResultTarget, "result_target", [Target, Owner]);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::Vocabulary;

    #[test]
    fn test_result_names() {
        assert_eq!(ResultEffect::DamageHealth.as_str(), "damagehealth");
        assert_eq!(ResultEffect::SpawnWeaponFire.as_str(), "spawnweaponfire");
        assert_eq!(ResultCondition::ALL, &[ResultCondition::Hit, ResultCondition::Miss]);
        assert_eq!("owner".parse::<ResultTarget>().ok(), Some(ResultTarget::Owner));
    }

    #[test]
    fn test_spawns() {
        assert!(ResultEffect::SpawnWeaponFire.spawns());
        assert!(!ResultEffect::Push.spawns());
    }
}
