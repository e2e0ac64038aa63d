//! Attack, armour and field families
//!
//! Families key the per-category override tables passed to `setAccuracy`,
//! `setPenetration` and `setMagneticFieldPenetration`. Each override table is
//! typed by its family enum, so a key from the wrong family (or a typo) is
//! rejected when the configuration is deserialized, never at emission time.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter, EnumString, IntoStaticStr};

use super::{vocabulary, Vocabulary};

/// A family vocabulary usable as an override-table key
///
/// `Ord` follows declaration order, which is the canonical `ALL` order.
pub trait Family: Vocabulary + Ord {}

/// Families a weapon can target (accuracy overrides)
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
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
pub enum AttackFamily {
    Fighter,
    #[strum(serialize = "fighter_hw1")]
    FighterHw1,
    Corvette,
    #[strum(serialize = "corvette_hw1")]
    CorvetteHw1,
    Frigate,
    Utility,
    Munition,
    SmallCapitalShip,
    BigCapitalShip,
    Mothership,
    Emplacement,
    Unattackable,
    Subsystem,
    ResourceLarge,
    Capturer,
    Chimera,
    NonsenseFamily,
    NonCombat,
    Swarmer,
    SpaceMine,
    Torpedo,
    HeavyMissile,
    SmallMissile,
}

vocabulary!(
    AttackFamily,
    "attack_family",
    [
        Fighter,
        FighterHw1,
        Corvette,
        CorvetteHw1,
        Frigate,
        Utility,
        Munition,
        SmallCapitalShip,
        BigCapitalShip,
        Mothership,
        Emplacement,
        Unattackable,
        Subsystem,
        ResourceLarge,
        Capturer,
        Chimera,
        NonsenseFamily,
        NonCombat,
        Swarmer,
        SpaceMine,
        Torpedo,
        HeavyMissile,
        SmallMissile,
    ]
);

impl Family for AttackFamily {}

/// Armour classes a projectile can hit (penetration overrides)
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
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
pub enum ArmourFamily {
    Unarmoured,
    #[strum(serialize = "unarmoured_hw1")]
    UnarmouredHw1,
    LightArmour,
    #[strum(serialize = "lightarmour_hw1")]
    LightArmourHw1,
    MediumArmour,
    #[strum(serialize = "mediumarmour_hw1")]
    MediumArmourHw1,
    HeavyArmour,
    SubsystemArmour,
    TurretArmour,
    ResArmour,
    MoverArmour,
    PlanetKillerArmour,
    MineArmour,
    ChunkArmour,
    ResourceArmour,
    GravityWellArmour,
    SwarmerArmour,
    SpaceMineArmour,
    TorpedoArmour,
    HeavyMissileArmour,
    SmallMissileArmour,
    ProbeArmour,
}

vocabulary!(
    ArmourFamily,
    "armour_family",
    [
        Unarmoured,
        UnarmouredHw1,
        LightArmour,
        LightArmourHw1,
        MediumArmour,
        MediumArmourHw1,
        HeavyArmour,
        SubsystemArmour,
        TurretArmour,
        ResArmour,
        MoverArmour,
        PlanetKillerArmour,
        MineArmour,
        ChunkArmour,
        ResourceArmour,
        GravityWellArmour,
        SwarmerArmour,
        SpaceMineArmour,
        TorpedoArmour,
        HeavyMissileArmour,
        SmallMissileArmour,
        ProbeArmour,
    ]
);

impl Family for ArmourFamily {}

/// The single field family (`setMagneticFieldPenetration` overrides)
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
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
pub enum MagneticFieldFamily {
    MagneticField,
}

vocabulary!(MagneticFieldFamily, "magnetic_field_family", [MagneticField]);

impl Family for MagneticFieldFamily {}

/// Per-family numeric overrides of a default value
///
/// Keys are restricted to one family vocabulary. A `null` value in the input
/// is kept as "no override" so cleared form fields round-trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FamilyExceptions<F: Family> {
    overrides: BTreeMap<F, Option<f64>>,
}

impl<F: Family> Default for FamilyExceptions<F> {
    fn default() -> Self {
        Self {
            overrides: BTreeMap::new(),
        }
    }
}

impl<F: Family> FamilyExceptions<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, family: F, value: f64) -> Self {
        self.insert(family, value);
        self
    }

    pub fn insert(&mut self, family: F, value: f64) -> Option<f64> {
        self.overrides.insert(family, Some(value)).flatten()
    }

    pub fn remove(&mut self, family: F) -> Option<f64> {
        self.overrides.remove(&family).flatten()
    }

    /// Override for a family, if one is set
    pub fn get(&self, family: F) -> Option<f64> {
        self.overrides.get(&family).copied().flatten()
    }

    /// Set overrides in canonical family order
    pub fn iter(&self) -> impl Iterator<Item = (F, f64)> + '_ {
        F::ALL
            .iter()
            .filter_map(move |family| self.get(*family).map(|value| (*family, value)))
    }

    /// Number of set overrides
    pub fn len(&self) -> usize {
        self.overrides.values().filter(|v| v.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<F: Family> FromIterator<(F, f64)> for FamilyExceptions<F> {
    fn from_iter<I: IntoIterator<Item = (F, f64)>>(iter: I) -> Self {
        let mut exceptions = Self::new();
        for (family, value) in iter {
            exceptions.insert(family, value);
        }
        exceptions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::{EnumCount, IntoEnumIterator};

    #[test]
    fn test_family_names() {
        assert_eq!(AttackFamily::FighterHw1.as_str(), "fighter_hw1");
        assert_eq!(AttackFamily::SmallCapitalShip.as_str(), "smallcapitalship");
        assert_eq!(ArmourFamily::LightArmour.as_str(), "lightarmour");
        assert_eq!(ArmourFamily::MediumArmourHw1.as_str(), "mediumarmour_hw1");
        assert_eq!(MagneticFieldFamily::MagneticField.as_str(), "MagneticField");
    }

    #[test]
    fn test_family_sizes() {
        assert_eq!(AttackFamily::ALL.len(), AttackFamily::COUNT);
        assert_eq!(AttackFamily::ALL.len(), 23);
        assert_eq!(ArmourFamily::ALL.len(), ArmourFamily::COUNT);
        assert_eq!(ArmourFamily::ALL.len(), 22);
        assert_eq!(MagneticFieldFamily::ALL.len(), 1);
    }

    #[test]
    fn test_all_is_sorted_canonically() {
        assert!(AttackFamily::iter().eq(AttackFamily::ALL.iter().copied()));
        assert!(ArmourFamily::iter().eq(ArmourFamily::ALL.iter().copied()));
        assert!(AttackFamily::ALL.windows(2).all(|w| w[0] < w[1]));
        assert!(ArmourFamily::ALL.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(ArmourFamily::ProbeArmour.ordinal(), 21);
    }

    #[test]
    fn test_exceptions_iterate_in_canonical_order() {
        let exceptions = FamilyExceptions::new()
            .with(AttackFamily::SmallMissile, 3.0)
            .with(AttackFamily::Fighter, 70.0)
            .with(AttackFamily::Frigate, 40.0);

        let order: Vec<_> = exceptions.iter().map(|(f, _)| f).collect();
        assert_eq!(
            order,
            vec![AttackFamily::Fighter, AttackFamily::Frigate, AttackFamily::SmallMissile]
        );
    }

    #[test]
    fn test_exceptions_deserialize() {
        let exceptions: FamilyExceptions<ArmourFamily> =
            serde_json::from_str(r#"{"heavyarmour": 2, "lightarmour": 5, "resarmour": null}"#)
                .unwrap();
        assert_eq!(exceptions.len(), 2);
        assert_eq!(exceptions.get(ArmourFamily::LightArmour), Some(5.0));
        assert_eq!(exceptions.get(ArmourFamily::ResArmour), None);
    }

    #[test]
    fn test_exceptions_reject_foreign_keys() {
        let err = serde_json::from_str::<FamilyExceptions<ArmourFamily>>(r#"{"fighter": 70}"#)
            .unwrap_err();
        assert!(err.to_string().contains("unknown armour_family `fighter`"));
    }

    #[test]
    fn test_exceptions_insert_and_remove() {
        let mut exceptions = FamilyExceptions::new();
        assert!(exceptions.is_empty());
        assert_eq!(exceptions.insert(MagneticFieldFamily::MagneticField, 0.5), None);
        assert_eq!(exceptions.insert(MagneticFieldFamily::MagneticField, 0.7), Some(0.5));
        assert_eq!(exceptions.remove(MagneticFieldFamily::MagneticField), Some(0.7));
        assert!(exceptions.is_empty());
    }
}
