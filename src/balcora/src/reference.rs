//! Reference vocabularies for Homeworld weapon definitions
//!
//! Closed, ordered lists of identifiers the engine understands: weapon and
//! projectile kinds, activation contexts, shield penetration modes, weapon
//! result enums and the attack/armour/field families used by the per-family
//! override tables. Order matters: it is the order overrides are emitted in.

pub mod family;
pub mod result;
pub mod weapon;

pub use family::{ArmourFamily, AttackFamily, Family, MagneticFieldFamily};
pub use result::{ResultCondition, ResultEffect, ResultTarget};
pub use weapon::{
    ActivationContext, MissileFireAxis, ProjectileType, ShieldPenetrationMode, WeaponType,
};

/// A closed enumeration of engine identifiers
///
/// `ALL` is the canonical order. Parsing (`FromStr`) is the membership test.
pub trait Vocabulary: Copy + Eq + std::str::FromStr + Into<&'static str> + 'static {
    /// Name used when listing vocabularies
    const NAME: &'static str;

    /// Every member, in canonical order
    const ALL: &'static [Self];

    /// Engine identifier for this member
    fn as_str(self) -> &'static str {
        self.into()
    }

    /// Position of this member in the canonical order
    fn ordinal(self) -> usize {
        Self::ALL
            .iter()
            .position(|v| *v == self)
            .unwrap_or(Self::ALL.len())
    }

    /// Whether `name` is a member of this vocabulary
    fn contains(name: &str) -> bool {
        name.parse::<Self>().is_ok()
    }
}

/// Implements `TryFrom<String>` (used by serde) and [`Vocabulary`] for a
/// strum-derived enum.
macro_rules! vocabulary {
    ($ty:ty, $name:literal, [$($variant:ident),+ $(,)?]) => {
        impl $crate::reference::Vocabulary for $ty {
            const NAME: &'static str = $name;
            const ALL: &'static [Self] = &[$(<$ty>::$variant),+];
        }

        impl TryFrom<String> for $ty {
            type Error = String;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse().map_err(|_| {
                    format!(
                        "unknown {} `{}`, expected one of: {}",
                        $name,
                        value,
                        <$ty as $crate::reference::Vocabulary>::ALL
                            .iter()
                            .map(|v| <&'static str>::from(*v))
                            .collect::<Vec<_>>()
                            .join(", ")
                    )
                })
            }
        }
    };
}
pub(crate) use vocabulary;

/// A vocabulary listing: name plus members in canonical order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabularyListing {
    pub name: &'static str,
    pub members: Vec<&'static str>,
}

fn listing<V: Vocabulary>() -> VocabularyListing {
    VocabularyListing {
        name: V::NAME,
        members: V::ALL.iter().map(|v| v.as_str()).collect(),
    }
}

/// All string vocabularies, in the order the editor presents them
pub fn vocabularies() -> Vec<VocabularyListing> {
    vec![
        listing::<WeaponType>(),
        listing::<ProjectileType>(),
        listing::<ActivationContext>(),
        listing::<ShieldPenetrationMode>(),
        listing::<ResultCondition>(),
        listing::<ResultEffect>(),
        listing::<ResultTarget>(),
        listing::<AttackFamily>(),
        listing::<ArmourFamily>(),
        listing::<MagneticFieldFamily>(),
    ]
}

/// Look up a vocabulary by name (case-insensitive)
pub fn vocabulary_by_name(name: &str) -> Option<VocabularyListing> {
    vocabularies()
        .into_iter()
        .find(|v| v.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_lookup() {
        let weapon_types = vocabulary_by_name("weapon_type").unwrap();
        assert_eq!(weapon_types.members, vec!["gimble", "animatedturret", "fixed"]);
        assert!(vocabulary_by_name("ATTACK_FAMILY").is_some());
        assert!(vocabulary_by_name("nonsense").is_none());
    }

    #[test]
    fn test_vocabulary_names_are_unique() {
        let all = vocabularies();
        for (i, v) in all.iter().enumerate() {
            assert!(all[i + 1..].iter().all(|o| o.name != v.name), "{}", v.name);
        }
    }

    #[test]
    fn test_members_are_distinct() {
        for v in vocabularies() {
            let mut sorted = v.members.clone();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted.len(), v.members.len(), "duplicate in {}", v.name);
        }
    }

    #[test]
    fn test_contains() {
        assert!(ActivationContext::contains("special attack"));
        assert!(!ActivationContext::contains("special_attack"));
        assert!(ArmourFamily::contains("lightarmour"));
        assert!(!AttackFamily::contains("lightarmour"));
    }
}
