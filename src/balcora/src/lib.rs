//! # balcora
//!
//! Homeworld weapon configuration library - model, validation, and Lua export.
//!
//! This library provides functionality to:
//! - Describe a weapon and its optional sections with typed vocabularies
//! - Load partially filled configurations from the editor (JSON or YAML)
//! - Validate a configuration before export
//! - Emit the engine's `StartWeaponConfig`/`set*` weapon script
//! - Write scripts to disk with hash-tracked backups
//!
//! ## Example
//!
//! ```no_run
//! use std::fs;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let json = fs::read_to_string("hgn_ioncannon.json")?;
//! let weapon = balcora::WeaponExt::from_json(&json)?;
//!
//! let report = balcora::validate(&weapon);
//! for finding in &report.findings {
//!     println!("{}", finding);
//! }
//!
//! let script = balcora::weapon_to_lua(&weapon)?;
//! let export = balcora::Export::lua(script, weapon.weapon.name.as_deref());
//! balcora::write_export(&export, "out".as_ref(), true)?;
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod lua;
pub mod reference;
pub mod validate;
pub mod weapon;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used items
#[doc(inline)]
pub use export::{write_export, Export, ExportError, ExportOutcome};
#[doc(inline)]
pub use lua::{statements, weapon_to_lua, EmitError, Statement};
#[doc(inline)]
pub use validate::{validate, Finding, Severity, ValidationReport};
#[doc(inline)]
pub use weapon::{InputFormat, ParseError, Weapon, WeaponExt};

// Vocabularies (weapon kinds, result enums, families)
#[doc(inline)]
pub use reference::{
    vocabularies, vocabulary_by_name, ActivationContext, ArmourFamily, AttackFamily, Family,
    MagneticFieldFamily, MissileFireAxis, ProjectileType, ResultCondition, ResultEffect,
    ResultTarget, ShieldPenetrationMode, Vocabulary, VocabularyListing, WeaponType,
};
#[doc(inline)]
pub use reference::family::FamilyExceptions;
