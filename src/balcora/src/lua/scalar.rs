//! Scalar argument formatting
//!
//! The engine reads whatever the editor historically wrote, so numbers follow
//! the JavaScript `Number.prototype.toString` rules (shortest round-trip
//! digits, exponent form only below `1e-6` or from `1e21` up) rather than
//! Rust's own `Display`.

use std::fmt;

use crate::reference::{
    ActivationContext, ArmourFamily, AttackFamily, MagneticFieldFamily, MissileFireAxis,
    ProjectileType, ResultCondition, ResultEffect, ResultTarget, ShieldPenetrationMode,
    Vocabulary, WeaponType,
};

/// Token emitted for a field the form never filled in
pub const UNDEFINED: &str = "undefined";

/// One positional argument of an emitted call
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LuaScalar<'a> {
    /// Rendered as `1` or `0`
    Bool(bool),
    Number(f64),
    /// Rendered inside double quotes, without escaping
    Str(&'a str),
    /// An absent value, rendered as the bare `undefined` token
    Undefined,
}

impl fmt::Display for LuaScalar<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(true) => f.write_str("1"),
            Self::Bool(false) => f.write_str("0"),
            Self::Number(n) => f.write_str(&format_number(*n)),
            Self::Str(s) => write!(f, "\"{}\"", s),
            Self::Undefined => f.write_str(UNDEFINED),
        }
    }
}

impl From<bool> for LuaScalar<'_> {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for LuaScalar<'_> {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl<'a> From<&'a str> for LuaScalar<'a> {
    fn from(value: &'a str) -> Self {
        Self::Str(value)
    }
}

impl<'a> From<&'a String> for LuaScalar<'a> {
    fn from(value: &'a String) -> Self {
        Self::Str(value.as_str())
    }
}

impl From<MissileFireAxis> for LuaScalar<'_> {
    fn from(value: MissileFireAxis) -> Self {
        Self::Number(f64::from(value.value()))
    }
}

impl<'a, T> From<Option<T>> for LuaScalar<'a>
where
    T: Into<LuaScalar<'a>>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Undefined, Into::into)
    }
}

macro_rules! vocabulary_scalar {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for LuaScalar<'_> {
                fn from(value: $ty) -> Self {
                    Self::Str(value.as_str())
                }
            }
        )+
    };
}

vocabulary_scalar!(
    WeaponType,
    ProjectileType,
    ActivationContext,
    ShieldPenetrationMode,
    ResultCondition,
    ResultEffect,
    ResultTarget,
    AttackFamily,
    ArmourFamily,
    MagneticFieldFamily,
);

/// JavaScript truthiness of a number: zero and NaN are false
pub fn is_truthy(value: f64) -> bool {
    value != 0.0 && !value.is_nan()
}

/// Format a number the way JavaScript's default `toString` does
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        // covers -0 as well
        return "0".to_string();
    }

    let sign = if value < 0.0 { "-" } else { "" };

    // Rust's `{:e}` yields the shortest round-trip digits: "1.2345e2"
    let sci = format!("{:e}", value.abs());
    let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();

    let k = digits.len() as i32;
    let n = exponent + 1;

    let body = if k <= n && n <= 21 {
        format!("{}{}", digits, "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (int, frac) = digits.split_at(n as usize);
        format!("{}.{}", int, frac)
    } else if -6 < n && n <= 0 {
        format!("0.{}{}", "0".repeat((-n) as usize), digits)
    } else {
        let e = n - 1;
        let e_sign = if e >= 0 { '+' } else { '-' };
        let (first, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{}e{}{}", first, e_sign, e.abs())
        } else {
            format!("{}.{}e{}{}", first, rest, e_sign, e.abs())
        }
    };

    format!("{}{}", sign, body)
}
