//! WebAssembly bindings for balcora
//!
//! The editor's form state arrives as a JSON string; everything returned is a
//! plain string or array so the browser shell needs no glue types.

use crate::export::Export;
use crate::lua::weapon_to_lua as rust_weapon_to_lua;
use crate::reference::vocabulary_by_name;
use crate::validate::validate;
use crate::weapon::WeaponExt;
use wasm_bindgen::prelude::*;

fn parse(json: &str) -> Result<WeaponExt, JsValue> {
    WeaponExt::from_json(json).map_err(|e| JsValue::from_str(&format!("Parse failed: {}", e)))
}

/// Convert editor form state to a Lua weapon script
///
/// # Arguments
/// * `json` - The weapon configuration as JSON
///
/// # Returns
/// The script text, or an error string when a required section is missing
#[wasm_bindgen(js_name = weaponToLua)]
pub fn weapon_to_lua(json: &str) -> Result<String, JsValue> {
    let weapon = parse(json)?;
    rust_weapon_to_lua(&weapon).map_err(|e| JsValue::from_str(&format!("Export failed: {}", e)))
}

/// Validate editor form state
///
/// Returns one `severity: path: message` string per finding.
#[wasm_bindgen(js_name = validateWeapon)]
pub fn validate_weapon(json: &str) -> Result<js_sys::Array, JsValue> {
    let weapon = parse(json)?;
    let findings = js_sys::Array::new();
    for finding in validate(&weapon).findings {
        findings.push(&JsValue::from_str(&finding.to_string()));
    }
    Ok(findings)
}

/// Members of a vocabulary, in canonical order (e.g. `armour_family`)
#[wasm_bindgen(js_name = vocabulary)]
pub fn vocabulary(name: &str) -> Option<js_sys::Array> {
    vocabulary_by_name(name).map(|listing| {
        let members = js_sys::Array::new();
        for member in listing.members {
            members.push(&JsValue::from_str(member));
        }
        members
    })
}

/// File name the download should use for a stem (empty → `balcora.lua`)
#[wasm_bindgen(js_name = exportFileName)]
pub fn export_file_name(stem: &str) -> String {
    Export::lua(String::new(), Some(stem)).file_name()
}
