//! wga-config
//!
//! Operator options: a small persisted record consumed read-only by the
//! rest of the system for behavior toggles. Supports layered loading
//! (defaults <- file <- overrides, later paths win) from JSON or YAML, and
//! a canonical-JSON SHA-256 hash of the effective options so a comparison
//! run can record exactly which settings it ran under.
//!
//! Unknown keys are rejected at load: a key nothing reads is either a typo
//! or dead weight, and silently accepting it hides both.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

/// The persisted options record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    pub auto_scroll_to_results: bool,
    pub show_summary_stats: bool,
    pub log_activity: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            auto_scroll_to_results: true,
            show_summary_stats: true,
            log_activity: true,
        }
    }
}

fn read_value(path: &Path) -> Result<Value> {
    let text =
        fs::read_to_string(path).with_context(|| format!("read options file {path:?}"))?;
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") {
        serde_yaml::from_str(&text).with_context(|| format!("parse YAML options {path:?}"))
    } else {
        serde_json::from_str(&text).with_context(|| format!("parse JSON options {path:?}"))
    }
}

/// Merge `overlay` onto `base`: objects merge key-wise, everything else is
/// replaced by the overlay value.
fn merge_value(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(slot) => merge_value(slot, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

/// Load options from zero or more files layered over the defaults.
/// Later paths win. Missing files are errors; an empty path list yields the
/// defaults.
pub fn load_layered<P: AsRef<Path>>(paths: &[P]) -> Result<Options> {
    let mut effective =
        serde_json::to_value(Options::default()).context("serialize default options")?;
    for path in paths {
        let overlay = read_value(path.as_ref())?;
        merge_value(&mut effective, overlay);
    }
    serde_json::from_value(effective).context("effective options do not match the schema")
}

/// Load a single options file, or defaults when `path` is `None`.
pub fn load_options(path: Option<&Path>) -> Result<Options> {
    match path {
        Some(p) => load_layered(&[p]),
        None => Ok(Options::default()),
    }
}

/// Persist options as pretty JSON.
pub fn save_options(path: &Path, options: &Options) -> Result<()> {
    let mut text =
        serde_json::to_string_pretty(options).context("serialize options")?;
    text.push('\n');
    fs::write(path, text).with_context(|| format!("write options file {path:?}"))
}

/// Canonical JSON of the effective options. serde_json's default map is
/// sorted, so the output is byte-stable.
pub fn canonical_json(options: &Options) -> Result<String> {
    let value = serde_json::to_value(options).context("serialize options")?;
    serde_json::to_string(&value).context("render canonical options JSON")
}

/// SHA-256 of the canonical options JSON, hex-encoded.
pub fn options_hash(options: &Options) -> Result<String> {
    let json = canonical_json(options)?;
    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}
