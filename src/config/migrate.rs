//! Configuration file upgrades: detect and fill keys added by newer releases.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

/// Keys a complete configuration carries, in file order.
pub const KNOWN_KEYS: &[&str] = &[
    "database",
    "sheet_id",
    "sheet_name",
    "max_students",
    "roster",
    "poll_interval_ms",
    "connect_retry_ms",
    "post_scan_delay_ms",
    "seed",
];

fn read_mapping(path: &Path) -> AppResult<Mapping> {
    let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
    let yaml: Value = serde_yaml::from_str(&content)
        .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))?;

    match yaml {
        Value::Mapping(map) => Ok(map),
        Value::Null => Ok(Mapping::new()),
        _ => Err(AppError::Config(format!(
            "{}: expected a mapping at top level",
            path.display()
        ))),
    }
}

/// Keys absent from the file at `path`.
pub fn missing_keys(path: &Path) -> AppResult<Vec<&'static str>> {
    let map = read_mapping(path)?;
    Ok(KNOWN_KEYS
        .iter()
        .copied()
        .filter(|k| !map.contains_key(Value::String(k.to_string())))
        .collect())
}

/// Add every missing key with its default value.
/// Returns the keys that were written; existing values are never touched.
pub fn fill_missing_keys(path: &Path) -> AppResult<Vec<&'static str>> {
    let mut map = read_mapping(path)?;
    let defaults = serde_yaml::to_value(Config::default()).map_err(|_| AppError::ConfigSave)?;

    let Value::Mapping(defaults) = defaults else {
        return Err(AppError::ConfigSave);
    };

    let mut added = Vec::new();
    for key in KNOWN_KEYS {
        let k = Value::String(key.to_string());
        if map.contains_key(&k) {
            continue;
        }
        let v = defaults.get(&k).cloned().unwrap_or(Value::Null);
        map.insert(k, v);
        added.push(*key);
    }

    if added.is_empty() {
        info("Configuration is up to date.");
        return Ok(added);
    }

    let serialized =
        serde_yaml::to_string(&Value::Mapping(map)).map_err(|_| AppError::ConfigSave)?;
    fs::write(path, serialized).map_err(|_| AppError::ConfigSave)?;

    success(format!("Added to configuration: {}", added.join(", ")));
    Ok(added)
}
