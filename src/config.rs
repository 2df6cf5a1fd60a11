use crate::error::{PersonaError, Result};
use crate::types::config::PersonaConfig;
use std::path::{Path, PathBuf};
use toml::map::Map;
use toml::Value;

pub const DEFAULT_CONFIG_FILE: &str = "persona.toml";
pub const DEFAULT_LOCAL_FILE: &str = ".persona/local.toml";
pub const DEFAULT_GLOBAL_CONFIG_FILE: &str = ".config/persona/config.toml";

/// Loads `persona.toml` from `root`, layered over the global file and under the local
/// override. Returns `None` when the root has no `persona.toml`.
pub fn load_config(root: &Path) -> Result<Option<PersonaConfig>> {
    let global = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_GLOBAL_CONFIG_FILE));
    load_config_with_global(root, global.as_deref())
}

pub(crate) fn load_config_with_global(
    root: &Path,
    global_path: Option<&Path>,
) -> Result<Option<PersonaConfig>> {
    let root_path = root.join(DEFAULT_CONFIG_FILE);
    if !root_path.exists() {
        return Ok(None);
    }

    let mut merged = Value::Table(Map::new());
    if let Some(path) = global_path {
        merge_file_if_exists(&mut merged, path)?;
    }
    merge_file_if_exists(&mut merged, &root_path)?;
    merge_file_if_exists(&mut merged, &root.join(DEFAULT_LOCAL_FILE))?;

    let cfg: PersonaConfig = merged
        .try_into()
        .map_err(|e: toml::de::Error| PersonaError::ConfigParse(e.to_string()))?;
    cfg.validate()?;
    Ok(Some(cfg))
}

/// Overlays one layer onto `merged`. Callers apply global, then `persona.toml`, then
/// `.persona/local.toml`, so later layers win.
fn merge_file_if_exists(merged: &mut Value, path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    let value = read_toml_value(path)?;
    merge_toml(merged, value);
    Ok(())
}

fn read_toml_value(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| PersonaError::ConfigParse(format!("{}: {}", path.display(), e)))
}

/// Tables merge key by key; any other value in `overlay` replaces the one in `base`.
/// A `[data]` table in `persona.toml` therefore keeps a global `norms` path.
fn merge_toml(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Table(base_table), Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => {
            *slot = value;
        }
    }
}
