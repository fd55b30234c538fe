use std::collections::HashMap;
use std::path::Path;

use super::value::ConfigValue;
use super::ConfigError;

/// Load a YAML file into `values`. A missing file is not an error.
pub(crate) fn load_yaml_file(
    path: &Path,
    values: &mut HashMap<String, ConfigValue>,
) -> Result<(), ConfigError> {
    if !path.exists() {
        return Ok(());
    }
    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::Load(format!("{}: {e}", path.display())))?;
    load_yaml_str(&content, values)
}

/// Parse YAML text and merge it into `values` under dot-separated keys.
pub(crate) fn load_yaml_str(
    content: &str,
    values: &mut HashMap<String, ConfigValue>,
) -> Result<(), ConfigError> {
    let yaml: serde_yaml::Value =
        serde_yaml::from_str(content).map_err(|e| ConfigError::Load(e.to_string()))?;
    flatten("", &yaml, values);
    Ok(())
}

fn flatten(prefix: &str, value: &serde_yaml::Value, out: &mut HashMap<String, ConfigValue>) {
    match value {
        serde_yaml::Value::Mapping(map) => {
            for (k, v) in map {
                let segment = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    other => format!("{other:?}"),
                };
                let key = if prefix.is_empty() {
                    segment
                } else {
                    format!("{prefix}.{segment}")
                };
                flatten(&key, v, out);
            }
        }
        // Lists are kept whole under their own key.
        leaf if !prefix.is_empty() => {
            out.insert(prefix.to_string(), ConfigValue::from_yaml(leaf));
        }
        _ => {}
    }
}

/// Load a dotenv file into the process environment without replacing
/// variables that are already set. A missing file is not an error.
pub(crate) fn load_dotenv(path: &Path) -> Result<(), ConfigError> {
    match dotenvy::from_path(path) {
        Ok(()) => Ok(()),
        Err(dotenvy::Error::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(ConfigError::Load(format!("{}: {err}", path.display()))),
    }
}

/// Overlay process environment variables: `PAGEWIRE_PAGINATION_PATTERN`
/// becomes `pagewire.pagination.pattern`.
pub(crate) fn overlay_env(values: &mut HashMap<String, ConfigValue>) {
    for (name, value) in std::env::vars() {
        values.insert(name.to_lowercase().replace('_', "."), ConfigValue::String(value));
    }
}
