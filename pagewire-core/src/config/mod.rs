mod loader;
pub mod pagination;
pub mod typed;
pub mod value;

use std::collections::HashMap;
use std::ops::Deref;
use std::path::Path;

pub use pagination::PaginationProperties;
pub use typed::ConfigProperties;
pub use value::{ConfigValue, FromConfigValue};

/// Environment variable selecting the active profile.
pub const PROFILE_ENV: &str = "PAGEWIRE_PROFILE";

#[derive(Debug)]
pub enum ConfigError {
    NotFound(String),
    TypeMismatch { key: String, expected: &'static str },
    /// A configuration file could not be read or is not valid YAML.
    Load(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NotFound(key) => write!(f, "no configuration value for `{key}`"),
            ConfigError::TypeMismatch { key, expected } => {
                write!(f, "configuration value `{key}` is not a valid {expected}")
            }
            ConfigError::Load(msg) => write!(f, "failed to load configuration: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Key/value settings for pagewire, flattened to dot-separated keys.
///
/// Sources are layered, later ones winning:
///
/// | Layer | Source |
/// |-------|--------|
/// | 1 | `application.yaml` |
/// | 2 | `application-{profile}.yaml` |
/// | 3 | `.env`, then `.env.{profile}` (never replacing variables already set in the process) |
/// | 4 | process environment, `PAGEWIRE_PAGINATION_PATTERN` → `pagewire.pagination.pattern` |
///
/// The active profile is `PAGEWIRE_PROFILE` when set, the `profile`
/// argument otherwise. A section type `T` (see [`ConfigProperties`]) can be
/// attached with [`with_typed`](PagewireConfig::with_typed) and is reached
/// through `Deref`.
#[derive(Debug, Clone)]
pub struct PagewireConfig<T = ()> {
    values: HashMap<String, ConfigValue>,
    profile: String,
    typed: T,
}

impl PagewireConfig {
    fn with_values(values: HashMap<String, ConfigValue>, profile: impl Into<String>) -> Self {
        PagewireConfig {
            values,
            profile: profile.into(),
            typed: (),
        }
    }

    /// Load the layered configuration from the working directory.
    pub fn load(profile: &str) -> Result<Self, ConfigError> {
        Self::load_from_dir(Path::new("."), profile)
    }

    /// Load the layered configuration, reading YAML and `.env` files from `dir`.
    pub fn load_from_dir(dir: &Path, profile: &str) -> Result<Self, ConfigError> {
        let profile = std::env::var(PROFILE_ENV).unwrap_or_else(|_| profile.to_string());

        let mut values = HashMap::new();
        for file in ["application.yaml".to_string(), format!("application-{profile}.yaml")] {
            loader::load_yaml_file(&dir.join(file), &mut values)?;
        }
        // dotenv never replaces a set variable: the profile file goes first.
        for file in [format!(".env.{profile}"), ".env".to_string()] {
            loader::load_dotenv(&dir.join(file))?;
        }
        loader::overlay_env(&mut values);

        tracing::debug!(profile = %profile, keys = values.len(), "configuration loaded");
        Ok(Self::with_values(values, profile))
    }

    /// Build a config from YAML text alone, without files or environment.
    pub fn from_yaml_str(yaml: &str, profile: &str) -> Result<Self, ConfigError> {
        let mut values = HashMap::new();
        loader::load_yaml_str(yaml, &mut values)?;
        Ok(Self::with_values(values, profile))
    }

    /// A config with no keys under the `test` profile.
    pub fn empty() -> Self {
        Self::with_values(HashMap::new(), "test")
    }

    /// Set a value programmatically.
    pub fn set(&mut self, key: &str, value: ConfigValue) {
        self.values.insert(key.to_string(), value);
    }

    /// Attach the section `C`, read from the current values.
    ///
    /// ```ignore
    /// let config = PagewireConfig::load("dev")?.with_typed::<PaginationProperties>()?;
    /// let interceptor = PaginationInterceptor::new(&config.pattern)?;
    /// ```
    pub fn with_typed<C: ConfigProperties>(self) -> Result<PagewireConfig<C>, ConfigError> {
        let typed = C::from_config(&self)?;
        let PagewireConfig { values, profile, .. } = self;
        Ok(PagewireConfig { values, profile, typed })
    }
}

impl<T> PagewireConfig<T> {
    /// Read `key` (dot-separated) as `V`.
    pub fn get<V: FromConfigValue>(&self, key: &str) -> Result<V, ConfigError> {
        let value = self
            .values
            .get(key)
            .ok_or_else(|| ConfigError::NotFound(key.to_string()))?;
        V::from_config_value(value, key)
    }

    /// Like [`get`](Self::get), falling back to `default` on any error.
    pub fn get_or<V: FromConfigValue>(&self, key: &str, default: V) -> V {
        self.get(key).unwrap_or(default)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// The active profile name.
    pub fn profile(&self) -> &str {
        &self.profile
    }

    pub fn typed(&self) -> &T {
        &self.typed
    }

    /// Downgrade to a raw (untyped) config, discarding the typed layer.
    pub fn raw(&self) -> PagewireConfig {
        PagewireConfig::with_values(self.values.clone(), self.profile.clone())
    }
}

impl<T> Deref for PagewireConfig<T> {
    type Target = T;
    fn deref(&self) -> &T {
        &self.typed
    }
}
