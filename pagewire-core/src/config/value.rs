use super::ConfigError;

/// A single configuration value that can be converted to various types.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
    List(Vec<ConfigValue>),
}

impl ConfigValue {
    pub(crate) fn from_yaml(value: &serde_yaml::Value) -> Self {
        match value {
            serde_yaml::Value::Bool(b) => ConfigValue::Bool(*b),
            serde_yaml::Value::Number(n) => match (n.as_i64(), n.as_f64()) {
                (Some(i), _) => ConfigValue::Integer(i),
                (None, Some(f)) => ConfigValue::Float(f),
                _ => ConfigValue::String(n.to_string()),
            },
            serde_yaml::Value::String(s) => ConfigValue::String(s.clone()),
            serde_yaml::Value::Null => ConfigValue::Null,
            serde_yaml::Value::Sequence(seq) => {
                ConfigValue::List(seq.iter().map(ConfigValue::from_yaml).collect())
            }
            other => ConfigValue::String(format!("{other:?}")),
        }
    }

    fn mismatch(key: &str, expected: &'static str) -> ConfigError {
        ConfigError::TypeMismatch {
            key: key.to_string(),
            expected,
        }
    }
}

/// Trait for converting a `ConfigValue` into a concrete type.
pub trait FromConfigValue: Sized {
    fn from_config_value(value: &ConfigValue, key: &str) -> Result<Self, ConfigError>;
}

impl FromConfigValue for String {
    fn from_config_value(value: &ConfigValue, key: &str) -> Result<Self, ConfigError> {
        match value {
            ConfigValue::String(s) => Ok(s.clone()),
            ConfigValue::Integer(i) => Ok(i.to_string()),
            ConfigValue::Float(f) => Ok(f.to_string()),
            ConfigValue::Bool(b) => Ok(b.to_string()),
            ConfigValue::Null | ConfigValue::List(_) => {
                Err(ConfigValue::mismatch(key, "String"))
            }
        }
    }
}

impl FromConfigValue for i64 {
    fn from_config_value(value: &ConfigValue, key: &str) -> Result<Self, ConfigError> {
        match value {
            ConfigValue::Integer(i) => Ok(*i),
            ConfigValue::String(s) => s.trim().parse().map_err(|_| ConfigValue::mismatch(key, "i64")),
            _ => Err(ConfigValue::mismatch(key, "i64")),
        }
    }
}

impl FromConfigValue for bool {
    fn from_config_value(value: &ConfigValue, key: &str) -> Result<Self, ConfigError> {
        match value {
            ConfigValue::Bool(b) => Ok(*b),
            ConfigValue::String(s) => match s.to_lowercase().as_str() {
                "true" | "1" | "yes" => Ok(true),
                "false" | "0" | "no" => Ok(false),
                _ => Err(ConfigValue::mismatch(key, "bool")),
            },
            _ => Err(ConfigValue::mismatch(key, "bool")),
        }
    }
}

impl<T: FromConfigValue> FromConfigValue for Option<T> {
    fn from_config_value(value: &ConfigValue, key: &str) -> Result<Self, ConfigError> {
        match value {
            ConfigValue::Null => Ok(None),
            v => T::from_config_value(v, key).map(Some),
        }
    }
}

impl<T: FromConfigValue> FromConfigValue for Vec<T> {
    fn from_config_value(value: &ConfigValue, key: &str) -> Result<Self, ConfigError> {
        match value {
            ConfigValue::List(items) => items
                .iter()
                .enumerate()
                .map(|(i, v)| T::from_config_value(v, &format!("{key}[{i}]")))
                .collect(),
            other => Ok(vec![T::from_config_value(other, key)?]),
        }
    }
}

// Unsigned types go through i64 with a range check.
macro_rules! impl_from_config_unsigned {
    ($($ty:ty),+) => {
        $(
            impl FromConfigValue for $ty {
                fn from_config_value(value: &ConfigValue, key: &str) -> Result<Self, ConfigError> {
                    let i = i64::from_config_value(value, key)?;
                    <$ty>::try_from(i).map_err(|_| ConfigValue::mismatch(key, stringify!($ty)))
                }
            }
        )+
    };
}

impl_from_config_unsigned!(u32, u64, usize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_from_scalars() {
        assert_eq!(String::from_config_value(&ConfigValue::Integer(7), "k").unwrap(), "7");
        assert_eq!(String::from_config_value(&ConfigValue::Bool(false), "k").unwrap(), "false");
        assert!(String::from_config_value(&ConfigValue::Null, "k").is_err());
    }

    #[test]
    fn test_unsigned_range_check() {
        assert_eq!(u32::from_config_value(&ConfigValue::Integer(20), "k").unwrap(), 20);
        let err = u32::from_config_value(&ConfigValue::Integer(-1), "size").unwrap_err();
        assert!(matches!(err, ConfigError::TypeMismatch { expected: "u32", .. }));
    }

    #[test]
    fn test_bool_from_env_style_strings() {
        assert!(bool::from_config_value(&ConfigValue::String("YES".into()), "k").unwrap());
        assert!(!bool::from_config_value(&ConfigValue::String("0".into()), "k").unwrap());
        assert!(bool::from_config_value(&ConfigValue::String("maybe".into()), "k").is_err());
    }
}
