use super::{ConfigError, ConfigProperties, PagewireConfig};

/// Settings of the pagination interceptor, read from `pagewire.pagination.*`.
///
/// ```yaml
/// pagewire:
///   pagination:
///     pattern: ".*Page$"
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationProperties {
    /// Regular expression a statement id must match (whole id) to be paginated.
    pub pattern: String,
}

impl PaginationProperties {
    pub const DEFAULT_PATTERN: &'static str = ".*Page$";
}

impl Default for PaginationProperties {
    fn default() -> Self {
        Self {
            pattern: Self::DEFAULT_PATTERN.to_string(),
        }
    }
}

impl ConfigProperties for PaginationProperties {
    fn prefix() -> &'static str {
        "pagewire.pagination"
    }

    fn from_config(config: &PagewireConfig) -> Result<Self, ConfigError> {
        let key = Self::key("pattern");
        let pattern = match config.get::<Option<String>>(&key) {
            Ok(Some(pattern)) => pattern,
            Ok(None) | Err(ConfigError::NotFound(_)) => Self::DEFAULT_PATTERN.to_string(),
            Err(err) => return Err(err),
        };
        Ok(Self { pattern })
    }
}
