use super::{ConfigError, PagewireConfig};

/// Trait for strongly-typed configuration sections.
///
/// ```ignore
/// impl ConfigProperties for PaginationProperties {
///     fn prefix() -> &'static str { "pagewire.pagination" }
///     fn from_config(config: &PagewireConfig) -> Result<Self, ConfigError> { ... }
/// }
/// ```
pub trait ConfigProperties: Sized {
    /// The configuration key prefix (e.g., `"pagewire.pagination"`).
    fn prefix() -> &'static str;

    /// Construct from a `PagewireConfig` instance.
    fn from_config(config: &PagewireConfig) -> Result<Self, ConfigError>;

    /// Absolute key for a property of this section.
    fn key(property: &str) -> String {
        format!("{}.{property}", Self::prefix())
    }
}
