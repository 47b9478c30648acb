//! JSON serialization settings

use crate::error::BeanError;
use serde::{Deserialize, Serialize};

/// Settings for [`JsonSerializer`](crate::json::JsonSerializer)
///
/// Loadable from TOML; missing keys take their defaults.
///
/// ```toml
/// pretty = true
/// type_key = "@type"
/// include_nulls = false
/// ignore_unknown = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JsonConfig {
    /// Pretty-print output
    pub pretty: bool,
    /// Object key carrying the bean name, if any
    pub type_key: Option<String>,
    /// Write null-valued properties instead of omitting them
    pub include_nulls: bool,
    /// Skip unknown keys when reading instead of failing
    pub ignore_unknown: bool,
}

impl JsonConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from TOML text
    ///
    /// # Errors
    /// Returns [`BeanError::Config`] if the text is not valid TOML for this
    /// struct
    pub fn from_toml_str(text: &str) -> Result<Self, BeanError> {
        Ok(toml::from_str(text)?)
    }

    /// With pretty printing
    #[inline]
    #[must_use]
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// With type key
    #[inline]
    #[must_use]
    pub fn with_type_key(mut self, key: impl Into<String>) -> Self {
        self.type_key = Some(key.into());
        self
    }

    /// Without type key
    #[inline]
    #[must_use]
    pub fn without_type_key(mut self) -> Self {
        self.type_key = None;
        self
    }

    /// With null output
    #[inline]
    #[must_use]
    pub fn with_include_nulls(mut self, include: bool) -> Self {
        self.include_nulls = include;
        self
    }

    /// With unknown key handling
    #[inline]
    #[must_use]
    pub fn with_ignore_unknown(mut self, ignore: bool) -> Self {
        self.ignore_unknown = ignore;
        self
    }
}

impl Default for JsonConfig {
    fn default() -> Self {
        Self {
            pretty: false,
            type_key: Some("@type".to_string()),
            include_nulls: false,
            ignore_unknown: false,
        }
    }
}
