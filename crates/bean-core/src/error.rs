//! Error types for bean operations
//!
//! Every failure is raised immediately by the call that caused it:
//! - Unknown property names
//! - Writes to read-only properties (unless quiet)
//! - Null values for required properties
//! - Value conversions to the wrong declared type

/// Main bean error type
#[derive(Debug, thiserror::Error)]
pub enum BeanError {
    /// Property not declared by the bean or any of its ancestors
    #[error("unknown property '{property}' on bean {bean}")]
    NoSuchProperty {
        /// Bean that was asked
        bean: &'static str,
        /// Requested property name
        property: String,
    },

    /// Write to a read-only, derived, or immutable property
    #[error("Property cannot be written: {0}")]
    ReadOnlyProperty(String),

    /// Read of a write-only property
    #[error("Property cannot be read: {0}")]
    NotReadable(String),

    /// Required property missing or set to null
    #[error("argument '{0}' must not be null")]
    NullProperty(String),

    /// Value does not convert to the declared property type
    #[error("type mismatch for property '{property}': expected {expected}, found {found}")]
    TypeMismatch {
        /// Property being written
        property: String,
        /// Declared type name
        expected: &'static str,
        /// Kind of the supplied value
        found: &'static str,
    },

    /// Nested bean could not be assembled from a value
    #[error("invalid nested bean for property '{property}': {reason}")]
    NestedBean {
        /// Property being written
        property: String,
        /// Underlying failure
        reason: String,
    },

    /// Bean instance handed to a meta-bean of another type
    #[error("bean type mismatch: expected {expected}, found {found}")]
    WrongBeanType {
        /// Meta-bean's type
        expected: &'static str,
        /// Supplied bean's type
        found: &'static str,
    },

    /// Two properties with the same name in one hierarchy
    #[error("duplicate property '{property}' in bean {bean}")]
    DuplicateProperty {
        /// Bean being assembled
        bean: &'static str,
        /// Repeated name
        property: &'static str,
    },

    /// Bean name already registered for a different type
    #[error("bean name '{0}' already registered for a different type")]
    DuplicateBeanName(&'static str),

    /// Bean name not present in the registry
    #[error("bean '{0}' is not registered")]
    UnknownBean(String),

    /// Meta-bean has no builder
    #[error("bean {0} does not support builders")]
    NotBuildable(&'static str),

    /// JSON document does not describe a bean
    #[error("invalid json for bean {bean}: {reason}")]
    InvalidJson {
        /// Target bean name
        bean: &'static str,
        /// What was wrong
        reason: String,
    },

    /// JSON encoding or decoding failed
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration text could not be parsed
    #[error("configuration error: {0}")]
    Config(#[from] toml::de::Error),
}

impl BeanError {
    /// Check if error is a lookup failure
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NoSuchProperty { .. } | Self::UnknownBean(_))
    }

    /// Unknown property on a bean
    #[must_use]
    pub fn no_such_property(bean: &'static str, property: &str) -> Self {
        Self::NoSuchProperty {
            bean,
            property: property.to_string(),
        }
    }

    /// Property name the error refers to, if any
    #[must_use]
    pub fn property(&self) -> Option<&str> {
        match self {
            Self::NoSuchProperty { property, .. }
            | Self::TypeMismatch { property, .. }
            | Self::NestedBean { property, .. } => Some(property.as_str()),
            Self::ReadOnlyProperty(property)
            | Self::NotReadable(property)
            | Self::NullProperty(property) => Some(property.as_str()),
            Self::DuplicateProperty { property, .. } => Some(*property),
            _ => None,
        }
    }
}

/// Raw value conversion failures
///
/// Carries no property name; [`ValueError::for_property`] attaches one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    /// Null supplied where a value is required
    #[error("value must not be null")]
    Null,

    /// Value of the wrong kind
    #[error("expected {expected}, found {found}")]
    Mismatch {
        /// Declared type name
        expected: &'static str,
        /// Kind of the supplied value
        found: &'static str,
    },

    /// Nested bean could not be built
    #[error("nested bean: {0}")]
    Nested(String),
}

impl ValueError {
    /// Convert into a [`BeanError`] naming the property
    #[must_use]
    pub fn for_property(self, property: &str) -> BeanError {
        match self {
            Self::Null => BeanError::NullProperty(property.to_string()),
            Self::Mismatch { expected, found } => BeanError::TypeMismatch {
                property: property.to_string(),
                expected,
                found,
            },
            Self::Nested(reason) => BeanError::NestedBean {
                property: property.to_string(),
                reason,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_only_message_names_property() {
        let err = BeanError::ReadOnlyProperty("fieldFinal".to_string());
        assert_eq!(err.to_string(), "Property cannot be written: fieldFinal");
    }

    #[test]
    fn value_error_null_maps_to_null_property() {
        let err = ValueError::Null.for_property("aliases");
        assert!(matches!(err, BeanError::NullProperty(ref p) if p == "aliases"));
        assert_eq!(err.property(), Some("aliases"));
    }

    #[test]
    fn value_error_mismatch_keeps_types() {
        let err = ValueError::Mismatch {
            expected: "int",
            found: "string",
        }
        .for_property("numberOfCars");
        assert_eq!(
            err.to_string(),
            "type mismatch for property 'numberOfCars': expected int, found string"
        );
    }

    #[test]
    fn not_found_classification() {
        let err = BeanError::NoSuchProperty {
            bean: "Person",
            property: "age".to_string(),
        };
        assert!(err.is_not_found());
        assert!(!BeanError::NotBuildable("Person").is_not_found());
    }
}
