//! Dynamic property values
//!
//! [`Value`] is what string-keyed property access reads and writes.
//! [`PropertyValue`] converts typed Rust fields to and from it.

use crate::bean::BeanRef;
use crate::error::{BeanError, ValueError};
use crate::flexi::FlexiBean;
use crate::hash::{HashCode, NULL_HASH};
use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

/// Dynamically typed property value
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// Absent value
    #[default]
    Null,

    /// Boolean
    Bool(bool),

    /// 32-bit integer
    Int(i32),

    /// 64-bit integer
    Long(i64),

    /// Double-precision float (compared by bit pattern)
    Double(f64),

    /// String
    Str(String),

    /// Ordered list
    List(Vec<Value>),

    /// String-keyed map, sorted by key
    Map(BTreeMap<String, Value>),

    /// Open-ended flexi bean
    Flexi(FlexiBean),

    /// Nested bean
    Bean(BeanRef),
}

impl Value {
    /// Short name of the value's kind (used in error messages)
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Long(_) => "long",
            Self::Double(_) => "double",
            Self::Str(_) => "string",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Flexi(_) => "flexi",
            Self::Bean(_) => "bean",
        }
    }

    /// Check if value is null
    #[inline]
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Borrow as string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Integer view of `Int` and `Long`
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(i64::from(*v)),
            Self::Long(v) => Some(*v),
            _ => None,
        }
    }

    /// Borrow as list
    #[inline]
    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Borrow nested bean
    #[inline]
    #[must_use]
    pub fn as_bean(&self) -> Option<&BeanRef> {
        match self {
            Self::Bean(bean) => Some(bean),
            _ => None,
        }
    }

    fn mismatch(&self, expected: &'static str) -> ValueError {
        if self.is_null() {
            ValueError::Null
        } else {
            ValueError::Mismatch {
                expected,
                found: self.kind(),
            }
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Long(a), Self::Long(b)) => a == b,
            (Self::Double(a), Self::Double(b)) => a.to_bits() == b.to_bits(),
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            (Self::Flexi(a), Self::Flexi(b)) => a == b,
            (Self::Bean(a), Self::Bean(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl HashCode for Value {
    fn hash_code(&self) -> i32 {
        match self {
            Self::Null => NULL_HASH,
            Self::Bool(v) => v.hash_code(),
            Self::Int(v) => v.hash_code(),
            Self::Long(v) => v.hash_code(),
            Self::Double(v) => v.hash_code(),
            Self::Str(v) => v.hash_code(),
            Self::List(v) => v.hash_code(),
            Self::Map(v) => v.hash_code(),
            Self::Flexi(v) => v.hash_code(),
            Self::Bean(v) => v.hash_code(),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Long(v) => write!(f, "{v}"),
            Self::Double(v) => write!(f, "{v:?}"),
            Self::Str(v) => f.write_str(v),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Map(entries) => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}={value}")?;
                }
                f.write_str("}")
            }
            Self::Flexi(v) => write!(f, "{v}"),
            Self::Bean(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Long(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

/// Conversion between a typed field and [`Value`]
///
/// # Contract
/// - `from_value(into_value(x)) == x`
/// - Non-optional types reject [`Value::Null`] with [`ValueError::Null`]
pub trait PropertyValue: Sized {
    /// Declared type name reported by property descriptors
    const TYPE_NAME: &'static str;

    /// Convert into a dynamic value
    fn into_value(self) -> Value;

    /// Convert from a dynamic value
    ///
    /// # Errors
    /// Returns error if the value is null or of another kind
    fn from_value(value: Value) -> Result<Self, ValueError>;
}

/// Convert a dynamic value for the named property
///
/// # Errors
/// Returns the conversion failure with `property` attached
#[inline]
pub fn convert<T: PropertyValue>(property: &str, value: Value) -> Result<T, BeanError> {
    T::from_value(value).map_err(|err| err.for_property(property))
}

impl PropertyValue for Value {
    const TYPE_NAME: &'static str = "Value";

    fn into_value(self) -> Value {
        self
    }

    fn from_value(value: Value) -> Result<Self, ValueError> {
        Ok(value)
    }
}

impl PropertyValue for String {
    const TYPE_NAME: &'static str = "String";

    fn into_value(self) -> Value {
        Value::Str(self)
    }

    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Str(s) => Ok(s),
            other => Err(other.mismatch(Self::TYPE_NAME)),
        }
    }
}

impl PropertyValue for bool {
    const TYPE_NAME: &'static str = "boolean";

    fn into_value(self) -> Value {
        Value::Bool(self)
    }

    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(other.mismatch(Self::TYPE_NAME)),
        }
    }
}

impl PropertyValue for i32 {
    const TYPE_NAME: &'static str = "int";

    fn into_value(self) -> Value {
        Value::Int(self)
    }

    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Int(v) => Ok(v),
            Value::Long(v) => i32::try_from(v).map_err(|_| ValueError::Mismatch {
                expected: Self::TYPE_NAME,
                found: "long",
            }),
            other => Err(other.mismatch(Self::TYPE_NAME)),
        }
    }
}

impl PropertyValue for i64 {
    const TYPE_NAME: &'static str = "long";

    fn into_value(self) -> Value {
        Value::Long(self)
    }

    fn from_value(value: Value) -> Result<Self, ValueError> {
        value.as_i64().ok_or_else(|| value.mismatch(Self::TYPE_NAME))
    }
}

impl PropertyValue for f64 {
    const TYPE_NAME: &'static str = "double";

    fn into_value(self) -> Value {
        Value::Double(self)
    }

    #[allow(clippy::cast_precision_loss)]
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Double(v) => Ok(v),
            Value::Int(v) => Ok(f64::from(v)),
            Value::Long(v) => Ok(v as f64),
            other => Err(other.mismatch(Self::TYPE_NAME)),
        }
    }
}

impl<T: PropertyValue> PropertyValue for Option<T> {
    const TYPE_NAME: &'static str = T::TYPE_NAME;

    fn into_value(self) -> Value {
        self.map_or(Value::Null, PropertyValue::into_value)
    }

    fn from_value(value: Value) -> Result<Self, ValueError> {
        if value.is_null() {
            Ok(None)
        } else {
            T::from_value(value).map(Some)
        }
    }
}

impl<T: PropertyValue> PropertyValue for Vec<T> {
    const TYPE_NAME: &'static str = "List";

    fn into_value(self) -> Value {
        Value::List(self.into_iter().map(PropertyValue::into_value).collect())
    }

    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::List(items) => items.into_iter().map(T::from_value).collect(),
            other => Err(other.mismatch(Self::TYPE_NAME)),
        }
    }
}

impl<T: PropertyValue> PropertyValue for BTreeMap<String, T> {
    const TYPE_NAME: &'static str = "Map";

    fn into_value(self) -> Value {
        Value::Map(
            self.into_iter()
                .map(|(key, value)| (key, value.into_value()))
                .collect(),
        )
    }

    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Map(entries) => entries
                .into_iter()
                .map(|(key, value)| T::from_value(value).map(|v| (key, v)))
                .collect(),
            other => Err(other.mismatch(Self::TYPE_NAME)),
        }
    }
}

impl PropertyValue for FlexiBean {
    const TYPE_NAME: &'static str = "FlexiBean";

    fn into_value(self) -> Value {
        Value::Flexi(self)
    }

    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Flexi(flexi) => Ok(flexi),
            Value::Map(entries) => Ok(entries.into_iter().collect()),
            other => Err(other.mismatch(Self::TYPE_NAME)),
        }
    }
}
