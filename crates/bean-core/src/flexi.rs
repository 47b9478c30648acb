//! Open-ended flexi bean
//!
//! [`FlexiBean`] accepts any property name. Absent properties read as
//! [`Value::Null`]. Insertion order is kept for display and iteration,
//! equality and hashing ignore it.

use crate::hash::HashCode;
use crate::value::Value;
use indexmap::IndexMap;
use std::fmt::{self, Display, Formatter};

/// Bean with a dynamic property set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlexiBean {
    data: IndexMap<String, Value>,
}

impl FlexiBean {
    /// Create empty flexi bean
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: IndexMap::new(),
        }
    }

    /// Get property value, `Null` if absent
    #[must_use]
    pub fn get(&self, name: &str) -> Value {
        self.data.get(name).cloned().unwrap_or_default()
    }

    /// Borrow property value if present
    #[inline]
    #[must_use]
    pub fn get_ref(&self, name: &str) -> Option<&Value> {
        self.data.get(name)
    }

    /// Set property, returning the previous value
    pub fn put(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.data.insert(name.into(), value.into())
    }

    /// Copy every property of another flexi bean into this one
    pub fn put_all(&mut self, other: &FlexiBean) {
        for (name, value) in &other.data {
            self.data.insert(name.clone(), value.clone());
        }
    }

    /// Remove property, keeping the order of the rest
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.data.shift_remove(name)
    }

    /// Check if property is present
    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.data.contains_key(name)
    }

    /// Remove every property
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Number of properties
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Property names in insertion order
    #[must_use]
    pub fn property_names(&self) -> Vec<&str> {
        self.data.keys().map(String::as_str).collect()
    }

    /// Iterate over properties in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.data.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl FromIterator<(String, Value)> for FlexiBean {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}

impl HashCode for FlexiBean {
    fn hash_code(&self) -> i32 {
        self.data.iter().fold(0i32, |hash, (name, value)| {
            hash.wrapping_add(name.hash_code() ^ value.hash_code())
        })
    }
}

impl Display for FlexiBean {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("FlexiBean{")?;
        for (i, (name, value)) in self.data.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}={value}")?;
        }
        f.write_str("}")
    }
}
