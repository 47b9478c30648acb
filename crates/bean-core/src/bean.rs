//! Bean trait and shared bean helpers
//!
//! Defines [`Bean`], the object-safe interface every bean implements, and
//! [`BeanRef`], a shared handle used when a bean is stored as a [`Value`].

use crate::error::{BeanError, ValueError};
use crate::hash::HashCode;
use crate::meta::MetaBean;
use crate::value::{PropertyValue, Value};
use std::any::Any;
use std::fmt::{self, Debug, Display, Formatter};
use std::sync::Arc;

/// Data holder with reflective property access
///
/// # Contract
/// - `bean_eq` is true only for the same concrete type with equal properties
/// - `hash_code` agrees with `bean_eq`
/// - `Display` renders `TypeName{prop=val, ...}`, inherited properties first
pub trait Bean: Any + Debug + Display + HashCode + Send + Sync {
    /// Meta-bean describing this bean's type
    fn meta_bean(&self) -> &'static dyn MetaBean;

    /// Upcast for downcasting to the concrete type
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for downcasting to the concrete type
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Clone into a new boxed bean
    fn clone_bean(&self) -> Box<dyn Bean>;

    /// Structural equality against a bean of any type
    fn bean_eq(&self, other: &dyn Bean) -> bool;
}

impl dyn Bean {
    /// Bean type name
    #[inline]
    #[must_use]
    pub fn bean_name(&self) -> &'static str {
        self.meta_bean().bean_name()
    }

    /// Property names in declaration order, inherited first
    #[must_use]
    pub fn property_names(&self) -> Vec<&'static str> {
        self.meta_bean().meta_property_map().keys().copied().collect()
    }

    /// Read a property by name
    ///
    /// # Errors
    /// Returns error if the property is unknown or not readable
    pub fn get(&self, name: &str) -> Result<Value, BeanError> {
        self.meta_bean().property_get(self, name, false)
    }

    /// Write a property by name
    ///
    /// # Errors
    /// Returns error if the property is unknown, not writable, or the value
    /// does not convert
    pub fn set(&mut self, name: &str, value: Value) -> Result<(), BeanError> {
        self.meta_bean().property_set(self, name, value, false)
    }

    /// Borrow as concrete type
    #[inline]
    #[must_use]
    pub fn downcast_ref<B: Bean>(&self) -> Option<&B> {
        self.as_any().downcast_ref::<B>()
    }

    /// Mutably borrow as concrete type
    #[inline]
    #[must_use]
    pub fn downcast_mut<B: Bean>(&mut self) -> Option<&mut B> {
        self.as_any_mut().downcast_mut::<B>()
    }
}

impl PartialEq for dyn Bean {
    fn eq(&self, other: &Self) -> bool {
        self.bean_eq(other)
    }
}

/// Structural equality helper for [`Bean::bean_eq`] implementations
#[inline]
#[must_use]
pub fn bean_eq<B: Bean + PartialEq>(bean: &B, other: &dyn Bean) -> bool {
    other
        .as_any()
        .downcast_ref::<B>()
        .is_some_and(|other| bean == other)
}

/// Shared handle to a bean stored inside a [`Value`]
#[derive(Clone)]
pub struct BeanRef(Arc<dyn Bean>);

impl BeanRef {
    /// Wrap a bean
    #[inline]
    #[must_use]
    pub fn new<B: Bean>(bean: B) -> Self {
        Self(Arc::new(bean))
    }

    /// Wrap a boxed bean
    #[inline]
    #[must_use]
    pub fn from_boxed(bean: Box<dyn Bean>) -> Self {
        Self(Arc::from(bean))
    }

    /// Borrow the bean
    #[inline]
    #[must_use]
    pub fn bean(&self) -> &dyn Bean {
        &*self.0
    }

    /// Clone out as concrete type
    #[must_use]
    pub fn downcast<B: Bean + Clone>(&self) -> Option<B> {
        self.0.as_any().downcast_ref::<B>().cloned()
    }
}

impl PartialEq for BeanRef {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0.bean_eq(&*other.0)
    }
}

impl Eq for BeanRef {}

impl HashCode for BeanRef {
    fn hash_code(&self) -> i32 {
        self.0.hash_code()
    }
}

impl Debug for BeanRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(&*self.0, f)
    }
}

impl Display for BeanRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&*self.0, f)
    }
}

/// Convert a bean into a [`Value::Bean`]
#[inline]
#[must_use]
pub fn bean_into_value<B: Bean>(bean: B) -> Value {
    Value::Bean(BeanRef::new(bean))
}

/// Convert a [`Value`] back into a concrete bean
///
/// Accepts a nested bean of type `B`, or a string-keyed map which is fed
/// through the meta-bean's builder so that build-time validation applies.
///
/// # Errors
/// Returns error if the value is null, another bean type, or the map does
/// not build
pub fn bean_from_value<B: Bean + Clone>(
    value: Value,
    meta: &'static dyn MetaBean,
) -> Result<B, ValueError> {
    let mismatch = |found| ValueError::Mismatch {
        expected: meta.bean_name(),
        found,
    };
    match value {
        Value::Bean(bean) => bean.downcast::<B>().ok_or_else(|| mismatch(bean.bean().bean_name())),
        Value::Map(entries) => {
            let nested = |err: BeanError| ValueError::Nested(err.to_string());
            let mut builder = meta.builder().map_err(nested)?;
            for (name, value) in entries {
                builder.set(&name, value).map_err(nested)?;
            }
            let built = builder.build_bean().map_err(nested)?;
            built
                .downcast_ref::<B>()
                .cloned()
                .ok_or_else(|| mismatch(built.bean_name()))
        }
        Value::Null => Err(ValueError::Null),
        other => Err(mismatch(other.kind())),
    }
}

/// Writer for the `prop=val` list inside a bean's `Display`
///
/// Each bean level writes its own fields after its parent's, so derived
/// beans render inherited properties first.
pub struct FieldWriter<'a, 'b> {
    f: &'a mut Formatter<'b>,
    first: bool,
}

impl<'a, 'b> FieldWriter<'a, 'b> {
    /// Render `name{...}` with the fields written by `fields`
    ///
    /// # Errors
    /// Propagates formatter errors
    pub fn bean(
        f: &'a mut Formatter<'b>,
        name: &str,
        fields: impl FnOnce(&mut FieldWriter<'a, 'b>) -> fmt::Result,
    ) -> fmt::Result {
        f.write_str(name)?;
        f.write_str("{")?;
        let mut writer = FieldWriter { f, first: true };
        fields(&mut writer)?;
        writer.f.write_str("}")
    }

    /// Write one `name=value` entry
    ///
    /// # Errors
    /// Propagates formatter errors
    pub fn field<T: PropertyValue>(&mut self, name: &str, value: T) -> fmt::Result {
        if !self.first {
            self.f.write_str(", ")?;
        }
        self.first = false;
        write!(self.f, "{name}={}", value.into_value())
    }
}

/// Implement [`Bean`], [`PropertyValue`], and `std::hash::Hash` for a bean
/// type that already implements `Clone`, `PartialEq`, `Debug`, `Display`,
/// and [`HashCode`]
///
/// ```rust,ignore
/// bean_core::impl_bean!(Person, "Person", Person::meta());
/// ```
#[macro_export]
macro_rules! impl_bean {
    ($bean:ty, $name:literal, $meta:expr) => {
        impl $crate::bean::Bean for $bean {
            fn meta_bean(&self) -> &'static dyn $crate::meta::MetaBean {
                $meta
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
                self
            }

            fn clone_bean(&self) -> ::std::boxed::Box<dyn $crate::bean::Bean> {
                ::std::boxed::Box::new(::std::clone::Clone::clone(self))
            }

            fn bean_eq(&self, other: &dyn $crate::bean::Bean) -> bool {
                $crate::bean::bean_eq(self, other)
            }
        }

        impl $crate::value::PropertyValue for $bean {
            const TYPE_NAME: &'static str = $name;

            fn into_value(self) -> $crate::value::Value {
                $crate::bean::bean_into_value(self)
            }

            fn from_value(
                value: $crate::value::Value,
            ) -> ::std::result::Result<Self, $crate::error::ValueError> {
                $crate::bean::bean_from_value(value, $meta)
            }
        }

        impl ::std::hash::Hash for $bean {
            fn hash<H: ::std::hash::Hasher>(&self, state: &mut H) {
                state.write_i32($crate::hash::HashCode::hash_code(self));
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Sample {
        name: Option<String>,
        tags: Vec<String>,
    }

    impl Display for Sample {
        fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
            FieldWriter::bean(f, "Sample", |w| {
                w.field("name", self.name.clone())?;
                w.field("tags", self.tags.clone())
            })
        }
    }

    #[test]
    fn field_writer_renders_bean_shape() {
        let sample = Sample {
            name: Some("a".to_string()),
            tags: vec!["x".to_string(), "y".to_string()],
        };
        assert_eq!(sample.to_string(), "Sample{name=a, tags=[x, y]}");
    }

    #[test]
    fn field_writer_renders_null() {
        let sample = Sample {
            name: None,
            tags: Vec::new(),
        };
        assert_eq!(sample.to_string(), "Sample{name=null, tags=[]}");
    }
}
