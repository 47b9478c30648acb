//! Bean builders
//!
//! A builder stages property values and produces a bean on `build`.
//! [`BeanBuilder`] is the object-safe, string-keyed face handed out by
//! [`MetaBean::builder`]; [`TypedBuilder`] adds a typed `build`.
//!
//! Immutable beans write their own staging struct. Mutable beans can use
//! [`DirectBeanBuilder`], which stages writes against a default instance.

use crate::bean::{Bean, FieldWriter};
use crate::error::BeanError;
use crate::meta::MetaBean;
use crate::value::Value;
use std::fmt::{self, Debug, Display, Formatter};

/// String-keyed builder for any bean type
pub trait BeanBuilder: Display + Send {
    /// Meta-bean of the type being built
    fn meta_bean(&self) -> &'static dyn MetaBean;

    /// Read a staged value
    ///
    /// # Errors
    /// Returns [`BeanError::NoSuchProperty`] if the name is unknown
    fn get(&self, name: &str) -> Result<Value, BeanError>;

    /// Stage a value
    ///
    /// # Errors
    /// Returns error if the name is unknown, the property cannot be built,
    /// or the value does not convert
    fn set(&mut self, name: &str, value: Value) -> Result<(), BeanError>;

    /// Build the bean
    ///
    /// # Errors
    /// Returns [`BeanError::NullProperty`] if a required property is unset
    fn build_bean(self: Box<Self>) -> Result<Box<dyn Bean>, BeanError>;
}

impl Debug for dyn BeanBuilder {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

/// Builder with a typed `build`
pub trait TypedBuilder: BeanBuilder + Sized {
    /// Bean produced
    type Bean: Bean;

    /// Build the bean
    ///
    /// # Errors
    /// Returns [`BeanError::NullProperty`] if a required property is unset
    fn build(self) -> Result<Self::Bean, BeanError>;
}

/// Bean that can be copied back into a pre-populated builder
pub trait ToBuilder: Bean + Sized {
    /// Builder type
    type Builder: TypedBuilder<Bean = Self>;

    /// Builder holding every current property value
    ///
    /// The bean is left untouched.
    fn to_builder(&self) -> Self::Builder;
}

/// Take a staged required value
///
/// # Errors
/// Returns [`BeanError::NullProperty`] naming `property` if unset
pub fn required<T>(staged: Option<T>, bean: &'static str, property: &str) -> Result<T, BeanError> {
    staged.ok_or_else(|| {
        tracing::debug!(bean, property, "build rejected: required property unset");
        BeanError::NullProperty(property.to_string())
    })
}

/// Dynamic builder for a mutable bean
///
/// Writes go through the bean's meta-bean in non-quiet mode, so unknown
/// names, read-only properties, and bad values fail on `set`.
#[derive(Clone, Default)]
pub struct DirectBeanBuilder<B> {
    bean: B,
}

impl<B: Bean + Default> DirectBeanBuilder<B> {
    /// Create builder over a default bean
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self { bean: B::default() }
    }

    /// Create builder pre-populated from an existing bean
    #[inline]
    #[must_use]
    pub fn from_bean(bean: B) -> Self {
        Self { bean }
    }

    /// Factory for [`DirectMetaBean::with_builder`](crate::meta::DirectMetaBean::with_builder)
    #[must_use]
    pub fn boxed() -> Box<dyn BeanBuilder> {
        Box::new(Self::new())
    }

    /// Stage a value, fluent form
    ///
    /// # Errors
    /// See [`BeanBuilder::set`]
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Result<Self, BeanError> {
        BeanBuilder::set(&mut self, name, value.into())?;
        Ok(self)
    }
}

impl<B: Bean + Default> BeanBuilder for DirectBeanBuilder<B> {
    fn meta_bean(&self) -> &'static dyn MetaBean {
        self.bean.meta_bean()
    }

    fn get(&self, name: &str) -> Result<Value, BeanError> {
        self.bean.meta_bean().property_get(&self.bean, name, false)
    }

    fn set(&mut self, name: &str, value: Value) -> Result<(), BeanError> {
        let meta = self.bean.meta_bean();
        meta.property_set(&mut self.bean, name, value, false)
    }

    fn build_bean(self: Box<Self>) -> Result<Box<dyn Bean>, BeanError> {
        Ok(Box::new(self.bean))
    }
}

impl<B: Bean + Default> TypedBuilder for DirectBeanBuilder<B> {
    type Bean = B;

    fn build(self) -> Result<B, BeanError> {
        Ok(self.bean)
    }
}

impl<B: Bean> Display for DirectBeanBuilder<B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let meta = self.bean.meta_bean();
        let name = format!("{}.Builder", meta.bean_name());
        FieldWriter::bean(f, &name, |w| {
            for descriptor in meta.meta_property_map().values() {
                let style = descriptor.style();
                if !(style.is_buildable() && style.is_readable()) {
                    continue;
                }
                let value = meta
                    .property_get(&self.bean, descriptor.name(), true)
                    .unwrap_or_default();
                w.field(descriptor.name(), value)?;
            }
            Ok(())
        })
    }
}

impl<B: Bean> Debug for DirectBeanBuilder<B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectBeanBuilder").field("bean", &self.bean).finish()
    }
}
