//! Property descriptors and meta-properties
//!
//! - [`PropertyDescriptor`]: type-erased metadata for one property
//! - [`MetaProperty<B>`]: descriptor plus typed accessors for bean `B`
//! - [`Property`] / [`PropertyMut`]: a bean bound to one meta-property

use crate::error::BeanError;
use crate::value::{PropertyValue, Value};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug, Display, Formatter};
use std::sync::Arc;

/// Read/write capability of a property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyStyle {
    /// Readable, never writable after construction
    ReadOnly,

    /// Readable and writable
    ReadWrite,

    /// Writable, not readable
    WriteOnly,

    /// Computed from other properties
    Derived,

    /// Fixed at build time on an immutable bean
    Immutable,
}

impl PropertyStyle {
    /// Check if the property can be read
    #[inline]
    #[must_use]
    pub fn is_readable(self) -> bool {
        !matches!(self, Self::WriteOnly)
    }

    /// Check if the property can be written on a built bean
    #[inline]
    #[must_use]
    pub fn is_writable(self) -> bool {
        matches!(self, Self::ReadWrite | Self::WriteOnly)
    }

    /// Check if a builder can stage a value for the property
    #[inline]
    #[must_use]
    pub fn is_buildable(self) -> bool {
        matches!(self, Self::ReadWrite | Self::WriteOnly | Self::Immutable)
    }
}

impl Display for PropertyStyle {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ReadOnly => "read-only",
            Self::ReadWrite => "read-write",
            Self::WriteOnly => "write-only",
            Self::Derived => "derived",
            Self::Immutable => "immutable",
        };
        f.write_str(name)
    }
}

/// Metadata for one property
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDescriptor {
    name: &'static str,
    declaring_bean: &'static str,
    value_type: &'static str,
    style: PropertyStyle,
    required: bool,
}

impl PropertyDescriptor {
    /// Create descriptor
    #[inline]
    #[must_use]
    pub const fn new(
        name: &'static str,
        declaring_bean: &'static str,
        value_type: &'static str,
        style: PropertyStyle,
    ) -> Self {
        Self {
            name,
            declaring_bean,
            value_type,
            style,
            required: false,
        }
    }

    /// Property name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Name of the bean level that declares the property
    #[inline]
    #[must_use]
    pub fn declaring_bean(&self) -> &'static str {
        self.declaring_bean
    }

    /// Declared value type name
    #[inline]
    #[must_use]
    pub fn value_type(&self) -> &'static str {
        self.value_type
    }

    /// Read/write capability
    #[inline]
    #[must_use]
    pub fn style(&self) -> PropertyStyle {
        self.style
    }

    /// Whether the property carries a not-null invariant
    #[inline]
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required
    }
}

type Getter<B> = Arc<dyn Fn(&B) -> Value + Send + Sync>;
type Setter<B> = Arc<dyn Fn(&mut B, Value) -> Result<(), BeanError> + Send + Sync>;

/// Descriptor plus typed accessors for one property of bean `B`
///
/// Accessors are stored behind `Arc` so a derived bean can
/// [`lift`](Self::lift) its parent's properties without copying them.
pub struct MetaProperty<B> {
    descriptor: PropertyDescriptor,
    getter: Option<Getter<B>>,
    setter: Option<Setter<B>>,
}

impl<B: 'static> MetaProperty<B> {
    /// Readable and writable property
    #[must_use]
    pub fn read_write<T>(
        declaring_bean: &'static str,
        name: &'static str,
        get: fn(&B) -> T,
        set: fn(&mut B, T),
    ) -> Self
    where
        T: PropertyValue + 'static,
    {
        Self {
            descriptor: PropertyDescriptor::new(
                name,
                declaring_bean,
                T::TYPE_NAME,
                PropertyStyle::ReadWrite,
            ),
            getter: Some(Self::getter(get)),
            setter: Some(Arc::new(move |bean: &mut B, value: Value| {
                let typed = T::from_value(value).map_err(|e| e.for_property(name))?;
                set(bean, typed);
                Ok(())
            })),
        }
    }

    /// Property readable on the bean but never writable
    #[must_use]
    pub fn read_only<T>(declaring_bean: &'static str, name: &'static str, get: fn(&B) -> T) -> Self
    where
        T: PropertyValue + 'static,
    {
        Self::readable(declaring_bean, name, get, PropertyStyle::ReadOnly)
    }

    /// Property of an immutable bean, fixed by its builder
    #[must_use]
    pub fn immutable<T>(declaring_bean: &'static str, name: &'static str, get: fn(&B) -> T) -> Self
    where
        T: PropertyValue + 'static,
    {
        Self::readable(declaring_bean, name, get, PropertyStyle::Immutable)
    }

    /// Property computed from other properties
    #[must_use]
    pub fn derived<T>(declaring_bean: &'static str, name: &'static str, compute: fn(&B) -> T) -> Self
    where
        T: PropertyValue + 'static,
    {
        Self::readable(declaring_bean, name, compute, PropertyStyle::Derived)
    }

    /// Property that can be written but not read
    #[must_use]
    pub fn write_only<T>(declaring_bean: &'static str, name: &'static str, set: fn(&mut B, T)) -> Self
    where
        T: PropertyValue + 'static,
    {
        Self {
            descriptor: PropertyDescriptor::new(
                name,
                declaring_bean,
                T::TYPE_NAME,
                PropertyStyle::WriteOnly,
            ),
            getter: None,
            setter: Some(Arc::new(move |bean: &mut B, value: Value| {
                let typed = T::from_value(value).map_err(|e| e.for_property(name))?;
                set(bean, typed);
                Ok(())
            })),
        }
    }

    /// Mark the property as carrying a not-null invariant
    #[inline]
    #[must_use]
    pub fn required(mut self) -> Self {
        self.descriptor.required = true;
        self
    }

    /// Re-target this property at a bean `S` that embeds `B`
    ///
    /// `up` and `up_mut` project the embedding bean onto its `B` part.
    /// The descriptor, including its declaring bean, is kept.
    #[must_use]
    pub fn lift<S: 'static>(&self, up: fn(&S) -> &B, up_mut: fn(&mut S) -> &mut B) -> MetaProperty<S> {
        let getter = self.getter.clone().map(|get| {
            let lifted: Getter<S> = Arc::new(move |bean: &S| get(up(bean)));
            lifted
        });
        let setter = self.setter.clone().map(|set| {
            let lifted: Setter<S> = Arc::new(move |bean: &mut S, value: Value| set(up_mut(bean), value));
            lifted
        });
        MetaProperty {
            descriptor: self.descriptor.clone(),
            getter,
            setter,
        }
    }

    fn readable<T>(
        declaring_bean: &'static str,
        name: &'static str,
        get: fn(&B) -> T,
        style: PropertyStyle,
    ) -> Self
    where
        T: PropertyValue + 'static,
    {
        Self {
            descriptor: PropertyDescriptor::new(name, declaring_bean, T::TYPE_NAME, style),
            getter: Some(Self::getter(get)),
            setter: None,
        }
    }

    fn getter<T>(get: fn(&B) -> T) -> Getter<B>
    where
        T: PropertyValue + 'static,
    {
        Arc::new(move |bean: &B| get(bean).into_value())
    }
}

impl<B> MetaProperty<B> {
    /// Property metadata
    #[inline]
    #[must_use]
    pub fn descriptor(&self) -> &PropertyDescriptor {
        &self.descriptor
    }

    /// Property name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.descriptor.name
    }

    /// Read/write capability
    #[inline]
    #[must_use]
    pub fn style(&self) -> PropertyStyle {
        self.descriptor.style
    }

    /// Read the property
    ///
    /// # Errors
    /// Returns [`BeanError::NotReadable`] for write-only properties
    pub fn get(&self, bean: &B) -> Result<Value, BeanError> {
        match &self.getter {
            Some(get) => Ok(get(bean)),
            None => Err(BeanError::NotReadable(self.name().to_string())),
        }
    }

    /// Write the property
    ///
    /// # Errors
    /// Returns [`BeanError::ReadOnlyProperty`] if the property has no setter,
    /// or a conversion error if the value does not fit the declared type
    pub fn set(&self, bean: &mut B, value: Value) -> Result<(), BeanError> {
        match &self.setter {
            Some(set) => set(bean, value),
            None => Err(BeanError::ReadOnlyProperty(self.name().to_string())),
        }
    }
}

impl<B> Debug for MetaProperty<B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetaProperty")
            .field("descriptor", &self.descriptor)
            .field("readable", &self.getter.is_some())
            .field("writable", &self.setter.is_some())
            .finish()
    }
}

/// Bean bound to one of its meta-properties, read access
#[derive(Debug)]
pub struct Property<'a, B> {
    bean: &'a B,
    meta: &'a MetaProperty<B>,
}

impl<'a, B> Property<'a, B> {
    /// Bind bean and meta-property
    #[inline]
    #[must_use]
    pub fn new(bean: &'a B, meta: &'a MetaProperty<B>) -> Self {
        Self { bean, meta }
    }

    /// Property name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.meta.name()
    }

    /// Read/write capability
    #[inline]
    #[must_use]
    pub fn style(&self) -> PropertyStyle {
        self.meta.style()
    }

    /// Underlying meta-property
    #[inline]
    #[must_use]
    pub fn meta_property(&self) -> &'a MetaProperty<B> {
        self.meta
    }

    /// Bound bean
    #[inline]
    #[must_use]
    pub fn bean(&self) -> &'a B {
        self.bean
    }

    /// Read the value
    ///
    /// # Errors
    /// Returns error if the property is write-only
    pub fn get(&self) -> Result<Value, BeanError> {
        self.meta.get(self.bean)
    }
}

/// Bean bound to one of its meta-properties, read and write access
#[derive(Debug)]
pub struct PropertyMut<'a, B> {
    bean: &'a mut B,
    meta: &'a MetaProperty<B>,
}

impl<'a, B> PropertyMut<'a, B> {
    /// Bind bean and meta-property
    #[inline]
    #[must_use]
    pub fn new(bean: &'a mut B, meta: &'a MetaProperty<B>) -> Self {
        Self { bean, meta }
    }

    /// Property name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.meta.name()
    }

    /// Read/write capability
    #[inline]
    #[must_use]
    pub fn style(&self) -> PropertyStyle {
        self.meta.style()
    }

    /// Read the value
    ///
    /// # Errors
    /// Returns error if the property is write-only
    pub fn get(&self) -> Result<Value, BeanError> {
        self.meta.get(self.bean)
    }

    /// Write the value
    ///
    /// # Errors
    /// Returns error if the property is not writable or the value does not convert
    pub fn set(&mut self, value: impl Into<Value>) -> Result<(), BeanError> {
        self.meta.set(self.bean, value.into())
    }

    /// Write the value, silently dropping writes to non-writable properties
    ///
    /// # Errors
    /// Returns error only if the value does not convert
    pub fn set_quiet(&mut self, value: impl Into<Value>) -> Result<(), BeanError> {
        if !self.style().is_writable() {
            tracing::debug!(property = self.name(), "quiet write to non-writable property dropped");
            return Ok(());
        }
        self.set(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Inner {
        label: Option<String>,
        count: i32,
    }

    #[derive(Debug, Default)]
    struct Outer {
        inner: Inner,
        secret: String,
    }

    fn label() -> MetaProperty<Inner> {
        MetaProperty::read_write("Inner", "label", |b: &Inner| b.label.clone(), |b, v| b.label = v)
    }

    fn count() -> MetaProperty<Inner> {
        MetaProperty::read_only("Inner", "count", |b: &Inner| b.count)
    }

    #[test]
    fn style_capabilities() {
        assert!(PropertyStyle::ReadWrite.is_writable());
        assert!(!PropertyStyle::ReadOnly.is_writable());
        assert!(!PropertyStyle::Immutable.is_writable());
        assert!(PropertyStyle::Immutable.is_buildable());
        assert!(!PropertyStyle::Derived.is_buildable());
        assert!(!PropertyStyle::WriteOnly.is_readable());
        assert_eq!(PropertyStyle::ReadOnly.to_string(), "read-only");
    }

    #[test]
    fn read_write_get_and_set() {
        let property = label();
        let mut bean = Inner::default();
        property.set(&mut bean, Value::from("x")).unwrap();
        assert_eq!(property.get(&bean).unwrap(), Value::Str("x".to_string()));
        assert_eq!(property.descriptor().value_type(), "String");
    }

    #[test]
    fn read_only_set_fails() {
        let property = count();
        let mut bean = Inner::default();
        let err = property.set(&mut bean, Value::Int(3)).unwrap_err();
        assert!(matches!(err, BeanError::ReadOnlyProperty(ref p) if p == "count"));
        assert_eq!(bean.count, 0);
    }

    #[test]
    fn set_wrong_type_names_property() {
        let property = label();
        let mut bean = Inner::default();
        let err = property.set(&mut bean, Value::Int(1)).unwrap_err();
        assert!(matches!(err, BeanError::TypeMismatch { ref property, .. } if property == "label"));
    }

    #[test]
    fn write_only_get_fails() {
        let property: MetaProperty<Outer> =
            MetaProperty::write_only("Outer", "secret", |b: &mut Outer, v: String| b.secret = v);
        let mut bean = Outer::default();
        property.set(&mut bean, Value::from("s")).unwrap();
        assert_eq!(bean.secret, "s");
        assert!(matches!(property.get(&bean), Err(BeanError::NotReadable(_))));
    }

    #[test]
    fn lifted_property_reaches_embedded_bean() {
        let lifted = label().lift(|o: &Outer| &o.inner, |o: &mut Outer| &mut o.inner);
        let mut outer = Outer::default();
        lifted.set(&mut outer, Value::from("deep")).unwrap();
        assert_eq!(outer.inner.label.as_deref(), Some("deep"));
        assert_eq!(lifted.descriptor().declaring_bean(), "Inner");
    }

    #[test]
    fn property_mut_quiet_drops_read_only_write() {
        let property = count();
        let mut bean = Inner { label: None, count: 4 };
        let mut handle = PropertyMut::new(&mut bean, &property);
        assert!(handle.set_quiet(9).is_ok());
        assert!(handle.set(9).is_err());
        assert_eq!(bean.count, 4);
    }

    #[test]
    fn required_marks_descriptor() {
        assert!(!label().descriptor().is_required());
        assert!(label().required().descriptor().is_required());
    }
}
