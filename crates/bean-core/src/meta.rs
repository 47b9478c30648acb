//! Meta-beans
//!
//! A meta-bean is the single schema object of a bean type: its ordered
//! property map, string-keyed dispatch, and builder factory.
//!
//! - [`MetaBean`]: object-safe interface, used by the registry and JSON
//! - [`DirectMetaBean<B>`]: the implementation backed by typed accessors
//! - [`MetaCell<B>`]: lazily built, self-registering static holder

use crate::bean::Bean;
use crate::builder::BeanBuilder;
use crate::error::BeanError;
use crate::property::{MetaProperty, Property, PropertyDescriptor, PropertyMut};
use crate::registry;
use crate::value::Value;
use indexmap::IndexMap;
use once_cell::sync::{Lazy, OnceCell};
use std::any::TypeId;
use std::fmt::{self, Debug, Formatter};

/// Ordered property name → descriptor map (declaration order, inherited first)
pub type MetaPropertyMap = IndexMap<&'static str, PropertyDescriptor>;

/// Factory for a bean type's dynamic builder
pub type BuilderFactory = fn() -> Box<dyn BeanBuilder>;

/// Schema object of a bean type
pub trait MetaBean: Send + Sync + 'static {
    /// Bean type name
    fn bean_name(&self) -> &'static str;

    /// Rust type of the bean
    fn bean_type(&self) -> TypeId;

    /// Ordered property map, inherited properties first
    fn meta_property_map(&self) -> &MetaPropertyMap;

    /// Look up a property descriptor
    ///
    /// # Errors
    /// Returns [`BeanError::NoSuchProperty`] if neither the bean nor its
    /// ancestors declare `name`
    fn meta_property(&self, name: &str) -> Result<&PropertyDescriptor, BeanError> {
        self.meta_property_map()
            .get(name)
            .ok_or_else(|| BeanError::NoSuchProperty {
                bean: self.bean_name(),
                property: name.to_string(),
            })
    }

    /// Read a property of `bean`
    ///
    /// In quiet mode a write-only property reads as [`Value::Null`]
    /// instead of failing. Unknown names fail in both modes.
    ///
    /// # Errors
    /// Returns error if the property is unknown, not readable (non-quiet),
    /// or `bean` is of another type
    fn property_get(&self, bean: &dyn Bean, name: &str, quiet: bool) -> Result<Value, BeanError>;

    /// Write a property of `bean`
    ///
    /// In quiet mode a write to a non-writable property is dropped and the
    /// bean is left unchanged. Unknown names fail in both modes.
    ///
    /// # Errors
    /// Returns error if the property is unknown, not writable (non-quiet),
    /// the value does not convert, or `bean` is of another type
    fn property_set(
        &self,
        bean: &mut dyn Bean,
        name: &str,
        value: Value,
        quiet: bool,
    ) -> Result<(), BeanError>;

    /// Whether [`builder`](Self::builder) is supported
    fn is_buildable(&self) -> bool;

    /// Create a dynamic builder
    ///
    /// # Errors
    /// Returns [`BeanError::NotBuildable`] if the type has no builder
    fn builder(&self) -> Result<Box<dyn BeanBuilder>, BeanError>;
}

impl Debug for dyn MetaBean {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetaBean")
            .field("bean_name", &self.bean_name())
            .field("properties", &self.meta_property_map().keys())
            .finish()
    }
}

/// Meta-bean backed by typed accessors
///
/// Derived bean levels are assembled with [`extend`](Self::extend), which
/// lifts the parent's meta-properties through projection functions and
/// appends the new ones.
pub struct DirectMetaBean<B> {
    name: &'static str,
    descriptors: MetaPropertyMap,
    properties: IndexMap<&'static str, MetaProperty<B>>,
    builder: Option<BuilderFactory>,
}

impl<B: Bean> DirectMetaBean<B> {
    /// Assemble a meta-bean, rejecting duplicate property names
    ///
    /// # Errors
    /// Returns [`BeanError::DuplicateProperty`] on the first repeated name
    pub fn try_new(name: &'static str, properties: Vec<MetaProperty<B>>) -> Result<Self, BeanError> {
        let mut meta = Self::empty(name);
        for property in properties {
            meta.push(property)?;
        }
        Ok(meta)
    }

    /// Assemble a meta-bean for a static declaration
    ///
    /// A repeated property name is rejected: it is logged at error level
    /// and the first declaration is kept. Use [`try_new`](Self::try_new)
    /// to surface the rejection as an error.
    #[must_use]
    pub fn new(name: &'static str, properties: Vec<MetaProperty<B>>) -> Self {
        let mut meta = Self::empty(name);
        for property in properties {
            meta.push_or_log(property);
        }
        meta
    }

    /// Assemble a derived meta-bean from its parent's
    ///
    /// Inherited properties come first, in the parent's order.
    ///
    /// # Errors
    /// Returns [`BeanError::DuplicateProperty`] if an own property shadows
    /// an inherited one
    pub fn try_extend<P: Bean>(
        name: &'static str,
        parent: &DirectMetaBean<P>,
        up: fn(&B) -> &P,
        up_mut: fn(&mut B) -> &mut P,
        properties: Vec<MetaProperty<B>>,
    ) -> Result<Self, BeanError> {
        let mut meta = Self::empty(name);
        for inherited in parent.properties.values() {
            meta.push(inherited.lift(up, up_mut))?;
        }
        for property in properties {
            meta.push(property)?;
        }
        Ok(meta)
    }

    /// Assemble a derived meta-bean for a static declaration
    ///
    /// An own property shadowing an inherited one is rejected the same way
    /// as in [`new`](Self::new); the inherited descriptor is kept.
    #[must_use]
    pub fn extend<P: Bean>(
        name: &'static str,
        parent: &DirectMetaBean<P>,
        up: fn(&B) -> &P,
        up_mut: fn(&mut B) -> &mut P,
        properties: Vec<MetaProperty<B>>,
    ) -> Self {
        let mut meta = Self::empty(name);
        let inherited = parent.properties.values().map(|p| p.lift(up, up_mut));
        for property in inherited.chain(properties) {
            meta.push_or_log(property);
        }
        meta
    }

    /// Attach a builder factory
    #[inline]
    #[must_use]
    pub fn with_builder(mut self, factory: BuilderFactory) -> Self {
        self.builder = Some(factory);
        self
    }

    /// Typed meta-property by name
    ///
    /// # Errors
    /// Returns [`BeanError::NoSuchProperty`] if not declared
    pub fn typed_property(&self, name: &str) -> Result<&MetaProperty<B>, BeanError> {
        self.properties
            .get(name)
            .ok_or_else(|| BeanError::NoSuchProperty {
                bean: self.name,
                property: name.to_string(),
            })
    }

    /// Iterate over typed meta-properties in declaration order
    pub fn typed_properties(&self) -> impl Iterator<Item = &MetaProperty<B>> {
        self.properties.values()
    }

    /// Read handle for one property of `bean`
    ///
    /// # Errors
    /// Returns error if the property is unknown
    pub fn property<'a>(&'a self, bean: &'a B, name: &str) -> Result<Property<'a, B>, BeanError> {
        Ok(Property::new(bean, self.typed_property(name)?))
    }

    /// Write handle for one property of `bean`
    ///
    /// # Errors
    /// Returns error if the property is unknown
    pub fn property_mut<'a>(
        &'a self,
        bean: &'a mut B,
        name: &str,
    ) -> Result<PropertyMut<'a, B>, BeanError> {
        Ok(PropertyMut::new(bean, self.typed_property(name)?))
    }

    /// Typed read by name
    ///
    /// # Errors
    /// See [`MetaBean::property_get`]
    pub fn get(&self, bean: &B, name: &str, quiet: bool) -> Result<Value, BeanError> {
        let property = self.typed_property(name)?;
        match property.get(bean) {
            Err(BeanError::NotReadable(_)) if quiet => Ok(Value::Null),
            other => other,
        }
    }

    /// Typed write by name
    ///
    /// # Errors
    /// See [`MetaBean::property_set`]
    pub fn set(&self, bean: &mut B, name: &str, value: Value, quiet: bool) -> Result<(), BeanError> {
        let property = self.typed_property(name)?;
        if !property.style().is_writable() {
            if quiet {
                tracing::debug!(bean = self.name, property = name, "quiet write dropped");
                return Ok(());
            }
            return Err(BeanError::ReadOnlyProperty(name.to_string()));
        }
        property.set(bean, value)
    }

    fn empty(name: &'static str) -> Self {
        Self {
            name,
            descriptors: IndexMap::new(),
            properties: IndexMap::new(),
            builder: None,
        }
    }

    fn push(&mut self, property: MetaProperty<B>) -> Result<(), BeanError> {
        let key = property.name();
        if self.properties.contains_key(key) {
            return Err(BeanError::DuplicateProperty {
                bean: self.name,
                property: key,
            });
        }
        self.descriptors.insert(key, property.descriptor().clone());
        self.properties.insert(key, property);
        Ok(())
    }

    fn push_or_log(&mut self, property: MetaProperty<B>) {
        if let Err(err) = self.push(property) {
            tracing::error!(bean = self.name, error = %err, "duplicate meta-property rejected");
        }
    }

    fn downcast<'b>(&self, bean: &'b dyn Bean) -> Result<&'b B, BeanError> {
        bean.as_any()
            .downcast_ref::<B>()
            .ok_or_else(|| BeanError::WrongBeanType {
                expected: self.name,
                found: bean.meta_bean().bean_name(),
            })
    }
}

impl<B: Bean> MetaBean for DirectMetaBean<B> {
    fn bean_name(&self) -> &'static str {
        self.name
    }

    fn bean_type(&self) -> TypeId {
        TypeId::of::<B>()
    }

    fn meta_property_map(&self) -> &MetaPropertyMap {
        &self.descriptors
    }

    fn property_get(&self, bean: &dyn Bean, name: &str, quiet: bool) -> Result<Value, BeanError> {
        let bean = self.downcast(bean)?;
        self.get(bean, name, quiet)
    }

    fn property_set(
        &self,
        bean: &mut dyn Bean,
        name: &str,
        value: Value,
        quiet: bool,
    ) -> Result<(), BeanError> {
        let found = bean.meta_bean().bean_name();
        let bean = bean
            .as_any_mut()
            .downcast_mut::<B>()
            .ok_or(BeanError::WrongBeanType {
                expected: self.name,
                found,
            })?;
        self.set(bean, name, value, quiet)
    }

    fn is_buildable(&self) -> bool {
        self.builder.is_some()
    }

    fn builder(&self) -> Result<Box<dyn BeanBuilder>, BeanError> {
        self.builder
            .map(|factory| factory())
            .ok_or(BeanError::NotBuildable(self.name))
    }
}

impl<B> Debug for DirectMetaBean<B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectMetaBean")
            .field("name", &self.name)
            .field("properties", &self.properties)
            .field("buildable", &self.builder.is_some())
            .finish()
    }
}

/// Static holder for a bean type's meta-bean
///
/// The meta-bean is assembled on first access and registered with the
/// global [`registry`] exactly once.
///
/// # Example
/// ```rust,ignore
/// static META: MetaCell<Person> = MetaCell::new(Person::assemble_meta);
///
/// impl Person {
///     pub fn meta() -> &'static DirectMetaBean<Person> {
///         META.get()
///     }
/// }
/// ```
pub struct MetaCell<B: 'static> {
    meta: Lazy<DirectMetaBean<B>>,
    registered: OnceCell<()>,
}

impl<B: Bean> MetaCell<B> {
    /// Create holder with the meta-bean assembly function
    #[must_use]
    pub const fn new(assemble: fn() -> DirectMetaBean<B>) -> Self {
        Self {
            meta: Lazy::new(assemble),
            registered: OnceCell::new(),
        }
    }

    /// Meta-bean singleton, registering it on first access
    pub fn get(&'static self) -> &'static DirectMetaBean<B> {
        let meta: &'static DirectMetaBean<B> = Lazy::force(&self.meta);
        self.registered.get_or_init(|| {
            if let Err(err) = registry::register(meta) {
                tracing::warn!(bean = meta.name, error = %err, "meta-bean not registered");
            }
        });
        meta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bean::FieldWriter;
    use crate::hash::{self, HashCode};
    use pretty_assertions::assert_eq;
    use std::fmt::Display;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Base {
        code: Option<String>,
        note: Option<String>,
    }

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Derived {
        parent: Base,
        extra: i32,
    }

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Locker {
        label: Option<String>,
        pin: i32,
    }

    fn base_meta() -> DirectMetaBean<Base> {
        DirectMetaBean::new(
            "MetaBase",
            vec![
                MetaProperty::read_write(
                    "MetaBase",
                    "code",
                    |b: &Base| b.code.clone(),
                    |b, v| b.code = v,
                ),
                MetaProperty::read_write(
                    "MetaBase",
                    "note",
                    |b: &Base| b.note.clone(),
                    |b, v| b.note = v,
                ),
            ],
        )
    }

    fn derived_extra() -> MetaProperty<Derived> {
        MetaProperty::read_write("MetaDerived", "extra", |b: &Derived| b.extra, |b, v| b.extra = v)
    }

    fn derived_shadow() -> MetaProperty<Derived> {
        MetaProperty::read_write("MetaDerived", "code", |b: &Derived| b.extra, |b, v| b.extra = v)
    }

    fn derived_meta() -> DirectMetaBean<Derived> {
        DirectMetaBean::extend(
            "MetaDerived",
            BASE_META.get(),
            |b: &Derived| &b.parent,
            |b: &mut Derived| &mut b.parent,
            vec![derived_shadow(), derived_extra()],
        )
    }

    fn locker_meta() -> DirectMetaBean<Locker> {
        DirectMetaBean::new(
            "MetaLocker",
            vec![
                MetaProperty::read_write(
                    "MetaLocker",
                    "label",
                    |b: &Locker| b.label.clone(),
                    |b, v| b.label = v,
                ),
                MetaProperty::write_only("MetaLocker", "pin", |b: &mut Locker, pin: i32| b.pin = pin),
            ],
        )
    }

    static BASE_META: MetaCell<Base> = MetaCell::new(base_meta);
    static DERIVED_META: MetaCell<Derived> = MetaCell::new(derived_meta);
    static LOCKER_META: MetaCell<Locker> = MetaCell::new(locker_meta);

    impl Display for Base {
        fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
            FieldWriter::bean(f, "MetaBase", |w| {
                w.field("code", self.code.clone())?;
                w.field("note", self.note.clone())
            })
        }
    }

    impl HashCode for Base {
        fn hash_code(&self) -> i32 {
            hash::fold(hash::fold(hash::type_seed("MetaBase"), &self.code), &self.note)
        }
    }

    impl Display for Derived {
        fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
            FieldWriter::bean(f, "MetaDerived", |w| {
                w.field("code", self.parent.code.clone())?;
                w.field("note", self.parent.note.clone())?;
                w.field("extra", self.extra)
            })
        }
    }

    impl HashCode for Derived {
        fn hash_code(&self) -> i32 {
            hash::fold(hash::DERIVED_SEED, &self.extra) ^ self.parent.hash_code()
        }
    }

    impl Display for Locker {
        fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
            FieldWriter::bean(f, "MetaLocker", |w| w.field("label", self.label.clone()))
        }
    }

    impl HashCode for Locker {
        fn hash_code(&self) -> i32 {
            hash::fold(hash::type_seed("MetaLocker"), &self.label)
        }
    }

    crate::impl_bean!(Base, "MetaBase", BASE_META.get());
    crate::impl_bean!(Derived, "MetaDerived", DERIVED_META.get());
    crate::impl_bean!(Locker, "MetaLocker", LOCKER_META.get());

    #[test]
    fn try_new_rejects_repeated_name() {
        let err = DirectMetaBean::try_new(
            "MetaDerived",
            vec![derived_extra(), derived_extra()],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            BeanError::DuplicateProperty { bean: "MetaDerived", property: "extra" }
        ));
    }

    #[test]
    fn try_extend_rejects_shadowing() {
        let err = DirectMetaBean::try_extend(
            "MetaDerived",
            BASE_META.get(),
            |b: &Derived| &b.parent,
            |b: &mut Derived| &mut b.parent,
            vec![derived_shadow()],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            BeanError::DuplicateProperty { bean: "MetaDerived", property: "code" }
        ));
    }

    #[test]
    fn try_extend_puts_inherited_first() {
        let meta = DirectMetaBean::try_extend(
            "MetaDerived",
            BASE_META.get(),
            |b: &Derived| &b.parent,
            |b: &mut Derived| &mut b.parent,
            vec![derived_extra()],
        )
        .unwrap();
        let names: Vec<_> = meta.meta_property_map().keys().copied().collect();
        assert_eq!(names, ["code", "note", "extra"]);
    }

    #[test]
    fn two_property_map_in_declaration_order() {
        let names: Vec<_> = BASE_META.get().meta_property_map().keys().copied().collect();
        assert_eq!(names, ["code", "note"]);
    }

    #[test]
    fn extend_keeps_inherited_descriptor() {
        let meta = DERIVED_META.get();
        let names: Vec<_> = meta.meta_property_map().keys().copied().collect();
        assert_eq!(names, ["code", "note", "extra"]);

        let code = meta.meta_property("code").unwrap();
        assert_eq!(code.declaring_bean(), "MetaBase");
        assert_eq!(code.value_type(), "String");

        let mut bean = Derived::default();
        meta.set(&mut bean, "code", Value::from("c"), false).unwrap();
        assert_eq!(bean.parent.code.as_deref(), Some("c"));
        assert_eq!(bean.extra, 0);
    }

    #[test]
    fn write_only_read_is_null_when_quiet() {
        let meta = LOCKER_META.get();
        let mut locker = Locker::default();
        meta.set(&mut locker, "pin", Value::Int(1234), false).unwrap();
        assert_eq!(locker.pin, 1234);

        assert_eq!(meta.get(&locker, "pin", true).unwrap(), Value::Null);
        let err = meta.get(&locker, "pin", false).unwrap_err();
        assert!(matches!(err, BeanError::NotReadable(ref p) if p == "pin"));
    }

    #[test]
    fn write_only_read_through_dyn_meta() {
        let locker = Locker {
            label: Some("front".to_string()),
            pin: 7,
        };
        let meta: &dyn MetaBean = LOCKER_META.get();
        assert_eq!(meta.property_get(&locker, "pin", true).unwrap(), Value::Null);
        assert!(meta.property_get(&locker, "pin", false).is_err());
        assert!(meta.property_get(&locker, "nope", true).unwrap_err().is_not_found());
        assert_eq!(
            meta.property_get(&locker, "label", false).unwrap(),
            Value::from("front")
        );
    }

    #[test]
    fn wrong_bean_type_rejected() {
        let meta: &dyn MetaBean = LOCKER_META.get();
        let err = meta.property_get(&Base::default(), "label", false).unwrap_err();
        assert!(matches!(
            err,
            BeanError::WrongBeanType { expected: "MetaLocker", found: "MetaBase" }
        ));
    }
}
