//! Mutable bean with a read-only subset
//!
//! `fieldFinal` and `personFinal` can be read but never written through
//! the meta-bean. `listFinal` and `flexiFinal` are writable, but a write
//! replaces their contents rather than the container.

use crate::person::Person;
use bean_core::hash::{self, HashCode};
use bean_core::{
    BeanError, DirectBeanBuilder, DirectMetaBean, FieldWriter, FlexiBean, MetaCell, MetaProperty,
    Property, PropertyMut,
};
use std::fmt::{self, Display, Formatter};

static META: MetaCell<FinalFieldBean> = MetaCell::new(FinalFieldBean::assemble_meta);

/// Bean mixing read-only and read-write properties
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FinalFieldBean {
    field_final: Option<String>,
    field_non_final: Option<String>,
    list_final: Vec<String>,
    flexi_final: FlexiBean,
    person_final: Person,
}

impl FinalFieldBean {
    /// Bean name
    pub const NAME: &'static str = "FinalFieldBean";

    /// Create bean with no final field value
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create bean with the final field set
    #[must_use]
    pub fn with_field_final(field_final: impl Into<String>) -> Self {
        Self {
            field_final: Some(field_final.into()),
            ..Self::default()
        }
    }

    /// Meta-bean singleton
    #[must_use]
    pub fn meta() -> &'static DirectMetaBean<FinalFieldBean> {
        META.get()
    }

    fn assemble_meta() -> DirectMetaBean<FinalFieldBean> {
        DirectMetaBean::new(
            Self::NAME,
            vec![
                MetaProperty::read_only(Self::NAME, "fieldFinal", |b: &FinalFieldBean| {
                    b.field_final.clone()
                }),
                MetaProperty::read_write(
                    Self::NAME,
                    "fieldNonFinal",
                    |b: &FinalFieldBean| b.field_non_final.clone(),
                    FinalFieldBean::set_field_non_final,
                ),
                MetaProperty::read_write(
                    Self::NAME,
                    "listFinal",
                    |b: &FinalFieldBean| b.list_final.clone(),
                    FinalFieldBean::set_list_final,
                )
                .required(),
                MetaProperty::read_write(
                    Self::NAME,
                    "flexiFinal",
                    |b: &FinalFieldBean| b.flexi_final.clone(),
                    |b, flexi: FlexiBean| b.set_flexi_final(&flexi),
                )
                .required(),
                MetaProperty::read_only(Self::NAME, "personFinal", |b: &FinalFieldBean| {
                    b.person_final.clone()
                })
                .required(),
            ],
        )
        .with_builder(DirectBeanBuilder::<FinalFieldBean>::boxed)
    }

    /// Field fixed at construction
    #[inline]
    #[must_use]
    pub fn field_final(&self) -> Option<&str> {
        self.field_final.as_deref()
    }

    /// Field fixed at construction, property handle
    ///
    /// # Errors
    /// Fails only if the meta-bean lost the property
    pub fn field_final_property(&self) -> Result<Property<'_, FinalFieldBean>, BeanError> {
        Self::meta().property(self, "fieldFinal")
    }

    /// Field fixed at construction, writable handle (writes are rejected)
    ///
    /// # Errors
    /// Fails only if the meta-bean lost the property
    pub fn field_final_property_mut(
        &mut self,
    ) -> Result<PropertyMut<'_, FinalFieldBean>, BeanError> {
        Self::meta().property_mut(self, "fieldFinal")
    }

    /// Ordinary field
    #[inline]
    #[must_use]
    pub fn field_non_final(&self) -> Option<&str> {
        self.field_non_final.as_deref()
    }

    /// Set ordinary field
    #[inline]
    pub fn set_field_non_final(&mut self, value: Option<String>) {
        self.field_non_final = value;
    }

    /// List whose container never changes
    #[inline]
    #[must_use]
    pub fn list_final(&self) -> &[String] {
        &self.list_final
    }

    /// Replace the list contents
    pub fn set_list_final(&mut self, items: Vec<String>) {
        self.list_final.clear();
        self.list_final.extend(items);
    }

    /// Flexi bean whose container never changes
    #[inline]
    #[must_use]
    pub fn flexi_final(&self) -> &FlexiBean {
        &self.flexi_final
    }

    /// Replace the flexi bean contents
    pub fn set_flexi_final(&mut self, flexi: &FlexiBean) {
        self.flexi_final.clear();
        self.flexi_final.put_all(flexi);
    }

    /// Nested person, not replaceable
    #[inline]
    #[must_use]
    pub fn person_final(&self) -> &Person {
        &self.person_final
    }

    /// Nested person, for in-place edits
    #[inline]
    pub fn person_final_mut(&mut self) -> &mut Person {
        &mut self.person_final
    }
}

impl HashCode for FinalFieldBean {
    fn hash_code(&self) -> i32 {
        let hash = hash::fold(hash::type_seed(Self::NAME), &self.field_final);
        let hash = hash::fold(hash, &self.field_non_final);
        let hash = hash::fold(hash, &self.list_final);
        let hash = hash::fold(hash, &self.flexi_final);
        hash::fold(hash, &self.person_final)
    }
}

impl Display for FinalFieldBean {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        FieldWriter::bean(f, Self::NAME, |w| {
            w.field("fieldFinal", self.field_final.clone())?;
            w.field("fieldNonFinal", self.field_non_final.clone())?;
            w.field("listFinal", self.list_final.clone())?;
            w.field("flexiFinal", self.flexi_final.clone())?;
            w.field("personFinal", self.person_final.clone())
        })
    }
}

bean_core::impl_bean!(FinalFieldBean, "FinalFieldBean", FinalFieldBean::meta());
