//! Immutable beans with builders
//!
//! Three levels: [`ImmPerson`], [`ImmSubPerson`] (adds `middleName`), and
//! [`ImmSubSubPerson`] (adds `codeCounts`). Values are fixed by `build`;
//! edits go through `to_builder` and produce a new bean. The first and last
//! levels memoize their hash code.

use bean_core::hash::{self, HashCache, HashCode};
use bean_core::{
    convert, required, Bean, BeanBuilder, BeanError, DirectMetaBean, FieldWriter, MetaBean,
    MetaCell, MetaProperty, Property, PropertyValue, ToBuilder, TypedBuilder, Value,
};
use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};
use std::ops::Deref;

static META: MetaCell<ImmPerson> = MetaCell::new(ImmPerson::assemble_meta);
static SUB_META: MetaCell<ImmSubPerson> = MetaCell::new(ImmSubPerson::assemble_meta);
static SUB_SUB_META: MetaCell<ImmSubSubPerson> = MetaCell::new(ImmSubSubPerson::assemble_meta);

/// Immutable person
///
/// `forename` and `aliases` are required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImmPerson {
    forename: String,
    surname: Option<String>,
    number_of_cars: i32,
    aliases: Vec<String>,
    hash: HashCache,
}

impl ImmPerson {
    /// Bean name
    pub const NAME: &'static str = "ImmPerson";

    /// Meta-bean singleton
    #[must_use]
    pub fn meta() -> &'static DirectMetaBean<ImmPerson> {
        META.get()
    }

    /// Empty builder
    #[inline]
    #[must_use]
    pub fn builder() -> ImmPersonBuilder {
        ImmPersonBuilder::default()
    }

    fn assemble_meta() -> DirectMetaBean<ImmPerson> {
        DirectMetaBean::new(
            Self::NAME,
            vec![
                MetaProperty::immutable(Self::NAME, "forename", |b: &ImmPerson| b.forename.clone())
                    .required(),
                MetaProperty::immutable(Self::NAME, "surname", |b: &ImmPerson| b.surname.clone()),
                MetaProperty::immutable(Self::NAME, "numberOfCars", ImmPerson::number_of_cars),
                MetaProperty::immutable(Self::NAME, "aliases", |b: &ImmPerson| b.aliases.clone())
                    .required(),
            ],
        )
        .with_builder(ImmPersonBuilder::boxed)
    }

    /// Forename
    #[inline]
    #[must_use]
    pub fn forename(&self) -> &str {
        &self.forename
    }

    /// Forename property handle
    ///
    /// # Errors
    /// Fails only if the meta-bean lost the property
    pub fn forename_property(&self) -> Result<Property<'_, ImmPerson>, BeanError> {
        Self::meta().property(self, "forename")
    }

    /// Surname
    #[inline]
    #[must_use]
    pub fn surname(&self) -> Option<&str> {
        self.surname.as_deref()
    }

    /// Number of cars
    #[inline]
    #[must_use]
    pub fn number_of_cars(&self) -> i32 {
        self.number_of_cars
    }

    /// Aliases
    #[inline]
    #[must_use]
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Whether the hash code has been memoized
    #[inline]
    #[must_use]
    pub fn is_hash_cached(&self) -> bool {
        self.hash.is_computed()
    }

    fn write_fields(&self, w: &mut FieldWriter<'_, '_>) -> fmt::Result {
        w.field("forename", self.forename.clone())?;
        w.field("surname", self.surname.clone())?;
        w.field("numberOfCars", self.number_of_cars)?;
        w.field("aliases", self.aliases.clone())
    }
}

impl HashCode for ImmPerson {
    fn hash_code(&self) -> i32 {
        self.hash.get_or_compute(|| {
            let hash = hash::fold(hash::type_seed(Self::NAME), &self.forename);
            let hash = hash::fold(hash, &self.surname);
            let hash = hash::fold(hash, &self.number_of_cars);
            hash::fold(hash, &self.aliases)
        })
    }
}

impl Display for ImmPerson {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        FieldWriter::bean(f, Self::NAME, |w| self.write_fields(w))
    }
}

impl ToBuilder for ImmPerson {
    type Builder = ImmPersonBuilder;

    fn to_builder(&self) -> ImmPersonBuilder {
        ImmPersonBuilder {
            forename: Some(self.forename.clone()),
            surname: self.surname.clone(),
            number_of_cars: self.number_of_cars,
            aliases: Some(self.aliases.clone()),
        }
    }
}

bean_core::impl_bean!(ImmPerson, "ImmPerson", ImmPerson::meta());

/// Builder for [`ImmPerson`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImmPersonBuilder {
    forename: Option<String>,
    surname: Option<String>,
    number_of_cars: i32,
    aliases: Option<Vec<String>>,
}

impl ImmPersonBuilder {
    fn boxed() -> Box<dyn BeanBuilder> {
        Box::new(Self::default())
    }

    /// Set forename
    #[inline]
    #[must_use]
    pub fn forename(mut self, forename: impl Into<String>) -> Self {
        self.forename = Some(forename.into());
        self
    }

    /// Set surname
    #[inline]
    #[must_use]
    pub fn surname(mut self, surname: impl Into<String>) -> Self {
        self.surname = Some(surname.into());
        self
    }

    /// Clear surname
    #[inline]
    #[must_use]
    pub fn no_surname(mut self) -> Self {
        self.surname = None;
        self
    }

    /// Set number of cars
    #[inline]
    #[must_use]
    pub fn number_of_cars(mut self, number_of_cars: i32) -> Self {
        self.number_of_cars = number_of_cars;
        self
    }

    /// Set aliases
    #[must_use]
    pub fn aliases(mut self, aliases: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.aliases = Some(aliases.into_iter().map(Into::into).collect());
        self
    }

    fn build_person(self) -> Result<ImmPerson, BeanError> {
        Ok(ImmPerson {
            forename: required(self.forename, ImmPerson::NAME, "forename")?,
            surname: self.surname,
            number_of_cars: self.number_of_cars,
            aliases: required(self.aliases, ImmPerson::NAME, "aliases")?,
            hash: HashCache::new(),
        })
    }

    fn write_fields(&self, w: &mut FieldWriter<'_, '_>) -> fmt::Result {
        w.field("forename", self.forename.clone())?;
        w.field("surname", self.surname.clone())?;
        w.field("numberOfCars", self.number_of_cars)?;
        w.field("aliases", self.aliases.clone())
    }
}

impl BeanBuilder for ImmPersonBuilder {
    fn meta_bean(&self) -> &'static dyn MetaBean {
        ImmPerson::meta()
    }

    fn get(&self, name: &str) -> Result<Value, BeanError> {
        let value = match ImmPerson::meta().meta_property(name)?.name() {
            "forename" => self.forename.clone().into_value(),
            "surname" => self.surname.clone().into_value(),
            "numberOfCars" => self.number_of_cars.into_value(),
            "aliases" => self.aliases.clone().into_value(),
            _ => return Err(BeanError::no_such_property(ImmPerson::NAME, name)),
        };
        Ok(value)
    }

    fn set(&mut self, name: &str, value: Value) -> Result<(), BeanError> {
        match ImmPerson::meta().meta_property(name)?.name() {
            "forename" => self.forename = convert(name, value)?,
            "surname" => self.surname = convert(name, value)?,
            "numberOfCars" => self.number_of_cars = convert(name, value)?,
            "aliases" => self.aliases = convert(name, value)?,
            _ => return Err(BeanError::no_such_property(ImmPerson::NAME, name)),
        }
        Ok(())
    }

    fn build_bean(self: Box<Self>) -> Result<Box<dyn Bean>, BeanError> {
        Ok(Box::new((*self).build_person()?))
    }
}

impl TypedBuilder for ImmPersonBuilder {
    type Bean = ImmPerson;

    fn build(self) -> Result<ImmPerson, BeanError> {
        self.build_person()
    }
}

impl Display for ImmPersonBuilder {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        FieldWriter::bean(f, "ImmPerson.Builder", |w| self.write_fields(w))
    }
}

/// [`ImmPerson`] with a middle name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImmSubPerson {
    parent: ImmPerson,
    middle_name: Option<String>,
}

impl ImmSubPerson {
    /// Bean name
    pub const NAME: &'static str = "ImmSubPerson";

    /// Meta-bean singleton
    #[must_use]
    pub fn meta() -> &'static DirectMetaBean<ImmSubPerson> {
        SUB_META.get()
    }

    /// Empty builder
    #[inline]
    #[must_use]
    pub fn builder() -> ImmSubPersonBuilder {
        ImmSubPersonBuilder::default()
    }

    fn assemble_meta() -> DirectMetaBean<ImmSubPerson> {
        DirectMetaBean::extend(
            Self::NAME,
            ImmPerson::meta(),
            |b: &ImmSubPerson| &b.parent,
            |b: &mut ImmSubPerson| &mut b.parent,
            vec![MetaProperty::immutable(
                Self::NAME,
                "middleName",
                |b: &ImmSubPerson| b.middle_name.clone(),
            )],
        )
        .with_builder(ImmSubPersonBuilder::boxed)
    }

    /// Middle name
    #[inline]
    #[must_use]
    pub fn middle_name(&self) -> Option<&str> {
        self.middle_name.as_deref()
    }

    fn write_fields(&self, w: &mut FieldWriter<'_, '_>) -> fmt::Result {
        self.parent.write_fields(w)?;
        w.field("middleName", self.middle_name.clone())
    }
}

impl Deref for ImmSubPerson {
    type Target = ImmPerson;

    fn deref(&self) -> &ImmPerson {
        &self.parent
    }
}

impl HashCode for ImmSubPerson {
    fn hash_code(&self) -> i32 {
        hash::fold(hash::DERIVED_SEED, &self.middle_name) ^ self.parent.hash_code()
    }
}

impl Display for ImmSubPerson {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        FieldWriter::bean(f, Self::NAME, |w| self.write_fields(w))
    }
}

impl ToBuilder for ImmSubPerson {
    type Builder = ImmSubPersonBuilder;

    fn to_builder(&self) -> ImmSubPersonBuilder {
        ImmSubPersonBuilder {
            parent: self.parent.to_builder(),
            middle_name: self.middle_name.clone(),
        }
    }
}

bean_core::impl_bean!(ImmSubPerson, "ImmSubPerson", ImmSubPerson::meta());

/// Builder for [`ImmSubPerson`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImmSubPersonBuilder {
    parent: ImmPersonBuilder,
    middle_name: Option<String>,
}

impl ImmSubPersonBuilder {
    fn boxed() -> Box<dyn BeanBuilder> {
        Box::new(Self::default())
    }

    /// Set forename
    #[inline]
    #[must_use]
    pub fn forename(mut self, forename: impl Into<String>) -> Self {
        self.parent = self.parent.forename(forename);
        self
    }

    /// Set surname
    #[inline]
    #[must_use]
    pub fn surname(mut self, surname: impl Into<String>) -> Self {
        self.parent = self.parent.surname(surname);
        self
    }

    /// Set number of cars
    #[inline]
    #[must_use]
    pub fn number_of_cars(mut self, number_of_cars: i32) -> Self {
        self.parent = self.parent.number_of_cars(number_of_cars);
        self
    }

    /// Set aliases
    #[must_use]
    pub fn aliases(mut self, aliases: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.parent = self.parent.aliases(aliases);
        self
    }

    /// Set middle name
    #[inline]
    #[must_use]
    pub fn middle_name(mut self, middle_name: impl Into<String>) -> Self {
        self.middle_name = Some(middle_name.into());
        self
    }

    fn build_person(self) -> Result<ImmSubPerson, BeanError> {
        Ok(ImmSubPerson {
            parent: self.parent.build_person()?,
            middle_name: self.middle_name,
        })
    }

    fn write_fields(&self, w: &mut FieldWriter<'_, '_>) -> fmt::Result {
        self.parent.write_fields(w)?;
        w.field("middleName", self.middle_name.clone())
    }
}

impl BeanBuilder for ImmSubPersonBuilder {
    fn meta_bean(&self) -> &'static dyn MetaBean {
        ImmSubPerson::meta()
    }

    fn get(&self, name: &str) -> Result<Value, BeanError> {
        let property = ImmSubPerson::meta().meta_property(name)?;
        match property.name() {
            "middleName" => Ok(self.middle_name.clone().into_value()),
            _ if property.declaring_bean() != ImmSubPerson::NAME => self.parent.get(name),
            _ => Err(BeanError::no_such_property(ImmSubPerson::NAME, name)),
        }
    }

    fn set(&mut self, name: &str, value: Value) -> Result<(), BeanError> {
        let property = ImmSubPerson::meta().meta_property(name)?;
        match property.name() {
            "middleName" => self.middle_name = convert(name, value)?,
            _ if property.declaring_bean() != ImmSubPerson::NAME => self.parent.set(name, value)?,
            _ => return Err(BeanError::no_such_property(ImmSubPerson::NAME, name)),
        }
        Ok(())
    }

    fn build_bean(self: Box<Self>) -> Result<Box<dyn Bean>, BeanError> {
        Ok(Box::new((*self).build_person()?))
    }
}

impl TypedBuilder for ImmSubPersonBuilder {
    type Bean = ImmSubPerson;

    fn build(self) -> Result<ImmSubPerson, BeanError> {
        self.build_person()
    }
}

impl Display for ImmSubPersonBuilder {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        FieldWriter::bean(f, "ImmSubPerson.Builder", |w| self.write_fields(w))
    }
}

/// [`ImmSubPerson`] with per-code occurrence counts
///
/// `codeCounts` is optional; an absent map renders as `null`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImmSubSubPerson {
    parent: ImmSubPerson,
    code_counts: Option<BTreeMap<String, i32>>,
    hash: HashCache,
}

impl ImmSubSubPerson {
    /// Bean name
    pub const NAME: &'static str = "ImmSubSubPerson";

    /// Meta-bean singleton
    #[must_use]
    pub fn meta() -> &'static DirectMetaBean<ImmSubSubPerson> {
        SUB_SUB_META.get()
    }

    /// Empty builder
    #[inline]
    #[must_use]
    pub fn builder() -> ImmSubSubPersonBuilder {
        ImmSubSubPersonBuilder::default()
    }

    fn assemble_meta() -> DirectMetaBean<ImmSubSubPerson> {
        DirectMetaBean::extend(
            Self::NAME,
            ImmSubPerson::meta(),
            |b: &ImmSubSubPerson| &b.parent,
            |b: &mut ImmSubSubPerson| &mut b.parent,
            vec![MetaProperty::immutable(
                Self::NAME,
                "codeCounts",
                |b: &ImmSubSubPerson| b.code_counts.clone(),
            )],
        )
        .with_builder(ImmSubSubPersonBuilder::boxed)
    }

    /// Occurrence count per code, `None` if never set
    #[inline]
    #[must_use]
    pub fn code_counts(&self) -> Option<&BTreeMap<String, i32>> {
        self.code_counts.as_ref()
    }

    /// Occurrences of one code, `0` if absent
    #[must_use]
    pub fn count_of(&self, code: &str) -> i32 {
        self.code_counts
            .as_ref()
            .and_then(|counts| counts.get(code).copied())
            .unwrap_or(0)
    }
}

impl Deref for ImmSubSubPerson {
    type Target = ImmSubPerson;

    fn deref(&self) -> &ImmSubPerson {
        &self.parent
    }
}

impl HashCode for ImmSubSubPerson {
    fn hash_code(&self) -> i32 {
        self.hash.get_or_compute(|| {
            hash::fold(hash::DERIVED_SEED, &self.code_counts) ^ self.parent.hash_code()
        })
    }
}

impl Display for ImmSubSubPerson {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        FieldWriter::bean(f, Self::NAME, |w| {
            self.parent.write_fields(w)?;
            w.field("codeCounts", self.code_counts.clone())
        })
    }
}

impl ToBuilder for ImmSubSubPerson {
    type Builder = ImmSubSubPersonBuilder;

    fn to_builder(&self) -> ImmSubSubPersonBuilder {
        ImmSubSubPersonBuilder {
            parent: self.parent.to_builder(),
            code_counts: self.code_counts.clone(),
        }
    }
}

bean_core::impl_bean!(ImmSubSubPerson, "ImmSubSubPerson", ImmSubSubPerson::meta());

/// Builder for [`ImmSubSubPerson`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImmSubSubPersonBuilder {
    parent: ImmSubPersonBuilder,
    code_counts: Option<BTreeMap<String, i32>>,
}

impl ImmSubSubPersonBuilder {
    fn boxed() -> Box<dyn BeanBuilder> {
        Box::new(Self::default())
    }

    /// Set forename
    #[inline]
    #[must_use]
    pub fn forename(mut self, forename: impl Into<String>) -> Self {
        self.parent = self.parent.forename(forename);
        self
    }

    /// Set surname
    #[inline]
    #[must_use]
    pub fn surname(mut self, surname: impl Into<String>) -> Self {
        self.parent = self.parent.surname(surname);
        self
    }

    /// Set number of cars
    #[inline]
    #[must_use]
    pub fn number_of_cars(mut self, number_of_cars: i32) -> Self {
        self.parent = self.parent.number_of_cars(number_of_cars);
        self
    }

    /// Set aliases
    #[must_use]
    pub fn aliases(mut self, aliases: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.parent = self.parent.aliases(aliases);
        self
    }

    /// Set middle name
    #[inline]
    #[must_use]
    pub fn middle_name(mut self, middle_name: impl Into<String>) -> Self {
        self.parent = self.parent.middle_name(middle_name);
        self
    }

    /// Replace all code counts
    #[inline]
    #[must_use]
    pub fn code_counts(mut self, code_counts: BTreeMap<String, i32>) -> Self {
        self.code_counts = Some(code_counts);
        self
    }

    /// Clear code counts
    #[inline]
    #[must_use]
    pub fn no_code_counts(mut self) -> Self {
        self.code_counts = None;
        self
    }

    /// Count one more occurrence of `code`
    #[must_use]
    pub fn add_code(mut self, code: impl Into<String>) -> Self {
        let counts = self.code_counts.get_or_insert_with(BTreeMap::new);
        *counts.entry(code.into()).or_insert(0) += 1;
        self
    }

    fn build_person(self) -> Result<ImmSubSubPerson, BeanError> {
        Ok(ImmSubSubPerson {
            parent: self.parent.build_person()?,
            code_counts: self.code_counts,
            hash: HashCache::new(),
        })
    }
}

impl BeanBuilder for ImmSubSubPersonBuilder {
    fn meta_bean(&self) -> &'static dyn MetaBean {
        ImmSubSubPerson::meta()
    }

    fn get(&self, name: &str) -> Result<Value, BeanError> {
        let property = ImmSubSubPerson::meta().meta_property(name)?;
        match property.name() {
            "codeCounts" => Ok(self.code_counts.clone().into_value()),
            _ if property.declaring_bean() != ImmSubSubPerson::NAME => self.parent.get(name),
            _ => Err(BeanError::no_such_property(ImmSubSubPerson::NAME, name)),
        }
    }

    fn set(&mut self, name: &str, value: Value) -> Result<(), BeanError> {
        let property = ImmSubSubPerson::meta().meta_property(name)?;
        match property.name() {
            "codeCounts" => self.code_counts = convert(name, value)?,
            _ if property.declaring_bean() != ImmSubSubPerson::NAME => self.parent.set(name, value)?,
            _ => return Err(BeanError::no_such_property(ImmSubSubPerson::NAME, name)),
        }
        Ok(())
    }

    fn build_bean(self: Box<Self>) -> Result<Box<dyn Bean>, BeanError> {
        Ok(Box::new((*self).build_person()?))
    }
}

impl TypedBuilder for ImmSubSubPersonBuilder {
    type Bean = ImmSubSubPerson;

    fn build(self) -> Result<ImmSubSubPerson, BeanError> {
        self.build_person()
    }
}

impl Display for ImmSubSubPersonBuilder {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        FieldWriter::bean(f, "ImmSubSubPerson.Builder", |w| {
            self.parent.write_fields(w)?;
            w.field("codeCounts", self.code_counts.clone())
        })
    }
}
