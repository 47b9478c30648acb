//! Mutable beans with typed builders
//!
//! [`SimplePerson`] stays mutable after `build`. [`SimpleSubPerson`] embeds
//! a `SimplePerson` and adds `middleName`; its meta-bean lists the inherited
//! properties first.

use bean_core::hash::{self, HashCode};
use bean_core::{
    convert, Bean, BeanBuilder, BeanError, DirectMetaBean, FieldWriter, MetaBean, MetaCell,
    MetaProperty, PropertyMut, PropertyValue, ToBuilder, TypedBuilder, Value,
};
use std::fmt::{self, Display, Formatter};
use std::ops::{Deref, DerefMut};

static META: MetaCell<SimplePerson> = MetaCell::new(SimplePerson::assemble_meta);
static SUB_META: MetaCell<SimpleSubPerson> = MetaCell::new(SimpleSubPerson::assemble_meta);

/// Mutable person built through a typed builder
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimplePerson {
    forename: Option<String>,
    surname: Option<String>,
    number_of_cars: i32,
}

impl SimplePerson {
    /// Bean name
    pub const NAME: &'static str = "SimplePerson";

    /// Meta-bean singleton
    #[must_use]
    pub fn meta() -> &'static DirectMetaBean<SimplePerson> {
        META.get()
    }

    /// Empty builder
    #[inline]
    #[must_use]
    pub fn builder() -> SimplePersonBuilder {
        SimplePersonBuilder::default()
    }

    fn assemble_meta() -> DirectMetaBean<SimplePerson> {
        DirectMetaBean::new(
            Self::NAME,
            vec![
                MetaProperty::read_write(
                    Self::NAME,
                    "forename",
                    |b: &SimplePerson| b.forename.clone(),
                    SimplePerson::set_forename,
                ),
                MetaProperty::read_write(
                    Self::NAME,
                    "surname",
                    |b: &SimplePerson| b.surname.clone(),
                    SimplePerson::set_surname,
                ),
                MetaProperty::read_write(
                    Self::NAME,
                    "numberOfCars",
                    SimplePerson::number_of_cars,
                    SimplePerson::set_number_of_cars,
                ),
            ],
        )
        .with_builder(SimplePersonBuilder::boxed)
    }

    /// Forename
    #[inline]
    #[must_use]
    pub fn forename(&self) -> Option<&str> {
        self.forename.as_deref()
    }

    /// Set forename
    #[inline]
    pub fn set_forename(&mut self, forename: Option<String>) {
        self.forename = forename;
    }

    /// Surname
    #[inline]
    #[must_use]
    pub fn surname(&self) -> Option<&str> {
        self.surname.as_deref()
    }

    /// Set surname
    #[inline]
    pub fn set_surname(&mut self, surname: Option<String>) {
        self.surname = surname;
    }

    /// Surname property handle, writable
    ///
    /// # Errors
    /// Fails only if the meta-bean lost the property
    pub fn surname_property_mut(&mut self) -> Result<PropertyMut<'_, SimplePerson>, BeanError> {
        Self::meta().property_mut(self, "surname")
    }

    /// Number of cars
    #[inline]
    #[must_use]
    pub fn number_of_cars(&self) -> i32 {
        self.number_of_cars
    }

    /// Set number of cars
    #[inline]
    pub fn set_number_of_cars(&mut self, number_of_cars: i32) {
        self.number_of_cars = number_of_cars;
    }

    fn write_fields(&self, w: &mut FieldWriter<'_, '_>) -> fmt::Result {
        w.field("forename", self.forename.clone())?;
        w.field("surname", self.surname.clone())?;
        w.field("numberOfCars", self.number_of_cars)
    }
}

impl HashCode for SimplePerson {
    fn hash_code(&self) -> i32 {
        let hash = hash::fold(hash::type_seed(Self::NAME), &self.forename);
        let hash = hash::fold(hash, &self.surname);
        hash::fold(hash, &self.number_of_cars)
    }
}

impl Display for SimplePerson {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        FieldWriter::bean(f, Self::NAME, |w| self.write_fields(w))
    }
}

impl ToBuilder for SimplePerson {
    type Builder = SimplePersonBuilder;

    fn to_builder(&self) -> SimplePersonBuilder {
        SimplePersonBuilder {
            forename: self.forename.clone(),
            surname: self.surname.clone(),
            number_of_cars: self.number_of_cars,
        }
    }
}

bean_core::impl_bean!(SimplePerson, "SimplePerson", SimplePerson::meta());

/// Builder for [`SimplePerson`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimplePersonBuilder {
    forename: Option<String>,
    surname: Option<String>,
    number_of_cars: i32,
}

impl SimplePersonBuilder {
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

    /// Set number of cars
    #[inline]
    #[must_use]
    pub fn number_of_cars(mut self, number_of_cars: i32) -> Self {
        self.number_of_cars = number_of_cars;
        self
    }

    fn build_person(self) -> SimplePerson {
        SimplePerson {
            forename: self.forename,
            surname: self.surname,
            number_of_cars: self.number_of_cars,
        }
    }

    fn write_fields(&self, w: &mut FieldWriter<'_, '_>) -> fmt::Result {
        w.field("forename", self.forename.clone())?;
        w.field("surname", self.surname.clone())?;
        w.field("numberOfCars", self.number_of_cars)
    }
}

impl BeanBuilder for SimplePersonBuilder {
    fn meta_bean(&self) -> &'static dyn MetaBean {
        SimplePerson::meta()
    }

    fn get(&self, name: &str) -> Result<Value, BeanError> {
        match SimplePerson::meta().meta_property(name)?.name() {
            "forename" => Ok(self.forename.clone().into_value()),
            "surname" => Ok(self.surname.clone().into_value()),
            "numberOfCars" => Ok(self.number_of_cars.into_value()),
            _ => Err(BeanError::no_such_property(SimplePerson::NAME, name)),
        }
    }

    fn set(&mut self, name: &str, value: Value) -> Result<(), BeanError> {
        match SimplePerson::meta().meta_property(name)?.name() {
            "forename" => self.forename = convert(name, value)?,
            "surname" => self.surname = convert(name, value)?,
            "numberOfCars" => self.number_of_cars = convert(name, value)?,
            _ => return Err(BeanError::no_such_property(SimplePerson::NAME, name)),
        }
        Ok(())
    }

    fn build_bean(self: Box<Self>) -> Result<Box<dyn Bean>, BeanError> {
        Ok(Box::new((*self).build_person()))
    }
}

impl TypedBuilder for SimplePersonBuilder {
    type Bean = SimplePerson;

    fn build(self) -> Result<SimplePerson, BeanError> {
        Ok(self.build_person())
    }
}

impl Display for SimplePersonBuilder {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        FieldWriter::bean(f, "SimplePerson.Builder", |w| self.write_fields(w))
    }
}

/// [`SimplePerson`] with a middle name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimpleSubPerson {
    parent: SimplePerson,
    middle_name: Option<String>,
}

impl SimpleSubPerson {
    /// Bean name
    pub const NAME: &'static str = "SimpleSubPerson";

    /// Meta-bean singleton
    #[must_use]
    pub fn meta() -> &'static DirectMetaBean<SimpleSubPerson> {
        SUB_META.get()
    }

    /// Empty builder
    #[inline]
    #[must_use]
    pub fn builder() -> SimpleSubPersonBuilder {
        SimpleSubPersonBuilder::default()
    }

    fn assemble_meta() -> DirectMetaBean<SimpleSubPerson> {
        DirectMetaBean::extend(
            Self::NAME,
            SimplePerson::meta(),
            |b: &SimpleSubPerson| &b.parent,
            |b: &mut SimpleSubPerson| &mut b.parent,
            vec![MetaProperty::read_write(
                Self::NAME,
                "middleName",
                |b: &SimpleSubPerson| b.middle_name.clone(),
                SimpleSubPerson::set_middle_name,
            )],
        )
        .with_builder(SimpleSubPersonBuilder::boxed)
    }

    /// Middle name
    #[inline]
    #[must_use]
    pub fn middle_name(&self) -> Option<&str> {
        self.middle_name.as_deref()
    }

    /// Set middle name
    #[inline]
    pub fn set_middle_name(&mut self, middle_name: Option<String>) {
        self.middle_name = middle_name;
    }
}

impl Deref for SimpleSubPerson {
    type Target = SimplePerson;

    fn deref(&self) -> &SimplePerson {
        &self.parent
    }
}

impl DerefMut for SimpleSubPerson {
    fn deref_mut(&mut self) -> &mut SimplePerson {
        &mut self.parent
    }
}

impl HashCode for SimpleSubPerson {
    fn hash_code(&self) -> i32 {
        hash::fold(hash::DERIVED_SEED, &self.middle_name) ^ self.parent.hash_code()
    }
}

impl Display for SimpleSubPerson {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        FieldWriter::bean(f, Self::NAME, |w| {
            self.parent.write_fields(w)?;
            w.field("middleName", self.middle_name.clone())
        })
    }
}

impl ToBuilder for SimpleSubPerson {
    type Builder = SimpleSubPersonBuilder;

    fn to_builder(&self) -> SimpleSubPersonBuilder {
        SimpleSubPersonBuilder {
            parent: self.parent.to_builder(),
            middle_name: self.middle_name.clone(),
        }
    }
}

bean_core::impl_bean!(SimpleSubPerson, "SimpleSubPerson", SimpleSubPerson::meta());

/// Builder for [`SimpleSubPerson`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimpleSubPersonBuilder {
    parent: SimplePersonBuilder,
    middle_name: Option<String>,
}

impl SimpleSubPersonBuilder {
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

    /// Set middle name
    #[inline]
    #[must_use]
    pub fn middle_name(mut self, middle_name: impl Into<String>) -> Self {
        self.middle_name = Some(middle_name.into());
        self
    }

    fn build_person(self) -> SimpleSubPerson {
        SimpleSubPerson {
            parent: self.parent.build_person(),
            middle_name: self.middle_name,
        }
    }
}

impl BeanBuilder for SimpleSubPersonBuilder {
    fn meta_bean(&self) -> &'static dyn MetaBean {
        SimpleSubPerson::meta()
    }

    fn get(&self, name: &str) -> Result<Value, BeanError> {
        let property = SimpleSubPerson::meta().meta_property(name)?;
        match property.name() {
            "middleName" => Ok(self.middle_name.clone().into_value()),
            _ if property.declaring_bean() != SimpleSubPerson::NAME => self.parent.get(name),
            _ => Err(BeanError::no_such_property(SimpleSubPerson::NAME, name)),
        }
    }

    fn set(&mut self, name: &str, value: Value) -> Result<(), BeanError> {
        let property = SimpleSubPerson::meta().meta_property(name)?;
        match property.name() {
            "middleName" => self.middle_name = convert(name, value)?,
            _ if property.declaring_bean() != SimpleSubPerson::NAME => self.parent.set(name, value)?,
            _ => return Err(BeanError::no_such_property(SimpleSubPerson::NAME, name)),
        }
        Ok(())
    }

    fn build_bean(self: Box<Self>) -> Result<Box<dyn Bean>, BeanError> {
        Ok(Box::new((*self).build_person()))
    }
}

impl TypedBuilder for SimpleSubPersonBuilder {
    type Bean = SimpleSubPerson;

    fn build(self) -> Result<SimpleSubPerson, BeanError> {
        Ok(self.build_person())
    }
}

impl Display for SimpleSubPersonBuilder {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        FieldWriter::bean(f, "SimpleSubPerson.Builder", |w| {
            self.parent.write_fields(w)?;
            w.field("middleName", self.middle_name.clone())
        })
    }
}
