//! Mutable person bean
//!
//! Every property is readable and writable, plus a derived `fullName`
//! that takes no part in equality, hashing, or `Display`.

use bean_core::hash::{self, HashCode};
use bean_core::{
    BeanError, DirectBeanBuilder, DirectMetaBean, FieldWriter, MetaCell, MetaProperty, Property,
    PropertyMut,
};
use std::fmt::{self, Display, Formatter};

static META: MetaCell<Person> = MetaCell::new(Person::assemble_meta);

/// Mutable person
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Person {
    forename: Option<String>,
    surname: Option<String>,
    number_of_cars: i32,
}

impl Person {
    /// Bean name
    pub const NAME: &'static str = "Person";

    /// Create empty person
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Meta-bean singleton
    #[must_use]
    pub fn meta() -> &'static DirectMetaBean<Person> {
        META.get()
    }

    fn assemble_meta() -> DirectMetaBean<Person> {
        DirectMetaBean::new(
            Self::NAME,
            vec![
                MetaProperty::read_write(
                    Self::NAME,
                    "forename",
                    |b: &Person| b.forename.clone(),
                    Person::set_forename,
                ),
                MetaProperty::read_write(
                    Self::NAME,
                    "surname",
                    |b: &Person| b.surname.clone(),
                    Person::set_surname,
                ),
                MetaProperty::read_write(
                    Self::NAME,
                    "numberOfCars",
                    Person::number_of_cars,
                    Person::set_number_of_cars,
                ),
                MetaProperty::derived(Self::NAME, "fullName", Person::full_name),
            ],
        )
        .with_builder(DirectBeanBuilder::<Person>::boxed)
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

    /// Forename property handle
    ///
    /// # Errors
    /// Fails only if the meta-bean lost the property
    pub fn forename_property(&self) -> Result<Property<'_, Person>, BeanError> {
        Self::meta().property(self, "forename")
    }

    /// Forename property handle, writable
    ///
    /// # Errors
    /// Fails only if the meta-bean lost the property
    pub fn forename_property_mut(&mut self) -> Result<PropertyMut<'_, Person>, BeanError> {
        Self::meta().property_mut(self, "forename")
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

    /// Forename and surname joined by a space, `None` if both are absent
    #[must_use]
    pub fn full_name(&self) -> Option<String> {
        match (&self.forename, &self.surname) {
            (Some(forename), Some(surname)) => Some(format!("{forename} {surname}")),
            (Some(name), None) | (None, Some(name)) => Some(name.clone()),
            (None, None) => None,
        }
    }
}

impl HashCode for Person {
    fn hash_code(&self) -> i32 {
        let hash = hash::fold(hash::type_seed(Self::NAME), &self.forename);
        let hash = hash::fold(hash, &self.surname);
        hash::fold(hash, &self.number_of_cars)
    }
}

impl Display for Person {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        FieldWriter::bean(f, Self::NAME, |w| {
            w.field("forename", self.forename.clone())?;
            w.field("surname", self.surname.clone())?;
            w.field("numberOfCars", self.number_of_cars)
        })
    }
}

bean_core::impl_bean!(Person, "Person", Person::meta());
