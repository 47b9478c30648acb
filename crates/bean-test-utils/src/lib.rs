//! Testing utilities for the beanbag workspace
//!
//! Shared fixtures and proptest strategies for the sample beans.

#![allow(missing_docs)]

use bean_core::{FlexiBean, TypedBuilder};
use bean_sample::{FinalFieldBean, ImmPerson, ImmSubSubPerson, Person, SimpleSubPerson};
use proptest::prelude::*;

pub fn create_person(forename: &str, surname: &str, cars: i32) -> Person {
    let mut person = Person::new();
    person.set_forename(Some(forename.to_string()));
    person.set_surname(Some(surname.to_string()));
    person.set_number_of_cars(cars);
    person
}

pub fn create_imm_person() -> ImmPerson {
    ImmPerson::builder()
        .forename("Grace")
        .surname("Hopper")
        .number_of_cars(1)
        .aliases(["Amazing Grace"])
        .build()
        .unwrap()
}

pub fn create_imm_sub_sub_person() -> ImmSubSubPerson {
    ImmSubSubPerson::builder()
        .forename("Grace")
        .surname("Hopper")
        .aliases(["Amazing Grace", "Grandma COBOL"])
        .middle_name("Brewster")
        .add_code("COBOL")
        .add_code("COBOL")
        .add_code("FLOW-MATIC")
        .build()
        .unwrap()
}

pub fn create_simple_sub_person() -> SimpleSubPerson {
    SimpleSubPerson::builder()
        .forename("Ada")
        .surname("Lovelace")
        .middle_name("King")
        .build()
        .unwrap()
}

pub fn create_final_field_bean() -> FinalFieldBean {
    let mut bean = FinalFieldBean::with_field_final("fixed");
    bean.set_field_non_final(Some("loose".to_string()));
    bean.set_list_final(vec!["a".to_string(), "b".to_string()]);
    let mut flexi = FlexiBean::new();
    flexi.put("colour", "red");
    flexi.put("size", 3);
    bean.set_flexi_final(&flexi);
    *bean.person_final_mut() = create_person("John", "Doe", 2);
    bean
}

fn name() -> impl Strategy<Value = String> {
    "[A-Za-z][a-z]{0,11}"
}

pub fn person_strategy() -> impl Strategy<Value = Person> {
    (
        proptest::option::of(name()),
        proptest::option::of(name()),
        any::<i32>(),
    )
        .prop_map(|(forename, surname, cars)| {
            let mut person = Person::new();
            person.set_forename(forename);
            person.set_surname(surname);
            person.set_number_of_cars(cars);
            person
        })
}

pub fn imm_person_strategy() -> impl Strategy<Value = ImmPerson> {
    (
        name(),
        proptest::option::of(name()),
        0..10i32,
        proptest::collection::vec(name(), 0..4),
    )
        .prop_map(|(forename, surname, cars, aliases)| {
            let builder = ImmPerson::builder()
                .forename(forename)
                .number_of_cars(cars)
                .aliases(aliases);
            let builder = match surname {
                Some(surname) => builder.surname(surname),
                None => builder.no_surname(),
            };
            builder.build().unwrap()
        })
}

pub fn imm_sub_sub_person_strategy() -> impl Strategy<Value = ImmSubSubPerson> {
    (
        name(),
        proptest::option::of(name()),
        proptest::collection::vec(name(), 0..3),
        proptest::collection::btree_map(name(), 1..5i32, 0..4),
    )
        .prop_map(|(forename, middle_name, aliases, counts)| {
            let builder = ImmSubSubPerson::builder()
                .forename(forename)
                .aliases(aliases)
                .code_counts(counts);
            let builder = match middle_name {
                Some(middle_name) => builder.middle_name(middle_name),
                None => builder,
            };
            builder.build().unwrap()
        })
}
