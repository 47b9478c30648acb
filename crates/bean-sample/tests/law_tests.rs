use bean_core::{Bean, HashCode, ToBuilder, TypedBuilder, Value};
use bean_sample::{ImmPerson, Person};
use bean_test_utils::{imm_person_strategy, imm_sub_sub_person_strategy, person_strategy};
use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

proptest! {
    #[test]
    fn prop_equals_is_reflexive(person in person_strategy()) {
        prop_assert_eq!(&person, &person.clone());
        let bean: &dyn Bean = &person;
        prop_assert!(bean.bean_eq(&person));
    }

    #[test]
    fn prop_equal_beans_hash_equal(person in imm_person_strategy()) {
        let copy = person.to_builder().build().unwrap();
        prop_assert_eq!(person.hash_code(), copy.hash_code());
    }

    #[test]
    fn prop_to_builder_round_trip(person in imm_sub_sub_person_strategy()) {
        let rebuilt = person.to_builder().build().unwrap();
        prop_assert_eq!(&rebuilt, &person);
        prop_assert_eq!(rebuilt.hash_code(), person.hash_code());
    }

    #[test]
    fn prop_independent_equal_beans_hash_equal(
        forename in proptest::option::of("[A-Za-z]{1,8}"),
        surname in proptest::option::of("[A-Za-z]{1,8}"),
        cars in any::<i32>(),
    ) {
        let build = || {
            let mut person = Person::new();
            person.set_forename(forename.clone());
            person.set_surname(surname.clone());
            person.set_number_of_cars(cars);
            person
        };
        let (first, second) = (build(), build());
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.hash_code(), second.hash_code());
    }

    #[test]
    fn prop_mutable_hash_tracks_state(person in person_strategy(), cars in any::<i32>()) {
        let mut other = person.clone();
        other.set_number_of_cars(cars);
        let mut restored = other.clone();
        restored.set_number_of_cars(person.number_of_cars());
        prop_assert_eq!(&restored, &person);
        prop_assert_eq!(restored.hash_code(), person.hash_code());
        prop_assert_eq!(other == person, cars == person.number_of_cars());
    }
}

#[test]
fn not_equal_to_null_or_other_type() {
    let person = bean_test_utils::create_imm_person();
    assert_ne!(Value::Bean(bean_core::BeanRef::new(person.clone())), Value::Null);
    let bean: &dyn Bean = &person;
    assert!(!bean.bean_eq(&Person::new()));
}

#[test]
fn beans_key_std_hash_sets() {
    let mut set = HashSet::new();
    set.insert(bean_test_utils::create_imm_person());
    set.insert(bean_test_utils::create_imm_person());
    assert_eq!(set.len(), 1);
}

#[test]
fn concurrent_first_hash_agrees() {
    let person: Arc<ImmPerson> = Arc::new(bean_test_utils::create_imm_person());
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let person = Arc::clone(&person);
            thread::spawn(move || person.hash_code())
        })
        .collect();
    let hashes: HashSet<i32> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(hashes.len(), 1);
    assert!(person.is_hash_cached());
}
