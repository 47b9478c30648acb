use bean_core::{Bean, BeanError, MetaBean, PropertyStyle, Value};
use bean_sample::{FinalFieldBean, ImmPerson, ImmSubPerson, Person, SimplePerson, SimpleSubPerson};
use bean_test_utils::{create_final_field_bean, create_imm_person};
use pretty_assertions::assert_eq;

fn names(meta: &dyn MetaBean) -> Vec<&'static str> {
    meta.meta_property_map().keys().copied().collect()
}

#[test]
fn quiet_write_to_read_only_leaves_bean_unchanged() {
    let original = create_final_field_bean();
    let mut bean = original.clone();
    let dynamic: &mut dyn Bean = &mut bean;
    let meta = dynamic.meta_bean();

    meta.property_set(dynamic, "personFinal", Value::Null, true)
        .unwrap();
    assert_eq!(bean, original);

    let err = meta
        .property_set(&mut bean, "personFinal", Value::Null, false)
        .unwrap_err();
    assert!(matches!(err, BeanError::ReadOnlyProperty(ref p) if p == "personFinal"));
    assert_eq!(bean, original);
}

#[test]
fn bean_and_subclass_maps() {
    assert_eq!(
        names(SimplePerson::meta()),
        ["forename", "surname", "numberOfCars"]
    );
    assert_eq!(
        names(SimpleSubPerson::meta()),
        ["forename", "surname", "numberOfCars", "middleName"]
    );
}

#[test]
fn immutable_sub_map_inherits_first() {
    assert_eq!(
        names(ImmSubPerson::meta()),
        ["forename", "surname", "numberOfCars", "aliases", "middleName"]
    );
}

#[test]
fn property_get_through_dyn_bean() {
    let person = create_imm_person();
    let bean: &dyn Bean = &person;
    assert_eq!(bean.get("forename").unwrap(), Value::from("Grace"));
    assert_eq!(
        bean.get("aliases").unwrap(),
        Value::List(vec![Value::from("Amazing Grace")])
    );
    assert_eq!(bean.property_names().len(), 4);
}

#[test]
fn unknown_property_lookup_fails() {
    let err = Person::meta().meta_property("age").unwrap_err();
    assert_eq!(err.to_string(), "unknown property 'age' on bean Person");
}

#[test]
fn wrong_bean_type_rejected() {
    let person = Person::new();
    let err = ImmPerson::meta()
        .property_get(&person, "forename", false)
        .unwrap_err();
    assert!(matches!(
        err,
        BeanError::WrongBeanType { expected: "ImmPerson", found: "Person" }
    ));
}

#[test]
fn styles_reported() {
    let meta = FinalFieldBean::meta();
    assert_eq!(meta.meta_property("fieldFinal").unwrap().style(), PropertyStyle::ReadOnly);
    assert_eq!(meta.meta_property("fieldNonFinal").unwrap().style(), PropertyStyle::ReadWrite);
    assert_eq!(ImmPerson::meta().meta_property("surname").unwrap().style(), PropertyStyle::Immutable);
}

#[test]
fn dynamic_builder_matches_typed_construction() {
    let mut builder = ImmPerson::meta().builder().unwrap();
    builder.set("forename", Value::from("Grace")).unwrap();
    builder.set("surname", Value::from("Hopper")).unwrap();
    builder.set("numberOfCars", Value::Long(1)).unwrap();
    builder
        .set("aliases", Value::List(vec![Value::from("Amazing Grace")]))
        .unwrap();
    let built = builder.build_bean().unwrap();
    assert_eq!(built.downcast_ref::<ImmPerson>(), Some(&create_imm_person()));
}

#[test]
fn dynamic_builder_for_mutable_bean() {
    let mut builder = Person::meta().builder().unwrap();
    builder.set("forename", Value::from("John")).unwrap();
    assert_eq!(builder.to_string(), "Person.Builder{forename=John, surname=null, numberOfCars=0}");
    let built = builder.build_bean().unwrap();
    assert_eq!(built.downcast_ref::<Person>().and_then(Person::forename), Some("John"));
}
