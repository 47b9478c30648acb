use bean_core::{registry, MetaBean, Value};
use bean_sample::{ImmPerson, ImmSubSubPerson};

#[test]
fn lookup_by_name_after_registration() {
    bean_sample::register_all();
    let meta = registry::lookup_by_name("ImmPerson").unwrap();
    let expected: Vec<_> = ImmPerson::meta().meta_property_map().keys().copied().collect();
    let found: Vec<_> = meta.meta_property_map().keys().copied().collect();
    assert_eq!(found, expected);
    assert_eq!(
        registry::lookup::<ImmSubSubPerson>().map(|m| m.bean_name()),
        Some("ImmSubSubPerson")
    );
}

#[test]
fn every_sample_registered() {
    bean_sample::register_all();
    for name in [
        "Person",
        "FinalFieldBean",
        "SimplePerson",
        "SimpleSubPerson",
        "ImmPerson",
        "ImmSubPerson",
        "ImmSubSubPerson",
    ] {
        assert!(registry::contains(name), "{name} not registered");
    }
}

#[test]
fn registered_meta_builds_beans() {
    bean_sample::register_all();
    let meta = registry::require("SimpleSubPerson").unwrap();
    let mut builder = meta.builder().unwrap();
    builder.set("middleName", Value::from("King")).unwrap();
    let bean = builder.build_bean().unwrap();
    assert_eq!(bean.get("middleName").unwrap(), Value::from("King"));
    assert_eq!(bean.bean_name(), "SimpleSubPerson");
}

#[test]
fn re_registering_is_harmless() {
    let meta = ImmPerson::meta();
    assert!(registry::register(meta).is_ok());
    assert!(registry::register(meta).is_ok());
}
