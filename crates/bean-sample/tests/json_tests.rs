use bean_core::{BeanError, FlexiBean, JsonConfig, JsonSerializer, MetaBean, Value};
use bean_sample::{FinalFieldBean, ImmPerson, ImmSubSubPerson, Person};
use bean_test_utils::{create_final_field_bean, create_imm_person, create_imm_sub_sub_person};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn writes_buildable_properties_in_order() {
    let serializer = JsonSerializer::default();
    let json = serializer.to_json_value(&create_imm_person()).unwrap();
    assert_eq!(
        json,
        json!({
            "@type": "ImmPerson",
            "forename": "Grace",
            "surname": "Hopper",
            "numberOfCars": 1,
            "aliases": ["Amazing Grace"]
        })
    );
    let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, ["@type", "forename", "surname", "numberOfCars", "aliases"]);
}

#[test]
fn immutable_round_trip_by_type_key() {
    bean_sample::register_all();
    let serializer = JsonSerializer::default();
    let original = create_imm_sub_sub_person();
    let text = serializer.to_string(&original).unwrap();
    let read = serializer.from_str(&text).unwrap();
    assert_eq!(read.downcast_ref::<ImmSubSubPerson>(), Some(&original));
}

#[test]
fn mutable_round_trip_with_nested_bean() {
    let serializer = JsonSerializer::default();
    let original = create_final_field_bean();
    let text = serializer.to_string(&original).unwrap();
    let read: FinalFieldBean = serializer.read(&text, FinalFieldBean::meta()).unwrap();
    // read-only properties are not written
    assert_eq!(read.field_final(), None);
    assert_eq!(read.person_final(), &Person::new());
    assert_eq!(read.field_non_final(), original.field_non_final());
    assert_eq!(read.list_final(), original.list_final());
    assert_eq!(read.flexi_final(), original.flexi_final());
}

#[test]
fn writable_bean_round_trip_is_lossless() {
    let serializer = JsonSerializer::default();
    let mut original = FinalFieldBean::new();
    original.set_field_non_final(Some("loose".to_string()));
    original.set_list_final(vec!["a".to_string()]);
    let mut flexi = FlexiBean::new();
    flexi.put("size", 3);
    flexi.put("big", 5_000_000_000_i64);
    flexi.put("ratio", Value::Double(0.5));
    flexi.put("tags", Value::List(vec![Value::from("x")]));
    original.set_flexi_final(&flexi);

    let text = serializer.to_string(&original).unwrap();
    let read: FinalFieldBean = serializer.read(&text, FinalFieldBean::meta()).unwrap();
    assert_eq!(read.flexi_final().get("size"), Value::Int(3));
    assert_eq!(read.flexi_final().get("big"), Value::Long(5_000_000_000));
    assert_eq!(read, original);
}

#[test]
fn derived_property_not_written() {
    let serializer = JsonSerializer::new(JsonConfig::new().without_type_key());
    let person = bean_test_utils::create_person("John", "Doe", 2);
    let json = serializer.to_json_value(&person).unwrap();
    assert_eq!(json, json!({"forename": "John", "surname": "Doe", "numberOfCars": 2}));
}

#[test]
fn nulls_written_when_configured() {
    let serializer = JsonSerializer::new(
        JsonConfig::new().without_type_key().with_include_nulls(true),
    );
    let json = serializer.to_json_value(&Person::new()).unwrap();
    assert_eq!(json, json!({"forename": null, "surname": null, "numberOfCars": 0}));
}

#[test]
fn unknown_key_rejected_by_default() {
    let serializer = JsonSerializer::default();
    let text = r#"{"forename": "Grace", "aliases": [], "age": 85}"#;
    let err = serializer.from_str_as(text, ImmPerson::meta()).unwrap_err();
    assert!(err.is_not_found());

    let lenient = JsonSerializer::new(JsonConfig::new().with_ignore_unknown(true));
    let read: ImmPerson = lenient.read(text, ImmPerson::meta()).unwrap();
    assert_eq!(read.forename(), "Grace");
}

#[test]
fn missing_required_property_fails_build() {
    let serializer = JsonSerializer::default();
    let err = serializer
        .from_str_as(r#"{"forename": "Grace"}"#, ImmPerson::meta())
        .unwrap_err();
    assert!(matches!(err, BeanError::NullProperty(ref p) if p == "aliases"));
}

#[test]
fn type_key_must_match_target() {
    let serializer = JsonSerializer::default();
    let err = serializer
        .from_str_as(r#"{"@type": "Person"}"#, ImmPerson::meta())
        .unwrap_err();
    assert!(matches!(err, BeanError::InvalidJson { bean: "ImmPerson", .. }));
}

#[test]
fn pretty_output() {
    let serializer = JsonSerializer::new(JsonConfig::new().with_pretty(true));
    let text = serializer.to_string(&Person::new()).unwrap();
    assert!(text.contains("\n  \"@type\": \"Person\""));
    assert_eq!(Person::meta().bean_name(), "Person");
}
