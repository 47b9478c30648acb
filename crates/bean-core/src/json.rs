//! JSON serialization through meta-beans
//!
//! Beans are written as JSON objects holding their readable, buildable
//! properties in declaration order. Reading goes through the meta-bean's
//! builder, so the same validation as typed construction applies.

use crate::bean::{Bean, BeanRef};
use crate::config::JsonConfig;
use crate::error::BeanError;
use crate::meta::MetaBean;
use crate::registry;
use crate::value::Value;
use serde_json::{Map, Number, Value as Json};
use std::collections::BTreeMap;

/// Bean ↔ JSON converter
#[derive(Debug, Clone, Default)]
pub struct JsonSerializer {
    config: JsonConfig,
}

impl JsonSerializer {
    /// Create serializer with configuration
    #[inline]
    #[must_use]
    pub fn new(config: JsonConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &JsonConfig {
        &self.config
    }

    /// Convert a bean into a JSON object
    ///
    /// # Errors
    /// Returns error if a property read fails
    pub fn to_json_value(&self, bean: &dyn Bean) -> Result<Json, BeanError> {
        let meta = bean.meta_bean();
        let mut object = Map::new();
        if let Some(key) = &self.config.type_key {
            object.insert(key.clone(), Json::String(meta.bean_name().to_string()));
        }
        for descriptor in meta.meta_property_map().values() {
            let style = descriptor.style();
            if !(style.is_readable() && style.is_buildable()) {
                continue;
            }
            let value = meta.property_get(bean, descriptor.name(), false)?;
            if value.is_null() && !self.config.include_nulls {
                continue;
            }
            object.insert(descriptor.name().to_string(), self.value_to_json(&value)?);
        }
        Ok(Json::Object(object))
    }

    /// Write a bean as JSON text
    ///
    /// # Errors
    /// Returns error if a property read or encoding fails
    pub fn to_string(&self, bean: &dyn Bean) -> Result<String, BeanError> {
        let json = self.to_json_value(bean)?;
        let text = if self.config.pretty {
            serde_json::to_string_pretty(&json)?
        } else {
            serde_json::to_string(&json)?
        };
        Ok(text)
    }

    /// Read a bean whose type is named by the type key
    ///
    /// # Errors
    /// Returns error if the text is not JSON, carries no type key, names an
    /// unregistered bean, or does not build
    pub fn from_str(&self, text: &str) -> Result<Box<dyn Bean>, BeanError> {
        let json: Json = serde_json::from_str(text)?;
        let name = self
            .type_name(&json)
            .ok_or_else(|| BeanError::InvalidJson {
                bean: "?",
                reason: "missing type key".to_string(),
            })?;
        let meta = registry::require(name)?;
        self.from_json_value(&json, meta)
    }

    /// Read a bean of a known type
    ///
    /// # Errors
    /// Returns error if the text is not JSON, names another type, or does
    /// not build
    pub fn from_str_as(
        &self,
        text: &str,
        meta: &'static dyn MetaBean,
    ) -> Result<Box<dyn Bean>, BeanError> {
        let json: Json = serde_json::from_str(text)?;
        self.from_json_value(&json, meta)
    }

    /// Read a bean of a known type into its concrete form
    ///
    /// # Errors
    /// See [`from_str_as`](Self::from_str_as)
    pub fn read<B: Bean + Clone>(
        &self,
        text: &str,
        meta: &'static dyn MetaBean,
    ) -> Result<B, BeanError> {
        let bean = self.from_str_as(text, meta)?;
        bean.downcast_ref::<B>()
            .cloned()
            .ok_or_else(|| BeanError::WrongBeanType {
                expected: meta.bean_name(),
                found: bean.bean_name(),
            })
    }

    /// Build a bean from a JSON object
    ///
    /// # Errors
    /// Returns error if `json` is not an object, names another type, holds
    /// an unknown key (unless ignored), or does not build
    pub fn from_json_value(
        &self,
        json: &Json,
        meta: &'static dyn MetaBean,
    ) -> Result<Box<dyn Bean>, BeanError> {
        let object = json.as_object().ok_or_else(|| BeanError::InvalidJson {
            bean: meta.bean_name(),
            reason: "expected an object".to_string(),
        })?;
        if let Some(found) = self.type_name(json) {
            if found != meta.bean_name() {
                return Err(BeanError::InvalidJson {
                    bean: meta.bean_name(),
                    reason: format!("type key names {found}"),
                });
            }
        }
        let mut builder = meta.builder()?;
        for (key, value) in object {
            if self.is_type_key(key) {
                continue;
            }
            let buildable = meta
                .meta_property(key)
                .map(|descriptor| descriptor.style().is_buildable());
            match buildable {
                Ok(true) => builder.set(key, self.json_to_value(value)?)?,
                Ok(false) | Err(_) if self.config.ignore_unknown => {
                    tracing::debug!(bean = meta.bean_name(), key = %key, "json key ignored");
                }
                Ok(false) => return Err(BeanError::ReadOnlyProperty(key.clone())),
                Err(err) => return Err(err),
            }
        }
        builder.build_bean()
    }

    /// Convert a property value into JSON
    ///
    /// Non-finite doubles have no JSON form and are written as `null`.
    ///
    /// # Errors
    /// Returns error if a nested bean read fails
    pub fn value_to_json(&self, value: &Value) -> Result<Json, BeanError> {
        let json = match value {
            Value::Null => Json::Null,
            Value::Bool(v) => Json::Bool(*v),
            Value::Int(v) => Json::from(*v),
            Value::Long(v) => Json::from(*v),
            Value::Double(v) => Number::from_f64(*v).map_or(Json::Null, Json::Number),
            Value::Str(v) => Json::String(v.clone()),
            Value::List(items) => Json::Array(
                items
                    .iter()
                    .map(|item| self.value_to_json(item))
                    .collect::<Result<_, _>>()?,
            ),
            Value::Map(entries) => Json::Object(
                entries
                    .iter()
                    .map(|(key, item)| Ok((key.clone(), self.value_to_json(item)?)))
                    .collect::<Result<_, BeanError>>()?,
            ),
            Value::Flexi(flexi) => Json::Object(
                flexi
                    .iter()
                    .map(|(key, item)| Ok((key.to_string(), self.value_to_json(item)?)))
                    .collect::<Result<_, BeanError>>()?,
            ),
            Value::Bean(bean) => self.to_json_value(bean.bean())?,
        };
        Ok(json)
    }

    /// Convert JSON into an untyped property value
    ///
    /// Integers read as `Int` when they fit in 32 bits and as `Long`
    /// otherwise; other numbers read as `Double`. An object whose
    /// type key names a registered bean reads as that bean; any other
    /// object reads as a map with the type key removed, leaving the target
    /// property to build it.
    ///
    /// # Errors
    /// Returns error if a nested bean does not build
    pub fn json_to_value(&self, json: &Json) -> Result<Value, BeanError> {
        let value = match json {
            Json::Null => Value::Null,
            Json::Bool(v) => Value::Bool(*v),
            Json::Number(n) => match n.as_i64() {
                Some(v) => i32::try_from(v).map_or(Value::Long(v), Value::Int),
                None => n.as_f64().map_or(Value::Null, Value::Double),
            },
            Json::String(v) => Value::Str(v.clone()),
            Json::Array(items) => Value::List(
                items
                    .iter()
                    .map(|item| self.json_to_value(item))
                    .collect::<Result<_, _>>()?,
            ),
            Json::Object(object) => {
                let nested = self.type_name(json).and_then(registry::lookup_by_name);
                match nested {
                    Some(meta) => Value::Bean(BeanRef::from_boxed(self.from_json_value(json, meta)?)),
                    None => Value::Map(
                        object
                            .iter()
                            .filter(|(key, _)| !self.is_type_key(key))
                            .map(|(key, item)| Ok((key.clone(), self.json_to_value(item)?)))
                            .collect::<Result<BTreeMap<_, _>, BeanError>>()?,
                    ),
                }
            }
        };
        Ok(value)
    }

    fn type_name<'j>(&self, json: &'j Json) -> Option<&'j str> {
        let key = self.config.type_key.as_deref()?;
        json.get(key)?.as_str()
    }

    fn is_type_key(&self, key: &str) -> bool {
        self.config.type_key.as_deref() == Some(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flexi::FlexiBean;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn scalar_values_to_json() {
        let serializer = JsonSerializer::default();
        assert_eq!(serializer.value_to_json(&Value::Int(3)).unwrap(), json!(3));
        assert_eq!(serializer.value_to_json(&Value::Null).unwrap(), Json::Null);
        assert_eq!(
            serializer.value_to_json(&Value::Double(f64::NAN)).unwrap(),
            Json::Null
        );
        assert_eq!(
            serializer
                .value_to_json(&Value::List(vec![Value::from("a"), Value::Bool(true)]))
                .unwrap(),
            json!(["a", true])
        );
    }

    #[test]
    fn flexi_keeps_insertion_order() {
        let mut flexi = FlexiBean::new();
        flexi.put("b", 2);
        flexi.put("a", 1);
        let json = JsonSerializer::default()
            .value_to_json(&Value::Flexi(flexi))
            .unwrap();
        assert_eq!(serde_json::to_string(&json).unwrap(), r#"{"b":2,"a":1}"#);
    }

    #[test]
    fn json_numbers_read_by_width() {
        let serializer = JsonSerializer::default();
        assert_eq!(serializer.json_to_value(&json!(7)).unwrap(), Value::Int(7));
        assert_eq!(serializer.json_to_value(&json!(-7)).unwrap(), Value::Int(-7));
        assert_eq!(
            serializer.json_to_value(&json!(3_000_000_000_i64)).unwrap(),
            Value::Long(3_000_000_000)
        );
        assert_eq!(
            serializer.json_to_value(&json!(1.5)).unwrap(),
            Value::Double(1.5)
        );
    }

    #[test]
    fn untyped_object_reads_as_map_without_type_key() {
        let serializer = JsonSerializer::default();
        let value = serializer
            .json_to_value(&json!({"@type": "NotRegisteredAnywhere", "x": "y"}))
            .unwrap();
        let mut expected = BTreeMap::new();
        expected.insert("x".to_string(), Value::from("y"));
        assert_eq!(value, Value::Map(expected));
    }

    #[test]
    fn missing_type_key_fails() {
        let err = JsonSerializer::default().from_str(r#"{"a": 1}"#).unwrap_err();
        assert!(matches!(err, BeanError::InvalidJson { .. }));
    }

    #[test]
    fn unregistered_type_fails() {
        let err = JsonSerializer::default()
            .from_str(r#"{"@type": "Nowhere"}"#)
            .unwrap_err();
        assert!(matches!(err, BeanError::UnknownBean(ref name) if name == "Nowhere"));
    }
}
