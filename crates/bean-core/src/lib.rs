//! Bean Core - reflective property beans
//!
//! Data holders with:
//! - Structural equality and deterministic 32-bit hash codes
//! - String-keyed property access through a per-type meta-bean
//! - Builders for immutable beans, and dynamic builders for mutable ones
//! - A process-wide meta-bean registry
//! - JSON serialization driven by the meta-property map
//!
//! # Example
//!
//! ```rust,ignore
//! use bean_core::prelude::*;
//!
//! let meta = registry::require("ImmPerson")?;
//! let mut builder = meta.builder()?;
//! builder.set("forename", Value::from("Ada"))?;
//! builder.set("aliases", Value::List(Vec::new()))?;
//! let person = builder.build_bean()?;
//! println!("{person}");
//! ```

#![warn(unreachable_pub)]

pub mod bean;
pub mod builder;
pub mod config;
pub mod error;
pub mod flexi;
pub mod hash;
pub mod json;
pub mod meta;
pub mod property;
pub mod registry;
pub mod value;

// Re-exports for convenience
pub use bean::{bean_eq, bean_from_value, bean_into_value, Bean, BeanRef, FieldWriter};
pub use builder::{required, BeanBuilder, DirectBeanBuilder, ToBuilder, TypedBuilder};
pub use config::JsonConfig;
pub use error::{BeanError, ValueError};
pub use flexi::FlexiBean;
pub use hash::{HashCache, HashCode};
pub use json::JsonSerializer;
pub use meta::{DirectMetaBean, MetaBean, MetaCell, MetaPropertyMap};
pub use property::{MetaProperty, Property, PropertyDescriptor, PropertyMut, PropertyStyle};
pub use value::{convert, PropertyValue, Value};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for defining and using beans
    pub use crate::registry;
    pub use crate::{
        Bean, BeanBuilder, BeanError, DirectMetaBean, FlexiBean, HashCode, MetaBean, MetaCell,
        MetaProperty, PropertyStyle, PropertyValue, ToBuilder, TypedBuilder, Value,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
