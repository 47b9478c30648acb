//! Process-wide meta-bean registry
//!
//! One meta-bean per bean type, discoverable by Rust type or by bean name.
//! Entries are added when a bean type's meta-bean is first accessed and are
//! never removed.

use crate::bean::Bean;
use crate::error::BeanError;
use crate::meta::MetaBean;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::any::TypeId;
use std::collections::HashMap;

#[derive(Default)]
struct Registry {
    by_type: HashMap<TypeId, &'static dyn MetaBean>,
    by_name: IndexMap<&'static str, &'static dyn MetaBean>,
}

static REGISTRY: Lazy<RwLock<Registry>> = Lazy::new(|| RwLock::new(Registry::default()));

/// Register a meta-bean
///
/// Registering the same type again is a no-op.
///
/// # Errors
/// Returns [`BeanError::DuplicateBeanName`] if another type already uses
/// the bean name
pub fn register(meta: &'static dyn MetaBean) -> Result<(), BeanError> {
    let mut registry = REGISTRY.write();
    if let Some(existing) = registry.by_name.get(meta.bean_name()) {
        if existing.bean_type() == meta.bean_type() {
            return Ok(());
        }
        tracing::warn!(bean = meta.bean_name(), "bean name already registered for another type");
        return Err(BeanError::DuplicateBeanName(meta.bean_name()));
    }
    registry.by_type.insert(meta.bean_type(), meta);
    registry.by_name.insert(meta.bean_name(), meta);
    tracing::debug!(
        bean = meta.bean_name(),
        properties = meta.meta_property_map().len(),
        "registered meta-bean"
    );
    Ok(())
}

/// Meta-bean registered for type `B`
#[must_use]
pub fn lookup<B: Bean>() -> Option<&'static dyn MetaBean> {
    REGISTRY.read().by_type.get(&TypeId::of::<B>()).copied()
}

/// Meta-bean registered under a bean name
#[must_use]
pub fn lookup_by_name(name: &str) -> Option<&'static dyn MetaBean> {
    REGISTRY.read().by_name.get(name).copied()
}

/// Meta-bean registered under a bean name
///
/// # Errors
/// Returns [`BeanError::UnknownBean`] if nothing is registered under `name`
pub fn require(name: &str) -> Result<&'static dyn MetaBean, BeanError> {
    lookup_by_name(name).ok_or_else(|| BeanError::UnknownBean(name.to_string()))
}

/// Registered bean names in registration order
#[must_use]
pub fn registered_names() -> Vec<&'static str> {
    REGISTRY.read().by_name.keys().copied().collect()
}

/// Check if a bean name is registered
#[inline]
#[must_use]
pub fn contains(name: &str) -> bool {
    REGISTRY.read().by_name.contains_key(name)
}
