//! Bean Sample - concrete beans for every bean shape
//!
//! - [`Person`]: mutable, read-write properties plus a derived one
//! - [`FinalFieldBean`]: mutable with a read-only subset
//! - [`SimplePerson`] / [`SimpleSubPerson`]: mutable with typed builders
//! - [`ImmPerson`] / [`ImmSubPerson`] / [`ImmSubSubPerson`]: immutable,
//!   built through builders, with memoized hash codes
//!
//! # Example
//!
//! ```rust,ignore
//! use bean_sample::ImmPerson;
//! use bean_core::prelude::*;
//!
//! let person = ImmPerson::builder()
//!     .forename("Grace")
//!     .aliases(["Amazing Grace"])
//!     .build()?;
//! let older = person.to_builder().number_of_cars(2).build()?;
//! assert_ne!(person, older);
//! ```

#![warn(unreachable_pub)]

pub mod final_field;
pub mod imm_person;
pub mod person;
pub mod simple_person;

// Re-exports for convenience
pub use final_field::FinalFieldBean;
pub use imm_person::{
    ImmPerson, ImmPersonBuilder, ImmSubPerson, ImmSubPersonBuilder, ImmSubSubPerson,
    ImmSubSubPersonBuilder,
};
pub use person::Person;
pub use simple_person::{SimplePerson, SimplePersonBuilder, SimpleSubPerson, SimpleSubPersonBuilder};

use bean_core::MetaBean;

/// Force every sample meta-bean into the registry
///
/// Meta-beans register on first access; call this before looking sample
/// beans up by name.
pub fn register_all() {
    let metas: [&'static dyn MetaBean; 7] = [
        Person::meta(),
        FinalFieldBean::meta(),
        SimplePerson::meta(),
        SimpleSubPerson::meta(),
        ImmPerson::meta(),
        ImmSubPerson::meta(),
        ImmSubSubPerson::meta(),
    ];
    tracing::debug!(count = metas.len(), "sample meta-beans registered");
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
