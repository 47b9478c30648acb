//! Bean Instrument - instrumentation template message
//!
//! A flat protobuf message of optional and repeated strings describing
//! how a code-instrumentation pass should rewrite a program: which calls
//! report definitions, calls and exits, which declarations to drop, and
//! which snippets to run at startup.
//!
//! # Example
//!
//! ```rust,ignore
//! use bean_instrument::Instrumentation;
//!
//! let template = Instrumentation::builder()
//!     .report_call("__report")
//!     .init("var __cov = {};")
//!     .build();
//! let decoded = Instrumentation::parse(&template.to_bytes())?;
//! assert!(decoded.has_report_call());
//! assert!(!decoded.has_report_defined());
//! ```

#![warn(unreachable_pub)]

pub mod error;
pub mod instrumentation;

// Re-exports for convenience
pub use error::{InstrumentError, Result};
pub use instrumentation::{Instrumentation, InstrumentationBuilder};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
