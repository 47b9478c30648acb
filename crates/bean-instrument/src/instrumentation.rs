//! Instrumentation template message
//!
//! Field numbers are part of the wire contract and never change:
//!
//! | tag | field                   | label    |
//! |-----|-------------------------|----------|
//! | 1   | `report_defined`        | optional |
//! | 2   | `report_call`           | optional |
//! | 3   | `declaration_to_remove` | repeated |
//! | 4   | `init`                  | repeated |
//! | 5   | `app_name_setter`       | optional |
//! | 6   | `report_exit`           | optional |
//!
//! Optional fields keep presence separately from their value, so an
//! explicitly empty string survives a round trip as present. The derived
//! value accessors (`report_call()` and friends) return `""` when absent.

use crate::error::Result;
use prost::Message;
use serde::{Deserialize, Serialize};

/// Instrumentation template
#[derive(Clone, PartialEq, Eq, Message, Serialize, Deserialize)]
#[serde(default)]
pub struct Instrumentation {
    /// Function called when a definition is reached
    #[prost(string, optional, tag = "1")]
    pub report_defined: Option<String>,
    /// Function called when a call is made
    #[prost(string, optional, tag = "2")]
    pub report_call: Option<String>,
    /// Declarations removed from the instrumented program
    #[prost(string, repeated, tag = "3")]
    pub declaration_to_remove: Vec<String>,
    /// Snippets run before the program
    #[prost(string, repeated, tag = "4")]
    pub init: Vec<String>,
    /// Function that sets the application name
    #[prost(string, optional, tag = "5")]
    pub app_name_setter: Option<String>,
    /// Function called when a call returns
    #[prost(string, optional, tag = "6")]
    pub report_exit: Option<String>,
}

macro_rules! optional_accessors {
    ($($field:ident => $has:ident, $bytes:ident;)*) => {
        $(
            #[doc = concat!("Check if `", stringify!($field), "` is present")]
            #[inline]
            #[must_use]
            pub fn $has(&self) -> bool {
                self.$field.is_some()
            }

            #[doc = concat!("Raw UTF-8 bytes of `", stringify!($field), "`, empty when absent")]
            #[inline]
            #[must_use]
            pub fn $bytes(&self) -> &[u8] {
                self.$field.as_deref().unwrap_or_default().as_bytes()
            }
        )*
    };
}

macro_rules! repeated_accessors {
    ($($field:ident => $count:ident, $at:ident, $bytes_at:ident, $list:ident;)*) => {
        $(
            #[doc = concat!("Number of `", stringify!($field), "` entries")]
            #[inline]
            #[must_use]
            pub fn $count(&self) -> usize {
                self.$field.len()
            }

            #[doc = concat!("Entry of `", stringify!($field), "` at `index`, `None` when out of range")]
            #[inline]
            #[must_use]
            pub fn $at(&self, index: usize) -> Option<&str> {
                self.$field.get(index).map(String::as_str)
            }

            #[doc = concat!("Raw UTF-8 bytes of the `", stringify!($field), "` entry at `index`")]
            #[inline]
            #[must_use]
            pub fn $bytes_at(&self, index: usize) -> Option<&[u8]> {
                self.$field.get(index).map(String::as_bytes)
            }

            #[doc = concat!("All `", stringify!($field), "` entries")]
            #[inline]
            #[must_use]
            pub fn $list(&self) -> &[String] {
                &self.$field
            }
        )*
    };
}

impl Instrumentation {
    /// Start an empty template
    #[inline]
    #[must_use]
    pub fn builder() -> InstrumentationBuilder {
        InstrumentationBuilder::default()
    }

    /// Builder seeded with this template's fields
    #[must_use]
    pub fn to_builder(&self) -> InstrumentationBuilder {
        InstrumentationBuilder {
            message: self.clone(),
        }
    }

    /// Decode from protobuf wire bytes
    ///
    /// # Errors
    /// Returns [`InstrumentError::Decode`](crate::InstrumentError::Decode)
    /// if the bytes are malformed
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let message = Self::decode(bytes).map_err(|err| {
            tracing::debug!(len = bytes.len(), error = %err, "instrumentation decode failed");
            err
        })?;
        Ok(message)
    }

    /// Encode to protobuf wire bytes
    #[inline]
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        self.encode_to_vec()
    }

    /// Parse a template written as TOML
    ///
    /// ```toml
    /// report_call = "__report"
    /// init = ["var __cov = {};"]
    /// ```
    ///
    /// # Errors
    /// Returns [`InstrumentError::Template`](crate::InstrumentError::Template)
    /// if the text is not valid TOML for the message
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    optional_accessors! {
        report_defined => has_report_defined, report_defined_bytes;
        report_call => has_report_call, report_call_bytes;
        app_name_setter => has_app_name_setter, app_name_setter_bytes;
        report_exit => has_report_exit, report_exit_bytes;
    }

    repeated_accessors! {
        declaration_to_remove => declaration_to_remove_count, declaration_to_remove_at,
            declaration_to_remove_bytes_at, declaration_to_remove_list;
        init => init_count, init_at, init_bytes_at, init_list;
    }
}

/// Builder for [`Instrumentation`]
#[derive(Debug, Clone, Default)]
pub struct InstrumentationBuilder {
    message: Instrumentation,
}

impl InstrumentationBuilder {
    /// Set the definition reporter
    #[must_use]
    pub fn report_defined(mut self, name: impl Into<String>) -> Self {
        self.message.report_defined = Some(name.into());
        self
    }

    /// Set the call reporter
    #[must_use]
    pub fn report_call(mut self, name: impl Into<String>) -> Self {
        self.message.report_call = Some(name.into());
        self
    }

    /// Set the application name setter
    #[must_use]
    pub fn app_name_setter(mut self, name: impl Into<String>) -> Self {
        self.message.app_name_setter = Some(name.into());
        self
    }

    /// Set the exit reporter
    #[must_use]
    pub fn report_exit(mut self, name: impl Into<String>) -> Self {
        self.message.report_exit = Some(name.into());
        self
    }

    /// Clear the call reporter
    #[must_use]
    pub fn clear_report_call(mut self) -> Self {
        self.message.report_call = None;
        self
    }

    /// Append a declaration to remove
    #[must_use]
    pub fn declaration_to_remove(mut self, name: impl Into<String>) -> Self {
        self.message.declaration_to_remove.push(name.into());
        self
    }

    /// Append an init snippet
    #[must_use]
    pub fn init(mut self, snippet: impl Into<String>) -> Self {
        self.message.init.push(snippet.into());
        self
    }

    /// Finish the template
    #[inline]
    #[must_use]
    pub fn build(self) -> Instrumentation {
        self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn absent_optional_reads_empty() {
        let message = Instrumentation::default();
        assert!(!message.has_report_exit());
        assert_eq!(message.report_exit(), "");
        assert!(message.report_exit_bytes().is_empty());
    }

    #[test]
    fn builder_sets_presence() {
        let message = Instrumentation::builder()
            .report_defined("__def")
            .declaration_to_remove("a")
            .declaration_to_remove("b")
            .build();
        assert!(message.has_report_defined());
        assert_eq!(message.report_defined_bytes(), b"__def");
        assert_eq!(message.declaration_to_remove_count(), 2);
        assert_eq!(message.declaration_to_remove_at(1), Some("b"));
        assert_eq!(message.declaration_to_remove_list(), ["a", "b"]);
    }

    #[test]
    fn to_builder_keeps_fields() {
        let message = Instrumentation::builder().report_call("__call").init("x").build();
        let changed = message.to_builder().clear_report_call().build();
        assert!(!changed.has_report_call());
        assert_eq!(changed.init_list(), message.init_list());
    }

    #[test]
    fn toml_template() {
        let message = Instrumentation::from_toml_str(
            r#"
            report_call = "__report"
            init = ["var a;", "var b;"]
            "#,
        )
        .unwrap();
        assert_eq!(message.report_call(), "__report");
        assert_eq!(message.init_count(), 2);
        assert!(!message.has_report_defined());
    }

    #[test]
    fn bad_toml_rejected() {
        let err = Instrumentation::from_toml_str("init = 3").unwrap_err();
        assert!(err.to_string().starts_with("template error"));
    }
}
