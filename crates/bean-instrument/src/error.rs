//! Error types for instrumentation templates

/// Instrumentation error type
#[derive(Debug, thiserror::Error)]
pub enum InstrumentError {
    /// Bytes are not a valid encoded message
    #[error("decode error: {0}")]
    Decode(#[from] prost::DecodeError),

    /// Template text is not valid TOML for the message
    #[error("template error: {0}")]
    Template(#[from] toml::de::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, InstrumentError>;
