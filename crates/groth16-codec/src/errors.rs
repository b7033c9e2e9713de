//! Error types for the Groth16 codec

use thiserror::Error;

/// Top-level codec error
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Malformed input at `{field}`: {reason}")]
    MalformedInput { field: String, reason: String },

    #[error("Field element at `{field}` needs {bits} bits, does not fit in 256")]
    EncodingOverflow { field: String, bits: u64 },

    #[error("Unsupported limb width: {size} bytes (encodings use {supported})")]
    UnsupportedFieldSize { size: usize, supported: usize },

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CodecError {
    pub(crate) fn malformed(field: impl Into<String>, reason: impl Into<String>) -> Self {
        CodecError::MalformedInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Call-buffer layout errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("Call data too short: expected {expected} bytes, got {actual}")]
    TooShort { expected: usize, actual: usize },

    #[error("Call data has {extra} trailing bytes")]
    TrailingBytes { extra: usize },

    #[error("Byte length {len} is not a multiple of 32")]
    NotChunkAligned { len: usize },
}

pub type Result<T> = std::result::Result<T, CodecError>;
