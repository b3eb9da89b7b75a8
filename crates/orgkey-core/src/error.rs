//! Error types for organization key resolution.
//!
//! One error type is shared by the variant model and by every
//! [`CryptoProvider`](crate::CryptoProvider) implementation, so failures raised
//! by the collaborator travel through `decrypt` untouched. The CLI layer maps
//! these to user-facing messages.

use thiserror::Error;

/// Result type alias for organization key operations.
pub type Result<T> = std::result::Result<T, OrgKeyError>;

/// Core error type for organization key operations.
#[derive(Debug, Error)]
pub enum OrgKeyError {
    /// The active user has no private key, so a user-encrypted key cannot be unwrapped.
    ///
    /// This points at broken session state in the caller and is never retried.
    #[error("Active user does not have a private key, cannot decrypt organization key")]
    MissingKeyMaterial,

    /// Requested key material does not exist (e.g. unknown provider id)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Encryption or decryption error
    #[error("Encryption error: {0}")]
    Crypto(String),

    /// Cipher text could not be decoded from its text form
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Recovered bytes do not form a usable symmetric key
    #[error("Invalid symmetric key length: {0} bytes (expected 32 or 64)")]
    InvalidKeyLength(usize),

    /// A record or variant violates its construction invariants
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// A record carries a tag that names no known variant, or no usable tag at all
    #[error("Unrecognized organization key type: {}", describe_tag(.0))]
    UnrecognizedVariant(Option<String>),

    /// JSON serialization/deserialization error
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    /// I/O error
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

fn describe_tag(tag: &Option<String>) -> String {
    match tag {
        Some(tag) => format!("{tag:?}"),
        None => "missing".to_string(),
    }
}
