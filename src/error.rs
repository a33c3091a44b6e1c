use thiserror::Error;

/// Result type for adapter operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type surfaced by the underlying store client.
///
/// Client implementations report failures as boxed errors; the adapter
/// forwards them to callers untouched inside [`Error::Underlying`].
pub type ClientError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur in the adapter
#[derive(Error, Debug)]
pub enum Error {
    /// A required parameter section was missing; raised before the
    /// underlying client is ever invoked
    #[error("Parameters must contain a \"{0}\" object")]
    Validation(String),

    /// A native value could not be classified into a tagged wire value
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// A wire value could not be classified back into a native value
    #[error("Decoding error: {0}")]
    Decoding(String),

    /// An error surfaced by the underlying store client, forwarded as-is
    #[error("Underlying operation failed: {0}")]
    Underlying(#[from] ClientError),
}
