use thiserror::Error;

/// Failures raised by host bridge implementations.
///
/// Transport adapters classify low-level failures into `NotConnected`,
/// `TimedOut` and `OperationFailed` before any HTTP status is inspected.
#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Bridge capability not available: {0}")]
    NotAvailable(String),

    #[error("No network connection: {0}")]
    NotConnected(String),

    #[error("Bridge operation timed out")]
    TimedOut,

    #[error("Bridge operation failed: {0}")]
    OperationFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BridgeError>;

/// Failures raised by [`SecureStore`](crate::storage::SecureStore) implementations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("The requested item could not be found in secure storage: {0}")]
    ItemNotFound(String),

    #[error("Failed to encode the value for secure storage")]
    EncodingFailed,

    #[error("Failed to decode the value read from secure storage")]
    DecodingFailed,

    #[error("Secure storage backend failure: {0}")]
    Backend(String),
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;
