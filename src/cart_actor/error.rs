use thiserror::Error;

/// Errors that can occur when talking to the cart.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    /// The cart was requested from code not running inside a provider scope.
    #[error("use_cart must be used within a CartProvider")]
    OutsideProvider,
    #[error("Actor communication error: {0}")]
    ProviderClosed(String),
}

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Cart serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
