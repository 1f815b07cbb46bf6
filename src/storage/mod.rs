//! Key-value persistence boundary for the cart blob.
//!
//! The cart only ever needs two calls: read the blob at startup and overwrite it
//! after each change. Backends are free to store anything under other keys.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use async_trait::async_trait;

use crate::cart_actor::StorageError;

/// Key under which the whole cart is stored.
pub const CART_STORAGE_KEY: &str = "@Desafio8:products";

/// Asynchronous string key-value store.
#[async_trait]
pub trait CartStorage: Send + Sync + 'static {
    /// Returns the value stored under `key`, or `None` if nothing is stored.
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set_item(&self, key: &str, value: String) -> Result<(), StorageError>;
}
