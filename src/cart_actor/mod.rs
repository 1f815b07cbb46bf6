//! Cart-specific domain logic: the line-item transformations and the cart error types.

pub mod collection;
pub mod error;

pub use collection::*;
pub use error::*;
