//! # cart-store
//!
//! Shopping-cart state for a client application: an ordered list of line
//! items held in memory, mirrored to a local key-value store, and shared with
//! consumers as a read-only view plus three intents.
//!
//! ## Pieces
//!
//! - **Domain types** - [`CartItem`], [`NewCartItem`], [`CartSnapshot`]
//! - **Collection logic** - pure copy-modify-replace transforms in [`cart_actor`]
//! - **Actors**
//!     - [`CartService`] owns the cart, hydrates it on start, applies intents one at a time
//!     - [`PersistenceWriter`] writes snapshots to storage in order, off the caller's path
//! - **Client** - [`CartClient`], a cloneable handle with macro-generated, instrumented intent methods
//! - **Storage** - the [`CartStorage`] trait with [`MemoryStorage`] and [`FileStorage`]
//! - **System** - [`CartProvider`] starts and stops everything and scopes [`use_cart`]
//!
//! ## Example
//!
//! ```no_run
//! # async fn demo() -> Result<(), cart_store::CartError> {
//! use cart_store::{use_cart, CartConfig, CartProvider, MemoryStorage, NewCartItem};
//!
//! let provider = CartProvider::start(MemoryStorage::new(), &CartConfig::default());
//!
//! provider
//!     .scope(async {
//!         let cart = use_cart()?;
//!         cart.add_to_cart(NewCartItem::new("1", "Shoe", "shoe.png", 10.0)).await?;
//!         cart.increment("1".to_string()).await
//!     })
//!     .await?;
//!
//! provider.shutdown().await
//! # }
//! ```
//!
//! ## Expected Tracing Output
//!
//! ```text
//! INFO cart_system: Starting cart system storage_key=@Desafio8:products
//! INFO persistence_writer: PersistenceWriter starting
//! INFO cart_service: CartService starting
//! DEBUG cart_service:initialize{storage_key=@Desafio8:products}: No persisted cart, starting empty
//! DEBUG add_to_cart{item=NewCartItem { id: "1", .. }}: Sending request
//! INFO cart_service:handle_add_to_cart{item_id=1}: Added to cart quantity=1
//! DEBUG persistence_writer:handle_write{key=@Desafio8:products bytes=71}: Cart persisted write_seq=1
//! ```

pub mod actors;
pub mod app_system;
pub mod cart_actor;
pub mod clients;
pub mod domain;
pub mod messages;
pub mod storage;

#[cfg(test)]
mod mock_framework;

pub use actors::{CartService, PersistenceWriter};
pub use app_system::{setup_tracing, use_cart, CartConfig, CartProvider, ConfigError};
pub use cart_actor::{CartError, StorageError};
pub use clients::CartClient;
pub use domain::{CartItem, CartPhase, CartSnapshot, NewCartItem};
pub use messages::Products;
pub use storage::{CartStorage, FileStorage, MemoryStorage, CART_STORAGE_KEY};
