//! The cart's two actors: the service that owns the collection and the writer
//! that serializes persistence.

mod cart_service;
mod persistence_writer;

pub use cart_service::CartService;
pub use persistence_writer::PersistenceWriter;
