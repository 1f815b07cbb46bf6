//! Typed messages for the cart actors. Each request that expects an answer
//! carries a oneshot channel for the response.

use std::sync::Arc;

use tokio::sync::oneshot;

use crate::cart_actor::CartError;
use crate::domain::{CartItem, NewCartItem};

pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// Products as handed to consumers: a shared, read-only slice.
pub type Products = Arc<[CartItem]>;

#[derive(Debug)]
pub enum CartRequest {
    AddToCart {
        item: NewCartItem,
        respond_to: ServiceResponse<Products, CartError>,
    },
    Increment {
        id: String,
        respond_to: ServiceResponse<Products, CartError>,
    },
    Decrement {
        id: String,
        respond_to: ServiceResponse<Products, CartError>,
    },
    GetProducts {
        respond_to: ServiceResponse<Products, CartError>,
    },
    Flush {
        respond_to: ServiceResponse<(), CartError>,
    },
    Shutdown,
}

/// Work for the persistence writer. Processed strictly in order.
#[derive(Debug)]
pub enum PersistRequest {
    Write { key: String, blob: String },
    /// Answered once every write queued before it has been attempted.
    Flush { respond_to: oneshot::Sender<()> },
    #[cfg(test)]
    GetWriteCount { respond_to: oneshot::Sender<u64> },
}
