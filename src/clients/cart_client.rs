use tokio::sync::{mpsc, watch};
use tracing::{debug, instrument};

use crate::cart_actor::CartError;
use crate::domain::{CartSnapshot, NewCartItem};
use crate::messages::{CartRequest, Products};

/// Handle consumers use to read the cart and dispatch intents.
///
/// Reads ([`products`](Self::products), [`subscribe`](Self::subscribe)) come
/// from the latest published snapshot and never touch the actor. Intents go
/// through the mailbox and return the products after the change.
#[derive(Clone)]
pub struct CartClient {
    sender: mpsc::Sender<CartRequest>,
    snapshots: watch::Receiver<CartSnapshot>,
}

impl CartClient {
    pub fn new(sender: mpsc::Sender<CartRequest>, snapshots: watch::Receiver<CartSnapshot>) -> Self {
        Self { sender, snapshots }
    }

    /// Current products. Empty until hydration has finished.
    pub fn products(&self) -> Products {
        self.snapshots.borrow().products.clone()
    }

    pub fn snapshot(&self) -> CartSnapshot {
        self.snapshots.borrow().clone()
    }

    /// A receiver that is notified on every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<CartSnapshot> {
        self.snapshots.clone()
    }

    /// Resolves with the hydrated products once the cart is ready.
    #[instrument(skip(self))]
    pub async fn wait_until_ready(&self) -> Result<Products, CartError> {
        let mut snapshots = self.snapshots.clone();
        let snapshot = snapshots
            .wait_for(CartSnapshot::is_ready)
            .await
            .map_err(|e| CartError::ProviderClosed(e.to_string()))?;
        Ok(snapshot.products.clone())
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), CartError> {
        debug!("Sending shutdown request");
        self.sender
            .send(CartRequest::Shutdown)
            .await
            .map_err(|e| CartError::ProviderClosed(e.to_string()))?;
        Ok(())
    }
}

client_method!(CartClient => fn add_to_cart(item: NewCartItem) -> Products as CartRequest::AddToCart);
client_method!(CartClient => fn increment(id: String) -> Products as CartRequest::Increment);
client_method!(CartClient => fn decrement(id: String) -> Products as CartRequest::Decrement);
client_method!(CartClient => fn fetch_products() -> Products as CartRequest::GetProducts);
client_method!(CartClient => fn flush() -> () as CartRequest::Flush);
