use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, error, info, instrument, warn};

use crate::cart_actor::{add_item, decode_blob, decrement_item, encode_blob, increment_item, CartError};
use crate::clients::CartClient;
use crate::domain::{CartItem, CartPhase, CartSnapshot, NewCartItem};
use crate::messages::{CartRequest, PersistRequest, Products, ServiceResponse};
use crate::storage::CartStorage;

/// Owns the authoritative cart.
///
/// Every change builds a new collection from the current one, swaps it in,
/// publishes a snapshot to subscribers and queues the full collection for the
/// [`PersistenceWriter`](super::PersistenceWriter). The handler never waits on
/// storage.
pub struct CartService {
    receiver: mpsc::Receiver<CartRequest>,
    storage: Arc<dyn CartStorage>,
    storage_key: String,
    products: Products,
    snapshots: watch::Sender<CartSnapshot>,
    writer: mpsc::UnboundedSender<PersistRequest>,
}

impl CartService {
    pub fn new(
        buffer_size: usize,
        storage: Arc<dyn CartStorage>,
        storage_key: impl Into<String>,
        writer: mpsc::UnboundedSender<PersistRequest>,
    ) -> (Self, CartClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (snapshots, snapshot_rx) = watch::channel(CartSnapshot::hydrating());
        let service = Self {
            receiver,
            storage,
            storage_key: storage_key.into(),
            products: Arc::from(Vec::new()),
            snapshots,
            writer,
        };
        let client = CartClient::new(sender, snapshot_rx);
        (service, client)
    }

    /// Hydrates from storage, then serves requests until shutdown.
    ///
    /// Requests that arrive while hydrating wait in the mailbox, so they always
    /// apply on top of the restored cart.
    #[instrument(name = "cart_service", skip(self))]
    pub async fn run(mut self) {
        info!("CartService starting");

        self.initialize().await;

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CartRequest::AddToCart { item, respond_to } => {
                    self.handle_add_to_cart(item, respond_to);
                }
                CartRequest::Increment { id, respond_to } => {
                    self.handle_increment(id, respond_to);
                }
                CartRequest::Decrement { id, respond_to } => {
                    self.handle_decrement(id, respond_to);
                }
                CartRequest::GetProducts { respond_to } => {
                    let _ = respond_to.send(Ok(self.products.clone()));
                }
                CartRequest::Flush { respond_to } => {
                    self.handle_flush(respond_to);
                }
                CartRequest::Shutdown => {
                    info!("CartService shutting down");
                    break;
                }
            }
        }

        info!(item_count = self.products.len(), "CartService stopped");
    }

    #[instrument(fields(storage_key = %self.storage_key), skip(self))]
    async fn initialize(&mut self) {
        debug!("Loading persisted cart");

        match self.storage.get_item(&self.storage_key).await {
            Ok(Some(blob)) => match decode_blob(&blob) {
                Ok(products) => {
                    info!(item_count = products.len(), "Cart restored");
                    self.products = products.into();
                }
                Err(e) => warn!(error = %e, "Persisted cart is malformed, starting empty"),
            },
            Ok(None) => debug!("No persisted cart, starting empty"),
            Err(e) => warn!(error = %e, "Failed to read persisted cart, starting empty"),
        }

        self.publish(CartPhase::Ready);
    }

    #[instrument(fields(item_id = %item.id), skip(self, item, respond_to))]
    fn handle_add_to_cart(&mut self, item: NewCartItem, respond_to: ServiceResponse<Products, CartError>) {
        debug!("Processing add_to_cart request");

        let id = item.id.clone();
        let next = add_item(&self.products, item);
        self.replace(next);
        self.log_quantity(&id, "Added to cart");

        let _ = respond_to.send(Ok(self.products.clone()));
    }

    #[instrument(fields(item_id = %id), skip(self, respond_to))]
    fn handle_increment(&mut self, id: String, respond_to: ServiceResponse<Products, CartError>) {
        debug!("Processing increment request");

        let next = increment_item(&self.products, &id);
        self.replace(next);
        self.log_quantity(&id, "Quantity incremented");

        let _ = respond_to.send(Ok(self.products.clone()));
    }

    #[instrument(fields(item_id = %id), skip(self, respond_to))]
    fn handle_decrement(&mut self, id: String, respond_to: ServiceResponse<Products, CartError>) {
        debug!("Processing decrement request");

        let next = decrement_item(&self.products, &id);
        self.replace(next);
        self.log_quantity(&id, "Quantity decremented");

        let _ = respond_to.send(Ok(self.products.clone()));
    }

    /// Answers once the writer has worked through everything queued so far.
    /// The wait happens in a spawned task so the mailbox keeps moving.
    fn handle_flush(&self, respond_to: ServiceResponse<(), CartError>) {
        debug!("Processing flush request");

        let (done_tx, done_rx) = oneshot::channel();
        if self.writer.send(PersistRequest::Flush { respond_to: done_tx }).is_err() {
            let _ = respond_to.send(Err(CartError::ProviderClosed("persistence writer stopped".to_string())));
            return;
        }

        tokio::spawn(async move {
            let result = done_rx
                .await
                .map_err(|e| CartError::ProviderClosed(e.to_string()));
            let _ = respond_to.send(result);
        });
    }

    fn replace(&mut self, next: Vec<CartItem>) {
        self.products = next.into();
        self.publish(CartPhase::Ready);
        self.persist();
    }

    fn publish(&self, phase: CartPhase) {
        self.snapshots.send_replace(CartSnapshot {
            phase,
            products: self.products.clone(),
        });
    }

    /// Queues the whole collection. Failures are logged, never returned.
    fn persist(&self) {
        let blob = match encode_blob(&self.products) {
            Ok(blob) => blob,
            Err(e) => {
                error!(error = %e, "Failed to encode cart");
                return;
            }
        };

        let request = PersistRequest::Write {
            key: self.storage_key.clone(),
            blob,
        };
        if self.writer.send(request).is_err() {
            warn!("Persistence writer stopped, change not saved");
        }
    }

    fn log_quantity(&self, id: &str, message: &str) {
        match self.products.iter().find(|p| p.id == id) {
            Some(item) => info!(quantity = item.quantity, "{}", message),
            None => debug!("Item not in cart, nothing changed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actors::PersistenceWriter;
    use crate::storage::{MemoryStorage, CART_STORAGE_KEY};

    /// Starts both actors and keeps a writer handle for test-only queries.
    fn start(storage: MemoryStorage) -> (CartClient, mpsc::UnboundedSender<PersistRequest>) {
        let storage: Arc<dyn CartStorage> = Arc::new(storage);
        let (writer, writer_tx) = PersistenceWriter::new(storage.clone());
        tokio::spawn(writer.run());
        let (service, client) = CartService::new(8, storage, CART_STORAGE_KEY, writer_tx.clone());
        tokio::spawn(service.run());
        (client, writer_tx)
    }

    #[tokio::test]
    async fn test_one_write_per_mutation() -> Result<(), Box<dyn std::error::Error>> {
        let (cart, writer_tx) = start(MemoryStorage::new());

        cart.add_to_cart(NewCartItem::new("1", "Shoe", "u", 10.0)).await?;
        cart.add_to_cart(NewCartItem::new("1", "Shoe", "u", 10.0)).await?;
        cart.increment("1".to_string()).await?;
        cart.increment("missing".to_string()).await?;
        cart.decrement("missing".to_string()).await?;
        cart.decrement("1".to_string()).await?;
        cart.fetch_products().await?;
        cart.flush().await?;

        let (respond_to, written) = oneshot::channel();
        writer_tx.send(PersistRequest::GetWriteCount { respond_to })?;
        assert_eq!(written.await?, 6);

        cart.shutdown().await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_hydration_alone_does_not_write() -> Result<(), Box<dyn std::error::Error>> {
        let storage = MemoryStorage::new()
            .with_item(CART_STORAGE_KEY, r#"[{"id":"1","title":"Shoe","image_url":"u","price":10,"quantity":1}]"#)
            .await;
        let (cart, writer_tx) = start(storage);

        assert_eq!(cart.wait_until_ready().await?.len(), 1);
        cart.flush().await?;

        let (respond_to, written) = oneshot::channel();
        writer_tx.send(PersistRequest::GetWriteCount { respond_to })?;
        assert_eq!(written.await?, 0);
        Ok(())
    }
}
