use std::future::Future;
use std::sync::Arc;

use tracing::{error, info, instrument, warn};

use crate::actors::{CartService, PersistenceWriter};
use crate::app_system::CartConfig;
use crate::cart_actor::CartError;
use crate::clients::CartClient;
use crate::storage::CartStorage;

tokio::task_local! {
    static CART_CONTEXT: CartClient;
}

/// Starts the cart actors, owns their task handles, and defines the scope in
/// which [`use_cart`] resolves.
pub struct CartProvider {
    cart_client: CartClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl CartProvider {
    /// Spawns the persistence writer, then the cart service that feeds it.
    /// Must be called from within a tokio runtime.
    #[instrument(name = "cart_system", skip(storage, config))]
    pub fn start(storage: impl CartStorage, config: &CartConfig) -> Self {
        info!(storage_key = %config.storage_key, "Starting cart system");

        let storage: Arc<dyn CartStorage> = Arc::new(storage);
        let mut handles = Vec::new();

        let (writer, writer_tx) = PersistenceWriter::new(storage.clone());
        handles.push(tokio::spawn(writer.run()));

        let (service, cart_client) = CartService::new(
            config.buffer_size,
            storage,
            config.storage_key.clone(),
            writer_tx,
        );
        handles.push(tokio::spawn(service.run()));

        info!("Cart system started");
        Self { cart_client, handles }
    }

    pub fn client(&self) -> CartClient {
        self.cart_client.clone()
    }

    /// Runs `f` with this provider's cart installed as the ambient context.
    pub async fn scope<F: Future>(&self, f: F) -> F::Output {
        CART_CONTEXT.scope(self.cart_client.clone(), f).await
    }

    /// Stops the service, lets the writer drain pending writes, and joins both tasks.
    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), CartError> {
        info!("Shutting down cart system");

        if let Err(e) = self.cart_client.shutdown().await {
            warn!(error = %e, "Cart service already stopped");
        }

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Cart task shutdown error");
            }
        }

        info!("Cart system shutdown complete");
        Ok(())
    }
}

/// The cart of the enclosing [`CartProvider::scope`].
///
/// Fails with [`CartError::OutsideProvider`] when there is no enclosing scope.
pub fn use_cart() -> Result<CartClient, CartError> {
    CART_CONTEXT
        .try_with(CartClient::clone)
        .map_err(|_| CartError::OutsideProvider)
}
