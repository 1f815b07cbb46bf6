use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument};

use crate::messages::PersistRequest;
use crate::storage::CartStorage;

/// Single writer in front of the storage backend.
///
/// Writes are applied one at a time in the order they were queued, so the
/// stored blob always ends up matching the latest cart. The queue is unbounded
/// because senders must never block on I/O.
pub struct PersistenceWriter {
    receiver: mpsc::UnboundedReceiver<PersistRequest>,
    storage: Arc<dyn CartStorage>,
    writes: u64,
}

impl PersistenceWriter {
    pub fn new(storage: Arc<dyn CartStorage>) -> (Self, mpsc::UnboundedSender<PersistRequest>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let writer = Self {
            receiver,
            storage,
            writes: 0,
        };
        (writer, sender)
    }

    /// Runs until every sender is gone, draining whatever is still queued.
    #[instrument(name = "persistence_writer", skip(self))]
    pub async fn run(mut self) {
        info!("PersistenceWriter starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                PersistRequest::Write { key, blob } => {
                    self.handle_write(key, blob).await;
                }
                PersistRequest::Flush { respond_to } => {
                    let _ = respond_to.send(());
                }
                #[cfg(test)]
                PersistRequest::GetWriteCount { respond_to } => {
                    let _ = respond_to.send(self.writes);
                }
            }
        }

        info!(writes = self.writes, "PersistenceWriter stopped");
    }

    #[instrument(fields(key = %key, bytes = blob.len()), skip(self, blob))]
    async fn handle_write(&mut self, key: String, blob: String) {
        self.writes += 1;

        match self.storage.set_item(&key, blob).await {
            Ok(()) => debug!(write_seq = self.writes, "Cart persisted"),
            Err(e) => error!(write_seq = self.writes, error = %e, "Failed to persist cart"),
        }
    }
}
