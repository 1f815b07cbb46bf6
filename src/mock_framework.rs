//! # Mock Framework
//!
//! Utilities for testing cart consumers without spinning up the actors.
//!
//! [`create_mock_client`] returns a real [`CartClient`] wired to a mailbox the
//! test owns, plus the snapshot sender so the test can play the service's
//! part. The `expect_*` helpers pull the next request and hand back its
//! payload and responder.

use tokio::sync::{mpsc, oneshot, watch};

use crate::cart_actor::CartError;
use crate::clients::CartClient;
use crate::domain::{CartSnapshot, NewCartItem};
use crate::messages::{CartRequest, Products};

pub type Responder<T> = oneshot::Sender<Result<T, CartError>>;

pub fn create_mock_client(
    buffer_size: usize,
) -> (CartClient, mpsc::Receiver<CartRequest>, watch::Sender<CartSnapshot>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    let (snapshots, snapshot_rx) = watch::channel(CartSnapshot::hydrating());
    (CartClient::new(sender, snapshot_rx), receiver, snapshots)
}

pub async fn expect_add_to_cart(
    receiver: &mut mpsc::Receiver<CartRequest>,
) -> Option<(NewCartItem, Responder<Products>)> {
    match receiver.recv().await {
        Some(CartRequest::AddToCart { item, respond_to }) => Some((item, respond_to)),
        _ => None,
    }
}

pub async fn expect_increment(
    receiver: &mut mpsc::Receiver<CartRequest>,
) -> Option<(String, Responder<Products>)> {
    match receiver.recv().await {
        Some(CartRequest::Increment { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

pub async fn expect_decrement(
    receiver: &mut mpsc::Receiver<CartRequest>,
) -> Option<(String, Responder<Products>)> {
    match receiver.recv().await {
        Some(CartRequest::Decrement { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CartItem, CartPhase};
    use std::sync::Arc;

    fn shoe_line(quantity: u32) -> CartItem {
        CartItem {
            id: "1".into(),
            title: "Shoe".into(),
            image_url: "u".into(),
            price: 10.0,
            quantity,
        }
    }

    #[tokio::test]
    async fn test_add_to_cart_request() {
        let (client, mut receiver, _snapshots) = create_mock_client(10);

        let task = tokio::spawn(async move {
            client.add_to_cart(NewCartItem::new("1", "Shoe", "u", 10.0)).await
        });

        let (item, responder) = expect_add_to_cart(&mut receiver).await.expect("Expected AddToCart request");
        assert_eq!(item.id, "1");
        assert_eq!(item.title, "Shoe");
        responder.send(Ok(Arc::from(vec![shoe_line(1)]))).unwrap();

        let products = task.await.unwrap().unwrap();
        assert_eq!(&*products, &[shoe_line(1)]);
    }

    #[tokio::test]
    async fn test_increment_and_decrement_requests() {
        let (client, mut receiver, _snapshots) = create_mock_client(10);

        let task = tokio::spawn(async move {
            client.increment("1".to_string()).await?;
            client.decrement("1".to_string()).await
        });

        let (id, responder) = expect_increment(&mut receiver).await.expect("Expected Increment request");
        assert_eq!(id, "1");
        responder.send(Ok(Arc::from(vec![shoe_line(2)]))).unwrap();

        let (id, responder) = expect_decrement(&mut receiver).await.expect("Expected Decrement request");
        assert_eq!(id, "1");
        responder.send(Ok(Arc::from(vec![shoe_line(1)]))).unwrap();

        assert_eq!(task.await.unwrap().unwrap()[0].quantity, 1);
    }

    #[tokio::test]
    async fn test_dropped_responder_is_provider_closed() {
        let (client, mut receiver, _snapshots) = create_mock_client(10);

        let task = tokio::spawn(async move { client.increment("1".to_string()).await });

        let (_, responder) = expect_increment(&mut receiver).await.expect("Expected Increment request");
        drop(responder);

        assert!(matches!(task.await.unwrap(), Err(CartError::ProviderClosed(_))));
    }

    #[tokio::test]
    async fn test_products_follow_snapshots() {
        let (client, _receiver, snapshots) = create_mock_client(10);
        assert!(client.products().is_empty());
        assert_eq!(client.snapshot().phase, CartPhase::Hydrating);

        snapshots.send_replace(CartSnapshot {
            phase: CartPhase::Ready,
            products: Arc::from(vec![shoe_line(3)]),
        });

        assert_eq!(client.products()[0].quantity, 3);
        assert_eq!(client.wait_until_ready().await.unwrap().len(), 1);
    }
}
