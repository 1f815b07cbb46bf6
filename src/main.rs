use tracing::{error, info, Instrument};

use cart_store::{setup_tracing, use_cart, CartConfig, CartError, CartProvider, FileStorage, NewCartItem};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    setup_tracing();

    let config = CartConfig::from_env()?;
    info!(storage_dir = %config.storage_dir.display(), "Starting cart demo");

    let provider = CartProvider::start(FileStorage::new(&config.storage_dir), &config);

    let restored = provider.client().wait_until_ready().await?;
    info!(item_count = restored.len(), "Cart ready");

    let span = tracing::info_span!("shopping");
    let result = provider
        .scope(
            async {
                let cart = use_cart()?;
                cart.add_to_cart(NewCartItem::new("1", "Running Shoe", "https://example.com/shoe.png", 89.9))
                    .await?;
                cart.add_to_cart(NewCartItem::new("2", "Cap", "https://example.com/cap.png", 19.5))
                    .await?;
                cart.increment("1".to_string()).await?;
                cart.decrement("2".to_string()).await?;
                cart.flush().await?;
                Ok::<_, CartError>(cart.products())
            }
            .instrument(span),
        )
        .await;

    match result {
        Ok(products) => {
            for item in products.iter() {
                info!(id = %item.id, title = %item.title, quantity = item.quantity, "Line item");
            }
        }
        Err(e) => error!(error = %e, "Cart demo failed"),
    }

    provider.shutdown().await?;
    info!("Cart demo completed");
    Ok(())
}
