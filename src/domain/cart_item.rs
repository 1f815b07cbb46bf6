use serde::{Deserialize, Deserializer, Serialize};

/// One distinct product in the cart together with how many of it the user wants.
///
/// Field names match the persisted JSON blob exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: String,
    pub title: String,
    pub image_url: String,
    pub price: f64,
    #[serde(deserialize_with = "clamp_quantity")]
    pub quantity: u32,
}

/// Stored carts may carry negative quantities from unbounded decrements.
/// Those lines load with a quantity of zero instead of failing the whole blob.
fn clamp_quantity<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let raw = i64::deserialize(deserializer)?;
    Ok(u32::try_from(raw.max(0)).unwrap_or(u32::MAX))
}

/// Payload for adding a product to the cart. The cart owns the quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCartItem {
    pub id: String,
    pub title: String,
    pub image_url: String,
    pub price: f64,
}

impl NewCartItem {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        image_url: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            image_url: image_url.into(),
            price,
        }
    }

    /// Turns the payload into a fresh line item with a quantity of one.
    pub fn into_line_item(self) -> CartItem {
        CartItem {
            id: self.id,
            title: self.title,
            image_url: self.image_url,
            price: self.price,
            quantity: 1,
        }
    }
}

/// Whether the cart has finished loading from storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartPhase {
    /// Storage has not been read yet; products are empty.
    Hydrating,
    Ready,
}

/// What subscribers observe: the current products and the load phase.
#[derive(Debug, Clone)]
pub struct CartSnapshot {
    pub phase: CartPhase,
    pub products: std::sync::Arc<[CartItem]>,
}

impl CartSnapshot {
    pub fn hydrating() -> Self {
        Self {
            phase: CartPhase::Hydrating,
            products: std::sync::Arc::from(Vec::new()),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.phase == CartPhase::Ready
    }
}
