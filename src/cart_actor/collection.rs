use crate::domain::{CartItem, NewCartItem};

/// Returns a new collection with `item` added.
///
/// An existing line with the same id has its quantity bumped and keeps its
/// stored title, image and price. Otherwise the item is appended with a
/// quantity of one.
pub fn add_item(products: &[CartItem], item: NewCartItem) -> Vec<CartItem> {
    if products.iter().any(|p| p.id == item.id) {
        return adjust_quantity(products, &item.id, |q| q.saturating_add(1));
    }

    let mut next = products.to_vec();
    next.push(item.into_line_item());
    next
}

pub fn increment_item(products: &[CartItem], id: &str) -> Vec<CartItem> {
    adjust_quantity(products, id, |q| q.saturating_add(1))
}

/// Quantity floors at zero. Zero-quantity lines stay in the cart.
pub fn decrement_item(products: &[CartItem], id: &str) -> Vec<CartItem> {
    adjust_quantity(products, id, |q| q.saturating_sub(1))
}

fn adjust_quantity(products: &[CartItem], id: &str, f: impl Fn(u32) -> u32) -> Vec<CartItem> {
    products
        .iter()
        .map(|p| {
            if p.id == id {
                CartItem {
                    quantity: f(p.quantity),
                    ..p.clone()
                }
            } else {
                p.clone()
            }
        })
        .collect()
}

/// Parses a persisted blob. Anything that is not a JSON array of line items is rejected.
pub fn decode_blob(blob: &str) -> Result<Vec<CartItem>, serde_json::Error> {
    serde_json::from_str(blob)
}

pub fn encode_blob(products: &[CartItem]) -> Result<String, serde_json::Error> {
    serde_json::to_string(products)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shoe() -> NewCartItem {
        NewCartItem::new("1", "Shoe", "u", 10.0)
    }

    fn quantities(products: &[CartItem]) -> Vec<(&str, u32)> {
        products.iter().map(|p| (p.id.as_str(), p.quantity)).collect()
    }

    #[test]
    fn test_add_to_empty_cart() {
        let products = add_item(&[], shoe());
        assert_eq!(
            products,
            vec![CartItem {
                id: "1".into(),
                title: "Shoe".into(),
                image_url: "u".into(),
                price: 10.0,
                quantity: 1,
            }]
        );
    }

    #[test]
    fn test_distinct_ids_each_get_one() {
        let mut products = Vec::new();
        for id in ["a", "b", "c", "d"] {
            products = add_item(&products, NewCartItem::new(id, id, "", 1.0));
        }
        assert_eq!(quantities(&products), vec![("a", 1), ("b", 1), ("c", 1), ("d", 1)]);
    }

    #[test]
    fn test_same_id_twice_keeps_stored_fields() {
        let products = add_item(&[], shoe());
        let products = add_item(&products, NewCartItem::new("1", "Boot", "other", 99.0));

        assert_eq!(products.len(), 1);
        assert_eq!(products[0].quantity, 2);
        assert_eq!(products[0].title, "Shoe");
        assert_eq!(products[0].image_url, "u");
        assert_eq!(products[0].price, 10.0);
    }

    #[test]
    fn test_increment_absent_id_is_noop() {
        let products = add_item(&[], shoe());
        assert_eq!(increment_item(&products, "missing"), products);
    }

    #[test]
    fn test_increment_then_decrement_restores() {
        let products = add_item(&add_item(&[], shoe()), NewCartItem::new("2", "Hat", "h", 5.0));
        let bumped = increment_item(&products, "2");
        assert_eq!(quantities(&bumped), vec![("1", 1), ("2", 2)]);
        assert_eq!(decrement_item(&bumped, "2"), products);
    }

    #[test]
    fn test_decrement_floors_at_zero() {
        let products = add_item(&[], shoe());
        let products = decrement_item(&products, "1");
        let products = decrement_item(&products, "1");
        assert_eq!(quantities(&products), vec![("1", 0)]);
    }

    #[test]
    fn test_decode_rejects_non_array() {
        assert!(decode_blob(r#"{"id":"1"}"#).is_err());
        assert!(decode_blob("not json").is_err());
        assert_eq!(decode_blob("[]").unwrap(), Vec::new());
    }
}
