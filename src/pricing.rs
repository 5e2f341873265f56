//! Price and freshness ordering for result lists and map highlights.

use std::cmp::Ordering;

use crate::core::Product;

/// Freshness label the market API uses for fresh produce
pub const FRESH_LABEL: &str = "Taze";

fn price_key(product: &Product) -> f64 {
    product.min_price.unwrap_or(f64::INFINITY)
}

/// Cheapest first; unpriced products sort last. Ties keep input order.
pub fn sort_by_price(products: &[Product]) -> Vec<Product> {
    let mut sorted = products.to_vec();
    sorted.sort_by(|a, b| price_key(a).partial_cmp(&price_key(b)).unwrap_or(Ordering::Equal));
    sorted
}

/// Fresh products first. Ties keep input order.
pub fn sort_by_freshness(products: &[Product]) -> Vec<Product> {
    let mut sorted = products.to_vec();
    sorted.sort_by_key(|p| p.freshness.as_deref() != Some(FRESH_LABEL));
    sorted
}

/// First product with the lowest price, `None` when nothing is priced
pub fn cheapest(products: &[Product]) -> Option<&Product> {
    products
        .iter()
        .filter(|p| p.min_price.is_some())
        .fold(None, |best: Option<&Product>, current| match best {
            Some(b) if price_key(b) <= price_key(current) => Some(b),
            _ => Some(current),
        })
}

/// Whether `product` carries the lowest price in `products`
pub fn is_cheapest(product: &Product, products: &[Product]) -> bool {
    match (product.min_price, cheapest(products)) {
        (Some(price), Some(best)) => best.min_price.is_some_and(|b| price <= b),
        _ => false,
    }
}

/// Price with two decimals and the lira sign, "N/A" when unpriced
pub fn format_price(price: Option<f64>) -> String {
    match price {
        Some(p) => format!("{:.2} ₺", p),
        None => "N/A".to_string(),
    }
}
