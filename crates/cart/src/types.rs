//! Domain types for the cart.
//!
//! [`Product`] and [`StockRecord`] mirror what the inventory API serves;
//! [`CartLine`] and [`CartSnapshot`] are owned by the cart. Snapshots are
//! immutable values: every mutation helper builds and returns a new
//! snapshot, and a line found by lookup is never modified in place.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shopcart_core::ProductId;

// =============================================================================
// Catalog Types
// =============================================================================

/// A product in the remote catalog.
///
/// Read-only display data fetched on demand; not owned by the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product ID.
    pub id: ProductId,
    /// Product title.
    pub title: String,
    /// Unit price.
    pub price: Decimal,
    /// Product image URL.
    pub image: Option<String>,
}

/// The available quantity for a product at query time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRecord {
    /// Product ID.
    pub id: ProductId,
    /// Units available.
    pub amount: i64,
}

// =============================================================================
// Cart Types
// =============================================================================

/// One product entry in the cart with its quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// The product this line holds.
    pub product: Product,
    /// Quantity in the cart, always at least 1.
    pub amount: i64,
}

impl CartLine {
    /// Create a line holding `amount` units of `product`.
    #[must_use]
    pub const fn new(product: Product, amount: i64) -> Self {
        Self { product, amount }
    }

    /// The ID of the product this line holds.
    #[must_use]
    pub const fn product_id(&self) -> ProductId {
        self.product.id
    }

    /// Price of the whole line (unit price times quantity).
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.amount)
    }
}

/// The full cart state at a point in time.
///
/// Lines keep insertion order (the order products were first added).
/// Serializes transparently as a JSON array of lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartSnapshot {
    lines: Vec<CartLine>,
}

impl CartSnapshot {
    /// The empty cart.
    #[must_use]
    pub const fn empty() -> Self {
        Self { lines: Vec::new() }
    }

    /// The cart lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of cart lines (distinct products).
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Look up the line for a product, if present.
    #[must_use]
    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id() == product_id)
    }

    /// Whether the cart has a line for `product_id`.
    #[must_use]
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.line(product_id).is_some()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn total_items(&self) -> i64 {
        self.lines.iter().map(|l| l.amount).sum()
    }

    /// Sum of all line totals.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// New snapshot with `line` appended.
    #[must_use]
    pub fn with_line(&self, line: CartLine) -> Self {
        let mut lines = self.lines.clone();
        lines.push(line);
        Self { lines }
    }

    /// New snapshot with the amount of `product_id`'s line replaced.
    ///
    /// Line identity and order are unchanged. A product with no line
    /// yields an identical snapshot.
    #[must_use]
    pub fn with_amount(&self, product_id: ProductId, amount: i64) -> Self {
        let lines = self
            .lines
            .iter()
            .map(|l| {
                if l.product_id() == product_id {
                    CartLine::new(l.product.clone(), amount)
                } else {
                    l.clone()
                }
            })
            .collect();
        Self { lines }
    }

    /// New snapshot without `product_id`'s line, or `None` if the cart
    /// has no such line.
    #[must_use]
    pub fn without(&self, product_id: ProductId) -> Option<Self> {
        if !self.contains(product_id) {
            return None;
        }

        let lines = self
            .lines
            .iter()
            .filter(|l| l.product_id() != product_id)
            .cloned()
            .collect();
        Some(Self { lines })
    }
}
