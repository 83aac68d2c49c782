//! Cart error taxonomy.
//!
//! Errors are terminal at the operation boundary: [`crate::store::CartStore`]
//! collapses every variant into one fixed notification string and returns
//! normally. The tagged variants exist so each failure cause stays testable
//! even though the user-facing surface is coarse.

use shopcart_core::ProductId;
use thiserror::Error;

use crate::inventory::InventoryError;
use crate::persistence::StorageError;

/// Reasons a cart operation does not commit a new snapshot.
#[derive(Debug, Error)]
pub enum CartError {
    /// Requested quantity exceeds the available stock.
    #[error(
        "insufficient stock for product {product_id}: requested {requested}, available {available}"
    )]
    OutOfStock {
        /// Product whose stock was checked.
        product_id: ProductId,
        /// Quantity the operation asked for.
        requested: i64,
        /// Quantity the inventory reported.
        available: i64,
    },

    /// The operation targeted a product with no cart line.
    #[error("product {0} is not in the cart")]
    NotInCart(ProductId),

    /// Inventory lookup failed.
    #[error("inventory error: {0}")]
    Inventory(#[from] InventoryError),

    /// Durable write failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_error_display() {
        let err = CartError::OutOfStock {
            product_id: ProductId::new(3),
            requested: 5,
            available: 2,
        };
        assert_eq!(
            err.to_string(),
            "insufficient stock for product 3: requested 5, available 2"
        );

        let err = CartError::NotInCart(ProductId::new(7));
        assert_eq!(err.to_string(), "product 7 is not in the cart");
    }
}
