//! In-memory cart store.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rust_decimal::Decimal;

use monsoon_core::ProductId;

use crate::catalog::Product;

/// One cart entry: a product snapshot with a quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    /// Unit price in the base currency, captured when the line was added.
    pub unit_price: Decimal,
    pub quantity: u32,
}

impl CartLine {
    /// `unit_price × quantity` in the base currency.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// In-memory cart, keyed by product id.
///
/// Cheaply cloneable; clones share the same lines. Lines may sit at
/// quantity 0 (still displayed by a UI) - they are excluded from totals and
/// checkout via [`Self::active_lines`].
#[derive(Clone, Default)]
pub struct CartStore {
    inner: Arc<Mutex<BTreeMap<ProductId, CartLine>>>,
}

impl CartStore {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert the product with quantity 1, or bump an existing line by one.
    pub fn add(&self, product: &Product) {
        self.lock()
            .entry(product.id)
            .and_modify(|line| line.quantity += 1)
            .or_insert_with(|| CartLine {
                product_id: product.id,
                name: product.name.to_owned(),
                unit_price: product.price,
                quantity: 1,
            });
    }

    /// Set an existing line's quantity. The entry is retained at quantity 0;
    /// unknown ids are ignored.
    pub fn set_quantity(&self, id: ProductId, quantity: u32) {
        if let Some(line) = self.lock().get_mut(&id) {
            line.quantity = quantity;
        }
    }

    /// Delete a line unconditionally.
    pub fn remove(&self, id: ProductId) {
        self.lock().remove(&id);
    }

    /// Empty the cart. Invoked after a successful checkout.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// All lines, including any at quantity 0.
    #[must_use]
    pub fn lines(&self) -> Vec<CartLine> {
        self.lock().values().cloned().collect()
    }

    /// Lines that count toward the total and checkout (quantity > 0).
    #[must_use]
    pub fn active_lines(&self) -> Vec<CartLine> {
        self.lock()
            .values()
            .filter(|line| line.quantity > 0)
            .cloned()
            .collect()
    }

    /// Whether the cart has no lines at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Sum of `unit_price × quantity` over lines with quantity > 0, in the
    /// base currency.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lock()
            .values()
            .filter(|line| line.quantity > 0)
            .map(CartLine::line_total)
            .sum()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<ProductId, CartLine>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
