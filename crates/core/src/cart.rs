use std::collections::BTreeMap;
use std::num::NonZeroU32;
use std::sync::Arc;

use rust_decimal::Decimal;

use crate::catalog::Catalog;
use crate::domain::cart::CartLine;
use crate::domain::product::ProductId;
use crate::errors::DomainError;
use crate::pricing::price_cart;

/// Quantity map keyed by product id. Keys are kept in ascending order, which is
/// also the order of derived line items.
#[derive(Clone, Debug)]
pub struct CartLedger {
    catalog: Arc<Catalog>,
    quantities: BTreeMap<ProductId, NonZeroU32>,
}

impl CartLedger {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog, quantities: BTreeMap::new() }
    }

    /// Adds one unit and returns the new quantity.
    pub fn add_one(&mut self, product_id: ProductId) -> Result<u32, DomainError> {
        let unit_price = self
            .catalog
            .find(product_id)
            .map(|product| product.price)
            .ok_or(DomainError::ProductNotFound(product_id))?;

        let next = match self.quantities.get(&product_id) {
            Some(current) => {
                current.checked_add(1).ok_or(DomainError::QuantityOverflow(product_id))?
            }
            None => NonZeroU32::MIN,
        };

        // Prices are non-negative, so every line amount and partial sum is bounded
        // by the cart total: a representable total keeps all derived amounts valid.
        self.compute_total()?
            .checked_add(unit_price)
            .ok_or(DomainError::AmountOverflow(product_id))?;

        self.quantities.insert(product_id, next);
        Ok(next.get())
    }

    /// Removes one unit. Returns the remaining quantity (0 once the entry is
    /// gone), or `None` when the product was not in the cart.
    pub fn remove_one(&mut self, product_id: ProductId) -> Option<u32> {
        let current = self.quantities.get(&product_id).copied()?;
        match NonZeroU32::new(current.get() - 1) {
            Some(remaining) => {
                self.quantities.insert(product_id, remaining);
                Some(remaining.get())
            }
            None => {
                self.quantities.remove(&product_id);
                Some(0)
            }
        }
    }

    pub fn quantity(&self, product_id: ProductId) -> u32 {
        self.quantities.get(&product_id).map_or(0, |quantity| quantity.get())
    }

    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }

    pub fn item_count(&self) -> u64 {
        self.quantities.values().map(|quantity| u64::from(quantity.get())).sum()
    }

    pub fn clear(&mut self) {
        self.quantities.clear();
    }

    pub fn list_line_items(&self) -> Result<Vec<CartLine>, DomainError> {
        self.quantities
            .iter()
            .filter_map(|(product_id, quantity)| {
                self.catalog
                    .find(*product_id)
                    .map(|product| CartLine::from_product(product, quantity.get()))
            })
            .collect()
    }

    pub fn compute_total(&self) -> Result<Decimal, DomainError> {
        price_cart(&self.list_line_items()?)
    }
}
