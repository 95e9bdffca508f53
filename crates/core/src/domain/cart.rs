use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::product::{Product, ProductId};
use crate::errors::DomainError;
use crate::pricing::line_amount;

/// A cart entry joined against its catalog product. Derived on demand from the
/// ledger's quantity map and never stored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub category: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub line_total: Decimal,
}

impl CartLine {
    pub fn from_product(product: &Product, quantity: u32) -> Result<Self, DomainError> {
        Ok(Self {
            product_id: product.id,
            name: product.name.clone(),
            category: product.category.clone(),
            unit_price: product.price,
            quantity,
            line_total: line_amount(product.id, product.price, quantity)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::domain::product::{Product, ProductId};
    use crate::errors::DomainError;

    use super::CartLine;

    #[test]
    fn line_total_is_unit_price_times_quantity() {
        let product = Product::new(3, "Mug", "Kitchen", Decimal::new(1250, 2));
        let line = CartLine::from_product(&product, 3).expect("fits");

        assert_eq!(line.line_total, Decimal::new(3750, 2));
        assert_eq!(line.name, "Mug");
    }

    #[test]
    fn line_total_overflow_is_an_error() {
        let product = Product::new(4, "Vault", "Luxury", Decimal::MAX);
        assert_eq!(
            CartLine::from_product(&product, 2),
            Err(DomainError::AmountOverflow(ProductId(4)))
        );
    }
}
