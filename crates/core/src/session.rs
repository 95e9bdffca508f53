use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::cart::CartLedger;
use crate::catalog::{Catalog, CatalogView, CategoryFilter};
use crate::domain::cart::CartLine;
use crate::domain::product::{Product, ProductId};
use crate::errors::DomainError;
use crate::pricing::{price_cart_with_trace, PricingResult};

/// One user action against a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "value", rename_all = "snake_case")]
pub enum StoreAction {
    SelectCategory(String),
    AddToCart(ProductId),
    RemoveFromCart(ProductId),
}

impl FromStr for StoreAction {
    type Err = DomainError;

    /// Parses `select:<category>`, `add:<id>` or `remove:<id>`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::InvalidAction(value.to_owned());
        let (verb, argument) = value.split_once(':').ok_or_else(invalid)?;

        match verb.trim().to_ascii_lowercase().as_str() {
            "select" => Ok(Self::SelectCategory(argument.to_owned())),
            "add" => argument.parse().map(Self::AddToCart).map_err(|_| invalid()),
            "remove" => argument.parse().map(Self::RemoveFromCart).map_err(|_| invalid()),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for StoreAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SelectCategory(category) => write!(f, "select:{category}"),
            Self::AddToCart(product_id) => write!(f, "add:{product_id}"),
            Self::RemoveFromCart(product_id) => write!(f, "remove:{product_id}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ActionOutcome {
    CategorySelected { category: String },
    QuantityChanged { product_id: ProductId, quantity: u32 },
    Unchanged,
}

/// Everything a storefront page shows, derived from the current session state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorefrontSnapshot {
    pub selected_category: String,
    pub categories: Vec<String>,
    pub products: Vec<Product>,
    pub cart: Vec<CartLine>,
    pub item_count: u64,
    pub total: Decimal,
    pub currency: String,
}

#[derive(Clone, Debug)]
pub struct SessionOptions {
    pub currency: String,
    pub strict_categories: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self { currency: "USD".to_string(), strict_categories: false }
    }
}

/// Per-user storefront state: the category filter and the cart, both over one
/// shared catalog.
#[derive(Clone, Debug)]
pub struct StoreSession {
    view: CatalogView,
    cart: CartLedger,
    currency: String,
}

impl StoreSession {
    pub fn new(catalog: Arc<Catalog>, options: SessionOptions) -> Self {
        Self {
            view: CatalogView::new(Arc::clone(&catalog))
                .with_strict_categories(options.strict_categories),
            cart: CartLedger::new(catalog),
            currency: options.currency,
        }
    }

    pub fn view(&self) -> &CatalogView {
        &self.view
    }

    pub fn cart(&self) -> &CartLedger {
        &self.cart
    }

    pub fn select_category(&mut self, category: &str) -> Result<ActionOutcome, DomainError> {
        self.apply(StoreAction::SelectCategory(category.to_owned()))
    }

    pub fn add_to_cart(&mut self, product_id: ProductId) -> Result<ActionOutcome, DomainError> {
        self.apply(StoreAction::AddToCart(product_id))
    }

    pub fn remove_from_cart(&mut self, product_id: ProductId) -> Result<ActionOutcome, DomainError> {
        self.apply(StoreAction::RemoveFromCart(product_id))
    }

    pub fn apply(&mut self, action: StoreAction) -> Result<ActionOutcome, DomainError> {
        let result = match &action {
            StoreAction::SelectCategory(category) => self.select(category),
            StoreAction::AddToCart(product_id) => self.add(*product_id),
            StoreAction::RemoveFromCart(product_id) => Ok(self.remove(*product_id)),
        };

        if let Err(error) = &result {
            warn!(
                event_name = "storefront.action.rejected",
                action = %action,
                error = %error,
                "action rejected"
            );
        }

        result
    }

    fn select(&mut self, category: &str) -> Result<ActionOutcome, DomainError> {
        self.view.set_category_filter(CategoryFilter::from(category))?;
        let category = self.view.selected().to_string();
        info!(
            event_name = "storefront.catalog.category_selected",
            category = %category,
            "category filter updated"
        );
        Ok(ActionOutcome::CategorySelected { category })
    }

    fn add(&mut self, product_id: ProductId) -> Result<ActionOutcome, DomainError> {
        let quantity = self.cart.add_one(product_id)?;
        info!(
            event_name = "storefront.cart.item_added",
            product_id = product_id.0,
            quantity,
            "item added to cart"
        );
        Ok(ActionOutcome::QuantityChanged { product_id, quantity })
    }

    fn remove(&mut self, product_id: ProductId) -> ActionOutcome {
        match self.cart.remove_one(product_id) {
            Some(quantity) => {
                info!(
                    event_name = "storefront.cart.item_removed",
                    product_id = product_id.0,
                    quantity,
                    "item removed from cart"
                );
                ActionOutcome::QuantityChanged { product_id, quantity }
            }
            None => {
                debug!(
                    event_name = "storefront.cart.noop",
                    product_id = product_id.0,
                    "product not in cart, nothing removed"
                );
                ActionOutcome::Unchanged
            }
        }
    }

    pub fn reset(&mut self) {
        self.view.reset();
        self.cart.clear();
        debug!(event_name = "storefront.session.reset", "session state reset");
    }

    pub fn pricing(&self) -> Result<PricingResult, DomainError> {
        price_cart_with_trace(&self.cart.list_line_items()?, &self.currency)
    }

    pub fn snapshot(&self) -> Result<StorefrontSnapshot, DomainError> {
        let cart = self.cart.list_line_items()?;
        let total = price_cart_with_trace(&cart, &self.currency)?.total;

        Ok(StorefrontSnapshot {
            selected_category: self.view.selected().to_string(),
            categories: self.view.list_categories(),
            products: self.view.list_filtered_products(),
            item_count: self.cart.item_count(),
            cart,
            total,
            currency: self.currency.clone(),
        })
    }
}
