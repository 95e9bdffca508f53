pub mod cart;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod errors;
pub mod fixtures;
pub mod pricing;
pub mod render;
pub mod session;

pub use cart::CartLedger;
pub use catalog::{Catalog, CatalogView, CategoryFilter, ALL_CATEGORIES};
pub use domain::cart::CartLine;
pub use domain::product::{Product, ProductId};
pub use errors::{ApplicationError, DomainError, InterfaceError};
pub use pricing::{format_money, DeterministicPricingEngine, PricingEngine, PricingResult};
pub use render::StorefrontRenderer;
pub use session::{ActionOutcome, SessionOptions, StoreAction, StoreSession, StorefrontSnapshot};
