use storefront_core::config::AppConfig;
use storefront_core::{ApplicationError, Product};

use crate::commands::{open_session, CommandResult};

pub fn run(config: &AppConfig, category: Option<&str>) -> CommandResult {
    match filtered_products(config, category) {
        Ok((selected, products)) => CommandResult::success(
            "products",
            format!("{} products in `{selected}`", products.len()),
            products,
        ),
        Err(error) => CommandResult::from_error("products", error),
    }
}

fn filtered_products(
    config: &AppConfig,
    category: Option<&str>,
) -> Result<(String, Vec<Product>), ApplicationError> {
    let mut session = open_session(config)?;
    if let Some(category) = category {
        session.select_category(category)?;
    }

    Ok((session.view().selected().to_string(), session.view().list_filtered_products()))
}
