use storefront_core::config::AppConfig;

use crate::commands::{open_session, CommandResult};

pub fn run(config: &AppConfig) -> CommandResult {
    match open_session(config) {
        Ok(session) => {
            let categories = session.view().list_categories();
            CommandResult::success(
                "categories",
                format!("{} categories (including `All`)", categories.len()),
                categories,
            )
        }
        Err(error) => CommandResult::from_error("categories", error),
    }
}
