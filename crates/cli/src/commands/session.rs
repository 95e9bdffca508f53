use storefront_core::config::AppConfig;
use storefront_core::{format_money, ApplicationError, StorefrontSnapshot};

use crate::commands::{apply_actions, open_session, CommandResult};

pub fn run(config: &AppConfig, actions: &[String]) -> CommandResult {
    match drive(config, actions) {
        Ok(snapshot) => {
            let message = if snapshot.cart.is_empty() {
                "cart is empty".to_string()
            } else {
                format!(
                    "{} item(s) in cart, total {} {}",
                    snapshot.item_count,
                    format_money(snapshot.total),
                    snapshot.currency
                )
            };
            CommandResult::success("session", message, snapshot)
        }
        Err(error) => CommandResult::from_error("session", error),
    }
}

fn drive(config: &AppConfig, actions: &[String]) -> Result<StorefrontSnapshot, ApplicationError> {
    let mut session = open_session(config)?;
    apply_actions(&mut session, actions)?;
    session.snapshot().map_err(ApplicationError::from)
}
