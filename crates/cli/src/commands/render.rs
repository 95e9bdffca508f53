use storefront_core::config::AppConfig;
use storefront_core::{ApplicationError, StorefrontRenderer};

use crate::commands::{apply_actions, open_session, CommandResult};

/// Prints HTML markup on success; failures keep the JSON error envelope.
pub fn run(config: &AppConfig, actions: &[String]) -> CommandResult {
    match render_html(config, actions) {
        Ok(html) => CommandResult::raw(html),
        Err(error) => CommandResult::from_error("render", error),
    }
}

fn render_html(config: &AppConfig, actions: &[String]) -> Result<String, ApplicationError> {
    let mut session = open_session(config)?;
    apply_actions(&mut session, actions)?;
    let snapshot = session.snapshot()?;
    StorefrontRenderer::new()?.render(&snapshot)
}
