pub mod categories;
pub mod config;
pub mod products;
pub mod render;
pub mod session;

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use storefront_core::config::{AppConfig, ConfigOverrides, LoadOptions};
use storefront_core::fixtures::load_catalog;
use storefront_core::{ApplicationError, DomainError, StoreAction, StoreSession};
use tracing::{info, warn};
use uuid::Uuid;

pub const EXIT_INTERNAL: u8 = 1;
pub const EXIT_CONFIG: u8 = 2;
pub const EXIT_FIXTURE: u8 = 3;
pub const EXIT_ACTION: u8 = 4;
pub const EXIT_RENDER: u8 = 5;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    correlation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

impl CommandResult {
    pub fn success(command: &str, message: impl Into<String>, data: impl Serialize) -> Self {
        let data = match serde_json::to_value(data) {
            Ok(data) => data,
            Err(error) => {
                return Self::failure(command, "serialization", error.to_string(), EXIT_INTERNAL);
            }
        };
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
            user_message: None,
            correlation_id: None,
            data: Some(data),
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    /// Maps an application failure onto the JSON error envelope. Every failure
    /// gets a fresh correlation id that is also written to the log.
    pub fn from_error(command: &str, error: ApplicationError) -> Self {
        let (error_class, exit_code) = classify(&error);
        let interface = error.into_interface(Uuid::new_v4().simple().to_string());

        warn!(
            event_name = "storefront.command.failed",
            command,
            error_class,
            correlation_id = interface.correlation_id(),
            error = interface.message(),
            "command failed"
        );

        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: interface.message().to_string(),
            user_message: Some(interface.user_message().to_string()),
            correlation_id: Some(interface.correlation_id().to_string()),
            data: None,
        };
        Self { exit_code, output: serialize_payload(payload) }
    }

    pub fn raw(output: String) -> Self {
        Self { exit_code: 0, output }
    }

    fn failure(command: &str, error_class: &str, message: String, exit_code: u8) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message,
            user_message: None,
            correlation_id: None,
            data: None,
        };
        Self { exit_code, output: serialize_payload(payload) }
    }
}

/// Error class and process exit code for each application failure.
fn classify(error: &ApplicationError) -> (&'static str, u8) {
    match error {
        ApplicationError::Configuration(_) => ("config_validation", EXIT_CONFIG),
        ApplicationError::Fixture(_) => ("fixture_load", EXIT_FIXTURE),
        ApplicationError::Render(_) => ("render", EXIT_RENDER),
        ApplicationError::Action { source: DomainError::InvalidAction(_), .. } => {
            ("invalid_action", EXIT_ACTION)
        }
        ApplicationError::Action { .. } | ApplicationError::Domain(_) => {
            ("action_rejected", EXIT_ACTION)
        }
    }
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}

/// Options shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct GlobalArgs {
    pub config_path: Option<PathBuf>,
    pub fixture: Option<PathBuf>,
    pub strict_categories: bool,
}

impl GlobalArgs {
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            config_path: self.config_path.clone(),
            require_file: self.config_path.is_some(),
            overrides: ConfigOverrides {
                fixture_path: self.fixture.clone(),
                strict_categories: self.strict_categories.then_some(true),
                ..ConfigOverrides::default()
            },
        }
    }
}

pub fn load_config(globals: &GlobalArgs) -> Result<AppConfig, ApplicationError> {
    Ok(AppConfig::load(globals.load_options())?)
}

/// Runs `run` against a loaded config, or reports the load failure as the
/// command's result.
pub fn with_config(
    command: &str,
    config: &Result<AppConfig, ApplicationError>,
    run: impl FnOnce(&AppConfig) -> CommandResult,
) -> CommandResult {
    match config {
        Ok(config) => run(config),
        Err(error) => CommandResult::from_error(command, error.clone()),
    }
}

pub fn open_session(config: &AppConfig) -> Result<StoreSession, ApplicationError> {
    let catalog = load_catalog(config.catalog.fixture_path.as_deref())?;

    info!(
        event_name = "storefront.session.opened",
        products = catalog.len(),
        fixture = %config
            .catalog
            .fixture_path
            .as_deref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "builtin".to_string()),
        "storefront session opened"
    );

    Ok(StoreSession::new(Arc::new(catalog), config.session_options()))
}

/// Applies `actions` in order, stopping at the first one that is rejected.
pub fn apply_actions(session: &mut StoreSession, actions: &[String]) -> Result<(), ApplicationError> {
    for (index, raw) in actions.iter().enumerate() {
        raw.parse::<StoreAction>()
            .and_then(|action| session.apply(action))
            .map_err(|source| ApplicationError::Action {
                position: index + 1,
                action: raw.clone(),
                source,
            })?;
    }
    Ok(())
}
