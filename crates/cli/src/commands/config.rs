use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use storefront_core::config::{resolve_config_path, AppConfig};
use toml::Value;

use crate::commands::{CommandResult, GlobalArgs};

/// Prints the effective values of an already validated config. Load failures
/// never reach this point; they are reported through the JSON error envelope.
pub fn run(globals: &GlobalArgs, config: &AppConfig) -> CommandResult {
    let config_file_path = resolve_config_path(globals.config_path.as_deref());
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());
    let sources = SourceLookup { doc: config_file_doc.as_ref(), path: config_file_path };

    let mut lines =
        vec!["effective config (source precedence: flag > env > file > default):".to_string()];

    let fixture = config
        .catalog
        .fixture_path
        .as_deref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "<builtin demo catalog>".to_string());
    lines.push(render_line(
        "catalog.fixture_path",
        &fixture,
        sources.resolve(
            "catalog.fixture_path",
            globals.fixture.is_some(),
            &["STOREFRONT_CATALOG_FIXTURE_PATH"],
        ),
    ));
    lines.push(render_line(
        "catalog.currency",
        &config.catalog.currency,
        sources.resolve("catalog.currency", false, &["STOREFRONT_CATALOG_CURRENCY"]),
    ));
    lines.push(render_line(
        "catalog.strict_categories",
        &config.catalog.strict_categories.to_string(),
        sources.resolve(
            "catalog.strict_categories",
            globals.strict_categories,
            &["STOREFRONT_CATALOG_STRICT_CATEGORIES"],
        ),
    ));
    lines.push(render_line(
        "logging.level",
        &config.logging.level,
        sources.resolve(
            "logging.level",
            false,
            &["STOREFRONT_LOGGING_LEVEL", "STOREFRONT_LOG_LEVEL"],
        ),
    ));
    lines.push(render_line(
        "logging.format",
        &format!("{:?}", config.logging.format),
        sources.resolve(
            "logging.format",
            false,
            &["STOREFRONT_LOGGING_FORMAT", "STOREFRONT_LOG_FORMAT"],
        ),
    ));

    CommandResult::raw(lines.join("\n"))
}

struct SourceLookup<'a> {
    doc: Option<&'a Value>,
    path: Option<PathBuf>,
}

impl SourceLookup<'_> {
    fn resolve(&self, key_path: &str, from_flag: bool, env_keys: &[&str]) -> String {
        if from_flag {
            return "flag".to_string();
        }

        if let Some(env_key) =
            env_keys.iter().find(|key| env::var(key).is_ok_and(|value| !value.trim().is_empty()))
        {
            return format!("env ({env_key})");
        }

        if let Some(doc) = self.doc {
            if contains_path(doc, key_path) {
                let file_path = self
                    .path
                    .as_ref()
                    .map(|path| path.display().to_string())
                    .unwrap_or_else(|| "config file".to_string());
                return format!("file ({file_path})");
            }
        }

        "default".to_string()
    }
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}
