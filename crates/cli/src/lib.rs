pub mod commands;
pub mod logging;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use storefront_core::config::AppConfig;

use crate::commands::GlobalArgs;

#[derive(Debug, Parser)]
#[command(
    name = "storefront",
    about = "Storefront catalog and cart CLI",
    long_about = "Browse the product catalog by category and drive an in-memory shopping cart.",
    after_help = "Examples:\n  storefront categories\n  storefront products --category Books\n  storefront session --action add:1 --action add:1 --action remove:1\n  storefront render --action select:Clothing --action add:2"
)]
pub struct Cli {
    #[command(flatten)]
    global: GlobalOpts,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct GlobalOpts {
    #[arg(long, global = true, help = "Config file to load (must exist when given)")]
    config: Option<PathBuf>,
    #[arg(long, global = true, help = "Product fixture file (.toml or .json)")]
    fixture: Option<PathBuf>,
    #[arg(long, global = true, help = "Reject categories no product carries")]
    strict_categories: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "List categories, starting with the `All` sentinel")]
    Categories,
    #[command(about = "List products, optionally filtered by category")]
    Products {
        #[arg(long, help = "Category to filter by (`All` shows everything)")]
        category: Option<String>,
    },
    #[command(about = "Apply actions to a fresh session and print the resulting state")]
    Session {
        #[arg(
            long = "action",
            value_name = "ACTION",
            help = "select:<category>, add:<id>, or remove:<id>; repeatable, applied in order"
        )]
        actions: Vec<String>,
    },
    #[command(about = "Apply actions and print the storefront as static HTML")]
    Render {
        #[arg(long = "action", value_name = "ACTION")]
        actions: Vec<String>,
    },
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Self::Categories => "categories",
            Self::Products { .. } => "products",
            Self::Session { .. } => "session",
            Self::Render { .. } => "render",
            Self::Config => "config",
        }
    }
}

/// Parses arguments, loads config once, and runs the selected command.
/// Only logging setup failures escape as errors; command failures are
/// printed as JSON envelopes and reflected in the exit code.
pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let globals = GlobalArgs {
        config_path: cli.global.config,
        fixture: cli.global.fixture,
        strict_categories: cli.global.strict_categories,
    };

    let config = commands::load_config(&globals);
    let logging_config = match &config {
        Ok(config) => config.logging.clone(),
        Err(_) => AppConfig::default().logging,
    };
    logging::init(&logging_config)?;

    let command = cli.command;
    let result = commands::with_config(command.name(), &config, |config| match command {
        Command::Categories => commands::categories::run(config),
        Command::Products { category } => commands::products::run(config, category.as_deref()),
        Command::Session { actions } => commands::session::run(config, &actions),
        Command::Render { actions } => commands::render::run(config, &actions),
        Command::Config => commands::config::run(&globals, config),
    });

    println!("{}", result.output);
    Ok(ExitCode::from(result.exit_code))
}
