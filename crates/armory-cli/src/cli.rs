//! Command-line arguments.

use std::path::PathBuf;

use armory_core::{Category, ExportKind, SeasonWindow};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use strum::IntoEnumIterator;

#[derive(Parser)]
#[command(name = "armory")]
#[command(version)]
#[command(about = "Export classified item definitions from the game catalog")]
pub struct Args {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Where the catalog comes from; unset values fall back to the config file
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct SourceArgs {
    /// API key for the catalog service
    #[arg(long, global = true, env = "ARMORY_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Locale of the definition tables
    #[arg(long, global = true, env = "ARMORY_LOCALE")]
    pub locale: Option<String>,

    /// Catalog service base URL
    #[arg(long, global = true, env = "ARMORY_BASE_URL")]
    pub base_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Export classified items, one file per category
    Export {
        /// Categories to export (default: all)
        #[arg(short, long = "category", value_parser = parse_category)]
        categories: Vec<Category>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "tsv")]
        format: ExportFormat,

        /// Directory the files are written to
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// Season window for seasonal mods
        #[arg(long, value_enum, default_value = "up-to-current")]
        window: WindowArg,
    },
    /// Show the current season
    Season,
    /// Show item counts per category
    Summary {
        /// Season window for seasonal mods
        #[arg(long, value_enum, default_value = "up-to-current")]
        window: WindowArg,
    },
    /// Save `--api-key`, `--locale` and `--base-url` to the config file
    Configure,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ExportFormat {
    Tsv,
    Csv,
    Json,
}

impl From<ExportFormat> for ExportKind {
    fn from(format: ExportFormat) -> Self {
        match format {
            ExportFormat::Tsv => ExportKind::Tsv,
            ExportFormat::Csv => ExportKind::Csv,
            ExportFormat::Json => ExportKind::Json,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum WindowArg {
    Exact,
    UpToCurrent,
}

impl From<WindowArg> for SeasonWindow {
    fn from(window: WindowArg) -> Self {
        match window {
            WindowArg::Exact => SeasonWindow::Exact,
            WindowArg::UpToCurrent => SeasonWindow::UpToCurrent,
        }
    }
}

fn parse_category(value: &str) -> Result<Category, String> {
    value.parse().map_err(|_| {
        let known: Vec<&str> = Category::iter().map(|c| c.tag()).collect();
        format!("unknown category '{}' (expected one of: {})", value, known.join(", "))
    })
}
