use clap::Parser;
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/pfm.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Labels offered by the category selector, in display order.
    pub categories: Vec<String>,
    /// JSON file with the initial transactions. The built-in sample is used
    /// when unset or missing.
    pub seed_path: Option<String>,
    pub log_file: String,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            categories: pfm_engine::DEFAULT_CATEGORIES
                .iter()
                .map(|category| category.to_string())
                .collect(),
            seed_path: None,
            log_file: "pfm.log".to_string(),
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "pfm", about = "Personal finance transactions in the terminal")]
pub struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// JSON file with the initial transactions.
    #[arg(long)]
    seed: Option<String>,
    /// Category offered by the selector; repeat to build the list.
    #[arg(long = "category")]
    categories: Vec<String>,
    /// Where log lines go (the terminal is busy drawing the UI).
    #[arg(long)]
    log_file: Option<String>,
    /// Log level for the pfm crates (error, warn, info, debug, trace).
    #[arg(long)]
    log_level: Option<String>,
}

pub fn load() -> Result<AppConfig> {
    load_from(Args::parse())
}

fn load_from(args: Args) -> Result<AppConfig> {
    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(
        config::Environment::with_prefix("PFM")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("categories"),
    );
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(seed) = args.seed {
        settings.seed_path = Some(seed);
    }
    if !args.categories.is_empty() {
        settings.categories = args.categories;
    }
    if let Some(log_file) = args.log_file {
        settings.log_file = log_file;
    }
    if let Some(log_level) = args.log_level {
        settings.log_level = log_level;
    }

    Ok(settings)
}
