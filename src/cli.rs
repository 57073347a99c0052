//! Command-line interface parsing for the storefront
//!
//! This module handles parsing of CLI arguments using clap and turns them into
//! the startup configuration consumed by the app, the loader and the store.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use thiserror::Error;

use crate::data::DEFAULT_CATALOG_URL;
use crate::filter::{CategoryFilter, ProductQuery, SortOrder};
use crate::store::LocalStore;

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The specified sort direction is not recognized
    #[error("Invalid sort order: '{0}'. Valid orders: asc, desc")]
    InvalidSort(String),

    /// No data directory was given and none could be determined
    #[error("Could not determine a data directory; pass --data-dir")]
    NoDataDir,
}

/// Shopfront - browse a product catalog and manage a local shopping cart
#[derive(Parser, Debug)]
#[command(name = "shopfront")]
#[command(about = "Terminal storefront with a persistent shopping cart")]
#[command(version)]
pub struct Cli {
    /// Catalog endpoint returning a JSON array of products
    #[arg(long, value_name = "URL", default_value = DEFAULT_CATALOG_URL)]
    pub api_url: String,

    /// Directory for the stored cart and the log file
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Initial category filter ("all" shows every product)
    #[arg(long, value_name = "NAME")]
    pub category: Option<String>,

    /// Initial price sort: asc or desc
    #[arg(long, value_name = "ORDER")]
    pub sort: Option<String>,

    /// Give up on the catalog request after this many seconds (default: wait forever)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Hide the cart item counter in the header
    #[arg(long)]
    pub no_badge: bool,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone)]
pub struct StartupConfig {
    /// Catalog endpoint
    pub api_url: String,
    /// Explicit data directory, if given
    pub data_dir: Option<PathBuf>,
    /// Initial category filter and sort direction
    pub query: ProductQuery,
    /// Request timeout for the catalog fetch
    pub timeout: Option<Duration>,
    /// Whether the cart counter badge is shown
    pub show_badge: bool,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_CATALOG_URL.to_string(),
            data_dir: None,
            query: ProductQuery::default(),
            timeout: None,
            show_badge: true,
        }
    }
}

/// Parses a sort argument into a SortOrder.
///
/// Typos are rejected instead of silently falling back to descending.
pub fn parse_sort_arg(s: &str) -> Result<SortOrder, CliError> {
    match s.to_ascii_lowercase().as_str() {
        "asc" | "ascending" => Ok(SortOrder::Ascending),
        "desc" | "descending" => Ok(SortOrder::Descending),
        _ => Err(CliError::InvalidSort(s.to_string())),
    }
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with appropriate settings
    /// * `Err(CliError)` if an invalid sort order was specified
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let sort = cli.sort.as_deref().map(parse_sort_arg).transpose()?;
        let category = cli
            .category
            .as_deref()
            .map(CategoryFilter::from_arg)
            .unwrap_or_default();

        Ok(StartupConfig {
            api_url: cli.api_url.clone(),
            data_dir: cli.data_dir.clone(),
            query: ProductQuery::new(category, sort),
            timeout: cli.timeout.map(Duration::from_secs),
            show_badge: !cli.no_badge,
        })
    }

    /// Opens the store in the configured directory, or the default data directory
    pub fn store(&self) -> Result<LocalStore, CliError> {
        match &self.data_dir {
            Some(dir) => Ok(LocalStore::with_dir(dir.clone())),
            None => LocalStore::new().ok_or(CliError::NoDataDir),
        }
    }
}
