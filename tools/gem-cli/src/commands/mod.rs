//! CLI command implementations.

pub mod browse;
pub mod config;
pub mod price;
pub mod suggest;
pub mod tags;

use clap::{Args, Subcommand};
use gem_catalog::browse::ViewMode;
use gem_catalog::search::SortField;

/// Where to load the catalog from.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Read stones from a JSON file instead of the API.
    #[arg(short, long)]
    pub file: Option<String>,

    /// Read tags from a JSON file (with --file).
    #[arg(long, requires = "file")]
    pub tags_file: Option<String>,
}

/// Arguments for the browse command.
#[derive(Args, Debug)]
pub struct BrowseArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Case-insensitive SKU substring.
    #[arg(long)]
    pub sku: Option<String>,

    /// Minimum total price.
    #[arg(long, allow_hyphen_values = true)]
    pub min_price: Option<String>,

    /// Maximum total price.
    #[arg(long, allow_hyphen_values = true)]
    pub max_price: Option<String>,

    /// Minimum carat weight.
    #[arg(long, allow_hyphen_values = true)]
    pub min_carat: Option<String>,

    /// Maximum carat weight.
    #[arg(long, allow_hyphen_values = true)]
    pub max_carat: Option<String>,

    /// Exact shape, or "all".
    #[arg(long)]
    pub shape: Option<String>,

    /// Exact treatment, or "all".
    #[arg(long)]
    pub treatment: Option<String>,

    /// Exact category, or "all".
    #[arg(long)]
    pub category: Option<String>,

    /// Sort field, e.g. weightCt or priceTotal.
    #[arg(short, long)]
    pub sort: Option<SortField>,

    /// Sort descending.
    #[arg(long, requires = "sort")]
    pub desc: bool,

    /// Page to show (1-indexed).
    #[arg(short, long, default_value = "1")]
    pub page: usize,

    /// Stones per page (default from config).
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Layout: grid or table (default from config).
    #[arg(long)]
    pub view: Option<ViewMode>,

    /// Show price codes for half the total price.
    #[arg(long)]
    pub halve: bool,
}

/// Arguments for the suggest command.
#[derive(Args, Debug)]
pub struct SuggestArgs {
    /// Partial SKU, at least two characters.
    pub query: String,

    /// Maximum suggestions (default from config).
    #[arg(short, long)]
    pub limit: Option<usize>,

    #[command(flatten)]
    pub source: SourceArgs,
}

/// Arguments for the tags command.
#[derive(Args, Debug)]
pub struct TagsArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

/// Arguments for the price command.
#[derive(Args, Debug)]
pub struct PriceArgs {
    #[command(subcommand)]
    pub command: PriceCommand,
}

#[derive(Subcommand, Debug)]
pub enum PriceCommand {
    /// Decrypt a transport price and print its display code.
    Decrypt {
        /// Base64 ciphertext.
        ciphertext: String,

        /// Encode half the decrypted price.
        #[arg(long)]
        halve: bool,

        /// Also print the decrypted number.
        #[arg(long)]
        reveal: bool,
    },
    /// Encode a plain number as a display code.
    Encode {
        /// Number to encode, e.g. 12000.
        #[arg(allow_hyphen_values = true)]
        number: String,

        /// Encode half the number.
        #[arg(long)]
        halve: bool,
    },
    /// Encrypt a price for transport, e.g. to build test fixtures.
    Seal {
        /// Plain price text.
        plaintext: String,
    },
}

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,

        /// File to create; a .json name writes JSON.
        #[arg(long, default_value = "gems.toml")]
        path: String,
    },
    /// Validate the config file.
    Validate,
}
