//! Gems CLI - Command line browser for the gem catalog.
//!
//! Commands:
//! - `gems browse` - Filter, sort and page through stones
//! - `gems suggest` - SKU autocomplete
//! - `gems tags` - List catalog tags
//! - `gems price` - Decrypt, encode and seal prices
//! - `gems config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use commands::{BrowseArgs, ConfigArgs, PriceArgs, SuggestArgs, TagsArgs};

/// Gems CLI - Browse the gemstone inventory
#[derive(Parser)]
#[command(name = "gems")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter, sort and page through stones
    Browse(BrowseArgs),

    /// Suggest stones by partial SKU
    Suggest(SuggestArgs),

    /// List catalog tags
    Tags(TagsArgs),

    /// Price codec tools
    Price(PriceArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

/// Log to stderr, filtered by `RUST_LOG` or the verbosity flag.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;

    // Execute command
    let result = match cli.command {
        Commands::Browse(args) => commands::browse::run(args, &ctx).await,
        Commands::Suggest(args) => commands::suggest::run(args, &ctx).await,
        Commands::Tags(args) => commands::tags::run(args, &ctx).await,
        Commands::Price(args) => commands::price::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_browse() {
        let cli = Cli::try_parse_from([
            "gems", "--json", "browse", "--file", "stones.json", "--sort", "weightCt", "--desc",
            "--view", "table", "--min-carat", "1.5",
        ])
        .unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Browse(args) => {
                assert_eq!(args.source.file.as_deref(), Some("stones.json"));
                assert_eq!(args.sort, Some(gem_catalog::search::SortField::WeightCt));
                assert!(args.desc);
                assert_eq!(args.view, Some(gem_catalog::browse::ViewMode::Table));
                assert_eq!(args.min_carat.as_deref(), Some("1.5"));
            }
            _ => panic!("expected browse"),
        }
    }

    #[test]
    fn test_rejects_unknown_sort_field() {
        assert!(Cli::try_parse_from(["gems", "browse", "--sort", "rating"]).is_err());
    }

    #[test]
    fn test_desc_requires_sort() {
        assert!(Cli::try_parse_from(["gems", "browse", "--desc"]).is_err());
    }
}
