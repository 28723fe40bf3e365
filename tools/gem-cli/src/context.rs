//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _, Result};
use gem_catalog::inventory::{CatalogSnapshot, Inventory, LoadState};
use gem_data::{refresh, CatalogSource, FileCatalogSource, HttpCatalogSource};
use gem_pricing::{PriceCipherTable, PriceCodec};
use tokio::sync::Mutex;

use crate::commands::SourceArgs;
use crate::config::{GemConfig, CONFIG_NAMES};
use crate::output::{state_badge, Output};

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: GemConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// The file the configuration came from, if any.
    pub config_path: Option<PathBuf>,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            let path = resolve(&cwd, path);
            (GemConfig::load(&path)?, Some(path))
        } else {
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd) {
                Some((path, config)) => (config, Some(path)),
                None => (GemConfig::default(), None),
            }
        };

        if let Some(path) = &config_path {
            output.debug(&format!("Using config: {}", path.display()));
        }

        Ok(Self {
            config,
            output,
            cwd,
            config_path,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(PathBuf, GemConfig)> {
        let mut current = start.to_path_buf();
        loop {
            for name in CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    match GemConfig::load(&config_path) {
                        Ok(config) => return Some((config_path, config)),
                        Err(e) => tracing::warn!(path = %config_path.display(), error = %e, "skipping unreadable config"),
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        resolve(&self.cwd, path)
    }

    /// Resolve a path named in the config file, relative to that file.
    fn resolve_config_relative(&self, path: &str) -> PathBuf {
        let base = self
            .config_path
            .as_deref()
            .and_then(Path::parent)
            .unwrap_or(&self.cwd);
        resolve(base, path)
    }

    /// Where stones come from: local files when given, otherwise the API.
    pub fn catalog_source(&self, args: &SourceArgs) -> Result<Box<dyn CatalogSource>> {
        if let Some(file) = &args.file {
            let mut source = FileCatalogSource::new(self.resolve_path(file));
            if let Some(tags) = &args.tags_file {
                source = source.with_tags(self.resolve_path(tags));
            }
            return Ok(Box::new(source));
        }

        let source = HttpCatalogSource::from_config(&self.config.catalog)
            .context("Invalid catalog configuration")?;
        Ok(Box::new(source))
    }

    /// Load the glyph table named by `pricing.table_path`.
    pub fn price_table(&self) -> Result<Option<PriceCipherTable>> {
        let Some(table_path) = &self.config.pricing.table_path else {
            return Ok(None);
        };
        let path = self.resolve_config_relative(table_path);
        let table = PriceCipherTable::load(&path)
            .with_context(|| format!("Failed to load price table: {}", path.display()))?;
        Ok(Some(table))
    }

    /// Price codec with the configured table and secret, if a table is set.
    pub fn price_codec(&self) -> Result<Option<PriceCodec>> {
        Ok(self
            .price_table()?
            .map(|table| PriceCodec::from_env(&self.config.pricing.secret_env, table)))
    }

    /// Like [`Context::price_codec`], but a table is required.
    pub fn require_price_codec(&self) -> Result<PriceCodec> {
        match self.price_codec()? {
            Some(codec) => Ok(codec),
            None => bail!("No price table configured. Set pricing.table_path in gems.toml."),
        }
    }

    /// Fetch the catalog once and return the loaded snapshot.
    pub async fn load_inventory(&self, args: &SourceArgs) -> Result<CatalogSnapshot> {
        let source = self.catalog_source(args)?;
        let inventory = Mutex::new(Inventory::new());

        let spinner = self
            .output
            .spinner(&format!("Loading catalog from {}...", source.describe()));
        refresh(&inventory, source.as_ref()).await;
        spinner.finish_and_clear();

        let inventory = inventory.into_inner();
        let state = inventory.state();
        self.output
            .debug(&format!("Catalog state: {}", state_badge(state.as_str())));

        match (state, inventory.snapshot()) {
            (LoadState::Failed(message), _) => bail!("Failed to load catalog: {}", message),
            (_, Some(snapshot)) => {
                if snapshot.is_empty() {
                    self.output.info("The catalog has no stones.");
                }
                Ok(snapshot.clone())
            }
            (_, None) => bail!("Catalog did not load"),
        }
    }
}

fn resolve(base: &Path, path: &str) -> PathBuf {
    if Path::new(path).is_absolute() {
        PathBuf::from(path)
    } else {
        base.join(path)
    }
}
