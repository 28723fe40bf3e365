//! CLI configuration.

use std::path::Path;

use anyhow::{Context, Result};
use gem_catalog::browse::ViewMode;
use gem_catalog::search::{DEFAULT_PAGE_SIZE, DEFAULT_SUGGEST_LIMIT};
use gem_data::CatalogConfig;
use serde::{Deserialize, Serialize};

/// Config file names searched for, in order.
pub const CONFIG_NAMES: [&str; 3] = ["gems.toml", ".gems.toml", "gems.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GemConfig {
    /// Catalog endpoint.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Browse defaults.
    #[serde(default)]
    pub browse: BrowseConfig,

    /// Price display.
    #[serde(default)]
    pub pricing: PricingConfig,
}

impl GemConfig {
    /// Load config from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Copy safe to print: a set API token becomes `(set)`.
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        if config.catalog.api_token.is_some() {
            config.catalog.api_token = Some(REDACTED.to_string());
        }
        config
    }
}

/// Stand-in for secrets in printed configuration.
pub const REDACTED: &str = "(set)";

fn is_json(path: &Path) -> bool {
    path.extension().map_or(false, |e| e == "json")
}

/// Browse defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrowseConfig {
    /// Stones per page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Maximum suggestions.
    #[serde(default = "default_suggest_limit")]
    pub suggest_limit: usize,

    /// Default layout.
    #[serde(default)]
    pub view: ViewMode,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_suggest_limit() -> usize {
    DEFAULT_SUGGEST_LIMIT
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            suggest_limit: default_suggest_limit(),
            view: ViewMode::default(),
        }
    }
}

/// Price display configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Glyph table file, relative to the config file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_path: Option<String>,

    /// Environment variable holding the decryption secret.
    #[serde(default = "default_secret_env")]
    pub secret_env: String,
}

fn default_secret_env() -> String {
    "GEMS_PRICE_SECRET".to_string()
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            table_path: None,
            secret_env: default_secret_env(),
        }
    }
}

/// Generate a default gems.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Gem catalog browser configuration

[catalog]
base_url = "https://api.example.com"
stones_path = "/stones"
tags_path = "/tags"
timeout_secs = 15
tags_timeout_secs = 5
max_retries = 1
# api_token = ""

[browse]
page_size = {page_size}
suggest_limit = {suggest_limit}
view = "grid"

[pricing]
# Glyph table with keys "0".."9", "00" and "000".
# table_path = "cipher-table.toml"
secret_env = "GEMS_PRICE_SECRET"
"#,
        page_size = DEFAULT_PAGE_SIZE,
        suggest_limit = DEFAULT_SUGGEST_LIMIT,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config: GemConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.catalog.base_url, "https://api.example.com");
        assert_eq!(config.browse.page_size, 50);
        assert_eq!(config.browse.suggest_limit, 8);
        assert_eq!(config.pricing.secret_env, "GEMS_PRICE_SECRET");
        assert_eq!(config.pricing.table_path, None);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: GemConfig = toml::from_str("").unwrap();
        assert_eq!(config, GemConfig::default());
    }

    #[test]
    fn test_save_and_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gems.json");
        let mut config = GemConfig::default();
        config.browse.view = ViewMode::Table;
        config.pricing.table_path = Some("table.toml".into());
        config.save(&path).unwrap();
        assert_eq!(GemConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_redacted_hides_token() {
        let mut config = GemConfig::default();
        config.catalog.api_token = Some("super-secret-token".into());

        let json = serde_json::to_string_pretty(&config.redacted()).unwrap();
        assert!(!json.contains("super-secret-token"));
        assert!(json.contains(REDACTED));
        assert_eq!(config.catalog.token(), Some("super-secret-token"));

        assert_eq!(GemConfig::default().redacted(), GemConfig::default());
    }

    #[test]
    fn test_save_and_load_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gems.toml");
        let mut config = GemConfig::default();
        config.catalog.max_retries = 4;
        config.save(&path).unwrap();
        assert_eq!(GemConfig::load(&path).unwrap(), config);
    }
}
