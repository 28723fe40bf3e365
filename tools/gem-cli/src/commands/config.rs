//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};
use dialoguer::Confirm;

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, GemConfig, REDACTED};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force, path } => init_config(force, &path, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config.redacted());
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let catalog = &ctx.config.catalog;
    ctx.output.info("[catalog]");
    ctx.output.kv("base_url", &catalog.base_url);
    ctx.output.kv("stones_path", &catalog.stones_path);
    ctx.output.kv("tags_path", &catalog.tags_path);
    ctx.output.kv("timeout_secs", &catalog.timeout_secs.to_string());
    ctx.output
        .kv("tags_timeout_secs", &catalog.tags_timeout_secs.to_string());
    ctx.output.kv("max_retries", &catalog.max_retries.to_string());
    if catalog.token().is_some() {
        ctx.output.kv("api_token", REDACTED);
    }

    let browse = &ctx.config.browse;
    ctx.output.info("[browse]");
    ctx.output.kv("page_size", &browse.page_size.to_string());
    ctx.output.kv("suggest_limit", &browse.suggest_limit.to_string());
    ctx.output.kv("view", browse.view.as_str());

    let pricing = &ctx.config.pricing;
    ctx.output.info("[pricing]");
    if let Some(table) = &pricing.table_path {
        ctx.output.kv("table_path", table);
    }
    ctx.output.kv("secret_env", &pricing.secret_env);

    Ok(())
}

fn init_config(force: bool, path: &str, ctx: &Context) -> Result<()> {
    let config_path = ctx.resolve_path(path);

    if config_path.exists() && !force {
        let overwrite = !ctx.output.is_json()
            && Confirm::new()
                .with_prompt(format!("{} exists. Overwrite?", config_path.display()))
                .default(false)
                .interact()?;
        if !overwrite {
            bail!(
                "Config file already exists: {}. Use --force to overwrite.",
                config_path.display()
            );
        }
    }

    if config_path.extension().is_some_and(|e| e == "json") {
        GemConfig::default().save(&config_path)?;
    } else {
        fs::write(&config_path, generate_default_config())?;
    }

    ctx.output
        .success(&format!("Created: {}", config_path.display()));
    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let (errors, warnings) = check(ctx);

    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");
    Ok(())
}

/// Collect configuration errors and warnings.
fn check(ctx: &Context) -> (Vec<String>, Vec<String>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let config = &ctx.config;

    if let Err(e) = config.catalog.validate() {
        errors.push(format!("catalog.base_url: {}", e));
    }
    for (key, path) in [
        ("catalog.stones_path", &config.catalog.stones_path),
        ("catalog.tags_path", &config.catalog.tags_path),
    ] {
        if !path.starts_with('/') {
            errors.push(format!("{} must start with '/'", key));
        }
    }
    if config.catalog.timeout_secs == 0 {
        errors.push("catalog.timeout_secs must be greater than 0".to_string());
    }

    if config.browse.page_size == 0 {
        errors.push("browse.page_size must be greater than 0".to_string());
    }
    if config.browse.suggest_limit == 0 {
        warnings.push("browse.suggest_limit is 0; suggest will never return anything".to_string());
    }

    match ctx.price_table() {
        Ok(Some(_)) => {}
        Ok(None) => warnings.push("pricing.table_path is not set; price codes are hidden".to_string()),
        Err(e) => errors.push(format!("{:#}", e)),
    }
    if std::env::var(&config.pricing.secret_env).map_or(true, |s| s.is_empty()) {
        warnings.push(format!(
            "{} is not set; prices will show as N/A",
            config.pricing.secret_env
        ));
    }

    (errors, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::Output;

    fn ctx(config: GemConfig) -> Context {
        Context {
            config,
            output: Output::new(false, true),
            cwd: std::env::temp_dir(),
            config_path: None,
        }
    }

    #[test]
    fn test_check_flags_bad_values() {
        let mut config = GemConfig::default();
        config.catalog.base_url = "ftp://example.com".into();
        config.catalog.tags_path = "tags".into();
        config.browse.page_size = 0;
        config.pricing.table_path = Some("/definitely/not/here.toml".into());

        let (errors, _) = check(&ctx(config));
        assert_eq!(errors.len(), 4);
        assert!(errors.iter().any(|e| e.contains("catalog.tags_path")));
        assert!(errors.iter().any(|e| e.contains("browse.page_size")));
    }

    #[test]
    fn test_check_defaults_only_warn() {
        let (errors, warnings) = check(&ctx(GemConfig::default()));
        assert!(errors.is_empty());
        assert!(warnings.iter().any(|w| w.contains("pricing.table_path")));
    }

    #[test]
    fn test_init_writes_json_with_force() {
        let dir = tempfile::tempdir().unwrap();
        let mut context = ctx(GemConfig::default());
        context.cwd = dir.path().to_path_buf();

        init_config(false, "gems.json", &context).unwrap();
        assert_eq!(GemConfig::load(dir.path().join("gems.json")).unwrap(), GemConfig::default());

        assert!(init_config(false, "gems.json", &context).is_err());
        init_config(true, "gems.json", &context).unwrap();
    }

    #[test]
    fn test_show_json_keeps_token_out() {
        let mut config = GemConfig::default();
        config.catalog.api_token = Some("super-secret-token".into());
        let context = ctx(config);

        show_config(&context).unwrap();
        let json = serde_json::to_string(&context.config.redacted()).unwrap();
        assert!(!json.contains("super-secret-token"));
    }

    #[test]
    fn test_init_writes_template() {
        let dir = tempfile::tempdir().unwrap();
        let mut context = ctx(GemConfig::default());
        context.cwd = dir.path().to_path_buf();

        init_config(false, "gems.toml", &context).unwrap();
        let written = fs::read_to_string(dir.path().join("gems.toml")).unwrap();
        assert_eq!(written, generate_default_config());
    }
}
