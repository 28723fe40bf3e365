//! Suggest command - SKU autocomplete.

use anyhow::Result;
use gem_catalog::search::{suggest, MIN_QUERY_CHARS};
use serde_json::json;

use super::SuggestArgs;
use crate::context::Context;

/// Run the suggest command.
pub async fn run(args: SuggestArgs, ctx: &Context) -> Result<()> {
    let limit = args.limit.unwrap_or(ctx.config.browse.suggest_limit);
    if args.query.trim().chars().count() < MIN_QUERY_CHARS {
        ctx.output.warn(&format!(
            "Type at least {} characters to get suggestions",
            MIN_QUERY_CHARS
        ));
    }

    let snapshot = ctx.load_inventory(&args.source).await?;
    let matches = suggest(&snapshot.stones, &args.query, limit);

    if ctx.output.is_json() {
        let rows: Vec<_> = matches
            .iter()
            .map(|s| json!({ "id": s.id, "sku": s.sku, "shape": s.shape, "weightCt": s.weight_ct }))
            .collect();
        ctx.output.json(&rows);
        return Ok(());
    }

    if matches.is_empty() {
        ctx.output.info(&format!("No SKUs match '{}'", args.query.trim()));
        return Ok(());
    }

    for stone in matches {
        let weight = stone
            .weight_ct
            .map(|w| format!(" {:.2}ct", w))
            .unwrap_or_default();
        ctx.output
            .list_item(&format!("{}  {}{}", stone.sku, stone.shape, weight));
    }

    Ok(())
}
