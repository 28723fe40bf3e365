//! Tags command - list catalog tags.

use anyhow::Result;

use super::TagsArgs;
use crate::context::Context;

/// Run the tags command.
pub async fn run(args: TagsArgs, ctx: &Context) -> Result<()> {
    let snapshot = ctx.load_inventory(&args.source).await?;

    if ctx.output.is_json() {
        ctx.output.json(&snapshot.tags[..]);
        return Ok(());
    }

    if snapshot.tags.is_empty() {
        ctx.output.info("No tags.");
        return Ok(());
    }

    ctx.output.table_header(&["ID", "Name", "Stones"], &[8, 24, 8]);
    for tag in snapshot.tags.iter() {
        let count = tag
            .stone_count
            .map(|c| c.to_string())
            .unwrap_or_else(|| "-".to_string());
        ctx.output
            .table_row(&[tag.id.as_str(), tag.name.as_str(), count.as_str()], &[8, 24, 8]);
    }

    Ok(())
}
