//! Browse command - filter, sort and page through stones.

use anyhow::{Context as _, Result};
use gem_catalog::browse::{BrowseState, ResultCache, ResultSet, ViewMode};
use gem_catalog::ids::StoneId;
use gem_catalog::search::{FilterCriteria, Pagination, SortDirection, SortSpec};
use gem_catalog::stone::Stone;
use gem_pricing::{PriceCodec, PriceTransform};
use serde::Serialize;

use super::BrowseArgs;
use crate::context::Context;
use crate::output::truncate;

const TABLE_WIDTHS: [usize; 6] = [12, 10, 8, 14, 8, 10];

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BrowseReport<'a> {
    state: &'a BrowseState,
    total_matches: usize,
    pagination: &'a Pagination,
    stones: Vec<StoneRow<'a>>,
}

impl<'a> BrowseReport<'a> {
    fn new(
        state: &'a BrowseState,
        result: &'a ResultSet,
        codec: Option<&PriceCodec>,
        transform: PriceTransform,
    ) -> Self {
        Self {
            state,
            total_matches: result.total_matches,
            pagination: &result.page.pagination,
            stones: result
                .stones()
                .iter()
                .map(|stone| StoneRow::new(stone, codec, transform))
                .collect(),
        }
    }
}

/// A stone as printed by `--json`: prices appear only as display codes.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StoneRow<'a> {
    id: &'a StoneId,
    sku: &'a str,
    shape: &'a str,
    weight_ct: Option<f64>,
    measurements: &'a str,
    price_code: String,
    lab: &'a str,
    origin: &'a str,
    ratio: Option<f64>,
    color: &'a str,
    clarity: &'a str,
    luster: &'a str,
    fluorescence: &'a str,
    certificate_number: &'a str,
    treatment: &'a str,
    category: &'a str,
    image_url: Option<&'a str>,
    video_url: Option<&'a str>,
    certificate_url: Option<&'a str>,
}

impl<'a> StoneRow<'a> {
    fn new(stone: &'a Stone, codec: Option<&PriceCodec>, transform: PriceTransform) -> Self {
        Self {
            id: &stone.id,
            sku: &stone.sku,
            shape: &stone.shape,
            weight_ct: stone.weight_ct,
            measurements: &stone.measurements,
            price_code: price_code(stone, codec, transform),
            lab: &stone.lab,
            origin: &stone.origin,
            ratio: stone.ratio,
            color: &stone.color,
            clarity: &stone.clarity,
            luster: &stone.luster,
            fluorescence: &stone.fluorescence,
            certificate_number: &stone.certificate_number,
            treatment: &stone.treatment,
            category: &stone.category,
            image_url: stone.image_url.as_deref(),
            video_url: stone.video_url.as_deref(),
            certificate_url: stone.certificate_url.as_deref(),
        }
    }
}

/// Run the browse command.
pub async fn run(args: BrowseArgs, ctx: &Context) -> Result<()> {
    let mut state = build_state(&args, ctx)?;
    let codec = ctx.price_codec()?;
    let transform = if args.halve {
        PriceTransform::Halve
    } else {
        PriceTransform::Identity
    };

    let snapshot = ctx.load_inventory(&args.source).await?;

    let mut cache = ResultCache::new();
    let mut result = cache.for_state(&snapshot.stones, &state);
    if state.page_index > result.total_pages() {
        ctx.output.warn(&format!(
            "Page {} is past the end; showing page {}",
            state.page_index,
            result.total_pages()
        ));
        state.clamp_page(result.total_pages());
        result = cache.for_state(&snapshot.stones, &state);
    }

    if ctx.output.is_json() {
        ctx.output
            .json(&BrowseReport::new(&state, &result, codec.as_ref(), transform));
        return Ok(());
    }

    ctx.output.header(&format!(
        "{} of {} stones{}",
        result.total_matches,
        snapshot.len(),
        state
            .sort
            .map(|s| format!(", sorted by {}", s.display_name()))
            .unwrap_or_default()
    ));

    if result.is_empty() {
        ctx.output.info("No stones match these filters.");
        return Ok(());
    }

    if codec.is_none() {
        ctx.output
            .debug("No price table configured; price codes are hidden");
    }

    match state.view_mode {
        ViewMode::Table => print_table(result.stones(), codec.as_ref(), transform, ctx),
        ViewMode::Grid => print_grid(result.stones(), codec.as_ref(), transform, ctx),
    }

    print_pager(&result, ctx);
    Ok(())
}

/// Turn command line arguments into a browse state.
fn build_state(args: &BrowseArgs, ctx: &Context) -> Result<BrowseState> {
    let mut criteria = FilterCriteria::new()
        .with_price(
            bound("minPrice", &args.min_price)?,
            bound("maxPrice", &args.max_price)?,
        )
        .with_carat(
            bound("minCarat", &args.min_carat)?,
            bound("maxCarat", &args.max_carat)?,
        );
    if let Some(sku) = &args.sku {
        criteria = criteria.with_sku(sku.as_str());
    }
    if let Some(shape) = &args.shape {
        criteria = criteria.with_shape(shape.as_str());
    }
    if let Some(treatment) = &args.treatment {
        criteria = criteria.with_treatment(treatment.as_str());
    }
    if let Some(category) = &args.category {
        criteria = criteria.with_category(category.as_str());
    }

    let mut state = BrowseState::new()
        .with_page_size(args.page_size.unwrap_or(ctx.config.browse.page_size))
        .with_view_mode(args.view.unwrap_or(ctx.config.browse.view));
    state.set_criteria(criteria);
    if let Some(field) = args.sort {
        let direction = if args.desc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        state.set_sort(Some(SortSpec::new(field, direction)));
    }
    state.page_index = args.page.max(1);

    Ok(state)
}

fn bound(field: &str, raw: &Option<String>) -> Result<Option<f64>> {
    match raw {
        Some(raw) => FilterCriteria::parse_bound(field, raw)
            .with_context(|| format!("Invalid --{}", kebab(field))),
        None => Ok(None),
    }
}

fn kebab(field: &str) -> String {
    let mut out = String::with_capacity(field.len() + 1);
    for c in field.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

fn price_code(stone: &Stone, codec: Option<&PriceCodec>, transform: PriceTransform) -> String {
    match codec {
        Some(codec) => codec.display_number(stone.price_total, transform),
        None => "-".to_string(),
    }
}

fn print_table(stones: &[Stone], codec: Option<&PriceCodec>, transform: PriceTransform, ctx: &Context) {
    ctx.output.table_header(
        &["SKU", "Shape", "Weight", "Category", "Lab", "Price"],
        &TABLE_WIDTHS,
    );

    for stone in stones {
        let weight = stone
            .weight_ct
            .map(|w| format!("{:.2}", w))
            .unwrap_or_else(|| "-".to_string());
        let sku = truncate(&stone.sku, TABLE_WIDTHS[0]);
        let shape = truncate(&stone.shape, TABLE_WIDTHS[1]);
        let category = truncate(&stone.category, TABLE_WIDTHS[3]);
        let lab = truncate(&stone.lab, TABLE_WIDTHS[4]);
        let price = price_code(stone, codec, transform);

        ctx.output.table_row(
            &[
                sku.as_str(),
                shape.as_str(),
                weight.as_str(),
                category.as_str(),
                lab.as_str(),
                price.as_str(),
            ],
            &TABLE_WIDTHS,
        );
    }
}

fn print_grid(stones: &[Stone], codec: Option<&PriceCodec>, transform: PriceTransform, ctx: &Context) {
    for stone in stones {
        ctx.output
            .header(&format!("{} ({})", stone.sku, stone.kind().as_str()));
        for field in stone.visible_fields() {
            ctx.output.kv(field.label(), &field.value(stone));
        }
        ctx.output
            .kv("Price code", &price_code(stone, codec, transform));
        if stone.has_media() {
            for url in [&stone.image_url, &stone.video_url, &stone.certificate_url]
                .into_iter()
                .flatten()
            {
                ctx.output.list_item(url);
            }
        }
    }
}

fn print_pager(result: &ResultSet, ctx: &Context) {
    let pagination = &result.page.pagination;
    let pages: Vec<String> = pagination
        .page_numbers(7)
        .into_iter()
        .map(|n| {
            if n == pagination.page {
                format!("[{}]", n)
            } else {
                n.to_string()
            }
        })
        .collect();

    println!();
    ctx.output.info(&format!(
        "Showing {}-{} of {}  |  page {}",
        pagination.start_item(),
        pagination.end_item(),
        pagination.total,
        pages.join(" ")
    ));
}
