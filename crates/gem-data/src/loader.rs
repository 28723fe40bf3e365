//! Concurrent catalog loading.

use gem_catalog::inventory::{CatalogPayload, Inventory};
use gem_catalog::stone::normalize_catalog;
use gem_catalog::tag::parse_tags;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::source::CatalogSource;
use crate::FetchError;

/// Fetch stones and tags concurrently and normalize both.
///
/// A failed catalog fetch is an error. A failed tag fetch only costs the
/// tags: it is logged and the tag list comes back empty. Tags that outlast
/// the source's [`CatalogSource::tags_deadline`] count as failed.
pub async fn load_catalog<S>(source: &S) -> Result<CatalogPayload, FetchError>
where
    S: CatalogSource + ?Sized,
{
    let (catalog, tags) = futures::join!(source.fetch_catalog(), fetch_tags(source));

    let stones = normalize_catalog(&catalog?);
    let tags = match tags {
        Ok(raw) => parse_tags(&raw),
        Err(err) => {
            tracing::warn!(source = %source.describe(), error = %err, "tag fetch failed, continuing without tags");
            Vec::new()
        }
    };

    tracing::info!(
        source = %source.describe(),
        stones = stones.len(),
        tags = tags.len(),
        "catalog fetched"
    );
    Ok(CatalogPayload::new(stones, tags))
}

async fn fetch_tags<S>(source: &S) -> Result<Value, FetchError>
where
    S: CatalogSource + ?Sized,
{
    match source.tags_deadline() {
        Some(deadline) => tokio::time::timeout(deadline, source.fetch_tags())
            .await
            .unwrap_or(Err(FetchError::Timeout)),
        None => source.fetch_tags().await,
    }
}

/// Run one fetch against `inventory`.
///
/// Returns whether the result was published; a newer fetch started in the
/// meantime wins and this one is dropped.
pub async fn refresh<S>(inventory: &Mutex<Inventory>, source: &S) -> bool
where
    S: CatalogSource + ?Sized,
{
    let ticket = inventory.lock().await.begin_fetch();
    let outcome = load_catalog(source).await.map_err(|e| e.to_string());
    inventory.lock().await.complete(ticket, outcome)
}
