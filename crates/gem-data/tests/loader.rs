//! Loader behavior against an in-memory source.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use gem_catalog::inventory::{Inventory, LoadState};
use gem_data::{load_catalog, refresh, CatalogSource, FetchError};
use serde_json::{json, Value};
use tokio::sync::Mutex;

struct MemorySource {
    catalog: Result<Value, FetchError>,
    tags: Result<Value, FetchError>,
    delay: Duration,
    tags_delay: Duration,
    tags_deadline: Option<Duration>,
    calls: AtomicUsize,
}

impl MemorySource {
    fn new(catalog: Value) -> Self {
        Self {
            catalog: Ok(catalog),
            tags: Ok(json!([])),
            delay: Duration::ZERO,
            tags_delay: Duration::ZERO,
            tags_deadline: None,
            calls: AtomicUsize::new(0),
        }
    }

    fn with_tags(mut self, tags: Result<Value, FetchError>) -> Self {
        self.tags = tags;
        self
    }

    fn failing(err: FetchError) -> Self {
        let mut source = Self::new(json!([]));
        source.catalog = Err(err);
        source
    }

    fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    fn slow_tags(mut self, delay: Duration, deadline: Duration) -> Self {
        self.tags_delay = delay;
        self.tags_deadline = Some(deadline);
        self
    }
}

#[async_trait]
impl CatalogSource for MemorySource {
    async fn fetch_catalog(&self) -> Result<Value, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        self.catalog.clone()
    }

    async fn fetch_tags(&self) -> Result<Value, FetchError> {
        tokio::time::sleep(self.tags_delay).await;
        self.tags.clone()
    }

    fn tags_deadline(&self) -> Option<Duration> {
        self.tags_deadline
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

#[tokio::test]
async fn test_load_normalizes_both_payloads() {
    let source = MemorySource::new(json!({"stones": [{"sku": "T9548", "weightCt": "1.25"}]}))
        .with_tags(Ok(json!([{"id": 1, "name": "Featured", "stone_count": 3}])));

    let payload = load_catalog(&source).await.unwrap();
    assert_eq!(payload.stones.len(), 1);
    assert_eq!(payload.stones[0].weight_ct, Some(1.25));
    assert_eq!(payload.tags.len(), 1);
    assert_eq!(payload.tags[0].stone_count, Some(3));
}

#[tokio::test]
async fn test_hung_tags_do_not_block_catalog() {
    let source = MemorySource::new(json!([{"sku": "A"}, {"sku": "B"}]))
        .with_tags(Ok(json!([{"id": 1, "name": "Featured"}])))
        .slow_tags(Duration::from_secs(30), Duration::from_millis(20));

    let payload = tokio::time::timeout(Duration::from_secs(5), load_catalog(&source))
        .await
        .expect("catalog load waited on tags")
        .unwrap();
    assert_eq!(payload.stones.len(), 2);
    assert!(payload.tags.is_empty());
}

#[tokio::test]
async fn test_tags_within_deadline_are_kept() {
    let source = MemorySource::new(json!([{"sku": "A"}]))
        .with_tags(Ok(json!([{"id": 1, "name": "Featured"}])))
        .slow_tags(Duration::from_millis(5), Duration::from_secs(5));

    let payload = load_catalog(&source).await.unwrap();
    assert_eq!(payload.tags.len(), 1);
}

#[tokio::test]
async fn test_tag_failure_degrades_to_empty() {
    let source = MemorySource::new(json!([{"sku": "A"}])).with_tags(Err(FetchError::Timeout));
    let payload = load_catalog(&source).await.unwrap();
    assert_eq!(payload.stones.len(), 1);
    assert!(payload.tags.is_empty());
}

#[tokio::test]
async fn test_unexpected_shape_is_empty_not_error() {
    let source = MemorySource::new(json!({"data": "nope"}));
    let payload = load_catalog(&source).await.unwrap();
    assert!(payload.stones.is_empty());
}

#[tokio::test]
async fn test_catalog_failure_keeps_prior_snapshot() {
    let inventory = Mutex::new(Inventory::new());
    assert!(refresh(&inventory, &MemorySource::new(json!([{"sku": "A"}]))).await);

    let failing = MemorySource::failing(FetchError::HttpError {
        status: 502,
        message: "bad gateway".into(),
    });
    assert!(refresh(&inventory, &failing).await);

    let inv = inventory.lock().await;
    assert_eq!(inv.state(), &LoadState::Failed("HTTP 502: bad gateway".to_string()));
    assert_eq!(inv.stones().len(), 1);
}

#[tokio::test]
async fn test_newer_fetch_wins_over_slow_older_one() {
    let inventory = Arc::new(Mutex::new(Inventory::new()));
    let slow = Arc::new(
        MemorySource::new(json!([{"sku": "OLD"}])).delayed(Duration::from_millis(150)),
    );
    let fast = MemorySource::new(json!([{"sku": "NEW"}]));

    let first = {
        let inventory = Arc::clone(&inventory);
        let slow = Arc::clone(&slow);
        tokio::spawn(async move { refresh(&inventory, slow.as_ref()).await })
    };

    // Let the slow fetch take its ticket before the fast one starts.
    while slow.calls.load(Ordering::SeqCst) == 0 {
        tokio::task::yield_now().await;
    }
    assert!(refresh(&inventory, &fast).await);
    assert!(!first.await.unwrap());

    let inv = inventory.lock().await;
    assert_eq!(inv.state(), &LoadState::Ready);
    assert_eq!(inv.stones()[0].sku, "NEW");
}

#[tokio::test]
async fn test_empty_catalog_state() {
    let inventory = Mutex::new(Inventory::new());
    refresh(&inventory, &MemorySource::new(json!({"stones": []}))).await;
    assert_eq!(inventory.lock().await.state(), &LoadState::Empty);
}
