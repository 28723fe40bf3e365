//! End-to-end checks of normalize -> filter -> sort -> paginate.

use gem_catalog::prelude::*;
use serde_json::{json, Value};

/// A mixed catalog: duplicate weights, missing prices, string numerics and
/// one row that is not an object.
fn raw_catalog() -> Value {
    let shapes = ["Round", "Oval", "Cushion", ""];
    let categories = ["Diamond", "Emerald", "Fancy Sapphire", "Ruby"];
    let mut rows: Vec<Value> = (0..37)
        .map(|i| {
            let weight = ((i * 7) % 11) as f64 / 4.0;
            let price: Value = if i % 5 == 0 {
                Value::Null
            } else {
                json!(format!("{}", (i * 317) % 5000))
            };
            json!({
                "id": format!("st-{i}"),
                "sku": format!("{}{:04}", if i % 2 == 0 { "T" } else { "e" }, 9500 + i),
                "shape": shapes[i % shapes.len()],
                "weightCt": weight,
                "priceTotal": price,
                "category": categories[i % categories.len()],
                "treatment": if i % 3 == 0 { "None" } else { "Oiled" },
            })
        })
        .collect();
    rows.push(json!("garbage"));
    json!({ "stones": rows })
}

fn stones() -> Vec<Stone> {
    normalize_catalog(&raw_catalog())
}

fn ids(stones: &[&Stone]) -> Vec<String> {
    stones.iter().map(|s| s.id.to_string()).collect()
}

#[test]
fn test_reference_scenario() {
    let stones = normalize_stones(&json!([
        {"sku": "T9548", "weightCt": "1.25", "priceTotal": null}
    ]));
    assert_eq!(stones[0].sku, "T9548");
    assert_eq!(stones[0].weight_ct, Some(1.25));
    assert_eq!(stones[0].price_total, None);

    let by_price = FilterCriteria::new().with_price(Some(1000.0), None);
    assert_eq!(filter(&stones, &by_price).len(), 1);

    let by_sku = FilterCriteria::new().with_sku("t954");
    assert_eq!(filter(&stones, &by_sku).len(), 1);

    let by_shape = FilterCriteria::new().with_shape("Round");
    assert!(filter(&stones, &by_shape).is_empty());
}

#[test]
fn test_non_array_inputs_normalize_to_empty() {
    for raw in [json!(null), json!(1), json!("x"), json!({"sku": "A"}), json!(true)] {
        assert!(normalize_stones(&raw).is_empty());
    }
}

#[test]
fn test_numeric_fields_are_finite_or_none() {
    let raw = json!([
        {"weightCt": "abc", "priceTotal": "1e999", "pricePerCt": "12.5/ct", "ratio": ""},
        {"weightCt": [], "priceTotal": {}, "pricePerCt": false, "ratio": "NaN"}
    ]);
    for stone in normalize_stones(&raw) {
        for value in [stone.weight_ct, stone.price_total, stone.price_per_ct, stone.ratio] {
            assert!(value.map_or(true, f64::is_finite));
        }
    }
    let stones = normalize_stones(&raw);
    assert_eq!(stones[0].price_per_ct, Some(12.5));
}

#[test]
fn test_every_row_survives_normalization() {
    assert_eq!(stones().len(), 38);
}

#[test]
fn test_empty_criteria_is_identity() {
    let stones = stones();
    let out = filter(&stones, &FilterCriteria::default());
    let expected: Vec<&Stone> = stones.iter().collect();
    assert_eq!(ids(&out), ids(&expected));
}

#[test]
fn test_filter_is_monotonic() {
    let stones = stones();
    let steps = [
        FilterCriteria::new(),
        FilterCriteria::new().with_sku("t9"),
        FilterCriteria::new().with_sku("t9").with_price(Some(500.0), None),
        FilterCriteria::new()
            .with_sku("t9")
            .with_price(Some(500.0), Some(4000.0)),
        FilterCriteria::new()
            .with_sku("t9")
            .with_price(Some(500.0), Some(4000.0))
            .with_carat(Some(0.5), Some(2.0)),
        FilterCriteria::new()
            .with_sku("t9")
            .with_price(Some(500.0), Some(4000.0))
            .with_carat(Some(0.5), Some(2.0))
            .with_treatment("Oiled"),
    ];

    for pair in steps.windows(2) {
        let wider = ids(&filter(&stones, &pair[0]));
        let narrower = ids(&filter(&stones, &pair[1]));
        assert!(narrower.len() <= wider.len());
        assert!(narrower.iter().all(|id| wider.contains(id)));
    }
}

#[test]
fn test_numeric_reverse_symmetry() {
    let stones = stones();
    // Distinct keys only, so the reversal is exact.
    let mut seen = Vec::new();
    let distinct: Vec<Stone> = stones
        .into_iter()
        .filter(|s| match s.price_total {
            Some(p) if !seen.contains(&p.to_bits()) => {
                seen.push(p.to_bits());
                true
            }
            _ => false,
        })
        .collect();

    let asc = ids(&sort(&distinct, &SortSpec::ascending(SortField::PriceTotal)));
    let mut desc = ids(&sort(&distinct, &SortSpec::descending(SortField::PriceTotal)));
    desc.reverse();
    assert_eq!(asc, desc);
}

#[test]
fn test_sort_is_stable() {
    let stones = stones();
    for spec in [
        SortSpec::ascending(SortField::WeightCt),
        SortSpec::descending(SortField::WeightCt),
        SortSpec::ascending(SortField::Shape),
        SortSpec::descending(SortField::Category),
    ] {
        let sorted = sort(&stones, &spec);
        for pair in sorted.windows(2) {
            if spec.compare(pair[0], pair[1]).is_eq() {
                let pos = |s: &Stone| stones.iter().position(|x| x.id == s.id);
                assert!(pos(pair[0]) < pos(pair[1]), "tie reordered under {spec:?}");
            }
        }
    }
}

#[test]
fn test_pages_cover_sorted_set_exactly_once() {
    let stones = stones();
    let sorted = sort(&stones, &SortSpec::descending(SortField::WeightCt));

    for page_size in [1, 5, 7, 50] {
        let first = paginate(&sorted, 1, page_size);
        let mut joined = Vec::new();
        for page_index in 1..=first.total_pages {
            joined.extend(paginate(&sorted, page_index, page_size).items);
        }
        assert_eq!(ids(&joined), ids(&sorted), "page size {page_size}");
        assert!(paginate(&sorted, first.total_pages + 1, page_size).is_empty());
    }
}

#[test]
fn test_browse_flow() {
    let stones: std::sync::Arc<[Stone]> = stones().into();
    let mut cache = ResultCache::new();
    let mut state = BrowseState::new().with_page_size(5);

    state.update_criteria(|c| c.category = Selector::new("Emerald"));
    state.select_sort(SortField::WeightCt);
    let result = cache.for_state(&stones, &state);
    assert!(result.total_matches > 5);
    assert!(result
        .stones()
        .iter()
        .all(|s| s.kind() == StoneCategory::Emerald));

    state.next_page(result.total_pages());
    let second = cache.for_state(&stones, &state);
    assert_eq!(second.page.start_index, 5);

    state.select_sort(SortField::WeightCt);
    assert_eq!(state.page_index, 1);
    let flipped = cache.for_state(&stones, &state);
    let weights: Vec<f64> = flipped.stones().iter().filter_map(|s| s.weight_ct).collect();
    assert!(weights.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn test_suggest_ignores_filters() {
    let stones = stones();
    let out = suggest(&stones, "E95", 8);
    assert!(!out.is_empty());
    assert!(out.len() <= 8);
    assert!(out.iter().all(|s| s.sku.to_lowercase().contains("e95")));
}
