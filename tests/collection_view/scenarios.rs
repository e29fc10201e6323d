//! Derivation scenarios over marketplace vehicles.

use std::num::NonZeroUsize;

use marketview::domain::Vehicle;
use marketview::pipeline::filter_records;
use marketview::{CollectionView, PredicatePatch, PredicateSet, SortKey};

use crate::support::{ids, numbered, vehicle};

fn view(records: Vec<Vehicle>, page_size: usize) -> CollectionView<Vehicle> {
    let mut view = CollectionView::new(NonZeroUsize::new(page_size).unwrap()).with_sort(SortKey::PriceLow);
    view.replace_records(records);
    view
}

#[test]
fn empty_search_returns_everything() {
    let records = numbered(5);
    let predicates = PredicateSet::new().with_search("");
    assert_eq!(filter_records(&records, &predicates).len(), 5);
}

#[test]
fn substring_search_ignores_case() {
    let records = vec![
        vehicle("1", "Tesla Model 3", "Tesla", 40_000.0),
        vehicle("2", "BYD Atto 3", "BYD", 30_000.0),
        vehicle("3", "Nissan Leaf", "Nissan", 20_000.0),
    ];
    for needle in ["tesla", "TESLA", "TeSlA"] {
        let found = filter_records(&records, &PredicateSet::new().with_search(needle));
        let titles: Vec<&str> = found.iter().map(|v| v.title.as_str()).collect();
        assert_eq!(titles, vec!["Tesla Model 3"]);
    }
}

#[test]
fn search_matches_seller_name() {
    let mut listed = vehicle("1", "VF 8", "VinFast", 1.0);
    listed.seller_name = Some("Green Motors".to_string());
    let records = vec![listed, vehicle("2", "Leaf", "Nissan", 1.0)];

    let found = filter_records(&records, &PredicateSet::new().with_search("green"));
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, "1");
}

#[test]
fn price_range_is_inclusive() {
    let records = vec![
        vehicle("a", "A", "X", 100.0),
        vehicle("b", "B", "X", 200.0),
        vehicle("c", "C", "X", 300.0),
    ];
    let found = filter_records(&records, &PredicateSet::new().with_price_range(Some(150.0), Some(250.0)));
    assert_eq!(found.iter().map(|v| v.id.as_str()).collect::<Vec<_>>(), vec!["b"]);

    let found = filter_records(&records, &PredicateSet::new().with_price_range(Some(200.0), Some(300.0)));
    assert_eq!(found.len(), 2);
}

#[test]
fn unparseable_price_counts_as_zero() {
    let mut odd = vehicle("odd", "Odd", "X", 0.0);
    odd.price = "call for price".into();
    let records = vec![odd, vehicle("b", "B", "X", 50.0)];

    let found = filter_records(&records, &PredicateSet::new().with_price_range(None, Some(10.0)));
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, "odd");
}

#[test]
fn third_page_of_twenty_five() {
    let mut view = view(numbered(25), 10);
    view.go_to_page(3);
    let page = view.derive();

    assert_eq!(ids(&page.items), vec!["v20", "v21", "v22", "v23", "v24"]);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.filtered_count, 25);
    assert!(!page.has_next());
    assert!(page.has_previous());
}

#[test]
fn narrowing_filter_resets_page() {
    let mut view = view(numbered(50), 10);
    view.go_to_page(5);
    assert_eq!(view.derive().current_page, 5);

    view.set_predicates(PredicatePatch::new().max_price(Some(14.0)));
    let page = view.derive();
    assert_eq!(page.current_page, 1);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.items.len(), 10);
}

#[test]
fn brand_and_status_filters_combine() {
    let mut sold = vehicle("3", "VF 9", "VinFast", 3.0);
    sold.status = Some("SOLD".to_string());
    let records = vec![
        vehicle("1", "VF 8", "VinFast", 1.0),
        vehicle("2", "Leaf", "Nissan", 2.0),
        sold,
    ];

    let predicates = PredicateSet::new().with_brand("vinfast").with_status("active");
    let found = filter_records(&records, &predicates);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, "1");
}

#[test]
fn no_results_is_not_a_failure() {
    let mut view = view(numbered(5), 10);
    view.set_predicates(PredicatePatch::new().search("no such car"));
    let page = view.derive();
    assert!(page.is_empty());
    assert_eq!(page.total_pages, 1);
    assert!(view.last_error().is_none());
}

#[test]
fn rating_sort_puts_unrated_last() {
    let mut top = vehicle("top", "Top", "X", 1.0);
    top.rating = Some(4.8);
    let mut mid = vehicle("mid", "Mid", "X", 1.0);
    mid.rating = Some(3.5);
    let unrated = vehicle("none", "None", "X", 1.0);

    let mut view = view(vec![unrated, mid, top], 10);
    view.set_sort(SortKey::Rating);
    assert_eq!(ids(&view.derive().items), vec!["top", "mid", "none"]);
}

#[test]
fn newest_sorts_by_year_then_title() {
    let mut old = vehicle("old", "Zoe", "Renault", 1.0);
    old.year = 2019;
    let a = vehicle("a", "Atto 3", "BYD", 1.0);
    let b = vehicle("b", "Bolt", "Chevrolet", 1.0);

    let mut view = view(vec![old, b, a], 10);
    view.set_sort(SortKey::Newest);
    assert_eq!(ids(&view.derive().items), vec!["a", "b", "old"]);
}
