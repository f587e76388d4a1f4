//! Integration smoke tests for `teach_pricing`

use teach_pricing::{get_version, price_quote, Catalog, Selection};

#[test]
fn version_is_not_empty() {
    let v = get_version();
    assert!(!v.trim().is_empty());
}

#[test]
fn builtin_catalog_prices_every_course() {
    let catalog = Catalog::builtin();
    for course in &catalog.courses {
        let quote = price_quote(&catalog, &course.id, &Selection::default());
        assert!(quote.is_some_and(|q| q.final_total() > rust_decimal::Decimal::ZERO));
    }
}
