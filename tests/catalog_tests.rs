//! Integration tests for the persisted catalog

use rust_decimal_macros::dec;
use std::fs;
use teach_pricing::core::models::{CatalogIssue, LineKind, Tier};
use teach_pricing::{load_catalog, price_quote, save_catalog, Catalog, CatalogError, Selection};
use tempfile::TempDir;

#[test]
fn test_missing_file_falls_back_to_builtin() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("catalog.json");

    let catalog = Catalog::load_or_builtin(&path).expect("Failed to load catalog");
    assert_eq!(catalog, Catalog::builtin());
    assert!(!path.exists(), "Loading must not create the file");
}

#[test]
fn test_edit_save_and_reload() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("nested").join("catalog.json");

    let mut catalog = Catalog::builtin();
    let course = catalog
        .courses
        .iter_mut()
        .find(|c| c.id == "async-digital")
        .expect("course");
    course.tiers[0].unit_price = dec!(149.90);
    save_catalog(&catalog, &path).expect("Failed to save catalog");

    let loaded = Catalog::load_or_builtin(&path).expect("Failed to reload catalog");
    assert_eq!(loaded, catalog);

    let quote =
        price_quote(&loaded, "async-digital", &Selection::with_quantity(10)).expect("quote");
    assert_eq!(quote.final_total(), dec!(1499));
}

#[test]
fn test_saved_catalog_uses_camel_case_keys() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("catalog.json");
    save_catalog(&Catalog::builtin(), &path).expect("Failed to save catalog");

    let content = fs::read_to_string(&path).expect("Failed to read catalog");
    assert!(content.contains("\"minQuantity\""));
    assert!(content.contains("\"pricingLines\""));
    assert!(content.contains("\"extraFeatures\""));
    assert!(content.contains("\"kind\": \"per_unit\""));
}

#[test]
fn test_reset_restores_builtin() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("catalog.json");

    let mut catalog = Catalog::builtin();
    catalog.phases.clear();
    save_catalog(&catalog, &path).expect("Failed to save catalog");
    assert!(Catalog::load_or_builtin(&path)
        .expect("Failed to load")
        .phases
        .is_empty());

    Catalog::reset_persisted(&path).expect("Failed to reset");
    assert!(!path.exists());
    assert_eq!(
        Catalog::load_or_builtin(&path).expect("Failed to load"),
        Catalog::builtin()
    );

    // Resetting twice is fine
    Catalog::reset_persisted(&path).expect("Failed to reset again");
}

#[test]
fn test_invalid_json_is_a_parse_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("catalog.json");
    fs::write(&path, "{ \"courses\": [ { \"id\": 3 } ] }").expect("Failed to write");

    let err = load_catalog(&path).expect_err("should not parse");
    assert!(matches!(err, CatalogError::Parse { .. }));
    assert!(err.to_string().contains("catalog.json"));
}

#[test]
fn test_missing_file_is_an_io_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let err = load_catalog(&temp_dir.path().join("absent.json")).expect_err("should fail");
    assert!(matches!(err, CatalogError::Io { .. }));
}

#[test]
fn test_shape_problems_load_but_are_reported() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("catalog.json");

    let mut catalog = Catalog::builtin();
    let course = catalog
        .courses
        .iter_mut()
        .find(|c| c.id == "group-online")
        .expect("course");
    course.tiers = vec![
        Tier::bounded(1, 200, dec!(200)),
        Tier::unbounded(250, dec!(179)),
    ];
    let phase = catalog
        .phases
        .iter_mut()
        .find(|p| p.id == "fase1")
        .expect("phase");
    for line in &mut phase.pricing_lines {
        if let LineKind::Tiered { tiers } = &mut line.kind {
            tiers.clear();
        }
    }
    save_catalog(&catalog, &path).expect("Failed to save catalog");

    let loaded = load_catalog(&path).expect("Shape problems must not stop loading");
    let issues = loaded.validate();
    assert!(issues.contains(&CatalogIssue::NonContiguousTiers {
        owner: "course group-online".to_string(),
        index: 1,
    }));
    assert!(issues.contains(&CatalogIssue::EmptyTiers {
        owner: "phase fase1 line sistema-aprendizagem".to_string(),
    }));
    assert_eq!(issues.len(), 2);
}
