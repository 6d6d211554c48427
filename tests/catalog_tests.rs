//! Spell catalog tests
//!
//! These tests verify that the SpellCatalog:
//! - Filters by level and class in catalog order
//! - Lists distinct class names alphabetically
//! - Fails on missing or malformed catalog files

use spellslots::{ClassFilter, SpellCatalog, SpellRecord, StartupError};
use std::fs;

fn record(name: &str, level: u32, classes: &[&str]) -> SpellRecord {
    SpellRecord {
        name: name.to_string(),
        level,
        classes: classes.iter().map(|c| c.to_string()).collect(),
    }
}

fn create_test_catalog() -> SpellCatalog {
    SpellCatalog::from_records(vec![
        record("Cure Wounds", 1, &["Cleric", "Druid"]),
        record("Entangle", 1, &["Druid"]),
        record("Moonbeam", 2, &["Druid"]),
        record("Magic Missile", 1, &["Wizard", "Sorcerer"]),
    ])
}

fn names(records: &[&SpellRecord]) -> Vec<String> {
    records.iter().map(|r| r.name.clone()).collect()
}

#[test]
fn test_query_by_class() {
    let catalog = create_test_catalog();

    let druid = catalog.query(1, &ClassFilter::Class("Druid".to_string()));
    assert_eq!(names(&druid), vec!["Cure Wounds", "Entangle"]);

    let cleric = catalog.query(1, &ClassFilter::Class("Cleric".to_string()));
    assert_eq!(names(&cleric), vec!["Cure Wounds"]);
}

#[test]
fn test_query_all_classes_keeps_catalog_order() {
    let catalog = create_test_catalog();
    let all = catalog.query(1, &ClassFilter::All);
    assert_eq!(names(&all), vec!["Cure Wounds", "Entangle", "Magic Missile"]);
}

#[test]
fn test_query_unknown_class_or_level_is_empty() {
    let catalog = create_test_catalog();
    assert!(catalog.query(1, &ClassFilter::Class("Bard".to_string())).is_empty());
    assert!(catalog.query(3, &ClassFilter::All).is_empty());
}

#[test]
fn test_class_names_sorted_and_distinct() {
    let catalog = create_test_catalog();
    assert_eq!(
        catalog.class_names(),
        vec!["Cleric", "Druid", "Sorcerer", "Wizard"]
    );
}

#[test]
fn test_load_accepts_numeric_and_string_levels() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("spells.json");
    fs::write(
        &path,
        r#"[
            {"name": "Cure Wounds", "level": 1, "classes": ["Cleric", "Druid"]},
            {"name": "Entangle", "level": "1", "classes": ["Druid"]}
        ]"#,
    )
    .unwrap();

    let catalog = SpellCatalog::load(&path).unwrap();
    assert_eq!(catalog.len(), 2);
    assert_eq!(
        names(&catalog.query(1, &ClassFilter::Class("Druid".to_string()))),
        vec!["Cure Wounds", "Entangle"]
    );
}

#[test]
fn test_load_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let result = SpellCatalog::load(&dir.path().join("nope.json"));
    assert!(matches!(result, Err(StartupError::CatalogRead { .. })));
}

#[test]
fn test_load_malformed_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("spells.json");
    fs::write(&path, r#"[{"name": "Shield", "classes": ["Wizard"]}]"#).unwrap();

    let result = SpellCatalog::load(&path);
    assert!(matches!(result, Err(StartupError::CatalogParse { .. })));
}

#[test]
fn test_bundled_catalog_parses() {
    let catalog = SpellCatalog::load(std::path::Path::new("assets/data/spells.json")).unwrap();
    assert!(!catalog.is_empty());
    assert!(catalog.class_names().contains(&"Druid"));
}
