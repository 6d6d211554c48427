//! Spell catalog
//!
//! The read-only reference list of known spells, loaded once at startup from
//! a JSON file such as `assets/data/spells.json`:
//!
//! ```json
//! [
//!   { "name": "Cure Wounds", "level": 1, "classes": ["Cleric", "Druid"] },
//!   { "name": "Moonbeam", "level": "2", "classes": ["Druid"] }
//! ]
//! ```
//!
//! `level` may be written as a number or as a numeral string.

use bevy::prelude::*;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

use crate::error::StartupError;

/// Label shown for the "no class filter" dropdown entry
pub const ALL_CLASSES_LABEL: &str = "All Classes";

/// A single spell entry from the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellRecord {
    pub name: String,
    #[serde(deserialize_with = "deserialize_level")]
    pub level: u32,
    #[serde(default)]
    pub classes: Vec<String>,
}

impl SpellRecord {
    pub fn is_available_to(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// Level as it may appear on disk
#[derive(Deserialize)]
#[serde(untagged)]
enum RawLevel {
    Number(u32),
    Text(String),
}

fn deserialize_level<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let level = match RawLevel::deserialize(deserializer)? {
        RawLevel::Number(n) => n,
        RawLevel::Text(s) => s
            .trim()
            .parse::<u32>()
            .map_err(|_| D::Error::custom(format!("invalid spell level '{}'", s)))?,
    };

    if level == 0 {
        return Err(D::Error::custom("spell level must be positive"));
    }
    Ok(level)
}

/// Class restriction applied to catalog queries
#[derive(Resource, Debug, Clone, PartialEq, Eq, Default)]
pub enum ClassFilter {
    #[default]
    All,
    Class(String),
}

impl ClassFilter {
    pub fn matches(&self, record: &SpellRecord) -> bool {
        match self {
            ClassFilter::All => true,
            ClassFilter::Class(class) => record.is_available_to(class),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            ClassFilter::All => ALL_CLASSES_LABEL,
            ClassFilter::Class(class) => class,
        }
    }
}

impl fmt::Display for ClassFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The loaded catalog. Inserted as a resource and never mutated afterwards.
#[derive(Resource, Debug, Clone, Default)]
pub struct SpellCatalog {
    records: Vec<SpellRecord>,
}

impl SpellCatalog {
    pub fn from_records(records: Vec<SpellRecord>) -> Self {
        Self { records }
    }

    /// Load the catalog from a JSON file. Any failure here is fatal to the app.
    pub fn load(path: &Path) -> Result<Self, StartupError> {
        let contents = std::fs::read_to_string(path).map_err(|source| StartupError::CatalogRead {
            path: path.to_path_buf(),
            source,
        })?;

        let catalog = Self::parse(&contents).map_err(|source| StartupError::CatalogParse {
            path: path.to_path_buf(),
            source,
        })?;

        info!("Loaded {} spells from {:?}", catalog.len(), path);
        Ok(catalog)
    }

    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        let records: Vec<SpellRecord> = serde_json::from_str(json)?;
        Ok(Self::from_records(records))
    }

    /// Spells at `level` that pass `filter`, in catalog order
    pub fn query(&self, level: u32, filter: &ClassFilter) -> Vec<&SpellRecord> {
        self.records
            .iter()
            .filter(|r| r.level == level && filter.matches(r))
            .collect()
    }

    /// Every distinct class name in the catalog, sorted
    pub fn class_names(&self) -> Vec<&str> {
        let names: BTreeSet<&str> = self
            .records
            .iter()
            .flat_map(|r| r.classes.iter().map(String::as_str))
            .collect();
        names.into_iter().collect()
    }

    pub fn records(&self) -> &[SpellRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_accepts_number_and_numeral_string() {
        let catalog = SpellCatalog::parse(
            r#"[
                {"name": "Shield", "level": 1, "classes": ["Wizard"]},
                {"name": "Moonbeam", "level": " 2 ", "classes": ["Druid"]}
            ]"#,
        )
        .unwrap();

        assert_eq!(catalog.records()[0].level, 1);
        assert_eq!(catalog.records()[1].level, 2);
    }

    #[test]
    fn test_level_rejects_non_numeral() {
        let result = SpellCatalog::parse(r#"[{"name": "Shield", "level": "one", "classes": []}]"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_level_rejects_zero() {
        let result = SpellCatalog::parse(r#"[{"name": "Light", "level": 0, "classes": []}]"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_classes_defaults_to_empty() {
        let catalog = SpellCatalog::parse(r#"[{"name": "Wish", "level": 9}]"#).unwrap();
        assert!(catalog.records()[0].classes.is_empty());
        assert_eq!(catalog.query(9, &ClassFilter::All).len(), 1);
        assert!(catalog.query(9, &ClassFilter::Class("Wizard".into())).is_empty());
    }

    #[test]
    fn test_filter_label() {
        assert_eq!(ClassFilter::All.to_string(), "All Classes");
        assert_eq!(ClassFilter::Class("Druid".into()).label(), "Druid");
    }
}
