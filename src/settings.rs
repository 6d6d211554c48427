//! Tracker settings
//!
//! Read-only configuration loaded from `settings.ron` in the working
//! directory. Every field has a default, so the file is optional.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::ledger::{Ledger, LedgerError, DEFAULT_CAST_CAP};

/// One tracked spell level and its full-rest slot count
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotLevelConfig {
    pub level: u32,
    pub capacity: u32,
}

/// User-configurable tracker settings
#[derive(Resource, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerSettings {
    /// Tracked levels in display order
    pub slot_levels: Vec<SlotLevelConfig>,
    /// Cap on cast-log entries across all levels
    pub max_cast_entries: usize,
    /// Spell catalog JSON file
    pub catalog_path: PathBuf,
    /// Edge length of the square slot image, in logical pixels
    pub slot_icon_size: f32,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            slot_levels: vec![
                SlotLevelConfig { level: 1, capacity: 4 },
                SlotLevelConfig { level: 2, capacity: 3 },
                SlotLevelConfig { level: 3, capacity: 2 },
            ],
            max_cast_entries: DEFAULT_CAST_CAP,
            catalog_path: PathBuf::from("assets/data/spells.json"),
            slot_icon_size: 150.0,
        }
    }
}

impl TrackerSettings {
    /// Get the path to the settings file
    fn settings_path() -> PathBuf {
        PathBuf::from("settings.ron")
    }

    /// Load settings from `settings.ron`, or defaults if it is absent
    pub fn load() -> Self {
        Self::load_from(&Self::settings_path())
    }

    /// Load settings from `path`; a missing or unreadable file yields defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            info!("No settings file found at {:?}, using defaults", path);
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(contents) => match ron::from_str(&contents) {
                Ok(settings) => {
                    info!("Loaded settings from {:?}", path);
                    settings
                }
                Err(e) => {
                    warn!("Failed to parse settings file: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read settings file: {}", e);
                Self::default()
            }
        }
    }

    /// Distinct slot capacities, each of which needs its own set of slot images
    pub fn capacity_tiers(&self) -> Vec<u32> {
        let mut tiers: Vec<u32> = self.slot_levels.iter().map(|s| s.capacity).collect();
        tiers.sort_unstable();
        tiers.dedup();
        tiers
    }

    /// Build a full ledger for the configured levels
    pub fn build_ledger(&self) -> Result<Ledger, LedgerError> {
        Ledger::new(
            self.slot_levels.iter().map(|s| (s.level, s.capacity)),
            self.max_cast_entries,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_settings_fill_defaults() {
        let settings: TrackerSettings = ron::from_str("(max_cast_entries: 10)").unwrap();
        assert_eq!(settings.max_cast_entries, 10);
        assert_eq!(settings.slot_levels, TrackerSettings::default().slot_levels);
        assert_eq!(settings.catalog_path, PathBuf::from("assets/data/spells.json"));
    }

    #[test]
    fn test_custom_slot_levels() {
        let settings: TrackerSettings = ron::from_str(
            "(slot_levels: [(level: 1, capacity: 2), (level: 2, capacity: 2), (level: 5, capacity: 1)])",
        )
        .unwrap();

        assert_eq!(settings.capacity_tiers(), vec![1, 2]);
        let ledger = settings.build_ledger().unwrap();
        assert_eq!(ledger.len(), 3);
        assert_eq!(ledger.level_index_of(5), Some(2));
    }

    #[test]
    fn test_default_capacity_tiers() {
        assert_eq!(TrackerSettings::default().capacity_tiers(), vec![2, 3, 4]);
    }
}
