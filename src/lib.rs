//! Spell Slot Tracker
//!
//! A desktop tracker for a tabletop role-playing character's spell slots:
//! per-level slots that deplete as spells are cast and refill on a full rest,
//! with a record of which spells were cast.
//!
//! This library exposes the ledger, catalog, and shell for testing and reuse.

pub mod catalog;
pub mod error;
pub mod ledger;
pub mod settings;
pub mod shell;

// Re-export commonly used types
pub use catalog::{ClassFilter, SpellCatalog, SpellRecord};
pub use error::StartupError;
pub use ledger::{ConsumeOutcome, Ledger, LedgerError, RecordOutcome, SlotLevel};
pub use settings::TrackerSettings;
pub use shell::{LedgerCommand, TrackerPlugin};
