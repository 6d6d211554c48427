//! Spell slot ledger
//!
//! Per-level slot counters that deplete as spells are cast and refill on a
//! full rest, plus a per-level log of which spells were cast. The log shares
//! a single global cap across all levels.
//!
//! Slots and the cast log are tracked independently: recording a cast does
//! not consume a slot, and consuming a slot does not record anything.

use bevy::prelude::Resource;
use std::collections::HashSet;
use thiserror::Error;

/// Default cap on cast-log entries summed across all levels
pub const DEFAULT_CAST_CAP: usize = 7;

/// Errors raised by ledger construction and indexing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("level index {index} is out of range (ledger tracks {len} levels)")]
    InvalidIndex { index: usize, len: usize },

    #[error("spell level must be positive, got {0}")]
    InvalidLevel(u32),

    #[error("spell level {0} is configured more than once")]
    DuplicateLevel(u32),
}

/// Result of a `consume` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsumeOutcome {
    /// One slot was spent
    Consumed,
    /// No slots left at that level; nothing changed
    Depleted,
}

/// Result of a `record_cast` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// The spell was appended to the level's cast log
    Recorded,
    /// The global cast cap was already reached; nothing changed
    Rejected,
}

/// Slot state for a single spell level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotLevel {
    level: u32,
    capacity: u32,
    remaining: u32,
    cast_log: Vec<String>,
}

impl SlotLevel {
    fn new(level: u32, capacity: u32) -> Self {
        Self {
            level,
            capacity,
            remaining: capacity,
            cast_log: Vec::new(),
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Spell names recorded since the last reset, in the order they were cast
    pub fn cast_log(&self) -> &[String] {
        &self.cast_log
    }

    pub fn is_depleted(&self) -> bool {
        self.remaining == 0
    }
}

/// The ledger resource: one `SlotLevel` per tracked spell level.
///
/// Lives for the whole process; never persisted.
#[derive(Resource, Debug, Clone)]
pub struct Ledger {
    levels: Vec<SlotLevel>,
    cast_cap: usize,
}

impl Ledger {
    /// Build a ledger from `(level, capacity)` pairs, in display order.
    pub fn new(
        slots: impl IntoIterator<Item = (u32, u32)>,
        cast_cap: usize,
    ) -> Result<Self, LedgerError> {
        let mut seen = HashSet::new();
        let mut levels = Vec::new();

        for (level, capacity) in slots {
            if level == 0 {
                return Err(LedgerError::InvalidLevel(level));
            }
            if !seen.insert(level) {
                return Err(LedgerError::DuplicateLevel(level));
            }
            levels.push(SlotLevel::new(level, capacity));
        }

        Ok(Self { levels, cast_cap })
    }

    fn slot(&self, index: usize) -> Result<&SlotLevel, LedgerError> {
        self.levels.get(index).ok_or(LedgerError::InvalidIndex {
            index,
            len: self.levels.len(),
        })
    }

    fn slot_mut(&mut self, index: usize) -> Result<&mut SlotLevel, LedgerError> {
        let len = self.levels.len();
        self.levels
            .get_mut(index)
            .ok_or(LedgerError::InvalidIndex { index, len })
    }

    /// Spend one slot at `level_index`. A depleted level is left untouched.
    pub fn consume(&mut self, level_index: usize) -> Result<ConsumeOutcome, LedgerError> {
        let slot = self.slot_mut(level_index)?;
        if slot.remaining == 0 {
            return Ok(ConsumeOutcome::Depleted);
        }
        slot.remaining -= 1;
        Ok(ConsumeOutcome::Consumed)
    }

    /// Append `spell_name` to the cast log at `level_index`, unless the
    /// global cap is already reached. Slot counts are not checked.
    pub fn record_cast(
        &mut self,
        level_index: usize,
        spell_name: impl Into<String>,
    ) -> Result<RecordOutcome, LedgerError> {
        // A bad index is an error even when the log is full
        self.slot(level_index)?;
        if self.is_cast_log_full() {
            return Ok(RecordOutcome::Rejected);
        }
        self.slot_mut(level_index)?.cast_log.push(spell_name.into());
        Ok(RecordOutcome::Recorded)
    }

    /// Full rest: refill every level and clear every cast log.
    pub fn reset(&mut self) {
        for slot in &mut self.levels {
            slot.remaining = slot.capacity;
            slot.cast_log.clear();
        }
    }

    pub fn remaining(&self, level_index: usize) -> Result<u32, LedgerError> {
        self.slot(level_index).map(SlotLevel::remaining)
    }

    pub fn capacity(&self, level_index: usize) -> Result<u32, LedgerError> {
        self.slot(level_index).map(SlotLevel::capacity)
    }

    pub fn cast_log(&self, level_index: usize) -> Result<&[String], LedgerError> {
        self.slot(level_index).map(SlotLevel::cast_log)
    }

    /// All tracked levels in display order
    pub fn levels(&self) -> &[SlotLevel] {
        &self.levels
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Index of the entry tracking spell level `level`, if any
    pub fn level_index_of(&self, level: u32) -> Option<usize> {
        self.levels.iter().position(|s| s.level == level)
    }

    pub fn cast_cap(&self) -> usize {
        self.cast_cap
    }

    /// Cast-log entries summed across every level
    pub fn total_cast_entries(&self) -> usize {
        self.levels.iter().map(|s| s.cast_log.len()).sum()
    }

    pub fn is_cast_log_full(&self) -> bool {
        self.total_cast_entries() >= self.cast_cap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_level_zero() {
        let result = Ledger::new([(0, 2)], DEFAULT_CAST_CAP);
        assert_eq!(result.unwrap_err(), LedgerError::InvalidLevel(0));
    }

    #[test]
    fn test_new_rejects_duplicate_level() {
        let result = Ledger::new([(1, 4), (2, 3), (1, 2)], DEFAULT_CAST_CAP);
        assert_eq!(result.unwrap_err(), LedgerError::DuplicateLevel(1));
    }

    #[test]
    fn test_new_starts_full() {
        let ledger = Ledger::new([(1, 4), (2, 3)], DEFAULT_CAST_CAP).unwrap();
        assert_eq!(ledger.remaining(0), Ok(4));
        assert_eq!(ledger.remaining(1), Ok(3));
        assert_eq!(ledger.total_cast_entries(), 0);
    }

    #[test]
    fn test_record_cast_bad_index_reported_when_full() {
        let mut ledger = Ledger::new([(1, 4)], 1).unwrap();
        assert_eq!(ledger.record_cast(0, "Shield"), Ok(RecordOutcome::Recorded));
        assert_eq!(
            ledger.record_cast(5, "Shield"),
            Err(LedgerError::InvalidIndex { index: 5, len: 1 })
        );
    }

    #[test]
    fn test_zero_capacity_level_is_depleted_from_start() {
        let mut ledger = Ledger::new([(4, 0)], DEFAULT_CAST_CAP).unwrap();
        assert!(ledger.levels()[0].is_depleted());
        assert_eq!(ledger.consume(0), Ok(ConsumeOutcome::Depleted));
    }
}
