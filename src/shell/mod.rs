//! Presentation shell
//!
//! Owns the window contents. UI systems never touch the ledger directly:
//! every click becomes a [`LedgerCommand`] carrying its level index, and
//! [`apply_ledger_commands`] is the only system that mutates the [`Ledger`].
//! Rendering is a function of ledger state each frame.

use bevy::prelude::*;
use std::path::Path;

use crate::catalog::{ClassFilter, SpellCatalog};
use crate::error::StartupError;
use crate::ledger::{ConsumeOutcome, Ledger, LedgerError, RecordOutcome};
use crate::settings::TrackerSettings;

pub mod slot_art;
pub mod tracker_ui;

use slot_art::{load_slot_art, SlotArt, SlotArtHandles, ASSET_ROOT};
use tracker_ui::{tracker_ui, SpellPickerState};

/// A user action routed to the ledger
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub enum LedgerCommand {
    /// Slot image or "Use Level N Spell Slot" button clicked
    Consume { level_index: usize },
    /// Spell chosen from the picker popup
    RecordCast { level_index: usize, spell: String },
    /// "Reset All" clicked
    Reset,
}

/// Build the ledger and load the catalog, then check that every slot image
/// exists under `asset_root`.
pub fn prepare_tracker(
    settings: &TrackerSettings,
    asset_root: &Path,
) -> Result<(Ledger, SpellCatalog), StartupError> {
    let ledger = settings.build_ledger()?;
    let catalog = SpellCatalog::load(&settings.catalog_path)?;
    slot_art::verify_assets(asset_root, &settings.capacity_tiers())?;
    Ok((ledger, catalog))
}

/// Plugin wiring the tracker into the app.
///
/// Startup failures exit the process here, before the window is created.
pub struct TrackerPlugin;

impl Plugin for TrackerPlugin {
    fn build(&self, app: &mut App) {
        let settings = TrackerSettings::load();

        let (ledger, catalog) = match prepare_tracker(&settings, Path::new(ASSET_ROOT)) {
            Ok(loaded) => loaded,
            Err(e) => {
                error!("Cannot start spell slot tracker: {}", e);
                std::process::exit(1);
            }
        };

        info!(
            "Tracking {} spell levels, cast log capped at {}",
            ledger.len(),
            ledger.cast_cap()
        );

        app.insert_resource(settings)
            .insert_resource(ledger)
            .insert_resource(catalog)
            .init_resource::<ClassFilter>()
            .init_resource::<SpellPickerState>()
            .init_resource::<SlotArt>()
            .init_resource::<SlotArtHandles>()
            .add_event::<LedgerCommand>()
            .add_systems(Startup, spawn_camera)
            .add_systems(
                Update,
                (load_slot_art, tracker_ui, apply_ledger_commands).chain(),
            );
    }
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// Apply queued commands to the ledger in the order they were sent
pub fn apply_ledger_commands(
    mut events: EventReader<LedgerCommand>,
    mut ledger: ResMut<Ledger>,
) {
    for command in events.read() {
        if let Err(e) = apply_command(&mut ledger, command) {
            error!("Ledger rejected {:?}: {}", command, e);
        }
    }
}

fn apply_command(ledger: &mut Ledger, command: &LedgerCommand) -> Result<(), LedgerError> {
    match command {
        LedgerCommand::Consume { level_index } => {
            let outcome = ledger.consume(*level_index)?;
            let slot = &ledger.levels()[*level_index];
            match outcome {
                ConsumeOutcome::Consumed => info!(
                    "Used a level {} slot, {} remaining",
                    slot.level(),
                    slot.remaining()
                ),
                ConsumeOutcome::Depleted => debug!("Level {} has no slots left", slot.level()),
            }
        }
        LedgerCommand::RecordCast { level_index, spell } => {
            match ledger.record_cast(*level_index, spell.clone())? {
                RecordOutcome::Recorded => info!("Recorded cast of {}", spell),
                RecordOutcome::Rejected => debug!(
                    "Cast log full ({} entries), ignoring {}",
                    ledger.cast_cap(),
                    spell
                ),
            }
        }
        LedgerCommand::Reset => {
            ledger.reset();
            info!("Full rest: all spell slots restored");
        }
    }
    Ok(())
}
