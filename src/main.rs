//! Spell Slot Tracker
//!
//! Launches straight into the tracker window; takes no arguments.

use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use spellslots::TrackerPlugin;

fn main() -> AppExit {
    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Spell Slot Tracker".to_string(),
                        resolution: (640.0, 760.0).into(),
                        resizable: true,
                        ..default()
                    }),
                    ..default()
                })
                .set(LogPlugin {
                    filter: "info,wgpu=error,naga=warn,spellslots=debug".to_string(),
                    ..default()
                }),
        )
        .add_plugins((EguiPlugin, TrackerPlugin))
        .run()
}
