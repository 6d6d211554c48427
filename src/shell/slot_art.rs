//! Slot images
//!
//! Each capacity tier has one image per remaining count, from empty to full:
//! `slots/<capacity>/<remaining>.png` under the asset root. A background image
//! sits at `background.png`.
//!
//! Presence of every file is checked once at startup; the images are then
//! loaded through the asset server and registered with egui, the same way the
//! textures are used everywhere else in the UI.

use bevy::asset::LoadState;
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};
use std::collections::HashMap;
use std::path::Path;

use crate::error::StartupError;
use crate::settings::TrackerSettings;

/// Bevy's default asset directory
pub const ASSET_ROOT: &str = "assets";

pub const BACKGROUND_PATH: &str = "background.png";

/// Asset path of the image showing `remaining` of `capacity` slots
pub fn slot_image_path(capacity: u32, remaining: u32) -> String {
    format!("slots/{}/{}.png", capacity, remaining)
}

/// Every image the tracker needs for the given capacity tiers, background first
pub fn required_assets(capacity_tiers: &[u32]) -> Vec<String> {
    let mut paths = vec![BACKGROUND_PATH.to_string()];
    for &capacity in capacity_tiers {
        paths.extend((0..=capacity).map(|remaining| slot_image_path(capacity, remaining)));
    }
    paths
}

/// Check that every required image exists under `root`
pub fn verify_assets(root: &Path, capacity_tiers: &[u32]) -> Result<(), StartupError> {
    for path in required_assets(capacity_tiers) {
        let full = root.join(&path);
        if !full.is_file() {
            return Err(StartupError::MissingAsset(full));
        }
    }
    Ok(())
}

/// egui textures for the slot images, keyed by `(capacity, remaining)`
#[derive(Resource, Default)]
pub struct SlotArt {
    slots: HashMap<(u32, u32), egui::TextureId>,
    pub background: Option<egui::TextureId>,
    /// Whether textures have been registered
    pub loaded: bool,
}

impl SlotArt {
    pub fn slot(&self, capacity: u32, remaining: u32) -> Option<egui::TextureId> {
        self.slots.get(&(capacity, remaining)).copied()
    }
}

/// Keeps the image handles alive so the assets are not unloaded
#[derive(Resource, Default)]
pub struct SlotArtHandles {
    handles: Vec<(String, Handle<Image>)>,
    /// Paths whose load failure has already been logged
    failed: Vec<String>,
}

impl SlotArtHandles {
    /// Record `path` as failed. True only the first time for a given path.
    fn mark_failed(&mut self, path: &str) -> bool {
        if self.failed.iter().any(|p| p == path) {
            return false;
        }
        self.failed.push(path.to_string());
        true
    }
}

/// Load slot images and register them with egui. Only does work until every
/// image is available.
pub fn load_slot_art(
    mut contexts: EguiContexts,
    asset_server: Res<AssetServer>,
    settings: Res<TrackerSettings>,
    mut art: ResMut<SlotArt>,
    mut art_handles: ResMut<SlotArtHandles>,
    images: Res<Assets<Image>>,
) {
    if art.loaded {
        return;
    }

    if art_handles.handles.is_empty() {
        for path in required_assets(&settings.capacity_tiers()) {
            let handle: Handle<Image> = asset_server.load(path.clone());
            art_handles.handles.push((path, handle));
        }
        return; // Wait for next frame to check if loaded
    }

    let failures: Vec<(String, String)> = art_handles
        .handles
        .iter()
        .filter_map(|(path, h)| match asset_server.get_load_state(h.id()) {
            Some(LoadState::Failed(err)) => Some((path.clone(), err.to_string())),
            _ => None,
        })
        .collect();
    for (path, err) in failures {
        if art_handles.mark_failed(&path) {
            error!("Failed to load slot image {}: {}", path, err);
        }
    }

    if !art_handles.handles.iter().all(|(_, h)| images.contains(h)) {
        return;
    }

    art.background = None;
    art.slots.clear();
    for capacity in settings.capacity_tiers() {
        for remaining in 0..=capacity {
            let path = slot_image_path(capacity, remaining);
            if let Some((_, handle)) = art_handles.handles.iter().find(|(p, _)| *p == path) {
                let texture_id = contexts.add_image(handle.clone());
                art.slots.insert((capacity, remaining), texture_id);
            }
        }
    }
    if let Some((_, handle)) = art_handles.handles.iter().find(|(p, _)| p == BACKGROUND_PATH) {
        art.background = Some(contexts.add_image(handle.clone()));
    }

    art.loaded = true;
    info!("Registered {} slot images with egui", art.slots.len());
}
