//! Tracker window
//!
//! One row per tracked level:
//! - Slot image (click to use a slot)
//! - "Use Level N Spell Slot" button
//! - Remaining / capacity text
//! - "Choose Spell" button opening the spell picker for that level
//! - The level's cast log
//!
//! Below the rows sit the class filter dropdown and the "Reset All" button.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use super::slot_art::SlotArt;
use super::LedgerCommand;
use crate::catalog::{ClassFilter, SpellCatalog, ALL_CLASSES_LABEL};
use crate::ledger::{Ledger, SlotLevel};
use crate::settings::TrackerSettings;

const BACKGROUND: egui::Color32 = egui::Color32::from_rgb(20, 20, 30);
const TITLE: egui::Color32 = egui::Color32::from_rgb(230, 204, 153);
const MUTED: egui::Color32 = egui::Color32::from_rgb(153, 140, 128);
const SLOT_BORDER: egui::Color32 = egui::Color32::from_rgb(120, 160, 90);

/// Which level's spell picker is open, if any
#[derive(Resource, Default)]
pub struct SpellPickerState {
    pub open_level: Option<usize>,
}

pub fn tracker_ui(
    mut contexts: EguiContexts,
    ledger: Res<Ledger>,
    catalog: Res<SpellCatalog>,
    settings: Res<TrackerSettings>,
    art: Res<SlotArt>,
    mut filter: ResMut<ClassFilter>,
    mut picker: ResMut<SpellPickerState>,
    mut commands: EventWriter<LedgerCommand>,
) {
    let ctx = contexts.ctx_mut();

    egui::CentralPanel::default()
        .frame(egui::Frame::none().fill(BACKGROUND).inner_margin(egui::Margin::same(20.0)))
        .show(ctx, |ui| {
            if let Some(background) = art.background {
                ui.painter().image(
                    background,
                    ui.max_rect(),
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );
            }

            ui.vertical_centered(|ui| {
                ui.heading(egui::RichText::new("SPELL SLOTS").size(36.0).color(TITLE));
            });
            ui.add_space(16.0);

            egui::ScrollArea::vertical().show(ui, |ui| {
                for (level_index, slot) in ledger.levels().iter().enumerate() {
                    render_level_row(
                        ui,
                        level_index,
                        slot,
                        &art,
                        settings.slot_icon_size,
                        &mut picker,
                        &mut commands,
                    );
                    ui.add_space(12.0);
                }

                ui.separator();
                ui.label(
                    egui::RichText::new(format!(
                        "Casts recorded: {} / {}",
                        ledger.total_cast_entries(),
                        ledger.cast_cap()
                    ))
                    .color(MUTED),
                );
                ui.add_space(8.0);

                ui.horizontal(|ui| {
                    render_class_filter(ui, &catalog, &mut filter);

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui
                            .add(
                                egui::Button::new(egui::RichText::new("Reset All").size(18.0))
                                    .min_size(egui::vec2(120.0, 32.0)),
                            )
                            .clicked()
                        {
                            commands.send(LedgerCommand::Reset);
                        }
                    });
                });
            });
        });

    render_spell_picker(ctx, &ledger, &catalog, &filter, &mut picker, &mut commands);
}

fn render_level_row(
    ui: &mut egui::Ui,
    level_index: usize,
    slot: &SlotLevel,
    art: &SlotArt,
    icon_size: f32,
    picker: &mut SpellPickerState,
    commands: &mut EventWriter<LedgerCommand>,
) {
    ui.horizontal(|ui| {
        let (rect, response) =
            ui.allocate_exact_size(egui::vec2(icon_size, icon_size), egui::Sense::click());

        // Draw the slot image if loaded, otherwise a placeholder with the count
        if let Some(texture_id) = art.slot(slot.capacity(), slot.remaining()) {
            ui.painter().image(
                texture_id,
                rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );
        } else {
            ui.painter().rect_filled(rect, 8.0, SLOT_BORDER.gamma_multiply(0.3));
            ui.painter().text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                slot.remaining().to_string(),
                egui::FontId::proportional(icon_size * 0.4),
                egui::Color32::WHITE,
            );
        }
        if response.hovered() {
            ui.painter().rect_stroke(rect, 8.0, egui::Stroke::new(2.0, SLOT_BORDER));
        }
        if response.clicked() {
            commands.send(LedgerCommand::Consume { level_index });
        }

        ui.add_space(12.0);

        ui.vertical(|ui| {
            ui.label(
                egui::RichText::new(format!("Level {}", slot.level()))
                    .size(22.0)
                    .color(TITLE),
            );
            ui.label(
                egui::RichText::new(format!("{} / {} slots", slot.remaining(), slot.capacity()))
                    .size(16.0)
                    .color(MUTED),
            );

            if ui
                .button(format!("Use Level {} Spell Slot", slot.level()))
                .clicked()
            {
                commands.send(LedgerCommand::Consume { level_index });
            }
            if ui.button("Choose Spell").clicked() {
                picker.open_level = Some(level_index);
            }

            for spell in slot.cast_log() {
                ui.label(format!("• {}", spell));
            }
        });
    });
}

fn render_class_filter(ui: &mut egui::Ui, catalog: &SpellCatalog, filter: &mut ClassFilter) {
    let selected = filter.label().to_owned();

    egui::ComboBox::from_label("Class")
        .selected_text(selected)
        .show_ui(ui, |ui| {
            ui.selectable_value(filter, ClassFilter::All, ALL_CLASSES_LABEL);
            for class in catalog.class_names() {
                ui.selectable_value(filter, ClassFilter::Class(class.to_owned()), class);
            }
        });
}

/// Spell entries are greyed out once the cast log holds its cap
pub fn spell_choice_enabled(ledger: &Ledger) -> bool {
    !ledger.is_cast_log_full()
}

/// Popup listing the catalog spells for the open level under the current filter
fn render_spell_picker(
    ctx: &egui::Context,
    ledger: &Ledger,
    catalog: &SpellCatalog,
    filter: &ClassFilter,
    picker: &mut SpellPickerState,
    commands: &mut EventWriter<LedgerCommand>,
) {
    let Some(level_index) = picker.open_level else {
        return;
    };
    let Some(slot) = ledger.levels().get(level_index) else {
        picker.open_level = None;
        return;
    };

    let spells = catalog.query(slot.level(), filter);
    let enabled = spell_choice_enabled(ledger);
    let mut open = true;
    let mut chosen: Option<String> = None;
    let mut cancelled = false;

    egui::Window::new(format!("Choose Level {} Spell ({})", slot.level(), filter))
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .open(&mut open)
        .show(ctx, |ui| {
            ui.set_min_width(280.0);

            if spells.is_empty() {
                ui.label(egui::RichText::new("No spells match this level and class.").color(MUTED));
            }

            egui::ScrollArea::vertical().max_height(320.0).show(ui, |ui| {
                for spell in &spells {
                    if ui
                        .add_enabled(enabled, egui::Button::new(spell.name.as_str()))
                        .clicked()
                    {
                        chosen = Some(spell.name.clone());
                    }
                }
            });

            ui.add_space(8.0);
            if ui.button("Cancel").clicked() {
                cancelled = true;
            }
        });

    if let Some(spell) = chosen {
        commands.send(LedgerCommand::RecordCast { level_index, spell });
        picker.open_level = None;
    } else if cancelled || !open {
        picker.open_level = None;
    }
}
