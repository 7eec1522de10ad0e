//! Village registry sidebar and selection card. This layer only reads
//! engine state and turns clicks — in panels or in the scene — into
//! `SelectRequest`s; it owns no scene structure.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::data::villages::{regions, village_by_id, VILLAGES};
use crate::scene::{BusinessPicked, LocationPicked, SelectRequest, SelectionState};

const GOLD: egui::Color32 = egui::Color32::from_rgb(212, 175, 55);
const DIM: egui::Color32 = egui::Color32::from_rgb(150, 150, 160);

pub fn inspector_plugin(app: &mut App) {
    app.add_systems(
        Update,
        (outward_events_system, registry_panel_system, selection_card_system),
    );
}

/// Consumes the engine's outward pick events. A village pick becomes a
/// selection request; a business pick only changes what the card shows.
fn outward_events_system(
    mut locations: EventReader<LocationPicked>,
    mut businesses: EventReader<BusinessPicked>,
    mut selection: ResMut<SelectionState>,
    mut requests: EventWriter<SelectRequest>,
) {
    for &LocationPicked(village_id) in locations.read() {
        requests.send(SelectRequest(Some(village_id)));
    }
    for BusinessPicked(business) in businesses.read() {
        selection.picked_business = Some(business.clone());
    }
}

fn registry_panel_system(
    mut contexts: EguiContexts,
    selection: Res<SelectionState>,
    mut requests: EventWriter<SelectRequest>,
) {
    egui::SidePanel::right("registry")
        .default_width(220.0)
        .resizable(false)
        .frame(
            egui::Frame::default()
                .fill(egui::Color32::from_rgba_premultiplied(10, 14, 18, 220))
                .inner_margin(egui::Margin::same(12)),
        )
        .show(contexts.ctx_mut(), |ui| {
            ui.style_mut().override_text_style = Some(egui::TextStyle::Monospace);
            ui.visuals_mut().override_text_color = Some(egui::Color32::from_rgb(220, 220, 225));

            ui.label(
                egui::RichText::new(format!("Village Registry ({})", VILLAGES.len()))
                    .size(12.0)
                    .color(GOLD),
            );
            ui.add_space(6.0);

            egui::ScrollArea::vertical().show(ui, |ui| {
                for region in regions() {
                    ui.add_space(6.0);
                    ui.label(egui::RichText::new(region).size(9.0).color(DIM));
                    ui.separator();
                    for village in VILLAGES.iter().filter(|v| v.region == region) {
                        let selected = selection.selected == Some(village.id);
                        if ui.selectable_label(selected, village.name).clicked() {
                            requests.send(SelectRequest(Some(village.id)));
                        }
                    }
                }
            });
        });
}

fn selection_card_system(
    mut contexts: EguiContexts,
    keys: Res<ButtonInput<KeyCode>>,
    selection: Res<SelectionState>,
    mut requests: EventWriter<SelectRequest>,
) {
    if keys.just_pressed(KeyCode::Escape) && selection.selected.is_some() {
        requests.send(SelectRequest(None));
        return;
    }

    let Some(village) = selection.selected.and_then(village_by_id) else {
        return;
    };

    egui::Window::new("selection_card")
        .anchor(egui::Align2::CENTER_BOTTOM, [0.0, -24.0])
        .resizable(false)
        .collapsible(false)
        .title_bar(false)
        .frame(
            egui::Frame::default()
                .fill(egui::Color32::from_rgba_premultiplied(12, 26, 36, 235))
                .inner_margin(egui::Margin::same(14))
                .corner_radius(egui::CornerRadius::same(8)),
        )
        .show(contexts.ctx_mut(), |ui| {
            ui.style_mut().override_text_style = Some(egui::TextStyle::Monospace);
            ui.visuals_mut().override_text_color = Some(egui::Color32::from_rgb(220, 220, 225));
            ui.set_width(420.0);

            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new(village.name.to_uppercase())
                        .size(20.0)
                        .color(egui::Color32::WHITE),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::TOP), |ui| {
                    if ui.button("Close").clicked() {
                        requests.send(SelectRequest(None));
                    }
                });
            });
            ui.label(
                egui::RichText::new(format!("Region: {}", village.region))
                    .size(9.0)
                    .color(GOLD),
            );
            ui.add_space(8.0);

            ui.columns(2, |columns| {
                columns[0].label(egui::RichText::new("Leadership").size(9.0).color(DIM));
                for leader in village.leadership {
                    columns[0].label(egui::RichText::new(*leader).size(10.0));
                }
                columns[1].label(egui::RichText::new("Cultural Snippet").size(9.0).color(DIM));
                columns[1].label(
                    egui::RichText::new(village.history)
                        .size(10.0)
                        .italics(),
                );
            });

            if let Some(business) = &selection.picked_business {
                ui.add_space(8.0);
                ui.separator();
                ui.label(egui::RichText::new(&business.category).size(9.0).color(GOLD));
                ui.label(egui::RichText::new(&business.name).size(13.0));
                ui.label(egui::RichText::new(&business.detail).size(10.0).color(DIM));
                if let Some(url) = &business.source_url {
                    ui.hyperlink_to(egui::RichText::new("source").size(9.0), url);
                }
            }

            ui.add_space(6.0);
            ui.label(egui::RichText::new("Esc to dismiss").size(9.0).color(DIM));
        });
}
