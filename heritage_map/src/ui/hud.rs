//! HUD overlay: brand block, discovery engine panel, FPS counter.

use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::scene::{InstancePool, SelectionState};

const GOLD: egui::Color32 = egui::Color32::from_rgb(212, 175, 55);
const DIM: egui::Color32 = egui::Color32::from_rgb(150, 150, 160);

pub fn hud_plugin(app: &mut App) {
    app.add_plugins(FrameTimeDiagnosticsPlugin)
        .add_systems(Update, hud_overlay_system);
}

fn hud_overlay_system(
    mut contexts: EguiContexts,
    selection: Res<SelectionState>,
    pool: Res<InstancePool>,
    diagnostics: Res<DiagnosticsStore>,
) {
    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|d| d.smoothed())
        .unwrap_or(0.0);

    egui::Window::new("Lefatshe")
        .anchor(egui::Align2::LEFT_TOP, [10.0, 10.0])
        .resizable(false)
        .collapsible(false)
        .title_bar(false)
        .frame(
            egui::Frame::default()
                .fill(egui::Color32::from_rgba_premultiplied(10, 14, 18, 210))
                .inner_margin(egui::Margin::same(12))
                .corner_radius(egui::CornerRadius::same(6)),
        )
        .show(contexts.ctx_mut(), |ui| {
            ui.style_mut().override_text_style = Some(egui::TextStyle::Monospace);
            ui.visuals_mut().override_text_color = Some(egui::Color32::from_rgb(220, 220, 225));

            ui.label(
                egui::RichText::new("LEFATSHE LA BAFOKENG")
                    .size(16.0)
                    .color(GOLD),
            );
            ui.label(
                egui::RichText::new("Royal Heritage Intelligence")
                    .size(10.0)
                    .color(DIM),
            );
            ui.add_space(8.0);
            ui.separator();

            ui.label(egui::RichText::new("Discovery Engine").color(GOLD));
            ui.add_space(4.0);
            if selection.discovering {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Gleaning local data...");
                });
            } else if pool.active_count() > 0 {
                egui::ScrollArea::vertical()
                    .max_height(320.0)
                    .show(ui, |ui| {
                        for index in 0..pool.active_count() {
                            let Some(business) = pool.resolve(index) else {
                                continue;
                            };
                            ui.label(
                                egui::RichText::new(&business.category)
                                    .size(9.0)
                                    .color(GOLD),
                            );
                            ui.label(egui::RichText::new(&business.name).size(11.0));
                            ui.add_space(3.0);
                        }
                    });
            } else {
                ui.label(
                    egui::RichText::new("Select a village to discover local institutions.")
                        .size(10.0)
                        .color(DIM)
                        .italics(),
                );
            }

            ui.add_space(8.0);
            ui.separator();
            ui.label(format!("FPS  {fps:.0}"));
        });
}
