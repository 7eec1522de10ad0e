//! Selection and hover flow: highlight recompute, camera focus, discovery.

use std::collections::HashMap;

use bevy::prelude::*;

use crate::camera::CameraTarget;
use crate::data::villages::village_by_id;
use crate::data::{Business, DiscoveryChannel, DiscoveryRequest};
use crate::scene::instances::{BusinessSlot, InstancePool};
use crate::scene::markers::MarkerRegistry;

/// Engine-level selection state; the single source of truth the panels and
/// the highlight recompute read.
#[derive(Resource, Default)]
pub struct SelectionState {
    pub selected: Option<&'static str>,
    pub hovered: Option<&'static str>,
    pub discovering: bool,
    pub picked_business: Option<Business>,
}

/// Inward request to change (or clear) the selected village.
#[derive(Event, Clone, Debug, PartialEq, Eq)]
pub struct SelectRequest(pub Option<&'static str>);

/// Outward event: a village marker was clicked.
#[derive(Event, Clone, Debug, PartialEq, Eq)]
pub struct LocationPicked(pub &'static str);

/// Outward event: a business instance was clicked.
#[derive(Event, Clone, Debug)]
pub struct BusinessPicked(pub Business);

pub fn selection_plugin(app: &mut App) {
    app.init_resource::<SelectionState>()
        .add_event::<SelectRequest>()
        .add_event::<LocationPicked>()
        .add_event::<BusinessPicked>()
        .add_systems(Update, (apply_selection, ingest_discoveries).chain());
}

/// Applies selection requests: recomputes marker highlight for the old and
/// new ids, clears the instance pool, points the camera, and issues the
/// discovery lookup tagged with the new id. Re-selecting the current id is
/// a no-op so repeated requests cause no duplicate transitions.
#[allow(clippy::too_many_arguments)]
pub fn apply_selection(
    mut requests: EventReader<SelectRequest>,
    mut selection: ResMut<SelectionState>,
    mut registry: ResMut<MarkerRegistry>,
    mut materials_res: ResMut<Assets<StandardMaterial>>,
    mut pool: ResMut<InstancePool>,
    mut camera_target: ResMut<CameraTarget>,
    channel: Res<DiscoveryChannel>,
    mut slots: Query<&mut Visibility, With<BusinessSlot>>,
) {
    for request in requests.read() {
        let id = request.0;
        if selection.selected == id {
            continue;
        }
        selection.selected = id;
        selection.picked_business = None;

        registry.recompute(selection.hovered, selection.selected, &mut materials_res);

        // The active batch is replaced wholesale on every transition; until
        // a fresh batch lands the pool contributes nothing.
        pool.clear();
        for mut visibility in &mut slots {
            *visibility = Visibility::Hidden;
        }

        match id.and_then(village_by_id) {
            Some(village) => {
                camera_target.focus(village.coordinates);
                selection.discovering = true;
                let lookup = DiscoveryRequest {
                    village_id: village.id,
                    village_name: village.name,
                };
                if channel.requests.send(lookup).is_err() {
                    warn!("discovery worker unavailable for {}", village.name);
                    selection.discovering = false;
                }
            }
            None => {
                camera_target.clear();
                selection.discovering = false;
            }
        }
    }
}

/// Drains discovery results, discarding any batch whose village is no
/// longer the active selection, and lays the surviving batch out around
/// its village.
pub fn ingest_discoveries(
    channel: Res<DiscoveryChannel>,
    mut selection: ResMut<SelectionState>,
    mut pool: ResMut<InstancePool>,
    mut slots: Query<(Entity, &BusinessSlot, &mut Transform, &mut Visibility)>,
) {
    while let Ok(batch) = channel.results.try_recv() {
        if selection.selected != Some(batch.village_id) {
            // Stale: the user moved on while the lookup was in flight.
            debug!("discarding stale discovery for {}", batch.village_id);
            continue;
        }
        selection.discovering = false;

        let Some(village) = village_by_id(batch.village_id) else {
            continue;
        };
        let placements: HashMap<Entity, Transform> = pool
            .repopulate(batch.businesses, village.coordinates)
            .into_iter()
            .collect();
        info!(
            "{} businesses placed around {}",
            pool.active_count(),
            village.name
        );

        for (entity, slot, mut transform, mut visibility) in &mut slots {
            if slot.index < pool.active_count() {
                if let Some(placed) = placements.get(&entity) {
                    *transform = *placed;
                }
                *visibility = Visibility::Visible;
            } else {
                *visibility = Visibility::Hidden;
            }
        }
    }
}
