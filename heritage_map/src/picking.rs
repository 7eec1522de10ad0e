//! Pointer picking: marker-priority ray tests over explicit pick bounds.
//!
//! Uses manual ray-AABB intersection instead of Bevy's mesh picking to
//! avoid input absorption conflicts with bevy_egui, and because every
//! pickable carries explicit bounds anyway.

use bevy::prelude::*;
use bevy::window::{CursorMoved, PrimaryWindow};
use bevy_egui::EguiContexts;

use crate::scene::instances::{BusinessSlot, InstancePool};
use crate::scene::markers::{MarkerPart, MarkerRegistry};
use crate::scene::selection::{BusinessPicked, LocationPicked, SelectionState};

/// World-axis-aligned pick bounds centered on the owning entity.
#[derive(Component)]
pub struct PickBounds {
    pub half_extents: Vec3,
}

/// Resolved pick target, markers always outranking instance slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pick {
    Village(&'static str),
    Slot(usize),
}

pub fn picking_plugin(app: &mut App) {
    app.add_systems(Update, (hover_raycast_system, click_raycast_system));
}

/// Marker priority rule: any marker hit wins regardless of distance, so a
/// click can never tunnel through a marker into the instance field behind
/// it. Only with no marker hit does the nearest active slot resolve.
pub fn resolve_pick(
    marker_hit: Option<(&'static str, f32)>,
    slot_hit: Option<(usize, f32)>,
) -> Option<Pick> {
    if let Some((village_id, _)) = marker_hit {
        return Some(Pick::Village(village_id));
    }
    slot_hit.map(|(index, _)| Pick::Slot(index))
}

/// Slab-method ray/AABB intersection; returns the entry distance.
pub fn ray_aabb_intersect(origin: Vec3, dir: Vec3, aabb_min: Vec3, aabb_max: Vec3) -> Option<f32> {
    let inv_dir = 1.0 / dir;
    let t1 = (aabb_min - origin) * inv_dir;
    let t2 = (aabb_max - origin) * inv_dir;
    let t_min = t1.min(t2);
    let t_max = t1.max(t2);
    let t_enter = t_min.x.max(t_min.y).max(t_min.z);
    let t_exit = t_max.x.min(t_max.y).min(t_max.z);
    if t_enter <= t_exit && t_exit > 0.0 {
        Some(t_enter.max(0.0))
    } else {
        None
    }
}

fn bounds_hit(
    ray_origin: Vec3,
    ray_dir: Vec3,
    transform: &GlobalTransform,
    bounds: &PickBounds,
) -> Option<f32> {
    let center = transform.translation();
    ray_aabb_intersect(
        ray_origin,
        ray_dir,
        center - bounds.half_extents,
        center + bounds.half_extents,
    )
}

fn cursor_ray(
    windows: &Query<&Window, With<PrimaryWindow>>,
    cameras: &Query<(&Camera, &GlobalTransform), With<Camera3d>>,
) -> Option<Ray3d> {
    let window = windows.get_single().ok()?;
    let cursor = window.cursor_position()?;
    let (camera, camera_transform) = cameras.get_single().ok()?;
    camera.viewport_to_world(camera_transform, cursor).ok()
}

fn nearest_marker_hit(
    ray: &Ray3d,
    parts: &Query<(&GlobalTransform, &PickBounds, &MarkerPart)>,
) -> Option<(&'static str, f32)> {
    let origin = ray.origin;
    let dir: Vec3 = *ray.direction;
    let mut best: Option<(&'static str, f32)> = None;
    for (transform, bounds, part) in parts.iter() {
        if let Some(dist) = bounds_hit(origin, dir, transform, bounds) {
            if best.is_none_or(|(_, d)| dist < d) {
                best = Some((part.village_id, dist));
            }
        }
    }
    best
}

fn nearest_slot_hit(
    ray: &Ray3d,
    slots: &Query<(&GlobalTransform, &PickBounds, &BusinessSlot)>,
    active_count: usize,
) -> Option<(usize, f32)> {
    let origin = ray.origin;
    let dir: Vec3 = *ray.direction;
    let mut best: Option<(usize, f32)> = None;
    for (transform, bounds, slot) in slots.iter() {
        // Inert trailing capacity is never tested, stale transforms or not.
        if slot.index >= active_count {
            continue;
        }
        if let Some(dist) = bounds_hit(origin, dir, transform, bounds) {
            if best.is_none_or(|(_, d)| dist < d) {
                best = Some((slot.index, dist));
            }
        }
    }
    best
}

/// Hover runs only on pointer movement, and re-highlights only when the
/// resolved village actually changes; the common miss → miss frame costs
/// one ray test and nothing else.
#[allow(clippy::too_many_arguments)]
fn hover_raycast_system(
    mut cursor_moved: EventReader<CursorMoved>,
    mut contexts: EguiContexts,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    parts: Query<(&GlobalTransform, &PickBounds, &MarkerPart)>,
    mut selection: ResMut<SelectionState>,
    mut registry: ResMut<MarkerRegistry>,
    mut materials_res: ResMut<Assets<StandardMaterial>>,
) {
    if cursor_moved.read().last().is_none() {
        return;
    }

    let hovered = if contexts.ctx_mut().is_pointer_over_area() {
        None
    } else {
        cursor_ray(&windows, &cameras)
            .and_then(|ray| nearest_marker_hit(&ray, &parts))
            .map(|(village_id, _)| village_id)
    };

    if selection.hovered != hovered {
        selection.hovered = hovered;
        registry.recompute(selection.hovered, selection.selected, &mut materials_res);
    }
}

/// Click pass: markers first, then the active instance slots; a miss on
/// both passes changes nothing.
#[allow(clippy::too_many_arguments)]
fn click_raycast_system(
    mouse: Res<ButtonInput<MouseButton>>,
    mut contexts: EguiContexts,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    parts: Query<(&GlobalTransform, &PickBounds, &MarkerPart)>,
    slots: Query<(&GlobalTransform, &PickBounds, &BusinessSlot)>,
    pool: Res<InstancePool>,
    mut locations: EventWriter<LocationPicked>,
    mut businesses: EventWriter<BusinessPicked>,
) {
    if !mouse.just_pressed(MouseButton::Left) {
        return;
    }
    if contexts.ctx_mut().is_pointer_over_area() {
        return;
    }
    let Some(ray) = cursor_ray(&windows, &cameras) else {
        return;
    };

    let marker_hit = nearest_marker_hit(&ray, &parts);
    let slot_hit = nearest_slot_hit(&ray, &slots, pool.active_count());
    match resolve_pick(marker_hit, slot_hit) {
        Some(Pick::Village(village_id)) => {
            locations.send(LocationPicked(village_id));
        }
        Some(Pick::Slot(index)) => {
            if let Some(business) = pool.resolve(index) {
                businesses.send(BusinessPicked(business.clone()));
            }
        }
        None => {}
    }
}
