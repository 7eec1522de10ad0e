//! Fixed-capacity instance pool for business points around a selection.

use std::f32::consts::TAU;

use bevy::prelude::*;

use crate::data::Business;
use crate::picking::PickBounds;
use crate::scene::materials;

/// Default slot capacity; overridable through [`PoolCapacity`].
pub const DEFAULT_CAPACITY: usize = 500;

const RADIUS_MIN: f32 = 3.5;
const RADIUS_SPAN: f32 = 5.0;
const VERTICAL_OFFSET: f32 = 1.2;
const CUBE_SIZE: f32 = 0.4;

/// Capacity bound for the instance pool, set before scene construction.
#[derive(Resource)]
pub struct PoolCapacity(pub usize);

impl Default for PoolCapacity {
    fn default() -> Self {
        Self(DEFAULT_CAPACITY)
    }
}

/// Slot index into the pool; fixed for the process lifetime.
#[derive(Component)]
pub struct BusinessSlot {
    pub index: usize,
}

/// Fixed-capacity pool of pre-spawned cubes sharing one mesh and material
/// handle, so the active slots collapse into a single instanced draw.
/// Slots at or past `active_count` are inert: hidden, unpickable, and free
/// to keep stale transforms from an earlier batch.
#[derive(Resource)]
pub struct InstancePool {
    slots: Vec<Entity>,
    active_count: usize,
    batch: Vec<Business>,
}

impl InstancePool {
    pub fn new(slots: Vec<Entity>) -> Self {
        Self {
            slots,
            active_count: 0,
            batch: Vec::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn active_count(&self) -> usize {
        self.active_count
    }

    pub fn slots(&self) -> &[Entity] {
        &self.slots
    }

    /// Positional resolution into the most recent batch. Refused for inert
    /// slots: identity does not survive a repopulate.
    pub fn resolve(&self, slot_index: usize) -> Option<&Business> {
        if slot_index < self.active_count {
            self.batch.get(slot_index)
        } else {
            None
        }
    }

    /// Replaces the live batch wholesale, truncating to capacity, and
    /// returns the transform each now-active slot should take. Layout is a
    /// ring around the anchor with jittered radius; the jitter is fresh on
    /// every call, so repeated repopulates land differently on purpose.
    pub fn repopulate(&mut self, batch: Vec<Business>, anchor: Vec3) -> Vec<(Entity, Transform)> {
        self.active_count = batch.len().min(self.capacity());
        self.batch = batch;
        (0..self.active_count)
            .map(|i| (self.slots[i], slot_transform(i, self.active_count, anchor)))
            .collect()
    }

    /// Empties the pool; slot memory is left as-is behind the fence.
    pub fn clear(&mut self) {
        self.active_count = 0;
        self.batch.clear();
    }
}

/// Ring placement for slot `index` of `active_count`: evenly spaced angle,
/// radius jittered within a fixed band, lifted above the anchor, with an
/// arbitrary tumble for visual variety.
pub fn slot_transform(index: usize, active_count: usize, anchor: Vec3) -> Transform {
    let angle = index as f32 / active_count as f32 * TAU;
    let radius = RADIUS_MIN + fastrand::f32() * RADIUS_SPAN;
    let offset = Vec3::new(
        angle.cos() * radius,
        VERTICAL_OFFSET,
        angle.sin() * radius,
    );
    Transform::from_translation(anchor + offset).with_rotation(Quat::from_euler(
        EulerRot::XYZ,
        fastrand::f32(),
        fastrand::f32(),
        fastrand::f32(),
    ))
}

/// Pre-spawns the whole pool hidden; nothing is ever spawned or despawned
/// for it again.
pub fn spawn_instance_pool(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials_res: &mut Assets<StandardMaterial>,
    capacity: usize,
) -> InstancePool {
    let mesh = meshes.add(Cuboid::new(CUBE_SIZE, CUBE_SIZE, CUBE_SIZE));
    let material = materials::instance_material(materials_res);

    let slots = (0..capacity)
        .map(|index| {
            commands
                .spawn((
                    BusinessSlot { index },
                    Mesh3d(mesh.clone()),
                    MeshMaterial3d(material.clone()),
                    Transform::default(),
                    Visibility::Hidden,
                    PickBounds {
                        half_extents: Vec3::splat(CUBE_SIZE / 2.0),
                    },
                ))
                .id()
        })
        .collect();

    InstancePool::new(slots)
}
