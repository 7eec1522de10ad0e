//! Village markers: pin/head/halo hierarchy, highlight state, ring motion.

use std::collections::HashMap;
use std::f32::consts::PI;

use bevy::prelude::*;

use crate::data::villages::VILLAGES;
use crate::picking::PickBounds;
use crate::scene::materials::{self, gold_emissive};

/// Visual emphasis level of a marker. Always recomputed from the current
/// (hover, selection) pair, never stored as independent truth.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Highlight {
    #[default]
    Normal,
    Hovered,
    Selected,
}

/// Emissive intensity for each emphasis level.
pub fn highlight_intensity(highlight: Highlight) -> f32 {
    match highlight {
        Highlight::Normal => 0.4,
        Highlight::Hovered => 2.0,
        Highlight::Selected => 6.0,
    }
}

/// Marker root, one per village, alive for the process lifetime.
#[derive(Component)]
pub struct VillageMarker {
    pub village_id: &'static str,
}

/// Back-reference from a pickable sub-part to its owning village. A flat
/// part → owner map; hit resolution never walks the hierarchy.
#[derive(Component)]
pub struct MarkerPart {
    pub village_id: &'static str,
}

/// Spinning, pulsing halo ring at a marker's base.
#[derive(Component)]
pub struct HaloRing;

/// Per-village marker bookkeeping: entities plus the material handles the
/// highlight recompute writes through.
pub struct MarkerEntry {
    pub root: Entity,
    pub body_material: Handle<StandardMaterial>,
    pub ring_material: Handle<StandardMaterial>,
    pub highlight: Highlight,
}

/// O(1) village-id lookup over the marker set.
#[derive(Resource, Default)]
pub struct MarkerRegistry {
    entries: HashMap<&'static str, MarkerEntry>,
}

impl MarkerRegistry {
    pub fn get(&self, village_id: &str) -> Option<&MarkerEntry> {
        self.entries.get(village_id)
    }

    pub fn all(&self) -> impl Iterator<Item = (&'static str, &MarkerEntry)> {
        self.entries.iter().map(|(id, entry)| (*id, entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of markers currently at `Selected`; the invariant is ≤ 1.
    pub fn selected_count(&self) -> usize {
        self.entries
            .values()
            .filter(|e| e.highlight == Highlight::Selected)
            .count()
    }

    /// Recomputes every marker's highlight from the current hover and
    /// selection ids, writing emissive intensity only where the level
    /// actually changed.
    pub fn recompute(
        &mut self,
        hovered: Option<&str>,
        selected: Option<&str>,
        materials_res: &mut Assets<StandardMaterial>,
    ) {
        for (&id, entry) in self.entries.iter_mut() {
            let highlight = if selected == Some(id) {
                Highlight::Selected
            } else if hovered == Some(id) {
                Highlight::Hovered
            } else {
                Highlight::Normal
            };
            if entry.highlight == highlight {
                continue;
            }
            entry.highlight = highlight;

            let emissive = gold_emissive(highlight_intensity(highlight));
            for handle in [&entry.body_material, &entry.ring_material] {
                if let Some(material) = materials_res.get_mut(handle) {
                    material.emissive = emissive;
                }
            }
        }
    }
}

/// Builds one marker hierarchy per village under the island root: an
/// inverted pin cone, a head sphere, and a flat halo ring, all sharing the
/// village's gold material so highlight writes hit every sub-part at once.
pub fn spawn_markers(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials_res: &mut Assets<StandardMaterial>,
    island: Entity,
) -> MarkerRegistry {
    let pin_mesh = meshes.add(Cone {
        radius: 0.3,
        height: 1.8,
    });
    let head_mesh = meshes.add(Sphere::new(0.5));
    let ring_mesh = meshes.add(Torus {
        minor_radius: 0.03,
        major_radius: 1.0,
    });

    let mut registry = MarkerRegistry::default();
    for village in VILLAGES {
        let body_material = materials::marker_material(
            materials_res,
            highlight_intensity(Highlight::Normal),
        );
        let ring_material = materials::ring_material(materials_res, 0.3);

        let root = commands
            .spawn((
                VillageMarker {
                    village_id: village.id,
                },
                Transform::from_translation(village.coordinates),
                Visibility::default(),
            ))
            .with_children(|marker| {
                marker.spawn((
                    MarkerPart {
                        village_id: village.id,
                    },
                    Mesh3d(pin_mesh.clone()),
                    MeshMaterial3d(body_material.clone()),
                    // Apex down: the pin stakes the village coordinates.
                    Transform::from_xyz(0.0, 0.9, 0.0)
                        .with_rotation(Quat::from_rotation_x(PI)),
                    PickBounds {
                        half_extents: Vec3::new(0.3, 0.9, 0.3),
                    },
                ));
                marker.spawn((
                    MarkerPart {
                        village_id: village.id,
                    },
                    Mesh3d(head_mesh.clone()),
                    MeshMaterial3d(body_material.clone()),
                    Transform::from_xyz(0.0, 1.8, 0.0),
                    PickBounds {
                        half_extents: Vec3::splat(0.5),
                    },
                ));
                marker.spawn((
                    MarkerPart {
                        village_id: village.id,
                    },
                    HaloRing,
                    Mesh3d(ring_mesh.clone()),
                    MeshMaterial3d(ring_material.clone()),
                    Transform::default(),
                    PickBounds {
                        half_extents: Vec3::new(1.03, 0.05, 1.03),
                    },
                ));
            })
            .id();
        commands.entity(island).add_child(root);

        registry.entries.insert(
            village.id,
            MarkerEntry {
                root,
                body_material,
                ring_material,
                highlight: Highlight::Normal,
            },
        );
    }
    registry
}

const RING_SPIN_RATE: f32 = 0.6;
const PULSE_FREQUENCY: f32 = 2.0;
const PULSE_AMPLITUDE: f32 = 0.1;

/// Spins every halo ring about its axis and pulses its scale.
pub fn halo_ring_system(time: Res<Time>, mut rings: Query<&mut Transform, With<HaloRing>>) {
    let pulse = 1.0 + (time.elapsed_secs() * PULSE_FREQUENCY).sin() * PULSE_AMPLITUDE;
    let spin = RING_SPIN_RATE * time.delta_secs();
    for mut transform in &mut rings {
        transform.rotate_local_y(spin);
        transform.scale = Vec3::splat(pulse);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use bevy::ecs::system::SystemState;

    fn registry_app() -> (App, MarkerRegistry) {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()));
        app.init_asset::<Mesh>();
        app.init_asset::<StandardMaterial>();

        let world = app.world_mut();
        let island = world.spawn((Transform::default(), Visibility::default())).id();

        let mut state: SystemState<(
            Commands,
            ResMut<Assets<Mesh>>,
            ResMut<Assets<StandardMaterial>>,
        )> = SystemState::new(world);
        let (mut commands, mut meshes, mut materials_res) = state.get_mut(world);
        let registry = spawn_markers(&mut commands, &mut meshes, &mut materials_res, island);
        state.apply(world);
        (app, registry)
    }

    #[test]
    fn one_marker_per_village() {
        let (_app, registry) = registry_app();
        assert_eq!(registry.len(), VILLAGES.len());
        for village in VILLAGES {
            assert!(registry.get(village.id).is_some(), "missing {}", village.id);
        }
    }

    #[test]
    fn at_most_one_marker_selected() {
        let (mut app, mut registry) = registry_app();
        let mut materials_res = app.world_mut().resource_mut::<Assets<StandardMaterial>>();

        registry.recompute(None, Some("phokeng"), &mut materials_res);
        assert_eq!(registry.selected_count(), 1);

        registry.recompute(None, Some("luka"), &mut materials_res);
        assert_eq!(registry.selected_count(), 1);
        assert_eq!(
            registry.get("luka").unwrap().highlight,
            Highlight::Selected
        );
        assert_eq!(
            registry.get("phokeng").unwrap().highlight,
            Highlight::Normal
        );

        registry.recompute(None, None, &mut materials_res);
        assert_eq!(registry.selected_count(), 0);
    }

    #[test]
    fn selection_outranks_hover_on_the_same_marker() {
        let (mut app, mut registry) = registry_app();
        let mut materials_res = app.world_mut().resource_mut::<Assets<StandardMaterial>>();

        registry.recompute(Some("phokeng"), Some("phokeng"), &mut materials_res);
        assert_eq!(
            registry.get("phokeng").unwrap().highlight,
            Highlight::Selected
        );
    }

    #[test]
    fn highlight_writes_marker_emissive() {
        let (mut app, mut registry) = registry_app();
        let mut materials_res = app.world_mut().resource_mut::<Assets<StandardMaterial>>();

        registry.recompute(Some("robega"), None, &mut materials_res);
        let handle = registry.get("robega").unwrap().body_material.clone();
        let material = materials_res.get(&handle).unwrap();
        assert_eq!(
            material.emissive,
            gold_emissive(highlight_intensity(Highlight::Hovered))
        );
    }

    #[test]
    fn intensity_mapping_is_monotonic() {
        assert!(highlight_intensity(Highlight::Normal) < highlight_intensity(Highlight::Hovered));
        assert!(highlight_intensity(Highlight::Hovered) < highlight_intensity(Highlight::Selected));
    }
}
