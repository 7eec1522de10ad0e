pub(crate) mod instances;
pub(crate) mod labels;
pub(crate) mod markers;
pub(crate) mod materials;
pub(crate) mod selection;
pub(crate) mod terrain;

use std::f32::consts::PI;

use bevy::core_pipeline::bloom::Bloom;
use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::pbr::{DirectionalLightShadowMap, DistanceFog, FogFalloff};
use bevy::prelude::*;

use crate::camera::OrbitCamera;

pub use instances::{
    spawn_instance_pool, BusinessSlot, InstancePool, PoolCapacity, DEFAULT_CAPACITY,
};
pub use labels::{project_labels_system, VillageLabel};
pub use markers::{
    halo_ring_system, Highlight, MarkerPart, MarkerRegistry, VillageMarker,
};
pub use selection::{
    apply_selection, ingest_discoveries, selection_plugin, BusinessPicked, LocationPicked,
    SelectRequest, SelectionState,
};
pub use terrain::{island_bob_system, IslandRoot};

const CAMERA_START: Vec3 = Vec3::new(60.0, 50.0, 70.0);

/// Builds the whole scene graph: camera with its post chain, the four
/// lights, the island, one marker per village, the instance pool, and the
/// label overlay. Everything here is constructed exactly once.
pub fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials_res: ResMut<Assets<StandardMaterial>>,
    capacity: Option<Res<PoolCapacity>>,
) {
    commands.spawn((
        Camera3d::default(),
        Camera {
            hdr: true,
            ..default()
        },
        Projection::Perspective(PerspectiveProjection {
            fov: 50_f32.to_radians(),
            near: 0.1,
            far: 1000.0,
            ..default()
        }),
        Transform::from_translation(CAMERA_START).looking_at(Vec3::ZERO, Vec3::Y),
        Tonemapping::TonyMcMapface,
        Bloom {
            intensity: 0.25,
            ..Bloom::NATURAL
        },
        DistanceFog {
            color: materials::BACKDROP,
            falloff: FogFalloff::Linear {
                start: 40.0,
                end: 180.0,
            },
            ..default()
        },
        OrbitCamera::from_position(CAMERA_START, Vec3::ZERO),
    ));

    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 80.0,
    });
    commands.insert_resource(DirectionalLightShadowMap { size: 2048 });
    commands.spawn((
        DirectionalLight {
            illuminance: 2_500.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(20.0, 50.0, 20.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    // Gold spot over the capital island center.
    commands.spawn((
        SpotLight {
            color: materials::GOLD,
            intensity: 5_000_000.0,
            range: 150.0,
            outer_angle: PI / 6.0,
            inner_angle: PI / 12.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(0.0, 40.0, 0.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    // Localized gold glow off to the west.
    commands.spawn((
        PointLight {
            color: materials::GOLD,
            intensity: 300_000.0,
            range: 100.0,
            ..default()
        },
        Transform::from_xyz(-10.0, 15.0, 10.0),
    ));

    let island = terrain::spawn_island(&mut commands, &mut meshes, &mut materials_res);
    let registry = markers::spawn_markers(&mut commands, &mut meshes, &mut materials_res, island);
    commands.insert_resource(registry);

    let capacity = capacity.map(|c| c.0).unwrap_or(DEFAULT_CAPACITY);
    let pool = spawn_instance_pool(&mut commands, &mut meshes, &mut materials_res, capacity);
    commands.insert_resource(pool);

    labels::spawn_labels(&mut commands);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::villages::VILLAGES;

    #[test]
    fn setup_scene_builds_the_full_graph() {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()));
        app.init_asset::<Mesh>();
        app.init_asset::<StandardMaterial>();
        app.insert_resource(PoolCapacity(16));
        app.add_systems(Startup, setup_scene);

        app.update();

        let registry = app.world().resource::<MarkerRegistry>();
        assert_eq!(registry.len(), VILLAGES.len());
        assert_eq!(app.world().resource::<InstancePool>().capacity(), 16);

        let world = app.world_mut();
        let cameras = world.query::<&Camera3d>().iter(world).count();
        assert_eq!(cameras, 1);
        let islands = world.query::<&IslandRoot>().iter(world).count();
        assert_eq!(islands, 1);
        let labels = world.query::<&VillageLabel>().iter(world).count();
        assert_eq!(labels, VILLAGES.len());
        let slots = world.query::<&BusinessSlot>().iter(world).count();
        assert_eq!(slots, 16);
    }
}
