//! Floating-island terrain: deformed grid mesh, wireframe overlay, bob.

use bevy::pbr::wireframe::{Wireframe, WireframeColor};
use bevy::pbr::{NotShadowCaster, NotShadowReceiver};
use bevy::prelude::*;
use bevy::render::mesh::Indices;
use bevy::render::render_asset::RenderAssetUsages;
use bevy::render::render_resource::PrimitiveTopology;

use crate::scene::materials;

pub const ISLAND_SIZE: f32 = 130.0;
const GRID_SEGMENTS: u32 = 200;
const INNER_RADIUS: f32 = 60.0;
const DROPOFF_DEPTH: f32 = -20.0;
const JITTER: f32 = 0.1;

const BOB_FREQUENCY: f32 = 0.5;
const BOB_AMPLITUDE: f32 = 0.4;

/// Root of everything that rides the island bob: the terrain surface, its
/// wireframe overlay, and the village markers parented underneath.
#[derive(Component)]
pub struct IslandRoot;

/// Ripple height inside the island plateau. Two sinusoidal bands at
/// different frequencies give the organic, non-repeating topography.
pub fn ripple_height(x: f32, z: f32) -> f32 {
    (x * 0.1).sin() * (z * 0.1).cos() * 4.0 + (x * 0.3).sin() * (z * 0.3).cos() * 0.8
}

/// Vertex height at a planar offset from the island center: rippled inside
/// the inner radius, a sheer drop outside for the floating-island rim.
pub fn surface_height(x: f32, z: f32) -> f32 {
    let dist = (x * x + z * z).sqrt();
    if dist < INNER_RADIUS {
        ripple_height(x, z) + fastrand::f32() * JITTER
    } else {
        DROPOFF_DEPTH
    }
}

/// Builds the island as a regular grid in the XZ plane, displaced along Y.
/// Static after construction; never regenerated at runtime.
fn island_mesh() -> Mesh {
    let verts_per_side = GRID_SEGMENTS + 1;
    let step = ISLAND_SIZE / GRID_SEGMENTS as f32;
    let half = ISLAND_SIZE / 2.0;

    let mut positions = Vec::with_capacity((verts_per_side * verts_per_side) as usize);
    for j in 0..verts_per_side {
        for i in 0..verts_per_side {
            let x = i as f32 * step - half;
            let z = j as f32 * step - half;
            positions.push([x, surface_height(x, z), z]);
        }
    }

    let mut indices = Vec::with_capacity((GRID_SEGMENTS * GRID_SEGMENTS * 6) as usize);
    for j in 0..GRID_SEGMENTS {
        for i in 0..GRID_SEGMENTS {
            let idx = j * verts_per_side + i;
            // Two upward-facing triangles per cell.
            indices.extend_from_slice(&[idx, idx + verts_per_side, idx + 1]);
            indices.extend_from_slice(&[idx + 1, idx + verts_per_side, idx + verts_per_side + 1]);
        }
    }

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::default(),
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
    .with_inserted_indices(Indices::U32(indices));
    mesh.compute_smooth_normals();
    mesh
}

/// Spawns the island root with its surface and holographic wireframe
/// overlay, returning the root so markers can be parented to it.
pub fn spawn_island(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials_res: &mut Assets<StandardMaterial>,
) -> Entity {
    let mesh = meshes.add(island_mesh());

    commands
        .spawn((IslandRoot, Transform::default(), Visibility::default()))
        .with_children(|island| {
            island.spawn((
                Mesh3d(mesh.clone()),
                MeshMaterial3d(materials::terrain_material(materials_res)),
                Transform::default(),
            ));
            // Wireframe copy floats a hair above the surface so the lines
            // never z-fight with the solid mesh.
            island.spawn((
                Mesh3d(mesh),
                MeshMaterial3d(materials::overlay_material(materials_res)),
                Transform::from_xyz(0.0, 0.05, 0.0),
                Wireframe,
                WireframeColor {
                    color: materials::GOLD.with_alpha(0.15),
                },
                NotShadowCaster,
                NotShadowReceiver,
            ));
        })
        .id()
}

/// Gentle vertical bob applied to the whole island group each frame.
/// Markers are children of the root, so they ride along for free.
pub fn island_bob_system(time: Res<Time>, mut roots: Query<&mut Transform, With<IslandRoot>>) {
    let bob = (time.elapsed_secs() * BOB_FREQUENCY).sin() * BOB_AMPLITUDE;
    for mut transform in &mut roots {
        transform.translation.y = bob;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ripples_stay_inside_amplitude_bounds() {
        for i in 0..200 {
            for j in 0..200 {
                let x = i as f32 * 0.3 - 30.0;
                let z = j as f32 * 0.3 - 30.0;
                let h = ripple_height(x, z);
                assert!(h.abs() <= 4.8 + f32::EPSILON, "ripple {h} out of range");
            }
        }
    }

    #[test]
    fn rim_drops_off_sharply() {
        assert_eq!(surface_height(INNER_RADIUS + 1.0, 0.0), DROPOFF_DEPTH);
        assert_eq!(surface_height(0.0, -(INNER_RADIUS + 5.0)), DROPOFF_DEPTH);
    }

    #[test]
    fn plateau_height_is_bounded_despite_jitter() {
        for _ in 0..100 {
            let h = surface_height(10.0, -20.0);
            let base = ripple_height(10.0, -20.0);
            assert!(h >= base && h <= base + JITTER);
        }
    }

    #[test]
    fn island_mesh_is_a_full_grid() {
        let mesh = island_mesh();
        let verts = (GRID_SEGMENTS + 1) * (GRID_SEGMENTS + 1);
        assert_eq!(mesh.count_vertices(), verts as usize);
        let Some(Indices::U32(indices)) = mesh.indices() else {
            panic!("expected u32 indices");
        };
        assert_eq!(indices.len() as u32, GRID_SEGMENTS * GRID_SEGMENTS * 6);
    }
}
