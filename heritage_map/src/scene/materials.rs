//! Shared material and color helpers for terrain, markers, and instances.

use bevy::prelude::*;

/// Royal gold (#D4AF37), the accent color of the whole map.
pub const GOLD: Color = Color::srgb(0.831, 0.686, 0.216);

/// Night-sky backdrop (#05080a) shared by clear color and fog.
pub const BACKDROP: Color = Color::srgb(0.020, 0.031, 0.039);

/// Instance-pool cyan.
pub const CYAN: Color = Color::srgb(0.0, 1.0, 1.0);

/// Gold emissive term for a given marker intensity level.
pub fn gold_emissive(intensity: f32) -> LinearRgba {
    GOLD.to_linear() * intensity
}

/// Polished gold body shared by a marker's pin and head.
pub fn marker_material(
    materials: &mut Assets<StandardMaterial>,
    intensity: f32,
) -> Handle<StandardMaterial> {
    materials.add(StandardMaterial {
        base_color: GOLD,
        emissive: gold_emissive(intensity),
        perceptual_roughness: 0.1,
        metallic: 0.9,
        ..default()
    })
}

/// Translucent halo ring.
pub fn ring_material(
    materials: &mut Assets<StandardMaterial>,
    intensity: f32,
) -> Handle<StandardMaterial> {
    materials.add(StandardMaterial {
        base_color: GOLD.with_alpha(0.3),
        emissive: gold_emissive(intensity),
        metallic: 1.0,
        alpha_mode: AlphaMode::Blend,
        ..default()
    })
}

/// Velvet charcoal island surface.
pub fn terrain_material(materials: &mut Assets<StandardMaterial>) -> Handle<StandardMaterial> {
    materials.add(StandardMaterial {
        base_color: Color::srgb(0.039, 0.059, 0.071),
        perceptual_roughness: 0.9,
        metallic: 0.1,
        ..default()
    })
}

/// Invisible base for the wireframe overlay; only the wire lines render.
pub fn overlay_material(materials: &mut Assets<StandardMaterial>) -> Handle<StandardMaterial> {
    materials.add(StandardMaterial {
        base_color: Color::NONE,
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    })
}

/// Emissive cyan cube shared by every instance-pool slot.
pub fn instance_material(materials: &mut Assets<StandardMaterial>) -> Handle<StandardMaterial> {
    materials.add(StandardMaterial {
        base_color: CYAN,
        emissive: CYAN.to_linear() * 1.5,
        ..default()
    })
}
