//! Screen-space village labels projected from marker world positions.

use std::collections::HashMap;

use bevy::prelude::*;

use crate::data::villages::VILLAGES;
use crate::scene::markers::VillageMarker;
use crate::scene::materials;

/// Overlay node tied to one village marker.
#[derive(Component)]
pub struct VillageLabel {
    pub village_id: &'static str,
}

const LABEL_FONT_SIZE: f32 = 11.0;
const LABEL_LIFT_PX: f32 = 26.0;

/// One absolute-positioned text node per village, hidden until the
/// projector places it.
pub fn spawn_labels(commands: &mut Commands) {
    for village in VILLAGES {
        commands.spawn((
            VillageLabel {
                village_id: village.id,
            },
            Text::new(village.name),
            TextFont {
                font_size: LABEL_FONT_SIZE,
                ..default()
            },
            TextColor(materials::GOLD.with_alpha(0.85)),
            Node {
                position_type: PositionType::Absolute,
                ..default()
            },
            Visibility::Hidden,
        ));
    }
}

/// NDC → pixel conversion against the current viewport.
pub fn ndc_to_pixel(ndc: Vec3, viewport: Vec2) -> Vec2 {
    Vec2::new(
        (ndc.x * 0.5 + 0.5) * viewport.x,
        (-ndc.y * 0.5 + 0.5) * viewport.y,
    )
}

/// Depth band test. Bevy's projection is reverse-z: depth 1.0 sits on the
/// near plane and points behind the camera project past it, so a label is
/// visible only while its depth stays in (0, 1].
pub fn depth_visible(ndc_z: f32) -> bool {
    ndc_z > 0.0 && ndc_z <= 1.0
}

/// Each frame, projects every marker's world position (bob included, since
/// markers are children of the island root) into viewport pixels and moves
/// the matching label, hiding it outside the depth band. No label state
/// survives the frame except what this recomputes.
pub fn project_labels_system(
    cameras: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    markers: Query<(&VillageMarker, &GlobalTransform)>,
    mut labels: Query<(&VillageLabel, &mut Node, &mut Visibility)>,
) {
    let Ok((camera, camera_transform)) = cameras.get_single() else {
        return;
    };
    let Some(viewport) = camera.logical_viewport_size() else {
        return;
    };

    let positions: HashMap<&str, Vec3> = markers
        .iter()
        .map(|(marker, transform)| (marker.village_id, transform.translation()))
        .collect();

    for (label, mut node, mut visibility) in &mut labels {
        let Some(world) = positions.get(label.village_id) else {
            continue;
        };
        match camera.world_to_ndc(camera_transform, *world) {
            Some(ndc) if depth_visible(ndc.z) => {
                let pixel = ndc_to_pixel(ndc, viewport);
                node.left = Val::Px(pixel.x);
                node.top = Val::Px(pixel.y - LABEL_LIFT_PX);
                *visibility = Visibility::Visible;
            }
            _ => *visibility = Visibility::Hidden,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ndc_center_maps_to_viewport_center() {
        let center = Vec3::new(0.0, 0.0, 0.5);
        assert_eq!(
            ndc_to_pixel(center, Vec2::new(800.0, 600.0)),
            Vec2::new(400.0, 300.0)
        );
        // A resize re-centers the same point against the new dimensions.
        assert_eq!(
            ndc_to_pixel(center, Vec2::new(1024.0, 768.0)),
            Vec2::new(512.0, 384.0)
        );
    }

    #[test]
    fn ndc_y_is_flipped_into_screen_space() {
        // Top of NDC space is y = +1; in pixels that is row 0.
        let top = ndc_to_pixel(Vec3::new(0.0, 1.0, 0.5), Vec2::new(800.0, 600.0));
        assert_eq!(top.y, 0.0);
        let bottom = ndc_to_pixel(Vec3::new(0.0, -1.0, 0.5), Vec2::new(800.0, 600.0));
        assert_eq!(bottom.y, 600.0);
    }

    #[test]
    fn depth_band_hides_points_behind_the_camera() {
        assert!(depth_visible(0.5));
        assert!(depth_visible(1.0));
        assert!(!depth_visible(1.2));
        assert!(!depth_visible(0.0));
        assert!(!depth_visible(-0.3));
    }
}
