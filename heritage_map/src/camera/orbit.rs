//! Damped orbit navigation plus selection focus interpolation.

use std::f32::consts::{FRAC_PI_2, PI};

use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy_egui::EguiContexts;

pub const MIN_DISTANCE: f32 = 20.0;
pub const MAX_DISTANCE: f32 = 220.0;

// Horizon clamp: polar angle never exceeds PI / 2.15, so the camera can
// never swing under the island.
const MAX_POLAR_ANGLE: f32 = PI / 2.15;
const MIN_PITCH: f32 = FRAC_PI_2 - MAX_POLAR_ANGLE;
const MAX_PITCH: f32 = 1.5;

const ROTATE_SENSITIVITY: f32 = 0.005;
const ZOOM_SENSITIVITY: f32 = 0.1;
const PIXELS_PER_LINE: f32 = 50.0;
const DAMPING: f32 = 8.0;

const FOCUS_OFFSET: Vec3 = Vec3::new(30.0, 25.0, 30.0);
const TARGET_APPROACH: f32 = 0.1;
const POSITION_APPROACH: f32 = 0.05;
const SETTLE_EPSILON: f32 = 0.05;

/// Orbit rig for the main camera: a focus point plus spherical offset,
/// with damped targets so drag and zoom ease instead of snapping.
#[derive(Component)]
pub struct OrbitCamera {
    pub focus: Vec3,
    pub radius: f32,
    pub yaw: f32,
    pub pitch: f32,
    target_radius: f32,
    target_yaw: f32,
    target_pitch: f32,
}

impl OrbitCamera {
    /// Derives the rig from an initial camera position and focus point.
    pub fn from_position(position: Vec3, focus: Vec3) -> Self {
        let offset = position - focus;
        let radius = offset.length().max(f32::EPSILON);
        let yaw = offset.z.atan2(offset.x);
        let pitch = (offset.y / radius).asin();
        Self {
            focus,
            radius,
            yaw,
            pitch,
            target_radius: radius,
            target_yaw: yaw,
            target_pitch: pitch,
        }
    }

    /// Camera world position implied by the current rig state.
    pub fn position(&self) -> Vec3 {
        self.focus
            + self.radius
                * Vec3::new(
                    self.pitch.cos() * self.yaw.cos(),
                    self.pitch.sin(),
                    self.pitch.cos() * self.yaw.sin(),
                )
    }

    fn clamp_targets(&mut self) {
        self.target_radius = self.target_radius.clamp(MIN_DISTANCE, MAX_DISTANCE);
        self.target_pitch = self.target_pitch.clamp(MIN_PITCH, MAX_PITCH);
    }

    /// Re-derives all spherical state from an explicit camera position,
    /// used while focus interpolation drives the rig directly.
    fn set_from_position(&mut self, position: Vec3) {
        let derived = Self::from_position(position, self.focus);
        self.radius = derived.radius;
        self.yaw = derived.yaw;
        self.pitch = derived.pitch;
        self.target_radius = derived.radius;
        self.target_yaw = derived.yaw;
        self.target_pitch = derived.pitch;
    }
}

/// Pending focus destination, set on selection change and cleared once the
/// rig has settled (or a new destination interrupts).
#[derive(Resource, Default)]
pub struct CameraTarget {
    destination: Option<Vec3>,
}

impl CameraTarget {
    pub fn focus(&mut self, point: Vec3) {
        self.destination = Some(point);
    }

    pub fn clear(&mut self) {
        self.destination = None;
    }

    pub fn destination(&self) -> Option<Vec3> {
        self.destination
    }
}

/// One exponential-decay step: move `fraction` of the remaining distance.
/// Residual distance strictly decreases and never overshoots the target.
pub fn approach(current: Vec3, target: Vec3, fraction: f32) -> Vec3 {
    current.lerp(target, fraction)
}

pub fn orbit_camera_plugin(app: &mut App) {
    app.init_resource::<CameraTarget>().add_systems(
        Update,
        (orbit_input_system, focus_interpolation_system, sync_camera_system).chain(),
    );
}

/// Pointer-drag rotation and scroll zoom, feeding the damped targets.
/// Input over an egui panel belongs to the panel, not the rig.
fn orbit_input_system(
    mut contexts: EguiContexts,
    buttons: Res<ButtonInput<MouseButton>>,
    mut motion: EventReader<MouseMotion>,
    mut wheel: EventReader<MouseWheel>,
    mut rigs: Query<&mut OrbitCamera>,
) {
    let pointer_captured = contexts.ctx_mut().is_pointer_over_area();

    let mut rotation = Vec2::ZERO;
    if buttons.pressed(MouseButton::Left) && !pointer_captured {
        for event in motion.read() {
            rotation += event.delta;
        }
    } else {
        motion.clear();
    }

    let mut scroll = 0.0;
    for event in wheel.read() {
        scroll += match event.unit {
            MouseScrollUnit::Line => event.y,
            MouseScrollUnit::Pixel => event.y / PIXELS_PER_LINE,
        };
    }
    if pointer_captured {
        scroll = 0.0;
    }

    for mut rig in &mut rigs {
        rig.target_yaw += rotation.x * ROTATE_SENSITIVITY;
        rig.target_pitch += rotation.y * ROTATE_SENSITIVITY;
        rig.target_radius *= 1.0 - scroll * ZOOM_SENSITIVITY;
        rig.clamp_targets();
    }
}

/// While a destination is pending, nudges the focus point 10% and the
/// camera position 5% of the remaining distance per frame, then clears the
/// destination once both residuals are negligible.
fn focus_interpolation_system(
    mut target: ResMut<CameraTarget>,
    mut rigs: Query<&mut OrbitCamera>,
) {
    let Some(destination) = target.destination else {
        return;
    };

    let mut settled = true;
    for mut rig in &mut rigs {
        rig.focus = approach(rig.focus, destination, TARGET_APPROACH);

        let desired = destination + FOCUS_OFFSET;
        let position = approach(rig.position(), desired, POSITION_APPROACH);
        rig.set_from_position(position);
        rig.clamp_targets();

        if rig.focus.distance(destination) > SETTLE_EPSILON
            || position.distance(desired) > SETTLE_EPSILON
        {
            settled = false;
        }
    }
    if settled {
        target.clear();
    }
}

/// Eases the live spherical state toward its targets and writes the camera
/// transform.
fn sync_camera_system(
    time: Res<Time>,
    mut rigs: Query<(&mut OrbitCamera, &mut Transform)>,
) {
    let ease = 1.0 - (-DAMPING * time.delta_secs()).exp();
    for (mut rig, mut transform) in &mut rigs {
        rig.yaw += (rig.target_yaw - rig.yaw) * ease;
        rig.pitch += (rig.target_pitch - rig.pitch) * ease;
        rig.radius += (rig.target_radius - rig.radius) * ease;

        let focus = rig.focus;
        *transform = Transform::from_translation(rig.position()).looking_at(focus, Vec3::Y);
    }
}
