mod orbit;

pub use orbit::{
    approach, orbit_camera_plugin, CameraTarget, OrbitCamera, MAX_DISTANCE, MIN_DISTANCE,
};
