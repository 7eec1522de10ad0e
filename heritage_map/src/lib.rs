//! Heritage map — interactive 3D map of the Royal Bafokeng Nation.
//!
//! Library root: data, scene, camera, picking, and UI modules.

mod camera;
pub mod config;
pub mod data;
pub mod picking;
pub mod scene;
mod ui;

pub mod prelude;
pub mod sdk;

pub use camera::{orbit_camera_plugin, CameraTarget, OrbitCamera};
pub use data::{
    init_disabled_channel, init_discovery_channel, init_fixture_channel, Business, DiscoveryBatch,
    DiscoveryChannel, DiscoveryRequest, Village,
};
pub use scene::{
    setup_scene, BusinessPicked, Highlight, InstancePool, LocationPicked, MarkerRegistry,
    PoolCapacity, SelectRequest, SelectionState,
};
