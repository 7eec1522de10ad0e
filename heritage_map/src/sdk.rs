//! SDK entry points and builder for composing the heritage map app.

use bevy::pbr::wireframe::WireframePlugin;
use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use crate::camera::orbit_camera_plugin;
use crate::config;
use crate::data::DiscoveryChannel;
use crate::picking::picking_plugin;
use crate::scene::{
    halo_ring_system, island_bob_system, project_labels_system, selection_plugin, setup_scene,
    PoolCapacity, DEFAULT_CAPACITY,
};
use crate::ui::{hud_plugin, inspector_plugin};

/// Builder for constructing a heritage map app with customizable plugins.
pub struct HeritageMapBuilder {
    discovery: Option<DiscoveryChannel>,
    window_title: String,
    window_resolution: (f32, f32),
    clear_color: Color,
    pool_capacity: usize,
    enable_orbit_camera: bool,
    enable_hud: bool,
    enable_inspector: bool,
}

impl Default for HeritageMapBuilder {
    fn default() -> Self {
        Self {
            discovery: None,
            window_title: "Lefatshe".to_string(),
            window_resolution: (1280.0, 720.0),
            clear_color: crate::scene::materials::BACKDROP,
            pool_capacity: DEFAULT_CAPACITY,
            enable_orbit_camera: true,
            enable_hud: true,
            enable_inspector: true,
        }
    }
}

impl HeritageMapBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an explicit discovery channel instead of the env-derived one.
    pub fn discovery(mut self, channel: DiscoveryChannel) -> Self {
        self.discovery = Some(channel);
        self
    }

    pub fn window_title(mut self, title: impl Into<String>) -> Self {
        self.window_title = title.into();
        self
    }

    pub fn window_resolution(mut self, width: f32, height: f32) -> Self {
        self.window_resolution = (width, height);
        self
    }

    pub fn clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }

    /// Capacity bound for the business instance pool.
    pub fn pool_capacity(mut self, capacity: usize) -> Self {
        self.pool_capacity = capacity;
        self
    }

    pub fn disable_orbit_camera(mut self) -> Self {
        self.enable_orbit_camera = false;
        self
    }

    pub fn disable_hud(mut self) -> Self {
        self.enable_hud = false;
        self
    }

    pub fn disable_inspector(mut self) -> Self {
        self.enable_inspector = false;
        self
    }

    /// Build the Bevy app with the selected configuration and plugins.
    /// Fails loudly (panics inside bevy) if no rendering context can be
    /// created; a map without a GPU has nothing to degrade to.
    pub fn build(self) -> App {
        let channel = self.discovery.unwrap_or_else(config::discovery_channel);

        let mut app = App::new();
        app.add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: self.window_title,
                resolution: self.window_resolution.into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(WireframePlugin)
        // Shared by the picking guard and the panels.
        .add_plugins(EguiPlugin)
        .insert_resource(ClearColor(self.clear_color))
        .insert_resource(PoolCapacity(self.pool_capacity))
        .insert_resource(channel)
        .add_systems(Startup, setup_scene)
        .add_systems(
            Update,
            (island_bob_system, halo_ring_system, project_labels_system),
        )
        .add_plugins(selection_plugin)
        .add_plugins(picking_plugin);

        if self.enable_orbit_camera {
            app.add_plugins(orbit_camera_plugin);
        }
        if self.enable_hud {
            app.add_plugins(hud_plugin);
        }
        if self.enable_inspector {
            app.add_plugins(inspector_plugin);
        }

        app
    }
}
