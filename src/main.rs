// disable console on windows for release builds
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use bevy::DefaultPlugins;
use bevy::prelude::*;
use bevy::window::{PresentMode, WindowResolution};
use vfx_toolkit::VfxToolkitPlugin;
use vfx_toolkit::demo::DemoPlugin;

fn main() {
    App::new()
        .insert_resource(ClearColor(Color::linear_rgb(0.05, 0.05, 0.07)))
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "VFX Toolkit".into(),
                resolution: WindowResolution::new(1500, 900),
                present_mode: PresentMode::AutoVsync,
                ..default()
            }),
            ..default()
        }))
        .add_plugins((VfxToolkitPlugin, DemoPlugin))
        .run();
}
