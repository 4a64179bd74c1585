//! Standalone demo: a synthetic room scan, a slowly orbiting camera and a stats overlay.

mod overlay;
mod synthetic_scan;

use bevy::prelude::*;

use overlay::{create_overlay, handle_effect_keys, update_overlay_text};
use synthetic_scan::start_synthetic_scan;

const ORBIT_RADIUS: f32 = 6.5;
const ORBIT_HEIGHT: f32 = 3.0;
const ORBIT_SPEED: f32 = 0.15;

pub struct DemoPlugin;

impl Plugin for DemoPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(Color::BLACK))
            .add_systems(Startup, (setup_scene, create_overlay, start_synthetic_scan))
            .add_systems(
                Update,
                (handle_effect_keys, orbit_camera, update_overlay_text),
            );
    }
}

#[derive(Component)]
struct OrbitCamera;

fn setup_scene(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(ORBIT_RADIUS, ORBIT_HEIGHT, 0.0).looking_at(Vec3::Y, Vec3::Y),
        OrbitCamera,
    ));
    commands.spawn((
        DirectionalLight::default(),
        Transform::from_xyz(2.0, 6.0, 3.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

fn orbit_camera(time: Res<Time>, mut cameras: Query<&mut Transform, With<OrbitCamera>>) {
    let angle = time.elapsed_secs() * ORBIT_SPEED;
    for mut transform in &mut cameras {
        *transform = Transform::from_xyz(
            angle.cos() * ORBIT_RADIUS,
            ORBIT_HEIGHT,
            angle.sin() * ORBIT_RADIUS,
        )
        .looking_at(Vec3::Y, Vec3::Y);
    }
}
