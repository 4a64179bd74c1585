use bevy::prelude::*;
use constants::effect::COLOR_PRESETS;
use surface_rain_engine::engine::classification::SurfaceType;
use surface_rain_engine::engine::params::EffectParameters;
use surface_rain_engine::engine::systems::SceneDiagnostics;

const PRESET_KEYS: [KeyCode; 5] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
];

const DENSITY_STEP: f32 = 0.25;

#[derive(Component)]
pub struct DiagnosticsText;

pub fn create_overlay(mut commands: Commands) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(0.7, 1.0, 0.8)),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(12.0),
                    left: Val::Px(12.0),
                    ..default()
                },
                DiagnosticsText,
            ));
        });
}

pub fn update_overlay_text(
    diagnostics: Res<SceneDiagnostics>,
    parameters: Res<EffectParameters>,
    mut query: Query<&mut Text, With<DiagnosticsText>>,
) {
    let fps = diagnostics
        .fps
        .map_or_else(|| "--".to_string(), |fps| format!("{fps:.1}"));
    let preset = parameters
        .preset
        .as_deref()
        .or_else(|| {
            COLOR_PRESETS
                .iter()
                .find(|p| p.base == parameters.base_color)
                .map(|p| p.name)
        })
        .unwrap_or("custom");

    for mut text in &mut query {
        text.0 = format!(
            "FPS: {fps}\nMeshes: {} (wall {}, floor {}, ceiling {}, unknown {})\nTriangles: {}\nMemory: {:.1} MiB\nPreset: {preset}  density {:.2}",
            diagnostics.mesh_count,
            diagnostics.count(SurfaceType::Wall),
            diagnostics.count(SurfaceType::Floor),
            diagnostics.count(SurfaceType::Ceiling),
            diagnostics.count(SurfaceType::Unknown),
            diagnostics.triangle_count,
            diagnostics.memory_bytes as f64 / (1024.0 * 1024.0),
            parameters.density,
        );
    }
}

/// Keys 1-5 pick a colour preset; `[` and `]` step the glyph density.
pub fn handle_effect_keys(
    keys: Res<ButtonInput<KeyCode>>,
    mut parameters: ResMut<EffectParameters>,
) {
    for (key, preset) in PRESET_KEYS.iter().zip(COLOR_PRESETS) {
        if keys.just_pressed(*key) {
            *parameters = parameters.clone().with_preset(preset);
            println!("Colour preset: {}", preset.name);
        }
    }

    let mut density = parameters.density;
    if keys.just_pressed(KeyCode::BracketLeft) {
        density -= DENSITY_STEP;
    }
    if keys.just_pressed(KeyCode::BracketRight) {
        density += DENSITY_STEP;
    }
    if density != parameters.density {
        parameters.density = density;
        *parameters = parameters.clamped();
    }
}
