use bevy::asset::LoadState;
use bevy::prelude::*;
use constants::path::EFFECT_PARAMETERS_PATH;

use super::effect_parameters::EffectParameters;

#[derive(Resource, Default)]
pub struct ParameterLoader {
    handle: Option<Handle<EffectParameters>>,
    failure_reported: bool,
}

pub fn start_parameter_loading(
    mut loader: ResMut<ParameterLoader>,
    asset_server: Res<AssetServer>,
) {
    loader.handle = Some(asset_server.load(EFFECT_PARAMETERS_PATH));
}

/// Copies the loaded (or hot-reloaded) file into the live parameters, clamped.
/// The running clock and seed are kept. A failed load leaves the defaults in place.
pub fn apply_loaded_parameters(
    mut loader: ResMut<ParameterLoader>,
    mut asset_events: EventReader<AssetEvent<EffectParameters>>,
    files: Res<Assets<EffectParameters>>,
    asset_server: Res<AssetServer>,
    mut parameters: ResMut<EffectParameters>,
) {
    let Some(handle) = loader.handle.clone() else {
        return;
    };

    for event in asset_events.read() {
        if !event.is_loaded_with_dependencies(&handle) && !event.is_modified(&handle) {
            continue;
        }
        if let Some(loaded) = files.get(&handle) {
            let resolved = loaded.clamped().resolve_preset().unwrap_or_else(|(kept, name)| {
                warn!("Unknown colour preset '{name}', using explicit colours");
                kept
            });
            *parameters = EffectParameters {
                time: parameters.time,
                random_seed: parameters.random_seed,
                ..resolved
            };
            info!("Effect parameters loaded from {EFFECT_PARAMETERS_PATH}");
        }
    }

    if !loader.failure_reported {
        if let Some(LoadState::Failed(error)) = asset_server.get_load_state(&handle) {
            warn!("Effect parameters unavailable ({error}), keeping defaults");
            loader.failure_reported = true;
        }
    }
}
