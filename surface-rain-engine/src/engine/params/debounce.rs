use std::time::Duration;

use bevy::prelude::*;
use constants::render_settings::{PARAMETER_DEBOUNCE_SECS, SEED_REFRESH_SECS};

use super::effect_parameters::EffectParameters;
use crate::engine::materials::MaterialCache;
use crate::engine::rain::RainAnimator;
use crate::engine::scene::SceneGraphSync;

/// Holds parameter edits back until they stop changing for the debounce window.
#[derive(Resource, Debug)]
pub struct ParameterDebounce {
    timer: Timer,
    pending: bool,
    last_seen: EffectParameters,
    applied: EffectParameters,
}

impl Default for ParameterDebounce {
    fn default() -> Self {
        Self {
            timer: Timer::from_seconds(PARAMETER_DEBOUNCE_SECS, TimerMode::Once),
            pending: false,
            last_seen: EffectParameters::default(),
            applied: EffectParameters::default(),
        }
    }
}

impl ParameterDebounce {
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Every visual edit restarts the window. Returns the settled parameters once
    /// `current` has held still for the whole window and differs from the last applied set.
    pub fn observe(
        &mut self,
        current: &EffectParameters,
        elapsed: Duration,
    ) -> Option<EffectParameters> {
        if current.differs_visually(&self.last_seen) {
            self.last_seen = current.clamped();
            self.timer.reset();
            self.pending = current.differs_visually(&self.applied);
        }
        if !self.pending {
            return None;
        }

        self.timer.tick(elapsed);
        if !self.timer.finished() {
            return None;
        }
        self.pending = false;
        self.applied = self.last_seen.clone();
        Some(self.applied.clone())
    }
}

/// Fires once edits settle: rebuilds materials and retunes the animator's trail range.
pub fn debounce_parameter_changes(
    time: Res<Time>,
    parameters: Res<EffectParameters>,
    mut debounce: ResMut<ParameterDebounce>,
    mut cache: ResMut<MaterialCache>,
    mut animator: ResMut<RainAnimator>,
    mut scene: ResMut<SceneGraphSync>,
) {
    let Some(settled) = debounce.observe(&parameters, time.delta()) else {
        return;
    };

    animator.set_trail_length(settled.trail_length);
    cache.set_parameters(settled);
    scene.rebind_materials(&mut cache);
    debug!("Effect parameters settled, materials rebuilt");
}

/// Advances the effect clock every frame and rerolls the seed once per refresh period,
/// without marking the parameters as changed.
pub fn advance_effect_clock(
    time: Res<Time>,
    mut parameters: ResMut<EffectParameters>,
    mut refresh: Local<Option<Timer>>,
) {
    let timer =
        refresh.get_or_insert_with(|| Timer::from_seconds(SEED_REFRESH_SECS, TimerMode::Repeating));
    let parameters = parameters.bypass_change_detection();
    parameters.time = time.elapsed_secs();

    timer.tick(time.delta());
    if timer.just_finished() {
        parameters.random_seed = rand::random();
    }
}
