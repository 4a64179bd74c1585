/// Effect parameter file, relative to the asset root.
pub const EFFECT_PARAMETERS_PATH: &str = "config/effect_parameters.effect.json";

/// Extension the JSON loader claims for effect parameter files.
pub const EFFECT_PARAMETERS_EXTENSION: &str = "effect.json";
