//! Runtime effect parameters: JSON loading, clamping, debouncing and the effect clock.

pub mod debounce;
pub mod effect_parameters;
pub mod parameter_loader;

pub use debounce::{ParameterDebounce, advance_effect_clock, debounce_parameter_changes};
pub use effect_parameters::EffectParameters;
pub use parameter_loader::{ParameterLoader, apply_loaded_parameters, start_parameter_loading};
