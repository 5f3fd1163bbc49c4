pub mod engine;

pub use engine::{calculate, calculate_emission, calculate_emission_str, factor_for, EmissionResult};
