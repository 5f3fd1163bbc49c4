use thiserror::Error;

/// Errors raised while turning user input into an [`Activity`](super::Activity).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ActivityError {
    #[error("unknown category '{0}' (expected electricity, transport or food)")]
    UnknownCategory(String),

    #[error("unknown {category} activity '{subtype}'")]
    UnknownActivity { category: String, subtype: String },

    #[error("category '{0}' requires an activity (e.g. 'car' or 'beef')")]
    MissingSubtype(String),

    #[error("invalid amount {0}: must be a non-negative number")]
    InvalidAmount(f64),

    #[error("invalid cost {0}: must be a non-negative number")]
    InvalidCost(f64),
}
