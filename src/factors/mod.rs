pub mod builtin;
pub mod spend;
pub mod table;
pub mod validation;

pub use builtin::DEFAULT_BASELINE;
pub use spend::{spend_emission, spend_factor, SPEND_FACTORS};
pub use table::{CountryEntry, CountryFactors, FactorTable, FoodFactors, TransportFactors};
pub use validation::{validate_entries, validate_factors};
