pub mod error;
pub mod types;

pub use error::ActivityError;
pub use types::{Activity, Category, FoodType, ShoppingType, TransportMode};
