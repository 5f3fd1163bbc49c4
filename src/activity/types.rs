use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::ActivityError;

/// The three activity classes the calculator knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Electricity,
    Transport,
    Food,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Car,
    Bus,
    Train,
    Plane,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoodType {
    Beef,
    Chicken,
    Pork,
    Fish,
    Vegetables,
    Dairy,
}

/// Purchase kinds priced per currency unit spent, outside the country table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShoppingType {
    Electronics,
    Clothing,
    Books,
}

/// A single loggable activity. Each variant carries its own subtype, so a
/// transport activity can never be asked for a food factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "category", content = "subtype", rename_all = "lowercase")]
pub enum Activity {
    Electricity,
    Transport(TransportMode),
    Food(FoodType),
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Electricity, Category::Transport, Category::Food];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Electricity => "electricity",
            Category::Transport => "transport",
            Category::Food => "food",
        }
    }

    /// Display label used for ledger records ("Electricity", "Transport", "Food")
    pub fn label(&self) -> &'static str {
        match self {
            Category::Electricity => "Electricity",
            Category::Transport => "Transport",
            Category::Food => "Food",
        }
    }

    /// Physical unit the amount is measured in
    pub fn unit(&self) -> &'static str {
        match self {
            Category::Electricity => "kWh",
            Category::Transport => "km",
            Category::Food => "kg",
        }
    }
}

impl TransportMode {
    pub const ALL: [TransportMode; 4] = [
        TransportMode::Car,
        TransportMode::Bus,
        TransportMode::Train,
        TransportMode::Plane,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Car => "car",
            TransportMode::Bus => "bus",
            TransportMode::Train => "train",
            TransportMode::Plane => "plane",
        }
    }
}

impl FoodType {
    pub const ALL: [FoodType; 6] = [
        FoodType::Beef,
        FoodType::Chicken,
        FoodType::Pork,
        FoodType::Fish,
        FoodType::Vegetables,
        FoodType::Dairy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FoodType::Beef => "beef",
            FoodType::Chicken => "chicken",
            FoodType::Pork => "pork",
            FoodType::Fish => "fish",
            FoodType::Vegetables => "vegetables",
            FoodType::Dairy => "dairy",
        }
    }
}

impl ShoppingType {
    pub const ALL: [ShoppingType; 3] = [
        ShoppingType::Electronics,
        ShoppingType::Clothing,
        ShoppingType::Books,
    ];

    /// Category name used in activity logs
    pub const CATEGORY: &'static str = "shopping";

    pub fn as_str(&self) -> &'static str {
        match self {
            ShoppingType::Electronics => "electronics",
            ShoppingType::Clothing => "clothing",
            ShoppingType::Books => "books",
        }
    }

    /// Item label for a ledger record, e.g. "Books - $25"
    pub fn describe(&self, spent: f64) -> String {
        format!("{} - ${}", capitalize(self.as_str()), spent)
    }
}

impl FromStr for Category {
    type Err = ActivityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == normalized)
            .ok_or_else(|| ActivityError::UnknownCategory(s.trim().to_string()))
    }
}

impl FromStr for TransportMode {
    type Err = ActivityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        TransportMode::ALL
            .into_iter()
            .find(|m| m.as_str() == normalized)
            .ok_or_else(|| ActivityError::UnknownActivity {
                category: Category::Transport.as_str().to_string(),
                subtype: s.trim().to_string(),
            })
    }
}

impl FromStr for FoodType {
    type Err = ActivityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        FoodType::ALL
            .into_iter()
            .find(|f| f.as_str() == normalized)
            .ok_or_else(|| ActivityError::UnknownActivity {
                category: Category::Food.as_str().to_string(),
                subtype: s.trim().to_string(),
            })
    }
}

impl FromStr for ShoppingType {
    type Err = ActivityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        ShoppingType::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| ActivityError::UnknownActivity {
                category: ShoppingType::CATEGORY.to_string(),
                subtype: s.trim().to_string(),
            })
    }
}

impl Activity {
    /// Build an activity from its string category and subtype.
    ///
    /// Electricity has no subtype; whatever is passed is ignored. Transport and
    /// food require one.
    pub fn from_parts(category: &str, subtype: Option<&str>) -> Result<Self, ActivityError> {
        let category: Category = category.parse()?;
        match category {
            Category::Electricity => Ok(Activity::Electricity),
            Category::Transport => {
                let subtype = require_subtype(category, subtype)?;
                Ok(Activity::Transport(subtype.parse()?))
            }
            Category::Food => {
                let subtype = require_subtype(category, subtype)?;
                Ok(Activity::Food(subtype.parse()?))
            }
        }
    }

    pub fn category(&self) -> Category {
        match self {
            Activity::Electricity => Category::Electricity,
            Activity::Transport(_) => Category::Transport,
            Activity::Food(_) => Category::Food,
        }
    }

    pub fn unit(&self) -> &'static str {
        self.category().unit()
    }

    /// Subtype name, or None for electricity
    pub fn subtype(&self) -> Option<&'static str> {
        match self {
            Activity::Electricity => None,
            Activity::Transport(mode) => Some(mode.as_str()),
            Activity::Food(food) => Some(food.as_str()),
        }
    }

    /// Item label for a ledger record, e.g. "Car Journey - 15km"
    pub fn describe(&self, amount: f64) -> String {
        match self {
            Activity::Electricity => format!("Home Usage - {}kWh", amount),
            Activity::Transport(mode) => {
                format!("{} Journey - {}km", capitalize(mode.as_str()), amount)
            }
            Activity::Food(food) => format!("{} - {}kg", capitalize(food.as_str()), amount),
        }
    }
}

fn require_subtype(category: Category, subtype: Option<&str>) -> Result<&str, ActivityError> {
    match subtype.map(str::trim) {
        Some(s) if !s.is_empty() => Ok(s),
        _ => Err(ActivityError::MissingSubtype(category.as_str().to_string())),
    }
}

pub(crate) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.subtype() {
            Some(subtype) => write!(f, "{}/{}", self.category(), subtype),
            None => write!(f, "{}", self.category()),
        }
    }
}
