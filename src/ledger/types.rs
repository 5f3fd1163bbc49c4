use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One logged activity with its computed emission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionRecord {
    pub id: u64,
    pub date: NaiveDate,
    /// Display label, e.g. "Transport"
    pub category: String,
    /// Free-text description, e.g. "Car Journey - 15km"
    pub item: String,
    /// kg CO2-equivalent
    pub emission: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
}

/// A record before the ledger has assigned it an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEmission {
    pub date: NaiveDate,
    pub category: String,
    pub item: String,
    pub emission: f64,
    pub cost: Option<f64>,
}

/// Share of the total emission held by one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub emission: f64,
    /// 0-100
    pub percentage: f64,
}

impl EmissionRecord {
    /// Cost for sorting and summing; a missing cost counts as zero
    pub fn cost_or_zero(&self) -> f64 {
        self.cost.unwrap_or(0.0)
    }
}
