use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::store::EmissionLedger;
use super::types::NewEmission;
use crate::activity::types::capitalize;
use crate::activity::{Activity, ActivityError, ShoppingType};
use crate::calculator::calculate_emission;
use crate::factors::{spend_emission, FactorTable};

/// A YAML file of logged activities.
///
/// Example YAML:
/// ```yaml
/// entries:
///   - { date: "2025-01-14", category: transport, subtype: car, amount: 15, cost: 5.5 }
///   - { category: electricity, amount: 12, country: GB }
///   - { category: food, subtype: beef, amount: 0.3 }
///   - { category: shopping, subtype: books, amount: 25, cost: 25 }
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ActivityLog {
    #[serde(default)]
    pub entries: Vec<ActivityEntry>,
}

/// One activity as typed by the user
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ActivityEntry {
    /// Defaults to the import day
    #[serde(default)]
    pub date: Option<NaiveDate>,
    pub category: String,
    #[serde(default)]
    pub subtype: Option<String>,
    /// kWh, km, kg or currency spent depending on the category
    pub amount: f64,
    #[serde(default)]
    pub cost: Option<f64>,
    /// Overrides the default country for this entry
    #[serde(default)]
    pub country: Option<String>,
}

impl ActivityEntry {
    /// Calculate this entry's emission and turn it into a ledger record.
    ///
    /// Shopping entries are priced from the amount spent. Entries in any other
    /// category the calculator does not know are kept with zero emission.
    /// Unknown subtypes and negative amounts or costs are errors.
    pub fn to_new_emission(
        &self,
        table: &FactorTable,
        default_country: Option<&str>,
        today: NaiveDate,
    ) -> Result<NewEmission, ActivityError> {
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(ActivityError::InvalidAmount(self.amount));
        }
        if let Some(cost) = self.cost {
            if !cost.is_finite() || cost < 0.0 {
                return Err(ActivityError::InvalidCost(cost));
            }
        }

        let date = self.date.unwrap_or(today);
        let country = self.country.as_deref().or(default_country);

        if self.category.trim().eq_ignore_ascii_case(ShoppingType::CATEGORY) {
            let item: ShoppingType = match self.subtype.as_deref().map(str::trim) {
                Some(subtype) if !subtype.is_empty() => subtype.parse()?,
                _ => {
                    return Err(ActivityError::MissingSubtype(
                        ShoppingType::CATEGORY.to_string(),
                    ))
                }
            };
            return Ok(NewEmission {
                date,
                category: capitalize(ShoppingType::CATEGORY),
                item: item.describe(self.amount),
                emission: spend_emission(item, self.amount),
                cost: self.cost,
            });
        }

        match Activity::from_parts(&self.category, self.subtype.as_deref()) {
            Ok(activity) => Ok(NewEmission {
                date,
                category: activity.category().label().to_string(),
                item: activity.describe(self.amount),
                emission: calculate_emission(table, activity, self.amount, country),
                cost: self.cost,
            }),
            Err(ActivityError::UnknownCategory(category)) => {
                let item = match self.subtype.as_deref().map(str::trim) {
                    Some(subtype) if !subtype.is_empty() => {
                        format!("{} - {}", capitalize(subtype), self.amount)
                    }
                    _ => format!("{} - {}", capitalize(&category), self.amount),
                };
                Ok(NewEmission {
                    date,
                    category: capitalize(&category),
                    item,
                    emission: 0.0,
                    cost: self.cost,
                })
            }
            Err(e) => Err(e),
        }
    }
}

/// Load an activity log from a YAML file
pub fn load_activity_log(path: &Path) -> Result<ActivityLog> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read activity log at {}", path.display()))?;

    let log: ActivityLog = serde_saphyr::from_str(&content).with_context(|| {
        format!(
            "Failed to parse activity log: invalid YAML in {}",
            path.display()
        )
    })?;

    Ok(log)
}

/// Add every valid entry to the ledger in file order.
/// Returns one message per rejected entry (all of them, not just the first).
pub fn record_activities(
    ledger: &mut EmissionLedger,
    table: &FactorTable,
    entries: &[ActivityEntry],
    default_country: Option<&str>,
    today: NaiveDate,
) -> Vec<String> {
    let mut errors = Vec::new();
    for (i, entry) in entries.iter().enumerate() {
        match entry.to_new_emission(table, default_country, today) {
            Ok(emission) => {
                ledger.add(emission);
            }
            Err(e) => errors.push(format!("entries[{}]: {}", i, e)),
        }
    }
    errors
}
