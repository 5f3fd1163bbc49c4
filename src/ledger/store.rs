use chrono::NaiveDate;
use std::collections::BTreeMap;

use super::types::{CategoryShare, EmissionRecord, NewEmission};

/// Default number of records shown by [`EmissionLedger::recent`]
pub const DEFAULT_RECENT_LIMIT: usize = 10;

/// Session-scoped list of emission records, newest first.
///
/// Nothing here is written to disk; the ledger lives as long as its owner.
#[derive(Debug, Clone, Default)]
pub struct EmissionLedger {
    records: Vec<EmissionRecord>,
    next_id: u64,
}

impl EmissionLedger {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
        }
    }

    /// A ledger pre-filled with a few demo records
    pub fn with_sample_data() -> Self {
        let mut ledger = Self::new();
        // Added oldest first so the newest ends up at the front
        let samples = [
            ((2025, 1, 13), "Shopping", "Online Purchase", 2.3, 45.00),
            ((2025, 1, 13), "Food", "Beef Meal", 8.1, 12.00),
            ((2025, 1, 14), "Electricity", "Home Usage - 12kWh", 5.4, 15.20),
            ((2025, 1, 14), "Transport", "Car Journey - 15km", 3.2, 5.50),
        ];
        for ((y, m, d), category, item, emission, cost) in samples {
            if let Some(date) = NaiveDate::from_ymd_opt(y, m, d) {
                ledger.add(NewEmission {
                    date,
                    category: category.to_string(),
                    item: item.to_string(),
                    emission,
                    cost: Some(cost),
                });
            }
        }
        ledger
    }

    /// Record a new emission. It gets the next id and goes to the front.
    pub fn add(&mut self, data: NewEmission) -> &EmissionRecord {
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        self.records.insert(
            0,
            EmissionRecord {
                id,
                date: data.date,
                category: data.category,
                item: data.item,
                emission: data.emission,
                cost: data.cost,
            },
        );
        &self.records[0]
    }

    /// All records, newest first
    pub fn records(&self) -> &[EmissionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn total_emissions(&self) -> f64 {
        self.records.iter().map(|r| r.emission).sum()
    }

    pub fn total_cost(&self) -> f64 {
        self.records.iter().map(|r| r.cost_or_zero()).sum()
    }

    /// Summed emission per category label
    pub fn emissions_by_category(&self) -> BTreeMap<String, f64> {
        category_totals(&self.records)
    }

    /// The category with the largest emission, with its share of the total.
    /// Ties go to the alphabetically first category.
    pub fn top_category(&self) -> Option<CategoryShare> {
        top_category(&self.emissions_by_category())
    }

    /// The `limit` most recently added records
    pub fn recent(&self, limit: usize) -> &[EmissionRecord] {
        &self.records[..limit.min(self.records.len())]
    }
}

/// Summed emission per category label over any set of records
pub fn category_totals<'a, I>(records: I) -> BTreeMap<String, f64>
where
    I: IntoIterator<Item = &'a EmissionRecord>,
{
    let mut totals = BTreeMap::new();
    for record in records {
        *totals.entry(record.category.clone()).or_insert(0.0) += record.emission;
    }
    totals
}

/// Largest entry of a per-category breakdown with its share of the breakdown's total.
/// Ties go to the alphabetically first category.
pub fn top_category(by_category: &BTreeMap<String, f64>) -> Option<CategoryShare> {
    let total: f64 = by_category.values().sum();
    let mut top: Option<(&String, f64)> = None;
    for (category, &emission) in by_category {
        let is_larger = top.map_or(true, |(_, best)| emission > best);
        if is_larger {
            top = Some((category, emission));
        }
    }
    top.map(|(category, emission)| CategoryShare {
        category: category.clone(),
        emission,
        percentage: if total > 0.0 {
            emission / total * 100.0
        } else {
            0.0
        },
    })
}
