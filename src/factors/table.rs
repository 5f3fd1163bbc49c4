use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use super::builtin::{BUILTIN_COUNTRIES, DEFAULT_BASELINE};
use crate::activity::{FoodType, TransportMode};

/// Transport factors in kg CO2 per km.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TransportFactors {
    pub car: f64,
    pub bus: f64,
    pub train: f64,
    /// Per passenger
    pub plane: f64,
}

/// Food factors in kg CO2 per kg of food.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FoodFactors {
    pub beef: f64,
    pub chicken: f64,
    pub pork: f64,
    pub fish: f64,
    pub vegetables: f64,
    pub dairy: f64,
}

/// Emission factors for one country.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CountryFactors {
    pub country_name: String,
    /// kg CO2 per kWh
    pub electricity: f64,
    pub transport: TransportFactors,
    pub food: FoodFactors,
}

/// A country's factors keyed by its code.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryEntry {
    pub code: String,
    pub factors: CountryFactors,
}

/// Immutable set of per-country factor tables with a designated baseline.
///
/// Entries keep insertion order so listings are stable between calls.
#[derive(Debug, Clone, PartialEq)]
pub struct FactorTable {
    entries: Vec<CountryEntry>,
    baseline: usize,
}

impl TransportFactors {
    pub fn get(&self, mode: TransportMode) -> f64 {
        match mode {
            TransportMode::Car => self.car,
            TransportMode::Bus => self.bus,
            TransportMode::Train => self.train,
            TransportMode::Plane => self.plane,
        }
    }
}

impl FoodFactors {
    pub fn get(&self, food: FoodType) -> f64 {
        match food {
            FoodType::Beef => self.beef,
            FoodType::Chicken => self.chicken,
            FoodType::Pork => self.pork,
            FoodType::Fish => self.fish,
            FoodType::Vegetables => self.vegetables,
            FoodType::Dairy => self.dairy,
        }
    }
}

impl Default for FactorTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl FactorTable {
    /// The built-in table, with the United States as baseline
    pub fn builtin() -> Self {
        let entries: Vec<CountryEntry> = BUILTIN_COUNTRIES
            .iter()
            .map(|c| CountryEntry {
                code: c.code.to_string(),
                factors: CountryFactors {
                    country_name: c.name.to_string(),
                    electricity: c.electricity,
                    transport: c.transport,
                    food: c.food,
                },
            })
            .collect();
        let baseline = entries
            .iter()
            .position(|e| e.code == DEFAULT_BASELINE)
            .unwrap_or(0);
        Self { entries, baseline }
    }

    /// Replace entries that share a code with an override, append the rest in order.
    pub fn with_overrides(mut self, overrides: Vec<CountryEntry>) -> Self {
        for mut entry in overrides {
            entry.code = normalize_code(&entry.code);
            match self.position(&entry.code) {
                Some(idx) => self.entries[idx] = entry,
                None => self.entries.push(entry),
            }
        }
        self
    }

    /// Switch the baseline country. The code must already be in the table.
    pub fn with_baseline(mut self, code: &str) -> Result<Self> {
        match self.position(&normalize_code(code)) {
            Some(idx) => {
                self.baseline = idx;
                Ok(self)
            }
            None => bail!("Baseline country '{}' is not in the factor table", code.trim()),
        }
    }

    /// Factors for `code`, or the baseline factors when the code is unknown.
    pub fn lookup_country(&self, code: &str) -> &CountryFactors {
        self.resolve(code).1
    }

    /// Same lookup as [`lookup_country`](Self::lookup_country), also returning the
    /// code actually used and whether the baseline was substituted.
    pub fn resolve(&self, code: &str) -> (&str, &CountryFactors, bool) {
        match self.position(&normalize_code(code)) {
            Some(idx) => {
                let entry = &self.entries[idx];
                (entry.code.as_str(), &entry.factors, false)
            }
            None => {
                let entry = self.baseline_entry();
                (entry.code.as_str(), &entry.factors, true)
            }
        }
    }

    pub fn baseline_code(&self) -> &str {
        &self.baseline_entry().code
    }

    pub fn baseline(&self) -> &CountryFactors {
        &self.baseline_entry().factors
    }

    pub fn contains(&self, code: &str) -> bool {
        self.position(&normalize_code(code)).is_some()
    }

    /// (code, display name) pairs in table order
    pub fn list_countries(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries
            .iter()
            .map(|e| (e.code.as_str(), e.factors.country_name.as_str()))
    }

    pub fn entries(&self) -> &[CountryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn baseline_entry(&self) -> &CountryEntry {
        &self.entries[self.baseline]
    }

    fn position(&self, normalized: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.code == normalized)
    }
}

fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}
