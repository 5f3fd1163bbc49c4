use std::collections::HashSet;

use super::table::{CountryEntry, FactorTable};
use crate::activity::{FoodType, TransportMode};

/// Validate every entry of a factor table.
/// Returns all validation errors at once (not just the first).
pub fn validate_factors(table: &FactorTable) -> Result<(), Vec<String>> {
    let errors = validate_entries(table.entries(), "countries");
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Check codes and factor values of a list of entries. `prefix` is the path
/// used in error messages (e.g. "countries").
pub fn validate_entries(entries: &[CountryEntry], prefix: &str) -> Vec<String> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for (i, entry) in entries.iter().enumerate() {
        let path = format!("{}[{}]", prefix, i);
        let code = entry.code.trim().to_ascii_uppercase();

        if code.is_empty() {
            errors.push(format!("{}.code: must not be empty", path));
        } else if !seen.insert(code.clone()) {
            errors.push(format!("{}.code: duplicate country code '{}'", path, code));
        }

        if entry.factors.country_name.trim().is_empty() {
            errors.push(format!("{}.country_name: must not be empty", path));
        }

        check_factor(&mut errors, &path, "electricity", entry.factors.electricity);

        for mode in TransportMode::ALL {
            let field = format!("transport.{}", mode.as_str());
            check_factor(&mut errors, &path, &field, entry.factors.transport.get(mode));
        }

        for food in FoodType::ALL {
            let field = format!("food.{}", food.as_str());
            check_factor(&mut errors, &path, &field, entry.factors.food.get(food));
        }
    }

    errors
}

fn check_factor(errors: &mut Vec<String>, path: &str, field: &str, value: f64) {
    if !value.is_finite() {
        errors.push(format!("{}.{}: must be a finite number", path, field));
    } else if value < 0.0 {
        errors.push(format!("{}.{}: must be non-negative", path, field));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factors::{CountryFactors, FoodFactors, TransportFactors};

    fn entry(code: &str) -> CountryEntry {
        let builtin = FactorTable::builtin();
        CountryEntry {
            code: code.to_string(),
            factors: builtin.baseline().clone(),
        }
    }

    #[test]
    fn test_builtin_table_is_valid() {
        assert!(validate_factors(&FactorTable::builtin()).is_ok());
    }

    #[test]
    fn test_negative_factor() {
        let mut bad = entry("XX");
        bad.factors.transport.bus = -0.1;
        let errors = validate_entries(&[bad], "countries");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("countries[0].transport.bus"));
        assert!(errors[0].contains("non-negative"));
    }

    #[test]
    fn test_non_finite_factor() {
        let mut bad = entry("XX");
        bad.factors.electricity = f64::NAN;
        let errors = validate_entries(&[bad], "countries");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("electricity"));
        assert!(errors[0].contains("finite"));
    }

    #[test]
    fn test_duplicate_and_empty_codes() {
        let errors = validate_entries(&[entry("GB"), entry("gb"), entry(" ")], "countries");
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("countries[1].code: duplicate"));
        assert!(errors[1].contains("countries[2].code: must not be empty"));
    }

    #[test]
    fn test_collects_all_errors() {
        let bad = CountryEntry {
            code: "XX".to_string(),
            factors: CountryFactors {
                country_name: String::new(),
                electricity: -1.0,
                transport: TransportFactors {
                    car: -1.0,
                    bus: 0.0,
                    train: 0.0,
                    plane: 0.0,
                },
                food: FoodFactors {
                    beef: 0.0,
                    chicken: 0.0,
                    pork: 0.0,
                    fish: 0.0,
                    vegetables: 0.0,
                    dairy: f64::INFINITY,
                },
            },
        };
        let errors = validate_entries(&[bad], "countries");
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn test_zero_factors_allowed() {
        let mut zero = entry("ZZ");
        zero.factors.electricity = 0.0;
        assert!(validate_entries(&[zero], "countries").is_empty());
    }
}
