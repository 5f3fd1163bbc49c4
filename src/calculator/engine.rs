use serde::Serialize;

use crate::activity::{Activity, ActivityError};
use crate::factors::{CountryFactors, FactorTable};

/// Outcome of one emission calculation, with the factor that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmissionResult {
    pub activity: Activity,
    pub amount: f64,
    /// kg CO2-equivalent
    pub emission: f64,
    /// kg CO2 per unit of `amount`
    pub factor: f64,
    pub unit: &'static str,
    /// Code of the country table actually used
    pub country_code: String,
    /// True when the requested country was unknown and the baseline was used
    pub fell_back: bool,
}

/// Compute the emission for one activity, in kg CO2-equivalent.
///
/// `country` of None means the table's baseline country. Unknown codes silently
/// fall back to the baseline as well.
pub fn calculate_emission(
    table: &FactorTable,
    activity: Activity,
    amount: f64,
    country: Option<&str>,
) -> f64 {
    let factors = match country {
        Some(code) => table.lookup_country(code),
        None => table.baseline(),
    };
    amount * factor_for(factors, activity)
}

/// Same as [`calculate_emission`], returning the factor and country used.
pub fn calculate(
    table: &FactorTable,
    activity: Activity,
    amount: f64,
    country: Option<&str>,
) -> EmissionResult {
    let (code, factors, fell_back) = match country {
        Some(code) => table.resolve(code),
        None => (table.baseline_code(), table.baseline(), false),
    };
    let factor = factor_for(factors, activity);

    EmissionResult {
        activity,
        amount,
        emission: amount * factor,
        factor,
        unit: activity.unit(),
        country_code: code.to_string(),
        fell_back,
    }
}

/// String-keyed calculation.
///
/// An unknown category yields 0. An unknown subtype within a known category is
/// an [`ActivityError::UnknownActivity`]. Electricity ignores the subtype.
pub fn calculate_emission_str(
    table: &FactorTable,
    subtype: &str,
    category: &str,
    amount: f64,
    country: Option<&str>,
) -> Result<f64, ActivityError> {
    match Activity::from_parts(category, Some(subtype)) {
        Ok(activity) => Ok(calculate_emission(table, activity, amount, country)),
        Err(ActivityError::UnknownCategory(_)) => Ok(0.0),
        Err(e) => Err(e),
    }
}

/// Emission factor of `activity` in one country's table
pub fn factor_for(factors: &CountryFactors, activity: Activity) -> f64 {
    match activity {
        Activity::Electricity => factors.electricity,
        Activity::Transport(mode) => factors.transport.get(mode),
        Activity::Food(food) => factors.food.get(food),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::{FoodType, TransportMode};

    const EPSILON: f64 = 1e-9;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPSILON,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    fn all_activities() -> Vec<Activity> {
        let mut activities = vec![Activity::Electricity];
        activities.extend(TransportMode::ALL.into_iter().map(Activity::Transport));
        activities.extend(FoodType::ALL.into_iter().map(Activity::Food));
        activities
    }

    #[test]
    fn test_electricity_us() {
        let table = FactorTable::builtin();
        let result = calculate_emission_str(&table, "_", "electricity", 10.0, Some("US")).unwrap();
        assert_close(result, 4.5);
    }

    #[test]
    fn test_car_us() {
        let table = FactorTable::builtin();
        let result = calculate_emission_str(&table, "car", "transport", 15.0, Some("US")).unwrap();
        assert_close(result, 3.15);
    }

    #[test]
    fn test_beef_us() {
        let table = FactorTable::builtin();
        let result = calculate_emission_str(&table, "beef", "food", 1.0, Some("US")).unwrap();
        assert_close(result, 27.0);
    }

    #[test]
    fn test_unsupported_country_falls_back_to_us() {
        let table = FactorTable::builtin();
        let result = calculate_emission_str(&table, "car", "transport", 15.0, Some("ZZ")).unwrap();
        assert_close(result, 3.15);
    }

    #[test]
    fn test_zero_amount() {
        let table = FactorTable::builtin();
        let result = calculate_emission_str(&table, "car", "transport", 0.0, Some("US")).unwrap();
        assert_eq!(result, 0.0);
    }

    #[test]
    fn test_missing_country_uses_baseline() {
        let table = FactorTable::builtin();
        let activity = Activity::Transport(TransportMode::Car);
        assert_close(calculate_emission(&table, activity, 15.0, None), 3.15);
    }

    #[test]
    fn test_amount_times_factor_for_every_country() {
        let table = FactorTable::builtin();
        let amount = 7.5;
        for (code, _) in table.list_countries() {
            let factors = table.lookup_country(code);
            for activity in all_activities() {
                let expected = amount * factor_for(factors, activity);
                let actual = calculate_emission(&table, activity, amount, Some(code));
                assert_close(actual, expected);
                assert_eq!(calculate_emission(&table, activity, 0.0, Some(code)), 0.0);
            }
        }
    }

    #[test]
    fn test_unknown_category_is_zero() {
        let table = FactorTable::builtin();
        for code in ["US", "FR", "ZZ"] {
            let result =
                calculate_emission_str(&table, "anything", "doesNotExist", 42.0, Some(code))
                    .unwrap();
            assert_eq!(result, 0.0);
        }
    }

    #[test]
    fn test_unknown_subtype_is_error() {
        let table = FactorTable::builtin();
        let err = calculate_emission_str(&table, "rocket", "transport", 10.0, Some("US"))
            .unwrap_err();
        assert_eq!(
            err,
            ActivityError::UnknownActivity {
                category: "transport".to_string(),
                subtype: "rocket".to_string(),
            }
        );
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let table = FactorTable::builtin();
        let activity = Activity::Food(FoodType::Chicken);
        let first = calculate_emission(&table, activity, 2.5, Some("IN"));
        for _ in 0..10 {
            assert_eq!(calculate_emission(&table, activity, 2.5, Some("IN")), first);
        }
    }

    #[test]
    fn test_calculate_reports_factor_and_country() {
        let table = FactorTable::builtin();
        let result = calculate(&table, Activity::Electricity, 100.0, Some("fr"));
        assert_eq!(result.country_code, "FR");
        assert!(!result.fell_back);
        assert_eq!(result.factor, 0.052);
        assert_eq!(result.unit, "kWh");
        assert_close(result.emission, 5.2);

        let result = calculate(&table, Activity::Electricity, 100.0, Some("ZZ"));
        assert_eq!(result.country_code, "US");
        assert!(result.fell_back);
        assert_close(result.emission, 45.0);
    }

    #[test]
    fn test_calculate_uses_configured_baseline() {
        let table = FactorTable::builtin().with_baseline("GB").unwrap();
        let activity = Activity::Transport(TransportMode::Car);
        assert_close(calculate_emission(&table, activity, 10.0, None), 1.8);
        assert_close(calculate_emission(&table, activity, 10.0, Some("ZZ")), 1.8);
    }
}
