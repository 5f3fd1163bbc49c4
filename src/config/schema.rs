use serde::{Deserialize, Serialize};

use crate::factors::{CountryEntry, CountryFactors, FoodFactors, TransportFactors};
use crate::ledger::DEFAULT_RECENT_LIMIT;

/// Main configuration.
///
/// Example YAML:
/// ```yaml
/// country: GB
/// recent_limit: 10
/// countries:
///   - code: "NO"
///     country_name: Norway
///     electricity: 0.02
///     transport: { car: 0.15, bus: 0.06, train: 0.01, plane: 0.255 }
///     food: { beef: 25.0, chicken: 6.0, pork: 11.0, fish: 5.0, vegetables: 1.5, dairy: 2.8 }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Baseline country used when none is given or the given one is unknown (default: US)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    /// Number of records in the "recent" view (default: 10)
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,

    /// Extra country tables; a code already in the built-in table replaces it
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub countries: Vec<CountryConfig>,
}

fn default_recent_limit() -> usize {
    DEFAULT_RECENT_LIMIT
}

impl Default for Config {
    fn default() -> Self {
        Self {
            country: None,
            recent_limit: DEFAULT_RECENT_LIMIT,
            countries: Vec::new(),
        }
    }
}

/// A country table as written in the config file.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CountryConfig {
    pub code: String,
    pub country_name: String,
    /// kg CO2 per kWh
    pub electricity: f64,
    /// kg CO2 per km for car, bus, train and plane
    pub transport: TransportFactors,
    /// kg CO2 per kg for beef, chicken, pork, fish, vegetables and dairy
    pub food: FoodFactors,
}

impl From<CountryConfig> for CountryEntry {
    fn from(c: CountryConfig) -> Self {
        CountryEntry {
            code: c.code,
            factors: CountryFactors {
                country_name: c.country_name,
                electricity: c.electricity,
                transport: c.transport,
                food: c.food,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.country.is_none());
        assert_eq!(config.recent_limit, 10);
        assert!(config.countries.is_empty());
    }

    #[test]
    fn test_empty_config_parse() {
        let config: Config = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
country: GB
recent_limit: 5
countries:
  - code: "NO"
    country_name: Norway
    electricity: 0.02
    transport: { car: 0.15, bus: 0.06, train: 0.01, plane: 0.255 }
    food: { beef: 25.0, chicken: 6.0, pork: 11.0, fish: 5.0, vegetables: 1.5, dairy: 2.8 }
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.country.as_deref(), Some("GB"));
        assert_eq!(config.recent_limit, 5);
        assert_eq!(config.countries.len(), 1);

        let entry: CountryEntry = config.countries[0].clone().into();
        assert_eq!(entry.code, "NO");
        assert_eq!(entry.factors.country_name, "Norway");
        assert_eq!(entry.factors.transport.plane, 0.255);
        assert_eq!(entry.factors.food.dairy, 2.8);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<Config, _> = serde_saphyr::from_str("currency: EUR\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_country_missing_food_type_rejected() {
        let yaml = r#"
countries:
  - code: XX
    country_name: Nowhere
    electricity: 0.1
    transport: { car: 0.1, bus: 0.1, train: 0.1, plane: 0.1 }
    food: { beef: 1.0, chicken: 1.0 }
"#;
        let result: Result<Config, _> = serde_saphyr::from_str(yaml);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = Config {
            country: Some("DE".to_string()),
            recent_limit: 20,
            countries: Vec::new(),
        };
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: Config = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }
}
