pub mod init;
mod schema;

pub use schema::{Config, CountryConfig};

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::factors::{validate_entries, CountryEntry, FactorTable};

/// Get the config directory path (~/.config/carbometric/)
pub fn get_config_dir() -> PathBuf {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".config").join("carbometric")
}

/// Get the default config file path (~/.config/carbometric/config.yaml)
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.yaml")
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path
///   (~/.config/carbometric/config.yaml) and falls back to defaults when it does not exist
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let explicit = path.is_some();
    let config_path = path.unwrap_or_else(get_config_path);

    if !config_path.exists() {
        if explicit {
            anyhow::bail!("Config file not found at {}", config_path.display());
        }
        return Ok(Config::default());
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content).with_context(|| {
        format!(
            "Failed to parse config: invalid YAML in {}",
            config_path.display()
        )
    })?;

    Ok(config)
}

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if config.recent_limit == 0 {
        errors.push("recent_limit: must be at least 1".to_string());
    }

    let entries: Vec<CountryEntry> = config.countries.iter().cloned().map(Into::into).collect();
    errors.extend(validate_entries(&entries, "countries"));

    if let Some(ref country) = config.country {
        let table = FactorTable::builtin().with_overrides(entries);
        if !table.contains(country) {
            errors.push(format!("country: unknown country code '{}'", country.trim()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Build the factor table described by the config: built-in countries, then
/// the config's countries, then the configured baseline.
pub fn build_factor_table(config: &Config) -> Result<FactorTable> {
    let overrides: Vec<CountryEntry> = config.countries.iter().cloned().map(Into::into).collect();
    let table = FactorTable::builtin().with_overrides(overrides);
    match config.country {
        Some(ref code) => table.with_baseline(code),
        None => Ok(table),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factors::{FoodFactors, TransportFactors};
    use std::env;

    fn norway() -> CountryConfig {
        CountryConfig {
            code: "NO".to_string(),
            country_name: "Norway".to_string(),
            electricity: 0.02,
            transport: TransportFactors {
                car: 0.15,
                bus: 0.06,
                train: 0.01,
                plane: 0.255,
            },
            food: FoodFactors {
                beef: 25.0,
                chicken: 6.0,
                pork: 11.0,
                fish: 5.0,
                vegetables: 1.5,
                dairy: 2.8,
            },
        }
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let temp_path = env::temp_dir().join("carbometric_test_missing_config.yaml");
        let _ = fs::remove_file(&temp_path);
        assert!(load_config(Some(temp_path)).is_err());
    }

    #[test]
    fn test_load_config_file() {
        let temp_path = env::temp_dir().join("carbometric_test_config.yaml");
        fs::write(&temp_path, "country: fr\nrecent_limit: 3\n").unwrap();

        let config = load_config(Some(temp_path.clone())).unwrap();
        assert_eq!(config.country.as_deref(), Some("fr"));
        assert_eq!(config.recent_limit, 3);

        let _ = fs::remove_file(&temp_path);
    }

    #[test]
    fn test_load_invalid_yaml() {
        let temp_path = env::temp_dir().join("carbometric_test_bad_config.yaml");
        fs::write(&temp_path, "recent_limit: [not, a, number]\n").unwrap();

        let result = load_config(Some(temp_path.clone()));
        assert!(result.is_err());

        let _ = fs::remove_file(&temp_path);
    }

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_unknown_country() {
        let config = Config {
            country: Some("ZZ".to_string()),
            ..Default::default()
        };
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("country: unknown country code 'ZZ'"));
    }

    #[test]
    fn test_validate_country_from_overrides() {
        let config = Config {
            country: Some("no".to_string()),
            countries: vec![norway()],
            ..Default::default()
        };
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let mut bad = norway();
        bad.electricity = -1.0;
        let config = Config {
            country: Some("ZZ".to_string()),
            recent_limit: 0,
            countries: vec![bad],
        };
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors[0].contains("recent_limit"));
        assert!(errors[1].contains("countries[0].electricity"));
        assert!(errors[2].contains("country"));
    }

    #[test]
    fn test_build_factor_table() {
        let config = Config {
            country: Some("NO".to_string()),
            countries: vec![norway()],
            ..Default::default()
        };
        let table = build_factor_table(&config).unwrap();
        assert_eq!(table.len(), 11);
        assert_eq!(table.baseline_code(), "NO");
        assert_eq!(table.lookup_country("ZZ").country_name, "Norway");
        assert_eq!(table.lookup_country("US").country_name, "United States");
    }

    #[test]
    fn test_build_default_factor_table() {
        let table = build_factor_table(&Config::default()).unwrap();
        assert_eq!(table, FactorTable::builtin());
    }
}
