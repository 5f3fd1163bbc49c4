use anyhow::{bail, Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::activity::{FoodType, TransportMode};
use crate::config::{get_config_path, validate_config, Config, CountryConfig};
use crate::factors::{FactorTable, FoodFactors, TransportFactors, DEFAULT_BASELINE};
use crate::ledger::DEFAULT_RECENT_LIMIT;

/// Prompt user with a message and return their trimmed input.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout()
        .flush()
        .context("Failed to flush stdout")?;
    read_answer(&mut std::io::stdin().lock())
}

/// Read one trimmed line. End of input is an error so required prompts cannot loop forever.
fn read_answer<R: BufRead>(reader: &mut R) -> Result<String> {
    let mut input = String::new();
    let bytes = reader
        .read_line(&mut input)
        .context("Failed to read input")?;
    if bytes == 0 {
        bail!("Unexpected end of input");
    }
    Ok(input.trim().to_string())
}

/// Prompt user with a message and a default value. Returns default if input is empty.
fn prompt_with_default(message: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} [{}]: ", message, default))?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

/// Prompt user with a yes/no question. Returns bool based on input and default.
fn prompt_yes_no(message: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let input = prompt(&format!("{} [{}]: ", message, hint))?;
    let input = input.to_lowercase();
    if input.is_empty() {
        Ok(default_yes)
    } else {
        Ok(input == "y" || input == "yes")
    }
}

/// Keep asking until the user enters a non-negative number.
fn prompt_factor(message: &str, default: f64) -> Result<f64> {
    loop {
        let input = prompt_with_default(message, &default.to_string())?;
        match input.parse::<f64>() {
            Ok(v) if v.is_finite() && v >= 0.0 => return Ok(v),
            Ok(_) => println!("  Invalid: must be non-negative. Try again."),
            Err(_) => println!("  Invalid: must be a non-negative number. Try again."),
        }
    }
}

/// Ask for every factor of a custom country, offering the baseline values as defaults.
fn prompt_country(table: &FactorTable) -> Result<CountryConfig> {
    let code = loop {
        let c = prompt("  Country code (e.g. 'NO'): ")?;
        if !c.is_empty() {
            break c.to_ascii_uppercase();
        }
        println!("  Country code is required.");
    };
    let country_name = loop {
        let n = prompt("  Display name: ")?;
        if !n.is_empty() {
            break n;
        }
        println!("  Display name is required.");
    };

    // Defaults come from the existing entry for this code, or the baseline
    let defaults = table.lookup_country(&code).clone();

    let electricity = prompt_factor("  Electricity (kg CO2 per kWh)", defaults.electricity)?;

    let mut transport = [0.0; 4];
    for (slot, mode) in transport.iter_mut().zip(TransportMode::ALL) {
        *slot = prompt_factor(
            &format!("  {} (kg CO2 per km)", mode.as_str()),
            defaults.transport.get(mode),
        )?;
    }

    let mut food = [0.0; 6];
    for (slot, item) in food.iter_mut().zip(FoodType::ALL) {
        *slot = prompt_factor(
            &format!("  {} (kg CO2 per kg)", item.as_str()),
            defaults.food.get(item),
        )?;
    }

    Ok(CountryConfig {
        code,
        country_name,
        electricity,
        transport: TransportFactors {
            car: transport[0],
            bus: transport[1],
            train: transport[2],
            plane: transport[3],
        },
        food: FoodFactors {
            beef: food[0],
            chicken: food[1],
            pork: food[2],
            fish: food[3],
            vegetables: food[4],
            dairy: food[5],
        },
    })
}

/// Serialize a config and write it atomically, creating parent directories.
pub fn write_config(path: &Path, config: &Config) -> Result<()> {
    let yaml = serde_saphyr::to_string(config)
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(yaml.as_bytes())
        .with_context(|| format!("Failed to write config to {}", path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to save config to {}", path.display()))?;

    Ok(())
}

/// Run the interactive init wizard to create a config file.
///
/// If `default_path` is Some, uses that as the config file path.
/// Otherwise, prompts the user with the default config path.
pub fn run_init_wizard(default_path: Option<PathBuf>) -> Result<()> {
    println!();
    println!("Carbometric Configuration Wizard");
    println!("================================");
    println!();

    let table = FactorTable::builtin();

    // 1. Custom countries
    println!("Built-in countries:");
    for (code, name) in table.list_countries() {
        println!("  {}  {}", code, name);
    }
    println!();
    println!("You can add a country that is not listed, or override the factors of one that is.");
    let mut countries: Vec<CountryConfig> = Vec::new();
    let mut add_country = prompt_yes_no("Add a custom country?", false)?;
    while add_country {
        countries.push(prompt_country(&table)?);
        add_country = prompt_yes_no("  Add another custom country?", false)?;
    }

    // 2. Baseline country
    println!();
    println!("The baseline country is used when no country is given, or the given one is unknown.");
    let known = FactorTable::builtin()
        .with_overrides(countries.iter().cloned().map(Into::into).collect());
    let country = loop {
        let input = prompt_with_default("Baseline country", DEFAULT_BASELINE)?;
        if known.contains(&input) {
            break input.to_ascii_uppercase();
        }
        println!("  Unknown country code '{}'. Try again.", input);
    };

    // 3. Recent view size
    println!();
    let recent_limit = loop {
        let input = prompt_with_default(
            "How many records should the recent view show?",
            &DEFAULT_RECENT_LIMIT.to_string(),
        )?;
        match input.parse::<usize>() {
            Ok(v) if v > 0 => break v,
            _ => println!("  Invalid: must be a whole number of at least 1. Try again."),
        }
    };

    let config = Config {
        country: if country == DEFAULT_BASELINE {
            None
        } else {
            Some(country)
        },
        recent_limit,
        countries,
    };

    if let Err(errors) = validate_config(&config) {
        anyhow::bail!("Generated config is invalid: {}", errors.join("; "));
    }

    // 4. Config path
    let default_config_path = default_path.unwrap_or_else(get_config_path);
    println!();
    let path_str = prompt_with_default(
        "Where should the config be saved?",
        &default_config_path.display().to_string(),
    )?;
    let config_path = PathBuf::from(&path_str);

    if config_path.exists() {
        let overwrite = prompt_yes_no(
            &format!(
                "Config already exists at {}. Overwrite?",
                config_path.display()
            ),
            false,
        )?;
        if !overwrite {
            println!("Aborted.");
            return Ok(());
        }
    }

    // 5. Write config
    write_config(&config_path, &config)?;

    println!();
    println!("Config written to {}", config_path.display());
    println!("Run `carbometric calc transport car 15` to try it out.");

    Ok(())
}
