use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;

use carbometric::activity::Activity;
use carbometric::calculator;
use carbometric::config::{self, Config};
use carbometric::factors::FactorTable;
use carbometric::ledger::{self, EmissionLedger, HistoryQuery, SortKey, SortOrder};
use carbometric::offset;
use carbometric::output;

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
enum Format {
    Table,
    Tsv,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Calculate the emission of one activity
    Calc {
        /// electricity, transport or food
        category: String,
        /// Activity within the category (car, bus, train, plane, beef, chicken, ...), then the amount.
        /// Electricity takes only the amount.
        #[arg(num_args = 1..=2, required = true)]
        args: Vec<String>,
        /// Country code (defaults to the baseline country)
        #[arg(long)]
        country: Option<String>,
    },
    /// List supported countries
    Countries,
    /// Build a report from a YAML activity log
    Report {
        /// Path to the activity log
        log: PathBuf,
        /// Only show records whose item or category contains this text
        #[arg(long)]
        search: Option<String>,
        /// Only show records of this category
        #[arg(long)]
        category: Option<String>,
        /// Only show records from this window, e.g. "7d" or "4weeks"
        #[arg(long)]
        since: Option<String>,
        /// Sort by date, emission, cost or category
        #[arg(long, default_value = "date")]
        sort: SortKey,
        /// Sort ascending instead of descending
        #[arg(long)]
        asc: bool,
        /// Seed the ledger with demo records
        #[arg(long)]
        sample: bool,
    },
    /// Price a carbon offset
    Offset {
        /// Tonnes of CO2 to offset
        #[arg(long, conflicts_with = "kg")]
        tonnes: Option<f64>,
        /// Kilograms of CO2 to offset
        #[arg(long)]
        kg: Option<f64>,
        /// Only show this project (trees, solar, wind, ocean)
        #[arg(long)]
        project: Option<String>,
    },
    /// Create a config file interactively
    Init,
}

#[derive(Parser, Debug)]
#[command(name = "carbometric")]
#[command(about = "Personal carbon footprint calculator", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/carbometric/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "table")]
    format: Format,

    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();
    let start_time = Instant::now();
    let config_path = cli.config.map(PathBuf::from);

    if let Commands::Init = cli.command {
        if let Err(e) = config::init::run_init_wizard(config_path) {
            eprintln!("Init failed: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
        std::process::exit(EXIT_SUCCESS);
    }

    // Load config
    let config = match config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate config at startup
    if let Err(errors) = config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let table = match config::build_factor_table(&config) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if cli.verbose {
        eprintln!(
            "Loaded {} countries (baseline {}), {} from config",
            table.len(),
            table.baseline_code(),
            config.countries.len()
        );
    }

    let use_colors = cli.format == Format::Table && output::should_use_colors();

    let code = match cli.command {
        Commands::Calc {
            category,
            args,
            country,
        } => run_calc(
            &table,
            &category,
            &args,
            country.as_deref(),
            cli.format,
            use_colors,
            cli.verbose,
        ),
        Commands::Countries => run_countries(&table, cli.format, use_colors),
        Commands::Report {
            log,
            search,
            category,
            since,
            sort,
            asc,
            sample,
        } => {
            let query = HistoryQuery {
                search,
                category,
                since: None,
                sort_by: sort,
                order: if asc { SortOrder::Asc } else { SortOrder::Desc },
            };
            run_report(
                &table,
                &config,
                &log,
                query,
                since.as_deref(),
                sample,
                cli.format,
                use_colors,
                cli.verbose,
            )
        }
        Commands::Offset {
            tonnes,
            kg,
            project,
        } => run_offset(tonnes, kg, project.as_deref(), cli.format, use_colors),
        Commands::Init => EXIT_SUCCESS,
    };

    if cli.verbose {
        eprintln!("Done in {:?}", start_time.elapsed());
    }

    std::process::exit(code);
}

fn run_calc(
    table: &FactorTable,
    category: &str,
    args: &[String],
    country: Option<&str>,
    format: Format,
    use_colors: bool,
    verbose: bool,
) -> i32 {
    // "calc electricity 12" or "calc transport car 15"
    let (subtype, amount_str) = match args {
        [amount] => (None, amount.as_str()),
        [subtype, amount] => (Some(subtype.as_str()), amount.as_str()),
        _ => {
            eprintln!("Expected [ACTIVITY] AMOUNT after the category");
            return EXIT_INPUT;
        }
    };

    let amount: f64 = match amount_str.parse() {
        Ok(v) if f64::is_finite(v) && v >= 0.0 => v,
        _ => {
            eprintln!(
                "Invalid amount '{}': must be a non-negative number",
                amount_str
            );
            return EXIT_INPUT;
        }
    };

    let activity = match Activity::from_parts(category, subtype) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Invalid activity: {}", e);
            return EXIT_INPUT;
        }
    };

    let result = calculator::calculate(table, activity, amount, country);

    if verbose {
        eprintln!(
            "{} x {} ({} factor, country {})",
            amount, result.factor, activity, result.country_code
        );
        if result.fell_back {
            eprintln!(
                "Country '{}' not found, using baseline {}",
                country.unwrap_or_default(),
                result.country_code
            );
        }
    }

    match format {
        Format::Table => println!("{}", output::format_calculation(&result, use_colors)),
        Format::Tsv => println!(
            "{}\t{}\t{}\t{:.3}",
            activity, result.country_code, amount, result.emission
        ),
        Format::Json => return print_json(&result),
    }

    EXIT_SUCCESS
}

fn run_countries(table: &FactorTable, format: Format, use_colors: bool) -> i32 {
    match format {
        Format::Table => println!("{}", output::format_countries(table, use_colors)),
        Format::Tsv => {
            for (code, name) in table.list_countries() {
                println!("{}\t{}", code, name);
            }
        }
        Format::Json => {
            let countries: Vec<_> = table
                .entries()
                .iter()
                .map(|e| {
                    serde_json::json!({
                        "code": e.code,
                        "baseline": e.code == table.baseline_code(),
                        "factors": e.factors,
                    })
                })
                .collect();
            return print_json(&countries);
        }
    }
    EXIT_SUCCESS
}

#[allow(clippy::too_many_arguments)]
fn run_report(
    table: &FactorTable,
    config: &Config,
    log_path: &std::path::Path,
    query: HistoryQuery,
    since: Option<&str>,
    sample: bool,
    format: Format,
    use_colors: bool,
    verbose: bool,
) -> i32 {
    let today = chrono::Local::now().date_naive();

    let query = match since {
        Some(window) => match query.since_duration(today, window) {
            Ok(q) => q,
            Err(e) => {
                eprintln!("{:#}", e);
                return EXIT_INPUT;
            }
        },
        None => query,
    };

    let log = match ledger::load_activity_log(log_path) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Activity log error: {:#}", e);
            return EXIT_INPUT;
        }
    };

    let mut ledger = if sample {
        EmissionLedger::with_sample_data()
    } else {
        EmissionLedger::new()
    };

    // Entries are recorded against the table's baseline unless they name a country
    let errors = ledger::record_activities(&mut ledger, table, &log.entries, None, today);

    if verbose {
        eprintln!(
            "Recorded {} of {} entries from {}",
            log.entries.len() - errors.len(),
            log.entries.len(),
            log_path.display()
        );
    }
    // Partial failure: report bad entries and keep the rest
    if !errors.is_empty() {
        eprintln!("Skipped entries:");
        for error in &errors {
            eprintln!("  - {}", error);
        }
    }

    let records = query.apply(ledger.records());
    let summary = ledger::summarize(&records);
    let by_category = ledger::category_totals(records.iter().copied());
    let top = ledger::top_category(&by_category);

    if verbose {
        eprintln!(
            "{} of {} records match the query",
            records.len(),
            ledger.len()
        );
    }

    match format {
        Format::Table => {
            println!("{}", output::format_history_table(&records, use_colors));
            println!();
            println!("{}", output::format_summary(&summary, use_colors));
            println!();
            println!(
                "{}",
                output::format_breakdown(&by_category, top.as_ref(), use_colors)
            );
            println!();
            println!("Recent:");
            let recent: Vec<_> = ledger.recent(config.recent_limit).iter().collect();
            println!("{}", output::format_history_table(&recent, use_colors));
        }
        Format::Tsv => {
            let tsv = output::format_tsv(&records);
            if !tsv.is_empty() {
                println!("{}", tsv);
            }
        }
        Format::Json => {
            let report = serde_json::json!({
                "records": records,
                "summary": summary,
                "by_category": by_category,
                "top_category": top,
                "total_emission": summary.total_emission,
                "skipped": errors,
            });
            return print_json(&report);
        }
    }

    EXIT_SUCCESS
}

fn run_offset(
    tonnes: Option<f64>,
    kg: Option<f64>,
    project: Option<&str>,
    format: Format,
    use_colors: bool,
) -> i32 {
    let tonnes = match (tonnes, kg) {
        (Some(t), _) => t,
        (None, Some(kg)) => offset::kg_to_tonnes(kg),
        (None, None) => 1.0,
    };
    if !tonnes.is_finite() || tonnes < 0.0 {
        eprintln!("Invalid amount: must be a non-negative number");
        return EXIT_INPUT;
    }

    let projects: Vec<&offset::OffsetProject> = match project {
        Some(id) => match offset::find_project(id) {
            Some(p) => vec![p],
            None => {
                let ids: Vec<_> = offset::projects().iter().map(|p| p.id).collect();
                eprintln!(
                    "Unknown offset project '{}'. Available: {}",
                    id,
                    ids.join(", ")
                );
                return EXIT_INPUT;
            }
        },
        None => offset::projects().iter().collect(),
    };

    match format {
        Format::Table => {
            println!("Offsetting {} t CO2:", tonnes);
            println!("{}", output::format_offsets(&projects, tonnes, use_colors));
        }
        Format::Tsv => {
            for p in &projects {
                println!(
                    "{}\t{}\t{:.2}",
                    p.id,
                    p.name,
                    offset::offset_cost(tonnes, Some(*p))
                );
            }
        }
        Format::Json => {
            let quotes: Vec<_> = projects
                .iter()
                .map(|p| {
                    serde_json::json!({
                        "project": p,
                        "tonnes": tonnes,
                        "cost": offset::offset_cost(tonnes, Some(*p)),
                    })
                })
                .collect();
            return print_json(&quotes);
        }
    }

    EXIT_SUCCESS
}

fn print_json<T: serde::Serialize>(value: &T) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{}", json);
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to serialize output: {}", e);
            EXIT_INPUT
        }
    }
}
