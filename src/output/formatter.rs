use owo_colors::OwoColorize;
use std::collections::BTreeMap;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::calculator::EmissionResult;
use crate::factors::FactorTable;
use crate::ledger::{CategoryShare, EmissionRecord, HistorySummary};
use crate::offset::{offset_cost, OffsetProject};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a CO2 mass: "3.15 kg" below one tonne, "1.2 t" above
pub fn format_kg(kg: f64) -> String {
    if kg.abs() >= 1_000.0 {
        let formatted = format!("{:.1} t", kg / 1_000.0);
        formatted.replace(".0 t", " t")
    } else {
        format!("{:.2} kg", kg)
    }
}

/// Format a monetary amount with two decimals
pub fn format_cost(cost: f64) -> String {
    format!("${:.2}", cost)
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
fn truncate_text(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// One calculation, e.g. "3.15 kg CO2 (15 km x 0.21 kg/km, US)"
pub fn format_calculation(result: &EmissionResult, use_colors: bool) -> String {
    let emission = format!("{} CO2", format_kg(result.emission));
    let detail = format!(
        "({} {} x {} kg/{}, {})",
        result.amount, result.unit, result.factor, result.unit, result.country_code
    );

    let mut out = if use_colors {
        format!("{} {}", emission.bold().green(), detail.dimmed())
    } else {
        format!("{} {}", emission, detail)
    };

    if result.fell_back {
        let note = format!(
            "Unknown country, used baseline {} factors",
            result.country_code
        );
        out.push('\n');
        if use_colors {
            out.push_str(&note.yellow().to_string());
        } else {
            out.push_str(&note);
        }
    }
    out
}

/// Supported countries in table order, baseline marked
pub fn format_countries(table: &FactorTable, use_colors: bool) -> String {
    let baseline = table.baseline_code();
    table
        .list_countries()
        .map(|(code, name)| {
            let marker = if code == baseline { "  (baseline)" } else { "" };
            if use_colors {
                format!("{:<4}{}{}", code.cyan(), name, marker.dimmed())
            } else {
                format!("{:<4}{}{}", code, name, marker)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format records as a table with columns: Index, Date, Category, Emission, Cost, Item
/// Item is truncated to the terminal width; pipes get the full text.
pub fn format_history_table(records: &[&EmissionRecord], use_colors: bool) -> String {
    if records.is_empty() {
        return "No emission records found.".to_string();
    }

    let term_width = get_terminal_width();

    let category_width = records
        .iter()
        .map(|r| r.category.chars().count())
        .max()
        .unwrap_or(0);
    let emission_width = 10;
    let cost_width = 9;
    let separator = "  ";

    records
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            let index_str = format!("{:>2}.", idx + 1);
            let date_str = record.date.format("%Y-%m-%d").to_string();
            let category = format!("{:<width$}", record.category, width = category_width);
            let emission = format!("{:>width$}", format_kg(record.emission), width = emission_width);
            let cost = format!(
                "{:>width$}",
                record.cost.map(format_cost).unwrap_or_else(|| "-".to_string()),
                width = cost_width
            );

            let fixed_width = index_str.len()
                + 1
                + date_str.len()
                + category_width
                + emission_width
                + cost_width
                + separator.len() * 4;
            let item = match term_width {
                Some(width) if width > fixed_width + 10 => {
                    truncate_text(&record.item, width - fixed_width)
                }
                Some(_) => truncate_text(&record.item, 20),
                None => record.item.clone(),
            };

            if use_colors {
                format!(
                    "{} {}{}{}{}{}{}{}{}{}",
                    index_str.dimmed(),
                    date_str,
                    separator,
                    category.cyan(),
                    separator,
                    emission.bold(),
                    separator,
                    cost,
                    separator,
                    item
                )
            } else {
                format!(
                    "{} {}{}{}{}{}{}{}{}{}",
                    index_str,
                    date_str,
                    separator,
                    category,
                    separator,
                    emission,
                    separator,
                    cost,
                    separator,
                    item
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format records as tab-separated values for scripting
/// Columns: id, date, category, item, emission, cost (no headers, no colors)
pub fn format_tsv(records: &[&EmissionRecord]) -> String {
    records
        .iter()
        .map(|r| {
            format!(
                "{}\t{}\t{}\t{}\t{:.3}\t{}",
                r.id,
                r.date.format("%Y-%m-%d"),
                r.category,
                r.item,
                r.emission,
                r.cost.map(|c| format!("{:.2}", c)).unwrap_or_default()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One-line totals for a set of records
pub fn format_summary(summary: &HistorySummary, use_colors: bool) -> String {
    let records = if summary.count == 1 { "record" } else { "records" };
    let total = format_kg(summary.total_emission);
    if use_colors {
        format!(
            "{} {}, {} CO2, {} spent",
            summary.count,
            records,
            total.bold().green(),
            format_cost(summary.total_cost)
        )
    } else {
        format!(
            "{} {}, {} CO2, {} spent",
            summary.count,
            records,
            total,
            format_cost(summary.total_cost)
        )
    }
}

/// Per-category totals with their share of the overall emission
pub fn format_breakdown(
    by_category: &BTreeMap<String, f64>,
    top: Option<&CategoryShare>,
    use_colors: bool,
) -> String {
    if by_category.is_empty() {
        return "No emissions by category.".to_string();
    }

    let total: f64 = by_category.values().sum();
    let name_width = by_category
        .keys()
        .map(|k| k.chars().count())
        .max()
        .unwrap_or(0);

    let mut lines: Vec<String> = by_category
        .iter()
        .map(|(category, emission)| {
            let share = if total > 0.0 {
                emission / total * 100.0
            } else {
                0.0
            };
            let name = format!("{:<width$}", category, width = name_width);
            let amount = format!("{:>10}", format_kg(*emission));
            if use_colors {
                format!("{}  {}  {:>5.1}%", name.cyan(), amount, share)
            } else {
                format!("{}  {}  {:>5.1}%", name, amount, share)
            }
        })
        .collect();

    if let Some(top) = top {
        let line = format!(
            "Top category: {} ({:.1}% of total)",
            top.category, top.percentage
        );
        if use_colors {
            lines.push(line.bold().to_string());
        } else {
            lines.push(line);
        }
    }

    lines.join("\n")
}

/// Offset price of `tonnes` for each project
pub fn format_offsets(projects: &[&OffsetProject], tonnes: f64, use_colors: bool) -> String {
    if projects.is_empty() {
        return "No offset projects found.".to_string();
    }

    let name_width = projects
        .iter()
        .map(|p| p.name.chars().count())
        .max()
        .unwrap_or(0);

    projects
        .iter()
        .map(|p| {
            let name = format!("{:<width$}", p.name, width = name_width);
            let cost = format!("{:>10}", format_cost(offset_cost(tonnes, Some(p))));
            let detail = format!(
                "{}/t, {}, {}",
                format_cost(p.price_per_ton),
                p.certification,
                p.location
            );
            if use_colors {
                format!(
                    "{:<7}{}  {}  {}",
                    p.id.cyan(),
                    name,
                    cost.bold(),
                    detail.dimmed()
                )
            } else {
                format!("{:<7}{}  {}  {}", p.id, name, cost, detail)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
