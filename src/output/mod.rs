pub mod formatter;

pub use formatter::{
    format_breakdown, format_calculation, format_cost, format_countries, format_history_table,
    format_kg, format_offsets, format_summary, format_tsv, should_use_colors,
};
