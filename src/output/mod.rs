pub mod formatter;

pub use formatter::{
    format_breakdown, format_json, format_priority, format_scored_row, format_scored_table,
    format_summary, format_tsv, should_use_colors,
};
