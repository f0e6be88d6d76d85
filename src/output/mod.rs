pub mod formatter;

pub use formatter::{
    format_breakdown, format_json, format_json_line, format_multiplier, format_result,
    format_rules, format_score, format_tsv, should_use_colors, ScoredText,
};
