use owo_colors::OwoColorize;
use serde::Serialize;
use std::io::IsTerminal;

use crate::scoring::{RankResult, Ranker, Rule, RuleContribution, ValidationKind};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a score with up to 4 decimals, trailing zeros trimmed
/// (2 -> "2", 0.48000000000000004 -> "0.48")
pub fn format_score(score: f64) -> String {
    let formatted = format!("{:.4}", score);
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Format a multiplier the way validation messages do ("x1.2", "x2")
pub fn format_multiplier(multiplier: f64) -> String {
    format!("x{}", multiplier.abs())
}

/// Score line followed by one line per validation.
pub fn format_result(result: &RankResult, use_colors: bool) -> String {
    let score = format_score(result.score);
    let mut lines = vec![if use_colors {
        format!("Score: {}", score.bold())
    } else {
        format!("Score: {}", score)
    }];

    for validation in &result.validations {
        let line = match (validation.kind, use_colors) {
            (ValidationKind::Positive, true) => format!("  {} {}", "+".green(), validation.message.green()),
            (ValidationKind::Negative, true) => format!("  {} {}", "-".red(), validation.message.red()),
            (ValidationKind::Positive, false) => format!("  + {}", validation.message),
            (ValidationKind::Negative, false) => format!("  - {}", validation.message),
        };
        lines.push(line);
    }

    lines.join("\n")
}

/// Every rule with its multiplier and the running score (verbose mode).
pub fn format_breakdown(contributions: &[RuleContribution], use_colors: bool) -> String {
    if contributions.is_empty() {
        return "Too short to score.".to_string();
    }

    contributions
        .iter()
        .map(|c| {
            let multiplier = format!("{:>6}", format_multiplier(c.multiplier));
            let running = format!(
                "{} -> {}",
                format_score(c.before),
                format_score(c.after)
            );
            let label = format!("{:<16}", c.rule.label());
            if use_colors && c.message.is_some() {
                format!("{} {}  {}", label.bold(), multiplier.bold(), running)
            } else if use_colors {
                format!("{} {}  {}", label.dimmed(), multiplier.dimmed(), running.dimmed())
            } else {
                format!("{} {}  {}", label, multiplier, running)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Rules with their effective multipliers and config keys.
pub fn format_rules(ranker: &Ranker) -> String {
    Rule::ALL
        .iter()
        .enumerate()
        .map(|(idx, rule)| {
            format!(
                "{:>2}. {:<16} {:>6}  {:<18} {}",
                idx + 1,
                rule.label(),
                format_multiplier(ranker.multiplier(*rule)),
                rule.config_key(),
                rule.message()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Pretty JSON: `{ "score": .., "validations": [{ "message": .., "type": .. }] }`
pub fn format_json(result: &RankResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(result)
}

/// Single-line JSON for batch mode, with the scored text included.
pub fn format_json_line(scored: &ScoredText) -> serde_json::Result<String> {
    serde_json::to_string(scored)
}

/// A message with its ranking, for batch output
#[derive(Debug, Serialize)]
pub struct ScoredText<'a> {
    pub text: &'a str,
    #[serde(flatten)]
    pub result: RankResult,
}

/// Format as tab-separated values for scripting
/// Columns: score, validation count, text (no headers, no colors)
pub fn format_tsv(scored: &[ScoredText]) -> String {
    scored
        .iter()
        .map(|s| {
            format!(
                "{}\t{}\t{}",
                format_score(s.result.score),
                s.result.validations.len(),
                s.text.replace('\t', " ")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::rank;

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(0.0), "0");
        assert_eq!(format_score(1.0), "1");
        assert_eq!(format_score(2.0), "2");
        assert_eq!(format_score(1.2), "1.2");
        assert_eq!(format_score(0.8 * 0.6), "0.48");
        assert_eq!(format_score(0.00001), "0");
    }

    #[test]
    fn test_format_multiplier() {
        assert_eq!(format_multiplier(2.0), "x2");
        assert_eq!(format_multiplier(0.6), "x0.6");
    }

    #[test]
    fn test_format_result_plain() {
        let result = rank("follow https://facebook.com/me with pics", true);
        let output = format_result(&result, false);
        assert_eq!(
            output,
            "Score: 1.6\n  - Contains link to another social network. (0.8x)\n  + Contains image or video. (2x)"
        );
    }

    #[test]
    fn test_format_result_neutral() {
        assert_eq!(format_result(&rank("hello world", false), false), "Score: 1");
    }

    #[test]
    fn test_format_breakdown_lists_every_rule() {
        let ranker = Ranker::builtin().unwrap();
        let contributions = ranker.contributions("hello #a #b", false).unwrap();
        let output = format_breakdown(&contributions, false);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("News link"));
        assert!(lines[3].contains("x0.6"));
        assert!(lines[3].ends_with("1 -> 0.6"));
    }

    #[test]
    fn test_format_breakdown_empty() {
        assert_eq!(format_breakdown(&[], false), "Too short to score.");
    }

    #[test]
    fn test_format_rules() {
        let ranker = Ranker::builtin().unwrap();
        let output = format_rules(&ranker);
        assert_eq!(output.lines().count(), 5);
        assert!(output.lines().next().unwrap().contains("news_url"));
        assert!(output.lines().last().unwrap().contains("x2"));
    }

    #[test]
    fn test_format_json() {
        let json = format_json(&rank("", false)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["score"], 0.0);
        assert!(value["validations"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_format_json_line() {
        let scored = ScoredText {
            text: "hello world",
            result: rank("hello world", true),
        };
        let line = format_json_line(&scored).unwrap();
        assert!(!line.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["text"], "hello world");
        assert_eq!(value["validations"][0]["type"], "positive");
    }

    #[test]
    fn test_format_tsv() {
        let scored = vec![
            ScoredText {
                text: "hello\tworld",
                result: rank("hello world", false),
            },
            ScoredText {
                text: "#a #b",
                result: rank("#a #b", false),
            },
        ];
        assert_eq!(format_tsv(&scored), "1\t0\thello world\n0.6\t1\t#a #b");
    }
}
