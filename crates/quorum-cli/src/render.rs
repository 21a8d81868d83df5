//! Terminal rendering of recommendations.
//!
//! Two shapes, matching the two ways the tool is read:
//!
//! - the **short form**: one line per recommendation with the schedule and
//!   both score summaries, numbers colorized on a TTY
//! - the **full form**: CSV-style per-person participation and per-pair
//!   interaction probability tables for auditing, followed by the short line

use std::io::{IsTerminal as _, stdout};

use crossterm::style::Stylize as _;
use quorum_evaluator::{ScoreSummary, SurvivalTable, pairs};
use quorum_search::Recommendation;

/// Rounds to a fixed number of decimal steps (`frac` = 10^digits).
fn round_to(value: f64, frac: f64) -> f64 {
    (value * frac).round() / frac
}

/// Rounds a score for the short form. The mid range gets fewer digits; the
/// interesting extremes keep more.
fn round_score(value: f64) -> f64 {
    let frac = if value > 0.95 {
        1e4
    } else if value > 0.2 {
        1e3
    } else {
        1e4
    };
    round_to(value, frac)
}

/// Formats a probability the way the short form spells numbers: a leading
/// `0.` collapses to `.`.
fn format_value(value: f64) -> String {
    let text = value.to_string();
    match text.strip_prefix("0.") {
        Some(rest) => format!(".{rest}"),
        None => text,
    }
}

fn paint(text: String) -> String {
    if stdout().is_terminal() {
        text.yellow().to_string()
    } else {
        text
    }
}

fn format_summary(summary: &ScoreSummary) -> String {
    let field = |value: f64| paint(format_value(round_score(value)));
    format!(
        "{{ avg: {}, min: {}, stdev: {}, fair: {} }}",
        field(summary.avg),
        field(summary.min),
        field(summary.stdev),
        field(summary.fair)
    )
}

/// One-line summary of a recommendation.
#[must_use]
pub fn format_short(recommendation: &Recommendation) -> String {
    let times = recommendation
        .schedule
        .slots()
        .iter()
        .map(|slot| paint(slot.to_string()))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "times: [ {times} ], participation: {}, interaction: {}",
        format_summary(&recommendation.scores.participation),
        format_summary(&recommendation.scores.interaction),
    )
}

fn print_table(table: &SurvivalTable, labels: &[String]) {
    assert_eq!(
        labels.len(),
        table.row_count(),
        "table row count does not match label count"
    );
    let header = (1..=table.row_len())
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(",");
    println!("Number of meetings,{header}");
    for (label, row) in labels.iter().zip(table.rows()) {
        let values = row
            .iter()
            .map(|&v| round_to(v, 1e5).to_string())
            .collect::<Vec<_>>()
            .join(",");
        println!("{label},{values}");
    }
}

/// Full audit report: both probability tables plus the short line.
pub fn print_full(recommendation: &Recommendation, names: &[String]) {
    let pair_labels: Vec<String> = pairs(names.len())
        .map(|(i, j)| format!("{}+{}", names[i], names[j]))
        .collect();

    println!();
    println!("Interaction:");
    print_table(&recommendation.interaction, &pair_labels);
    println!();
    println!("Participation:");
    print_table(&recommendation.participation, names);
    println!();
    println!("{}", format_short(recommendation));
    println!();
}
