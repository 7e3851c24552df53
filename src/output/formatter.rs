use std::io::IsTerminal;
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use terminal_size::{Width, terminal_size};

use crate::lead::{Lead, LeadSummary, ScoredLead};
use crate::scoring::{Priority, ScoreBreakdown};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Priority padded to 4 chars, colored by tier
pub fn format_priority(priority: Priority, use_colors: bool) -> String {
    let padded = format!("{:<4}", priority.as_str());
    if !use_colors {
        return padded;
    }
    match priority {
        Priority::Hot => padded.red().bold().to_string(),
        Priority::Warm => padded.yellow().to_string(),
        Priority::Cold => padded.blue().to_string(),
    }
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

fn display_name(lead: &Lead) -> String {
    lead.name()
        .map(str::to_string)
        .unwrap_or_else(|| match lead.text("id") {
            id if id.is_empty() => "(unnamed)".to_string(),
            id => format!("#{}", id),
        })
}

/// "CA, US" style location; empty when neither field is set
fn format_location(lead: &Lead) -> String {
    [lead.text("state"), lead.text("country")]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Format scored leads as a table: Index, Score, Priority, Name, Industry, Location
/// No headers (one row per lead, see `format_scored_row`)
pub fn format_scored_table(leads: &[ScoredLead], use_colors: bool) -> String {
    if leads.is_empty() {
        return "No leads found.".to_string();
    }

    let term_width = get_terminal_width();
    leads
        .iter()
        .enumerate()
        .map(|(idx, scored)| format_row(idx + 1, scored, term_width, use_colors))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format one table row with a 1-based index
/// Index column: 3 chars (fits "99."), score right-aligned in 3 chars
pub fn format_scored_row(index: usize, scored: &ScoredLead, use_colors: bool) -> String {
    format_row(index, scored, get_terminal_width(), use_colors)
}

fn format_row(
    index: usize,
    scored: &ScoredLead,
    term_width: Option<usize>,
    use_colors: bool,
) -> String {
    let index_width = 3;
    let score_width = 3;
    let priority_width = 4;
    let separator = "  ";

    let index_str = format!("{:>2}.", index);
    let score_str = format!("{:>width$}", scored.score, width = score_width);
    let priority_str = format_priority(scored.priority, use_colors);

    let industry = scored.lead.text("industry");
    let location = format_location(&scored.lead);
    let fixed_width = index_width
        + 1
        + score_width
        + priority_width
        + separator.len() * 4
        + industry.chars().count()
        + location.chars().count();

    let name = display_name(&scored.lead);
    let name = match term_width {
        Some(width) if width > fixed_width + 10 => truncate_name(&name, width - fixed_width),
        // Very narrow terminal, show truncated
        Some(_) => truncate_name(&name, 20),
        // No terminal (pipe), don't truncate
        None => name,
    };

    let mut line = if use_colors {
        format!(
            "{} {}{}{}{}{}",
            index_str.dimmed(),
            score_str.bold(),
            separator,
            priority_str,
            separator,
            name
        )
    } else {
        format!(
            "{} {}{}{}{}{}",
            index_str, score_str, separator, priority_str, separator, name
        )
    };

    for extra in [industry, location] {
        if !extra.is_empty() {
            line.push_str(separator);
            if use_colors {
                line.push_str(&extra.cyan().to_string());
            } else {
                line.push_str(&extra);
            }
        }
    }
    line
}

/// Format scored leads as tab-separated values for scripting
/// Columns: score, priority, name, industry (no headers, no colors)
pub fn format_tsv(leads: &[ScoredLead]) -> String {
    leads
        .iter()
        .map(|scored| {
            format!(
                "{}\t{}\t{}\t{}",
                scored.score,
                scored.priority,
                display_name(&scored.lead),
                scored.lead.text("industry")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Pretty JSON array of the augmented lead records
pub fn format_json(leads: &[ScoredLead]) -> Result<String> {
    serde_json::to_string_pretty(leads).context("Failed to serialize scored leads")
}

/// One line per contributing factor, then the final score
pub fn format_breakdown(breakdown: &ScoreBreakdown, use_colors: bool) -> String {
    let mut lines: Vec<String> = breakdown
        .factors
        .iter()
        .map(|factor| {
            let points = format!("{:+6.1}", factor.points);
            if use_colors {
                format!(
                    "    {:<22}{}  {}",
                    factor.label,
                    points.green(),
                    factor.description.dimmed()
                )
            } else {
                format!("    {:<22}{}  {}", factor.label, points, factor.description)
            }
        })
        .collect();

    if lines.is_empty() {
        lines.push("    (no factors matched)".to_string());
    }

    lines.push(format!(
        "    {:<22}{:6.1} -> {}",
        "Total", breakdown.raw, breakdown.score
    ));
    lines.join("\n")
}

/// Top industries by average score, then Hot lead counts per country
pub fn format_summary(summary: &LeadSummary, use_colors: bool) -> String {
    let heading = |text: &str| {
        if use_colors {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    };

    let mut lines = vec![heading("Top industries by average score")];
    if summary.top_industries.is_empty() {
        lines.push("    (none)".to_string());
    }
    for entry in &summary.top_industries {
        lines.push(format!(
            "    {:>3}  {}  ({} {})",
            entry.average,
            entry.industry,
            entry.leads,
            if entry.leads == 1 { "lead" } else { "leads" }
        ));
    }

    lines.push(heading("Hot leads by country"));
    if summary.hot_by_country.is_empty() {
        lines.push("    (none)".to_string());
    }
    for entry in &summary.hot_by_country {
        lines.push(format!("    {:>3}  {}", entry.hot, entry.country));
    }

    lines.join("\n")
}
