use super::config::Weights;
use super::prefs::IcpPreferences;
use super::priority::priority_label;
use crate::lead::{Lead, ScoredLead};

/// Growjo ranks at or below this count as a growth signal
const GROWJO_RANK_CUTOFF: f64 = 10_000.0;

const CONTACT_FIELDS: [&str; 3] = ["email", "phone", "linkedin"];

#[derive(Debug, Clone, PartialEq)]
pub struct FactorContribution {
    pub label: String,       // e.g. "Employee fit", "Industry match"
    pub description: String, // e.g. "120 employees in band 10-200"
    pub points: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    pub factors: Vec<FactorContribution>,
    /// Sum of contributions before clamping and rounding
    pub raw: f64,
    pub score: u8,
}

/// Score a lead from 0 to 100.
///
/// Pure: reads only its arguments and never touches `lead`.
pub fn score_lead(lead: &Lead, weights: &Weights, prefs: Option<&IcpPreferences>) -> u8 {
    explain_lead(lead, weights, prefs).score
}

/// Score a lead and report which factors contributed.
///
/// Factors whose preconditions do not hold are left out of the breakdown.
pub fn explain_lead(
    lead: &Lead,
    weights: &Weights,
    prefs: Option<&IcpPreferences>,
) -> ScoreBreakdown {
    let mut factors = Vec::new();

    // Employee band fit
    let employees = lead.number_of_any(&["employee_count", "employees"]);
    if employees > 0.0 {
        let fit = band_fit(employees, weights.employee_min, weights.employee_max);
        factors.push(FactorContribution {
            label: "Employee fit".to_string(),
            description: format!(
                "{} employees vs band {}-{} (fit {:.2})",
                employees, weights.employee_min, weights.employee_max, fit
            ),
            points: fit * weights.w_employee_fit,
        });
    }

    // Revenue band fit, preferences override the band
    let revenue = lead.number_of_any(&["revenue_usd", "revenue"]);
    let rev_min = prefs.and_then(|p| p.rev_min).unwrap_or(weights.rev_min);
    let rev_max = prefs.and_then(|p| p.rev_max).unwrap_or(weights.rev_max);
    if revenue > 0.0 && rev_min > 0.0 && rev_max > 0.0 && rev_max >= rev_min {
        let fit = band_fit(revenue, rev_min, rev_max);
        factors.push(FactorContribution {
            label: "Revenue fit".to_string(),
            description: format!(
                "${} vs band ${}-${} (fit {:.2})",
                revenue, rev_min, rev_max, fit
            ),
            points: fit * weights.w_revenue_fit,
        });
    }

    if let Some(prefs) = prefs {
        let industry = lead.text("industry");
        if prefs.matches_industry(&industry) {
            factors.push(FactorContribution {
                label: "Industry match".to_string(),
                description: format!("'{}' is a preferred industry", industry),
                points: weights.w_industry_match,
            });
        }

        let country = lead.text("country");
        let state = lead.text("state");
        if prefs.matches_location(&country, &state) {
            factors.push(FactorContribution {
                label: "Location match".to_string(),
                description: format!("country '{}', state '{}'", country, state),
                points: weights.w_location_match,
            });
        }
    }

    let present: Vec<&str> = CONTACT_FIELDS
        .iter()
        .copied()
        .filter(|field| lead.is_truthy(field))
        .collect();
    if !present.is_empty() {
        factors.push(FactorContribution {
            label: "Contact completeness".to_string(),
            description: format!("{}/3 ({})", present.len(), present.join(", ")),
            points: present.len() as f64 / 3.0 * weights.w_contact_completeness,
        });
    }

    let rank = lead.number("growjo_rank");
    let ranked = rank != 0.0 && rank <= GROWJO_RANK_CUTOFF;
    let hiring = lead.is_truthy("hiring");
    if ranked || hiring {
        let description = match (ranked, hiring) {
            (true, true) => format!("growjo rank {} and hiring", rank),
            (true, false) => format!("growjo rank {}", rank),
            _ => "hiring".to_string(),
        };
        factors.push(FactorContribution {
            label: "Growth signal".to_string(),
            description,
            points: weights.w_growth_signal,
        });
    }

    // fold from +0.0; an empty f64 sum is -0.0
    let raw = factors.iter().fold(0.0, |acc, f| acc + f.points);
    ScoreBreakdown {
        score: finalize(raw),
        raw,
        factors,
    }
}

/// Score and label a batch, preserving input order.
///
/// Without weights the built-in defaults apply.
pub fn score_and_label_leads(
    leads: &[Lead],
    weights: Option<&Weights>,
    prefs: Option<&IcpPreferences>,
) -> Vec<ScoredLead> {
    let defaults = Weights::default();
    let weights = weights.unwrap_or(&defaults);

    leads
        .iter()
        .map(|lead| {
            let score = score_lead(lead, weights, prefs);
            ScoredLead {
                lead: lead.clone(),
                score,
                priority: priority_label(score, weights),
            }
        })
        .collect()
}

/// How close `value` sits to `[min, max]`: 1.0 inside, tapering outside.
/// A non-positive `min` means there is no lower bound.
fn band_fit(value: f64, min: f64, max: f64) -> f64 {
    let fit = if min > 0.0 && value < min {
        value / min
    } else if value > max {
        max / value
    } else {
        1.0
    };
    fit.clamp(0.0, 1.0)
}

// Clamp to [0, 100], then round half away from zero.
fn finalize(raw: f64) -> u8 {
    if raw.is_nan() {
        return 0;
    }
    raw.clamp(0.0, 100.0).round() as u8
}
