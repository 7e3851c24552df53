use std::collections::HashMap;

use serde::Serialize;

use super::types::ScoredLead;
use crate::scoring::Priority;

/// How many industries the summary keeps
pub const TOP_INDUSTRIES: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndustryAverage {
    pub industry: String,
    /// Mean score, rounded to a whole point
    pub average: u8,
    pub leads: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryCount {
    pub country: String,
    pub hot: usize,
}

/// Dashboard aggregates over a scored batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LeadSummary {
    /// Best industries by average score, highest first
    pub top_industries: Vec<IndustryAverage>,
    /// Hot leads per country, in order of first appearance
    pub hot_by_country: Vec<CountryCount>,
}

/// Summarize a scored batch.
///
/// Leads without an industry or country are left out of that aggregate.
/// Ties keep the order in which industries first appear.
pub fn summarize(leads: &[ScoredLead]) -> LeadSummary {
    LeadSummary {
        top_industries: top_industries(leads, TOP_INDUSTRIES),
        hot_by_country: hot_by_country(leads),
    }
}

fn top_industries(leads: &[ScoredLead], limit: usize) -> Vec<IndustryAverage> {
    let mut totals: Vec<(String, u64, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for scored in leads {
        let industry = scored.lead.text("industry");
        if industry.is_empty() {
            continue;
        }
        let slot = *index.entry(industry.clone()).or_insert_with(|| {
            totals.push((industry, 0, 0));
            totals.len() - 1
        });
        totals[slot].1 += u64::from(scored.score);
        totals[slot].2 += 1;
    }

    let mut averages: Vec<IndustryAverage> = totals
        .into_iter()
        .map(|(industry, sum, count)| IndustryAverage {
            industry,
            average: (sum as f64 / count as f64).round() as u8,
            leads: count,
        })
        .collect();

    averages.sort_by(|a, b| b.average.cmp(&a.average));
    averages.truncate(limit);
    averages
}

fn hot_by_country(leads: &[ScoredLead]) -> Vec<CountryCount> {
    let mut counts: Vec<CountryCount> = Vec::new();

    for scored in leads.iter().filter(|s| s.priority == Priority::Hot) {
        let country = scored.lead.text("country");
        if country.is_empty() {
            continue;
        }
        match counts.iter_mut().find(|c| c.country == country) {
            Some(entry) => entry.hot += 1,
            None => counts.push(CountryCount { country, hot: 1 }),
        }
    }

    counts
}
