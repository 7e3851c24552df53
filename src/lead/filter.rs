use std::str::FromStr;

use super::types::ScoredLead;

/// Ordering applied to a scored batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Highest score first; ties keep input order
    ScoreDesc,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "score_desc" => Ok(SortOrder::ScoreDesc),
            other => Err(format!("unknown sort order '{}' (expected score_desc)", other)),
        }
    }
}

/// Selection over scored leads: minimum score filter plus optional sort.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadQuery {
    /// Keep leads scoring at least this much; 0 keeps everything
    pub min_score: u8,
    pub sort: Option<SortOrder>,
}

impl LeadQuery {
    pub fn apply(&self, scored: Vec<ScoredLead>) -> Vec<ScoredLead> {
        let mut selected: Vec<ScoredLead> = if self.min_score > 0 {
            scored
                .into_iter()
                .filter(|lead| lead.score >= self.min_score)
                .collect()
        } else {
            scored
        };

        if let Some(SortOrder::ScoreDesc) = self.sort {
            // sort_by is stable, so equal scores stay in input order
            selected.sort_by(|a, b| b.score.cmp(&a.score));
        }

        selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lead::Lead;
    use crate::scoring::Priority;

    fn scored(id: &str, score: u8) -> ScoredLead {
        ScoredLead {
            lead: Lead::new().with("id", id),
            score,
            priority: Priority::Cold,
        }
    }

    fn ids(leads: &[ScoredLead]) -> Vec<String> {
        leads.iter().map(|l| l.lead.text("id")).collect()
    }

    #[test]
    fn test_default_query_keeps_everything_in_order() {
        let leads = vec![scored("a", 10), scored("b", 90), scored("c", 0)];
        let result = LeadQuery::default().apply(leads);
        assert_eq!(ids(&result), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_min_score_is_inclusive() {
        let leads = vec![scored("a", 69), scored("b", 70), scored("c", 95)];
        let query = LeadQuery {
            min_score: 70,
            sort: None,
        };
        assert_eq!(ids(&query.apply(leads)), vec!["b", "c"]);
    }

    #[test]
    fn test_sort_desc_is_stable() {
        let leads = vec![
            scored("a", 40),
            scored("b", 80),
            scored("c", 40),
            scored("d", 80),
        ];
        let query = LeadQuery {
            min_score: 0,
            sort: Some(SortOrder::ScoreDesc),
        };
        assert_eq!(ids(&query.apply(leads)), vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_parse_sort_order() {
        assert_eq!("score_desc".parse::<SortOrder>(), Ok(SortOrder::ScoreDesc));
        assert!("score_asc".parse::<SortOrder>().is_err());
    }
}
