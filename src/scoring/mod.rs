pub mod config;
pub mod engine;
pub mod normalize;
pub mod prefs;
pub mod priority;
pub mod validation;

pub use config::Weights;
pub use engine::{
    explain_lead, score_and_label_leads, score_lead, FactorContribution, ScoreBreakdown,
};
pub use normalize::{parse_amount, to_number, try_parse_amount};
pub use prefs::{normalize_prefs, parse_prefs_arg, IcpPreferences};
pub use priority::{priority_label, Priority};
pub use validation::validate_weights;
