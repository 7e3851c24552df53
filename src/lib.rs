//! Heuristic lead scoring.
//!
//! The [`scoring`] core is pure: it turns a [`lead::Lead`], a
//! [`scoring::Weights`] and optional [`scoring::IcpPreferences`] into a
//! 0-100 score and a Hot/Warm/Cold priority. Loading weights and leads
//! from disk lives in [`config`] and [`lead`]; [`output`] renders results.

pub mod config;
pub mod lead;
pub mod output;
pub mod scoring;

pub use lead::{Lead, ScoredLead};
pub use scoring::{
    priority_label, score_and_label_leads, score_lead, IcpPreferences, Priority, Weights,
};
