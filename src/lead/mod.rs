pub mod filter;
pub mod storage;
pub mod summary;
pub mod types;

pub use filter::{LeadQuery, SortOrder};
pub use storage::{load_leads, parse_leads};
pub use summary::{summarize, CountryCount, IndustryAverage, LeadSummary};
pub use types::{Lead, ScoredLead};
