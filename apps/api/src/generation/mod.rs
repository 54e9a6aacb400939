// Summary generation: prompt building, external tiers and the rule-based fallback.

pub mod fallback;
pub mod prompts;
pub mod summary;

pub use summary::SummaryGenerator;
