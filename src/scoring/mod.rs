pub mod config;
pub mod engine;
pub mod rules;
pub mod validation;

pub use config::*;
pub use engine::{rank, RankResult, Ranker, RuleContribution, Validation, ValidationKind};
pub use rules::{NormalizedInput, Rule, RuleOutcome};
pub use validation::validate_scoring;
