pub mod config;
pub mod detect;
pub mod output;
pub mod prompt;
pub mod scoring;

pub use scoring::{rank, RankResult, Ranker, Validation, ValidationKind};
