pub mod hashtags;
pub mod profanity;
pub mod urls;

pub use hashtags::count_hashtags;
pub use profanity::{LexiconClassifier, OffensiveClassifier};
pub use urls::{DomainMatcher, UrlExtractor};
