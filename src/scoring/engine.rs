use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::config::ScoringConfig;
use super::rules::{Detectors, NormalizedInput, Rule, RuleOutcome};
use crate::detect::{DomainMatcher, LexiconClassifier, OffensiveClassifier, UrlExtractor};

/// Inputs shorter than this (in normalized characters) score zero.
pub const MIN_TEXT_LEN: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationKind {
    Positive,
    Negative,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Validation {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: ValidationKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankResult {
    pub score: f64,
    pub validations: Vec<Validation>,
}

impl RankResult {
    pub fn degenerate() -> Self {
        Self {
            score: 0.0,
            validations: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RuleContribution {
    pub rule: Rule,
    pub multiplier: f64,
    pub message: Option<&'static str>,
    pub before: f64, // Score before this rule
    pub after: f64,  // Score after this rule
}

impl RuleContribution {
    /// User-facing validation, if this rule moved the score.
    pub fn validation(&self) -> Option<Validation> {
        let outcome = RuleOutcome {
            multiplier: self.multiplier,
            message: self.message,
        };
        if outcome.is_neutral() {
            return None;
        }
        let message = self.message?;
        let kind = if self.multiplier >= 1.0 {
            ValidationKind::Positive
        } else {
            ValidationKind::Negative
        };
        Some(Validation {
            message: format!("{} ({}x)", message, self.multiplier.abs()),
            kind,
        })
    }
}

/// Compiled detection tables and per-rule multipliers.
///
/// Immutable once built; share one across threads by reference.
#[derive(Debug)]
pub struct Ranker {
    detectors: Detectors,
    multipliers: [f64; 5],
}

static DEFAULT_RANKER: Lazy<Ranker> =
    Lazy::new(|| Ranker::builtin().expect("built-in detection tables compile"));

/// Score `text` with the built-in tables.
pub fn rank(text: &str, has_media: bool) -> RankResult {
    DEFAULT_RANKER.rank(text, has_media)
}

impl Ranker {
    pub fn builtin() -> Result<Self> {
        Self::from_config(&ScoringConfig::default())
    }

    pub fn from_config(config: &ScoringConfig) -> Result<Self> {
        let (news_names, news_tlds) = config.news_domains();
        let news = DomainMatcher::new(&news_names, &news_tlds)
            .context("Failed to build news domain table")?;

        let (competitor_names, competitor_tlds) = config.competitor_domains();
        let competitors = DomainMatcher::new(&competitor_names, &competitor_tlds)
            .context("Failed to build competitor domain table")?;

        let profanity = config.profanity.clone().unwrap_or_default();
        let classifier = LexiconClassifier::new(
            crate::detect::profanity::builtin_words(),
            profanity.extra_words.unwrap_or_default(),
            profanity.allowed_words.unwrap_or_default(),
        )?;

        tracing::debug!(
            news_domains = news_names.len(),
            competitor_domains = competitor_names.len(),
            lexicon_words = classifier.len(),
            "compiled detection tables"
        );

        Ok(Self {
            detectors: Detectors {
                urls: UrlExtractor,
                news,
                competitors,
                classifier: Box::new(classifier),
            },
            multipliers: Rule::ALL.map(|rule| config.multiplier(rule)),
        })
    }

    /// Replace the offensive-content classifier.
    pub fn with_classifier(mut self, classifier: impl OffensiveClassifier + 'static) -> Self {
        self.detectors.classifier = Box::new(classifier);
        self
    }

    pub fn multiplier(&self, rule: Rule) -> f64 {
        self.multipliers[rule as usize]
    }

    /// Every rule's outcome in evaluation order with the running score.
    /// `None` when the input is too short to score.
    pub fn contributions(&self, text: &str, has_media: bool) -> Option<Vec<RuleContribution>> {
        let input = NormalizedInput::new(text, has_media);
        if input.utf16_len() < MIN_TEXT_LEN {
            return None;
        }

        let mut score = 1.0;
        let contributions = Rule::ALL
            .iter()
            .map(|&rule| {
                let RuleOutcome {
                    multiplier,
                    message,
                } = rule.evaluate(&input, &self.detectors, self.multiplier(rule));
                let before = score;
                score *= multiplier;
                RuleContribution {
                    rule,
                    multiplier,
                    message,
                    before,
                    after: score,
                }
            })
            .collect();
        Some(contributions)
    }

    pub fn rank(&self, text: &str, has_media: bool) -> RankResult {
        let Some(contributions) = self.contributions(text, has_media) else {
            return RankResult::degenerate();
        };

        let score = contributions
            .iter()
            .fold(1.0, |product, c| product * c.multiplier);
        let validations = contributions
            .iter()
            .filter_map(RuleContribution::validation)
            .collect();

        RankResult { score, validations }
    }
}
