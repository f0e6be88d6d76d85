use serde::Serialize;

use crate::detect::{count_hashtags, DomainMatcher, OffensiveClassifier, UrlExtractor};

/// The reach heuristics, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    NewsUrl,
    CompetitorUrl,
    Offensive,
    MultipleHashtags,
    Media,
}

impl Rule {
    /// Fixed evaluation order. Validations are reported in this order.
    pub const ALL: [Rule; 5] = [
        Rule::NewsUrl,
        Rule::CompetitorUrl,
        Rule::Offensive,
        Rule::MultipleHashtags,
        Rule::Media,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Rule::NewsUrl => "News link",
            Rule::CompetitorUrl => "Competitor link",
            Rule::Offensive => "Offensive",
            Rule::MultipleHashtags => "Hashtags",
            Rule::Media => "Media",
        }
    }

    /// Key used for this rule's multiplier in the config file.
    pub fn config_key(&self) -> &'static str {
        match self {
            Rule::NewsUrl => "news_url",
            Rule::CompetitorUrl => "competitor_url",
            Rule::Offensive => "offensive",
            Rule::MultipleHashtags => "multiple_hashtags",
            Rule::Media => "media",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Rule::NewsUrl => "Contains a news link.",
            Rule::CompetitorUrl => "Contains link to another social network.",
            Rule::Offensive => "Tweet is offensive.",
            Rule::MultipleHashtags => "Contains too many hashtags.",
            Rule::Media => "Contains image or video.",
        }
    }

    pub fn default_multiplier(&self) -> f64 {
        match self {
            Rule::NewsUrl => 1.2,
            Rule::CompetitorUrl => 0.8,
            Rule::Offensive => 0.1,
            Rule::MultipleHashtags => 0.6,
            Rule::Media => 2.0,
        }
    }

    /// Whether this rule's condition holds for `input`.
    pub fn detect(&self, input: &NormalizedInput<'_>, detectors: &Detectors) -> bool {
        let text = input.normalized_text.as_str();
        match self {
            Rule::NewsUrl => detectors.news.any_link_matches(&detectors.urls, text),
            Rule::CompetitorUrl => detectors.competitors.any_link_matches(&detectors.urls, text),
            Rule::Offensive => detectors.classifier.is_offensive(text),
            Rule::MultipleHashtags => count_hashtags(text) > 1,
            Rule::Media => input.has_media,
        }
    }

    /// Evaluate the rule with the given multiplier for when it fires.
    pub fn evaluate(
        &self,
        input: &NormalizedInput<'_>,
        detectors: &Detectors,
        multiplier: f64,
    ) -> RuleOutcome {
        if self.detect(input, detectors) {
            RuleOutcome::fired(multiplier, self.message())
        } else {
            RuleOutcome::NEUTRAL
        }
    }
}

/// Compiled detection tables shared by every rule.
pub struct Detectors {
    pub urls: UrlExtractor,
    pub news: DomainMatcher,
    pub competitors: DomainMatcher,
    pub classifier: Box<dyn OffensiveClassifier>,
}

impl std::fmt::Debug for Detectors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Detectors")
            .field("news", &self.news)
            .field("competitors", &self.competitors)
            .finish_non_exhaustive()
    }
}

/// Input as seen by the rules. Lowercased once, original kept alongside.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedInput<'a> {
    pub normalized_text: String,
    pub original_text: &'a str,
    pub has_media: bool,
}

impl<'a> NormalizedInput<'a> {
    pub fn new(text: &'a str, has_media: bool) -> Self {
        Self {
            normalized_text: text.to_lowercase(),
            original_text: text,
            has_media,
        }
    }

    /// Length of the normalized text in UTF-16 code units, so characters
    /// outside the BMP (most emoji) count as two.
    pub fn utf16_len(&self) -> usize {
        self.normalized_text.encode_utf16().count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleOutcome {
    pub multiplier: f64,
    pub message: Option<&'static str>,
}

impl RuleOutcome {
    pub const NEUTRAL: RuleOutcome = RuleOutcome {
        multiplier: 1.0,
        message: None,
    };

    /// Outcome of a rule that detected its condition. A neutral multiplier
    /// stays silent.
    pub fn fired(multiplier: f64, message: &'static str) -> Self {
        if multiplier == 1.0 {
            Self::NEUTRAL
        } else {
            Self {
                multiplier,
                message: Some(message),
            }
        }
    }

    pub fn is_neutral(&self) -> bool {
        self.message.is_none() || self.multiplier == 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::LexiconClassifier;

    fn detectors() -> Detectors {
        Detectors {
            urls: UrlExtractor,
            news: DomainMatcher::new(&["cnn"], &["com"]).unwrap(),
            competitors: DomainMatcher::new(&["facebook"], &["com"]).unwrap(),
            classifier: Box::new(LexiconClassifier::builtin().unwrap()),
        }
    }

    #[test]
    fn test_normalized_input_lowercases_once() {
        let input = NormalizedInput::new("Hello WORLD", true);
        assert_eq!(input.normalized_text, "hello world");
        assert_eq!(input.original_text, "Hello WORLD");
        assert!(input.has_media);
    }

    #[test]
    fn test_len_counts_utf16_units() {
        assert_eq!(NormalizedInput::new("é", false).utf16_len(), 1);
        assert_eq!(NormalizedInput::new("ab", false).utf16_len(), 2);
        assert_eq!(NormalizedInput::new("😀", false).utf16_len(), 2);
    }

    #[test]
    fn test_neutral_multiplier_is_silent() {
        let outcome = RuleOutcome::fired(1.0, "anything");
        assert_eq!(outcome, RuleOutcome::NEUTRAL);
        assert!(outcome.is_neutral());
    }

    #[test]
    fn test_fired_keeps_message() {
        let outcome = RuleOutcome::fired(0.6, Rule::MultipleHashtags.message());
        assert_eq!(outcome.multiplier, 0.6);
        assert_eq!(outcome.message, Some("Contains too many hashtags."));
    }

    #[test]
    fn test_rules_use_normalized_text() {
        let d = detectors();
        let input = NormalizedInput::new("HTTPS://CNN.COM/story", false);
        assert!(Rule::NewsUrl.detect(&input, &d));
    }

    #[test]
    fn test_single_hashtag_does_not_fire() {
        let d = detectors();
        let input = NormalizedInput::new("just #one", false);
        assert_eq!(
            Rule::MultipleHashtags.evaluate(&input, &d, 0.6),
            RuleOutcome::NEUTRAL
        );
    }

    #[test]
    fn test_media_rule_reads_flag() {
        let d = detectors();
        let with = NormalizedInput::new("hi there", true);
        let without = NormalizedInput::new("hi there", false);
        assert_eq!(Rule::Media.evaluate(&with, &d, 2.0).multiplier, 2.0);
        assert!(Rule::Media.evaluate(&without, &d, 2.0).is_neutral());
    }

    #[test]
    fn test_rule_order() {
        assert_eq!(
            Rule::ALL,
            [
                Rule::NewsUrl,
                Rule::CompetitorUrl,
                Rule::Offensive,
                Rule::MultipleHashtags,
                Rule::Media,
            ]
        );
    }
}
