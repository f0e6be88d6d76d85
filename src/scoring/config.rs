use serde::{Deserialize, Serialize};

use super::rules::Rule;

pub const DEFAULT_NEWS_NAMES: &[&str] = &[
    "cnn",
    "nytimes",
    "bbc",
    "washingtonpost",
    "buzzfeednews",
    "reuters",
    "theguardian",
    "aljazeera",
    "npr",
    "foxnews",
];

pub const DEFAULT_NEWS_TLDS: &[&str] = &["com", "org", "co.uk", "net", "gov"];

pub const DEFAULT_COMPETITOR_NAMES: &[&str] = &[
    "facebook",
    "instagram",
    "snapchat",
    "linkedin",
    "tiktok",
    "reddit",
    "joinmastodon",
    "gab",
    "minds",
    "parler",
    "mewe",
    "telegram",
    "signal",
    "clubhouse",
];

pub const DEFAULT_COMPETITOR_TLDS: &[&str] = &["com", "org"];

/// Main scoring configuration.
///
/// Every field is optional; anything left out falls back to the built-in
/// tables. Multipliers are combined by product, `1.0` is neutral.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   news_url: 1.5
///   multiple_hashtags: 0.5
///   news_domains:
///     names: ["cnn", "bbc"]
///   profanity:
///     allowed_words: ["crap"]
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    /// Multiplier when a link points at a news site (default: 1.2)
    #[serde(default)]
    pub news_url: Option<f64>,

    /// Multiplier when a link points at another social network (default: 0.8)
    #[serde(default)]
    pub competitor_url: Option<f64>,

    /// Multiplier when the text is offensive (default: 0.1)
    #[serde(default)]
    pub offensive: Option<f64>,

    /// Multiplier when the text has more than one hashtag (default: 0.6)
    #[serde(default)]
    pub multiple_hashtags: Option<f64>,

    /// Multiplier when an image or video is attached (default: 2.0)
    #[serde(default)]
    pub media: Option<f64>,

    /// Domains that count as news sites
    #[serde(default)]
    pub news_domains: Option<DomainList>,

    /// Domains that count as competing social networks
    #[serde(default)]
    pub competitor_domains: Option<DomainList>,

    /// Adjustments to the built-in profanity lexicon
    #[serde(default)]
    pub profanity: Option<ProfanityConfig>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            news_url: Some(Rule::NewsUrl.default_multiplier()),
            competitor_url: Some(Rule::CompetitorUrl.default_multiplier()),
            offensive: Some(Rule::Offensive.default_multiplier()),
            multiple_hashtags: Some(Rule::MultipleHashtags.default_multiplier()),
            media: Some(Rule::Media.default_multiplier()),
            news_domains: Some(DomainList::news()),
            competitor_domains: Some(DomainList::competitors()),
            profanity: None,
        }
    }
}

impl ScoringConfig {
    /// Configured multiplier for `rule`, or its built-in default.
    pub fn multiplier(&self, rule: Rule) -> f64 {
        let configured = match rule {
            Rule::NewsUrl => self.news_url,
            Rule::CompetitorUrl => self.competitor_url,
            Rule::Offensive => self.offensive,
            Rule::MultipleHashtags => self.multiple_hashtags,
            Rule::Media => self.media,
        };
        configured.unwrap_or_else(|| rule.default_multiplier())
    }

    /// Effective news domain names and tlds.
    pub fn news_domains(&self) -> (Vec<String>, Vec<String>) {
        resolve(
            self.news_domains.as_ref(),
            DEFAULT_NEWS_NAMES,
            DEFAULT_NEWS_TLDS,
        )
    }

    /// Effective competitor domain names and tlds.
    pub fn competitor_domains(&self) -> (Vec<String>, Vec<String>) {
        resolve(
            self.competitor_domains.as_ref(),
            DEFAULT_COMPETITOR_NAMES,
            DEFAULT_COMPETITOR_TLDS,
        )
    }
}

fn resolve(
    list: Option<&DomainList>,
    default_names: &[&str],
    default_tlds: &[&str],
) -> (Vec<String>, Vec<String>) {
    let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    let names = list
        .and_then(|l| l.names.clone())
        .unwrap_or_else(|| owned(default_names));
    let tlds = list
        .and_then(|l| l.tlds.clone())
        .unwrap_or_else(|| owned(default_tlds));
    (names, tlds)
}

/// A set of `name.tld` domains, e.g. names `["bbc"]` with tlds `["co.uk"]`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DomainList {
    /// Registrable names without tld (e.g. "cnn")
    #[serde(default)]
    pub names: Option<Vec<String>>,

    /// Top-level domains, dots allowed (e.g. "co.uk")
    #[serde(default)]
    pub tlds: Option<Vec<String>>,
}

impl DomainList {
    pub fn news() -> Self {
        Self {
            names: Some(DEFAULT_NEWS_NAMES.iter().map(|s| s.to_string()).collect()),
            tlds: Some(DEFAULT_NEWS_TLDS.iter().map(|s| s.to_string()).collect()),
        }
    }

    pub fn competitors() -> Self {
        Self {
            names: Some(DEFAULT_COMPETITOR_NAMES.iter().map(|s| s.to_string()).collect()),
            tlds: Some(DEFAULT_COMPETITOR_TLDS.iter().map(|s| s.to_string()).collect()),
        }
    }
}

/// Profanity lexicon adjustments.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ProfanityConfig {
    /// Words treated as offensive in addition to the built-in lexicon
    #[serde(default)]
    pub extra_words: Option<Vec<String>>,

    /// Built-in words that should not count as offensive
    #[serde(default)]
    pub allowed_words: Option<Vec<String>>,
}
