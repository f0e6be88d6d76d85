use anyhow::{Context, Result};
use regex::Regex;
use std::collections::BTreeSet;

const BUILTIN_LEXICON: &str = include_str!("lexicon.txt");

/// Decides whether a piece of text is offensive.
///
/// Implementations must be synchronous and free of side effects: the ranker
/// calls this once per message and expects the same answer for the same text.
pub trait OffensiveClassifier: Send + Sync {
    fn is_offensive(&self, text: &str) -> bool;
}

/// Word-list classifier. A message is offensive when any lexicon entry
/// appears in it between ASCII word boundaries, ignoring case.
#[derive(Debug, Clone)]
pub struct LexiconClassifier {
    pattern: Option<Regex>,
    words: usize,
}

impl LexiconClassifier {
    /// Built-in lexicon, no adjustments.
    pub fn builtin() -> Result<Self> {
        Self::new(builtin_words(), std::iter::empty::<&str>(), std::iter::empty::<&str>())
    }

    /// Builds a classifier from `base` plus `extra`, minus anything in `allowed`.
    pub fn new<B, E, A>(base: B, extra: E, allowed: A) -> Result<Self>
    where
        B: IntoIterator,
        B::Item: AsRef<str>,
        E: IntoIterator,
        E::Item: AsRef<str>,
        A: IntoIterator,
        A::Item: AsRef<str>,
    {
        let allowed: BTreeSet<String> = allowed
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .collect();

        let words: BTreeSet<String> = base
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .chain(extra.into_iter().map(|w| w.as_ref().trim().to_lowercase()))
            .filter(|w| !w.is_empty() && !allowed.contains(w))
            .collect();

        if words.is_empty() {
            return Ok(Self {
                pattern: None,
                words: 0,
            });
        }

        // Longest first so overlapping entries prefer the full word.
        let mut ordered: Vec<&String> = words.iter().collect();
        ordered.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        let alternation = ordered
            .iter()
            .map(|w| regex::escape(w))
            .collect::<Vec<_>>()
            .join("|");
        let source = format!(r"(?i)(?-u:\b)(?:{})(?-u:\b)", alternation);
        let pattern = Regex::new(&source).context("Failed to compile profanity lexicon")?;

        Ok(Self {
            pattern: Some(pattern),
            words: words.len(),
        })
    }

    /// Number of distinct entries after adjustments.
    pub fn len(&self) -> usize {
        self.words
    }

    pub fn is_empty(&self) -> bool {
        self.words == 0
    }
}

impl OffensiveClassifier for LexiconClassifier {
    fn is_offensive(&self, text: &str) -> bool {
        self.pattern.as_ref().is_some_and(|p| p.is_match(text))
    }
}

/// Entries of the built-in lexicon, comments and blanks skipped.
pub fn builtin_words() -> impl Iterator<Item = &'static str> {
    BUILTIN_LEXICON
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}
