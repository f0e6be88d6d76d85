use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;

// ASCII word semantics throughout; only https links count.
static URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?-u:\b)https://[A-Za-z0-9_-]+(?:\.[A-Za-z0-9_-]+)+(?:[A-Za-z0-9_.,@?^=%&;:/~+#-]*[A-Za-z0-9_@?^=%&;/~+#-])?(?-u:\b)",
    )
    .expect("url pattern is valid")
});

/// Finds `https://` links embedded in prose.
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlExtractor;

impl UrlExtractor {
    pub fn extract<'t>(&self, text: &'t str) -> impl Iterator<Item = &'t str> {
        URL_RE.find_iter(text).map(|m| m.as_str())
    }
}

/// Matches URLs that mention one of a fixed set of `name.tld` domains.
///
/// The search is unanchored: a listed domain anywhere in the URL (host,
/// path or query) counts, so `https://example.com/cnn.com` matches `cnn`.
#[derive(Debug, Clone)]
pub struct DomainMatcher {
    pattern: Regex,
}

impl DomainMatcher {
    pub fn new<N, T>(names: &[N], tlds: &[T]) -> Result<Self>
    where
        N: AsRef<str>,
        T: AsRef<str>,
    {
        if names.is_empty() || tlds.is_empty() {
            anyhow::bail!("domain matcher needs at least one name and one tld");
        }
        let names = alternation(names);
        let tlds = alternation(tlds);
        let source = format!(r"(?:[A-Za-z0-9_]+\.)?(?:{})\.(?:{})", names, tlds);
        let pattern = Regex::new(&source)
            .with_context(|| format!("Failed to compile domain pattern {}", source))?;
        Ok(Self { pattern })
    }

    pub fn matches(&self, url: &str) -> bool {
        self.pattern.is_match(url)
    }

    /// True if any `https://` link in `text` mentions a listed domain.
    pub fn any_link_matches(&self, extractor: &UrlExtractor, text: &str) -> bool {
        extractor.extract(text).any(|url| self.matches(url))
    }
}

// Entries are lowercased to match the normalized text they run against.
fn alternation<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(|s| regex::escape(&s.as_ref().trim().to_lowercase()))
        .collect::<Vec<_>>()
        .join("|")
}
