use once_cell::sync::Lazy;
use regex::Regex;

static HASHTAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#[A-Za-z0-9_-]+").expect("hashtag pattern is valid"));

/// Count hashtag tokens (`#` followed by ASCII word characters or hyphens).
pub fn count_hashtags(text: &str) -> usize {
    HASHTAG_RE.find_iter(text).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_hashtags() {
        assert_eq!(count_hashtags("hello world"), 0);
    }

    #[test]
    fn test_counts_each_tag() {
        assert_eq!(count_hashtags("#fun #times #more"), 3);
    }

    #[test]
    fn test_adjacent_tags_split_on_hash() {
        assert_eq!(count_hashtags("#one#two"), 2);
    }

    #[test]
    fn test_hyphen_and_underscore_are_part_of_tag() {
        assert_eq!(count_hashtags("#rust-lang_2024"), 1);
    }

    #[test]
    fn test_lone_hash_is_not_a_tag() {
        assert_eq!(count_hashtags("# not a tag, and #"), 0);
    }

    #[test]
    fn test_non_ascii_after_hash_is_not_a_tag() {
        assert_eq!(count_hashtags("#été"), 0);
        assert_eq!(count_hashtags("#café"), 1);
    }
}
