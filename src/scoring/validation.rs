use super::config::{DomainList, ScoringConfig};
use super::rules::Rule;

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    for rule in Rule::ALL {
        let value = config.multiplier(rule);
        if !value.is_finite() || value <= 0.0 {
            errors.push(format!(
                "scoring.{}: must be a positive number, got {}",
                rule.config_key(),
                value
            ));
        }
    }

    if let Some(ref list) = config.news_domains {
        validate_domains("scoring.news_domains", list, &mut errors);
    }
    if let Some(ref list) = config.competitor_domains {
        validate_domains("scoring.competitor_domains", list, &mut errors);
    }

    if let Some(ref profanity) = config.profanity {
        let lists = [
            ("extra_words", &profanity.extra_words),
            ("allowed_words", &profanity.allowed_words),
        ];
        for (key, words) in lists {
            for (i, word) in words.iter().flatten().enumerate() {
                if word.trim().is_empty() {
                    errors.push(format!("scoring.profanity.{}[{}]: must not be blank", key, i));
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_domains(prefix: &str, list: &DomainList, errors: &mut Vec<String>) {
    if let Some(ref names) = list.names {
        if names.is_empty() {
            errors.push(format!("{}.names: must not be empty", prefix));
        }
        for (i, name) in names.iter().enumerate() {
            if !is_label(name) {
                errors.push(format!(
                    "{}.names[{}]: invalid '{}' - expected letters, digits, '_' or '-'",
                    prefix, i, name
                ));
            }
        }
    }

    if let Some(ref tlds) = list.tlds {
        if tlds.is_empty() {
            errors.push(format!("{}.tlds: must not be empty", prefix));
        }
        for (i, tld) in tlds.iter().enumerate() {
            if tld.is_empty() || !tld.split('.').all(is_label) {
                errors.push(format!(
                    "{}.tlds[{}]: invalid '{}' - expected dot-separated labels",
                    prefix, i, tld
                ));
            }
        }
    }
}

fn is_label(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
