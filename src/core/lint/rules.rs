//! Named text-shape rules usable from commit-message lint config.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

static RULES: LazyLock<BTreeMap<&'static str, Regex>> = LazyLock::new(|| {
    let patterns: [(&str, &str); 9] = [
        ("lowercase", r"^[a-z]+$"),
        ("uppercase", r"^[A-Z]+$"),
        ("camelcase", r"^[a-z]+(?:[A-Z][a-z]+)+$"),
        ("kebabcase", r"^[a-z]+(?:-[a-z]+)*$"),
        ("snakecase", r"^[a-z]+(?:_[a-z]+)*$"),
        ("pascalcase", r"^(?:[A-Z][a-z]+)+$"),
        // capitalized first letter, no other capitals
        ("sentencecase", r"^[A-Z][^A-Z]*$"),
        // starts lowercase, does not end with a period
        ("phrasecase", r"^[a-z](?:.*[^.])?$"),
        (
            "semver",
            r"^(?P<major>0|[1-9]\d*)\.(?P<minor>0|[1-9]\d*)\.(?P<patch>0|[1-9]\d*)(?:-(?P<prerelease>(?:0|[1-9]\d*|\d*[a-zA-Z-][0-9a-zA-Z-]*)(?:\.(?:0|[1-9]\d*|\d*[a-zA-Z-][0-9a-zA-Z-]*))*))?(?:\+(?P<buildmetadata>[0-9a-zA-Z-]+(?:\.[0-9a-zA-Z-]+)*))?$",
        ),
    ];

    patterns
        .into_iter()
        .map(|(name, pattern)| (name, Regex::new(pattern).unwrap()))
        .collect()
});

pub fn rule(name: &str) -> Option<&'static Regex> {
    RULES.get(name)
}

pub fn rule_names() -> Vec<&'static str> {
    RULES.keys().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(name: &str, value: &str) -> bool {
        rule(name).unwrap().is_match(value)
    }

    #[test]
    fn case_rules() {
        assert!(matches("lowercase", "feat"));
        assert!(!matches("lowercase", "Feat"));
        assert!(matches("uppercase", "WIP"));
        assert!(matches("camelcase", "fooBar"));
        assert!(!matches("camelcase", "foo"));
        assert!(matches("kebabcase", "api-client"));
        assert!(matches("snakecase", "api_client"));
        assert!(matches("pascalcase", "ApiClient"));
        assert!(!matches("pascalcase", "apiClient"));
    }

    #[test]
    fn sentence_and_phrase() {
        assert!(matches("sentencecase", "Add retry to uploads"));
        assert!(!matches("sentencecase", "Add Retry"));
        assert!(matches("phrasecase", "add retry to uploads"));
        assert!(matches("phrasecase", "a"));
        assert!(!matches("phrasecase", "add retry."));
        assert!(!matches("phrasecase", "Add retry"));
    }

    #[test]
    fn semver_rule() {
        assert!(matches("semver", "1.2.3"));
        assert!(matches("semver", "1.2.3-beta.1+build.5"));
        assert!(!matches("semver", "01.2.3"));
        assert!(!matches("semver", "1.2"));
    }

    #[test]
    fn unknown_rule_is_none() {
        assert!(rule("titlecase").is_none());
        assert_eq!(rule_names().len(), 9);
    }
}
