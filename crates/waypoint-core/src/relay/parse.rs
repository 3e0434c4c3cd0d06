//! Parsing numbered-list model output into suggestions.

use std::sync::LazyLock;

use rand::Rng;
use regex::Regex;

use crate::models::{Suggestion, MAX_SUGGESTIONS};

/// Confidence assigned to items recovered by the lenient scan.
const LENIENT_CONFIDENCE: f64 = 0.8;

/// `N. text` or `N text` occupying a whole line.
static NUMBERED_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\.?\s*(.+)$").expect("numbered line pattern"));

/// `N.` or `N)` anywhere, up to the next period or newline.
static NUMBERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+[.)]\s*[^.\n]+").expect("numbered item pattern"));

static ITEM_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+[.)]\s*").expect("item prefix pattern"));

/// Extracts up to five suggestions from model output.
///
/// Lines that look like `3. Add item to cart` are taken first, keeping the
/// model's ordinal and a random confidence in `[0.85, 0.95)`. If no line
/// matches, numbered fragments are scanned for anywhere in the text and
/// numbered from 1 with a fixed confidence of 0.8. Texts are cut to six
/// words. No match at all yields an empty list.
pub fn parse_suggestions(text: &str) -> Vec<Suggestion> {
    let mut rng = rand::rng();

    let strict: Vec<Suggestion> = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let caps = NUMBERED_LINE.captures(line)?;
            let id = caps[1].parse::<u32>().ok()?;
            let item = caps[2].trim();
            (!item.is_empty()).then(|| Suggestion::generated(id, item, rng.random_range(0.85..0.95)))
        })
        .take(MAX_SUGGESTIONS)
        .collect();

    if !strict.is_empty() {
        return strict;
    }

    NUMBERED_ITEM
        .find_iter(text)
        .map(|item| ITEM_PREFIX.replace(item.as_str(), "").trim().to_string())
        .filter(|item| !item.is_empty())
        .take(MAX_SUGGESTIONS)
        .zip(1..)
        .map(|(item, id)| Suggestion::generated(id, &item, LENIENT_CONFIDENCE))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SuggestionSource, MAX_SUGGESTION_WORDS};

    #[test]
    fn test_parses_numbered_lines() {
        let suggestions =
            parse_suggestions("1. Browse product catalog\n2. Add item to cart\n3. Complete checkout flow");

        let texts: Vec<&str> = suggestions.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(
            texts,
            vec!["Browse product catalog", "Add item to cart", "Complete checkout flow"]
        );
        let ids: Vec<u32> = suggestions.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        for suggestion in &suggestions {
            let confidence = suggestion.confidence.unwrap();
            assert!((0.85..0.95).contains(&confidence));
            assert_eq!(suggestion.source, SuggestionSource::Generated);
        }
    }

    #[test]
    fn test_skips_prose_and_blank_lines() {
        let text = "Here are some ideas:\n\n1. Sign up\n\n2 Verify email\nHope this helps!";
        let suggestions = parse_suggestions(text);
        let texts: Vec<&str> = suggestions.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["Sign up", "Verify email"]);
    }

    #[test]
    fn test_keeps_model_ordinals() {
        let suggestions = parse_suggestions("4. Pay\n7. Receive receipt");
        let ids: Vec<u32> = suggestions.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![4, 7]);
    }

    #[test]
    fn test_truncates_to_six_words() {
        let suggestions =
            parse_suggestions("1. Open the mobile app and immediately sign in with biometrics");
        assert_eq!(suggestions[0].text, "Open the mobile app and immediately");
        assert!(suggestions[0].text.split_whitespace().count() <= MAX_SUGGESTION_WORDS);
    }

    #[test]
    fn test_caps_at_five() {
        let text = (1..=12)
            .map(|i| format!("{i}. Step number {i}"))
            .collect::<Vec<_>>()
            .join("\n");
        let suggestions = parse_suggestions(&text);
        assert_eq!(suggestions.len(), 5);
        assert_eq!(suggestions[4].text, "Step number 5");
    }

    #[test]
    fn test_lenient_scan_when_no_line_matches() {
        let text = "Consider these: 1) Land on homepage. 2) Read pricing. 3) Start trial";
        let suggestions = parse_suggestions(text);

        let texts: Vec<&str> = suggestions.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["Land on homepage", "Read pricing", "Start trial"]);
        let ids: Vec<u32> = suggestions.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(suggestions.iter().all(|s| s.confidence == Some(0.8)));
    }

    #[test]
    fn test_no_matches_is_empty() {
        assert!(parse_suggestions("I cannot help with that request.").is_empty());
        assert!(parse_suggestions("").is_empty());
    }

    #[test]
    fn test_crlf_lines() {
        let suggestions = parse_suggestions("1. Log in\r\n2. View dashboard\r\n");
        let texts: Vec<&str> = suggestions.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["Log in", "View dashboard"]);
    }
}
