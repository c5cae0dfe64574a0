//! Topic text normalization and matching.
//!
//! Two topic labels denote the same subject when their token sets overlap
//! enough (Jaccard) or when one whitespace-free form contains the other,
//! which catches hashtag compactions like "GTA 6" vs "#GTA6Leak".

use std::collections::BTreeSet;

/// Default minimum Jaccard overlap for two topics to match.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.25;

/// Tokens this short carry no topical signal.
const MIN_TOKEN_CHARS: usize = 3;

/// Compact forms must be longer than this to count as a substring hit.
const MIN_SUBSTRING_CHARS: usize = 4;

/// French and English articles, prepositions and conjunctions.
const STOP_WORDS: &[&str] = &[
    "le", "la", "les", "de", "du", "des", "un", "une", "en", "au", "aux", "the", "a", "an", "in",
    "on", "of", "for", "to", "is", "and", "et", "vs", "sur", "with", "from", "has", "are", "was",
    "not", "but",
];

/// Lowercase, drop a leading `#`, and keep only alphanumerics and whitespace.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = lowered.trim_start().strip_prefix('#').unwrap_or(lowered.as_str());
    stripped
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect()
}

/// Content-bearing tokens of `text`: normalized, whitespace-split, with short
/// tokens and stop words removed.
pub fn tokenize(text: &str) -> BTreeSet<String> {
    normalize(text)
        .split_whitespace()
        .filter(|w| w.chars().count() >= MIN_TOKEN_CHARS && !STOP_WORDS.contains(w))
        .map(str::to_string)
        .collect()
}

/// `|A ∩ B| / |A ∪ B|` over token sets; 0.0 if either set is empty.
pub fn jaccard(a: &str, b: &str) -> f64 {
    jaccard_sets(&tokenize(a), &tokenize(b))
}

/// True when the whitespace-free normalized form of one string contains the
/// other's, and the contained form is longer than three characters.
pub fn is_substring_match(a: &str, b: &str) -> bool {
    compact_contains(&compact(a), &compact(b))
}

/// Whether two topic labels refer to the same subject.
pub fn same_topic(a: &str, b: &str, threshold: f64) -> bool {
    TopicFingerprint::new(a).matches(&TopicFingerprint::new(b), threshold)
}

fn compact(text: &str) -> String {
    normalize(text).chars().filter(|c| !c.is_whitespace()).collect()
}

fn jaccard_sets(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count() as f64;
    let union = a.union(b).count() as f64;
    intersection / union
}

fn compact_contains(a: &str, b: &str) -> bool {
    let long_enough = |s: &str| s.chars().count() >= MIN_SUBSTRING_CHARS;
    (long_enough(a) && b.contains(a)) || (long_enough(b) && a.contains(b))
}

/// Pre-computed comparison form of a topic label. Matching two fingerprints
/// gives the same answer as [`same_topic`] on the original strings, without
/// re-normalizing on every comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct TopicFingerprint {
    tokens: BTreeSet<String>,
    compact: String,
}

impl TopicFingerprint {
    pub fn new(text: &str) -> Self {
        Self {
            tokens: tokenize(text),
            compact: compact(text),
        }
    }

    pub fn jaccard(&self, other: &Self) -> f64 {
        jaccard_sets(&self.tokens, &other.tokens)
    }

    pub fn matches(&self, other: &Self, threshold: f64) -> bool {
        self.jaccard(other) >= threshold || compact_contains(&self.compact, &other.compact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_hashtag_and_punctuation() {
        assert_eq!(normalize("#GTA6Leak!"), "gta6leak");
        assert_eq!(normalize("Mbappé: 2 buts"), "mbappé 2 buts");
        assert_eq!(normalize("snake_case"), "snakecase");
    }

    #[test]
    fn test_tokenize_drops_short_and_stop_words() {
        let tokens = tokenize("The Trailer of GTA 6 et la sortie");
        let expected: BTreeSet<String> = ["trailer", "gta", "sortie"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(tokens, expected);
    }

    #[test]
    fn test_tokenize_collapses_duplicates() {
        assert_eq!(tokenize("goal goal GOAL").len(), 1);
    }

    #[test]
    fn test_jaccard_partial_overlap() {
        // {real, madrid, wins} vs {real, madrid, loses} → 2 / 4
        assert!((jaccard("Real Madrid wins", "Real Madrid loses") - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_substring_needs_more_than_three_chars() {
        assert!(is_substring_match("GTA 6", "#GTA6Leak"));
        assert!(!is_substring_match("AI", "Taiwan"));
        assert!(!is_substring_match("psg", "psg wins"));
    }

    #[test]
    fn test_same_topic_uses_threshold() {
        assert!(same_topic("Oscars 2025 winners", "Oscars 2025 ceremony", 0.25));
        assert!(!same_topic("Oscars 2025 winners", "Oscars 2025 ceremony", 0.9));
    }

    #[test]
    fn test_fingerprint_agrees_with_string_api() {
        let pairs = [
            ("GTA 6 Trailer", "#GTA6Leak"),
            ("AI", "Taiwan"),
            ("Champions League final", "champions league draw"),
            ("", "#"),
        ];
        for (a, b) in pairs {
            let fa = TopicFingerprint::new(a);
            let fb = TopicFingerprint::new(b);
            assert_eq!(fa.jaccard(&fb), jaccard(a, b));
            assert_eq!(fa.matches(&fb, 0.25), same_topic(a, b, 0.25));
        }
    }
}
