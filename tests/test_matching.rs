use viralradar::domain::values::similarity::{
    is_substring_match, jaccard, normalize, same_topic, tokenize, DEFAULT_SIMILARITY_THRESHOLD,
};

#[test]
fn test_normalize_is_case_insensitive_and_idempotent() {
    assert_eq!(normalize("GTA 6"), normalize("gta 6"));
    for text in ["#GTA6Leak", "Mbappé: le Real?!", "  AI & Taiwan  ", ""] {
        let once = normalize(text);
        assert_eq!(normalize(&once), once);
    }
}

#[test]
fn test_jaccard_bounds_and_symmetry() {
    let pairs = [
        ("Champions League final", "League final tonight"),
        ("Dune part three", "Oscars 2026"),
        ("Taylor Swift tour", "taylor swift"),
    ];
    for (a, b) in pairs {
        let ab = jaccard(a, b);
        assert_eq!(ab, jaccard(b, a));
        assert!((0.0..=1.0).contains(&ab));
    }
    assert_eq!(jaccard("Champions League final", "champions league final"), 1.0);
}

#[test]
fn test_jaccard_is_zero_when_a_side_has_no_tokens() {
    assert!(tokenize("le de la").is_empty());
    assert_eq!(jaccard("le de la", "anything else"), 0.0);
    assert_eq!(jaccard("", ""), 0.0);
}

#[test]
fn test_hashtag_compaction_matches() {
    assert!(is_substring_match("GTA 6", "#GTA6Leak"));
    assert!(same_topic("GTA 6", "#GTA6Leak", DEFAULT_SIMILARITY_THRESHOLD));
}

#[test]
fn test_short_forms_do_not_match_by_substring() {
    assert!(!is_substring_match("AI", "Taiwan"));
    assert!(!same_topic("AI", "Taiwan", DEFAULT_SIMILARITY_THRESHOLD));
}

#[test]
fn test_threshold_is_inclusive() {
    // {champions, league, final} vs {league, final, tonight}: 2/4
    let score = jaccard("Champions League final", "League final tonight");
    assert_eq!(score, 0.5);
    assert!(same_topic("Champions League final", "League final tonight", 0.5));
    assert!(!same_topic("Champions League final", "League final tonight", 0.51));
}
