mod common;

use common::{make_signal, setup};
use viralradar::domain::values::niche::Niche;
use viralradar::domain::values::platform::Platform;

#[test]
fn test_dashboard_groups_by_niche() {
    let vr = setup();
    for (i, topic) in ["Derby", "Transfer news", "Grand Prix"].iter().enumerate() {
        vr.record_signal(&make_signal(topic, Niche::Sport, Platform::Google, 100, 10.0 * (i + 1) as f64))
            .unwrap();
    }
    vr.record_signal(&make_signal("Dune 3", Niche::Cinema, Platform::Reddit, 50, 5.0))
        .unwrap();
    vr.record_signal(&make_signal("Weather", Niche::General, Platform::Google, 50, 99.0))
        .unwrap();

    let dashboard = vr.dashboard(2).unwrap();
    assert_eq!(dashboard.total_signals, 5);

    let niches: Vec<Niche> = dashboard.niches.iter().map(|n| n.niche).collect();
    assert_eq!(niches, vec![Niche::Sport, Niche::Cinema, Niche::Music]);

    let sport = &dashboard.niches[0].signals;
    assert_eq!(sport.len(), 2);
    assert_eq!(sport[0].topic, "Grand Prix");
    assert_eq!(sport[1].topic, "Transfer news");
    assert_eq!(dashboard.niches[1].signals.len(), 1);
    assert!(dashboard.niches[2].signals.is_empty());
}

#[test]
fn test_briefing_payload() {
    let vr = setup();
    vr.record_signal(&make_signal("GTA 6", Niche::Cinema, Platform::Google, 500_000, 100.0))
        .unwrap();
    vr.record_signal(&make_signal("#GTA6Leak", Niche::Cinema, Platform::TikTok, 200_000, 80.0))
        .unwrap();

    let payload = vr.briefing().unwrap();
    let embeds = payload["embeds"].as_array().unwrap();
    // header, cross-platform, cinema
    assert_eq!(embeds.len(), 3);
    assert!(embeds[0]["title"].as_str().unwrap().contains("VIRAL BRIEFING"));
    assert!(embeds[1]["description"].as_str().unwrap().contains("**1. GTA 6**"));
    assert_eq!(embeds[2]["title"], "🎬 TOP CINEMA");
}

#[test]
fn test_briefing_on_empty_db_is_header_only() {
    let vr = setup();
    let payload = vr.briefing().unwrap();
    assert_eq!(payload["embeds"].as_array().unwrap().len(), 1);
}

#[test]
fn test_hook_prompt() {
    let vr = setup();
    assert!(vr.hook_prompt().unwrap().is_none());

    vr.record_signal(&make_signal("Grammy night", Niche::Music, Platform::Google, 100, 70.0))
        .unwrap();
    vr.record_signal(&make_signal("Local election", Niche::General, Platform::Google, 100, 90.0))
        .unwrap();

    let prompt = vr.hook_prompt().unwrap().unwrap();
    assert!(prompt.contains("## TOPIC (MUSIC) : Grammy night"));
    assert!(prompt.contains("- Viral intensity: 70 points"));
    assert!(!prompt.contains("Local election"));
}

#[test]
fn test_stats_counts() {
    let vr = setup();
    vr.record_signal(&make_signal("Derby", Niche::Sport, Platform::Google, 100, 10.0))
        .unwrap();
    vr.record_signal(&make_signal("Derby", Niche::Sport, Platform::Reddit, 100, 10.0))
        .unwrap();
    vr.record_signal(&make_signal("New single", Niche::Music, Platform::Reddit, 100, 10.0))
        .unwrap();

    let stats = vr.stats().unwrap();
    assert_eq!(stats.total_trends, 2);
    assert_eq!(stats.total_metrics, 3);
    assert_eq!(
        stats.by_platform,
        vec![("Google".to_string(), 1), ("Reddit".to_string(), 2)]
    );
    assert_eq!(
        stats.by_niche,
        vec![("Music".to_string(), 1), ("Sport".to_string(), 1)]
    );
}
