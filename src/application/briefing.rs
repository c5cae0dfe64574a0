//! Chat briefing payload and copy-paste hook prompt.
//!
//! Both are built from data only. Sending the payload anywhere is left to
//! the caller.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use crate::application::dashboard::top_per_niche;
use crate::application::radar::RadarUseCase;
use crate::domain::entities::cluster::TopicCluster;
use crate::domain::entities::signal::SignalRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::signal_repository::{SignalFilter, SignalOrder, SignalRepository};
use crate::domain::values::niche::Niche;
use crate::domain::values::platform::Platform;

const BRIEFING_SIGNAL_POOL: usize = 30;
const BRIEFING_GOLD: usize = 5;
const BRIEFING_PER_NICHE: usize = 5;
const HOOK_TOPICS_PER_NICHE: usize = 2;

const COLOR_HEADER: u32 = 0xFF4500;
const COLOR_GOLD: u32 = 0xFFD700;
const COLOR_NICHE: u32 = 0x5865F2;

fn niche_marker(niche: Niche) -> &'static str {
    match niche {
        Niche::Cinema => "🎬",
        Niche::Sport => "⚽",
        Niche::Music => "🎵",
        Niche::General => "📌",
    }
}

fn platform_marker(platform: &Platform) -> &str {
    match platform {
        Platform::Google => "🔍",
        Platform::Reddit => "🟠",
        Platform::TikTok => "🎵",
        Platform::Other(name) => name,
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

pub struct BriefingUseCase {
    repo: Arc<dyn SignalRepository>,
    radar: Arc<RadarUseCase>,
    window_hours: u32,
}

impl BriefingUseCase {
    pub fn new(repo: Arc<dyn SignalRepository>, radar: Arc<RadarUseCase>, window_hours: u32) -> Self {
        Self {
            repo,
            radar,
            window_hours,
        }
    }

    fn recent(&self, limit: Option<usize>) -> Result<Vec<SignalRecord>, DomainError> {
        let since = Utc::now() - chrono::Duration::hours(i64::from(self.window_hours));
        self.repo.signals(&SignalFilter {
            since: Some(since),
            limit,
            ..Default::default()
        })
    }

    /// Chat embed payload (`{"embeds": [...]}`).
    pub fn briefing(&self) -> Result<Value, DomainError> {
        let top = self.recent(Some(BRIEFING_SIGNAL_POOL))?;
        let scan = self
            .radar
            .execute(Some(self.window_hours), SignalOrder::Velocity, Some(BRIEFING_GOLD))?;
        Ok(build_briefing(&scan.opportunities, &top, Utc::now()))
    }

    /// LLM prompt asking for three video hooks per top topic.
    pub fn hook_prompt(&self) -> Result<Option<String>, DomainError> {
        let signals = self.recent(None)?;
        if signals.is_empty() {
            return Ok(None);
        }
        Ok(Some(build_hook_prompt(&signals, Utc::now())))
    }
}

/// Assemble the briefing embeds from ranked opportunities and the
/// highest-velocity signals.
pub fn build_briefing(gold: &[TopicCluster], top: &[SignalRecord], now: DateTime<Utc>) -> Value {
    let mut embeds = vec![json!({
        "title": format!("🚀 VIRAL BRIEFING — {}", now.format("%d/%m/%Y")),
        "description": format!(
            "*Generated {}*\nTopics with the strongest viral potential today.",
            now.format("%A %d %B %Y — %H:%M")
        ),
        "color": COLOR_HEADER,
    })];

    if !gold.is_empty() {
        let lines: Vec<String> = gold
            .iter()
            .take(BRIEFING_GOLD)
            .enumerate()
            .map(|(i, opp)| {
                let platforms: Vec<&str> = opp.platforms.iter().map(platform_marker).collect();
                format!(
                    "**{}. {}** {}\n   Score: `{}` | {}",
                    i + 1,
                    opp.main_topic,
                    niche_marker(opp.niche),
                    opp.score.unwrap_or(0.0),
                    platforms.join(" + ")
                )
            })
            .collect();
        embeds.push(json!({
            "title": "💎 CROSS-PLATFORM SIGNALS",
            "description": lines.join("\n\n"),
            "color": COLOR_GOLD,
        }));
    }

    for section in top_per_niche(top, BRIEFING_PER_NICHE) {
        if section.signals.is_empty() {
            continue;
        }
        let lines: Vec<String> = section
            .signals
            .iter()
            .enumerate()
            .map(|(i, s)| {
                format!(
                    "**{}.** {}\n   {} Vel: `{}` | Vol: `{}`",
                    i + 1,
                    truncate(&s.topic, 60),
                    platform_marker(&s.platform),
                    s.velocity_score as i64,
                    s.volume
                )
            })
            .collect();
        embeds.push(json!({
            "title": format!("{} TOP {}", niche_marker(section.niche), section.niche.as_str().to_uppercase()),
            "description": lines.join("\n\n"),
            "color": COLOR_NICHE,
        }));
    }

    json!({ "embeds": embeds })
}

/// Prompt listing up to two distinct topics per reported niche.
pub fn build_hook_prompt(signals: &[SignalRecord], now: DateTime<Utc>) -> String {
    let mut lines = vec![
        "--- COPY PASTE THIS INTO YOUR LLM ---".to_string(),
        "\n# ROLE".to_string(),
        "You write viral short-form video scripts for TikTok and Reels.".to_string(),
        "Your job: turn trending topics into high-retention video scripts.".to_string(),
        "\n# GOAL".to_string(),
        "For each topic below, write 3 different HOOKS:".to_string(),
        "1. The 'Controversy' hook (divide the audience).".to_string(),
        "2. The 'Storytelling' hook (an unbelievable story).".to_string(),
        "3. The 'Educational' hook (did you know?).".to_string(),
        format!("\n# DATA FOR {}", now.format("%d/%m/%Y")),
    ];

    let mut seen: HashSet<&str> = HashSet::new();
    for niche in Niche::REPORTED {
        for signal in signals
            .iter()
            .filter(|s| s.niche == niche)
            .take(HOOK_TOPICS_PER_NICHE)
        {
            if !seen.insert(signal.topic.as_str()) {
                continue;
            }
            lines.push(format!(
                "\n## TOPIC ({}) : {}",
                niche.as_str().to_uppercase(),
                signal.topic
            ));
            lines.push(format!("- Viral intensity: {} points", signal.velocity_score as i64));
            lines.push(format!("- Source: {}", signal.platform));
            lines.push("- Instruction: find an unexpected angle.".to_string());
        }
    }

    lines.push("\n# OUTPUT FORMAT".to_string());
    lines.push("For each hook:".to_string());
    lines.push("- Visual: [what is on screen, in 5 words]".to_string());
    lines.push("- Audio: [exact first sentence, < 15 words]".to_string());
    lines.push("- Why it works: [1 technical sentence]".to_string());

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signal(topic: &str, niche: Niche, platform: Platform, velocity: f64) -> SignalRecord {
        SignalRecord::observed_now(topic, niche, platform, 1_000, velocity).unwrap()
    }

    #[test]
    fn test_briefing_without_gold_has_header_and_niches() {
        let top = vec![
            signal("Mbappé transfer", Niche::Sport, Platform::Reddit, 300.0),
            signal("Weather", Niche::General, Platform::Google, 200.0),
        ];
        let payload = build_briefing(&[], &top, Utc::now());
        let embeds = payload["embeds"].as_array().unwrap();
        assert_eq!(embeds.len(), 2);
        assert_eq!(embeds[1]["title"], "⚽ TOP SPORT");
        assert!(embeds[1]["description"].as_str().unwrap().contains("Vel: `300`"));
    }

    #[test]
    fn test_hook_prompt_dedups_topics_and_caps_per_niche() {
        let signals = vec![
            signal("Dune 3 trailer", Niche::Cinema, Platform::Google, 150.0),
            signal("Dune 3 trailer", Niche::Cinema, Platform::TikTok, 120.0),
            signal("Oscars snub", Niche::Cinema, Platform::Reddit, 110.0),
            signal("Grammy night", Niche::Music, Platform::Google, 90.0),
        ];
        let prompt = build_hook_prompt(&signals, Utc::now());
        assert_eq!(prompt.matches("## TOPIC (CINEMA)").count(), 1);
        assert_eq!(prompt.matches("## TOPIC (MUSIC) : Grammy night").count(), 1);
        assert!(!prompt.contains("Oscars snub"));
        assert!(prompt.contains("- Source: Google"));
    }
}
