//! Plain-text terminal reports.

use crate::application::dashboard::Dashboard;
use crate::application::radar::RadarScan;

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

pub fn radar_report(scan: &RadarScan) -> String {
    let mut out = vec![
        format!(
            "\n💎 CROSS-PLATFORM RADAR | {}",
            scan.scanned_at.format("%Y-%m-%d %H:%M")
        ),
        "=".repeat(65),
    ];

    if scan.signals_scanned == 0 {
        out.push("⚠️ Not enough recent data to analyse.".into());
        return out.join("\n");
    }

    out.push(format!(
        "🔄 {} raw signals, {} clusters",
        scan.signals_scanned, scan.clusters_formed
    ));

    if scan.opportunities.is_empty() {
        out.push("❌ No cross-platform signal detected.".into());
        out.push("   → Let the collectors run a bit longer.".into());
        return out.join("\n");
    }

    for (i, opp) in scan.opportunities.iter().enumerate() {
        out.push(format!("\n🔥 #{} — {}", i + 1, opp.main_topic));
        out.push(format!(
            "   📊 Score: {} | Niche: {}",
            opp.score.unwrap_or(0.0),
            opp.niche
        ));
        out.push(format!("   🌐 {}", opp.platform_label()));
        for m in &opp.members {
            out.push(format!(
                "    └─ [{}] {} (Vol: {} | Vel: {})",
                m.platform,
                truncate(&m.topic, 70),
                m.volume,
                m.velocity_score
            ));
        }
    }
    out.join("\n")
}

pub fn dashboard_report(dashboard: &Dashboard) -> String {
    let mut out = vec![
        format!(
            "\n🚀 VIRAL WATCH DASHBOARD | {}",
            dashboard.generated_at.format("%Y-%m-%d %H:%M")
        ),
        "=".repeat(60),
    ];

    if dashboard.total_signals == 0 {
        out.push("⚠️ No recent data. Run the collectors!".into());
        return out.join("\n");
    }

    for section in &dashboard.niches {
        out.push(format!("\n📱 NICHE: {}", section.niche.as_str().to_uppercase()));
        if section.signals.is_empty() {
            out.push("   (no data)".into());
            continue;
        }
        for (i, s) in section.signals.iter().enumerate() {
            out.push(format!(
                "  {}. [Vel: {}] {}",
                i + 1,
                s.velocity_score as i64,
                truncate(&s.topic, 60)
            ));
            out.push(format!("     {} | Vol: {}", s.platform, s.volume));
        }
    }
    out.join("\n")
}
