use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "viralradar", about = "Cross-platform trending topic radar")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch trending topics from the platform feeds and store them
    Collect {
        /// Only run one feed (google, reddit, tiktok)
        #[arg(long)]
        platform: Option<String>,
    },
    /// Record a single signal
    Add {
        /// JSON with topic, niche, platform, volume, velocity_score
        json: String,
    },
    /// Rank topics trending on several platforms at once
    Radar {
        /// Maximum opportunities to show
        #[arg(long, default_value = "15")]
        limit: usize,
        /// Hours to look back (default: configured recency window)
        #[arg(long)]
        hours: Option<u32>,
        /// Process high-volume signals first instead of high-velocity ones
        #[arg(long)]
        by_volume: bool,
        /// Print the scan as JSON
        #[arg(long)]
        json: bool,
    },
    /// Top recent signals per niche
    Dashboard {
        #[arg(long, default_value = "5")]
        per_niche: usize,
    },
    /// Print the chat briefing payload as JSON
    Briefing,
    /// Print an LLM prompt for video hooks on today's topics
    Hooks,
    /// Show database statistics
    Stats,
}
