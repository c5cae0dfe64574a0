use clap::Parser;
use viralradar::cli::commands::{Cli, Commands};
use viralradar::cli::render;
use viralradar::config::{load_app_config, AppConfig};
use viralradar::domain::entities::signal::SignalRecord;
use viralradar::domain::ports::signal_repository::SignalOrder;
use viralradar::domain::values::niche::Niche;
use viralradar::domain::values::platform::Platform;
use viralradar::{build_feeds, ViralRadar};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_app_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            std::process::exit(1);
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let radar = match ViralRadar::open(&config.db_path, config.radar.clone()) {
        Ok(radar) => radar,
        Err(e) => {
            eprintln!("Error opening {}: {e}", config.db_path);
            std::process::exit(1);
        }
    };

    if let Err(e) = run_command(radar, &config, cli.command).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_command(
    radar: ViralRadar,
    config: &AppConfig,
    cmd: Commands,
) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Collect { platform } => {
            let feeds = build_feeds(config, platform.as_deref())?;
            let results = radar.collect(&feeds).await;
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        Commands::Add { json } => {
            let data: serde_json::Value = serde_json::from_str(&json)?;

            let topic = data["topic"]
                .as_str()
                .ok_or("Missing required field: topic")?;
            let platform: Platform = data["platform"]
                .as_str()
                .ok_or("Missing required field: platform")?
                .parse()
                .map_err(|e: String| e)?;
            let niche: Niche = match data["niche"].as_str() {
                Some(n) => n.parse().map_err(|e: String| e)?,
                None => Niche::General,
            };
            let volume = data["volume"].as_u64().unwrap_or(0);
            let velocity = data["velocity_score"].as_f64().unwrap_or(0.0);

            let signal = SignalRecord::observed_now(topic, niche, platform, volume, velocity)?;
            let write = radar.record_signal(&signal)?;
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "signal": signal,
                    "write": write,
                }))?
            );
        }
        Commands::Radar {
            limit,
            hours,
            by_volume,
            json,
        } => {
            let order = if by_volume {
                SignalOrder::Volume
            } else {
                SignalOrder::Velocity
            };
            let scan = radar.radar(hours, order, Some(limit))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&scan)?);
            } else {
                println!("{}", render::radar_report(&scan));
            }
        }
        Commands::Dashboard { per_niche } => {
            let dashboard = radar.dashboard(per_niche)?;
            println!("{}", render::dashboard_report(&dashboard));
        }
        Commands::Briefing => {
            let payload = radar.briefing()?;
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        Commands::Hooks => match radar.hook_prompt()? {
            Some(prompt) => println!("{prompt}"),
            None => println!("No recent data to write hooks about."),
        },
        Commands::Stats => {
            let stats = radar.stats()?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }
    Ok(())
}
