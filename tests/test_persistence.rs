mod common;

use common::make_signal;
use viralradar::config::RadarConfig;
use viralradar::domain::ports::signal_repository::SignalOrder;
use viralradar::domain::values::niche::Niche;
use viralradar::domain::values::platform::Platform;
use viralradar::ViralRadar;

#[test]
fn test_signals_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("radar.db");
    let path = path.to_str().unwrap();

    {
        let vr = ViralRadar::open(path, RadarConfig::default()).unwrap();
        vr.record_signal(&make_signal("Derby tonight", Niche::Sport, Platform::Google, 800, 60.0))
            .unwrap();
        vr.record_signal(&make_signal("#DerbyTonight", Niche::Sport, Platform::TikTok, 300, 55.0))
            .unwrap();
    }

    let vr = ViralRadar::open(path, RadarConfig::default()).unwrap();
    let stats = vr.stats().unwrap();
    assert_eq!(stats.total_trends, 2);
    assert_eq!(stats.total_metrics, 2);

    let scan = vr.radar(None, SignalOrder::Velocity, None).unwrap();
    assert_eq!(scan.total_opportunities, 1);
    assert_eq!(scan.opportunities[0].platform_label(), "Google + TikTok");
}
