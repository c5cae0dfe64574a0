use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Source platform of a signal. The three built-in platforms have dedicated
/// feeds; anything else is carried as `Other` so new sources need no schema change.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Platform {
    Google,
    TikTok,
    Reddit,
    Other(String),
}

impl Platform {
    pub fn as_str(&self) -> &str {
        match self {
            Platform::Google => "Google",
            Platform::TikTok => "TikTok",
            Platform::Reddit => "Reddit",
            Platform::Other(name) => name,
        }
    }

    fn variant_rank(&self) -> u8 {
        match self {
            Platform::Google => 0,
            Platform::TikTok => 1,
            Platform::Reddit => 2,
            Platform::Other(_) => 3,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "" => Err("Platform name must not be empty".to_string()),
            "google" => Ok(Platform::Google),
            "tiktok" => Ok(Platform::TikTok),
            "reddit" => Ok(Platform::Reddit),
            _ => Ok(Platform::Other(trimmed.to_string())),
        }
    }
}

impl From<Platform> for String {
    fn from(p: Platform) -> Self {
        p.as_str().to_string()
    }
}

impl TryFrom<String> for Platform {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

// Alphabetical by display name, so sorted platform sets read naturally.
// An `Other` spelled like a built-in platform sorts after it and stays distinct.
impl Ord for Platform {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str()
            .cmp(other.as_str())
            .then_with(|| self.variant_rank().cmp(&other.variant_rank()))
    }
}

impl PartialOrd for Platform {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Static per-platform trust multiplier applied to velocity scores.
/// Platforms missing from the table weigh 1.0.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformWeights {
    weights: HashMap<Platform, f64>,
}

impl PlatformWeights {
    pub const DEFAULT_WEIGHT: f64 = 1.0;

    pub fn new(weights: HashMap<Platform, f64>) -> Self {
        Self { weights }
    }

    pub fn weight(&self, platform: &Platform) -> f64 {
        self.weights
            .get(platform)
            .copied()
            .unwrap_or(Self::DEFAULT_WEIGHT)
    }

    /// Parse `"Google=1.5,TikTok=1.3"`. Weights must be finite and non-negative.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let mut weights = HashMap::new();
        for pair in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (name, value) = pair
                .split_once('=')
                .ok_or_else(|| format!("Expected PLATFORM=WEIGHT, got '{pair}'"))?;
            let platform: Platform = name.parse()?;
            let weight: f64 = value
                .trim()
                .parse()
                .map_err(|e| format!("Invalid weight for {platform}: {e}"))?;
            if !weight.is_finite() || weight < 0.0 {
                return Err(format!("Weight for {platform} must be >= 0, got {weight}"));
            }
            weights.insert(platform, weight);
        }
        Ok(Self { weights })
    }
}

impl Default for PlatformWeights {
    fn default() -> Self {
        Self::new(HashMap::from([
            // Mass-market search validation
            (Platform::Google, 1.5),
            // Short-form video
            (Platform::TikTok, 1.3),
            (Platform::Reddit, 1.0),
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_and_other() {
        assert_eq!("tiktok".parse::<Platform>().unwrap(), Platform::TikTok);
        assert_eq!(
            "Bluesky".parse::<Platform>().unwrap(),
            Platform::Other("Bluesky".into())
        );
        assert!("  ".parse::<Platform>().is_err());
    }

    #[test]
    fn test_ordering_is_alphabetical() {
        let mut platforms = vec![Platform::TikTok, Platform::Reddit, Platform::Google];
        platforms.sort();
        assert_eq!(
            platforms,
            vec![Platform::Google, Platform::Reddit, Platform::TikTok]
        );
    }

    #[test]
    fn test_ordering_agrees_with_equality() {
        let builtin = Platform::Google;
        let lookalike = Platform::Other("Google".into());
        assert_ne!(builtin.cmp(&lookalike), Ordering::Equal);
        assert_eq!(builtin.cmp(&Platform::Google), Ordering::Equal);

        let set: std::collections::BTreeSet<Platform> =
            [builtin, lookalike, Platform::Reddit].into_iter().collect();
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_default_weights() {
        let w = PlatformWeights::default();
        assert_eq!(w.weight(&Platform::Google), 1.5);
        assert_eq!(w.weight(&Platform::TikTok), 1.3);
        assert_eq!(w.weight(&Platform::Other("X".into())), 1.0);
    }

    #[test]
    fn test_parse_weights() {
        let w = PlatformWeights::parse("Google=2, X=0.5").unwrap();
        assert_eq!(w.weight(&Platform::Google), 2.0);
        assert_eq!(w.weight(&Platform::Other("X".into())), 0.5);
        assert_eq!(w.weight(&Platform::TikTok), 1.0);
        assert!(PlatformWeights::parse("Google").is_err());
        assert!(PlatformWeights::parse("Google=-1").is_err());
    }
}
