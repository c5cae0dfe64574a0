use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coarse topical category assigned at ingestion time.
/// Clusters never span niches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Niche {
    Cinema,
    Sport,
    Music,
    General,
}

impl Niche {
    /// Niches that get their own section in reports. `General` is the catch-all.
    pub const REPORTED: [Niche; 3] = [Niche::Sport, Niche::Cinema, Niche::Music];

    /// First niche whose keyword list has a hit in `text` (case-insensitive
    /// substring match), or `General`.
    pub fn classify(text: &str, keywords: &[(Niche, &[&str])]) -> Niche {
        let lowered = text.to_lowercase();
        keywords
            .iter()
            .find(|(_, words)| words.iter().any(|kw| lowered.contains(kw)))
            .map(|(niche, _)| *niche)
            .unwrap_or(Niche::General)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Niche::Cinema => "Cinema",
            Niche::Sport => "Sport",
            Niche::Music => "Music",
            Niche::General => "General",
        }
    }
}

impl fmt::Display for Niche {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Niche {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cinema" => Ok(Niche::Cinema),
            "sport" => Ok(Niche::Sport),
            "music" => Ok(Niche::Music),
            "general" => Ok(Niche::General),
            _ => Err(format!("Unknown niche: {s}")),
        }
    }
}
