use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Placeholder substituted for missing title/artist fields in exports.
pub const UNKNOWN: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Platform {
    YoutubeMusic,
    Spotify,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::YoutubeMusic => "YouTube Music",
            Platform::Spotify => "Spotify",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One normalized recommendation row. Immutable once produced by an adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub artist: String,
    pub platform: Platform,
    pub url: String,
}

/// The track a search resolved to, shown above the recommendation list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedTrack {
    pub title: String,
    pub artist: String,
    pub url: String,
}

/// Which platforms a query fans out to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformSelection {
    Both,
    YoutubeOnly,
    SpotifyOnly,
}

impl PlatformSelection {
    pub fn includes_youtube(&self) -> bool {
        matches!(self, PlatformSelection::Both | PlatformSelection::YoutubeOnly)
    }

    pub fn includes_spotify(&self) -> bool {
        matches!(self, PlatformSelection::Both | PlatformSelection::SpotifyOnly)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformSelection::Both => "both",
            PlatformSelection::YoutubeOnly => "youtube",
            PlatformSelection::SpotifyOnly => "spotify",
        }
    }
}

impl FromStr for PlatformSelection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "both" => Ok(PlatformSelection::Both),
            "youtube" | "yt" | "youtube-music" => Ok(PlatformSelection::YoutubeOnly),
            "spotify" | "sp" => Ok(PlatformSelection::SpotifyOnly),
            other => Err(format!(
                "Unknown platform '{}'. Available: both, youtube, spotify",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_selection_parses_aliases() {
        assert_eq!("both".parse(), Ok(PlatformSelection::Both));
        assert_eq!("YouTube".parse(), Ok(PlatformSelection::YoutubeOnly));
        assert_eq!("yt".parse(), Ok(PlatformSelection::YoutubeOnly));
        assert_eq!("spotify".parse(), Ok(PlatformSelection::SpotifyOnly));
        assert!("pandora".parse::<PlatformSelection>().is_err());
    }

    #[test]
    fn selection_fan_out_flags() {
        assert!(PlatformSelection::Both.includes_youtube());
        assert!(PlatformSelection::Both.includes_spotify());
        assert!(!PlatformSelection::YoutubeOnly.includes_spotify());
        assert!(!PlatformSelection::SpotifyOnly.includes_youtube());
    }
}
