//! Last.fm similarity adapter.
//!
//! Two-step lookup: a fuzzy `track.search` resolves the free-text query to
//! the canonical artist/title pair, then `track.getSimilar` fetches similar
//! tracks for that pair. Each similar track is given a constructed Spotify
//! search link guessed from its title+artist text; the link is not verified
//! to resolve to the same recording.

use anyhow::Result;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use crate::core::model::{Platform, Recommendation};

const SPOTIFY_SEARCH_BASE: &str = "https://open.spotify.com/search";

#[derive(Deserialize, Debug)]
struct TrackSearchResponse {
    results: Option<SearchResults>,
    error: Option<i64>,
    message: Option<String>,
}

#[derive(Deserialize, Debug)]
struct SearchResults {
    trackmatches: Option<TrackMatches>,
}

#[derive(Deserialize, Debug)]
struct TrackMatches {
    #[serde(default)]
    track: Vec<TrackMatch>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct TrackMatch {
    pub name: String,
    pub artist: String,
}

#[derive(Deserialize, Debug)]
struct SimilarResponse {
    similartracks: Option<SimilarTracks>,
    error: Option<i64>,
    message: Option<String>,
}

#[derive(Deserialize, Debug)]
struct SimilarTracks {
    #[serde(default)]
    track: Vec<SimilarTrack>,
}

#[derive(Deserialize, Debug)]
struct SimilarTrack {
    name: String,
    artist: SimilarArtist,
}

#[derive(Deserialize, Debug)]
struct SimilarArtist {
    name: String,
}

#[derive(Clone)]
pub struct LastfmClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    limit: usize,
}

impl LastfmClient {
    pub fn new(base_url: &str, api_key: &str, limit: usize) -> Self {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("tunedive v{}", version);

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            limit,
        }
    }

    /// Similar tracks for a free-text song name, as Spotify-linked records.
    ///
    /// `Ok(None)` means the service answered but found nothing; `Err` means
    /// the lookup itself failed and is downgraded by the dispatcher.
    pub async fn similar_tracks(&self, song_name: &str) -> Result<Option<Vec<Recommendation>>> {
        let Some(canonical) = self.search_track(song_name).await? else {
            info!("No Last.fm match for: {}", song_name);
            return Ok(None);
        };

        debug!(
            "Canonical Last.fm match for '{}': {} - {}",
            song_name, canonical.artist, canonical.name
        );

        let limit = self.limit.to_string();
        let params = [
            ("method", "track.getSimilar"),
            ("artist", canonical.artist.as_str()),
            ("track", canonical.name.as_str()),
            ("api_key", self.api_key.as_str()),
            ("format", "json"),
            ("limit", limit.as_str()),
        ];

        let response = self.client.get(&self.base_url).query(&params).send().await?;
        if !response.status().is_success() {
            anyhow::bail!("Similar-tracks lookup failed: {}", response.status());
        }

        let data: SimilarResponse = response.json().await?;
        if let Some(code) = data.error {
            anyhow::bail!(
                "Last.fm error {}: {}",
                code,
                data.message.unwrap_or_default()
            );
        }

        let tracks = data.similartracks.map(|s| s.track).unwrap_or_default();
        if tracks.is_empty() {
            info!("No similar tracks for: {} - {}", canonical.artist, canonical.name);
            return Ok(None);
        }

        let recommendations = tracks
            .into_iter()
            .take(self.limit)
            .map(|track| {
                let url = spotify_search_link(&track.name, &track.artist.name);
                Recommendation {
                    title: track.name,
                    artist: track.artist.name,
                    platform: Platform::Spotify,
                    url,
                }
            })
            .collect();

        Ok(Some(recommendations))
    }

    /// Canonical artist/title for a free-text query, per Last.fm's matcher.
    async fn search_track(&self, song_name: &str) -> Result<Option<TrackMatch>> {
        let params = [
            ("method", "track.search"),
            ("track", song_name),
            ("api_key", self.api_key.as_str()),
            ("format", "json"),
            ("limit", "1"),
        ];

        let response = self.client.get(&self.base_url).query(&params).send().await?;
        if !response.status().is_success() {
            anyhow::bail!("Track search failed: {}", response.status());
        }

        let data: TrackSearchResponse = response.json().await?;
        if let Some(code) = data.error {
            anyhow::bail!(
                "Last.fm error {}: {}",
                code,
                data.message.unwrap_or_default()
            );
        }

        let best = data
            .results
            .and_then(|r| r.trackmatches)
            .map(|m| m.track)
            .unwrap_or_default()
            .into_iter()
            .next();

        Ok(best)
    }
}

/// Spotify search URL for "title artist", percent-encoded as one path segment.
fn spotify_search_link(title: &str, artist: &str) -> String {
    let mut url = Url::parse(SPOTIFY_SEARCH_BASE).expect("valid base URL");
    let query = format!("{} {}", title, artist);
    url.path_segments_mut()
        .expect("base URL can be a base")
        .push(&query);
    url.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spotify_link_encodes_query_as_path_segment() {
        let link = spotify_search_link("Bohemian Rhapsody", "Queen");
        assert_eq!(
            link,
            "https://open.spotify.com/search/Bohemian%20Rhapsody%20Queen"
        );
    }

    #[test]
    fn spotify_link_escapes_slashes() {
        let link = spotify_search_link("AC/DC Medley", "AC/DC");
        assert!(!link["https://open.spotify.com/search/".len()..].contains('/'));
    }

    #[test]
    fn search_response_parses_best_match() {
        let payload = r#"{
            "results": {
                "trackmatches": {
                    "track": [
                        {"name": "Bohemian Rhapsody", "artist": "Queen", "url": "x", "listeners": "1"},
                        {"name": "Bohemian Rhapsody (live)", "artist": "Queen", "url": "y", "listeners": "2"}
                    ]
                }
            }
        }"#;

        let parsed: TrackSearchResponse = serde_json::from_str(payload).unwrap();
        let best = parsed
            .results
            .and_then(|r| r.trackmatches)
            .map(|m| m.track)
            .unwrap_or_default()
            .into_iter()
            .next()
            .unwrap();
        assert_eq!(best.name, "Bohemian Rhapsody");
        assert_eq!(best.artist, "Queen");
    }

    #[test]
    fn search_response_with_no_matches_yields_none() {
        let payload = r#"{"results": {"trackmatches": {"track": []}}}"#;
        let parsed: TrackSearchResponse = serde_json::from_str(payload).unwrap();
        let best = parsed
            .results
            .and_then(|r| r.trackmatches)
            .map(|m| m.track)
            .unwrap_or_default()
            .into_iter()
            .next();
        assert!(best.is_none());
        assert!(parsed.error.is_none());
    }

    #[test]
    fn error_payload_is_detected() {
        let payload = r#"{"error": 6, "message": "Track not found"}"#;
        let parsed: SimilarResponse = serde_json::from_str(payload).unwrap();
        assert_eq!(parsed.error, Some(6));
        assert_eq!(parsed.message.as_deref(), Some("Track not found"));
    }

    #[test]
    fn similar_response_parses_tracks_with_nested_artist() {
        let payload = r#"{
            "similartracks": {
                "track": [
                    {"name": "The Show Must Go On", "artist": {"name": "Queen"}, "match": 1.0},
                    {"name": "November Rain", "artist": {"name": "Guns N' Roses"}, "match": 0.5}
                ]
            }
        }"#;

        let parsed: SimilarResponse = serde_json::from_str(payload).unwrap();
        let tracks = parsed.similartracks.map(|s| s.track).unwrap_or_default();
        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].artist.name, "Queen");
        assert_eq!(tracks[1].name, "November Rain");
    }
}
