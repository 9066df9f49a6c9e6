//! Query dispatch and session state.
//!
//! The dispatcher fans a song name out to the selected adapters, one after
//! the other, routing every lookup through a per-adapter TTL cache. Adapter
//! failures are downgraded here: the slot gets an empty result, the failure
//! becomes a notice for the render layer, and nothing propagates as an error.

use serde::Serialize;
use std::time::Duration;
use tracing::warn;

use crate::config::Config;
use crate::core::cache::{CacheStats, TtlCache};
use crate::core::lastfm::LastfmClient;
use crate::core::model::{PlatformSelection, Recommendation, UNKNOWN};
use crate::core::youtube::{YoutubeClient, YoutubeResult};

/// Each source contributes at most this many rows to display and export.
pub const SOURCE_ROW_CAP: usize = 10;

/// Latest results per platform, replaced wholesale on each search.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionState {
    pub youtube: Option<YoutubeResult>,
    pub lastfm: Option<Vec<Recommendation>>,
}

impl SessionState {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.youtube.is_none() && self.lastfm.is_none()
    }

    /// YouTube rows, capped and padded for export.
    pub fn youtube_rows(&self) -> Vec<Recommendation> {
        self.youtube
            .iter()
            .flat_map(|result| result.tracks.iter())
            .take(SOURCE_ROW_CAP)
            .cloned()
            .map(pad_unknown)
            .collect()
    }

    /// Spotify rows, capped and padded for export.
    pub fn spotify_rows(&self) -> Vec<Recommendation> {
        self.lastfm
            .iter()
            .flatten()
            .take(SOURCE_ROW_CAP)
            .cloned()
            .map(pad_unknown)
            .collect()
    }

    /// Combined rows, YouTube before Spotify, no dedup across sources.
    pub fn merged_rows(&self) -> Vec<Recommendation> {
        let mut rows = self.youtube_rows();
        rows.extend(self.spotify_rows());
        rows
    }
}

fn pad_unknown(mut rec: Recommendation) -> Recommendation {
    if rec.title.is_empty() {
        rec.title = UNKNOWN.to_string();
    }
    if rec.artist.is_empty() {
        rec.artist = UNKNOWN.to_string();
    }
    rec
}

/// Non-fatal, user-visible notices produced while fetching.
#[derive(Debug, Default)]
pub struct FetchOutcome {
    pub notices: Vec<String>,
}

pub struct Dispatcher {
    youtube: YoutubeClient,
    lastfm: Option<LastfmClient>,
    youtube_cache: TtlCache<YoutubeResult>,
    lastfm_cache: TtlCache<Option<Vec<Recommendation>>>,
}

impl Dispatcher {
    pub fn new(config: &Config) -> Self {
        let lastfm = match config.create_lastfm_client() {
            Ok(client) => Some(client),
            Err(e) => {
                warn!("Spotify similarity adapter disabled: {}", e);
                None
            }
        };

        let ttl = Duration::from_secs(config.cache_ttl_seconds);
        Self {
            youtube: config.create_youtube_client(),
            lastfm,
            youtube_cache: TtlCache::new(ttl),
            lastfm_cache: TtlCache::new(ttl),
        }
    }

    /// Run one search, replacing the selected slots of `state` wholesale.
    ///
    /// Both lookups are sequential when both platforms are selected. Cached
    /// entries (including downgraded empty results) are reused within the
    /// TTL without touching the network.
    pub async fn fetch(
        &mut self,
        song_name: &str,
        selection: PlatformSelection,
        state: &mut SessionState,
    ) -> FetchOutcome {
        let mut outcome = FetchOutcome::default();

        if selection.includes_youtube() {
            let result = match self.youtube_cache.get(song_name) {
                Some(hit) => hit,
                None => {
                    let fetched = match self.youtube.recommendations(song_name).await {
                        Ok(result) => result,
                        Err(e) => {
                            warn!("YouTube Music lookup failed for '{}': {}", song_name, e);
                            outcome.notices.push(format!("YouTube Music error: {}", e));
                            YoutubeResult::default()
                        }
                    };
                    self.youtube_cache.put(song_name, fetched.clone());
                    fetched
                }
            };
            state.youtube = Some(result);
        }

        if selection.includes_spotify() {
            match &self.lastfm {
                None => {
                    outcome.notices.push(
                        "Last.fm API key not configured; set TUNEDIVE_LASTFM_API_KEY or add \
                         lastfm_api_key to the config file"
                            .to_string(),
                    );
                    state.lastfm = None;
                }
                Some(client) => {
                    let result = match self.lastfm_cache.get(song_name) {
                        Some(hit) => hit,
                        None => {
                            let fetched = match client.similar_tracks(song_name).await {
                                Ok(result) => result,
                                Err(e) => {
                                    warn!("Last.fm lookup failed for '{}': {}", song_name, e);
                                    outcome.notices.push(format!("Spotify recommendations error: {}", e));
                                    None
                                }
                            };
                            self.lastfm_cache.put(song_name, fetched.clone());
                            fetched
                        }
                    };
                    state.lastfm = result;
                }
            }
        }

        outcome
    }

    pub fn cache_stats(&self) -> (CacheStats, CacheStats) {
        (self.youtube_cache.stats(), self.lastfm_cache.stats())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{MatchedTrack, Platform};

    fn yt_rec(n: usize) -> Recommendation {
        Recommendation {
            title: format!("YT Track {}", n),
            artist: "Artist".to_string(),
            platform: Platform::YoutubeMusic,
            url: format!("https://music.youtube.com/watch?v=vid{}", n),
        }
    }

    fn sp_rec(n: usize) -> Recommendation {
        Recommendation {
            title: format!("SP Track {}", n),
            artist: "Artist".to_string(),
            platform: Platform::Spotify,
            url: format!("https://open.spotify.com/search/sp{}", n),
        }
    }

    fn state_with(yt: usize, sp: usize) -> SessionState {
        SessionState {
            youtube: Some(YoutubeResult {
                matched: Some(MatchedTrack {
                    title: "Seed".to_string(),
                    artist: "Artist".to_string(),
                    url: "https://music.youtube.com/watch?v=seed".to_string(),
                }),
                tracks: (0..yt).map(yt_rec).collect(),
            }),
            lastfm: Some((0..sp).map(sp_rec).collect()),
        }
    }

    #[test]
    fn merge_caps_each_source_at_ten() {
        let state = state_with(14, 12);
        let rows = state.merged_rows();
        assert_eq!(rows.len(), 20);
    }

    #[test]
    fn merge_row_count_is_sum_of_capped_sources() {
        let state = state_with(3, 5);
        assert_eq!(state.merged_rows().len(), 3 + 5);

        let state = state_with(0, 5);
        assert_eq!(state.merged_rows().len(), 5);

        let empty = SessionState::default();
        assert!(empty.merged_rows().is_empty());
    }

    #[test]
    fn merge_groups_youtube_rows_before_spotify() {
        let state = state_with(2, 2);
        let rows = state.merged_rows();
        assert_eq!(
            rows.iter().map(|r| r.platform).collect::<Vec<_>>(),
            vec![
                Platform::YoutubeMusic,
                Platform::YoutubeMusic,
                Platform::Spotify,
                Platform::Spotify
            ]
        );
        // Source order is preserved within each group
        assert_eq!(rows[0].title, "YT Track 0");
        assert_eq!(rows[1].title, "YT Track 1");
        assert_eq!(rows[2].title, "SP Track 0");
    }

    #[test]
    fn missing_fields_are_padded_with_unknown() {
        let mut state = state_with(1, 0);
        if let Some(yt) = &mut state.youtube {
            yt.tracks[0].title = String::new();
            yt.tracks[0].artist = String::new();
        }

        let rows = state.merged_rows();
        assert_eq!(rows[0].title, UNKNOWN);
        assert_eq!(rows[0].artist, UNKNOWN);
    }

    #[test]
    fn clear_resets_both_slots() {
        let mut state = state_with(2, 2);
        state.clear();
        assert!(state.is_empty());
        assert!(state.youtube.is_none());
        assert!(state.lastfm.is_none());
    }

    #[test]
    fn new_search_replaces_slots_wholesale() {
        let mut state = state_with(5, 5);
        let replacement = state_with(1, 0);
        state.youtube = replacement.youtube.clone();
        state.lastfm = None;
        assert_eq!(state.youtube_rows().len(), 1);
        assert!(state.spotify_rows().is_empty());
    }
}
