//! YouTube Music adapter.
//!
//! Talks to the InnerTube endpoints behind music.youtube.com (the same API
//! the web player uses): `search` with the songs filter to resolve the best
//! match, then `next` seeded by its video id for the watch-playlist related
//! tracks. InnerTube answers are deeply nested renderer trees, so parsing
//! navigates `serde_json::Value` with pointers rather than typed structs.

use anyhow::Result;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, info};

use crate::core::model::{MatchedTrack, Platform, Recommendation};

const WATCH_URL_BASE: &str = "https://music.youtube.com/watch?v=";

// InnerTube web-remix client context.
const CLIENT_NAME: &str = "WEB_REMIX";
const CLIENT_VERSION: &str = "1.20240101.01.00";

/// Opaque search param restricting results to songs.
const SONGS_FILTER_PARAM: &str = "EgWKAQIIAWoKEAkQBRAKEAMQBA%3D%3D";

/// Matched track plus its related-tracks list, as one cacheable unit.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct YoutubeResult {
    pub matched: Option<MatchedTrack>,
    pub tracks: Vec<Recommendation>,
}

#[derive(Clone)]
pub struct YoutubeClient {
    client: reqwest::Client,
    base_url: String,
    limit: usize,
}

impl YoutubeClient {
    pub fn new(base_url: &str, limit: usize) -> Self {
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
            limit,
        }
    }

    /// Best song match for a free-text query plus up to `limit` related
    /// tracks seeded by its video id.
    ///
    /// `Ok` with an empty result means the search found nothing; `Err` means
    /// a call failed and is downgraded by the dispatcher.
    pub async fn recommendations(&self, song_name: &str) -> Result<YoutubeResult> {
        let Some((video_id, matched)) = self.search_best_match(song_name).await? else {
            info!("No YouTube Music match for: {}", song_name);
            return Ok(YoutubeResult::default());
        };

        debug!("YouTube Music match for '{}': {}", song_name, video_id);

        let tracks = self.related_tracks(&video_id).await?;
        Ok(YoutubeResult {
            matched: Some(matched),
            tracks,
        })
    }

    async fn search_best_match(&self, query: &str) -> Result<Option<(String, MatchedTrack)>> {
        let body = json!({
            "context": {
                "client": {
                    "clientName": CLIENT_NAME,
                    "clientVersion": CLIENT_VERSION,
                }
            },
            "query": query,
            "params": SONGS_FILTER_PARAM,
        });

        let url = format!("{}/search", self.base_url);
        let response = self
            .client
            .post(&url)
            .query(&[("prettyPrint", "false")])
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            anyhow::bail!("Search failed: {}", response.status());
        }

        let data: Value = response.json().await?;
        Ok(parse_search_best_match(&data))
    }

    async fn related_tracks(&self, video_id: &str) -> Result<Vec<Recommendation>> {
        let body = json!({
            "context": {
                "client": {
                    "clientName": CLIENT_NAME,
                    "clientVersion": CLIENT_VERSION,
                }
            },
            "videoId": video_id,
            "enablePersistentPlaylistPanel": true,
            "isAudioOnly": true,
        });

        let url = format!("{}/next", self.base_url);
        let response = self
            .client
            .post(&url)
            .query(&[("prettyPrint", "false")])
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            anyhow::bail!("Watch-playlist lookup failed: {}", response.status());
        }

        let data: Value = response.json().await?;
        Ok(parse_watch_playlist(&data, self.limit))
    }
}

/// First song renderer in the search shelf, with its video id.
fn parse_search_best_match(data: &Value) -> Option<(String, MatchedTrack)> {
    let sections = data
        .pointer(
            "/contents/tabbedSearchResultsRenderer/tabs/0/tabRenderer/content\
             /sectionListRenderer/contents",
        )?
        .as_array()?;

    for section in sections {
        let Some(items) = section
            .pointer("/musicShelfRenderer/contents")
            .and_then(Value::as_array)
        else {
            continue;
        };

        for item in items {
            let Some(renderer) = item.get("musicResponsiveListItemRenderer") else {
                continue;
            };
            let Some(video_id) = renderer
                .pointer("/playlistItemData/videoId")
                .and_then(Value::as_str)
            else {
                continue;
            };

            let matched = MatchedTrack {
                title: flex_column_text(renderer, 0).unwrap_or_default(),
                artist: flex_column_text(renderer, 1).unwrap_or_default(),
                url: format!("{}{}", WATCH_URL_BASE, video_id),
            };
            return Some((video_id.to_string(), matched));
        }
    }

    None
}

fn flex_column_text(renderer: &Value, index: usize) -> Option<String> {
    renderer
        .pointer(&format!(
            "/flexColumns/{}/musicResponsiveListItemFlexColumnRenderer/text/runs/0/text",
            index
        ))
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Tracks from the watch-playlist panel, capped at `limit`.
fn parse_watch_playlist(data: &Value, limit: usize) -> Vec<Recommendation> {
    let Some(items) = data
        .pointer(
            "/contents/singleColumnMusicWatchNextResultsRenderer/tabbedRenderer\
             /watchNextTabbedResultsRenderer/tabs/0/tabRenderer/content\
             /musicQueueRenderer/content/playlistPanelRenderer/contents",
        )
        .and_then(Value::as_array)
    else {
        return Vec::new();
    };

    let mut tracks = Vec::new();
    for item in items {
        if tracks.len() >= limit {
            break;
        }

        let Some(renderer) = item.get("playlistPanelVideoRenderer") else {
            continue;
        };
        let Some(video_id) = renderer.pointer("/videoId").and_then(Value::as_str) else {
            continue;
        };

        tracks.push(Recommendation {
            title: renderer
                .pointer("/title/runs/0/text")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            artist: renderer
                .pointer("/longBylineText/runs/0/text")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            platform: Platform::YoutubeMusic,
            url: format!("{}{}", WATCH_URL_BASE, video_id),
        });
    }

    tracks
}
