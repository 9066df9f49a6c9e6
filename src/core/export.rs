use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::core::model::Recommendation;
use crate::core::session::SessionState;
use crate::error::{ExportError, Result, TunediveError};

pub const CSV_HEADER: &str = "Title,Artist,Platform,URL";

/// Paths of the files an export wrote; a slot is `None` when its source had
/// no rows.
#[derive(Debug, Default)]
pub struct ExportPaths {
    pub youtube: Option<PathBuf>,
    pub spotify: Option<PathBuf>,
    pub combined: Option<PathBuf>,
}

impl ExportPaths {
    pub fn written(&self) -> Vec<&PathBuf> {
        [&self.youtube, &self.spotify, &self.combined]
            .into_iter()
            .flatten()
            .collect()
    }
}

/// Write the three CSV exports (YouTube-only, Spotify-only, combined) into
/// `dir`. Files for empty sources are skipped rather than written empty.
pub fn write_exports(dir: &Path, song_name: &str, state: &SessionState) -> Result<ExportPaths> {
    if state.is_empty() {
        return Err(TunediveError::Export(ExportError::Empty));
    }
    if dir.exists() && !dir.is_dir() {
        return Err(TunediveError::Export(ExportError::NotADirectory {
            path: dir.to_path_buf(),
        }));
    }
    fs::create_dir_all(dir)?;

    let mut paths = ExportPaths::default();

    let youtube_rows = state.youtube_rows();
    if !youtube_rows.is_empty() {
        let path = dir.join("youtube_music_recommendations.csv");
        fs::write(&path, to_csv(&youtube_rows))?;
        paths.youtube = Some(path);
    }

    let spotify_rows = state.spotify_rows();
    if !spotify_rows.is_empty() {
        let path = dir.join("spotify_recommendations.csv");
        fs::write(&path, to_csv(&spotify_rows))?;
        paths.spotify = Some(path);
    }

    let combined = state.merged_rows();
    if !combined.is_empty() {
        let path = dir.join(combined_file_name(song_name));
        fs::write(&path, to_csv(&combined))?;
        paths.combined = Some(path);
    }

    info!("Exported {} file(s) to {}", paths.written().len(), dir.display());
    Ok(paths)
}

pub fn to_csv(rows: &[Recommendation]) -> String {
    let mut csv = format!("{}\n", CSV_HEADER);
    for row in rows {
        csv.push_str(&format!(
            "{},{},{},{}\n",
            escape_csv(&row.title),
            escape_csv(&row.artist),
            escape_csv(row.platform.as_str()),
            escape_csv(&row.url)
        ));
    }
    csv
}

fn combined_file_name(song_name: &str) -> String {
    format!("all_recommendations_{}.csv", song_name.replace(' ', "_"))
}

fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::Platform;

    fn rec(title: &str, artist: &str, platform: Platform) -> Recommendation {
        Recommendation {
            title: title.to_string(),
            artist: artist.to_string(),
            platform,
            url: "https://example.invalid/x".to_string(),
        }
    }

    #[test]
    fn csv_has_header_and_one_line_per_row() {
        let rows = vec![
            rec("Bohemian Rhapsody", "Queen", Platform::YoutubeMusic),
            rec("The Show Must Go On", "Queen", Platform::Spotify),
        ];

        let csv = to_csv(&rows);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Title,Artist,Platform,URL");
        assert!(lines[1].starts_with("Bohemian Rhapsody,Queen,YouTube Music,"));
        assert!(lines[2].contains(",Spotify,"));
    }

    #[test]
    fn csv_escapes_commas_and_quotes() {
        let rows = vec![rec("Don't Stop Me Now, Live", "\"Queen\"", Platform::Spotify)];
        let csv = to_csv(&rows);
        let line = csv.lines().nth(1).unwrap();
        assert!(line.starts_with("\"Don't Stop Me Now, Live\",\"\"\"Queen\"\"\","));
    }

    #[test]
    fn combined_file_name_replaces_spaces() {
        assert_eq!(
            combined_file_name("Bohemian Rhapsody"),
            "all_recommendations_Bohemian_Rhapsody.csv"
        );
    }

    #[test]
    fn export_on_empty_session_is_an_error() {
        let state = SessionState::default();
        let err = write_exports(Path::new("/tmp/tunedive-test-unused"), "x", &state);
        assert!(matches!(
            err,
            Err(TunediveError::Export(ExportError::Empty))
        ));
    }
}
