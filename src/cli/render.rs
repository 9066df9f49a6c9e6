use anyhow::Result;
use crossterm::style::Stylize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::cache::CacheStats;
use crate::core::export::ExportPaths;
use crate::core::model::{Platform, PlatformSelection, Recommendation};
use crate::core::session::SessionState;

pub fn print_notices(notices: &[String]) {
    for notice in notices {
        println!("{} {}", "⚠".yellow(), notice.clone().yellow());
    }
}

/// Card view: matched track, then a numbered list per platform.
pub fn print_cards(state: &SessionState, selection: PlatformSelection) {
    if selection.includes_youtube() {
        print_youtube_section(state);
    }

    if selection.includes_spotify() {
        print_spotify_section(state);
    }
}

fn print_youtube_section(state: &SessionState) {
    let Some(result) = &state.youtube else {
        return;
    };

    let Some(matched) = &result.matched else {
        println!("{}", "No YouTube Music results found.".yellow());
        return;
    };

    println!("{}", "🎧 You searched for:".bold());
    println!("   {}", matched.title.clone().bold());
    println!("   by {}", matched.artist);
    println!("   {}", matched.url.clone().red());
    println!();

    println!("{}", "YouTube Music Recommendations".bold());
    if result.tracks.is_empty() {
        println!("  No recommendations found from YouTube Music.");
        return;
    }

    for (i, track) in result.tracks.iter().enumerate() {
        print_card(i + 1, track);
    }
    println!();
}

fn print_spotify_section(state: &SessionState) {
    let Some(recommendations) = &state.lastfm else {
        println!("{}", "No Spotify recommendations found.".yellow());
        return;
    };

    println!("{}", "Spotify Recommendations".bold());
    for (i, track) in recommendations.iter().enumerate() {
        print_card(i + 1, track);
    }
    println!();
}

fn print_card(index: usize, track: &Recommendation) {
    let title = if track.title.is_empty() {
        "Unknown Title"
    } else {
        &track.title
    };
    let artist = if track.artist.is_empty() {
        "Unknown Artist"
    } else {
        &track.artist
    };

    println!("  {}. {}", index, title.bold());
    println!("     by {}", artist);
    match track.platform {
        Platform::YoutubeMusic => println!("     {}", track.url.clone().red()),
        Platform::Spotify => println!("     {}", track.url.clone().green()),
    }
}

/// Four-column table over the merged rows.
pub fn output_table(rows: &[Recommendation]) {
    if rows.is_empty() {
        println!("No recommendations to show.");
        return;
    }

    println!("┌────┬───────────────────────────┬─────────────────────┬───────────────┐");
    println!("│ #  │ Title                     │ Artist              │ Platform      │");
    println!("├────┼───────────────────────────┼─────────────────────┼───────────────┤");
    for (i, row) in rows.iter().enumerate() {
        println!(
            "│{:>3} │ {} │ {} │ {} │",
            i + 1,
            truncate_string(&row.title, 25),
            truncate_string(&row.artist, 19),
            truncate_string(row.platform.as_str(), 13),
        );
    }
    println!("└────┴───────────────────────────┴─────────────────────┴───────────────┘");

    println!();
    for (i, row) in rows.iter().enumerate() {
        println!("{:>3}. {}", i + 1, row.url);
    }
}

pub fn output_json(state: &SessionState) -> Result<()> {
    let json = serde_json::to_string_pretty(state)?;
    println!("{}", json);
    Ok(())
}

pub fn print_export_summary(paths: &ExportPaths) {
    for path in paths.written() {
        println!("{} Wrote {}", "✅".green(), path.display());
    }
}

pub fn print_cache_stats(label: &str, stats: &CacheStats) {
    println!("{}", label.to_string().bold());
    println!("  Entries:  {}", stats.total_entries);
    println!("  Requests: {}", stats.total_requests);
    println!("  Hits:     {}", stats.cache_hits);
    println!("  Hit rate: {:.1}%", stats.hit_rate_percent);
}

/// Pad or truncate to an exact visual width, emoji-safe.
fn truncate_string(s: &str, max_len: usize) -> String {
    let visual_width = s.width();
    if visual_width <= max_len {
        let padding = max_len - visual_width;
        format!("{}{}", s, " ".repeat(padding))
    } else {
        let ellipsis_width = UnicodeWidthChar::width('…').unwrap_or(1);
        let mut truncated = String::new();
        let mut current_width = 0;

        for ch in s.chars() {
            let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
            if current_width + ch_width + ellipsis_width > max_len {
                break;
            }
            truncated.push(ch);
            current_width += ch_width;
        }

        truncated.push('…');
        current_width += ellipsis_width;
        format!("{}{}", truncated, " ".repeat(max_len - current_width))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_pads_short_strings_to_width() {
        assert_eq!(truncate_string("abc", 5), "abc  ");
        assert_eq!(truncate_string("abcde", 5), "abcde");
    }

    #[test]
    fn truncate_long_strings_keeps_visual_width() {
        let out = truncate_string("a very long track title", 10);
        assert_eq!(out.width(), 10);
        assert!(out.contains('…'));
    }

    #[test]
    fn truncate_handles_wide_characters() {
        let out = truncate_string("残酷な天使のテーゼ", 8);
        assert_eq!(out.width(), 8);
    }
}
