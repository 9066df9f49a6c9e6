use anyhow::Result;
use clap::Args;
use crossterm::style::Stylize;
use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::cli::render;
use crate::config::Config;
use crate::core::export;
use crate::core::model::PlatformSelection;
use crate::core::session::{Dispatcher, SessionState};
use crate::utils::progress::{ProgressMessages, ProgressUtils};

#[derive(Args)]
pub struct InteractiveArgs {
    /// Initial platform selection (both, youtube, spotify)
    #[arg(short, long, default_value = "both")]
    platform: String,
}

/// Line-oriented session loop. Plain input is treated as a song name;
/// `:`-prefixed input runs a session command.
pub async fn execute(args: InteractiveArgs, config: &Config) -> Result<()> {
    let mut selection: PlatformSelection = args
        .platform
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    let mut dispatcher = Dispatcher::new(config);
    let mut state = SessionState::default();
    let mut last_song: Option<String> = None;

    println!("{}", "🎵 tunedive interactive session".bold());
    println!("Type a song name to search, or :help for commands.");
    println!();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("{} ", format!("tunedive ({})>", selection.as_str()).green());
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let input = line.trim();

        if input.is_empty() {
            continue;
        }

        if let Some(command) = input.strip_prefix(':') {
            let mut parts = command.split_whitespace();
            match parts.next().unwrap_or("") {
                "quit" | "q" | "exit" => break,

                "help" | "h" => print_help(),

                "clear" => {
                    state.clear();
                    println!("Session results cleared.");
                }

                "platform" => match parts.next() {
                    Some(value) => match value.parse::<PlatformSelection>() {
                        Ok(parsed) => {
                            selection = parsed;
                            println!("Platform set to {}.", selection.as_str());
                        }
                        Err(e) => println!("{}", e.yellow()),
                    },
                    None => println!("Current platform: {}", selection.as_str()),
                },

                "cache" => {
                    let (youtube, lastfm) = dispatcher.cache_stats();
                    render::print_cache_stats("YouTube Music cache", &youtube);
                    render::print_cache_stats("Last.fm cache", &lastfm);
                }

                "export" => {
                    if state.merged_rows().is_empty() {
                        println!("{}", "Nothing to export yet; search for a song first.".yellow());
                        continue;
                    }
                    let dir = parts.next().unwrap_or(".");
                    let song = last_song.as_deref().unwrap_or("recommendations");
                    match export::write_exports(Path::new(dir), song, &state) {
                        Ok(paths) => render::print_export_summary(&paths),
                        Err(e) => println!("{} {}", "⚠".yellow(), e.to_string().yellow()),
                    }
                }

                other => {
                    println!("Unknown command :{}. Type :help for commands.", other);
                }
            }
            continue;
        }

        // Anything else is a song name
        let spinner = ProgressUtils::create_fetch_spinner();
        spinner.set_message(ProgressMessages::searching_for(input));
        let outcome = dispatcher.fetch(input, selection, &mut state).await;
        spinner.finish_and_clear();

        render::print_notices(&outcome.notices);
        render::print_cards(&state, selection);
        last_song = Some(input.to_string());
    }

    println!("Bye.");
    Ok(())
}

fn print_help() {
    println!("Commands:");
    println!("  <song name>          search the selected platforms");
    println!("  :platform [VALUE]    show or set platform (both, youtube, spotify)");
    println!("  :clear               reset the stored results");
    println!("  :export [DIR]        write the CSV exports (default: current directory)");
    println!("  :cache               show cache statistics");
    println!("  :quit                leave the session");
}
