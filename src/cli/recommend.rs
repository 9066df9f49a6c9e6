use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use tracing::info;

use crate::cli::render;
use crate::config::Config;
use crate::core::export;
use crate::core::model::PlatformSelection;
use crate::core::session::{Dispatcher, SessionState};
use crate::utils::progress::{ProgressMessages, ProgressUtils};

#[derive(Args)]
pub struct RecommendArgs {
    /// Song name to search for
    #[arg(value_name = "SONG")]
    song: String,

    /// Platforms to query (both, youtube, spotify)
    #[arg(short, long, default_value = "both")]
    platform: String,

    /// Output format (cards, table, json)
    #[arg(long, default_value = "cards")]
    format: String,

    /// Write the CSV exports into this directory
    #[arg(long, value_name = "DIR")]
    export_dir: Option<PathBuf>,
}

pub async fn execute(args: RecommendArgs, config: &Config) -> Result<()> {
    let selection: PlatformSelection = args
        .platform
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    if args.song.trim().is_empty() {
        anyhow::bail!("Song name must not be empty");
    }

    let mut dispatcher = Dispatcher::new(config);
    let mut state = SessionState::default();

    let spinner = ProgressUtils::create_fetch_spinner();
    spinner.set_message(ProgressMessages::searching_for(&args.song));
    let outcome = dispatcher.fetch(&args.song, selection, &mut state).await;
    spinner.finish_and_clear();

    match args.format.as_str() {
        "json" => render::output_json(&state)?,
        "table" => {
            render::print_notices(&outcome.notices);
            render::output_table(&state.merged_rows());
        }
        "cards" => {
            render::print_notices(&outcome.notices);
            render::print_cards(&state, selection);
        }
        other => anyhow::bail!("Unsupported format: {}. Available: cards, table, json", other),
    }

    if let Some(dir) = &args.export_dir {
        if state.merged_rows().is_empty() {
            info!("Nothing to export for: {}", args.song);
        } else {
            let paths = export::write_exports(dir, &args.song, &state)?;
            render::print_export_summary(&paths);
        }
    }

    Ok(())
}
