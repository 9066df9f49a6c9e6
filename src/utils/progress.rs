use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Centralized progress bar creation utilities
pub struct ProgressUtils;

impl ProgressUtils {
    /// Spinner shown while waiting on the external services
    pub fn create_fetch_spinner() -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .expect("valid spinner template"),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }
}

/// Common progress messages
pub struct ProgressMessages;

impl ProgressMessages {
    pub fn searching_for(song: &str) -> String {
        format!("🔍 Searching: {}", song)
    }
}
