//! Command Line Interface module
//!
//! - `recommend`: one-shot query for a song
//! - `interactive`: session loop with mutable platform selection and state
//! - `config`: show and reset configuration
//! - `render`: shared terminal output for both entry points

pub mod config;
pub mod interactive;
pub mod recommend;
pub mod render;
