//! Core functionality modules
//!
//! - `model`: normalized recommendation records shared by both adapters
//! - `cache`: TTL memoization for adapter results
//! - `youtube`: YouTube Music (InnerTube) adapter
//! - `lastfm`: Last.fm similarity adapter with constructed Spotify links
//! - `session`: query dispatch, session state and result merging
//! - `export`: CSV rendering of result sets

pub mod cache;
pub mod export;
pub mod lastfm;
pub mod model;
pub mod session;
pub mod youtube;
