//! Media metadata API: HTTP client, wire types and the genre lookup.
//!
//! - [`client`] - `reqwest`-based client with size-limited JSON decoding
//! - [`types`] - `MediaItem`, `Page`, `Endpoint`
//! - [`genres`] - static genre id to name table used at the view boundary

mod client;
mod genres;
mod types;

pub use client::{ApiError, MediaApi};
pub use genres::{genre_name, genre_names};
pub use types::{Endpoint, MediaId, MediaItem, Page};
