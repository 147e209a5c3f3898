//! Plain-text rendering of store state for the CLI.
//!
//! Mirrors the three row states a graphical view shows: a skeleton while
//! loading, a generic error notice on failure, and the titles otherwise.

use crate::api::MediaItem;
use crate::registry::{self, CategoryEntry, ContentType};
use crate::store::{SearchState, SliceMeta, Status};
use crate::util::{
    capitalize_first, pick_featured, sanitize, truncate_to_width, year_only, BANNER_OVERVIEW_WIDTH,
};
use rand::Rng;
use std::fmt::Write;

pub const LOADING: &str = "Loading...";
pub const ERROR_NOTICE: &str = "Oops, an error occurred.";
pub const NO_FAVOURITES: &str = "Sorry, you don't have a favourite movie or tv-show yet.";
pub const NO_RESULTS: &str = "No results.";

/// One line per item: `title (year)`, clipped to `width` columns.
fn item_line(item: &MediaItem, width: usize) -> String {
    let title = sanitize(item.display_title());
    let line = match item.date().and_then(year_only) {
        Some(year) => format!("  {} ({})", title, year),
        None => format!("  {}", title),
    };
    truncate_to_width(&line, width).into_owned()
}

fn push_items(out: &mut String, items: &[MediaItem], width: usize) {
    for item in items {
        out.push_str(&item_line(item, width));
        out.push('\n');
    }
}

/// Banner for a featured row: a uniformly picked item and its overview.
pub fn render_banner<R: Rng + ?Sized>(items: &[MediaItem], width: usize, rng: &mut R) -> Option<String> {
    let item = pick_featured(items, rng)?;
    let mut out = String::new();
    let _ = writeln!(out, "* {}", sanitize(item.display_title()));
    if let Some(overview) = item.overview.as_deref().filter(|o| !o.is_empty()) {
        let overview = sanitize(overview);
        let _ = writeln!(
            out,
            "  {}",
            truncate_to_width(&overview, BANNER_OVERVIEW_WIDTH.min(width.saturating_sub(2)))
        );
    }
    Some(out)
}

/// A category row: its title, then loading, error or item lines.
///
/// Takes selector output: the row's items and its [`SliceMeta`].
pub fn render_row<R: Rng + ?Sized>(
    entry: &CategoryEntry,
    items: &[MediaItem],
    meta: &SliceMeta,
    width: usize,
    rng: &mut R,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", entry.title);

    if entry.is_featured && meta.status == Status::Loaded {
        if let Some(banner) = render_banner(items, width, rng) {
            out.push_str(&banner);
        }
    }

    // Items already on screen stay visible while the next page loads.
    push_items(&mut out, items, width);

    match meta.status {
        Status::Loading => {
            let _ = writeln!(out, "  {}", LOADING);
        }
        Status::Failed => {
            let _ = writeln!(out, "  {}", ERROR_NOTICE);
        }
        Status::Idle | Status::Loaded => {}
    }
    out
}

pub fn render_search(search: &SearchState, width: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Search results for \"{}\"", sanitize(&search.query_text));
    match search.status {
        Status::Loading => {
            let _ = writeln!(out, "  {}", LOADING);
        }
        Status::Failed => {
            let _ = writeln!(out, "  {}", ERROR_NOTICE);
        }
        Status::Loaded if search.results.is_empty() => {
            let _ = writeln!(out, "  {}", NO_RESULTS);
        }
        Status::Idle | Status::Loaded => push_items(&mut out, &search.results, width),
    }
    out
}

pub fn render_favourites(items: &[MediaItem], width: usize) -> String {
    let mut out = String::from("My List\n");
    if items.is_empty() {
        let _ = writeln!(out, "  {}", NO_FAVOURITES);
    } else {
        push_items(&mut out, items, width);
    }
    out
}

/// Every registered row, grouped by content type.
pub fn render_category_list() -> String {
    let mut out = String::new();
    for content in ContentType::ALL {
        let _ = writeln!(out, "{}", capitalize_first(content.as_str()));
        for entry in registry::all().filter(|e| e.key.content == content) {
            let marker = if entry.is_featured { " (featured)" } else { "" };
            let _ = writeln!(out, "  {:<18} {}{}", entry.key.genre, entry.title, marker);
        }
    }
    out
}
