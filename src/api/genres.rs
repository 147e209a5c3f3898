//! Genre id to display name lookup.
//!
//! The store keeps raw `genre_ids`; names are resolved only when a view
//! composes a detail snapshot. Movie and TV genre ids share one namespace.

const GENRES: &[(i64, &str)] = &[
    (12, "Adventure"),
    (14, "Fantasy"),
    (16, "Animation"),
    (18, "Drama"),
    (27, "Horror"),
    (28, "Action"),
    (35, "Comedy"),
    (36, "History"),
    (37, "Western"),
    (53, "Thriller"),
    (80, "Crime"),
    (99, "Documentary"),
    (878, "Science Fiction"),
    (9648, "Mystery"),
    (10402, "Music"),
    (10749, "Romance"),
    (10751, "Family"),
    (10752, "War"),
    (10759, "Action & Adventure"),
    (10762, "Kids"),
    (10763, "News"),
    (10764, "Reality"),
    (10765, "Sci-Fi & Fantasy"),
    (10766, "Soap"),
    (10767, "Talk"),
    (10768, "War & Politics"),
    (10770, "TV Movie"),
];

/// Name for a single genre id, if known.
pub fn genre_name(id: i64) -> Option<&'static str> {
    GENRES
        .binary_search_by_key(&id, |(gid, _)| *gid)
        .ok()
        .map(|idx| GENRES[idx].1)
}

/// Names for a list of ids, skipping unknown ones and preserving order.
pub fn genre_names(ids: &[i64]) -> Vec<&'static str> {
    ids.iter().filter_map(|id| genre_name(*id)).collect()
}
