//! Static registry of category rows.
//!
//! Each row maps a [`CategoryKey`] to its endpoint, display title and
//! featured flag. The tables are `'static` and never mutated; the store
//! creates one slice per entry at startup.

use crate::api::{Endpoint, MediaItem, Page};
use crate::store::{Action, AppState, CategorySlice, FetchMode, SliceAction};
use std::fmt;
use std::sync::Arc;

// ============================================================================
// Keys
// ============================================================================

/// Top-level content type a row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContentType {
    Movies,
    Series,
    Popular,
}

impl ContentType {
    pub const ALL: [ContentType; 3] = [ContentType::Movies, ContentType::Series, ContentType::Popular];

    /// Resolve a route segment (`browse`, `movies`, `tvseries`, `popular`).
    pub fn from_route(segment: &str) -> Option<Self> {
        match segment {
            "browse" | "movies" => Some(ContentType::Movies),
            "tvseries" | "series" => Some(ContentType::Series),
            "popular" => Some(ContentType::Popular),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::Movies => "movies",
            ContentType::Series => "series",
            ContentType::Popular => "popular",
        }
    }

    /// All rows for this content type, in display order.
    pub fn entries(self) -> &'static [CategoryEntry] {
        match self {
            ContentType::Movies => MOVIES,
            ContentType::Series => SERIES,
            ContentType::Popular => POPULAR,
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies one category slice: a genre key within a content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CategoryKey {
    pub content: ContentType,
    pub genre: &'static str,
}

impl CategoryKey {
    pub const fn new(content: ContentType, genre: &'static str) -> Self {
        Self { content, genre }
    }

    /// Action-type stem, e.g. `ACTION_MOVIES` or `TOPRATED_SERIES`.
    pub fn action_stem(&self) -> String {
        format!(
            "{}_{}",
            self.genre.to_ascii_uppercase(),
            self.content.as_str().to_ascii_uppercase()
        )
    }

    pub fn request(self) -> Action {
        self.with(SliceAction::Request(FetchMode::Fresh))
    }

    pub fn load_more_request(self) -> Action {
        self.with(SliceAction::Request(FetchMode::LoadMore))
    }

    pub fn success(self, page: Page<MediaItem>) -> Action {
        self.with(SliceAction::Success(page))
    }

    pub fn load_more_success(self, page: Page<MediaItem>) -> Action {
        self.with(SliceAction::LoadMoreSuccess(page))
    }

    pub fn failure(self, message: impl Into<String>) -> Action {
        self.with(SliceAction::Failure(message.into()))
    }

    fn with(self, action: SliceAction<MediaItem>) -> Action {
        Action::Category {
            key: self,
            generation: None,
            action,
        }
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.content, self.genre)
    }
}

// ============================================================================
// Entries
// ============================================================================

/// One row of the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryEntry {
    pub id: u32,
    pub title: &'static str,
    pub key: CategoryKey,
    pub endpoint: Endpoint,
    /// Rendered with large posters (first row of each content type).
    pub is_featured: bool,
}

impl CategoryEntry {
    const fn new(
        id: u32,
        title: &'static str,
        content: ContentType,
        genre: &'static str,
        endpoint: Endpoint,
    ) -> Self {
        Self {
            id,
            title,
            key: CategoryKey::new(content, genre),
            endpoint,
            is_featured: false,
        }
    }

    const fn featured(mut self) -> Self {
        self.is_featured = true;
        self
    }

    /// This row's slice in `state`.
    pub fn select<'a>(&self, state: &'a AppState) -> Option<&'a Arc<CategorySlice>> {
        state.category(&self.key)
    }
}

/// Look up a row by content type and genre key.
pub fn find(content: ContentType, genre: &str) -> Option<&'static CategoryEntry> {
    content.entries().iter().find(|e| e.key.genre == genre)
}

/// Every registered row across all content types.
pub fn all() -> impl Iterator<Item = &'static CategoryEntry> {
    ContentType::ALL.into_iter().flat_map(|c| c.entries().iter())
}

const POPULARITY: (&str, &str) = ("sort_by", "popularity.desc");

const MOVIES: &[CategoryEntry] = &[
    CategoryEntry::new(
        0,
        "Trending Now",
        ContentType::Movies,
        "trending",
        Endpoint::new("/trending/movie/week", &[POPULARITY]),
    )
    .featured(),
    CategoryEntry::new(
        1,
        "Netflix Originals",
        ContentType::Movies,
        "netflix",
        Endpoint::new("/discover/tv", &[("with_networks", "213"), POPULARITY]),
    ),
    CategoryEntry::new(
        2,
        "Top Rated",
        ContentType::Movies,
        "toprated",
        Endpoint::new("/movie/top_rated", &[POPULARITY]).regional(),
    ),
    CategoryEntry::new(
        3,
        "Upcoming",
        ContentType::Movies,
        "upcoming",
        Endpoint::new("/movie/upcoming", &[]),
    ),
    CategoryEntry::new(
        4,
        "Latest Releases",
        ContentType::Movies,
        "latest",
        Endpoint::new("/discover/movie", &[POPULARITY]).recent_releases(),
    ),
    CategoryEntry::new(
        5,
        "Action",
        ContentType::Movies,
        "action",
        Endpoint::new("/discover/movie", &[("with_genres", "28"), POPULARITY]),
    ),
    CategoryEntry::new(
        6,
        "Adventure",
        ContentType::Movies,
        "adventure",
        Endpoint::new("/discover/movie", &[("with_genres", "12"), POPULARITY]),
    ),
    CategoryEntry::new(
        7,
        "Comedy",
        ContentType::Movies,
        "comedy",
        Endpoint::new("/discover/movie", &[("with_genres", "35"), POPULARITY]),
    ),
    CategoryEntry::new(
        8,
        "Horror",
        ContentType::Movies,
        "horror",
        Endpoint::new("/discover/movie", &[("with_genres", "27"), POPULARITY]),
    ),
    CategoryEntry::new(
        9,
        "Romance",
        ContentType::Movies,
        "romance",
        Endpoint::new("/discover/movie", &[("with_genres", "10749"), POPULARITY]),
    ),
    CategoryEntry::new(
        10,
        "Animation",
        ContentType::Movies,
        "animation",
        Endpoint::new("/discover/movie", &[("with_genres", "16"), POPULARITY]),
    ),
];

const SERIES: &[CategoryEntry] = &[
    CategoryEntry::new(
        0,
        "Trending Now",
        ContentType::Series,
        "trending",
        Endpoint::new("/trending/tv/week", &[POPULARITY]),
    )
    .featured(),
    CategoryEntry::new(
        1,
        "Netflix Originals",
        ContentType::Series,
        "netflix",
        Endpoint::new("/discover/tv", &[("with_networks", "213"), POPULARITY]),
    ),
    CategoryEntry::new(
        2,
        "Action & Adventure",
        ContentType::Series,
        "actionadventure",
        Endpoint::new("/discover/tv", &[("with_genres", "10759"), POPULARITY]),
    ),
    CategoryEntry::new(
        3,
        "Animation",
        ContentType::Series,
        "animation",
        Endpoint::new("/discover/tv", &[("with_genres", "16"), POPULARITY]),
    ),
    CategoryEntry::new(
        4,
        "Comedy",
        ContentType::Series,
        "comedy",
        Endpoint::new("/discover/tv", &[("with_genres", "35"), POPULARITY]),
    ),
    CategoryEntry::new(
        5,
        "Crime",
        ContentType::Series,
        "crime",
        Endpoint::new("/discover/tv", &[("with_genres", "80"), POPULARITY]),
    ),
    CategoryEntry::new(
        6,
        "Documentary",
        ContentType::Series,
        "documentary",
        Endpoint::new("/discover/tv", &[("with_genres", "99"), POPULARITY]),
    ),
    CategoryEntry::new(
        7,
        "Family",
        ContentType::Series,
        "family",
        Endpoint::new("/discover/tv", &[("with_genres", "10751"), POPULARITY]),
    ),
    CategoryEntry::new(
        8,
        "Kids",
        ContentType::Series,
        "kids",
        Endpoint::new("/discover/tv", &[("with_genres", "10762"), POPULARITY]),
    ),
    CategoryEntry::new(
        9,
        "Sci-Fi & Fantasy",
        ContentType::Series,
        "scifi",
        Endpoint::new("/discover/tv", &[("with_genres", "10765"), POPULARITY]),
    ),
];

const POPULAR: &[CategoryEntry] = &[
    CategoryEntry::new(
        0,
        "Trending This Week",
        ContentType::Popular,
        "trending",
        Endpoint::new("/trending/all/week", &[POPULARITY]),
    )
    .featured(),
    CategoryEntry::new(
        1,
        "Top Rated",
        ContentType::Popular,
        "toprated",
        Endpoint::new("/movie/top_rated", &[POPULARITY]).regional(),
    ),
    CategoryEntry::new(
        2,
        "Upcoming",
        ContentType::Popular,
        "upcoming",
        Endpoint::new("/movie/upcoming", &[]),
    ),
    CategoryEntry::new(
        3,
        "Released This Month",
        ContentType::Popular,
        "latest",
        Endpoint::new("/discover/movie", &[POPULARITY]).recent_releases(),
    ),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_genre_keys_unique_within_content_type() {
        for content in ContentType::ALL {
            let mut seen = HashSet::new();
            for entry in content.entries() {
                assert_eq!(entry.key.content, content);
                assert!(seen.insert(entry.key.genre), "duplicate key {}", entry.key);
            }
        }
    }

    #[test]
    fn test_ids_match_position_and_first_row_is_featured() {
        for content in ContentType::ALL {
            for (idx, entry) in content.entries().iter().enumerate() {
                assert_eq!(entry.id as usize, idx);
                assert_eq!(entry.is_featured, idx == 0, "{}", entry.key);
            }
        }
    }

    #[test]
    fn test_find_and_route_lookup() {
        let entry = find(ContentType::Movies, "action").unwrap();
        assert_eq!(entry.title, "Action");
        assert_eq!(entry.endpoint.params[0], ("with_genres", "28"));
        assert!(find(ContentType::Series, "horror").is_none());

        assert_eq!(ContentType::from_route("browse"), Some(ContentType::Movies));
        assert_eq!(ContentType::from_route("tvseries"), Some(ContentType::Series));
        assert_eq!(ContentType::from_route("popular"), Some(ContentType::Popular));
        assert_eq!(ContentType::from_route("mylist"), None);
    }

    #[test]
    fn test_action_stem() {
        let key = CategoryKey::new(ContentType::Movies, "action");
        assert_eq!(key.action_stem(), "ACTION_MOVIES");
        assert_eq!(key.to_string(), "movies/action");
    }

    #[test]
    fn test_all_covers_every_table() {
        assert_eq!(all().count(), MOVIES.len() + SERIES.len() + POPULAR.len());
    }
}
